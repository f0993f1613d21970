//! Run-scoped record of article URLs that have already been claimed.

use std::collections::HashSet;

/// URLs seen so far in this run.
///
/// Owned by the pipeline and lent to each source. Only grows; dropped
/// with the run.
#[derive(Debug, Default)]
pub struct SeenUrls {
    urls: HashSet<String>,
}

impl SeenUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url` and return `true` if it had not been seen before.
    /// A repeat returns `false` and leaves the set untouched.
    pub fn is_new_and_mark(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_is_new() {
        let mut seen = SeenUrls::new();
        assert!(seen.is_new_and_mark("https://www.mizzima.com/article/1"));
        assert!(seen.contains("https://www.mizzima.com/article/1"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_repeat_is_rejected_without_side_effect() {
        let mut seen = SeenUrls::new();
        assert!(seen.is_new_and_mark("http://x/1"));
        assert!(!seen.is_new_and_mark("http://x/1"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_urls_are_compared_literally() {
        let mut seen = SeenUrls::new();
        assert!(seen.is_new_and_mark("http://x/1"));
        assert!(seen.is_new_and_mark("http://x/1/"));
        assert_eq!(seen.len(), 2);
    }
}
