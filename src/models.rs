//! Data models for candidate articles, their summaries, and the digest.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleCandidate`]: An article discovered on a listing page or feed
//! - [`ArticleSummary`]: A candidate after translation and summarization
//! - [`Digest`]: Summaries grouped by source, in the order sources were processed

use chrono::NaiveDate;

/// An article discovered from a listing page or feed.
///
/// Produced by a [`Source`](crate::scrapers::Source) and never modified
/// afterwards. `published_date` has already been normalized to UTC+06:30
/// and checked against the run's target date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCandidate {
    /// Absolute URL of the article page.
    pub url: String,
    /// Headline in the source language.
    pub title: String,
    /// Publication date in Myanmar Standard Time.
    pub published_date: NaiveDate,
}

/// A summarized article ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    /// Display name of the source that discovered the article.
    pub source: String,
    /// Absolute URL of the article page.
    pub url: String,
    /// Japanese headline, or the title placeholder if translation failed.
    pub translated_title: String,
    /// Escaped summary with line breaks rendered as `<br>`.
    pub summary_html: String,
}

/// Summaries grouped by source name.
///
/// Groups keep the order in which their source was first added and
/// articles keep their insertion order within a group. A source that
/// contributes nothing never gets a group.
#[derive(Debug, Default)]
pub struct Digest {
    groups: Vec<(String, Vec<ArticleSummary>)>,
}

impl Digest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `summaries` to the group for `source`.
    pub fn add_all(&mut self, source: &str, summaries: Vec<ArticleSummary>) {
        if summaries.is_empty() {
            return;
        }
        match self.groups.iter_mut().find(|(name, _)| name == source) {
            Some((_, group)) => group.extend(summaries),
            None => self.groups.push((source.to_string(), summaries)),
        }
    }

    /// Groups in first-insertion order.
    pub fn groups(&self) -> &[(String, Vec<ArticleSummary>)] {
        &self.groups
    }

    /// Total number of articles across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, g)| g.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every article, in rendering order.
    pub fn articles(&self) -> impl Iterator<Item = &ArticleSummary> {
        self.groups.iter().flat_map(|(_, g)| g.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(source: &str, url: &str) -> ArticleSummary {
        ArticleSummary {
            source: source.to_string(),
            url: url.to_string(),
            translated_title: "見出し".to_string(),
            summary_html: "要約".to_string(),
        }
    }

    #[test]
    fn test_digest_empty_source_gets_no_group() {
        let mut digest = Digest::new();
        digest.add_all("Mizzima", vec![]);
        assert!(digest.is_empty());
        assert_eq!(digest.len(), 0);
    }

    #[test]
    fn test_digest_group_order_is_first_insertion() {
        let mut digest = Digest::new();
        digest.add_all("BBC Burmese", vec![summary("BBC Burmese", "https://bbc/1")]);
        digest.add_all("Mizzima", vec![summary("Mizzima", "https://mizzima/1")]);
        digest.add_all("BBC Burmese", vec![summary("BBC Burmese", "https://bbc/2")]);

        let names: Vec<&str> = digest.groups().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["BBC Burmese", "Mizzima"]);

        let bbc_urls: Vec<&str> = digest.groups()[0].1.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(bbc_urls, vec!["https://bbc/1", "https://bbc/2"]);
        assert_eq!(digest.len(), 3);
    }

    #[test]
    fn test_digest_articles_iterates_in_render_order() {
        let mut digest = Digest::new();
        digest.add_all("A", vec![summary("A", "1"), summary("A", "2")]);
        digest.add_all("B", vec![summary("B", "3")]);
        let urls: Vec<&str> = digest.articles().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["1", "2", "3"]);
    }
}
