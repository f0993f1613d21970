//! Keyword relevance filter applied before any summarization call.

/// Terms that make an article worth summarizing.
///
/// Matching is a case-sensitive substring test, so both capitalized
/// English forms and Burmese script are listed.
pub const KEYWORDS: &[&str] = &[
    "Myanmar",
    "Burma",
    "Burmese",
    "junta",
    "Junta",
    "Tatmadaw",
    "Yangon",
    "Naypyitaw",
    "Nay Pyi Taw",
    "Mandalay",
    "Rakhine",
    "Rohingya",
    "Kachin",
    "Karen State",
    "Karenni",
    "Shan State",
    "Chin State",
    "Sagaing",
    "NUG",
    "PDF",
    "Aung San Suu Kyi",
    "Min Aung Hlaing",
    "ASEAN",
    "မြန်မာ",
    "ရန်ကုန်",
    "နေပြည်တော်",
    "မန္တလေး",
    "စစ်ကောင်စီ",
];

/// `true` iff any keyword occurs literally in `title` or `body`.
pub fn is_relevant(title: &str, body: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|k| title.contains(k) || body.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_match() {
        assert!(is_relevant("Myanmar update", "", KEYWORDS));
    }

    #[test]
    fn test_body_match() {
        assert!(is_relevant("Weekly roundup", "Fighting continued in Sagaing.", KEYWORDS));
    }

    #[test]
    fn test_no_match() {
        assert!(!is_relevant("unrelated", "Stock markets rose today.", KEYWORDS));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_relevant("myanmar update", "", &["Myanmar"]));
    }

    #[test]
    fn test_match_is_substring_not_word() {
        assert!(is_relevant("Myanmarese traders", "", &["Myanmar"]));
    }

    #[test]
    fn test_burmese_script_match() {
        assert!(is_relevant("မြန်မာနိုင်ငံ သတင်း", "", KEYWORDS));
    }

    #[test]
    fn test_empty_keyword_list_matches_nothing() {
        assert!(!is_relevant("Myanmar", "Myanmar", &[]));
    }
}
