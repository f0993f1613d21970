//! Voice of Myanmar scraper.
//!
//! WordPress site; the listing at <https://voiceofmyanmarnews.com/?cat=1>
//! links stories from `h2.entry-title`. Pages show only a human-readable
//! date such as `July 25, 2025` in `time.entry-date`.

use super::listing::{DatePolicy, HtmlListingSource, LinkFilter};
use reqwest::Client;

pub const NAME: &str = "Voice of Myanmar";

pub fn source(client: Client) -> HtmlListingSource {
    HtmlListingSource {
        name: NAME,
        base_url: "https://voiceofmyanmarnews.com",
        list_url: "https://voiceofmyanmarnews.com/?cat=1",
        link_selector: "h2.entry-title a",
        link_filter: LinkFilter::Absolute("https://"),
        date_policy: DatePolicy::EntryDateText("%B %d, %Y"),
        client,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::ScrapeError;
    use chrono::NaiveDate;

    #[test]
    fn test_vom_entry_date_text() {
        let site = source(Client::new());
        let page = r#"<h1 class="entry-title">Yangon power cuts extended</h1>
            <time class="entry-date published">August 2, 2025</time>"#;
        let c = site
            .parse_article_page(
                "https://voiceofmyanmarnews.com/?p=123",
                page,
                NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(c.published_date, NaiveDate::from_ymd_opt(2025, 8, 2).unwrap());
    }

    #[test]
    fn test_vom_unparseable_date() {
        let site = source(Client::new());
        let page = r#"<h1>T</h1><time class="entry-date">2 days ago</time>"#;
        let result = site.parse_article_page(
            "https://voiceofmyanmarnews.com/?p=1",
            page,
            NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
        );
        assert!(matches!(result, Err(ScrapeError::Date(_))));
    }
}
