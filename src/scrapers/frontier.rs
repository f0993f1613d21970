//! Frontier Myanmar news scraper.
//!
//! The English news section at <https://www.frontiermyanmar.net/en/news>
//! links each story from a `div.teaser` card with a site-relative URL.
//! Article pages carry an ISO 8601 `<time datetime>` attribute.

use super::listing::{DatePolicy, HtmlListingSource, LinkFilter};
use reqwest::Client;

pub const NAME: &str = "Frontier Myanmar";

pub fn source(client: Client) -> HtmlListingSource {
    HtmlListingSource {
        name: NAME,
        base_url: "https://www.frontiermyanmar.net",
        list_url: "https://www.frontiermyanmar.net/en/news",
        link_selector: "div.teaser a",
        link_filter: LinkFilter::Relative,
        date_policy: DatePolicy::TimeDatetime,
        client,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_frontier_listing_and_article() {
        let site = source(Client::new());
        let listing = r#"
            <div class="teaser"><a href="/en/news/junta-extends-emergency/">Junta</a></div>
            <div class="teaser"><a href="/en/news/junta-extends-emergency/"><img></a></div>"#;
        assert_eq!(
            site.extract_links(listing).unwrap(),
            vec!["https://www.frontiermyanmar.net/en/news/junta-extends-emergency/"]
        );

        let page = r#"<article><h1>Junta extends emergency rule</h1>
            <time datetime="2025-08-02T11:00:00+06:30">2 August 2025</time></article>"#;
        let c = site
            .parse_article_page(
                "https://www.frontiermyanmar.net/en/news/junta-extends-emergency/",
                page,
                NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(c.title, "Junta extends emergency rule");
    }
}
