//! Ludu Wayoo English news scraper.

use super::listing::{DatePolicy, HtmlListingSource, LinkFilter};
use reqwest::Client;

pub const NAME: &str = "Ludu Wayoo";

pub fn source(client: Client) -> HtmlListingSource {
    HtmlListingSource {
        name: NAME,
        base_url: "https://ludunwayoo.com",
        list_url: "https://ludunwayoo.com/en/news",
        link_selector: "h2.entry-title a",
        link_filter: LinkFilter::Absolute("http"),
        date_policy: DatePolicy::TimeDatetime,
        client,
    }
}
