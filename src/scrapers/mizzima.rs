//! Mizzima domestic news scraper.
//!
//! Stories are listed under <https://www.mizzima.com/news/domestic> in
//! `div.views-row` blocks. The publication time comes from the Open Graph
//! `article:published_time` meta tag.

use super::listing::{DatePolicy, HtmlListingSource, LinkFilter};
use reqwest::Client;

pub const NAME: &str = "Mizzima";

pub fn source(client: Client) -> HtmlListingSource {
    HtmlListingSource {
        name: NAME,
        base_url: "https://www.mizzima.com",
        list_url: "https://www.mizzima.com/news/domestic",
        link_selector: "div.views-row a",
        link_filter: LinkFilter::Relative,
        date_policy: DatePolicy::MetaPublishedTime,
        client,
    }
}
