//! YKT News scraper.
//!
//! Article URLs embed the publication day (`/2025/08/02/slug/`), which is
//! trusted over the page markup. Pages whose URL carries no date fall back
//! to the `<time datetime>` attribute.

use super::listing::{DatePolicy, HtmlListingSource, LinkFilter};
use reqwest::Client;

pub const NAME: &str = "YKT News";

pub fn source(client: Client) -> HtmlListingSource {
    HtmlListingSource {
        name: NAME,
        base_url: "https://yktnews.com",
        list_url: "https://yktnews.com/category/news/",
        link_selector: "h3.entry-title a",
        link_filter: LinkFilter::Absolute("http"),
        date_policy: DatePolicy::UrlPath,
        client,
    }
}
