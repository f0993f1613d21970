//! News source scrapers for discovering yesterday's Myanmar articles.
//!
//! Every source implements [`Source`] with two phases:
//!
//! 1. **Candidates**: Read the listing page or feed, visit links that no
//!    earlier source has claimed, and keep articles published on the
//!    target date
//! 2. **Article text**: Download one article page and join its paragraphs
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Date policy |
//! |--------|--------|--------|-------------|
//! | Frontier Myanmar | [`frontier`] | HTML listing | `<time datetime>` |
//! | Mizzima | [`mizzima`] | HTML listing | `article:published_time` meta |
//! | Voice of Myanmar | [`vom`] | HTML listing | `time.entry-date` text |
//! | Ludu Wayoo | [`ludu`] | HTML listing | `<time datetime>` |
//! | BBC Burmese | [`bbc_burmese`] | RSS feed | `pubDate` |
//! | YKT News | [`yktnews`] | HTML listing | `/YYYY/MM/DD/` in the URL |
//!
//! Each site keeps its own date policy; they differ on purpose.
//!
//! # Error Handling
//!
//! A failed listing or feed request is returned as [`ScrapeError`]. A failure
//! on a single article page is logged and that article is dropped.

use crate::dedup::SeenUrls;
use crate::models::ArticleCandidate;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

pub mod bbc_burmese;
pub mod frontier;
pub mod listing;
pub mod ludu;
pub mod mizzima;
pub mod vom;
pub mod yktnews;

/// Timeout applied to every outbound HTTP request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("myanmar_news_digest/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Missing element: {0}")]
    Missing(&'static str),

    #[error("Unparseable date: {0}")]
    Date(String),

    #[error("Feed parse error: {0}")]
    Feed(#[from] quick_xml::DeError),
}

/// A news site or feed.
#[async_trait]
pub trait Source: Send + Sync {
    /// Display name used to group the digest.
    fn name(&self) -> &str;

    /// Articles published on `target`, skipping URLs already in `seen`.
    async fn candidates(
        &self,
        target: NaiveDate,
        seen: &SeenUrls,
    ) -> Result<Vec<ArticleCandidate>, ScrapeError>;

    /// Full text of a single article, paragraphs separated by newlines.
    async fn article_text(&self, url: &str) -> Result<String, ScrapeError>;
}

/// HTTP client shared by every source.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}

/// All sources in the order they are processed.
///
/// The order matters: a URL listed by two sites is credited to the first.
pub fn all_sources(client: &Client) -> Vec<Box<dyn Source>> {
    vec![
        Box::new(frontier::source(client.clone())),
        Box::new(mizzima::source(client.clone())),
        Box::new(vom::source(client.clone())),
        Box::new(ludu::source(client.clone())),
        Box::new(bbc_burmese::source(client.clone())),
        Box::new(yktnews::source(client.clone())),
    ]
}

/// GET `url` and return the body, failing on non-2xx statuses.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(bytes = body.len(), "Fetched");
    Ok(body)
}

/// Anything identified by its article URL.
pub trait ArticleUrl {
    fn article_url(&self) -> &str;
}

impl ArticleUrl for String {
    fn article_url(&self) -> &str {
        self
    }
}

impl ArticleUrl for ArticleCandidate {
    fn article_url(&self) -> &str {
        &self.url
    }
}

/// Keep only items whose URL no earlier source has claimed this run.
pub fn unclaimed<T: ArticleUrl>(items: Vec<T>, seen: &SeenUrls) -> Vec<T> {
    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| !seen.contains(item.article_url()))
        .collect();
    if kept.len() < before {
        debug!(dropped = before - kept.len(), "Skipping URLs claimed by an earlier source");
    }
    kept
}

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e}")))
}

/// Join the text of every non-empty `<p>` with newlines.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(p) = selector("p") else {
        return String::new();
    };
    document
        .select(&p)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
