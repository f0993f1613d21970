//! Generic scraper for sites that publish an HTML listing of article links.
//!
//! A site is described by its listing URL, the CSS selector of article
//! links, which links to keep, and a [`DatePolicy`]. Every kept link is
//! fetched and its publication date extracted; only articles dated on the
//! target day become candidates.

use super::{ScrapeError, Source, fetch_text, paragraph_text, selector, unclaimed};
use crate::dedup::SeenUrls;
use crate::models::ArticleCandidate;
use crate::utils::mmt_date;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::Html;
use tracing::{debug, info, instrument, warn};
use url::Url;

static URL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d{4})/(\d{1,2})/(\d{1,2})/").expect("valid regex"));

/// Which listing links are article links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFilter {
    /// Site-relative `href`s starting with `/`, resolved against the base URL.
    Relative,
    /// Absolute `href`s starting with the given prefix.
    Absolute(&'static str),
}

/// Where a site exposes an article's publication date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// ISO 8601 `datetime` attribute of the first `<time>` element.
    TimeDatetime,
    /// ISO 8601 `content` of `<meta property="article:published_time">`.
    MetaPublishedTime,
    /// Text of `time.entry-date` in the given `strftime` format.
    EntryDateText(&'static str),
    /// A `/YYYY/MM/DD/` segment in the article URL, falling back to
    /// [`DatePolicy::TimeDatetime`] when the URL has none.
    UrlPath,
}

/// A site scraped through its HTML listing page.
#[derive(Debug, Clone)]
pub struct HtmlListingSource {
    pub name: &'static str,
    pub base_url: &'static str,
    pub list_url: &'static str,
    pub link_selector: &'static str,
    pub link_filter: LinkFilter,
    pub date_policy: DatePolicy,
    pub client: Client,
}

impl HtmlListingSource {
    /// Article URLs on a listing page, in page order, without duplicates.
    pub fn extract_links(&self, html: &str) -> Result<Vec<String>, ScrapeError> {
        let base = Url::parse(self.base_url)?;
        let links = selector(self.link_selector)?;
        let document = Html::parse_document(html);

        let urls = document
            .select(&links)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| match self.link_filter {
                LinkFilter::Relative if href.starts_with('/') && !href.starts_with("//") => {
                    base.join(href).ok().map(|u| u.to_string())
                }
                LinkFilter::Absolute(prefix) if href.starts_with(prefix) => {
                    Some(href.to_string())
                }
                _ => None,
            })
            .unique()
            .collect();
        Ok(urls)
    }

    /// Listing links no earlier source has claimed; only these pages are fetched.
    pub fn links_to_visit(&self, html: &str, seen: &SeenUrls) -> Result<Vec<String>, ScrapeError> {
        Ok(unclaimed(self.extract_links(html)?, seen))
    }

    /// Build a candidate from an article page if it was published on `target`.
    ///
    /// `Ok(None)` means the page is well-formed but dated on another day.
    pub fn parse_article_page(
        &self,
        url: &str,
        html: &str,
        target: NaiveDate,
    ) -> Result<Option<ArticleCandidate>, ScrapeError> {
        let document = Html::parse_document(html);
        let published = extract_date(self.date_policy, url, &document)?;
        if published != target {
            debug!(%url, %published, %target, "Article is not from the target date");
            return Ok(None);
        }
        Ok(Some(ArticleCandidate {
            url: url.to_string(),
            title: extract_title(&document)?,
            published_date: published,
        }))
    }

    #[instrument(level = "debug", skip(self, target), fields(source = self.name))]
    async fn candidate_from_page(&self, url: &str, target: NaiveDate) -> Option<ArticleCandidate> {
        let html = match fetch_text(&self.client, url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, %url, "Article page fetch failed");
                return None;
            }
        };
        match self.parse_article_page(url, &html, target) {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!(error = %e, %url, "Article page not usable");
                None
            }
        }
    }
}

#[async_trait]
impl Source for HtmlListingSource {
    fn name(&self) -> &str {
        self.name
    }

    #[instrument(level = "info", skip(self, seen), fields(source = self.name))]
    async fn candidates(
        &self,
        target: NaiveDate,
        seen: &SeenUrls,
    ) -> Result<Vec<ArticleCandidate>, ScrapeError> {
        let listing = fetch_text(&self.client, self.list_url).await?;
        let urls = self.links_to_visit(&listing, seen)?;
        info!(count = urls.len(), list_url = self.list_url, "Indexed article URLs");

        let candidates: Vec<ArticleCandidate> = stream::iter(urls)
            .then(|url| async move { self.candidate_from_page(&url, target).await })
            .filter_map(|c| std::future::ready(c))
            .collect()
            .await;

        info!(count = candidates.len(), %target, "Collected candidates");
        Ok(candidates)
    }

    #[instrument(level = "info", skip(self), fields(source = self.name))]
    async fn article_text(&self, url: &str) -> Result<String, ScrapeError> {
        let html = fetch_text(&self.client, url).await?;
        Ok(paragraph_text(&html))
    }
}

/// Text of the first `<h1>`.
pub fn extract_title(document: &Html) -> Result<String, ScrapeError> {
    let h1 = selector("h1")?;
    document
        .select(&h1)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ScrapeError::Missing("h1"))
}

/// Publication date of an article page in UTC+06:30.
pub fn extract_date(
    policy: DatePolicy,
    url: &str,
    document: &Html,
) -> Result<NaiveDate, ScrapeError> {
    match policy {
        DatePolicy::TimeDatetime => {
            let time = selector("time")?;
            let value = document
                .select(&time)
                .next()
                .and_then(|el| el.value().attr("datetime"))
                .filter(|v| !v.is_empty())
                .ok_or(ScrapeError::Missing("time[datetime]"))?;
            parse_iso_date(value)
        }
        DatePolicy::MetaPublishedTime => {
            let meta = selector(r#"meta[property="article:published_time"]"#)?;
            let value = document
                .select(&meta)
                .next()
                .and_then(|el| el.value().attr("content"))
                .filter(|v| !v.is_empty())
                .ok_or(ScrapeError::Missing("meta[article:published_time]"))?;
            parse_iso_date(value)
        }
        DatePolicy::EntryDateText(format) => {
            let entry = selector("time.entry-date")?;
            let text = document
                .select(&entry)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .ok_or(ScrapeError::Missing("time.entry-date"))?;
            NaiveDate::parse_from_str(&text, format).map_err(|_| ScrapeError::Date(text))
        }
        DatePolicy::UrlPath => match date_from_url(url) {
            Some(date) => Ok(date),
            None => extract_date(DatePolicy::TimeDatetime, url, document),
        },
    }
}

/// Date encoded as `/YYYY/MM/DD/` in a URL path.
pub fn date_from_url(url: &str) -> Option<NaiveDate> {
    let caps = URL_DATE.captures(url)?;
    let y = caps[1].parse().ok()?;
    let m = caps[2].parse().ok()?;
    let d = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Parse an ISO 8601 date or timestamp.
///
/// Offset-aware timestamps are moved to UTC+06:30 first. Naive timestamps
/// and bare dates are taken as already local.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ScrapeError> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(mmt_date(&ts));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(mmt_date(&ts));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    Err(ScrapeError::Date(value.to_string()))
}
