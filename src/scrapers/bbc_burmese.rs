//! BBC Burmese RSS feed scraper.
//!
//! BBC publishes a complete RSS 2.0 feed at
//! <https://feeds.bbci.co.uk/burmese/rss.xml>, so no listing page is
//! scraped and no article page is needed to find the date or title.
//!
//! # Date Policy
//!
//! `pubDate` is RFC 2822 in GMT and is converted to UTC+06:30 before
//! being compared with the target date.

use super::{ScrapeError, Source, fetch_text, paragraph_text, unclaimed};
use crate::dedup::SeenUrls;
use crate::models::ArticleCandidate;
use crate::utils::mmt_date;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use itertools::Itertools;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

pub const NAME: &str = "BBC Burmese";
pub const FEED_URL: &str = "https://feeds.bbci.co.uk/burmese/rss.xml";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BbcBurmese {
    client: Client,
    feed_url: String,
}

pub fn source(client: Client) -> BbcBurmese {
    BbcBurmese {
        client,
        feed_url: FEED_URL.to_string(),
    }
}

/// Items from an RSS document published on `target`.
///
/// Items lacking a title, link or parseable `pubDate` are skipped. Repeated
/// links keep their first occurrence.
pub fn parse_feed(xml: &str, target: NaiveDate) -> Result<Vec<ArticleCandidate>, ScrapeError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    let candidates = rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let raw = item.pub_date?;
            let published = match DateTime::parse_from_rfc2822(raw.trim()) {
                Ok(ts) => mmt_date(&ts),
                Err(e) => {
                    debug!(error = %e, pub_date = %raw, "pubDate parse error");
                    return None;
                }
            };
            if published != target {
                return None;
            }
            Some(ArticleCandidate {
                url: item.link?.trim().to_string(),
                title: item.title?.trim().to_string(),
                published_date: published,
            })
        })
        .unique_by(|c| c.url.clone())
        .collect();
    Ok(candidates)
}

#[async_trait]
impl Source for BbcBurmese {
    fn name(&self) -> &str {
        NAME
    }

    #[instrument(level = "info", skip(self, seen), fields(source = NAME))]
    async fn candidates(
        &self,
        target: NaiveDate,
        seen: &SeenUrls,
    ) -> Result<Vec<ArticleCandidate>, ScrapeError> {
        let xml = fetch_text(&self.client, &self.feed_url).await?;
        let candidates = unclaimed(parse_feed(&xml, target)?, seen);
        info!(count = candidates.len(), %target, "Collected candidates");
        Ok(candidates)
    }

    #[instrument(level = "info", skip(self), fields(source = NAME))]
    async fn article_text(&self, url: &str) -> Result<String, ScrapeError> {
        let html = fetch_text(&self.client, url).await?;
        Ok(paragraph_text(&html))
    }
}
