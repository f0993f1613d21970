//! The aggregation pipeline: collect, deduplicate, filter, summarize, group.
//!
//! Sources run one after another in their fixed order. For each source:
//!
//! 1. Fetch candidates for the target date
//! 2. Claim each URL in the run's [`SeenUrls`]; URLs claimed by an earlier
//!    source are dropped
//! 3. Fetch the article text and apply the keyword filter
//! 4. Summarize the body and translate the title
//! 5. Append the source's summaries to the [`Digest`]
//!
//! Every article ends as either an [`ArticleSummary`] or a [`SkipReason`];
//! skips are logged and never stop the run. A listing or feed request that
//! fails aborts the whole run with that [`ScrapeError`].

use crate::api::Summarizer;
use crate::dedup::SeenUrls;
use crate::models::{ArticleCandidate, ArticleSummary, Digest};
use crate::relevance::is_relevant;
use crate::scrapers::{ScrapeError, Source};
use crate::utils::text_to_html;
use chrono::NaiveDate;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Why an article was left out of the digest.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("already claimed by an earlier source")]
    Duplicate,

    #[error("published on {0}, not the target date")]
    WrongDate(NaiveDate),

    #[error("article fetch failed: {0}")]
    Fetch(#[from] ScrapeError),

    #[error("no keyword in title or body")]
    NotRelevant,
}

/// Counters for one run, logged at the end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub candidates: usize,
    pub duplicates: usize,
    pub wrong_date: usize,
    pub fetch_failures: usize,
    pub not_relevant: usize,
    pub summarized: usize,
}

impl RunStats {
    fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Duplicate => self.duplicates += 1,
            SkipReason::WrongDate(_) => self.wrong_date += 1,
            SkipReason::Fetch(_) => self.fetch_failures += 1,
            SkipReason::NotRelevant => self.not_relevant += 1,
        }
    }
}

/// Drives sources into a [`Digest`] for one target date.
pub struct Pipeline<'a, S> {
    summarizer: &'a S,
    keywords: &'a [&'a str],
    target: NaiveDate,
    seen: SeenUrls,
    stats: RunStats,
}

impl<'a, S: Summarizer> Pipeline<'a, S> {
    pub fn new(summarizer: &'a S, keywords: &'a [&'a str], target: NaiveDate) -> Self {
        Self {
            summarizer,
            keywords,
            target,
            seen: SeenUrls::new(),
            stats: RunStats::default(),
        }
    }

    /// Process every source in order and return the grouped digest.
    ///
    /// Stops at the first source whose listing cannot be fetched.
    #[instrument(level = "info", skip_all, fields(target = %self.target, sources = sources.len()))]
    pub async fn run(
        mut self,
        sources: &[Box<dyn Source>],
    ) -> Result<(Digest, RunStats), ScrapeError> {
        let t0 = Instant::now();
        let mut digest = Digest::new();

        for source in sources {
            let summaries = self.process_source(source.as_ref()).await?;
            info!(source = source.name(), count = summaries.len(), "Source done");
            digest.add_all(source.name(), summaries);
        }

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            stats = ?self.stats,
            seen = self.seen.len(),
            groups = digest.groups().len(),
            "Pipeline complete"
        );
        Ok((digest, self.stats))
    }

    #[instrument(level = "info", skip_all, fields(source = source.name()))]
    async fn process_source(
        &mut self,
        source: &dyn Source,
    ) -> Result<Vec<ArticleSummary>, ScrapeError> {
        let candidates = source
            .candidates(self.target, &self.seen)
            .await
            .inspect_err(|e| error!(error = %e, "Listing request failed; aborting run"))?;
        self.stats.candidates += candidates.len();

        let mut summaries = Vec::new();
        for candidate in candidates {
            match self.process_article(source, &candidate).await {
                Ok(summary) => {
                    self.stats.summarized += 1;
                    summaries.push(summary);
                }
                Err(reason) => {
                    match &reason {
                        SkipReason::Fetch(_) | SkipReason::WrongDate(_) => {
                            warn!(url = %candidate.url, %reason, "Skipping article")
                        }
                        _ => debug!(url = %candidate.url, %reason, "Skipping article"),
                    }
                    self.stats.record(&reason);
                }
            }
        }
        Ok(summaries)
    }

    async fn process_article(
        &mut self,
        source: &dyn Source,
        candidate: &ArticleCandidate,
    ) -> Result<ArticleSummary, SkipReason> {
        if candidate.published_date != self.target {
            return Err(SkipReason::WrongDate(candidate.published_date));
        }
        if !self.seen.is_new_and_mark(&candidate.url) {
            return Err(SkipReason::Duplicate);
        }

        let body = source.article_text(&candidate.url).await?;
        if !is_relevant(&candidate.title, &body, self.keywords) {
            return Err(SkipReason::NotRelevant);
        }

        let summary = self.summarizer.summarize(&body).await;
        let translated_title = self.summarizer.translate_title(&candidate.title).await;
        info!(url = %candidate.url, "Summarized article");

        Ok(ArticleSummary {
            source: source.name().to_string(),
            url: candidate.url.clone(),
            translated_title,
            summary_html: text_to_html(&summary),
        })
    }
}
