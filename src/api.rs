//! LLM interaction for title translation and article summarization.
//!
//! This module wraps an OpenAI-compatible LLM API behind two layers:
//! - [`AskAsync`]: Core trait defining a single async LLM request
//! - [`Summarizer`]: What the pipeline sees; never fails, substitutes a
//!   placeholder string instead
//!
//! # Architecture
//!
//! - [`AskFnWrapper`]: Adapts `awful_aj::api::ask` with a given chat template
//! - [`LlmSummarizer`]: Combines one client per task (summary, title) into a
//!   [`Summarizer`]
//!
//! There is no retry. A failed call yields the placeholder and the article
//! stays in the digest.

use crate::utils::{clean_text, truncate_chars, truncate_for_log};
use awful_aj::api::ask;
use awful_aj::{config::AwfulJadeConfig, template::ChatTemplate};
use std::error::Error;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Maximum number of characters sent to the model per request.
pub const MAX_INPUT_CHARS: usize = 2000;

/// Substituted for a summary the model could not produce.
pub const SUMMARY_FAILED: &str = "（翻訳・要約に失敗しました）";

/// Substituted for a title the model could not translate.
pub const TITLE_FAILED: &str = "（タイトル翻訳に失敗しました）";

/// Chat template used for body summarization.
pub const SUMMARY_TEMPLATE: &str = "myanmar_digest_summary";

/// Chat template used for title translation.
pub const TITLE_TEMPLATE: &str = "myanmar_digest_title";

/// Trait for async LLM interaction.
///
/// Implementors send text to an LLM and receive a response. This
/// abstraction allows different backends, or fakes in tests.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send text to the LLM and receive a response.
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>>;
}

/// Wrapper around `awful_aj::api::ask` that implements [`AskAsync`].
///
/// # Lifetime Parameters
///
/// * `'a` - The lifetime of the references to config and template
pub struct AskFnWrapper<'a> {
    /// LLM configuration (API key, endpoint, model settings).
    pub config: &'a AwfulJadeConfig,
    /// Chat template defining the system prompt for this task.
    pub template: &'a ChatTemplate,
}

impl fmt::Debug for AskFnWrapper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The config carries the API key.
        f.debug_struct("AskFnWrapper").finish_non_exhaustive()
    }
}

impl<'a> AskAsync for AskFnWrapper<'a> {
    type Response = String;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = ask(self.config, text.to_string(), self.template, None, None).await;
        let dt = t0.elapsed();

        match &res {
            Ok(_) => debug!(elapsed_ms = dt.as_millis() as u128, "API call succeeded"),
            Err(e) => warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "API call failed"),
        }
        res
    }
}

/// What the pipeline needs from the language model.
///
/// Both methods always return text: on failure they return
/// [`SUMMARY_FAILED`] or [`TITLE_FAILED`].
pub trait Summarizer {
    /// Summarize and translate an article body.
    async fn summarize(&self, body: &str) -> String;

    /// Translate an article headline.
    async fn translate_title(&self, title: &str) -> String;
}

/// [`Summarizer`] backed by one [`AskAsync`] client per task.
#[derive(Debug)]
pub struct LlmSummarizer<S, T> {
    summary_client: S,
    title_client: T,
}

impl<S, T> LlmSummarizer<S, T>
where
    S: AskAsync<Response = String>,
    T: AskAsync<Response = String>,
{
    pub fn new(summary_client: S, title_client: T) -> Self {
        Self {
            summary_client,
            title_client,
        }
    }
}

/// Send a bounded prefix of `text` and fall back to `placeholder`.
async fn ask_or_placeholder<C>(client: &C, text: &str, placeholder: &str) -> String
where
    C: AskAsync<Response = String>,
{
    if text.trim().is_empty() {
        warn!("Input text is empty; skipping model call");
        return placeholder.to_string();
    }

    let input = truncate_chars(text, MAX_INPUT_CHARS);
    match client.ask(input).await {
        Ok(resp) => {
            let cleaned = clean_text(resp.trim());
            if cleaned.trim().is_empty() {
                warn!("Model returned an empty response");
                placeholder.to_string()
            } else {
                debug!(response_preview = %truncate_for_log(&cleaned, 120), "Model responded");
                cleaned.trim().to_string()
            }
        }
        Err(e) => {
            warn!(error = %e, "Model call failed; using placeholder");
            placeholder.to_string()
        }
    }
}

impl<S, T> Summarizer for LlmSummarizer<S, T>
where
    S: AskAsync<Response = String>,
    T: AskAsync<Response = String>,
{
    #[instrument(level = "info", skip_all, fields(chars = body.chars().count()))]
    async fn summarize(&self, body: &str) -> String {
        let t0 = Instant::now();
        let out = ask_or_placeholder(&self.summary_client, body, SUMMARY_FAILED).await;
        info!(elapsed_ms = t0.elapsed().as_millis() as u128, "Summarized article body");
        out
    }

    #[instrument(level = "info", skip_all)]
    async fn translate_title(&self, title: &str) -> String {
        ask_or_placeholder(&self.title_client, title, TITLE_FAILED).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every prompt and answers with a fixed result.
    struct FakeAsk {
        reply: Result<String, String>,
        seen: RefCell<Vec<String>>,
    }

    impl FakeAsk {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: RefCell::new(vec![]),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err("503 Service Unavailable".to_string()),
                seen: RefCell::new(vec![]),
            }
        }
    }

    impl AskAsync for FakeAsk {
        type Response = String;

        async fn ask(&self, text: &str) -> Result<String, Box<dyn Error>> {
            self.seen.borrow_mut().push(text.to_string());
            self.reply.clone().map_err(|e| e.into())
        }
    }

    #[tokio::test]
    async fn test_summarize_passes_response_through() {
        let s = LlmSummarizer::new(FakeAsk::ok("  国軍が声明を発表した。\n"), FakeAsk::ok("x"));
        assert_eq!(s.summarize("The junta issued a statement.").await, "国軍が声明を発表した。");
    }

    #[tokio::test]
    async fn test_summarize_failure_yields_placeholder() {
        let s = LlmSummarizer::new(FakeAsk::failing(), FakeAsk::ok("x"));
        assert_eq!(s.summarize("Myanmar").await, SUMMARY_FAILED);
    }

    #[tokio::test]
    async fn test_title_failure_yields_placeholder() {
        let s = LlmSummarizer::new(FakeAsk::ok("x"), FakeAsk::failing());
        assert_eq!(s.translate_title("Myanmar update").await, TITLE_FAILED);
    }

    #[tokio::test]
    async fn test_empty_input_skips_model_call() {
        let summary = FakeAsk::ok("should not be used");
        let s = LlmSummarizer::new(summary, FakeAsk::ok("x"));
        assert_eq!(s.summarize("   \n ").await, SUMMARY_FAILED);
        assert!(s.summary_client.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_input_is_truncated() {
        let s = LlmSummarizer::new(FakeAsk::ok("要約"), FakeAsk::ok("x"));
        let body = "မ".repeat(MAX_INPUT_CHARS + 500);
        s.summarize(&body).await;
        let seen = s.summary_client.seen.borrow();
        assert_eq!(seen[0].chars().count(), MAX_INPUT_CHARS);
    }

    #[tokio::test]
    async fn test_blank_response_yields_placeholder() {
        let s = LlmSummarizer::new(FakeAsk::ok(" \u{200b} "), FakeAsk::ok("x"));
        assert_eq!(s.summarize("Myanmar").await, SUMMARY_FAILED);
    }
}
