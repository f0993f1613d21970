//! # Myanmar News Digest
//!
//! Collects yesterday's Myanmar news from several sites and the BBC Burmese
//! RSS feed, keeps relevant articles, summarizes them in Japanese through an
//! LLM, and emails one HTML digest grouped by source.
//!
//! ## Usage
//!
//! ```sh
//! EMAIL_SENDER=me@gmail.com GMAIL_APP_PASSWORD=... \
//!   EMAIL_RECIPIENTS=me@gmail.com myanmar_news_digest
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pass:
//! 1. **Target date**: "yesterday" in Myanmar Standard Time (UTC+06:30)
//! 2. **Collection**: Each source lists candidates for that date; URLs are
//!    claimed once per run across all sources. A failed listing request
//!    exits non-zero
//! 3. **Filtering**: Articles without a keyword in title or body are dropped
//! 4. **Summarization**: Body summary and title translation, with placeholders
//!    on failure
//! 5. **Delivery**: Render the grouped digest and send it; a delivery
//!    failure exits non-zero

use awful_aj::{config, config_dir, template};
use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod dedup;
mod models;
mod outputs;
mod pipeline;
mod relevance;
mod scrapers;
mod utils;

use api::{AskFnWrapper, LlmSummarizer, SUMMARY_TEMPLATE, TITLE_TEMPLATE};
use cli::Cli;
use outputs::html::render;
use outputs::mail::{SmtpMailer, deliver};
use pipeline::Pipeline;
use relevance::KEYWORDS;
use utils::target_date;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("myanmar_news_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let target = target_date(Utc::now());
    info!(%target, "Collecting articles published on target date (UTC+06:30)");

    // ---- Load LLM config & templates ----
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => config_dir()?.join("config.yaml").to_string_lossy().into_owned(),
    };
    let llm_config = config::load_config(&config_path).map_err(|e| e.to_string())?;
    info!(%config_path, "Loaded configuration");
    let summary_template = template::load_template(SUMMARY_TEMPLATE).await?;
    let title_template = template::load_template(TITLE_TEMPLATE).await?;
    info!(summary = SUMMARY_TEMPLATE, title = TITLE_TEMPLATE, "Loaded templates");

    let summarizer = LlmSummarizer::new(
        AskFnWrapper {
            config: &llm_config,
            template: &summary_template,
        },
        AskFnWrapper {
            config: &llm_config,
            template: &title_template,
        },
    );

    // ---- Collect, filter, summarize ----
    let client = scrapers::http_client()?;
    let sources = scrapers::all_sources(&client);
    let (digest, stats) = Pipeline::new(&summarizer, KEYWORDS, target)
        .run(&sources)
        .await?;
    info!(
        articles = digest.len(),
        groups = digest.groups().len(),
        candidates = stats.candidates,
        "Digest assembled"
    );
    debug!(urls = ?digest.articles().map(|a| a.url.as_str()).collect::<Vec<_>>(), "Digest articles");

    // ---- Render & deliver ----
    let rendered = render(&digest, target);

    if args.dry_run {
        info!("Dry run; printing digest instead of sending");
        println!("{}", rendered.html);
    } else {
        let sender = args.sender.as_deref().unwrap_or_default();
        let password = args.password.as_deref().unwrap_or_default();
        let mailer = SmtpMailer::new(&args.smtp_host, sender, password)?;
        deliver(&mailer, &rendered, &args.recipients).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
