//! Render a [`Digest`] into an email subject, HTML body and plain-text fallback.
//!
//! # Layout
//!
//! ```text
//! <h2>Myanmar News Digest</h2>
//! <h2>ミャンマー関連ニュース（日本語要約）</h2>
//! <h3>{source}</h3>
//!   <h4>{translated title}</h4>
//!   <p><a href='{url}'>{url}</a></p>
//!   <p>{summary}</p><hr>
//! ```

use crate::models::Digest;
use crate::utils::{clean_text, escape_html};
use chrono::NaiveDate;
use std::fmt::Write;
use tracing::{info, instrument};

/// Sender display name, also used as the digest heading.
pub const DIGEST_NAME: &str = "Myanmar News Digest";

/// Shown by mail clients that cannot display HTML.
pub const PLAIN_TEXT_NOTICE: &str = "HTMLメールを開ける環境でご確認ください。";

const NO_ARTICLES: &str = "対象日の関連ニュースはありませんでした。";

/// A digest ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDigest {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[instrument(level = "info", skip(digest), fields(articles = digest.len()))]
pub fn render(digest: &Digest, target: NaiveDate) -> RenderedDigest {
    let subject = format!("Daily {DIGEST_NAME} ({target})");

    let mut html = String::new();
    let mut text = String::new();

    html.push_str("<html><body>");
    writeln!(html, "<h2>{DIGEST_NAME}</h2>").unwrap();
    writeln!(html, "<h2>ミャンマー関連ニュース（日本語要約）</h2>").unwrap();
    writeln!(html, "<p>{target}</p>").unwrap();

    writeln!(text, "{PLAIN_TEXT_NOTICE}\n").unwrap();
    writeln!(text, "{DIGEST_NAME} ({target})").unwrap();

    if digest.is_empty() {
        writeln!(html, "<p>{NO_ARTICLES}</p>").unwrap();
        writeln!(text, "\n{NO_ARTICLES}").unwrap();
    }

    for (source, articles) in digest.groups() {
        let source = clean_text(source);
        writeln!(html, "<h3>{}</h3>", escape_html(&source)).unwrap();
        writeln!(text, "\n== {source} ==").unwrap();

        for article in articles {
            let title = clean_text(&article.translated_title);
            let url = escape_html(&article.url);
            writeln!(html, "<h4>{}</h4>", escape_html(&title)).unwrap();
            writeln!(html, "<p><a href='{url}'>{url}</a></p>").unwrap();
            writeln!(html, "<p>{}</p><hr>", article.summary_html).unwrap();

            writeln!(text, "- {title}\n  {}", article.url).unwrap();
        }
    }
    html.push_str("</body></html>");

    info!(subject = %subject, html_bytes = html.len(), "Rendered digest");
    RenderedDigest {
        subject,
        html,
        text,
    }
}
