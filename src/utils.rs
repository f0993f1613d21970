//! Utility functions for date handling and text cleanup.
//!
//! This module provides helper functions used throughout the application:
//! - Target-date computation in Myanmar Standard Time (UTC+06:30)
//! - Character-safe truncation for prompts and log previews
//! - Control-character cleanup and HTML escaping for the rendered digest

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use tracing::{debug, instrument};

/// Offset of Myanmar Standard Time from UTC, in seconds.
const MMT_OFFSET_SECS: i32 = 6 * 3600 + 30 * 60;

/// Myanmar Standard Time as a fixed offset.
pub fn mmt() -> FixedOffset {
    FixedOffset::east_opt(MMT_OFFSET_SECS).expect("UTC+06:30 is a valid offset")
}

/// Compute the date whose articles this run collects.
///
/// `now` is converted to UTC+06:30 and one calendar day is subtracted.
///
/// # Examples
///
/// ```ignore
/// // 2025-08-02T18:00Z is already 2025-08-03 00:30 in Yangon.
/// let now = Utc.with_ymd_and_hms(2025, 8, 2, 18, 0, 0).unwrap();
/// assert_eq!(target_date(now), NaiveDate::from_ymd_opt(2025, 8, 2).unwrap());
/// ```
#[instrument(level = "debug")]
pub fn target_date(now: DateTime<Utc>) -> NaiveDate {
    let local = now.with_timezone(&mmt()).date_naive();
    let target = local
        .checked_sub_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN);
    debug!(%local, %target, "Computed target date");
    target
}

/// Calendar date of an offset-aware timestamp in UTC+06:30.
pub fn mmt_date<Tz: chrono::TimeZone>(ts: &DateTime<Tz>) -> NaiveDate {
    ts.with_timezone(&mmt()).date_naive()
}

/// Keep at most the first `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = truncate_chars(s, max);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", head, s.len() - head.len())
    }
}

/// Replace control and invisible format characters with spaces.
///
/// Non-breaking spaces become plain spaces. Newlines are kept so that
/// paragraph breaks survive into the rendered summary.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == '\n' {
                c
            } else if c.is_control() || c == '\u{a0}' || is_format_char(c) {
                ' '
            } else {
                c
            }
        })
        .collect()
}

// Unicode format (Cf) and private-use (Co) characters. Together with
// `char::is_control` (Cc) this covers category C apart from unassigned
// code points.
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{890}'..='\u{891}'
            | '\u{8e2}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{110bd}'
            | '\u{110cd}'
            | '\u{13430}'..='\u{1343f}'
            | '\u{1bca0}'..='\u{1bca3}'
            | '\u{1d173}'..='\u{1d17a}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
            | '\u{f0000}'..='\u{ffffd}'
            | '\u{100000}'..='\u{10fffd}'
    )
}

/// Escape the five HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Clean, escape, and turn newlines into `<br>`.
pub fn text_to_html(text: &str) -> String {
    escape_html(clean_text(text).trim())
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("<br>")
}
