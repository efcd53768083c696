//! Display helpers shared by the view projection and the note editor.
//!
//! - relative timestamps ("today at 20:15", "3 days ago", ...)
//! - HTML escaping for text that ends up inside note markup
//! - HTML stripping for previews and the content-emptiness check

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Character budget for note previews in search results.
pub const DEFAULT_PREVIEW_CHARS: usize = 150;

/// Markup produced by an editor with no content.
pub const EMPTY_PARAGRAPH: &str = "<p><br></p>";

/// Label for missing or unparseable timestamps.
pub const INVALID_DATE: &str = "invalid date";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|blockquote|pre)\s*>")
        .expect("block break pattern is valid")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern is valid")
});

// ============================================================================
// Timestamps
// ============================================================================

/// Parse a backend timestamp, reading values without an offset as local
/// time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(raw, &Local)
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, RFC 2822 (what Flask's `jsonify` emits for datetimes)
/// and naive ISO-8601 without an offset, which is read as wall-clock time
/// in `tz`. A naive time that falls in a DST gap does not exist in `tz`
/// and yields `None`; one in a DST overlap takes the earlier instant.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whole days between two instants, rounded up.
///
/// Anything under 24 hours counts as one day, 24h..48h as two, and so on.
/// Only identical instants yield zero.
pub fn elapsed_days(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (now - date).num_milliseconds().abs();
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Format `date` relative to `now`, rendering clock times in `tz`.
pub fn format_relative_in<Tz>(date: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let local = date.with_timezone(tz);
    let clock = local.format("%H:%M");

    match elapsed_days(date, now) {
        1 => format!("today at {clock}"),
        2 => format!("yesterday at {clock}"),
        days if days <= 7 => format!("{} days ago", days - 1),
        _ => format!("{} at {clock}", local.format("%d/%m/%Y")),
    }
}

/// Format a raw backend timestamp relative to `now`. Naive timestamps are
/// wall-clock times in `tz`, and clock times render in `tz`.
pub fn format_timestamp_at<Tz>(raw: Option<&str>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match raw.and_then(|raw| parse_timestamp_in(raw, tz)) {
        Some(date) => format_relative_in(date, now, tz),
        None => INVALID_DATE.to_string(),
    }
}

// ============================================================================
// HTML
// ============================================================================

/// Escape text for interpolation into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Decode the character references that show up in editor output.
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or(body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Render markup to its text lines: block boundaries become line breaks,
/// every other tag is dropped, entities are decoded.
///
/// Blank lines are removed.
pub fn html_to_lines(html: &str) -> Vec<String> {
    let with_breaks = BLOCK_BREAK.replace_all(html, "\n");
    let without_tags = TAG.replace_all(&with_breaks, "");
    decode_entities(&without_tags)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Text content of markup: tags dropped, entities decoded, whitespace
/// kept. Adjacent blocks run together, so `<p>a</p><p>b</p>` reads `ab`.
pub fn strip_html(html: &str) -> String {
    decode_entities(&TAG.replace_all(html, ""))
}

/// Preview of note markup: the first `budget` characters of its text
/// content followed by `...`, whether or not anything was cut. Paragraphs
/// are not separated; use [`html_to_lines`] for a line-aware rendering.
pub fn preview(html: &str, budget: usize) -> String {
    let mut text: String = strip_html(html).chars().take(budget).collect();
    text.push_str("...");
    text
}
