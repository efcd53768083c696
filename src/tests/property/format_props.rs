//! Property-based tests for the display helpers
//!
//! Tests invariants:
//! - Day buckets follow the rounded-up elapsed day count
//! - Previews never exceed their budget
//! - Escaped text reads back unchanged from paragraph markup
//! - Editor output is blank exactly when the typed text is

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use crate::core::controller::validation::is_blank_content;
use crate::core::editor::TextEditor;
use crate::core::format::{elapsed_days, escape_html, format_relative_in, html_to_lines, preview};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

proptest! {
    #[test]
    fn under_a_day_counts_as_one(ms in 1i64..=DAY_MS) {
        let date = now() - Duration::milliseconds(ms);
        prop_assert_eq!(elapsed_days(date, now()), 1);
        // Future dates are measured the same way
        prop_assert_eq!(elapsed_days(now() + Duration::milliseconds(ms), now()), 1);
    }

    #[test]
    fn relative_bucket_matches_day_count(days in 1i64..30, extra in 1i64..DAY_MS) {
        let date = now() - Duration::days(days - 1) - Duration::milliseconds(extra);
        let label = format_relative_in(date, now(), &Utc);
        let clock = date.format("%H:%M").to_string();

        let expected = match days {
            1 => format!("today at {clock}"),
            2 => format!("yesterday at {clock}"),
            3..=7 => format!("{} days ago", days - 1),
            _ => format!("{} at {clock}", date.format("%d/%m/%Y")),
        };
        prop_assert_eq!(label, expected);
    }

    #[test]
    fn preview_respects_budget(text in "[a-zA-Z ]{0,300}", budget in 0usize..200) {
        let out = preview(&format!("<p>{text}</p>"), budget);
        prop_assert!(out.ends_with("..."));
        prop_assert!(out.chars().count() <= budget + 3);
    }

    #[test]
    fn escaped_text_reads_back(text in "[a-zA-Z0-9<>&\"' ]{0,40}") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));

        let lines = html_to_lines(&format!("<p>{escaped}</p>"));
        if text.trim().is_empty() {
            prop_assert!(lines.is_empty());
        } else {
            prop_assert_eq!(lines, vec![text.trim().to_string()]);
        }
    }

    #[test]
    fn editor_blank_iff_text_blank(lines in proptest::collection::vec("[a-z ]{0,10}", 1..6)) {
        let typed = lines.join("\n");
        let mut editor = TextEditor::new();
        editor.insert_text(&typed);

        prop_assert_eq!(editor.lines().len(), lines.len());
        prop_assert_eq!(is_blank_content(&editor.html()), typed.trim().is_empty());
    }
}
