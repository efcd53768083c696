//! Property-based tests for client-side search
//!
//! Tests invariants:
//! - Results are exactly the matching subset, in input order
//! - Case and surrounding whitespace of the term do not matter
//! - Blank terms never parse

use proptest::prelude::*;

use crate::core::models::{Campaign, Note};
use crate::core::search::{search_campaigns, search_notes, SearchTerm};

// ============================================================================
// Strategies
// ============================================================================

fn arb_word() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,8}"
}

fn arb_campaign() -> impl Strategy<Value = Campaign> {
    (
        any::<i64>(),
        "[a-zA-Z ]{1,24}",
        proptest::option::of("[a-zA-Z ]{0,40}"),
    )
        .prop_map(|(id, name, description)| Campaign {
            id,
            name,
            description,
            created_at: None,
        })
}

fn arb_note() -> impl Strategy<Value = Note> {
    (
        any::<i64>(),
        proptest::option::of("[a-zA-Z ]{0,24}"),
        "[a-zA-Z ]{0,40}",
    )
        .prop_map(|(id, title, text)| Note {
            id,
            title,
            content: format!("<p>{text}</p>"),
            created_at: None,
            campaign_name: Some("Dragon Heist".to_string()),
        })
}

/// True if `found` appears in `all` in the same relative order.
fn is_ordered_subset<T: PartialEq>(found: &[T], all: &[T]) -> bool {
    let mut rest = all.iter();
    found.iter().all(|f| rest.any(|a| a == f))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn campaign_results_are_exact_subset(
        campaigns in proptest::collection::vec(arb_campaign(), 0..20),
        word in arb_word(),
    ) {
        let Some(term) = SearchTerm::parse(&word) else {
            return Err(TestCaseError::fail("non-blank word must parse"));
        };
        let found = search_campaigns(&campaigns, &term);

        prop_assert!(is_ordered_subset(&found, &campaigns));
        for c in &campaigns {
            prop_assert_eq!(term.matches_campaign(c), found.contains(c));
        }
    }

    #[test]
    fn note_results_are_exact_subset(
        notes in proptest::collection::vec(arb_note(), 0..20),
        word in arb_word(),
    ) {
        let Some(term) = SearchTerm::parse(&word) else {
            return Err(TestCaseError::fail("non-blank word must parse"));
        };
        let found = search_notes(&notes, &term);

        prop_assert!(is_ordered_subset(&found, &notes));
        for n in &notes {
            prop_assert_eq!(term.matches_note(n), found.contains(n));
        }
    }

    #[test]
    fn case_and_padding_do_not_matter(
        campaigns in proptest::collection::vec(arb_campaign(), 0..20),
        word in arb_word(),
        pad in "[ \t]{0,3}",
    ) {
        let lower = SearchTerm::parse(&word.to_lowercase());
        let upper = SearchTerm::parse(&format!("{pad}{}{pad}", word.to_uppercase()));
        let (Some(lower), Some(upper)) = (lower, upper) else {
            return Err(TestCaseError::fail("non-blank word must parse"));
        };

        prop_assert_eq!(
            search_campaigns(&campaigns, &lower),
            search_campaigns(&campaigns, &upper)
        );
    }

    #[test]
    fn term_found_in_name_always_matches(
        prefix in "[a-z ]{0,10}",
        word in arb_word(),
        suffix in "[a-z ]{0,10}",
    ) {
        let campaign = Campaign {
            id: 1,
            name: format!("{prefix}{word}{suffix}"),
            description: None,
            created_at: None,
        };
        let Some(term) = SearchTerm::parse(&word.to_uppercase()) else {
            return Err(TestCaseError::fail("non-blank word must parse"));
        };
        prop_assert!(term.matches_campaign(&campaign));
    }

    #[test]
    fn blank_terms_never_parse(blank in "[ \t\n]{0,10}") {
        prop_assert!(SearchTerm::parse(&blank).is_none());
    }
}
