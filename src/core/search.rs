//! Client-side search over already-fetched campaigns and notes.
//!
//! Plain case-insensitive substring matching, no ranking: results keep the
//! order of the input collection. Note content is matched as raw markup,
//! tags included, so a term like `strong` matches any note with bold text.

use super::models::{Campaign, Note};

/// Normalized search term. Construction fails for blank input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            needle: raw.to_lowercase(),
        })
    }

    /// The trimmed term as the user typed it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }

    pub fn matches_campaign(&self, campaign: &Campaign) -> bool {
        self.found_in(&campaign.name)
            || campaign
                .description
                .as_deref()
                .is_some_and(|d| self.found_in(d))
    }

    pub fn matches_note(&self, note: &Note) -> bool {
        note.title.as_deref().is_some_and(|t| self.found_in(t)) || self.found_in(&note.content)
    }
}

pub fn search_campaigns(campaigns: &[Campaign], term: &SearchTerm) -> Vec<Campaign> {
    campaigns
        .iter()
        .filter(|c| term.matches_campaign(c))
        .cloned()
        .collect()
}

pub fn search_notes(notes: &[Note], term: &SearchTerm) -> Vec<Note> {
    notes.iter().filter(|n| term.matches_note(n)).cloned().collect()
}
