//! Campaign and note records as exchanged with the notes service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::format::parse_timestamp;

pub type CampaignId = i64;
pub type NoteId = i64;

// ============================================================================
// Campaign
// ============================================================================

/// A campaign as returned by `GET /campaigns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Campaign {
    /// Parsed creation time, if the backend sent a readable one.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Description with blank values treated as absent.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Body of `POST /campaigns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
}

// ============================================================================
// Note
// ============================================================================

/// A session note. Notes reference their campaign by name, not id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: Option<String>,
    /// HTML produced by the rich-text editor.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub campaign_name: Option<String>,
}

impl Note {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Title with blank values treated as absent.
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Body of `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub campaign_name: String,
    pub title: String,
    pub content: String,
}

/// Response of `GET /campaigns/{name}/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NotesPage {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub campaign_name: Option<String>,
}

/// Sort notes newest first. Notes without a readable timestamp go last,
/// keeping their relative order.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created().cmp(&a.created()));
}
