//! Requests issued by the controller and the results fed back to it.
//!
//! The controller never awaits. It emits [`Command`]s; whoever owns the
//! runtime runs them through [`execute`] and hands the [`Outcome`] back to
//! [`Controller::apply`](super::Controller::apply). Sequenced commands carry
//! the number issued for their slot so late answers can be recognised.

use crate::core::api::{ApiError, NotesApi};
use crate::core::models::{Campaign, CampaignId, NewCampaign, NewNote, Note, NotesPage};

/// One call against the notes service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CheckConnection,
    LoadCampaigns {
        seq: u64,
    },
    LoadNotes {
        seq: u64,
        campaign_id: CampaignId,
        campaign_name: String,
    },
    CreateCampaign(NewCampaign),
    CreateNote {
        campaign_id: CampaignId,
        note: NewNote,
    },
    SearchNotes {
        seq: u64,
        term: String,
    },
}

/// Result of a [`Command`], tagged with whatever the controller needs to
/// route it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Connection(Result<(), ApiError>),
    Campaigns {
        seq: u64,
        result: Result<Vec<Campaign>, ApiError>,
    },
    Notes {
        seq: u64,
        campaign_id: CampaignId,
        result: Result<NotesPage, ApiError>,
    },
    CampaignCreated(Result<(), ApiError>),
    NoteCreated {
        campaign_id: CampaignId,
        campaign_name: String,
        result: Result<(), ApiError>,
    },
    SearchNotes {
        seq: u64,
        term: String,
        result: Result<Vec<Note>, ApiError>,
    },
}

/// Run one command against the service.
pub async fn execute(api: &dyn NotesApi, command: Command) -> Outcome {
    log::debug!("Executing {command:?}");
    match command {
        Command::CheckConnection => Outcome::Connection(api.check_connection().await),
        Command::LoadCampaigns { seq } => Outcome::Campaigns {
            seq,
            result: api.list_campaigns().await,
        },
        Command::LoadNotes {
            seq,
            campaign_id,
            campaign_name,
        } => Outcome::Notes {
            seq,
            campaign_id,
            result: api.list_notes(&campaign_name).await,
        },
        Command::CreateCampaign(campaign) => {
            Outcome::CampaignCreated(api.create_campaign(&campaign).await)
        }
        Command::CreateNote { campaign_id, note } => {
            let result = api.create_note(&note).await;
            Outcome::NoteCreated {
                campaign_id,
                campaign_name: note.campaign_name,
                result,
            }
        }
        Command::SearchNotes { seq, term } => Outcome::SearchNotes {
            seq,
            result: api.list_all_notes().await,
            term,
        },
    }
}
