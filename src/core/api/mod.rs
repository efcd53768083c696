//! Notes service access.
//!
//! [`NotesApi`] is the seam between the controller and the network; the
//! HTTP implementation lives in [`client`].

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::core::models::{Campaign, NewCampaign, NewNote, Note, NotesPage};

pub use client::HttpNotesApi;
pub use error::{ApiError, Result};

/// Operations offered by the notes service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Check that the service answers. Any failure maps to [`ApiError::Connection`].
    async fn check_connection(&self) -> Result<()>;

    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;

    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<()>;

    /// Notes of one campaign, addressed by campaign name.
    async fn list_notes(&self, campaign_name: &str) -> Result<NotesPage>;

    async fn create_note(&self, note: &NewNote) -> Result<()>;

    /// Every note across campaigns, in backend order.
    async fn list_all_notes(&self) -> Result<Vec<Note>>;
}
