//! Notes Service HTTP Client
//!
//! reqwest implementation of [`NotesApi`] against the REST contract:
//!
//! | Method | Path                          | Body / Response                          |
//! |--------|-------------------------------|------------------------------------------|
//! | GET    | `/campaigns`                  | `Campaign[]`                             |
//! | POST   | `/campaigns`                  | `{name, description}` → 2xx or `{error}` |
//! | GET    | `/campaigns/{name}/notes`     | `{notes, total, campaign_name}`          |
//! | POST   | `/notes`                      | `{campaign_name, title, content}` → 2xx or `{message}` |
//! | GET    | `/notes`                      | `{notes}` or bare `Note[]`               |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::core::models::{Campaign, NewCampaign, NewNote, Note, NotesPage};

use super::error::{ApiError, Result};
use super::NotesApi;

const CREATE_CAMPAIGN_FAILED: &str = "Failed to create campaign";
const CREATE_NOTE_FAILED: &str = "Failed to save note";

/// Error payload returned by the backend on rejected writes.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// `GET /notes` answers either `{notes: [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NoteCollection {
    Wrapped { notes: Vec<Note> },
    Bare(Vec<Note>),
}

impl From<NoteCollection> for Vec<Note> {
    fn from(collection: NoteCollection) -> Self {
        match collection {
            NoteCollection::Wrapped { notes } | NoteCollection::Bare(notes) => notes,
        }
    }
}

/// HTTP client for the notes service.
#[derive(Clone)]
pub struct HttpNotesApi {
    base_url: String,
    http: Client,
}

impl HttpNotesApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.request_timeout())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a rejected write into `ServerRejection`. The message comes from
    /// the preferred payload field, then the other one, then `generic`.
    async fn rejection(response: Response, prefer_error_field: bool, generic: &str) -> ApiError {
        let status = response.status();
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let message = if prefer_error_field {
            body.error.or(body.message)
        } else {
            body.message.or(body.error)
        };

        log::warn!("Write rejected with HTTP {status}: {message:?}");
        ApiError::ServerRejection {
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| generic.to_string()),
        }
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    #[tracing::instrument(skip(self))]
    async fn check_connection(&self) -> Result<()> {
        let response = self
            .http
            .get(self.url("/campaigns"))
            .send()
            .await
            .map_err(|e| ApiError::Connection {
                reason: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Connection {
                reason: format!("HTTP {}", response.status().as_u16()),
            })
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let response = self.http.get(self.url("/campaigns")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Fetch {
                status: response.status().as_u16(),
            });
        }

        let campaigns: Vec<Campaign> = response.json().await?;
        log::debug!("Fetched {} campaigns", campaigns.len());
        Ok(campaigns)
    }

    #[tracing::instrument(skip(self), fields(name = %campaign.name))]
    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<()> {
        let response = self
            .http
            .post(self.url("/campaigns"))
            .json(campaign)
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("Created campaign '{}'", campaign.name);
            Ok(())
        } else {
            Err(Self::rejection(response, true, CREATE_CAMPAIGN_FAILED).await)
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_notes(&self, campaign_name: &str) -> Result<NotesPage> {
        let path = format!("/campaigns/{}/notes", urlencoding::encode(campaign_name));
        let response = self.http.get(self.url(&path)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Fetch {
                status: response.status().as_u16(),
            });
        }

        let page: NotesPage = response.json().await?;
        log::debug!("Fetched {} notes for '{campaign_name}'", page.notes.len());
        Ok(page)
    }

    #[tracing::instrument(skip(self), fields(campaign = %note.campaign_name))]
    async fn create_note(&self, note: &NewNote) -> Result<()> {
        let response = self
            .http
            .post(self.url("/notes"))
            .json(note)
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("Created note '{}' in '{}'", note.title, note.campaign_name);
            Ok(())
        } else {
            Err(Self::rejection(response, false, CREATE_NOTE_FAILED).await)
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_all_notes(&self) -> Result<Vec<Note>> {
        let response = self.http.get(self.url("/notes")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Fetch {
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        let collection: NoteCollection = serde_json::from_slice(&body)?;
        Ok(collection.into())
    }
}
