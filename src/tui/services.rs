use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::api::{ApiError, HttpNotesApi, NotesApi};
use crate::core::controller::{execute, Command};

use super::events::AppEvent;

/// Handle to the notes service plus the channel outcomes come back on.
///
/// Created once at startup and owned by the app.
pub struct Services {
    pub api: Arc<dyn NotesApi>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Build the HTTP client from config.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, ApiError> {
        log::info!("Initializing notes client for {}", config.api.base_url);
        let api = HttpNotesApi::from_config(&config.api)?;
        Ok(Self::new(Arc::new(api), event_tx))
    }

    pub fn new(api: Arc<dyn NotesApi>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { api, event_tx }
    }

    /// Run each command on its own task; outcomes arrive as
    /// [`AppEvent::Outcome`] in completion order.
    pub fn dispatch(&self, commands: Vec<Command>) {
        for command in commands {
            let api = Arc::clone(&self.api);
            let tx = self.event_tx.clone();
            tokio::spawn(async move {
                let outcome = execute(api.as_ref(), command).await;
                if tx.send(AppEvent::Outcome(outcome)).is_err() {
                    log::debug!("Event loop gone; dropping outcome");
                }
            });
        }
    }
}
