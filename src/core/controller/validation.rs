//! Client-side checks run before any request is issued.

use thiserror::Error;

use crate::core::editor::TextEditor;
use crate::core::format::{strip_html, EMPTY_PARAGRAPH};
use crate::core::models::{Campaign, CampaignId, NewCampaign, NewNote};
use crate::core::state::{CampaignForm, NoteForm};

/// Input rejected before reaching the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Campaign name is required")]
    MissingCampaignName,

    #[error("You must select a campaign!")]
    NoCampaignSelected,

    #[error("The selected campaign was not found! Reloading campaigns, try again.")]
    CampaignNotFound,

    #[error("Note title is required")]
    MissingTitle,

    #[error("Note content is required")]
    MissingContent,

    #[error("Type a term to search")]
    EmptySearchTerm,

    #[error("No campaigns available. Create a campaign first!")]
    NoCampaigns,
}

/// True for editor output with nothing in it: blank markup, the empty
/// paragraph, or markup whose text projection is blank.
pub fn is_blank_content(html: &str) -> bool {
    html.trim().is_empty() || html == EMPTY_PARAGRAPH || strip_html(html).trim().is_empty()
}

pub fn validate_campaign(form: &CampaignForm) -> Result<NewCampaign, ValidationError> {
    let name = form.name.trimmed();
    if name.is_empty() {
        return Err(ValidationError::MissingCampaignName);
    }

    Ok(NewCampaign {
        name,
        description: form.description.text().trim().to_string(),
    })
}

/// Validate the note form in the order the user sees the fields:
/// campaign, title, content.
pub fn validate_note(
    form: &NoteForm,
    editor: &TextEditor,
    campaigns: &[Campaign],
) -> Result<(CampaignId, NewNote), ValidationError> {
    let campaign_id = form.campaign_id.ok_or(ValidationError::NoCampaignSelected)?;
    let campaign = campaigns
        .iter()
        .find(|c| c.id == campaign_id)
        .ok_or(ValidationError::CampaignNotFound)?;

    let title = form.title.trimmed();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    let content = editor.html();
    if is_blank_content(&content) {
        return Err(ValidationError::MissingContent);
    }

    Ok((
        campaign_id,
        NewNote {
            campaign_name: campaign.name.clone(),
            title,
            content,
        },
    ))
}
