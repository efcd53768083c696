//! Controller Flow Tests
//!
//! Drives the controller against `MockNotesApi` the way the TUI does:
//! intents produce commands, commands run against the service, outcomes
//! are folded back in. Expectations with `times(0)` prove that rejected
//! input never reaches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::api::{ApiError, MockNotesApi};
use crate::core::controller::{execute, Command, Controller, Field, Outcome, TextField};
use crate::core::format::EMPTY_PARAGRAPH;
use crate::core::state::{LoadStatus, NoticeLevel, Pane, Screen};
use crate::tests::common::*;

fn notice(controller: &Controller) -> Option<(&str, NoticeLevel)> {
    controller
        .state()
        .notice()
        .map(|n| (n.message.as_str(), n.level))
}

fn type_into(controller: &mut Controller, field: Field, text: &str) {
    if let Some(input) = controller.input_mut(field) {
        input.insert_str(text);
    }
}

fn write_into(controller: &mut Controller, field: TextField, text: &str) {
    if let Some(editor) = controller.editor_mut(field) {
        editor.insert_text(text);
    }
}

// =============================================================================
// Startup & connectivity
// =============================================================================

#[tokio::test]
async fn test_startup_loads_campaigns_after_connection_check() {
    let api = online_api(default_campaigns());
    let controller = started(&api).await;

    let state = controller.state();
    assert!(state.is_connected());
    assert_eq!(state.campaigns_status(), &LoadStatus::Ready);
    assert_eq!(state.campaigns().len(), 2);
    assert_eq!(state.screen(), &Screen::Welcome);
}

#[tokio::test]
async fn test_failed_connection_check_skips_campaign_load() {
    let mut api = MockNotesApi::new();
    api.expect_check_connection().times(1).returning(|| {
        Err(ApiError::Connection {
            reason: "connection refused".to_string(),
        })
    });
    api.expect_list_campaigns().times(0);

    let controller = started(&api).await;

    assert!(!controller.state().is_connected());
    assert_eq!(controller.state().campaigns_status(), &LoadStatus::Idle);
    assert_eq!(
        notice(&controller),
        Some(("Could not connect to the server", NoticeLevel::Error))
    );
}

#[tokio::test]
async fn test_reconnect_loads_campaigns_once() {
    let mut api = MockNotesApi::new();
    let checks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&checks);
    api.expect_check_connection().times(3).returning(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ApiError::Connection {
                reason: "timeout".to_string(),
            })
        } else {
            Ok(())
        }
    });
    api.expect_list_campaigns()
        .times(1)
        .returning(|| Ok(default_campaigns()));

    let mut controller = started(&api).await;
    assert!(!controller.state().is_connected());

    // Back online: the pending campaign list is fetched
    let commands = controller.check_connection();
    controller.drive(&api, commands).await;
    assert!(controller.state().is_connected());
    assert_eq!(controller.state().campaigns().len(), 2);

    // Still online: nothing to refetch
    let commands = controller.check_connection();
    controller.drive(&api, commands).await;
    assert_eq!(checks.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_campaign_list_failure_is_reported() {
    let mut api = MockNotesApi::new();
    api.expect_check_connection().returning(|| Ok(()));
    api.expect_list_campaigns()
        .times(1)
        .returning(|| Err(ApiError::Fetch { status: 500 }));

    let controller = started(&api).await;

    assert_eq!(
        controller.state().campaigns_status(),
        &LoadStatus::Failed("Failed to load campaigns".to_string())
    );
    assert!(controller.state().campaigns().is_empty());
}

// =============================================================================
// Campaign detail
// =============================================================================

#[tokio::test]
async fn test_select_campaign_loads_notes_newest_first() {
    let mut api = online_api(default_campaigns());
    api.expect_list_notes()
        .withf(|name| name.contains("Dragon Heist"))
        .times(1)
        .returning(|_| {
            Ok(page(vec![
                note(10, "Dragon Heist", "Session 1", "<p>Arrival</p>", 14),
                note(12, "Dragon Heist", "Session 3", "<p>Ambush</p>", 1),
                note(11, "Dragon Heist", "Session 2", "<p>Tavern</p>", 7),
            ]))
        });

    let mut controller = started(&api).await;
    let commands = controller.select_campaign(1);
    assert!(controller.state().notes_status() == &LoadStatus::Loading);
    controller.drive(&api, commands).await;

    let state = controller.state();
    assert_eq!(state.screen(), &Screen::CampaignDetail(1));
    assert_eq!(state.current_campaign_id(), Some(1));
    let ids: Vec<i64> = state.notes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![12, 11, 10]);
}

#[tokio::test]
async fn test_select_unknown_campaign_stays_put() {
    let mut api = online_api(default_campaigns());
    api.expect_list_notes().times(0);

    let mut controller = started(&api).await;
    let commands = controller.select_campaign(99);

    assert!(commands.is_empty());
    assert_eq!(controller.state().screen(), &Screen::Welcome);
    assert_eq!(
        notice(&controller),
        Some(("Campaign not found", NoticeLevel::Error))
    );
}

#[tokio::test]
async fn test_notes_failure_marks_pane() {
    let mut api = online_api(default_campaigns());
    api.expect_list_notes()
        .times(1)
        .returning(|_| Err(ApiError::Network("reset by peer".to_string())));

    let mut controller = started(&api).await;
    let commands = controller.select_campaign(2);
    controller.drive(&api, commands).await;

    assert_eq!(
        controller.state().notes_status(),
        &LoadStatus::Failed("Failed to load notes".to_string())
    );
    assert!(controller.state().notes().is_empty());
}

#[tokio::test]
async fn test_stale_notes_are_discarded() {
    let mut api = online_api(default_campaigns());
    api.expect_list_notes().returning(|name| {
        Ok(page(vec![note(1, name, "Session 1", "<p>x</p>", 2)]))
    });

    let mut controller = started(&api).await;
    let first = controller.select_campaign(1);
    let second = controller.select_campaign(2);

    // Answer the second request first, then the slow first one
    for command in second {
        let follow_up = controller.apply(execute(&api, command).await);
        assert!(follow_up.is_empty());
    }
    for command in first {
        controller.apply(execute(&api, command).await);
    }

    let state = controller.state();
    assert_eq!(state.current_campaign_id(), Some(2));
    assert_eq!(state.notes().len(), 1);
    assert_eq!(state.notes()[0].campaign_name.as_deref(), Some("Curse of Strahd"));
}

#[tokio::test]
async fn test_show_welcome_clears_selection() {
    let mut api = online_api(default_campaigns());
    api.expect_list_notes().returning(|_| Ok(page(Vec::new())));

    let mut controller = started(&api).await;
    let commands = controller.select_campaign(1);
    controller.drive(&api, commands).await;
    controller.show_welcome();

    assert_eq!(controller.state().screen(), &Screen::Welcome);
    assert_eq!(controller.state().current_campaign_id(), None);
}

// =============================================================================
// Campaign form
// =============================================================================

#[tokio::test]
async fn test_blank_campaign_name_never_hits_network() {
    let mut api = online_api(default_campaigns());
    api.expect_create_campaign().times(0);

    let mut controller = started(&api).await;
    controller.open_campaign_form();
    type_into(&mut controller, Field::CampaignName, "   ");

    assert!(controller.submit_campaign_form().is_empty());
    assert_eq!(
        notice(&controller),
        Some(("Campaign name is required", NoticeLevel::Error))
    );
    assert!(controller.state().campaign_form().is_some());
}

#[tokio::test]
async fn test_campaign_form_requires_connection() {
    let mut api = MockNotesApi::new();
    api.expect_check_connection().returning(|| {
        Err(ApiError::Connection {
            reason: "offline".to_string(),
        })
    });
    api.expect_create_campaign().times(0);

    let mut controller = started(&api).await;
    controller.open_campaign_form();
    type_into(&mut controller, Field::CampaignName, "Tomb of Annihilation");

    assert!(controller.submit_campaign_form().is_empty());
    assert_eq!(
        notice(&controller),
        Some(("No connection to the API", NoticeLevel::Error))
    );
}

#[tokio::test]
async fn test_create_campaign_reloads_list() {
    let mut api = MockNotesApi::new();
    api.expect_check_connection().returning(|| Ok(()));
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    api.expect_list_campaigns().times(2).returning(move || {
        let mut campaigns = default_campaigns();
        if counter.fetch_add(1, Ordering::SeqCst) > 0 {
            campaigns.push(campaign(3, "Tomb of Annihilation"));
        }
        Ok(campaigns)
    });
    api.expect_create_campaign()
        .withf(|c| c.name == "Tomb of Annihilation" && c.description == "Jungle crawl\nChult")
        .times(1)
        .returning(|_| Ok(()));

    let mut controller = started(&api).await;
    controller.open_campaign_form();
    type_into(&mut controller, Field::CampaignName, "  Tomb of Annihilation ");
    write_into(&mut controller, TextField::CampaignDescription, "Jungle crawl\nChult\n");

    let commands = controller.submit_campaign_form();
    assert_eq!(
        controller.state().campaign_form().map(|f| f.submit_label()),
        Some("Creating...")
    );
    // A second press while the request is out does nothing
    assert!(controller.submit_campaign_form().is_empty());
    controller.drive(&api, commands).await;

    let state = controller.state();
    assert!(state.campaign_form().is_none());
    let created: Vec<_> = state
        .campaigns()
        .iter()
        .filter(|c| c.name == "Tomb of Annihilation")
        .collect();
    assert_eq!(created.len(), 1);
    assert_eq!(
        notice(&controller),
        Some(("Campaign created!", NoticeLevel::Success))
    );
}

#[tokio::test]
async fn test_rejected_campaign_keeps_form_open() {
    let mut api = online_api(default_campaigns());
    api.expect_create_campaign().times(1).returning(|_| {
        Err(ApiError::ServerRejection {
            message: "Campaign already exists".to_string(),
        })
    });

    let mut controller = started(&api).await;
    controller.open_campaign_form();
    type_into(&mut controller, Field::CampaignName, "Dragon Heist");
    let commands = controller.submit_campaign_form();
    controller.drive(&api, commands).await;

    let form = controller.state().campaign_form();
    assert!(form.is_some_and(|f| !f.submitting));
    assert_eq!(
        notice(&controller),
        Some(("Campaign already exists", NoticeLevel::Error))
    );
}

// =============================================================================
// Note form
// =============================================================================

#[tokio::test]
async fn test_note_form_needs_campaigns() {
    let api = online_api(Vec::new());
    let mut controller = started(&api).await;

    assert!(!controller.open_note_form());
    assert!(controller.state().note_form().is_none());
    assert_eq!(
        notice(&controller),
        Some((
            "No campaigns available. Create a campaign first!",
            NoticeLevel::Error
        ))
    );
}

#[tokio::test]
async fn test_note_validation_order() {
    let mut api = online_api(default_campaigns());
    api.expect_create_note().times(0);

    let mut controller = started(&api).await;
    assert!(controller.open_note_form());

    // Nothing selected on the welcome screen
    controller.submit_note_form();
    assert_eq!(notice(&controller).map(|n| n.0), Some("You must select a campaign!"));

    controller.cycle_note_campaign(true);
    controller.submit_note_form();
    assert_eq!(notice(&controller).map(|n| n.0), Some("Note title is required"));

    type_into(&mut controller, Field::NoteTitle, "Session 4");
    controller.submit_note_form();
    assert_eq!(notice(&controller).map(|n| n.0), Some("Note content is required"));
    assert_eq!(controller.state().editor().html(), EMPTY_PARAGRAPH);
}

#[tokio::test]
async fn test_note_body_editable_only_while_form_open() {
    let api = online_api(default_campaigns());
    let mut controller = started(&api).await;
    assert!(controller.editor_mut(TextField::NoteBody).is_none());
    assert!(controller.editor_mut(TextField::CampaignDescription).is_none());

    controller.open_note_form();
    write_into(&mut controller, TextField::NoteBody, "Line one\nLine two");
    assert_eq!(controller.state().editor().lines(), ["Line one", "Line two"]);

    controller.cancel_note_form();
    assert!(controller.editor_mut(TextField::NoteBody).is_none());
    assert_eq!(controller.state().editor().html(), EMPTY_PARAGRAPH);
}

#[tokio::test]
async fn test_campaign_picker_wraps() {
    let api = online_api(default_campaigns());
    let mut controller = started(&api).await;
    controller.open_note_form();

    let picked = |c: &Controller| c.state().note_form().and_then(|f| f.campaign_id);
    controller.cycle_note_campaign(true);
    assert_eq!(picked(&controller), Some(1));
    controller.cycle_note_campaign(true);
    assert_eq!(picked(&controller), Some(2));
    controller.cycle_note_campaign(true);
    assert_eq!(picked(&controller), None);
    controller.cycle_note_campaign(false);
    assert_eq!(picked(&controller), Some(2));
}

#[tokio::test]
async fn test_create_note_refreshes_current_campaign() {
    let mut api = online_api(default_campaigns());
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    api.expect_list_notes().times(2).returning(move |_| {
        let mut notes = vec![note(1, "Dragon Heist", "Session 1", "<p>Arrival</p>", 3)];
        if counter.fetch_add(1, Ordering::SeqCst) > 0 {
            notes.push(note(2, "Dragon Heist", "Session 2", "<p>Fight &amp; flight</p>", 0));
        }
        Ok(page(notes))
    });
    api.expect_create_note()
        .withf(|n| {
            n.campaign_name == "Dragon Heist"
                && n.title == "Session 2"
                && n.content == "<p>Fight &amp; flight</p>"
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut controller = started(&api).await;
    let commands = controller.select_campaign(1);
    controller.drive(&api, commands).await;

    assert!(controller.open_note_form());
    assert_eq!(
        controller.state().note_form().and_then(|f| f.campaign_id),
        Some(1)
    );
    type_into(&mut controller, Field::NoteTitle, "Session 2");
    write_into(&mut controller, TextField::NoteBody, "Fight & flight");

    let commands = controller.submit_note_form();
    controller.drive(&api, commands).await;

    let state = controller.state();
    assert!(state.note_form().is_none());
    assert_eq!(state.notes().len(), 2);
    assert_eq!(state.notes()[0].id, 2);
    assert_eq!(
        notice(&controller),
        Some(("Note created for campaign \"Dragon Heist\"!", NoticeLevel::Success))
    );
}

#[tokio::test]
async fn test_vanished_campaign_reloads_list() {
    let mut api = MockNotesApi::new();
    api.expect_check_connection().returning(|| Ok(()));
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    api.expect_list_campaigns().returning(move || {
        let campaigns = default_campaigns();
        // Dragon Heist is deleted elsewhere after the first load
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(campaigns)
        } else {
            Ok(campaigns.into_iter().filter(|c| c.id != 1).collect())
        }
    });
    api.expect_list_notes().returning(|_| Ok(page(Vec::new())));
    api.expect_create_note().times(0);

    let mut controller = started(&api).await;
    let commands = controller.select_campaign(1);
    controller.drive(&api, commands).await;
    controller.open_note_form();
    type_into(&mut controller, Field::NoteTitle, "Session 1");
    write_into(&mut controller, TextField::NoteBody, "The party met in a tavern");

    let commands = controller.refresh_campaigns();
    controller.drive(&api, commands).await;

    let commands = controller.submit_note_form();
    assert!(matches!(commands.as_slice(), [Command::LoadCampaigns { .. }]));
    assert_eq!(
        notice(&controller).map(|n| n.0),
        Some("The selected campaign was not found! Reloading campaigns, try again.")
    );
    controller.drive(&api, commands).await;
    assert_eq!(loads.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_escape_closes_note_form_first() {
    let api = online_api(default_campaigns());
    let mut controller = started(&api).await;
    controller.open_campaign_form();
    controller.open_note_form();

    assert!(controller.dismiss_form());
    assert!(controller.state().note_form().is_none());
    assert!(controller.state().campaign_form().is_some());
    assert!(controller.dismiss_form());
    assert!(!controller.dismiss_form());
}

// =============================================================================
// Search
// =============================================================================

fn search_notes() -> Vec<crate::core::models::Note> {
    vec![
        note(10, "Dragon Heist", "The dragon", "<p>A <strong>dragon</strong> appears</p>", 1),
        note(20, "Curse of Strahd", "Village", "<p>Mist everywhere</p>", 2),
        note(21, "Curse of Strahd", "Castle", "<p>Strahd's dragon skull</p>", 3),
    ]
}

#[tokio::test]
async fn test_empty_search_warns() {
    let mut api = online_api(default_campaigns());
    api.expect_list_all_notes().times(0);

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, "   ");

    assert!(controller.submit_search().is_empty());
    assert_eq!(
        notice(&controller),
        Some(("Type a term to search", NoticeLevel::Warning))
    );
    assert_eq!(controller.state().screen(), &Screen::Welcome);
}

#[tokio::test]
async fn test_search_fills_both_panes() {
    let mut api = online_api(default_campaigns());
    api.expect_list_all_notes()
        .times(1)
        .returning(|| Ok(search_notes()));

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, " Dragon ");
    let commands = controller.submit_search();

    // Campaigns are already cached; only notes are fetched
    assert!(matches!(commands.as_slice(), [Command::SearchNotes { .. }]));
    let search = controller.state().search().cloned();
    assert!(matches!(search.as_ref().map(|s| &s.notes), Some(Pane::Loading)));
    assert_eq!(controller.state().screen(), &Screen::SearchResults("Dragon".to_string()));

    controller.drive(&api, commands).await;

    let Some(search) = controller.state().search() else {
        panic!("search results missing");
    };
    match &search.campaigns {
        Pane::Ready(found) => assert_eq!(found.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1]),
        other => panic!("campaign pane not ready: {other:?}"),
    }
    match &search.notes {
        Pane::Ready(found) => {
            assert_eq!(found.iter().map(|n| n.id).collect::<Vec<_>>(), vec![10, 21]);
        }
        other => panic!("note pane not ready: {other:?}"),
    }
}

#[tokio::test]
async fn test_search_panes_fail_independently() {
    let mut api = online_api(default_campaigns());
    api.expect_list_all_notes()
        .times(1)
        .returning(|| Err(ApiError::Fetch { status: 503 }));

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, "strahd");
    let commands = controller.submit_search();
    controller.drive(&api, commands).await;

    let Some(search) = controller.state().search() else {
        panic!("search results missing");
    };
    assert!(matches!(&search.campaigns, Pane::Ready(found) if found.len() == 1));
    assert_eq!(search.notes, Pane::Failed("Failed to search notes".to_string()));
}

#[tokio::test]
async fn test_search_without_cached_campaigns_loads_them() {
    let mut api = MockNotesApi::new();
    api.expect_check_connection().returning(|| Ok(()));
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    api.expect_list_campaigns().returning(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ApiError::Fetch { status: 502 })
        } else {
            Ok(default_campaigns())
        }
    });
    api.expect_list_all_notes().returning(|| Ok(Vec::new()));

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, "curse");
    let commands = controller.submit_search();
    assert_eq!(commands.len(), 2);
    controller.drive(&api, commands).await;

    let Some(search) = controller.state().search() else {
        panic!("search results missing");
    };
    assert!(matches!(&search.campaigns, Pane::Ready(found) if found[0].id == 2));
    assert_eq!(search.notes, Pane::Ready(Vec::new()));
}

#[tokio::test]
async fn test_superseded_search_is_ignored() {
    let mut api = online_api(default_campaigns());
    api.expect_list_all_notes().returning(|| Ok(search_notes()));

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, "dragon");
    let first = controller.submit_search();
    if let Some(input) = controller.input_mut(Field::Search) {
        input.clear();
        input.insert_str("mist");
    }
    let second = controller.submit_search();

    for command in second {
        controller.apply(execute(&api, command).await);
    }
    for command in first {
        controller.apply(execute(&api, command).await);
    }

    let Some(search) = controller.state().search() else {
        panic!("search results missing");
    };
    assert_eq!(search.term, "mist");
    assert!(matches!(&search.notes, Pane::Ready(found) if found.len() == 1 && found[0].id == 20));
}

#[tokio::test]
async fn test_dismiss_search_clears_input() {
    let mut api = online_api(default_campaigns());
    api.expect_list_all_notes().returning(|| Ok(Vec::new()));

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, "dragon");
    let commands = controller.submit_search();
    controller.drive(&api, commands).await;
    controller.dismiss_search();

    assert!(controller.state().search().is_none());
    assert!(controller.state().search_input().is_empty());
    assert_eq!(controller.state().screen(), &Screen::Welcome);
}

#[tokio::test]
async fn test_open_campaign_from_search() {
    let mut api = online_api(default_campaigns());
    api.expect_list_all_notes().returning(|| Ok(Vec::new()));
    api.expect_list_notes()
        .withf(|name| name.contains("Curse of Strahd"))
        .times(1)
        .returning(|_| Ok(page(Vec::new())));

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, "strahd");
    let commands = controller.submit_search();
    controller.drive(&api, commands).await;

    let commands = controller.select_campaign_from_search(2);
    controller.drive(&api, commands).await;

    assert_eq!(controller.state().screen(), &Screen::CampaignDetail(2));
    assert!(controller.state().search().is_none());
}

#[tokio::test]
async fn test_view_note_from_search_highlights_it() {
    let mut api = online_api(default_campaigns());
    api.expect_list_all_notes().returning(|| Ok(search_notes()));
    api.expect_list_notes()
        .withf(|name| name.contains("Curse of Strahd"))
        .times(1)
        .returning(|_| {
            Ok(page(vec![
                note(20, "Curse of Strahd", "Village", "<p>Mist everywhere</p>", 2),
                note(21, "Curse of Strahd", "Castle", "<p>Strahd's dragon skull</p>", 3),
            ]))
        });

    let mut controller = started(&api).await;
    type_into(&mut controller, Field::Search, "skull");
    let commands = controller.submit_search();
    controller.drive(&api, commands).await;

    let commands = controller.view_note_from_search(21, Some("Curse of Strahd"));
    assert!(controller.state().highlight().is_none());
    controller.drive(&api, commands).await;

    assert_eq!(controller.state().screen(), &Screen::CampaignDetail(2));
    assert_eq!(controller.state().highlight().map(|h| h.note_id), Some(21));

    // The highlight fades on its own
    controller.tick(Instant::now() + Duration::from_secs(5));
    assert!(controller.state().highlight().is_none());
}

#[tokio::test]
async fn test_view_note_with_unknown_campaign() {
    let mut api = online_api(default_campaigns());
    api.expect_list_notes().times(0);

    let mut controller = started(&api).await;
    let commands = controller.view_note_from_search(7, Some("Lost Mine"));

    assert!(commands.is_empty());
    assert_eq!(
        notice(&controller),
        Some(("Campaign \"Lost Mine\" not found", NoticeLevel::Error))
    );
}

// =============================================================================
// Notices
// =============================================================================

#[tokio::test]
async fn test_notice_expires_on_tick() {
    let api = online_api(default_campaigns());
    let mut controller = started(&api).await;
    controller.select_campaign(42);
    assert!(controller.state().notice().is_some());

    controller.tick(Instant::now());
    assert!(controller.state().notice().is_some());

    controller.tick(Instant::now() + Duration::from_secs(10));
    assert!(controller.state().notice().is_none());
}

#[test]
fn test_apply_connection_outcome_directly() {
    let mut controller = Controller::default();
    let follow_up = controller.apply(Outcome::Connection(Ok(())));

    assert!(controller.state().is_connected());
    assert!(matches!(follow_up.as_slice(), [Command::LoadCampaigns { .. }]));
}
