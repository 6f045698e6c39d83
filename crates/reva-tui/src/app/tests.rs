use tokio::sync::mpsc;

use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;
use reva_core::{DecorationImage, DecorationType, LoadState};

/// App wired to a channel so tests can observe the commands it issues.
fn test_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(Theme::marigold(), Config::default());
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn event(id: i64, name: &str, description: &str) -> Event {
    Event {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        is_active: Some(true),
        created_at: None,
        updated_at: None,
        decoration_types: vec![],
    }
}

fn decoration_type(id: i64, event_id: i64, event_name: &str, name: &str) -> DecorationType {
    DecorationType {
        id,
        name: name.to_string(),
        description: None,
        event_id: Some(event_id),
        event_name: Some(event_name.to_string()),
        is_active: Some(true),
        display_order: None,
        created_at: None,
        updated_at: None,
        decoration_images: vec![],
    }
}

fn image(id: i64, name: &str) -> DecorationImage {
    DecorationImage {
        id,
        name: name.to_string(),
        image_url: format!("https://cdn.example.com/{id}.jpg"),
        description: None,
        decoration_type_id: Some(10),
        decoration_type_name: Some("Mandap".into()),
        is_active: Some(true),
        display_order: None,
        created_at: None,
        updated_at: None,
    }
}

/// Dismiss the banner and answer the events load.
fn with_events(app: &mut App, rx: &mut mpsc::UnboundedReceiver<BackendCommand>) {
    app.update(Action::DrillIn);
    let Ok(BackendCommand::LoadEvents { ticket }) = rx.try_recv() else {
        panic!("expected LoadEvents");
    };
    app.handle_backend_event(BackendEvent::EventsLoaded {
        ticket,
        result: Ok(vec![
            event(1, "Haldi", "Turmeric ceremony"),
            event(2, "Sangeet", "Music and dance night"),
        ]),
    });
}

/// Open the Mandap gallery of event 1 with two images.
fn with_gallery(app: &mut App, rx: &mut mpsc::UnboundedReceiver<BackendCommand>) {
    app.navigate(Screen::Gallery(10));
    let Ok(BackendCommand::LoadGallery { ticket }) = rx.try_recv() else {
        panic!("expected LoadGallery");
    };
    app.handle_backend_event(BackendEvent::GalleryLoaded {
        ticket,
        result: Ok(GalleryView {
            decoration_type: Some(decoration_type(10, 1, "Haldi", "Mandap")),
            images: vec![image(7, "Rose Arch"), image(8, "Marigold Canopy")],
        }),
    });
}

// ── Banner / navigation ────────────────────────────────────────

#[test]
fn banner_key_opens_events_and_requests_load() {
    let (mut app, mut rx) = test_app();
    assert_eq!(app.screen, Screen::Banner);
    app.update(Action::MoveDown);
    assert_eq!(app.screen, Screen::Events);
    assert!(app.events.state().is_loading());
    assert!(matches!(rx.try_recv(), Ok(BackendCommand::LoadEvents { .. })));
}

#[test]
fn banner_times_out() {
    let (mut app, _rx) = test_app();
    for _ in 0..BANNER_TICKS {
        app.update(Action::Tick);
    }
    assert_eq!(app.screen, Screen::Events);
}

#[test]
fn enter_on_event_opens_its_decoration_types() {
    let (mut app, mut rx) = test_app();
    with_events(&mut app, &mut rx);
    app.update(Action::MoveDown);
    app.update(Action::DrillIn);
    assert_eq!(app.screen, Screen::DecorationTypes(2));
    match rx.try_recv() {
        Ok(BackendCommand::LoadDecorationTypes { ticket }) => assert_eq!(*ticket.param(), 2),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn esc_from_gallery_returns_to_owning_event() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::DecorationTypes(1));
    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Events);
}

// ── Search ─────────────────────────────────────────────────────

#[test]
fn live_search_filters_by_description() {
    let (mut app, mut rx) = test_app();
    with_events(&mut app, &mut rx);
    app.update(Action::StartSearch);
    assert_eq!(app.input_mode, InputMode::Search);
    for c in "musi".chars() {
        app.update(Action::SearchInput(c));
    }
    assert_eq!(app.visible_indices(), vec![1]);

    app.update(Action::SearchConfirm);
    app.update(Action::DrillIn);
    assert_eq!(app.screen, Screen::DecorationTypes(2));
    assert!(app.search_query.is_empty());
}

#[test]
fn search_backspace_and_cancel() {
    let (mut app, mut rx) = test_app();
    with_events(&mut app, &mut rx);
    app.update(Action::StartSearch);
    app.update(Action::SearchInput('x'));
    assert!(app.visible_indices().is_empty());
    app.update(Action::SearchInput('\x08'));
    assert_eq!(app.visible_indices(), vec![0, 1]);
    app.update(Action::SearchInput('h'));
    app.update(Action::SearchCancel);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.visible_indices(), vec![0, 1]);
}

// ── Load state ─────────────────────────────────────────────────

#[test]
fn stale_decoration_types_response_is_ignored() {
    let (mut app, mut rx) = test_app();
    app.navigate(Screen::DecorationTypes(1));
    let Ok(BackendCommand::LoadDecorationTypes { ticket: first }) = rx.try_recv() else {
        panic!("expected first load");
    };
    app.navigate(Screen::DecorationTypes(2));
    let Ok(BackendCommand::LoadDecorationTypes { ticket: second }) = rx.try_recv() else {
        panic!("expected second load");
    };
    assert!(first.is_cancelled());

    app.handle_backend_event(BackendEvent::DecorationTypesLoaded {
        ticket: first,
        result: Ok(DecorationTypesView {
            event: Some(event(1, "Haldi", "")),
            decoration_types: vec![decoration_type(10, 1, "Haldi", "Mandap")],
        }),
    });
    assert!(app.decoration_types.state().is_loading());

    app.handle_backend_event(BackendEvent::DecorationTypesLoaded {
        ticket: second,
        result: Ok(DecorationTypesView {
            event: Some(event(2, "Sangeet", "")),
            decoration_types: vec![decoration_type(20, 2, "Sangeet", "Stage")],
        }),
    });
    let view = app.decoration_types.state().ready().expect("ready");
    assert_eq!(view.event_name(), "Sangeet");
}

#[test]
fn failed_load_can_be_retried() {
    let (mut app, mut rx) = test_app();
    app.update(Action::DrillIn);
    let Ok(BackendCommand::LoadEvents { ticket }) = rx.try_recv() else {
        panic!("expected LoadEvents");
    };
    app.handle_backend_event(BackendEvent::EventsLoaded {
        ticket,
        result: Err("Failed to fetch events".into()),
    });
    assert_eq!(
        app.events.state(),
        &LoadState::Failed("Failed to fetch events".into())
    );
    assert!(app.visible_indices().is_empty());

    app.update(Action::Retry);
    assert!(app.events.state().is_loading());
    assert!(matches!(rx.try_recv(), Ok(BackendCommand::LoadEvents { .. })));
}

#[test]
fn retry_is_noop_when_ready() {
    let (mut app, mut rx) = test_app();
    with_events(&mut app, &mut rx);
    app.update(Action::Retry);
    assert!(rx.try_recv().is_err());
}

// ── Selection / export ─────────────────────────────────────────

#[test]
fn space_toggles_image_and_updates_badge() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::ToggleSelect);
    assert!(app.is_image_selected(7));
    assert_eq!(app.selected_count(), 1);

    app.update(Action::MoveDown);
    app.update(Action::DrillIn);
    assert_eq!(app.selected_count(), 2);

    app.update(Action::DrillIn);
    assert!(!app.is_image_selected(8));
    assert_eq!(app.selected_count(), 1);

    let store = app.session.selection().unwrap();
    assert_eq!(store.list_by_decoration_type("Mandap").len(), 1);
}

#[test]
fn selection_survives_navigation() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::ToggleSelect);
    app.update(Action::NavigateBack);
    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Events);
    assert_eq!(app.selected_count(), 1);
}

#[test]
fn export_with_empty_selection_shows_notice() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::Export);
    let notice = app.notice.clone().expect("notice shown");
    assert_eq!(notice.body, "Please select at least one image to generate PDF");
    assert!(rx.try_recv().is_err());
    assert!(!app.exporting);

    // Modal swallows other keys until dismissed.
    app.update(Action::MoveDown);
    assert_eq!(app.cursor, 0);
    app.update(Action::DrillIn);
    assert!(app.notice.is_none());
}

#[test]
fn export_sends_request_for_selection() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::ToggleSelect);
    app.update(Action::Export);
    assert!(app.exporting);
    match rx.try_recv() {
        Ok(BackendCommand::ExportPdf {
            request,
            file_name,
            base64,
            ..
        }) => {
            assert_eq!(request.event_id, 1);
            assert_eq!(request.event_name, "Haldi");
            assert_eq!(request.selected_images.len(), 1);
            assert_eq!(request.selected_images[0].decoration_type_name, "Mandap");
            assert_eq!(file_name, "wedding-mandap-images.pdf");
            assert!(!base64);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    app.handle_backend_event(BackendEvent::PdfExported {
        result: Ok("/tmp/wedding-mandap-images.pdf".into()),
    });
    assert!(!app.exporting);
    assert_eq!(app.notice.as_ref().map(|n| n.is_error), Some(false));
}

#[test]
fn export_with_backend_gone_reports_failure() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    drop(rx);
    app.update(Action::ToggleSelect);
    app.update(Action::Export);
    assert!(!app.exporting);
    let notice = app.notice.clone().expect("notice shown");
    assert!(notice.is_error);
    assert_eq!(notice.title, "Export failed");

    // A later export is attempted again rather than swallowed.
    app.update(Action::DrillIn);
    app.update(Action::Export);
    assert!(app.notice.is_some());
    assert!(!app.exporting);
}

#[test]
fn clear_selection_empties_store() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::ToggleSelect);
    app.update(Action::ClearSelection);
    assert_eq!(app.selected_count(), 0);
    assert!(app.session.selection().unwrap().is_empty());
}

// ── Quit ───────────────────────────────────────────────────────

#[test]
fn quit_without_selection_is_immediate() {
    let (mut app, mut rx) = test_app();
    with_events(&mut app, &mut rx);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn quit_with_selection_asks_first() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::ToggleSelect);
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);
    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    app.update(Action::Quit);
    assert!(app.update(Action::Quit));
}

#[test]
fn quit_from_search_with_selection_asks_first() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::ToggleSelect);
    app.update(Action::StartSearch);
    assert_eq!(app.input_mode, InputMode::Search);
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);
    assert!(!app.should_quit);
    assert_eq!(app.selected_count(), 1);
    assert!(app.update(Action::Quit));
}

#[test]
fn quit_from_search_without_selection_is_immediate() {
    let (mut app, mut rx) = test_app();
    with_events(&mut app, &mut rx);
    app.update(Action::StartSearch);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn shutdown_ends_session() {
    let (mut app, mut rx) = test_app();
    with_gallery(&mut app, &mut rx);
    app.update(Action::ToggleSelect);
    app.shutdown();
    assert!(!app.session.is_active());
}

#[test]
fn help_toggles() {
    let (mut app, mut rx) = test_app();
    with_events(&mut app, &mut rx);
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    app.update(Action::MoveDown);
    assert_eq!(app.cursor, 0);
    app.update(Action::ToggleHelp);
    assert!(!app.show_help);
}
