use super::*;
use crate::state::artifacts::{INTERRUPTED_MESSAGE, error_html};
use crate::state::session::{ARTIFACTS_PER_SESSION, ArtifactStatus};

fn placeholders(id: &str) -> Session {
    Session::with_placeholders(id.to_owned(), format!("prompt {id}"), 0, ARTIFACTS_PER_SESSION)
}

fn begin(state: &mut AppState, id: &str) {
    state.dispatch(SessionAction::BeginGeneration { session: placeholders(id) });
}

fn finish(state: &mut AppState, id: &str, index: usize, html: &str) {
    state.dispatch(SessionAction::FinalizeArtifact {
        session_id: id.to_owned(),
        artifact_id: format!("{id}_{index}"),
        final_html: html.to_owned(),
        snapshot: None,
    });
}

// =============================================================
// Construction + current session
// =============================================================

#[test]
fn new_state_points_at_newest_session() {
    let state = AppState::new(vec![placeholders("a"), placeholders("b")], GenerationSettings::default());
    assert_eq!(state.current_session().map(|s| s.id.as_str()), Some("b"));
    assert_eq!(state.current_session_index(), Some(1));
    assert!(!state.can_undo());
}

#[test]
fn begin_generation_becomes_current_and_clears_focus() {
    let mut state = AppState::new(vec![placeholders("a")], GenerationSettings::default());
    state.focus_artifact(1);
    begin(&mut state, "b");
    assert_eq!(state.current_session().map(|s| s.id.as_str()), Some("b"));
    assert_eq!(state.ui.focused_artifact, None);
}

#[test]
fn deleting_current_session_falls_back_to_newest() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    begin(&mut state, "b");
    state.jump_to_session("a");
    state.dispatch(SessionAction::DeleteSession { session_id: "a".to_owned() });
    assert_eq!(state.current_session().map(|s| s.id.as_str()), Some("b"));
}

#[test]
fn clear_all_resets_pointers_and_closes_drawer() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    state.open_drawer(DrawerMode::History);
    state.dispatch(SessionAction::ClearAll);
    assert!(state.sessions().is_empty());
    assert!(state.current_session().is_none());
    assert!(!state.drawer.is_open);
}

// =============================================================
// Undo / redo through dispatch
// =============================================================

#[test]
fn whole_generation_is_one_undo_step() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    for index in 0..ARTIFACTS_PER_SESSION {
        state.dispatch(SessionAction::ApplyChunk {
            session_id: "a".to_owned(),
            artifact_id: format!("a_{index}"),
            delta: "<p>".to_owned(),
        });
        finish(&mut state, "a", index, "<p>done</p>");
    }
    assert!(state.undo());
    assert!(state.sessions().is_empty());
    assert!(!state.can_undo());
    assert!(state.redo());
    assert!(state.sessions()[0].artifacts.iter().all(|a| a.html == "<p>done</p>"));
}

#[test]
fn undo_repairs_focus_and_current_pointer() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    state.dispatch(SessionAction::AppendArtifacts {
        session_id: "a".to_owned(),
        artifacts: vec![Artifact::placeholder("a", 3, "Variation 1")],
    });
    state.focus_artifact(3);
    assert_eq!(state.ui.focused_artifact, Some(3));
    state.undo();
    assert_eq!(state.ui.focused_artifact, None);
    state.undo();
    assert!(state.current_session().is_none());
}

#[test]
fn noop_dispatch_keeps_redo() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    state.undo();
    assert!(!state.dispatch(SessionAction::DeleteSession { session_id: "missing".to_owned() }));
    assert!(state.can_redo());
}

#[test]
fn undo_and_redo_are_refused_while_an_operation_runs() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    assert!(state.try_begin_loading());
    assert!(!state.can_undo());
    assert!(!state.undo());
    assert_eq!(state.sessions().len(), 1);
    state.finish_loading();
    assert!(state.can_undo());
}

#[test]
fn redo_of_abandoned_stream_settles_it_as_failed() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    state.dispatch(SessionAction::ApplyChunk {
        session_id: "a".to_owned(),
        artifact_id: "a_0".to_owned(),
        delta: "<p>a".to_owned(),
    });
    assert!(state.undo());
    // The stream keeps writing after its session was undone.
    state.dispatch(SessionAction::ApplyChunk {
        session_id: "a".to_owned(),
        artifact_id: "a_0".to_owned(),
        delta: "</p>".to_owned(),
    });
    finish(&mut state, "a", 0, "<p>a</p>");
    assert!(state.redo());

    let artifacts = &state.sessions()[0].artifacts;
    assert!(artifacts.iter().all(|a| a.status == ArtifactStatus::Error));
    assert_eq!(artifacts[0].html, error_html(INTERRUPTED_MESSAGE));
    assert!(!state.can_redo());
}

#[test]
fn undoing_clear_all_settles_artifacts_cleared_mid_stream() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    finish(&mut state, "a", 0, "<p>done</p>");
    state.dispatch(SessionAction::ClearAll);
    finish(&mut state, "a", 1, "<p>late</p>");
    assert!(state.undo());

    let artifacts = &state.sessions()[0].artifacts;
    assert_eq!(artifacts[0].html, "<p>done</p>");
    assert_eq!(artifacts[0].status, ArtifactStatus::Complete);
    assert!(artifacts[1..].iter().all(|a| a.status == ArtifactStatus::Error));
    assert!(state.redo());
    assert!(state.sessions().is_empty());
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn jump_to_session_clears_focus_and_closes_drawer() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    begin(&mut state, "b");
    state.focus_artifact(0);
    state.open_drawer(DrawerMode::History);
    state.jump_to_session("a");
    assert_eq!(state.current_session_index(), Some(0));
    assert_eq!(state.ui.focused_artifact, None);
    assert!(!state.drawer.is_open);
    state.jump_to_session("missing");
    assert_eq!(state.current_session_index(), Some(0));
}

#[test]
fn focus_ignores_out_of_range_index() {
    let mut state = AppState::default();
    state.focus_artifact(0);
    assert_eq!(state.ui.focused_artifact, None);
    begin(&mut state, "a");
    state.focus_artifact(7);
    assert_eq!(state.ui.focused_artifact, None);
    state.focus_artifact(2);
    assert_eq!(state.focused_artifact().map(|(_, a)| a.id.as_str()), Some("a_2"));
}

#[test]
fn inspect_toggle_emits_message_only_on_change() {
    let mut state = AppState::default();
    assert_eq!(state.set_inspect(true), Some(bridge::Message::ToggleInspect { value: true }));
    assert_eq!(state.set_inspect(true), None);
    assert_eq!(state.set_inspect(false), Some(bridge::Message::ToggleInspect { value: false }));
}

#[test]
fn busy_flag_refuses_second_claim() {
    let mut state = AppState::default();
    assert!(state.try_begin_loading());
    assert!(!state.try_begin_loading());
    state.finish_loading();
    assert!(state.try_begin_loading());
}

// =============================================================
// Drawer payloads + diagnostics
// =============================================================

#[test]
fn code_editor_receives_focused_html_and_selection() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    finish(&mut state, "a", 1, "<p>one</p>");
    state.focus_artifact(1);
    state.select_element("<td>9</td>".to_owned(), "td".to_owned());
    state.open_drawer(DrawerMode::CodeEditor);
    assert_eq!(
        state.drawer.data,
        DrawerData::Code { html: "<p>one</p>".to_owned(), selected: Some("<td>9</td>".to_owned()) }
    );
}

#[test]
fn selection_updates_open_code_editor() {
    let mut state = AppState::default();
    begin(&mut state, "a");
    state.focus_artifact(0);
    state.open_drawer(DrawerMode::CodeEditor);
    state.select_element("<h1>x</h1>".to_owned(), "h1".to_owned());
    assert!(matches!(&state.drawer.data, DrawerData::Code { selected: Some(s), .. } if s == "<h1>x</h1>"));
}

#[test]
fn drawer_without_focus_has_no_payload() {
    let mut state = AppState::default();
    state.open_drawer(DrawerMode::CodeEditor);
    assert_eq!(state.drawer.data, DrawerData::None);
    assert!(state.drawer.is_showing(DrawerMode::CodeEditor));
}

#[test]
fn runtime_errors_are_bounded() {
    let mut state = AppState::default();
    for n in 0..(RUNTIME_ERROR_CAP + 5) {
        state.record_runtime_error(format!("e{n}"), None, 0);
    }
    assert_eq!(state.runtime_errors.len(), RUNTIME_ERROR_CAP);
    assert_eq!(state.runtime_errors.front().map(|r| r.error.as_str()), Some("e5"));
    state.clear_runtime_errors();
    assert!(state.runtime_errors.is_empty());
}
