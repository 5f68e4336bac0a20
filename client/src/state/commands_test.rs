use super::*;
use crate::state::drawer::DrawerMode;
use crate::state::session::ArtifactStatus;
use crate::state::templates::TEMPLATES;
use crate::util::html_fragments;
use crate::util::layout::find_layout;

fn state_with_focused(html: &str) -> AppState {
    let mut state = AppState::default();
    state.import_html(html.to_owned(), "mock.html", 1).unwrap();
    state.focus_artifact(0);
    state
}

fn focused_html(state: &AppState) -> String {
    state.focused_artifact().map(|(_, a)| a.html.clone()).unwrap_or_default()
}

// =============================================================
// Import / templates
// =============================================================

#[test]
fn import_creates_single_complete_artifact() {
    let mut state = AppState::default();
    state.open_drawer(DrawerMode::Import);
    let id = state.import_html("<p>x</p>".into(), "mock.html", 42).unwrap();
    let session = state.current_session().unwrap();
    assert_eq!(session.id, id);
    assert_eq!(session.prompt, "Imported: mock.html");
    assert_eq!(session.timestamp, 42);
    assert_eq!(session.artifacts.len(), 1);
    assert_eq!(session.artifacts[0].id, format!("{id}_0"));
    assert_eq!(session.artifacts[0].status, ArtifactStatus::Complete);
    assert!(!state.drawer.is_open);
}

#[test]
fn import_rejects_other_files_without_side_effects() {
    let mut state = AppState::default();
    assert!(state.import_html("x".into(), "notes.txt", 0).is_err());
    assert!(state.sessions().is_empty());
    assert!(!state.can_undo());
}

#[test]
fn template_becomes_session() {
    let mut state = AppState::default();
    let template = &TEMPLATES[0];
    state.apply_template(template, 0);
    let session = state.current_session().unwrap();
    assert_eq!(session.prompt, format!("Template: {}", template.name));
    assert_eq!(session.artifacts[0].html, template.html);
}

// =============================================================
// Focused artifact commands
// =============================================================

#[test]
fn layout_then_revert_restores_source() {
    let source = "<html><head><style>p{}</style></head><body><p>x</p></body></html>";
    let mut state = state_with_focused(source);
    let layout = find_layout("Top Navigation").unwrap();
    assert!(state.apply_layout_to_focused(layout));
    assert_eq!(html_fragments::layout_container_depth(&focused_html(&state)), 1);

    let other = find_layout("Mobile Stack").unwrap();
    assert!(state.apply_layout_to_focused(other));
    assert_eq!(html_fragments::layout_container_depth(&focused_html(&state)), 1);

    assert!(state.revert_focused());
    assert_eq!(focused_html(&state), source);
    assert!(state.focused_artifact().unwrap().1.original_html.is_none());
}

#[test]
fn edit_replaces_html_and_is_undoable() {
    let mut state = state_with_focused("<p>a</p>");
    assert!(state.edit_focused_html("<p>b</p>".into()));
    assert_eq!(focused_html(&state), "<p>b</p>");
    state.undo();
    assert_eq!(focused_html(&state), "<p>a</p>");
}

#[test]
fn commands_without_focus_do_nothing() {
    let mut state = AppState::default();
    state.import_html("<p>a</p>".into(), "a.html", 0).unwrap();
    assert!(!state.revert_focused());
    assert!(!state.edit_focused_html("x".into()));
    assert!(!state.apply_layout_to_focused(&crate::util::layout::LAYOUTS[1]));
}

// =============================================================
// Session list commands
// =============================================================

#[test]
fn meta_and_delete() {
    let mut state = AppState::default();
    let id = state.import_html("<p>a</p>".into(), "a.html", 0).unwrap();
    let tags = BTreeSet::from(["kpi".to_owned()]);
    assert!(state.update_session_meta(&id, Some(" Ops ".into()), tags.clone()));
    assert_eq!(state.sessions()[0].name.as_deref(), Some("Ops"));
    assert_eq!(state.sessions()[0].tags, tags);
    assert!(state.delete_session(&id));
    assert!(state.sessions().is_empty());
}

#[test]
fn session_export_import_skips_duplicates() {
    let mut state = AppState::default();
    state.import_html("<p>a</p>".into(), "a.html", 0).unwrap();
    let json = state.export_sessions().unwrap();
    assert_eq!(state.import_sessions(&json).unwrap(), 0);

    let mut fresh = AppState::default();
    assert_eq!(fresh.import_sessions(&json).unwrap(), 1);
    assert_eq!(fresh.notice.as_deref(), Some("Imported 1 session(s)"));
    assert!(fresh.import_sessions("{}").is_err());
}

#[test]
fn clear_all_empties_and_undoes() {
    let mut state = AppState::default();
    state.import_html("<p>a</p>".into(), "a.html", 0).unwrap();
    state.clear_all();
    assert!(state.sessions().is_empty());
    state.undo();
    assert_eq!(state.sessions().len(), 1);
}
