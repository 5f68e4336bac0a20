use super::*;

fn code(html: &str) -> DrawerData {
    DrawerData::Code { html: html.to_owned(), selected: None }
}

// =============================================================
// Open / close
// =============================================================

#[test]
fn default_is_closed_with_no_mode() {
    let drawer = DrawerState::default();
    assert!(!drawer.is_open);
    assert_eq!(drawer.mode, None);
    assert_eq!(drawer.active(), None);
}

#[test]
fn open_uses_default_title() {
    let mut drawer = DrawerState::default();
    drawer.open(DrawerMode::Enhance, DrawerData::None);
    assert!(drawer.is_open);
    assert_eq!(drawer.title, "AI Enhancements");
    assert!(drawer.is_showing(DrawerMode::Enhance));
}

#[test]
fn opening_replaces_previous_panel_entirely() {
    let mut drawer = DrawerState::default();
    drawer.open(DrawerMode::CodeEditor, code("<p>x</p>"));
    drawer.open(DrawerMode::History, DrawerData::None);
    assert_eq!(drawer.mode, Some(DrawerMode::History));
    assert_eq!(drawer.data, DrawerData::None);
    assert!(!drawer.is_showing(DrawerMode::CodeEditor));
}

#[test]
fn close_keeps_mode_and_data() {
    let mut drawer = DrawerState::default();
    drawer.open_titled(DrawerMode::CodeEditor, "Edit", code("<p>x</p>"));
    drawer.close();
    assert!(!drawer.is_open);
    assert_eq!(drawer.mode, Some(DrawerMode::CodeEditor));
    assert_eq!(drawer.data, code("<p>x</p>"));
    assert_eq!(drawer.active(), None);
}

#[test]
fn only_history_slides_from_left() {
    assert!(DrawerMode::History.slides_from_left());
    assert!(!DrawerMode::Settings.slides_from_left());
}

// =============================================================
// Selection routing
// =============================================================

#[test]
fn selection_attaches_to_open_code_editor() {
    let mut drawer = DrawerState::default();
    drawer.open(DrawerMode::CodeEditor, code("<p>x</p>"));
    assert!(drawer.attach_selection("<td>1</td>"));
    assert_eq!(drawer.data, DrawerData::Code { html: "<p>x</p>".to_owned(), selected: Some("<td>1</td>".to_owned()) });
}

#[test]
fn selection_ignored_when_editor_closed_or_other_panel() {
    let mut drawer = DrawerState::default();
    assert!(!drawer.attach_selection("<td/>"));
    drawer.open(DrawerMode::Layouts, DrawerData::Artifact { html: String::new() });
    assert!(!drawer.attach_selection("<td/>"));
    drawer.open(DrawerMode::CodeEditor, code(""));
    drawer.close();
    assert!(!drawer.attach_selection("<td/>"));
}
