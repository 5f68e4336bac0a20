use super::*;
use crate::state::drawer::{DrawerData, DrawerMode};

#[test]
fn runtime_error_is_recorded() {
    let mut state = AppState::default();
    assert!(route_frame_payload(
        &mut state,
        r#"{"type":"RUNTIME_ERROR","error":"x is not defined","source":"about:srcdoc"}"#,
        7
    ));
    let report = state.runtime_errors.back().unwrap();
    assert_eq!(report.error, "x is not defined");
    assert_eq!(report.source.as_deref(), Some("about:srcdoc"));
    assert_eq!(report.timestamp, 7);
}

#[test]
fn element_selection_reaches_open_code_editor() {
    let mut state = AppState::default();
    state.import_html("<p>a</p>".into(), "a.html", 0).unwrap();
    state.focus_artifact(0);
    state.open_drawer(DrawerMode::CodeEditor);

    assert!(route_frame_payload(&mut state, r#"{"type":"ELEMENT_SELECTED","html":"<p>a</p>","tagName":"p"}"#, 0));
    assert_eq!(state.selected_element.as_ref().map(|e| e.tag_name.as_str()), Some("p"));
    assert!(matches!(&state.drawer.data, DrawerData::Code { selected: Some(s), .. } if s == "<p>a</p>"));
}

#[test]
fn foreign_messages_are_ignored() {
    let mut state = AppState::default();
    assert!(!route_frame_payload(&mut state, r#"{"source":"react-devtools"}"#, 0));
    assert!(!route_frame_payload(&mut state, r#"{"type":"webpackOk"}"#, 0));
    assert!(!route_frame_payload(&mut state, "plain text", 0));
    assert!(state.runtime_errors.is_empty());
    assert!(state.selected_element.is_none());
}

#[test]
fn host_bound_toggle_is_rejected() {
    let mut state = AppState::default();
    let err = decode_frame_message(r#"{"type":"TOGGLE_INSPECT","value":true}"#).unwrap_err();
    assert!(!is_foreign(&err));
    assert!(!route_frame_payload(&mut state, r#"{"type":"TOGGLE_INSPECT","value":true}"#, 0));
    assert!(!state.ui.inspect_mode);
}

#[test]
fn foreign_versus_malformed() {
    assert!(is_foreign(&decode_frame_message("{}").unwrap_err()));
    assert!(is_foreign(&decode_frame_message("not json").unwrap_err()));
    let malformed = decode_frame_message(r#"{"type":"ELEMENT_SELECTED","html":5}"#).unwrap_err();
    assert!(!is_foreign(&malformed));
}
