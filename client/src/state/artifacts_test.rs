use super::*;
use crate::state::session::{ARTIFACTS_PER_SESSION, PLACEHOLDER_STYLE, artifact_id};
use crate::util::html_fragments::layout_container_depth;
use crate::util::layout::find_layout;

fn begin(id: &str) -> Vec<Session> {
    let session = Session::with_placeholders(id.to_owned(), "CRM".to_owned(), 0, ARTIFACTS_PER_SESSION);
    reduce(&[], &SessionAction::BeginGeneration { session })
}

fn chunk(session: &str, index: usize, delta: &str) -> SessionAction {
    SessionAction::ApplyChunk {
        session_id: session.to_owned(),
        artifact_id: artifact_id(session, index),
        delta: delta.to_owned(),
    }
}

fn finalize(session: &str, index: usize, html: &str, snapshot: Option<&str>) -> SessionAction {
    SessionAction::FinalizeArtifact {
        session_id: session.to_owned(),
        artifact_id: artifact_id(session, index),
        final_html: html.to_owned(),
        snapshot: snapshot.map(str::to_owned),
    }
}

fn fail(session: &str, index: usize, message: &str) -> SessionAction {
    SessionAction::FailArtifact {
        session_id: session.to_owned(),
        artifact_id: artifact_id(session, index),
        message: message.to_owned(),
        snapshot: None,
    }
}

fn apply_all(mut sessions: Vec<Session>, actions: &[SessionAction]) -> Vec<Session> {
    for action in actions {
        sessions = reduce(&sessions, action);
    }
    sessions
}

fn completed(session: &str, html: &str) -> Vec<Session> {
    apply_all(begin(session), &[chunk(session, 0, html), finalize(session, 0, html, None)])
}

// =============================================================
// Begin + chunks
// =============================================================

#[test]
fn begin_generation_appends_streaming_placeholders() {
    let sessions = begin("s1");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].artifacts.len(), 3);
    assert!(sessions[0].artifacts.iter().all(|a| a.is_streaming() && a.html.is_empty()));
}

#[test]
fn begin_generation_ignores_duplicate_session_id() {
    let sessions = begin("s1");
    let again = reduce(
        &sessions,
        &SessionAction::BeginGeneration { session: Session::with_placeholders("s1".to_owned(), "x".to_owned(), 0, 1) },
    );
    assert_eq!(again, sessions);
}

#[test]
fn interleaved_chunks_never_lose_updates() {
    // Every interleaving of three per-artifact delta queues must leave each
    // artifact with exactly its own deltas in order.
    let queues: [Vec<&str>; 3] =
        [vec!["<a>", "1", "</a>"], vec!["<b>", "22", "</b>"], vec!["<c>", "333", "</c>", "!"]];
    let schedules: [&[usize]; 4] = [
        &[0, 0, 0, 1, 1, 1, 2, 2, 2, 2],
        &[0, 1, 2, 0, 1, 2, 0, 1, 2, 2],
        &[2, 2, 1, 0, 2, 1, 0, 2, 1, 0],
        &[1, 2, 2, 2, 2, 1, 0, 1, 0, 0],
    ];
    for schedule in schedules {
        let mut cursors = [0usize; 3];
        let mut sessions = begin("s");
        for &artifact in schedule {
            let delta = queues[artifact][cursors[artifact]];
            cursors[artifact] += 1;
            sessions = reduce(&sessions, &chunk("s", artifact, delta));
        }
        for (index, queue) in queues.iter().enumerate() {
            assert_eq!(sessions[0].artifacts[index].html, queue.concat(), "schedule {schedule:?}");
            assert!(sessions[0].artifacts[index].is_streaming());
        }
    }
}

#[test]
fn chunks_to_other_sessions_do_not_interfere() {
    let mut sessions = begin("a");
    sessions = reduce(
        &sessions,
        &SessionAction::BeginGeneration {
            session: Session::with_placeholders("b".to_owned(), "p".to_owned(), 1, ARTIFACTS_PER_SESSION),
        },
    );
    sessions = apply_all(sessions, &[chunk("a", 0, "x"), chunk("b", 0, "y"), chunk("a", 0, "z")]);
    assert_eq!(sessions[0].artifacts[0].html, "xz");
    assert_eq!(sessions[1].artifacts[0].html, "y");
}

#[test]
fn unknown_addresses_are_noops() {
    let sessions = begin("s");
    assert_eq!(reduce(&sessions, &chunk("missing", 0, "x")), sessions);
    assert_eq!(reduce(&sessions, &chunk("s", 9, "x")), sessions);
}

// =============================================================
// Finalize / fail
// =============================================================

#[test]
fn basic_generation_completes_all_without_snapshot() {
    let mut sessions = begin("s");
    for i in 0..3 {
        sessions = reduce(&sessions, &chunk("s", i, "```html\n<p>"));
    }
    for i in 0..3 {
        sessions = reduce(&sessions, &chunk("s", i, &format!("{i}</p>\n```")));
    }
    for i in 0..3 {
        let acc = sessions[0].artifacts[i].html.clone();
        sessions = reduce(&sessions, &finalize("s", i, &acc, None));
    }
    for (i, artifact) in sessions[0].artifacts.iter().enumerate() {
        assert_eq!(artifact.status, ArtifactStatus::Complete);
        assert_eq!(artifact.html, format!("<p>{i}</p>"));
        assert!(artifact.original_html.is_none());
    }
}

#[test]
fn failure_is_isolated_to_one_artifact() {
    let sessions = apply_all(
        begin("s"),
        &[
            chunk("s", 0, "<a/>"),
            chunk("s", 1, "<b"),
            chunk("s", 2, "<c/>"),
            fail("s", 1, "network <down>"),
            finalize("s", 0, "<a/>", None),
            finalize("s", 2, "<c/>", None),
        ],
    );
    let artifacts = &sessions[0].artifacts;
    assert_eq!(artifacts[0].status, ArtifactStatus::Complete);
    assert_eq!(artifacts[1].status, ArtifactStatus::Error);
    assert!(artifacts[1].html.contains("network &lt;down&gt;"));
    assert_eq!(artifacts[2].html, "<c/>");
}

#[test]
fn settled_artifacts_ignore_late_writes() {
    let sessions = completed("s", "<p>done</p>");
    let after = apply_all(
        sessions.clone(),
        &[chunk("s", 0, "late"), finalize("s", 0, "other", None), fail("s", 0, "boom")],
    );
    assert_eq!(after, sessions);
}

#[test]
fn restart_is_the_only_way_back_to_streaming() {
    let sessions = completed("s", "<p>v1</p>");
    let restarted = reduce(
        &sessions,
        &SessionAction::RestartArtifact { session_id: "s".to_owned(), artifact_id: "s_0".to_owned(), clear_html: true },
    );
    let artifact = &restarted[0].artifacts[0];
    assert!(artifact.is_streaming());
    assert!(artifact.html.is_empty());
}

#[test]
fn iteration_snapshots_pre_operation_html() {
    let sessions = completed("s", "<p>H0</p>");
    let sessions = apply_all(
        sessions,
        &[
            SessionAction::RestartArtifact {
                session_id: "s".to_owned(),
                artifact_id: "s_0".to_owned(),
                clear_html: true,
            },
            chunk("s", 0, "<p>H1</p>"),
            finalize("s", 0, "<p>H1</p>", Some("<p>H0</p>")),
        ],
    );
    let artifact = &sessions[0].artifacts[0];
    assert_eq!(artifact.html, "<p>H1</p>");
    assert_eq!(artifact.original_html.as_deref(), Some("<p>H0</p>"));
}

#[test]
fn failed_revertible_operation_keeps_revert_anchor() {
    let sessions = completed("s", "<p>H0</p>");
    let sessions = apply_all(
        sessions,
        &[
            SessionAction::RestartArtifact {
                session_id: "s".to_owned(),
                artifact_id: "s_0".to_owned(),
                clear_html: true,
            },
            SessionAction::FailArtifact {
                session_id: "s".to_owned(),
                artifact_id: "s_0".to_owned(),
                message: "quota".to_owned(),
                snapshot: Some("<p>H0</p>".to_owned()),
            },
            SessionAction::RevertArtifact { session_id: "s".to_owned(), artifact_id: "s_0".to_owned() },
        ],
    );
    let artifact = &sessions[0].artifacts[0];
    assert_eq!(artifact.status, ArtifactStatus::Complete);
    assert_eq!(artifact.html, "<p>H0</p>");
    assert!(artifact.original_html.is_none());
}

#[test]
fn strip_code_fences_handles_common_wrappers() {
    assert_eq!(strip_code_fences("```html\n<p>x</p>\n```"), "<p>x</p>");
    assert_eq!(strip_code_fences("```HTML<p>x</p>```"), "<p>x</p>");
    assert_eq!(strip_code_fences("  <p>x</p>  "), "<p>x</p>");
}

// =============================================================
// Artifact edits
// =============================================================

#[test]
fn style_names_fill_in_order() {
    let sessions = reduce(
        &begin("s"),
        &SessionAction::SetStyleNames { session_id: "s".to_owned(), names: vec!["A".to_owned(), "B".to_owned()] },
    );
    let names: Vec<&str> = sessions[0].artifacts.iter().map(|a| a.style_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", PLACEHOLDER_STYLE]);
}

#[test]
fn append_artifacts_grows_session() {
    let extra = vec![Artifact::placeholder("s", 3, "Variation 1"), Artifact::placeholder("s", 4, "Variation 2")];
    let sessions = reduce(&begin("s"), &SessionAction::AppendArtifacts { session_id: "s".to_owned(), artifacts: extra });
    assert_eq!(sessions[0].artifacts.len(), 5);
    assert_eq!(sessions[0].artifacts[4].style_name, "Variation 2");
}

#[test]
fn apply_layout_wraps_base_and_snapshots_it() {
    let sessions = completed("s", "<html><body><main>m</main></body></html>");
    let top = find_layout("Top Navigation").expect("layout");
    let mobile = find_layout("Mobile Stack").expect("layout");
    let once = reduce(
        &sessions,
        &SessionAction::ApplyLayout { session_id: "s".to_owned(), artifact_id: "s_0".to_owned(), layout: top },
    );
    let twice = reduce(
        &once,
        &SessionAction::ApplyLayout { session_id: "s".to_owned(), artifact_id: "s_0".to_owned(), layout: mobile },
    );
    let artifact = &twice[0].artifacts[0];
    assert_eq!(artifact.original_html.as_deref(), Some("<html><body><main>m</main></body></html>"));
    assert_eq!(layout_container_depth(&artifact.html), 1);
    assert!(artifact.html.contains("Mobile Stack"));
    assert!(!artifact.html.contains("Top Navigation"));
}

#[test]
fn revert_without_snapshot_is_noop() {
    let sessions = completed("s", "<p>x</p>");
    let after =
        reduce(&sessions, &SessionAction::RevertArtifact { session_id: "s".to_owned(), artifact_id: "s_0".to_owned() });
    assert_eq!(after, sessions);
}

#[test]
fn edit_replaces_html() {
    let sessions = completed("s", "<p>x</p>");
    let after = reduce(
        &sessions,
        &SessionAction::EditArtifactHtml {
            session_id: "s".to_owned(),
            artifact_id: "s_0".to_owned(),
            html: "<p>y</p>".to_owned(),
        },
    );
    assert_eq!(after[0].artifacts[0].html, "<p>y</p>");
}

// =============================================================
// Session-level actions
// =============================================================

#[test]
fn delete_removes_whole_session() {
    let mut sessions = begin("a");
    sessions.extend(begin("b"));
    let after = reduce(&sessions, &SessionAction::DeleteSession { session_id: "a".to_owned() });
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, "b");
}

#[test]
fn update_meta_trims_name_and_replaces_tags() {
    let tags: BTreeSet<String> = ["crm".to_owned(), "q3".to_owned()].into();
    let after = reduce(
        &begin("s"),
        &SessionAction::UpdateSessionMeta { session_id: "s".to_owned(), name: Some("  Sales  ".to_owned()), tags: tags.clone() },
    );
    assert_eq!(after[0].name.as_deref(), Some("Sales"));
    assert_eq!(after[0].tags, tags);

    let cleared = reduce(
        &after,
        &SessionAction::UpdateSessionMeta { session_id: "s".to_owned(), name: Some(" ".to_owned()), tags: BTreeSet::new() },
    );
    assert!(cleared[0].name.is_none());
    assert!(cleared[0].tags.is_empty());
}

#[test]
fn import_skips_existing_ids() {
    let existing = begin("a");
    let mut incoming = begin("a");
    incoming[0].prompt = "replacement".to_owned();
    incoming.extend(begin("b"));
    let after = reduce(&existing, &SessionAction::ImportSessions { sessions: incoming });
    assert_eq!(after.len(), 2);
    assert_eq!(after[0].prompt, "CRM");
    assert_eq!(after[1].id, "b");
}

#[test]
fn imported_streaming_artifacts_arrive_failed() {
    let incoming = apply_all(begin("b"), &[chunk("b", 0, "<p>half")]);
    let after = reduce(&[], &SessionAction::ImportSessions { sessions: incoming });
    assert!(after[0].artifacts.iter().all(|a| a.status == ArtifactStatus::Error));
    assert_eq!(after[0].artifacts[0].html, error_html(INTERRUPTED_MESSAGE));
}

#[test]
fn interrupt_streaming_settles_only_streaming_artifacts() {
    let mut sessions = apply_all(
        begin("s"),
        &[finalize("s", 0, "<p>done</p>", None), fail("s", 1, "boom"), chunk("s", 2, "<p>half")],
    );
    sessions[0].artifacts[2].original_html = Some("<p>before</p>".to_owned());

    assert_eq!(interrupt_streaming(&mut sessions), 1);
    let artifacts = &sessions[0].artifacts;
    assert_eq!(artifacts[0].html, "<p>done</p>");
    assert_eq!(artifacts[1].html, error_html("boom"));
    assert_eq!(artifacts[2].status, ArtifactStatus::Error);
    assert_eq!(artifacts[2].original_html.as_deref(), Some("<p>before</p>"));
    assert_eq!(interrupt_streaming(&mut sessions), 0);
}

#[test]
fn clear_all_empties_list() {
    assert!(reduce(&begin("s"), &SessionAction::ClearAll).is_empty());
}

#[test]
fn stream_progress_amends_and_operations_push() {
    assert_eq!(chunk("s", 0, "x").checkpoint(), Checkpoint::Amend);
    assert_eq!(fail("s", 0, "x").checkpoint(), Checkpoint::Amend);
    assert_eq!(SessionAction::ClearAll.checkpoint(), Checkpoint::Push);
    assert_eq!(
        SessionAction::RestartArtifact { session_id: String::new(), artifact_id: String::new(), clear_html: false }
            .checkpoint(),
        Checkpoint::Push
    );
}
