use super::*;

fn session(id: &str, prompt: &str, timestamp: i64, tags: &[&str]) -> Session {
    let mut s = Session::with_placeholders(id.into(), prompt.into(), timestamp, 3);
    s.tags = tags.iter().map(|t| (*t).to_owned()).collect();
    s
}

#[test]
fn meta_edit_trims_name_and_parses_tags() {
    let edit = MetaEdit::from_inputs("s1", "  Sales board ", "sales, q3 ,, sales");
    assert_eq!(edit.session_id, "s1");
    assert_eq!(edit.name.as_deref(), Some("Sales board"));
    assert_eq!(edit.tags.into_iter().collect::<Vec<_>>(), vec!["q3", "sales"]);
}

#[test]
fn blank_name_clears_custom_name() {
    let edit = MetaEdit::from_inputs("s1", "   ", "");
    assert_eq!(edit.name, None);
    assert!(edit.tags.is_empty());
}

#[test]
fn rows_are_newest_first_and_filtered() {
    let sessions = vec![
        session("a", "crm pipeline", 0, &["sales"]),
        session("b", "server health", 60_000, &[]),
        session("c", "sales funnel", 120_000, &["sales"]),
    ];
    let all = rows(&sessions, &SessionFilter::default(), 180_000);
    assert_eq!(all.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["c", "b", "a"]);
    assert_eq!(all[0].when, "1m ago");
    assert_eq!(all[0].artifacts, 3);

    let tagged = rows(&sessions, &SessionFilter { query: String::new(), tag: Some("sales".into()) }, 0);
    assert_eq!(tagged.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["c", "a"]);

    let searched = rows(&sessions, &SessionFilter { query: "HEALTH".into(), tag: None }, 0);
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].title, "server health");
}
