use super::*;

const FULL_DOC: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <link rel="stylesheet" href="https://cdn.example/app.css">
  <style>.kpi { color: red; }</style>
</head>
<body class="dark" data-theme="x">
  <main><h1>Revenue</h1></main>
  <style>.late { margin: 0; }</style>
  <script>console.log("chart");</script>
</body>
</html>"#;

// =============================================================
// Full documents
// =============================================================

#[test]
fn extract_splits_full_document() {
    let parts = extract(FULL_DOC);
    assert!(parts.head.contains("<meta charset=\"utf-8\">"));
    assert!(parts.head.contains("app.css"));
    assert!(!parts.head.contains("<style"));
    assert_eq!(parts.styles, vec!["<style>.kpi { color: red; }</style>", "<style>.late { margin: 0; }</style>"]);
    assert_eq!(parts.scripts, vec![r#"<script>console.log("chart");</script>"#]);
    assert_eq!(parts.body_attrs, r#" class="dark" data-theme="x""#);
    assert_eq!(parts.body, "<main><h1>Revenue</h1></main>");
}

#[test]
fn extract_is_case_insensitive() {
    let parts = extract("<HTML><HEAD><STYLE>a{}</STYLE></HEAD><BODY><P>x</P><SCRIPT>1</SCRIPT></BODY></HTML>");
    assert_eq!(parts.styles, vec!["<STYLE>a{}</STYLE>"]);
    assert_eq!(parts.scripts, vec!["<SCRIPT>1</SCRIPT>"]);
    assert_eq!(parts.body, "<P>x</P>");
}

#[test]
fn extract_ignores_layout_and_inspector_blocks() {
    let html = r#"<html><head><style data-dashgen-layout="Top Navigation">.layout-container{}</style><style>.own{}</style></head><body><div>x</div><script data-dashgen-inspector>1</script></body></html>"#;
    let parts = extract(html);
    assert_eq!(parts.styles, vec!["<style>.own{}</style>"]);
    assert!(parts.scripts.is_empty());
    assert_eq!(parts.body, "<div>x</div>");
}

// =============================================================
// Fragments and partial input
// =============================================================

#[test]
fn fragment_without_document_tags_is_all_body() {
    let parts = extract("<div class=\"card\">42</div>");
    assert_eq!(parts.head, "");
    assert_eq!(parts.body_attrs, "");
    assert_eq!(parts.body, "<div class=\"card\">42</div>");
}

#[test]
fn partial_stream_without_body_close_keeps_tail() {
    let parts = extract("<!DOCTYPE html><html><head><title>t</title></head><body><section><h2>Us");
    assert_eq!(parts.head, "<title>t</title>");
    assert_eq!(parts.body, "<section><h2>Us");
}

#[test]
fn unclosed_style_block_runs_to_end_of_input() {
    let parts = extract("<html><head><style>.a { color:");
    assert_eq!(parts.styles, vec!["<style>.a { color:"]);
    assert_eq!(parts.body, "");
}

#[test]
fn head_without_body_tag_strips_document_chrome() {
    let parts = extract("<html><head><title>t</title></head><p>loose</p></html>");
    assert_eq!(parts.head, "<title>t</title>");
    assert_eq!(parts.body, "<p>loose</p>");
}

#[test]
fn empty_and_garbage_input_never_panics() {
    assert_eq!(extract(""), HtmlParts::default());
    assert_eq!(extract("   \n"), HtmlParts::default());
    for garbage in ["</body></body>", "<body", "<<<>>>", "</div></div><div", "<head><body></head>", "\u{0}\u{fffd}"] {
        let _ = extract(garbage);
    }
}

// =============================================================
// Layout container unwrapping
// =============================================================

#[test]
fn unwrap_removes_single_wrapper() {
    let body = r#"<div class="layout-container"><main>x</main></div>"#;
    assert_eq!(unwrap_layout_container(body), "<main>x</main>");
}

#[test]
fn unwrap_keeps_inner_divs_balanced() {
    let body = r#"<div class="layout-container"><div class="grid"><div>a</div></div></div><footer>f</footer>"#;
    assert_eq!(unwrap_layout_container(body), r#"<div class="grid"><div>a</div></div><footer>f</footer>"#);
}

#[test]
fn unwrap_removes_nested_wrappers() {
    let body = r#"<div class='x layout-container'><div class="layout-container"><p>a</p></div></div>"#;
    assert_eq!(unwrap_layout_container(body), "<p>a</p>");
}

#[test]
fn unwrap_handles_unclosed_wrapper() {
    let body = r#"<div class="layout-container"><p>streaming"#;
    assert_eq!(unwrap_layout_container(body), "<p>streaming");
}

#[test]
fn unwrap_ignores_similar_class_names() {
    let body = r#"<div class="layout-container-inner">a</div>"#;
    assert_eq!(unwrap_layout_container(body), body);
}

#[test]
fn container_depth_counts_nesting() {
    assert_eq!(layout_container_depth("<div>x</div>"), 0);
    assert_eq!(layout_container_depth(r#"<div class="layout-container"><div>x</div></div>"#), 1);
    assert_eq!(
        layout_container_depth(r#"<div class="layout-container"><div class="layout-container">x</div></div>"#),
        2
    );
    assert_eq!(
        layout_container_depth(r#"<div class="layout-container">a</div><div class="layout-container">b</div>"#),
        1
    );
}

// =============================================================
// Injection helpers
// =============================================================

#[test]
fn insert_before_last_body_close() {
    let html = "<body><p>a</p></body><!-- </body> is mentioned --></body>";
    let out = insert_before_body_close(html, "<i></i>");
    assert!(out.ends_with("<i></i></body>"));
}

#[test]
fn insert_appends_when_body_close_missing() {
    assert_eq!(insert_before_body_close("<p>a", "<i></i>"), "<p>a<i></i>");
}

#[test]
fn remove_marked_blocks_only_touches_marked_tags() {
    let html = r#"<style>a{}</style><script data-dashgen-inspector>x</script><script>y</script>"#;
    assert_eq!(remove_marked_blocks(html, INSPECTOR_ATTR), "<style>a{}</style><script>y</script>");
}
