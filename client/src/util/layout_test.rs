use super::*;
use crate::util::html_fragments::layout_container_depth;

const SOURCE: &str = r#"<!DOCTYPE html><html><head><title>Ops</title><style>.card{padding:8px}</style></head><body class="dark"><aside>nav</aside><main class="card">42</main><script>draw()</script></body></html>"#;

fn layout(name: &str) -> &'static Layout {
    find_layout(name).expect("layout exists")
}

// =============================================================
// Catalog
// =============================================================

#[test]
fn catalog_has_six_layouts_with_default_first() {
    assert_eq!(LAYOUTS.len(), 6);
    assert!(LAYOUTS[0].is_default());
    assert!(LAYOUTS[0].css.is_empty());
    assert!(LAYOUTS[1..].iter().all(|l| !l.is_default() && !l.css.is_empty()));
}

#[test]
fn find_layout_misses_unknown_name() {
    assert!(find_layout("Holographic").is_none());
    assert_eq!(layout("Mobile Stack").name, "Mobile Stack");
}

// =============================================================
// Wrapping
// =============================================================

#[test]
fn wrap_places_body_in_container_and_keeps_parts() {
    let out = wrap_layout(SOURCE, layout("Top Navigation"));
    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains("<title>Ops</title>"));
    assert!(out.contains("<style>.card{padding:8px}</style>"));
    assert!(out.contains(r#"<style data-dashgen-layout="Top Navigation">"#));
    assert!(out.contains(r#"<body class="dark">"#));
    assert!(out.contains(r#"<div class="layout-container"><aside>nav</aside><main class="card">42</main></div>"#));
    assert!(out.contains("<script>draw()</script>"));
    assert_eq!(layout_container_depth(&out), 1);
}

#[test]
fn default_layout_leaves_body_unwrapped() {
    let out = wrap_layout(SOURCE, layout(DEFAULT_LAYOUT));
    assert_eq!(layout_container_depth(&out), 0);
    assert!(!out.contains(LAYOUT_STYLE_ATTR));
    assert!(out.contains(r#"<aside>nav</aside><main class="card">42</main>"#));
}

#[test]
fn rewrapping_never_nests_containers() {
    for first in &LAYOUTS {
        for second in &LAYOUTS {
            let twice = wrap_layout(&wrap_layout(SOURCE, first), second);
            let once = wrap_layout(SOURCE, second);
            assert_eq!(layout_container_depth(&twice), layout_container_depth(&once), "{} then {}", first.name, second.name);
        }
    }
}

#[test]
fn rewrapping_replaces_previous_layout_css() {
    let glass = wrap_layout(SOURCE, layout("Glass Command"));
    let mobile = wrap_layout(&glass, layout("Mobile Stack"));
    assert!(!mobile.contains("Glass Command"));
    assert_eq!(mobile.matches(LAYOUT_STYLE_ATTR).count(), 1);
    assert_eq!(mobile.matches("<script>draw()</script>").count(), 1);
    assert_eq!(mobile, wrap_layout(SOURCE, layout("Mobile Stack")));
}

#[test]
fn switching_back_to_default_unwraps() {
    let wrapped = wrap_layout(SOURCE, layout("Neo-Brutalist"));
    let plain = wrap_layout(&wrapped, layout(DEFAULT_LAYOUT));
    assert_eq!(layout_container_depth(&plain), 0);
    assert!(!plain.contains(LAYOUT_STYLE_ATTR));
}

#[test]
fn wrap_tolerates_fragments_and_garbage() {
    let out = wrap_layout("<div>partial", layout("Enterprise Light"));
    assert!(out.contains(r#"<div class="layout-container"><div>partial</div>"#));
    let _ = wrap_layout("<<</body>", layout("Top Navigation"));
    let _ = wrap_layout("", layout("Top Navigation"));
}

// =============================================================
// Thumbnails
// =============================================================

#[test]
fn thumbnail_falls_back_to_skeleton() {
    let l = layout("Glass Command");
    let out = thumbnail_document(None, l);
    assert!(out.contains("glass-sidebar"));
    assert!(out.contains("overflow: hidden"));
    assert_eq!(layout_container_depth(&out), 1);
}

#[test]
fn thumbnail_prefers_focused_artifact_html() {
    let out = thumbnail_document(Some(SOURCE), layout(DEFAULT_LAYOUT));
    assert!(out.contains("<main class=\"card\">42</main>"));
    assert!(!out.contains("dash-sidebar"));
}
