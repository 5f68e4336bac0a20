use super::*;
use crate::state::artifacts::error_html;

fn artifact(status: ArtifactStatus, html: &str) -> Artifact {
    let mut artifact = Artifact::placeholder("s", 0, "Minimal");
    artifact.status = status;
    artifact.html = html.to_owned();
    artifact
}

// =============================================================
// Card body
// =============================================================

#[test]
fn empty_streaming_artifact_shows_loading() {
    let a = artifact(ArtifactStatus::Streaming, "  ");
    assert_eq!(card_body(Some(&a), "k".to_owned()), CardBody::Loading);
    assert_eq!(card_body(None, "k".to_owned()), CardBody::Loading);
}

#[test]
fn partial_html_previews_while_streaming() {
    let a = artifact(ArtifactStatus::Streaming, "<div>half");
    assert_eq!(card_body(Some(&a), "k".to_owned()), CardBody::Preview { key: "k".to_owned() });
}

#[test]
fn failed_artifact_renders_its_error_document_as_markup() {
    let a = artifact(ArtifactStatus::Error, &error_html("quota <exceeded>"));
    assert_eq!(card_body(Some(&a), "k".to_owned()), CardBody::Preview { key: "k".to_owned() });

    let doc = preview::compose(&a.html, None, &PreviewMode::default());
    assert_eq!(doc.matches("<strong>Generation failed</strong>").count(), 1);
    assert!(doc.contains("quota &lt;exceeded&gt;"));
    assert!(!doc.contains("&lt;strong&gt;"));
}
