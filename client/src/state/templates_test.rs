use super::*;
use crate::util::html_fragments;

#[test]
fn template_ids_are_unique_and_findable() {
    for template in &TEMPLATES {
        assert_eq!(find_template(template.id).map(|t| t.name), Some(template.name));
    }
    assert!(find_template("missing").is_none());
}

#[test]
fn category_filter() {
    assert_eq!(templates_in(None).len(), TEMPLATES.len());
    let admin: Vec<&str> = templates_in(Some(TemplateCategory::Admin)).iter().map(|t| t.id).collect();
    assert_eq!(admin, vec!["server-monitoring"]);
    assert!(templates_in(Some(TemplateCategory::Iot)).is_empty());
}

#[test]
fn templates_are_complete_documents() {
    for template in &TEMPLATES {
        let parts = html_fragments::extract(template.html);
        assert!(!parts.body.is_empty(), "{}", template.id);
        assert_eq!(parts.styles.len(), 1, "{}", template.id);
    }
}

#[test]
fn templates_keep_their_placeholder_links_and_closing_tag() {
    let saas = find_template("saas-analytics").map(|t| t.html).unwrap_or_default();
    assert!(saas.contains(r##"<a href="#" class="active">Overview</a>"##));
    for template in &TEMPLATES {
        assert!(template.html.trim_end().ends_with("</html>"), "{}", template.id);
    }
}
