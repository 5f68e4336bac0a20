use super::*;
use crate::util::persistence::MemoryStore;

#[test]
fn defaults_match_first_run_experience() {
    let settings = GenerationSettings::default();
    assert_eq!(settings.framework, Framework::Vanilla);
    assert!(settings.data_context.is_empty());
    assert!(!settings.auto_a11y);
    assert!(settings.auto_charts);
    assert!(settings.auto_personas);
}

#[test]
fn framework_ids_round_trip() {
    for framework in Framework::ALL {
        assert_eq!(Framework::from_id(framework.id()), Some(framework));
    }
    assert_eq!(Framework::from_id("svelte"), None);
    assert_eq!(serde_json::to_value(Framework::ReactMui).expect("json"), "react-mui");
}

#[test]
fn load_falls_back_to_defaults() {
    assert_eq!(GenerationSettings::load(&MemoryStore::default()), GenerationSettings::default());
    let corrupt = MemoryStore::with_entry(SETTINGS_KEY, "[1,2");
    assert_eq!(GenerationSettings::load(&corrupt), GenerationSettings::default());
}

#[test]
fn load_fills_missing_fields_from_defaults() {
    let store = MemoryStore::with_entry(SETTINGS_KEY, r#"{"framework":"bootstrap","autoCharts":false}"#);
    let settings = GenerationSettings::load(&store);
    assert_eq!(settings.framework, Framework::Bootstrap);
    assert!(!settings.auto_charts);
    assert!(settings.auto_personas);
}

#[test]
fn save_then_load() {
    let store = MemoryStore::default();
    let settings = GenerationSettings {
        framework: Framework::Tailwind,
        data_context: "ARR by region".to_owned(),
        ..GenerationSettings::default()
    };
    settings.save(&store).expect("save");
    assert_eq!(GenerationSettings::load(&store), settings);
    let raw = store.get(SETTINGS_KEY).expect("stored");
    assert!(raw.contains("\"dataContext\":\"ARR by region\""));
    assert!(!raw.contains("apiKey"));
}

#[test]
fn toggles_flip_flags_and_directives() {
    let mut settings = GenerationSettings::default();
    assert_eq!(settings.enhancement_directives().len(), 2);
    settings.toggle(SettingToggle::A11y);
    settings.toggle(SettingToggle::Charts);
    assert!(settings.auto_a11y);
    assert!(!settings.auto_charts);
    let directives = settings.enhancement_directives();
    assert_eq!(directives.len(), 2);
    assert!(directives[0].contains("WCAG"));
}
