use paperclip_core::{
    DEFAULT_PRIORITY, Provider, ProviderRecord, ProviderType, normalize_providers,
};

fn records(json: &str) -> Vec<ProviderRecord> {
    serde_json::from_str(json).expect("valid provider json")
}

#[test]
fn missing_fields_take_defaults() {
    let providers = normalize_providers(records(
        r#"[{"id": "main", "type": "openrouter", "api_key": "k"}]"#,
    ));
    let p = &providers[0];
    assert_eq!(p.id(), "main");
    assert_eq!(*p.priority(), DEFAULT_PRIORITY);
    assert!(*p.enabled());
    assert_eq!(*p.kind(), ProviderType::OpenRouter);
    assert!(p.model().is_none());
}

#[test]
fn id_falls_back_to_name_then_generated() {
    let providers = normalize_providers(records(
        r#"[{"name": "Named", "priority": 1}, {"id": "", "priority": 2}]"#,
    ));
    assert_eq!(providers[0].id(), "Named");
    let generated = providers[1].id();
    assert_eq!(generated.len(), 8);
    assert!(generated.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn sort_is_stable_by_ascending_priority() {
    let providers = normalize_providers(records(
        r#"[
            {"id": "a", "priority": 10},
            {"id": "b", "priority": 5},
            {"id": "c", "priority": 10},
            {"id": "d"}
        ]"#,
    ));
    let ids: Vec<&str> = providers.iter().map(|p| p.id().as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c", "d"]);
}

#[test]
fn repeated_ids_get_numeric_suffix_in_file_order() {
    let providers = normalize_providers(records(
        r#"[
            {"name": "free", "priority": 2},
            {"name": "free", "priority": 1},
            {"id": "free-2"},
            {"id": "free"}
        ]"#,
    ));
    let ids: Vec<&str> = providers.iter().map(|p| p.id().as_str()).collect();
    assert_eq!(ids, vec!["free-2", "free", "free-2-2", "free-3"]);
}

#[test]
fn fractional_and_string_priorities_are_accepted() {
    let providers = normalize_providers(records(
        r#"[
            {"id": "two", "priority": 2},
            {"id": "half", "priority": 1.5},
            {"id": "one", "priority": "1"},
            {"id": "junk", "priority": [3]}
        ]"#,
    ));
    let ids: Vec<&str> = providers.iter().map(|p| p.id().as_str()).collect();
    assert_eq!(ids, vec!["one", "half", "two", "junk"]);
    assert_eq!(*providers[1].priority(), 1.5);
    assert_eq!(*providers[3].priority(), DEFAULT_PRIORITY);
}

#[test]
fn non_boolean_enabled_counts_as_enabled() {
    let providers = normalize_providers(records(
        r#"[
            {"id": "yes", "enabled": "yes"},
            {"id": "zero", "enabled": 0},
            {"id": "null", "enabled": null},
            {"id": "off", "enabled": false}
        ]"#,
    ));
    let enabled: Vec<bool> = providers.iter().map(|p| *p.enabled()).collect();
    assert_eq!(enabled, vec![true, true, true, false]);
}

#[test]
fn disabled_flag_is_preserved() {
    let providers = normalize_providers(records(r#"[{"id": "off", "enabled": false}]"#));
    assert!(!*providers[0].enabled());
}

#[test]
fn gemini_detected_by_type_or_host() {
    let by_type = Provider::builder()
        .id("g")
        .kind(ProviderType::Gemini)
        .build()
        .unwrap();
    let by_host = Provider::builder()
        .id("h")
        .kind(ProviderType::Other("custom".to_string()))
        .base_url("https://generativelanguage.googleapis.com/v1beta")
        .build()
        .unwrap();
    let neither = Provider::builder().id("o").build().unwrap();
    assert!(by_type.is_gemini());
    assert!(by_host.is_gemini());
    assert!(!neither.is_gemini());
}

#[test]
fn preference_matches_type_and_optionally_id() {
    let p = Provider::builder()
        .id("My-Gemini-Backup")
        .kind(ProviderType::Other("custom".to_string()))
        .build()
        .unwrap();
    assert!(p.matches_preference("gemini", true));
    assert!(!p.matches_preference("gemini", false));
    assert!(p.matches_preference("CUSTOM", false));
    assert!(!p.matches_preference("", true));
}

#[test]
fn empty_model_counts_as_missing() {
    let p = Provider::builder().id("x").model("  ").build().unwrap();
    assert!(p.model_name().is_none());
}

#[test]
fn provider_type_round_trips_as_string() {
    let json = serde_json::to_string(&ProviderType::Other("groq".to_string())).unwrap();
    assert_eq!(json, "\"groq\"");
    let back: ProviderType = serde_json::from_str("\"GEMINI\"").unwrap();
    assert_eq!(back, ProviderType::Gemini);
}
