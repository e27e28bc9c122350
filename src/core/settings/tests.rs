use super::data::{
    clamp_max_tokens, clamp_temperature, Settings, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
use std::fs;
use tempfile::TempDir;

fn configured_settings() -> Settings {
    Settings {
        provider: "openai".to_string(),
        model: "gpt-4".to_string(),
        api_key: "sk-test".to_string(),
        temperature: 0.3,
        max_tokens: 1500,
    }
}

#[test]
fn save_then_load_round_trips() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");

    let settings = configured_settings();
    settings.save_to_path(&path).expect("Failed to save settings");

    assert_eq!(Settings::load_from_path(&path), settings);
}

#[test]
fn save_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");

    let settings = configured_settings();
    settings.save_to_path(&path).expect("first save failed");
    let first = fs::read_to_string(&path).expect("read failed");
    settings.save_to_path(&path).expect("second save failed");
    let second = fs::read_to_string(&path).expect("read failed");

    assert_eq!(first, second);
}

#[test]
fn save_replaces_the_previous_slot() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");

    configured_settings()
        .save_to_path(&path)
        .expect("save failed");

    let updated = Settings {
        model: "gpt-3.5-turbo".to_string(),
        ..configured_settings()
    };
    updated.save_to_path(&path).expect("save failed");

    assert_eq!(Settings::load_from_path(&path).model, "gpt-3.5-turbo");
}

#[test]
fn load_missing_slot_yields_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("nonexistent.json");

    let settings = Settings::load_from_path(&path);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
    assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
}

#[test]
fn load_malformed_slot_yields_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, "{ this is not json").expect("write failed");

    assert_eq!(Settings::load_from_path(&path), Settings::default());
}

#[test]
fn missing_fields_default_individually() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, r#"{"provider": "ollama", "model": "llama3"}"#).expect("write failed");

    let settings = Settings::load_from_path(&path);
    assert_eq!(settings.provider, "ollama");
    assert_eq!(settings.model, "llama3");
    assert!(settings.api_key.is_empty());
    assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
    assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
}

#[test]
fn unknown_fields_are_tolerated() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{"provider": "openai", "model": "gpt-4", "theme": "dark"}"#,
    )
    .expect("write failed");

    let settings = Settings::load_from_path(&path);
    assert_eq!(settings.provider, "openai");
    assert_eq!(settings.model, "gpt-4");
}

#[test]
fn provider_gates_the_configured_state() {
    let mut settings = configured_settings();
    assert!(settings.is_configured());

    // A stored model without a provider counts as not configured.
    settings.provider.clear();
    assert!(!settings.is_configured());

    let mut settings = configured_settings();
    settings.model.clear();
    assert!(!settings.is_configured());
}

#[test]
fn clamp_helpers_pin_values_to_the_accepted_ranges() {
    assert_eq!(clamp_temperature(-0.5), 0.0);
    assert_eq!(clamp_temperature(0.7), 0.7);
    assert_eq!(clamp_temperature(1.7), 1.0);

    assert_eq!(clamp_max_tokens(50), 100);
    assert_eq!(clamp_max_tokens(2000), 2000);
    assert_eq!(clamp_max_tokens(100_000), 4000);
}
