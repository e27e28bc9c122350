//! Model listing functionality
//!
//! This module handles listing the models the gateway exposes for a
//! provider.

use std::error::Error;

use crate::core::catalog::ProviderCatalog;
use crate::core::settings::Settings;

pub async fn list_models(base_url: &str, provider: Option<String>) -> Result<(), Box<dyn Error>> {
    let settings = Settings::load();

    let provider_id = match provider {
        Some(provider_id) => provider_id,
        None if !settings.provider.is_empty() => settings.provider.clone(),
        None => {
            return Err(
                "No provider configured. Pass one ('causette models <provider>') or run 'causette setup'."
                    .into(),
            )
        }
    };

    let client = reqwest::Client::new();
    let catalog = ProviderCatalog::load(&client, base_url).await;

    if catalog.is_unavailable() {
        return Err(format!("The gateway at {base_url} is unreachable.").into());
    }

    let Some(provider) = catalog.get(&provider_id) else {
        return Err(format!(
            "Unknown provider '{provider_id}'. Run 'causette providers' to see what the gateway exposes."
        )
        .into());
    };

    println!("🤖 Available Models for {}", provider.display_name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    if provider.id.eq_ignore_ascii_case(&settings.provider) && !settings.model.is_empty() {
        println!("🎯 Configured model for this provider: {}", settings.model);
        println!();
    }

    if provider.models.is_empty() {
        println!("No models found for this provider.");
        return Ok(());
    }

    println!("Found {} models:", provider.models.len());
    println!();
    for model in &provider.models {
        println!("  • {model}");
    }

    Ok(())
}
