//! Provider listing
//!
//! Prints the providers the gateway currently exposes, marking the one the
//! saved settings point at.

use std::error::Error;

use crate::core::catalog::ProviderCatalog;
use crate::core::constants::KEYLESS_PROVIDER_ID;
use crate::core::settings::Settings;

pub async fn list_providers(base_url: &str) -> Result<(), Box<dyn Error>> {
    let client = reqwest::Client::new();
    let catalog = ProviderCatalog::load(&client, base_url).await;

    if catalog.is_unavailable() {
        println!("The gateway's provider catalog is unavailable.");
        println!("Check that the gateway is running at {base_url}.");
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No providers configured on the gateway.");
        return Ok(());
    }

    let settings = Settings::load();

    println!("Available Providers:");
    println!();
    for provider in catalog.providers() {
        let provider_id = if provider.id.eq_ignore_ascii_case(&settings.provider)
            && !settings.provider.is_empty()
        {
            format!("{}*", provider.id)
        } else {
            provider.id.clone()
        };

        let key_note = if provider.id.eq_ignore_ascii_case(KEYLESS_PROVIDER_ID) {
            " - no API key required"
        } else {
            ""
        };

        println!(
            "  {} ({} models) - {}{}",
            provider_id,
            provider.models.len(),
            provider.display_name,
            key_note
        );
    }

    if !settings.provider.is_empty() {
        println!();
        println!("* = configured provider");
    }

    Ok(())
}
