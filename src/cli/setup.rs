//! Interactive configuration
//!
//! This module handles the interactive selection of a provider, model, API
//! key, and generation parameters, saved as one settings value at the end.

use std::error::Error;
use std::io::{self, Write};

use crate::core::catalog::ProviderCatalog;
use crate::core::selection::SelectionController;
use crate::core::settings::data::{clamp_max_tokens, clamp_temperature};
use crate::core::settings::io::path_display;
use crate::core::settings::Settings;

pub async fn run_setup(base_url: &str) -> Result<(), Box<dyn Error>> {
    let client = reqwest::Client::new();
    let catalog = ProviderCatalog::load(&client, base_url).await;

    if catalog.is_unavailable() {
        return Err(format!(
            "The gateway at {base_url} is unreachable; start it and rerun 'causette setup'."
        )
        .into());
    }
    if catalog.is_empty() {
        return Err(
            "The gateway exposes no providers. Configure provider credentials on the gateway first."
                .into(),
        );
    }

    let settings = Settings::load();
    let mut selection = SelectionController::new();

    println!("Select a provider:");
    for (i, (id, display_name)) in catalog.provider_names().iter().enumerate() {
        println!("  {}. {} ({})", i + 1, display_name, id);
    }
    let choice = read_choice(catalog.providers().len())?;
    let provider_id = catalog.providers()[choice - 1].id.clone();
    selection.select_provider(&catalog, &provider_id)?;

    println!();
    println!("Select a model:");
    for (i, model) in selection.model_choices().iter().enumerate() {
        println!("  {}. {}", i + 1, model);
    }
    let choice = read_choice(selection.model_choices().len())?;
    let model = selection.model_choices()[choice - 1].clone();
    selection.select_model(model)?;

    // The key prompt follows the selection's visibility rule: the local
    // inference provider gets no prompt at all. A hidden or skipped prompt
    // keeps whatever key is already stored.
    let api_key = if selection.api_key_visible() {
        println!();
        let current = if settings.api_key.is_empty() {
            "none stored"
        } else {
            "blank keeps the stored one"
        };
        print!("API key ({current}): ");
        io::stdout().flush()?;
        let entered = read_line()?;
        if entered.is_empty() {
            settings.api_key.clone()
        } else {
            entered
        }
    } else {
        settings.api_key.clone()
    };

    println!();
    print!(
        "Temperature 0.0-1.0 (blank keeps {}): ",
        settings.temperature
    );
    io::stdout().flush()?;
    let temperature = match read_line()?.as_str() {
        "" => settings.temperature,
        entered => clamp_temperature(
            entered
                .parse()
                .map_err(|_| format!("Invalid temperature: {entered}"))?,
        ),
    };

    print!(
        "Max tokens 100-4000 (blank keeps {}): ",
        settings.max_tokens
    );
    io::stdout().flush()?;
    let max_tokens = match read_line()?.as_str() {
        "" => settings.max_tokens,
        entered => clamp_max_tokens(
            entered
                .parse()
                .map_err(|_| format!("Invalid max tokens: {entered}"))?,
        ),
    };

    let updated = Settings {
        provider: selection.provider().unwrap_or_default().to_string(),
        model: selection.model().unwrap_or_default().to_string(),
        api_key,
        temperature,
        max_tokens,
    };
    updated.save()?;

    println!();
    println!(
        "✅ Saved settings to {}",
        path_display(Settings::settings_path())
    );
    Ok(())
}

fn read_line() -> Result<String, Box<dyn Error>> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn read_choice(count: usize) -> Result<usize, Box<dyn Error>> {
    let choice: usize = read_line()?.parse().map_err(|_| "Invalid choice")?;

    if choice == 0 || choice > count {
        return Err("Invalid choice".into());
    }

    Ok(choice)
}
