//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the
//! appropriate commands.

pub mod model_list;
pub mod provider_list;
pub mod say;
pub mod setup;

use std::env;
use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::model_list::list_models;
use crate::cli::provider_list::list_providers;
use crate::cli::say::run_say;
use crate::cli::setup::run_setup;
use crate::core::catalog::ProviderCatalog;
use crate::core::constants::{BASE_URL_ENV_VAR, DEFAULT_BASE_URL};
use crate::core::selection::SelectionController;
use crate::core::settings::data::{
    clamp_max_tokens, clamp_temperature, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
use crate::core::settings::Settings;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "causette")]
#[command(about = "A terminal chat client for a multi-provider AI inference gateway")]
#[command(
    long_about = "Causette is a full-screen terminal chat client that connects to a \
multi-provider AI inference gateway for request/response conversations. The gateway \
decides which providers and models are available; causette remembers your choice and \
generation parameters between runs.\n\n\
Configuration:\n\
  Run 'causette setup' to pick a provider and model interactively, or use\n\
  'causette set <key> <value>' for single edits.\n\n\
Environment Variables:\n\
  CAUSETTE_BASE_URL   Gateway base URL (optional, defaults to http://127.0.0.1:5001)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Gateway base URL (overrides CAUSETTE_BASE_URL)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// List the providers the gateway currently exposes
    Providers,
    /// List models for a provider
    Models {
        /// Provider to list models for (defaults to the configured one)
        provider: Option<String>,
    },
    /// Interactively choose a provider, model, and generation parameters
    Setup,
    /// Send a single message and print the reply
    Say {
        /// The message to send
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Settings key to set
        key: String,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Settings key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn resolve_base_url(flag: Option<String>) -> String {
    flag.or_else(|| env::var(BASE_URL_ENV_VAR).ok())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let base_url = resolve_base_url(args.base_url);

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(base_url, args.log).await,
        Commands::Providers => list_providers(&base_url).await,
        Commands::Models { provider } => list_models(&base_url, provider).await,
        Commands::Setup => run_setup(&base_url).await,
        Commands::Say { message } => run_say(&base_url, message).await,
        Commands::Set { key, value } => set_value(&base_url, &key, value).await,
        Commands::Unset { key } => unset_value(&key),
    }
}

async fn set_value(
    base_url: &str,
    key: &str,
    value: Option<Vec<String>>,
) -> Result<(), Box<dyn Error>> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        // `set` without a value prints the current settings.
        Settings::load().print_all();
        return Ok(());
    };
    let value = value.join(" ");

    let mut settings = Settings::load();
    match key {
        "provider" => {
            // Changing providers goes through the selection rules so the
            // dependent model can never go stale.
            let client = reqwest::Client::new();
            let catalog = ProviderCatalog::load(&client, base_url).await;
            if catalog.is_unavailable() {
                return Err(format!(
                    "The gateway at {base_url} is unreachable; its provider catalog is needed to validate the provider."
                )
                .into());
            }

            let mut selection = SelectionController::new();
            selection.select_provider(&catalog, &value)?;

            settings.provider = selection.provider().unwrap_or_default().to_string();
            settings.model.clear();
            settings.save()?;
            println!("✅ Set provider to: {value}");
            println!("   Model cleared; pick one with 'causette set model <name>'");
        }
        "model" => {
            if settings.provider.is_empty() {
                return Err(
                    "No provider configured. Run 'causette set provider <id>' first.".into(),
                );
            }
            settings.model = value.clone();
            settings.save()?;
            println!("✅ Set model to: {value}");
        }
        "api-key" => {
            settings.api_key = value;
            settings.save()?;
            println!("✅ Set api-key");
        }
        "temperature" => {
            let parsed: f64 = value
                .parse()
                .map_err(|_| format!("Invalid temperature: {value}"))?;
            settings.temperature = clamp_temperature(parsed);
            settings.save()?;
            println!("✅ Set temperature to: {}", settings.temperature);
        }
        "max-tokens" => {
            let parsed: i64 = value
                .parse()
                .map_err(|_| format!("Invalid max-tokens: {value}"))?;
            settings.max_tokens = clamp_max_tokens(parsed);
            settings.save()?;
            println!("✅ Set max-tokens to: {}", settings.max_tokens);
        }
        _ => {
            eprintln!("❌ Unknown settings key: {key}");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn unset_value(key: &str) -> Result<(), Box<dyn Error>> {
    let mut settings = Settings::load();
    match key {
        "provider" => {
            settings.provider.clear();
            settings.model.clear();
            settings.save()?;
            println!("✅ Unset provider (and its dependent model)");
        }
        "model" => {
            settings.model.clear();
            settings.save()?;
            println!("✅ Unset model");
        }
        "api-key" => {
            settings.api_key.clear();
            settings.save()?;
            println!("✅ Unset api-key");
        }
        "temperature" => {
            settings.temperature = DEFAULT_TEMPERATURE;
            settings.save()?;
            println!("✅ Reset temperature to: {DEFAULT_TEMPERATURE}");
        }
        "max-tokens" => {
            settings.max_tokens = DEFAULT_MAX_TOKENS;
            settings.save()?;
            println!("✅ Reset max-tokens to: {DEFAULT_MAX_TOKENS}");
        }
        _ => {
            eprintln!("❌ Unknown settings key: {key}");
            std::process::exit(1);
        }
    }
    Ok(())
}
