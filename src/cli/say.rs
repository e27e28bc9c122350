//! TUI-less "say" command

use std::error::Error;

use crate::api::client::HttpBackend;
use crate::core::dispatcher::{DispatchError, MessageDispatcher};
use crate::core::settings::Settings;
use crate::core::transcript::{Role, Transcript};

pub async fn run_say(base_url: &str, prompt: Vec<String>) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: causette say <message>");
        std::process::exit(1);
    }

    let settings = Settings::load();
    let client = reqwest::Client::new();
    let mut dispatcher = MessageDispatcher::new(HttpBackend::new(client, base_url));
    let mut transcript = Transcript::new();

    match dispatcher.send(&prompt, &settings, &mut transcript).await {
        Ok(()) => {}
        Err(DispatchError::NotConfigured) => {
            if let Some(msg) = transcript.last() {
                eprintln!("{}", msg.content);
            }
            std::process::exit(2);
        }
        Err(e) => return Err(Box::new(e)),
    }

    match transcript.last() {
        Some(msg) if msg.role == Role::Assistant => println!("{}", msg.content),
        Some(msg) => {
            eprintln!("❌ {}", msg.content);
            std::process::exit(1);
        }
        None => {}
    }

    Ok(())
}
