//! Wire payloads for the inference gateway's HTTP contract.

use serde::{Deserialize, Serialize};

/// One entry in the gateway's `GET /api/models` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    pub provider: String,
    pub name: String,
    #[serde(default)]
    pub models: Vec<String>,
}

/// Body of a `POST /api/chat` request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub provider: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Body of a `POST /api/chat` response. The gateway answers with exactly one
/// of the two fields set; a body carrying neither is malformed.
#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub response: Option<String>,
    pub error: Option<String>,
}

pub mod client;
