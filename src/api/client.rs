//! HTTP client for the inference gateway.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::error::Error;
use std::fmt;

use crate::api::{ChatReply, ChatRequest, ProviderEntry};
use crate::core::dispatcher::{ChatBackend, ChatOutcome};
use crate::utils::url::construct_api_url;

/// Transport-level failure talking to the gateway: the request never
/// completed, the status carried no structured error, or the body matched
/// neither reply shape.
#[derive(Debug)]
pub enum BackendError {
    Request(reqwest::Error),
    Status { status: StatusCode, body: String },
    MalformedBody,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Request(source) => write!(f, "request failed: {source}"),
            BackendError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "API request failed with status {status}")
                } else {
                    write!(f, "API request failed with status {status}: {body}")
                }
            }
            BackendError::MalformedBody => write!(f, "unexpected response from the gateway"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BackendError::Request(source) => Some(source),
            _ => None,
        }
    }
}

/// Fetch the provider catalog from the gateway.
pub async fn fetch_catalog(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<ProviderEntry>, BackendError> {
    let models_url = construct_api_url(base_url, "api/models");
    let response = client
        .get(models_url)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(BackendError::Request)?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Status { status, body });
    }

    response
        .json::<Vec<ProviderEntry>>()
        .await
        .map_err(BackendError::Request)
}

/// The gateway-backed chat transport used outside of tests.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatOutcome, BackendError> {
        let chat_url = construct_api_url(&self.base_url, "api/chat");
        let response = self
            .client
            .post(chat_url)
            .json(request)
            .send()
            .await
            .map_err(BackendError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(BackendError::Request)?;

        // The gateway reports provider failures as a structured `error`
        // field, sometimes on a non-2xx status. Parse before judging the
        // status so those still surface as reported errors.
        let reply: ChatReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => return Err(BackendError::Status { status, body }),
            Err(_) => return Err(BackendError::MalformedBody),
        };

        if let Some(error) = reply.error {
            return Ok(ChatOutcome::Error(error));
        }

        match reply.response {
            Some(text) if status.is_success() => Ok(ChatOutcome::Reply(text)),
            _ if !status.is_success() => Err(BackendError::Status { status, body }),
            _ => Err(BackendError::MalformedBody),
        }
    }
}
