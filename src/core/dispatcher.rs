//! Outgoing chat turns
//!
//! Turns a user utterance plus the persisted settings into one gateway
//! request and routes the reply or failure back into the transcript. Every
//! accepted send appends a `user` turn and then exactly one follow-up turn
//! (`assistant` on success, `system` otherwise), in resolution order.

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::api::client::BackendError;
use crate::api::ChatRequest;
use crate::core::settings::Settings;
use crate::core::transcript::{Message, Transcript};

/// What the gateway said for a chat turn that completed an HTTP exchange:
/// either a reply, or a structured error it reported on the provider's
/// behalf. Reported errors are non-fatal and land in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Reply(String),
    Error(String),
}

/// The transport seam. The gateway-backed implementation lives in
/// [`crate::api::client::HttpBackend`]; tests substitute their own.
#[async_trait]
pub trait ChatBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatOutcome, BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The utterance was empty or whitespace; nothing was appended.
    EmptyMessage,
    /// The persisted settings lack a provider or model; one `system` turn
    /// was appended.
    NotConfigured,
    /// A send is already in flight; nothing was appended.
    Busy,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::EmptyMessage => write!(f, "nothing to send"),
            DispatchError::NotConfigured => write!(f, "no provider and model configured"),
            DispatchError::Busy => write!(f, "a message is already in flight"),
        }
    }
}

impl Error for DispatchError {}

pub struct MessageDispatcher<B> {
    backend: B,
    in_flight: bool,
}

impl<B: ChatBackend> MessageDispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Stage an outbound turn: validate, append the `user` message, and mark
    /// the dispatcher busy. Returns the wire request for the caller to run;
    /// the caller must hand its outcome back through [`Self::finish`].
    ///
    /// The settings are read here, at the moment of sending; unsaved edits
    /// on a configuration surface never leak into a request.
    pub fn begin(
        &mut self,
        text: &str,
        settings: &Settings,
        transcript: &mut Transcript,
    ) -> Result<ChatRequest, DispatchError> {
        if self.in_flight {
            return Err(DispatchError::Busy);
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(DispatchError::EmptyMessage);
        }

        if !settings.is_configured() {
            transcript.append(Message::system(
                "No provider and model configured. Run 'causette setup' to choose them.",
            ));
            return Err(DispatchError::NotConfigured);
        }

        transcript.append(Message::user(text));
        self.in_flight = true;

        Ok(ChatRequest {
            message: text.to_string(),
            provider: settings.provider.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    /// Resolve a staged turn: append the terminal message and clear the
    /// in-flight flag. Reported errors and transport failures both land as
    /// `system` turns; neither is fatal.
    pub fn finish(
        &mut self,
        outcome: Result<ChatOutcome, BackendError>,
        transcript: &mut Transcript,
    ) {
        self.in_flight = false;
        let message = match outcome {
            Ok(ChatOutcome::Reply(text)) => Message::assistant(text),
            Ok(ChatOutcome::Error(error)) => Message::system(format!("Error: {error}")),
            Err(e) => Message::system(format!("Error: {e}")),
        };
        transcript.append(message);
    }

    /// One-call send for non-interactive surfaces: stage, run the backend
    /// exchange, resolve.
    pub async fn send(
        &mut self,
        text: &str,
        settings: &Settings,
        transcript: &mut Transcript,
    ) -> Result<(), DispatchError> {
        let request = self.begin(text, settings, transcript)?;
        let outcome = self.backend.chat(&request).await;
        self.finish(outcome, transcript);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    enum Scripted {
        Reply(&'static str),
        Error(&'static str),
        Transport,
    }

    struct MockBackend {
        script: Scripted,
        calls: Arc<AtomicUsize>,
        last_request: Arc<Mutex<Option<ChatRequest>>>,
    }

    impl MockBackend {
        fn new(script: Scripted) -> Self {
            Self {
                script,
                calls: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for MockBackend {
        async fn chat(&self, request: &ChatRequest) -> Result<ChatOutcome, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.script {
                Scripted::Reply(text) => Ok(ChatOutcome::Reply(text.to_string())),
                Scripted::Error(error) => Ok(ChatOutcome::Error(error.to_string())),
                Scripted::Transport => Err(BackendError::MalformedBody),
            }
        }
    }

    fn configured_settings() -> Settings {
        Settings {
            provider: "ollama".to_string(),
            model: "llama3".to_string(),
            ..Default::default()
        }
    }

    fn roles(transcript: &Transcript) -> Vec<Role> {
        transcript.messages().iter().map(|m| m.role).collect()
    }

    #[tokio::test]
    async fn accepted_send_appends_user_then_assistant() {
        let mut dispatcher = MessageDispatcher::new(MockBackend::new(Scripted::Reply("hello!")));
        let mut transcript = Transcript::new();

        dispatcher
            .send("hi", &configured_settings(), &mut transcript)
            .await
            .unwrap();

        assert_eq!(roles(&transcript), [Role::User, Role::Assistant]);
        assert_eq!(transcript.last().unwrap().content, "hello!");
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn request_carries_the_persisted_settings() {
        let backend = MockBackend::new(Scripted::Reply("ok"));
        let last_request = backend.last_request.clone();
        let mut dispatcher = MessageDispatcher::new(backend);
        let mut transcript = Transcript::new();

        dispatcher
            .send("hello", &configured_settings(), &mut transcript)
            .await
            .unwrap();

        let request = last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.message, "hello");
        assert_eq!(request.provider, "ollama");
        assert_eq!(request.model, "llama3");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 2000);
    }

    #[tokio::test]
    async fn reported_error_lands_as_a_system_turn() {
        let mut dispatcher =
            MessageDispatcher::new(MockBackend::new(Scripted::Error("rate limited")));
        let mut transcript = Transcript::new();

        dispatcher
            .send("hi", &configured_settings(), &mut transcript)
            .await
            .unwrap();

        assert_eq!(roles(&transcript), [Role::User, Role::System]);
        assert_eq!(transcript.last().unwrap().content, "Error: rate limited");
    }

    #[tokio::test]
    async fn transport_failure_lands_as_a_system_turn() {
        let mut dispatcher = MessageDispatcher::new(MockBackend::new(Scripted::Transport));
        let mut transcript = Transcript::new();

        dispatcher
            .send("hi", &configured_settings(), &mut transcript)
            .await
            .unwrap();

        assert_eq!(roles(&transcript), [Role::User, Role::System]);
        assert!(transcript.last().unwrap().content.starts_with("Error:"));
    }

    #[tokio::test]
    async fn blank_text_appends_nothing_and_calls_nothing() {
        let backend = MockBackend::new(Scripted::Reply("unused"));
        let calls = backend.calls.clone();
        let mut dispatcher = MessageDispatcher::new(backend);
        let mut transcript = Transcript::new();

        for text in ["", "   ", "\n\t"] {
            let err = dispatcher
                .send(text, &configured_settings(), &mut transcript)
                .await
                .unwrap_err();
            assert_eq!(err, DispatchError::EmptyMessage);
        }

        assert!(transcript.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unconfigured_send_appends_one_system_turn_and_calls_nothing() {
        let backend = MockBackend::new(Scripted::Reply("unused"));
        let calls = backend.calls.clone();
        let mut dispatcher = MessageDispatcher::new(backend);
        let mut transcript = Transcript::new();

        let err = dispatcher
            .send("hello", &Settings::default(), &mut transcript)
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::NotConfigured);
        assert_eq!(roles(&transcript), [Role::System]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn model_without_provider_counts_as_unconfigured() {
        let backend = MockBackend::new(Scripted::Reply("unused"));
        let calls = backend.calls.clone();
        let mut dispatcher = MessageDispatcher::new(backend);
        let mut transcript = Transcript::new();

        let settings = Settings {
            model: "llama3".to_string(),
            ..Default::default()
        };
        let err = dispatcher
            .send("hello", &settings, &mut transcript)
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::NotConfigured);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn overlapping_sends_are_rejected_while_in_flight() {
        let mut dispatcher = MessageDispatcher::new(MockBackend::new(Scripted::Reply("ok")));
        let mut transcript = Transcript::new();
        let settings = configured_settings();

        dispatcher
            .begin("first", &settings, &mut transcript)
            .unwrap();
        assert!(dispatcher.is_busy());

        let err = dispatcher
            .begin("second", &settings, &mut transcript)
            .unwrap_err();
        assert_eq!(err, DispatchError::Busy);
        // Only the first turn's user message is in the transcript.
        assert_eq!(roles(&transcript), [Role::User]);

        dispatcher.finish(Ok(ChatOutcome::Reply("done".to_string())), &mut transcript);
        assert!(!dispatcher.is_busy());
        assert!(dispatcher
            .begin("third", &settings, &mut transcript)
            .is_ok());
    }
}
