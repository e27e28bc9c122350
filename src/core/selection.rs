//! Provider/model selection
//!
//! Encodes the dependency between the provider choice and the rest of the
//! configuration surface: the model list follows the provider, and the
//! API-key input is only shown for providers that need one. Transitions are
//! purely in-memory; nothing persists until an explicit save.

use std::error::Error;
use std::fmt;

use crate::core::catalog::ProviderCatalog;
use crate::core::constants::KEYLESS_PROVIDER_ID;
use crate::core::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectionState {
    NoProvider,
    Provider(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The requested provider id is not in the catalog.
    UnknownProvider(String),
    /// A model was chosen while no provider is selected.
    NoProviderSelected,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::UnknownProvider(id) => write!(f, "unknown provider '{id}'"),
            SelectionError::NoProviderSelected => write!(f, "no provider selected"),
        }
    }
}

impl Error for SelectionError {}

#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    model: Option<String>,
    model_choices: Vec<String>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            state: SelectionState::NoProvider,
            model: None,
            model_choices: Vec::new(),
        }
    }

    /// Switch providers. An empty id deselects; a known id repopulates the
    /// model choices from the catalog; an unknown id fails, leaving the
    /// model choices empty rather than stale.
    pub fn select_provider(
        &mut self,
        catalog: &ProviderCatalog,
        provider_id: &str,
    ) -> Result<(), SelectionError> {
        self.model = None;
        self.model_choices.clear();

        if provider_id.is_empty() {
            self.state = SelectionState::NoProvider;
            return Ok(());
        }

        match catalog.get(provider_id) {
            Some(provider) => {
                self.state = SelectionState::Provider(provider.id.clone());
                self.model_choices = provider.models.clone();
                Ok(())
            }
            None => {
                self.state = SelectionState::NoProvider;
                Err(SelectionError::UnknownProvider(provider_id.to_string()))
            }
        }
    }

    /// Choose a model. Only permitted while a provider is selected. The name
    /// is accepted as given, without checking it against the choice list.
    pub fn select_model(&mut self, name: impl Into<String>) -> Result<(), SelectionError> {
        match self.state {
            SelectionState::Provider(_) => {
                self.model = Some(name.into());
                Ok(())
            }
            SelectionState::NoProvider => Err(SelectionError::NoProviderSelected),
        }
    }

    /// Replay the selection-dependency logic for previously saved settings:
    /// re-select the stored provider (repopulating the model choices and the
    /// key visibility) and then re-apply the stored model.
    pub fn restore(
        &mut self,
        catalog: &ProviderCatalog,
        settings: &Settings,
    ) -> Result<(), SelectionError> {
        self.select_provider(catalog, &settings.provider)?;
        if !settings.provider.is_empty() && !settings.model.is_empty() {
            self.select_model(settings.model.clone())?;
        }
        Ok(())
    }

    pub fn provider(&self) -> Option<&str> {
        match &self.state {
            SelectionState::Provider(id) => Some(id),
            SelectionState::NoProvider => None,
        }
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn model_choices(&self) -> &[String] {
        &self.model_choices
    }

    /// The model choice surface is only enabled while a provider is
    /// selected.
    pub fn models_enabled(&self) -> bool {
        matches!(self.state, SelectionState::Provider(_))
    }

    /// Whether the API-key input should be shown. Hidden with no provider,
    /// and hidden for the keyless local-inference provider.
    pub fn api_key_visible(&self) -> bool {
        match &self.state {
            SelectionState::Provider(id) => !id.eq_ignore_ascii_case(KEYLESS_PROVIDER_ID),
            SelectionState::NoProvider => false,
        }
    }
}
