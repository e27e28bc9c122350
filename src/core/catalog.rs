//! Provider catalog
//!
//! The set of providers (and their model lists) the gateway currently
//! exposes. Fetched once at application start; immutable for the rest of the
//! session.

use crate::api::client::fetch_catalog;
use crate::api::ProviderEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub id: String,
    pub display_name: String,
    pub models: Vec<String>,
}

/// Whether the startup fetch reached the gateway. A failed fetch leaves the
/// catalog empty; callers branch on this instead of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAvailability {
    Ready,
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    providers: Vec<Provider>,
    availability: CatalogAvailability,
}

impl ProviderCatalog {
    /// Fetch the provider list from the gateway. Load failures are logged
    /// and yield an empty, unavailable catalog; they are never surfaced in
    /// the chat transcript.
    pub async fn load(client: &reqwest::Client, base_url: &str) -> Self {
        match fetch_catalog(client, base_url).await {
            Ok(entries) => Self::from_entries(entries),
            Err(e) => {
                tracing::warn!("failed to load provider catalog from {base_url}: {e}");
                Self::unavailable()
            }
        }
    }

    pub fn from_entries(entries: Vec<ProviderEntry>) -> Self {
        let providers = entries
            .into_iter()
            .map(|entry| Provider {
                id: entry.provider,
                display_name: entry.name,
                models: entry.models,
            })
            .collect();
        Self {
            providers,
            availability: CatalogAvailability::Ready,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            providers: Vec::new(),
            availability: CatalogAvailability::Unavailable,
        }
    }

    pub fn availability(&self) -> CatalogAvailability {
        self.availability
    }

    pub fn is_unavailable(&self) -> bool {
        self.availability == CatalogAvailability::Unavailable
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Ordered `(id, display_name)` pairs for populating a choice surface.
    pub fn provider_names(&self) -> Vec<(&str, &str)> {
        self.providers
            .iter()
            .map(|p| (p.id.as_str(), p.display_name.as_str()))
            .collect()
    }

    pub fn get(&self, provider_id: &str) -> Option<&Provider> {
        self.providers
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(provider_id))
    }

    /// Ordered model identifiers for a known provider; empty for an unknown
    /// id.
    pub fn models_for(&self, provider_id: &str) -> &[String] {
        self.get(provider_id).map(|p| p.models.as_slice()).unwrap_or(&[])
    }
}
