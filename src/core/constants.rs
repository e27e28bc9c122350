//! Shared constants used across the application

/// Provider id for locally hosted inference. It is the one provider that
/// requires no API key, so configuration surfaces hide the key input for it.
pub const KEYLESS_PROVIDER_ID: &str = "ollama";

/// Where the gateway listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

/// Environment variable overriding the gateway base URL.
pub const BASE_URL_ENV_VAR: &str = "CAUSETTE_BASE_URL";
