use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 1.0;
pub const MIN_MAX_TOKENS: u32 = 100;
pub const MAX_MAX_TOKENS: u32 = 4000;

/// The persisted generation configuration. One value, one persisted slot;
/// mutated only by an explicit save from a configuration surface.
///
/// Unknown fields in the persisted slot are ignored and missing ones default
/// individually, so older files keep loading as the shape grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: String::new(),
            model: String::new(),
            api_key: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Settings {
    /// An empty provider means the dependent fields are not yet configured,
    /// whatever the stored values say.
    pub fn is_configured(&self) -> bool {
        !self.provider.is_empty() && !self.model.is_empty()
    }
}

/// Clamp a temperature to the accepted sampling range. Clamping is the input
/// surface's job; the store persists whatever it is handed.
pub fn clamp_temperature(value: f64) -> f64 {
    value.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

/// Clamp a token budget to the accepted range.
pub fn clamp_max_tokens(value: i64) -> u32 {
    value.clamp(MIN_MAX_TOKENS as i64, MAX_MAX_TOKENS as i64) as u32
}
