use crate::core::settings::data::Settings;

impl Settings {
    pub fn print_all(&self) {
        println!("Current settings:");
        if self.provider.is_empty() {
            println!("  provider: (unset)");
        } else {
            println!("  provider: {}", self.provider);
        }
        if self.model.is_empty() {
            println!("  model: (unset)");
        } else {
            println!("  model: {}", self.model);
        }
        // Never echo the key itself.
        if self.api_key.is_empty() {
            println!("  api-key: (unset)");
        } else {
            println!("  api-key: (set)");
        }
        println!("  temperature: {}", self.temperature);
        println!("  max-tokens: {}", self.max_tokens);
    }
}
