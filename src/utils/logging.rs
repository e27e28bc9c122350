//! Opt-in plain-text chat log
//!
//! Mirrors transcript entries to a file as they are rendered. The log is
//! write-only; it is never read back into a session.

use crate::core::transcript::{Message, Role};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        // A file given on the command line enables logging immediately.
        let is_active = log_file.is_some();
        let logging = LoggingState {
            file_path: log_file,
            is_active,
        };

        if logging.is_active {
            logging.test_file_access()?;
        }

        Ok(logging)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Append one transcript entry: user turns with a prefix, assistant
    /// turns verbatim, system turns as comments.
    pub fn log_turn(&self, message: &Message) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active || self.file_path.is_none() {
            return Ok(());
        }

        let content = match message.role {
            Role::User => format!("You: {}", message.content),
            Role::Assistant => message.content.clone(),
            Role::System => format!("## {}", message.content),
        };
        self.write_to_log(&content)
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            (Some(path), false) => format!(
                "paused ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }

    fn write_to_log(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let file_path = self.file_path.as_ref().unwrap();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        // Write each line of content, preserving the exact formatting
        for line in content.lines() {
            writeln!(file, "{line}")?;
        }

        // Empty line after each message for spacing (matching screen display)
        writeln!(file)?;

        file.flush()?;
        Ok(())
    }

    fn test_file_access(&self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(path) = self.file_path.as_ref() else {
            return Ok(());
        };
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn logging_is_disabled_without_a_file() {
        let logging = LoggingState::new(None).unwrap();
        assert!(!logging.is_active());
        assert_eq!(logging.get_status_string(), "disabled");
        // A no-op; nothing to write to.
        logging.log_turn(&Message::user("hi")).unwrap();
    }

    #[test]
    fn turns_are_appended_with_role_formatting() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.to_string_lossy().into_owned())).unwrap();

        logging.log_turn(&Message::user("hello")).unwrap();
        logging.log_turn(&Message::assistant("hi there")).unwrap();
        logging
            .log_turn(&Message::system("Error: rate limited"))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "You: hello\n\nhi there\n\n## Error: rate limited\n\n");
    }
}
