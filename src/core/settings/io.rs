use crate::core::settings::data::Settings;
use directories::ProjectDirs;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get a user-friendly display string for a path, using ~ notation on
/// Unix-like systems when possible.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Settings {
    /// Read the persisted slot. An absent or malformed slot yields the
    /// defaults; the caller never sees a failure, only a diagnostic log.
    pub fn load_from_path(path: &Path) -> Settings {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                tracing::warn!("failed to read settings at {}: {e}", path_display(path));
                return Settings::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    "ignoring malformed settings at {}: {e}",
                    path_display(path)
                );
                Settings::default()
            }
        }
    }

    /// Replace the persisted slot with this value. The write goes through a
    /// temp file in the same directory so a crash never leaves a torn slot.
    pub fn save_to_path(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(path)
            .map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
        Ok(())
    }

    pub fn load() -> Settings {
        Self::load_from_path(&Self::settings_path())
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        self.save_to_path(&Self::settings_path())
    }

    pub fn settings_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "causette")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("settings.json")
    }
}
