//! Saved session — persists the exported cookie string between runs.
//!
//! The file lives at `<config dir>/igweb/session.json`:
//!
//! ```json
//! { "cookies": "csrftoken=...; ds_user_id=...; sessionid=..." }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SavedSession {
    /// Cookie jar exported by `InstagramClient::cookie_string`.
    pub cookies: Option<String>,
}

impl SavedSession {
    /// Load the session file, or an empty session if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("corrupt session file {}", path.display()))
    }

    /// Save to disk, creating parent directories if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Delete the session file.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        let config = dirs::config_dir().context("cannot determine config directory")?;
        Ok(config.join("igweb").join("session.json"))
    }
}
