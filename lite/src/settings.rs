//! Codec settings (settings.toml)
//!
//! The only setting is `checking`: whether a chunk whose tag is not `LITE`
//! fails to decode. It defaults to `true`.
//!
//! With checking off, a mismatched tag is accepted and the rest of the
//! buffer is decoded as if it were a LITE chunk. That can hide corrupt
//! input, so turn it off only when inspecting damaged files.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

static CHECKING: AtomicBool = AtomicBool::new(true);

/// Whether decoding rejects chunks with the wrong tag (process-wide)
pub fn checking() -> bool {
    CHECKING.load(Ordering::Relaxed)
}

/// Set the process-wide tag checking flag
pub fn set_checking(enabled: bool) {
    CHECKING.store(enabled, Ordering::Relaxed);
}

/// Persisted codec settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Reject chunks whose tag is not `LITE` (default: true)
    #[serde(default = "default_true")]
    pub checking: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checking: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Make these settings the process-wide ones
    pub fn apply(&self) {
        set_checking(self.checking);
    }
}

/// Platform-specific settings directory
///
/// On Linux: `~/.config/rcol-lite`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "rcol", "rcol-lite")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of the default settings file, if the platform has a config directory
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.toml"))
}

/// Load settings from the default location
///
/// Returns defaults if the file does not exist or cannot be parsed.
pub fn load() -> Settings {
    settings_path()
        .and_then(|path| load_from(&path).ok())
        .unwrap_or_default()
}

/// Load settings from a specific file
pub fn load_from(path: &Path) -> std::io::Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Write settings to a specific file, creating its directory
pub fn save_to(path: &Path, settings: &Settings) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(settings)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, content)
}
