//! Configuration loading and management.
//!
//! Provides types for the TOML-based configuration file. All fields carry
//! defaults, so the file can be omitted entirely.
//!
//! ```rust,no_run
//! use skill_inspector::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert!(config.inspection.timeout_secs > 0);
//! ```

use std::path::Path;
use std::time::Duration;

/// Main configuration for the inspector.
///
/// Loaded from a TOML file (typically `skill-inspector.toml`).
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings (timeout, pass/fail threshold).
    pub inspection: InspectionConfig,
    /// Per-checker on/off toggles.
    pub checkers: CheckersConfig,
}

/// Engine settings.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct InspectionConfig {
    /// Per-checker timeout in seconds. Must be greater than zero.
    pub timeout_secs: u64,
    /// Scores below this value make the `inspect` command exit nonzero.
    pub fail_threshold: u32,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        InspectionConfig {
            timeout_secs: 30,
            fail_threshold: 70,
        }
    }
}

/// Per-checker on/off toggles. Every checker defaults to **enabled**.
///
/// ```toml
/// [checkers]
/// portability = false   # skip the portability checker
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CheckersConfig {
    /// Cross-platform portability hazards (built-in).
    pub portability: bool,
}

impl Default for CheckersConfig {
    fn default() -> Self {
        CheckersConfig { portability: true }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try `skill-inspector.toml` in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when the explicit path does not exist, the file
    /// cannot be read, the TOML fails to parse, or the loaded values are
    /// invalid (zero timeout).
    pub fn load(path: Option<&Path>) -> Result<Config, String> {
        let config_path = if let Some(p) = path {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                return Err(format!("Config file not found: {}", p.display()));
            }
        } else {
            let default_path = Path::new("skill-inspector.toml");
            if default_path.exists() {
                Some(default_path.to_path_buf())
            } else {
                None
            }
        };

        let config = match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
                toml::from_str::<Config>(&content)
                    .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?
            }
            None => Config::default(),
        };

        // A zero timeout would make the engine reject the run after checkers
        // are registered; surface it here, at load time.
        if config.inspection.timeout_secs == 0 {
            return Err("inspection.timeout_secs must be greater than zero".to_string());
        }

        Ok(config)
    }

    /// Per-checker timeout as a [`Duration`].
    pub fn per_check_timeout(&self) -> Duration {
        Duration::from_secs(self.inspection.timeout_secs)
    }
}
