use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::HN_API_BASE_URL;

const APP_DIR: &str = "hn-cli";
const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for the whole crate ("error", "warn", "info", ...).
    pub level: String,
    /// Directory for the daily rolling log file. Defaults to
    /// `<data dir>/hn-cli/logs`.
    pub log_directory: Option<String>,
    /// Per-module overrides, e.g. `{"hn_cli::api": "debug"}`.
    pub module_levels: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            log_directory: None,
            module_levels: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive built from the level and module overrides.
    pub fn filter_directive(&self) -> String {
        let mut filter_str = self.level.clone();
        for (module, level) in &self.module_levels {
            filter_str.push_str(&format!(",{}={}", module, level));
        }
        filter_str
    }

    pub fn resolved_directory(&self) -> PathBuf {
        match &self.log_directory {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("logs"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the Hacker News API, ending in a slash.
    pub api_base_url: String,
    /// Directory holding `.hncliconfig`. Defaults to the home directory.
    pub session_dir: Option<String>,
    /// Number of stories a listing shows when no limit is given.
    pub default_limit: usize,
    /// Column at which comment bodies wrap.
    pub wrap_width: usize,
    /// Colored output when stdout is a terminal.
    pub color: bool,
    /// Pager for `hn view` pages. Falls back to `$PAGER`, then `less -R`.
    pub pager: Option<String>,
    pub request_timeout_secs: u64,
    /// Deepest comment level to fetch. `None` walks whole threads.
    pub max_depth: Option<usize>,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: HN_API_BASE_URL.to_string(),
            session_dir: None,
            default_limit: 10,
            wrap_width: 80,
            color: true,
            pager: None,
            request_timeout_secs: 20,
            max_depth: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the first `config.ron` found in the working directory, next
    /// to the executable or in the user config directory. Falls back to
    /// defaults when none exists or the file does not parse.
    pub fn load() -> Self {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE)];

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join(CONFIG_FILE));
        }

        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(APP_DIR).join(CONFIG_FILE));
        }

        for path in candidates {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::error!("Failed to load config at {}: {:#}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    /// Load an explicit config file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = ron::from_str::<AppConfig>(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Directory where the session index is stored.
    pub fn session_dir(&self) -> PathBuf {
        match &self.session_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
