//! # Client Configuration
//!
//! Where the order backend lives, where the draft journal is kept, and what
//! company prints on the purchase order.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the `po` binary)  │
//! │     --api-url http://erp.local:8000                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     PO_API_URL, PO_DB_PATH, PO_TIMEOUT_SECS,                           │
//! │     PO_COMPANY_NAME, PO_COMPANY_ADDRESS                                │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/po-desk/po.toml (Linux)                                  │
//! │     ~/Library/Application Support/com.ntinfosol.po-desk/po.toml (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     http://127.0.0.1:8000, 30 s timeout, drafts.db in the data dir     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # po.toml
//! [api]
//! base_url = "http://127.0.0.1:8000"
//! timeout_secs = 30
//!
//! [journal]
//! db_path = "/var/lib/po-desk/drafts.db"
//!
//! [company]
//! name = "NT INFOSOL LLP"
//! address = "Surat, Gujarat"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use po_core::document::CompanyProfile;

const CONFIG_FILE_NAME: &str = "po.toml";
const JOURNAL_FILE_NAME: &str = "drafts.db";

// =============================================================================
// API Settings
// =============================================================================

/// How to reach the order backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `/api/orders` is joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds). There are no retries.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Journal Settings
// =============================================================================

/// Where drafts that failed to save are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalSettings {
    /// SQLite file. `None` means `drafts.db` in the platform data dir.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub journal: JournalSettings,

    /// Letterhead for printed and exported orders.
    #[serde(default)]
    pub company: CompanyProfile,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (po.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file, creating its directory.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PO_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(path) = std::env::var("PO_DB_PATH") {
            debug!(path = %path, "Overriding journal path from environment");
            self.journal.db_path = Some(PathBuf::from(path));
        }

        if let Ok(timeout) = std::env::var("PO_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric PO_TIMEOUT_SECS"),
            }
        }

        if let Ok(name) = std::env::var("PO_COMPANY_NAME") {
            self.company.name = name;
        }

        if let Ok(address) = std::env::var("PO_COMPANY_ADDRESS") {
            self.company.address = address;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Journal file: the configured path, else `drafts.db` in the data dir,
    /// else the working directory.
    pub fn journal_path(&self) -> PathBuf {
        self.journal
            .db_path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(JOURNAL_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(JOURNAL_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "ntinfosol", "po-desk")
}
