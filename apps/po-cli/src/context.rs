//! # Application Context
//!
//! Resolved configuration plus constructors for the store, the journal and
//! the editor session.
//!
//! ```text
//! --config / po.toml / PO_* env ──► ClientConfig ──► --api-url override
//!                                        │
//!              ┌─────────────────────────┼──────────────────────────┐
//!              ▼                         ▼                          ▼
//!       HttpOrderStore            Database (drafts.db)        CompanyProfile
//!              └──────────┬──────────────┘
//!                         ▼
//!                   EditorSession
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use po_client::{ClientConfig, EditorSession, HttpOrderStore};
use po_db::{Database, DbConfig};

pub struct AppContext {
    pub config: ClientConfig,
}

impl AppContext {
    /// Loads `po.toml` and environment overrides, then applies `--api-url`.
    pub fn load(config_path: Option<PathBuf>, api_url: Option<String>) -> Result<Self> {
        let mut config = ClientConfig::load(config_path).context("Could not load configuration")?;

        if let Some(url) = api_url {
            debug!(url = %url, "Overriding API URL from command line");
            config.api.base_url = url;
            config.validate().context("Invalid --api-url")?;
        }

        Ok(AppContext { config })
    }

    pub fn store(&self) -> Result<Arc<HttpOrderStore>> {
        let store = HttpOrderStore::from_config(&self.config)
            .context("Could not set up the order backend client")?;
        Ok(Arc::new(store))
    }

    /// Opens the draft journal, creating its directory on first use.
    pub async fn journal(&self) -> Result<Database> {
        let path = self.config.journal_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        Database::new(DbConfig::new(&path))
            .await
            .with_context(|| format!("Could not open draft journal {}", path.display()))
    }

    pub async fn session(&self) -> Result<EditorSession> {
        let store = self.store()?;
        let journal = self.journal().await?;
        Ok(EditorSession::new(store, journal.drafts()))
    }
}
