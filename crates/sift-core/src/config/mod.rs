mod env;
mod types;


pub use types::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use sift_text::StopWords;

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project.name.trim().is_empty() {
            bail!("project.name must not be empty");
        }
        if self.embedding.model.trim().is_empty() {
            bail!("embedding.model must not be empty");
        }
        if self.index.batch_size == 0 {
            bail!("index.batch_size must be greater than zero");
        }
        if self.index.concurrency == 0 {
            bail!("index.concurrency must be greater than zero");
        }
        if self.search.max_results == 0 {
            bail!("search.max_results must be greater than zero");
        }
        if self.search.page_size == 0 {
            bail!("search.page_size must be greater than zero");
        }
        if self.mcp.num_results == 0 {
            bail!("mcp.num_results must be greater than zero");
        }
        Ok(())
    }

    /// Absolute-or-relative source roots: `project.root` joined with each
    /// `project.src_dirs` entry.
    #[must_use]
    pub fn source_roots(&self) -> Vec<PathBuf> {
        self.project
            .src_dirs
            .iter()
            .map(|dir| dir.trim().trim_matches('/'))
            .filter(|dir| !dir.is_empty())
            .map(|dir| self.project.root.join(dir))
            .collect()
    }

    #[must_use]
    pub fn stop_words(&self) -> StopWords {
        StopWords::with_extra(&self.query.stop_words)
    }
}
