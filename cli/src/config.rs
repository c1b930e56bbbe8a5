use std::path::Path;

use anyhow::{bail, Context};

pub const BASE_URL_VAR: &str = "LIBRARY_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    /// Load `.env.local` (or `.env`) into the process environment, then read
    /// `LIBRARY_BASE_URL`.
    pub fn load() -> anyhow::Result<Self> {
        if Path::new(".env.local").exists() {
            dotenvy::from_filename(".env.local").context("failed to read .env.local")?;
        } else if Path::new(".env").exists() {
            dotenvy::from_filename(".env").context("failed to read .env")?;
        }
        Ok(Self::from_value(std::env::var(BASE_URL_VAR).ok()))
    }

    fn from_value(base_url: Option<String>) -> Self {
        Config {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Command-line value wins over the environment.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            bail!("{BASE_URL_VAR} is empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("{BASE_URL_VAR} must be an http(s) URL, got '{url}'");
        }
        Ok(())
    }
}
