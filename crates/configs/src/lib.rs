use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

use common::pagination::{
    PaginationConfig, DEFAULT_PAGE_PADDING, DEFAULT_PAGE_PARAM, DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pagination: PaginationSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// `[pagination]` table as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationSection {
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default = "default_page_padding")]
    pub page_padding: u32,
    #[serde(default = "default_page_param")]
    pub page_param: String,
    #[serde(default = "default_true")]
    pub show_first: bool,
    #[serde(default = "default_true")]
    pub show_last: bool,
}

impl Default for PaginationSection {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_padding: default_page_padding(),
            page_param: default_page_param(),
            show_first: true,
            show_last: true,
        }
    }
}

fn default_page_size() -> u64 { DEFAULT_PAGE_SIZE }
fn default_page_padding() -> u32 { DEFAULT_PAGE_PADDING }
fn default_page_param() -> String { DEFAULT_PAGE_PARAM.to_string() }
fn default_true() -> bool { true }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.pagination.normalize();
        self.pagination.to_config()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl PaginationSection {
    fn normalize(&mut self) {
        let trimmed = self.page_param.trim();
        if trimmed.len() != self.page_param.len() {
            self.page_param = trimmed.to_string();
        }
    }

    /// Validated pagination settings; a zero page size is a configuration error.
    pub fn to_config(&self) -> Result<PaginationConfig> {
        PaginationConfig::new(
            self.page_size,
            self.page_padding,
            self.page_param.clone(),
            self.show_first,
            self.show_last,
        )
        .map_err(|e| anyhow!("invalid [pagination] section: {e}"))
    }
}
