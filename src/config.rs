use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    pub contact_email: String,
    pub github_user: String,
    pub github_api_base: String,
    pub request_timeout_secs: u64,
    /// Directory holding `Resume.pdf`.
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            contact_email: "james.mccann97@outlook.com".to_string(),
            github_user: "JamesMcCannCoding".to_string(),
            github_api_base: "https://api.github.com".to_string(),
            request_timeout_secs: 10,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl AppConfig {
    /// Loads the user config file, falling back to defaults when absent,
    /// then applies `PORTFOLIO_*` environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Applies overrides from `lookup`; unparsable values are logged and skipped.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORTFOLIO_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!("Ignoring PORTFOLIO_PORT={}: {}", port, e),
            }
        }
        if let Some(bind) = lookup("PORTFOLIO_BIND") {
            match bind.parse::<IpAddr>() {
                Ok(_) => self.bind_address = bind,
                Err(e) => tracing::warn!("Ignoring PORTFOLIO_BIND={}: {}", bind, e),
            }
        }
        if let Some(user) = lookup("PORTFOLIO_GITHUB_USER").filter(|u| !u.is_empty()) {
            self.github_user = user;
        }
        if let Some(dir) = lookup("PORTFOLIO_STATIC_DIR").filter(|d| !d.is_empty()) {
            self.static_dir = PathBuf::from(dir);
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resume_path(&self) -> PathBuf {
        self.static_dir.join("Resume.pdf")
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;

        Ok(config_dir.join("portfolio-app").join("config.json"))
    }
}
