use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Connection details for the hosted backend. Both values are required;
/// nothing works without them, so loading fails fast rather than limping on.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_media_bucket")]
    pub media_bucket: String,
    #[serde(default = "default_avatar_bucket")]
    pub avatar_bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_bucket: default_media_bucket(),
            avatar_bucket: default_avatar_bucket(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Public origin of the site, used to build redirect URLs in
    /// confirmation and reset emails.
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_reset_timeout")]
    pub reset_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            reset_timeout_secs: default_reset_timeout(),
        }
    }
}

impl AuthConfig {
    pub fn reset_timeout(&self) -> Duration {
        Duration::from_secs(self.reset_timeout_secs)
    }
}

fn default_media_bucket() -> String {
    "media".to_string()
}

fn default_avatar_bucket() -> String {
    "avatars".to_string()
}

fn default_site_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_reset_timeout() -> u64 {
    10
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Could not read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from `WOWZONE_BACKEND_URL` and
    /// `WOWZONE_BACKEND_ANON_KEY`, with everything else at its default.
    pub fn from_env() -> Result<Self> {
        let url = non_empty_var("WOWZONE_BACKEND_URL");
        let anon_key = non_empty_var("WOWZONE_BACKEND_ANON_KEY");
        let (url, anon_key) = match (url, anon_key) {
            (Some(url), Some(anon_key)) => (url, anon_key),
            _ => anyhow::bail!(
                "Missing backend environment variables. Set WOWZONE_BACKEND_URL and WOWZONE_BACKEND_ANON_KEY."
            ),
        };
        let config = Config {
            backend: BackendConfig { url, anon_key },
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend.url.trim().is_empty() {
            anyhow::bail!("backend.url must be set");
        }
        url::Url::parse(&self.backend.url)
            .map_err(|e| anyhow::anyhow!("backend.url is not a valid URL: {}", e))?;
        if self.backend.anon_key.trim().is_empty() {
            anyhow::bail!("backend.anon_key must be set");
        }
        if self.storage.media_bucket.trim().is_empty() {
            anyhow::bail!("storage.media_bucket must be set");
        }
        if self.storage.avatar_bucket.trim().is_empty() {
            anyhow::bail!("storage.avatar_bucket must be set");
        }
        url::Url::parse(&self.auth.site_url)
            .map_err(|e| anyhow::anyhow!("auth.site_url is not a valid URL: {}", e))?;
        if self.auth.reset_timeout_secs == 0 {
            anyhow::bail!("auth.reset_timeout_secs must be greater than 0");
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
