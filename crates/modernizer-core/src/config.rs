use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config as cfg;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable holding the language-model credential.
pub const LLM_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const SUPPORTED_LLM_PROVIDERS: &[&str] = &["openai", "openai-compatible"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for request bodies, multipart uploads included.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    fn default_max_upload_bytes() -> usize {
        16 * 1024 * 1024
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            max_upload_bytes: Self::default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory under which `sessions/<id>/` trees are created.
    pub output_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "openai-compatible"
    #[serde(default = "LlmConfig::default_provider")]
    pub provider: String,
    #[serde(default = "LlmConfig::default_model")]
    pub model: String,
    #[serde(default = "LlmConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "LlmConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "LlmConfig::default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "LlmConfig::default_temperature")]
    pub temperature: f32,
    // Do not serialize secrets; allow deserialization from config/env only.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl LlmConfig {
    fn default_provider() -> String {
        "openai".to_string()
    }

    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }

    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_timeout_secs() -> u64 {
        120
    }

    fn default_max_tokens() -> usize {
        1024
    }

    fn default_temperature() -> f32 {
        0.2
    }

    /// Configured key, falling back to `OPENAI_API_KEY`. Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        use secrecy::ExposeSecret;

        self.api_key
            .clone()
            .filter(|k| !k.expose_secret().trim().is_empty())
            .or_else(|| {
                env::var(LLM_API_KEY_ENV)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
                    .map(SecretString::from)
            })
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Self::default_provider(),
            model: Self::default_model(),
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            max_tokens: Self::default_max_tokens(),
            temperature: Self::default_temperature(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_env")]
    pub env: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Self::default_env(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            llm: LlmConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    fn default_env() -> String {
        env::var("APP_ENV")
            .ok()
            .or_else(|| env::var("RUST_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "server.host cannot be empty"
        );
        anyhow::ensure!(self.server.port > 0, "server.port must be > 0");
        anyhow::ensure!(
            self.server.max_upload_bytes > 0,
            "server.max_upload_bytes must be > 0"
        );
        anyhow::ensure!(
            !self.storage.output_root.as_os_str().is_empty(),
            "storage.output_root cannot be empty"
        );
        anyhow::ensure!(
            SUPPORTED_LLM_PROVIDERS.contains(&self.llm.provider.to_lowercase().as_str()),
            "llm.provider must be one of {:?}, got '{}'",
            SUPPORTED_LLM_PROVIDERS,
            self.llm.provider
        );
        anyhow::ensure!(
            !self.llm.base_url.trim().is_empty(),
            "llm.base_url cannot be empty"
        );
        anyhow::ensure!(self.llm.timeout_secs > 0, "llm.timeout_secs must be > 0");
        Ok(())
    }
}

/// Loads [`Settings`] from layered sources.
///
/// Files are read from the config directory in this order, each optional:
/// 1. `default.toml`
/// 2. `{env}.toml` (e.g. `development.toml`, `production.toml`)
/// 3. `local.toml`
///
/// Environment variables with the `MODERNIZER__` prefix override all files,
/// e.g. `MODERNIZER__SERVER__PORT=9000`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
    env: String,
}

impl ConfigManager {
    pub fn new(config_dir: Option<PathBuf>, env_override: Option<String>) -> Self {
        Self {
            config_dir: config_dir.unwrap_or_else(Self::default_config_dir),
            env: env_override.unwrap_or_else(Settings::default_env),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    /// Get the default configuration directory.
    ///
    /// Priority order:
    /// 1. ~/.modernizer/ (user-level config)
    /// 2. ./config/ (project-level config)
    /// 3. Current directory (fallback)
    pub fn default_config_dir() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            let user_dir = home_dir.join(".modernizer");
            if user_dir.exists() {
                info!("Using config directory: {:?}", user_dir);
                return user_dir;
            }
        }

        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let project_config = cwd.join("config");
        if project_config.exists() {
            info!("Using config directory: {:?}", project_config);
            return project_config;
        }

        info!("Using config directory: {:?}", cwd);
        cwd
    }

    pub fn load(&self) -> Result<Settings> {
        let settings = Self::load_from_sources(&self.config_dir, &self.env)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_sources(config_dir: &Path, env_name: &str) -> Result<Settings> {
        let mut settings: Settings = cfg::Config::builder()
            .add_source(cfg::File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                cfg::File::from(config_dir.join(format!("{}.toml", env_name))).required(false),
            )
            .add_source(cfg::File::from(config_dir.join("local.toml")).required(false))
            .add_source(cfg::Environment::with_prefix("MODERNIZER").separator("__"))
            .build()
            .context("building configuration")?
            .try_deserialize()
            .context("deserializing configuration")?;
        settings.env = env_name.to_string();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.storage.output_root, PathBuf::from("output"));
        assert_eq!(settings.llm.provider, "openai");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let mut settings = Settings::default();
        settings.llm.provider = "carrier-pigeon".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn empty_output_root_is_rejected() {
        let mut settings = Settings::default();
        settings.storage.output_root = PathBuf::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn explicit_api_key_wins_over_environment() {
        use secrecy::ExposeSecret;

        let llm = LlmConfig {
            api_key: Some(SecretString::from("from-config")),
            ..Default::default()
        };
        let key = llm.resolve_api_key().expect("key");
        assert_eq!(key.expose_secret(), "from-config");
    }

    #[test]
    fn api_key_is_never_serialized() {
        let llm = LlmConfig {
            api_key: Some(SecretString::from("sk-secret")),
            ..Default::default()
        };
        let json = serde_json::to_string(&llm).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!json.contains("api_key"));
    }
}
