use std::env;
use std::time::Duration;
use anyhow::{Result, Context};
use tracing::{info, warn, error};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Value shipped in the sample `.env`; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_upload_size_mb: usize,
    pub static_dir: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base_url: String,
    pub generation_timeout_seconds: Option<u64>,
}

/// State of the upstream credential as read at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Missing,
    Placeholder,
    Present,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // PORT takes precedence over SERVER_PORT (hosting platforms set PORT)
        let server_port = match env::var("PORT") {
            Ok(_) => Self::parse_env_var("PORT", 3000).context("Failed to parse PORT")?,
            Err(_) => Self::parse_env_var("SERVER_PORT", 3000)
                .context("Failed to parse SERVER_PORT")?,
        };

        let generation_timeout_seconds = match env::var("GENERATION_TIMEOUT_SECONDS") {
            Ok(val) => match val.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!("Failed to parse GENERATION_TIMEOUT_SECONDS: {} (no timeout)", e);
                    None
                }
            },
            Err(_) => None,
        };

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port,
            max_upload_size_mb: Self::parse_env_var("MAX_UPLOAD_SIZE_MB", 10)
                .context("Failed to parse MAX_UPLOAD_SIZE_MB")?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .filter(|model| !model.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base_url: env::var("GEMINI_API_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            generation_timeout_seconds,
        };

        config.validate()?;
        config.log_credential_status();

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.trim().parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than 0"));
        }
        if self.max_upload_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }
        Ok(())
    }

    pub fn credential_status(&self) -> CredentialStatus {
        match self.gemini_api_key.as_deref() {
            None => CredentialStatus::Missing,
            Some(PLACEHOLDER_API_KEY) => CredentialStatus::Placeholder,
            Some(_) => CredentialStatus::Present,
        }
    }

    /// The key to send upstream, if it is usable at all.
    pub fn usable_api_key(&self) -> Option<&str> {
        match self.credential_status() {
            CredentialStatus::Present => self.gemini_api_key.as_deref(),
            _ => None,
        }
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_mb * 1024 * 1024
    }

    pub fn generation_timeout(&self) -> Option<Duration> {
        self.generation_timeout_seconds.map(Duration::from_secs)
    }

    fn log_credential_status(&self) {
        match self.credential_status() {
            CredentialStatus::Missing => {
                error!("CRITICAL: GEMINI_API_KEY is not set; cover letter generation will fail");
            }
            CredentialStatus::Placeholder => {
                error!("CRITICAL: GEMINI_API_KEY is still the placeholder value; set a real key");
            }
            CredentialStatus::Present => {
                let key = self.gemini_api_key.as_deref().unwrap_or_default();
                info!(
                    key_prefix = %key.chars().take(4).collect::<String>(),
                    key_length = key.len(),
                    "Gemini API key loaded"
                );
            }
        }
    }
}

// The key never appears in logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("max_upload_size_mb", &self.max_upload_size_mb)
            .field("static_dir", &self.static_dir)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base_url", &self.gemini_api_base_url)
            .field("generation_timeout_seconds", &self.generation_timeout_seconds)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            max_upload_size_mb: 10,
            static_dir: "public".to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_base_url: DEFAULT_API_BASE_URL.to_string(),
            generation_timeout_seconds: None,
        }
    }
}
