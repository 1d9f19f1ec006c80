use anyhow::{Context, Result};

use crate::form::phone::StoreMode;
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::member_api::{DEFAULT_INIT_PATH, DEFAULT_PROFILE_IMAGE_PATH};

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub oauth_login_url: String,
    pub member_init_path: String,
    pub profile_image_path: String,
    pub request_timeout_ms: u64,
    pub photo_max_mb: u64,
    pub phone_store_mode: StoreMode,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?,
            oauth_login_url: require_env("OAUTH_LOGIN_URL")?,
            member_init_path: env_or("MEMBER_INIT_PATH", DEFAULT_INIT_PATH),
            profile_image_path: env_or("PROFILE_IMAGE_PATH", DEFAULT_PROFILE_IMAGE_PATH),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", &DEFAULT_TIMEOUT_MS.to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_MS must be a number of milliseconds")?,
            photo_max_mb: env_or("PHOTO_MAX_MB", "3")
                .parse::<u64>()
                .context("PHOTO_MAX_MB must be a whole number of megabytes")?,
            phone_store_mode: env_or("PHONE_STORE_MODE", "digits")
                .parse::<StoreMode>()
                .context("PHONE_STORE_MODE must be 'digits' or 'formatted'")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
