//! Platform configuration
//!
//! Connection settings for the hosted project, loaded from the
//! environment with logged fallbacks.

use std::env;
use std::path::PathBuf;

const DEFAULT_CREDENTIALS_FILE: &str = "reviewbox_session.json";

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the hosted project, e.g. `https://xyz.supabase.co`
    pub platform_url: String,
    /// Publishable anon key; per-user calls add the session bearer token
    pub anon_key: String,
    /// Service-role key; only account deletion needs it
    pub service_role_key: Option<String>,
    /// Where the session credentials persist between runs
    pub credentials_path: PathBuf,
}

impl PlatformConfig {
    pub fn new(platform_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            platform_url: platform_url.into(),
            anon_key: anon_key.into(),
            service_role_key: None,
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
        }
    }

    /// Load from the environment. Panics on a missing required value;
    /// call this once at startup.
    pub fn load() -> Self {
        Self {
            platform_url: require("REVIEWBOX_PLATFORM_URL"),
            anon_key: require("REVIEWBOX_ANON_KEY"),
            service_role_key: env::var("REVIEWBOX_SERVICE_ROLE_KEY").ok(),
            credentials_path: env::var("REVIEWBOX_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    log::info!(
                        "REVIEWBOX_CREDENTIALS not set, using default: {}",
                        DEFAULT_CREDENTIALS_FILE
                    );
                    PathBuf::from(DEFAULT_CREDENTIALS_FILE)
                }),
        }
    }
}

fn require(key: &str) -> String {
    env::var(key)
        .map_err(|_| {
            log::warn!("Environment variable {} not found", key);
        })
        .expect("Environment misconfigured!")
}
