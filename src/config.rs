use std::{str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Runtime settings, read once at startup from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openai_api_base: String,
    pub openai_model: String,
    /// Used only when a submission does not carry its own key.
    pub fallback_api_key: Option<String>,
    pub request_timeout: Duration,
    pub analysis_max_tokens: u32,
    pub profile_max_tokens: u32,
    pub max_upload_bytes: usize,
    pub video_profile_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            openai_api_base: DEFAULT_API_BASE.to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            fallback_api_key: None,
            request_timeout: Duration::from_secs(120),
            analysis_max_tokens: 1500,
            profile_max_tokens: 1000,
            max_upload_bytes: 200 * 1024 * 1024,
            video_profile_enabled: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            port: parse_or(&get, "PORT", defaults.port),
            openai_api_base: get("OPENAI_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_api_base),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            fallback_api_key: get("OPENAI_API_KEY"),
            request_timeout: Duration::from_secs(parse_or(
                &get,
                "OPENAI_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            analysis_max_tokens: parse_or(&get, "ANALYSIS_MAX_TOKENS", defaults.analysis_max_tokens),
            profile_max_tokens: parse_or(&get, "PROFILE_MAX_TOKENS", defaults.profile_max_tokens),
            max_upload_bytes: parse_or::<usize, _>(&get, "MAX_UPLOAD_MB", defaults.max_upload_bytes / (1024 * 1024))
                .saturating_mul(1024 * 1024),
            video_profile_enabled: get("VIDEO_PROFILE_ENABLED")
                .map(|v| parse_flag("VIDEO_PROFILE_ENABLED", &v, defaults.video_profile_enabled))
                .unwrap_or(defaults.video_profile_enabled),
        }
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("⚠️ Ignoring unparseable {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

fn parse_flag(key: &str, raw: &str, default: bool) -> bool {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("⚠️ Ignoring unparseable {}={:?}, using {}", key, raw, default);
            default
        }
    }
}
