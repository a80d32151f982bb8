// ---------------------------------------------------------------------------
// config.rs -- environment configuration, validated once at startup
// ---------------------------------------------------------------------------

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ZDF_URL: &str = "https://prod-api.zdf.de";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

// Credentials shipped with public sample configs; they never authenticate.
const PLACEHOLDER_CLIENT_ID: &str = "mediathek-search";
const PLACEHOLDER_CLIENT_SECRET: &str = "ZDFmediathekSearchClientSecret";

#[derive(Debug, Clone)]
pub struct Config {
    pub zdf_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub port: u16,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset. Every problem
    /// is collected so a misconfigured deployment is fixed in one pass.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut problems = Vec::new();

        let zdf_url = get("ZDF_URL")
            .unwrap_or_else(|| DEFAULT_ZDF_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if let Err(e) = url::Url::parse(&zdf_url) {
            problems.push(format!("- ZDF_URL is not a valid URL ({}): {}", e, zdf_url));
        }

        let token_url = get("ZDF_TOKEN_URL").unwrap_or_else(|| format!("{}/oauth/token", zdf_url));
        if let Err(e) = url::Url::parse(&token_url) {
            problems.push(format!("- ZDF_TOKEN_URL is not a valid URL ({}): {}", e, token_url));
        }

        let client_id = get("ZDF_CLIENT_ID").unwrap_or_default();
        if client_id.is_empty() || client_id == PLACEHOLDER_CLIENT_ID {
            problems.push("- ZDF_CLIENT_ID (OAuth2 client id for the ZDF API)".to_string());
        }

        let client_secret = get("ZDF_CLIENT_SECRET").unwrap_or_default();
        if client_secret.is_empty() || client_secret == PLACEHOLDER_CLIENT_SECRET {
            problems.push("- ZDF_CLIENT_SECRET (OAuth2 client secret for the ZDF API)".to_string());
        }

        let port = parse_or(&get("PORT"), "PORT", DEFAULT_PORT, &mut problems);
        let timeout_secs = parse_or(
            &get("UPSTREAM_TIMEOUT_SECS"),
            "UPSTREAM_TIMEOUT_SECS",
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
            &mut problems,
        );

        if !problems.is_empty() {
            return Err(ConfigError { problems });
        }

        Ok(Self {
            zdf_url,
            token_url,
            client_id,
            client_secret,
            port,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: &Option<String>,
    key: &str,
    default: T,
    problems: &mut Vec<String>,
) -> T {
    match raw {
        None => default,
        Some(value) => value.parse().unwrap_or_else(|_| {
            problems.push(format!("- {} must be a positive integer, got '{}'", key, value));
            default
        }),
    }
}
