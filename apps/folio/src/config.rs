use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::nav::actions::DEFAULT_RESUME_URL;
use crate::nav::NavConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Exported static site served as the fallback route.
    pub site_dir: PathBuf,
    /// Optional JSON manifest replacing the built-in nav links.
    pub nav_manifest: Option<PathBuf>,
    pub resume_file: PathBuf,
    pub resume_url: String,
    pub resume_download_name: String,
    pub nav: NavConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let site_dir = PathBuf::from(env_or("SITE_DIR", "./out"));
        let defaults = NavConfig::default();

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            resume_file: std::env::var("RESUME_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| site_dir.join("resume.pdf")),
            site_dir,
            nav_manifest: std::env::var("NAV_MANIFEST").ok().map(PathBuf::from),
            resume_url: validate_resume_url(&env_or("RESUME_URL", DEFAULT_RESUME_URL))
                .context("RESUME_URL is not usable")?,
            resume_download_name: env_or("RESUME_DOWNLOAD_NAME", "resume.pdf"),
            nav: NavConfig {
                probe_offset: parse_env("NAV_PROBE_OFFSET", defaults.probe_offset)?,
                header_clearance: parse_env("NAV_HEADER_CLEARANCE", defaults.header_clearance)?,
                scrolled_threshold: parse_env(
                    "NAV_SCROLLED_THRESHOLD",
                    defaults.scrolled_threshold,
                )?,
            },
        })
    }
}

/// Paths owned by the API; a local resume route must not shadow them.
const RESERVED_PREFIXES: &[&str] = &["/health", "/api/"];

/// Accepts either an absolute http(s) URL, which the client opens directly,
/// or a plain local path that can be registered as its own route.
fn validate_resume_url(raw: &str) -> Result<String> {
    let url = raw.trim();
    if url.is_empty() {
        bail!("value is empty");
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(url.to_string());
    }
    if url.starts_with("//") {
        bail!("'{url}' is protocol-relative; use an explicit https:// URL");
    }
    if !url.starts_with('/') {
        bail!("'{url}' must be an absolute path or an http(s) URL");
    }
    if url == "/" {
        bail!("'/' is the site root");
    }
    if let Some(c) = url.chars().find(|c| matches!(c, '?' | '#' | ':' | '*' | '{' | '}')) {
        bail!("'{url}' contains '{c}', which a route path cannot match");
    }
    if url.chars().any(char::is_whitespace) {
        bail!("'{url}' contains whitespace");
    }
    let reserved = RESERVED_PREFIXES.iter().any(|prefix| {
        let bare = prefix.trim_end_matches('/');
        url == bare || url.starts_with(&format!("{bare}/"))
    });
    if reserved {
        bail!("'{url}' collides with an API route");
    }
    Ok(url.to_string())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_value<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
