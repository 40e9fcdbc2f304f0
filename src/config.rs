//! Configuration loading with env-var overrides.
//!
//! Reads an optional TOML file (`config/default.toml` unless a path is given),
//! then applies the `RABOT_LOG_LEVEL` override. The Discord token is read from
//! the environment (`TOKEN`, usually via `.env`) and never from the file.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::RabotError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// HTTP client configuration shared by every scraper.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// WordReference lookup tuning.
#[derive(Debug, Clone)]
pub struct WordrefConfig {
    /// How many random pages to try before giving up on a word of the day.
    pub max_random_iterations: usize,
}

/// Where each site is fetched from. Links shown to users always point at the
/// public sites; these only change where requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitesConfig {
    /// WordReference root, e.g. `https://www.wordreference.com`.
    pub wordref_url: String,
    /// Wiktionary article root; `{lang}` is replaced by the edition code.
    pub wiktionary_url: String,
    /// Forvo word page root, e.g. `https://forvo.com/word/`.
    pub forvo_url: String,
}

impl SitesConfig {
    /// Article root of the `code` edition (`en`, `el`).
    pub fn wiktionary(&self, code: &str) -> String {
        self.wiktionary_url.replace("{lang}", code)
    }
}

impl Default for SitesConfig {
    fn default() -> Self {
        RawSites::default().into()
    }
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Optional log file (already expanded, no `~`). `None` logs to stderr.
    pub log_file: Option<PathBuf>,
    /// Seconds before pagination buttons are removed.
    pub pagination_timeout_seconds: u64,
    pub http: HttpConfig,
    pub wordref: WordrefConfig,
    pub sites: SitesConfig,
    /// Discord bot token from `TOKEN`. Never sourced from TOML.
    pub token: Option<String>,
}

impl Config {
    /// The Discord token, or a config error naming the missing variable.
    pub fn require_token(&self) -> Result<&str, RabotError> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| RabotError::Config("could not find TOKEN in the environment or .env".into()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_raw(RawConfig::default(), None, None)
    }
}

/// Raw TOML shape, the `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    bot: RawBot,
    #[serde(default)]
    http: RawHttp,
    #[serde(default)]
    wordref: RawWordref,
    #[serde(default)]
    sites: RawSites,
}

#[derive(Deserialize)]
struct RawBot {
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default = "default_pagination_timeout")]
    pagination_timeout_seconds: u64,
}

impl Default for RawBot {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            pagination_timeout_seconds: default_pagination_timeout(),
        }
    }
}

#[derive(Deserialize)]
struct RawHttp {
    #[serde(default = "default_http_timeout")]
    timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    user_agent: String,
}

impl Default for RawHttp {
    fn default() -> Self {
        Self { timeout_seconds: default_http_timeout(), user_agent: default_user_agent() }
    }
}

#[derive(Deserialize)]
struct RawWordref {
    #[serde(default = "default_max_random_iterations")]
    max_random_iterations: usize,
}

impl Default for RawWordref {
    fn default() -> Self {
        Self { max_random_iterations: default_max_random_iterations() }
    }
}

#[derive(Deserialize)]
struct RawSites {
    #[serde(default = "default_wordref_url")]
    wordref_url: String,
    #[serde(default = "default_wiktionary_url")]
    wiktionary_url: String,
    #[serde(default = "default_forvo_url")]
    forvo_url: String,
}

impl Default for RawSites {
    fn default() -> Self {
        Self {
            wordref_url: default_wordref_url(),
            wiktionary_url: default_wiktionary_url(),
            forvo_url: default_forvo_url(),
        }
    }
}

impl From<RawSites> for SitesConfig {
    fn from(raw: RawSites) -> Self {
        Self {
            wordref_url: raw.wordref_url.trim_end_matches('/').to_string(),
            wiktionary_url: raw.wiktionary_url.trim_end_matches('/').to_string(),
            forvo_url: raw.forvo_url,
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_pagination_timeout() -> u64 { 100 }
fn default_http_timeout() -> u64 { 20 }
fn default_user_agent() -> String { concat!("rabot/", env!("CARGO_PKG_VERSION")).to_string() }
fn default_max_random_iterations() -> usize { 5 }
fn default_wordref_url() -> String { "https://www.wordreference.com".to_string() }
fn default_wiktionary_url() -> String { "https://{lang}.wiktionary.org/wiki".to_string() }
fn default_forvo_url() -> String { "https://forvo.com/word/".to_string() }

impl Config {
    fn from_raw(raw: RawConfig, log_level_override: Option<&str>, token: Option<String>) -> Self {
        Self {
            log_level: log_level_override.unwrap_or(&raw.bot.log_level).to_string(),
            log_file: raw.bot.log_file.as_deref().map(expand_home),
            pagination_timeout_seconds: raw.bot.pagination_timeout_seconds,
            http: HttpConfig {
                timeout_seconds: raw.http.timeout_seconds,
                user_agent: raw.http.user_agent,
            },
            wordref: WordrefConfig {
                max_random_iterations: raw.wordref.max_random_iterations.max(1),
            },
            sites: raw.sites.into(),
            token,
        }
    }
}

/// Load config from `path` (or the default location), then apply env overrides.
///
/// A missing default file is not an error; a missing explicit file is.
pub fn load(path: Option<&str>) -> Result<Config, RabotError> {
    let log_level_override = env::var("RABOT_LOG_LEVEL").ok();
    let token = env::var("TOKEN").ok();
    match path {
        Some(p) => load_from(Path::new(p), log_level_override.as_deref(), token),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_from(default_path, log_level_override.as_deref(), token)
            } else {
                Ok(Config::from_raw(RawConfig::default(), log_level_override.as_deref(), token))
            }
        }
    }
}

/// Loader behind [`load`]: takes an explicit path and overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    log_level_override: Option<&str>,
    token: Option<String>,
) -> Result<Config, RabotError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| RabotError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| RabotError::Config(format!("parse error in {}: {e}", path.display())))?;

    Ok(Config::from_raw(parsed, log_level_override, token))
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
