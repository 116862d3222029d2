use crate::armory::Locale;
use crate::armory::auth::DEFAULT_TOKEN_URL;
use crate::armory::http::{DEFAULT_API_BASE_TEMPLATE, DEFAULT_TIMEOUT_SECS};
use crate::chronicle::cache::DEFAULT_MAX_ENTRIES;
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub const APP_DIR_NAME: &str = ".realmscribe";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// tracing level name: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub battlenet: BattleNetConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_log_level() -> String {
    "info".into()
}

pub(crate) fn app_dir() -> PathBuf {
    let home = UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
    home.join(APP_DIR_NAME)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: app_dir().join("config.toml"),
            log_level: default_log_level(),
            battlenet: BattleNetConfig::default(),
            gemini: GeminiConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.battlenet.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "battlenet.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries must be greater than 0".into(),
            ));
        }
        self.battlenet.locale()?;
        if !self.battlenet.api_base_template.contains("{region}") {
            tracing::warn!(
                template = %self.battlenet.api_base_template,
                "api_base_template has no {{region}} placeholder; all regions share one host"
            );
        }
        Ok(())
    }
}

// ── Battle.net ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleNetConfig {
    /// OAuth token endpoint for the client-credentials grant
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Regional API host; `{region}` is substituted per request
    #[serde(default = "default_api_base_template")]
    pub api_base_template: String,
    /// Trusted intermediary that hands out bearer tokens. When set, no
    /// client secret is needed locally.
    #[serde(default)]
    pub broker_url: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.into()
}

fn default_api_base_template() -> String {
    DEFAULT_API_BASE_TEMPLATE.into()
}

fn default_locale() -> String {
    Locale::FALLBACK.as_str().into()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BattleNetConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            api_base_template: default_api_base_template(),
            broker_url: None,
            client_id: None,
            client_secret: None,
            locale: default_locale(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BattleNetConfig {
    pub fn locale(&self) -> Result<Locale, ConfigError> {
        Locale::from_str(&self.locale).map_err(|_| {
            ConfigError::Validation(format!(
                "battlenet.locale '{}' is not a supported locale",
                self.locale
            ))
        })
    }
}

// ── Gemini ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_character_temperature")]
    pub character_temperature: f64,
    #[serde(default = "default_realm_temperature")]
    pub realm_temperature: f64,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash-lite".into()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_character_temperature() -> f64 {
    0.9
}

fn default_realm_temperature() -> f64 {
    0.8
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            max_output_tokens: default_max_output_tokens(),
            character_temperature: default_character_temperature(),
            realm_temperature: default_realm_temperature(),
        }
    }
}

// ── Summary cache ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding one JSON file per summary list. `~` is expanded.
    #[serde(default = "default_cache_directory")]
    pub directory: String,
    /// Entries kept per list; older ones are evicted on insert
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_cache_directory() -> String {
    format!("~/{APP_DIR_NAME}/summaries")
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_directory(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.directory).into_owned())
    }
}
