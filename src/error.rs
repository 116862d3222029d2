use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `Realmscribe`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide how to report a failure; application glue continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ScribeError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Battle.net data ─────────────────────────────────────────────────
    #[error("armory: {0}")]
    Armory(#[from] ArmoryError),

    // ── Narrative generation ────────────────────────────────────────────
    #[error("chronicle: {0}")]
    Chronicle(#[from] ChronicleError),

    // ── Summary cache ───────────────────────────────────────────────────
    #[error("cache: {0}")]
    Cache(#[from] CacheError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Battle.net errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ArmoryError {
    #[error("authentication with the Battle.net API failed: {0}")]
    Authentication(String),

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("game version {version} has no {family} namespace")]
    UnsupportedVersion { version: String, family: String },
}

impl ArmoryError {
    /// Plain-language message for the end user. Upstream bodies never leak here.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication(_) => "Could not authenticate with the Battle.net API.".into(),
            Self::NotFound { .. } => {
                "Character or realm not found (404). Please check spelling and region.".into()
            }
            Self::Timeout { seconds } => format!("API request timed out after {seconds} seconds."),
            Self::Api { status, .. } => format!("The Battle.net API returned an error ({status})."),
            Self::Transport(_) | Self::Decode(_) => {
                "The Battle.net API could not be reached. Please try again.".into()
            }
            Self::UnsupportedVersion { version, .. } => {
                format!("Unsupported game version type: {version}")
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ─── Narrative generation errors ────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChronicleError {
    #[error("generator is not configured: {0}")]
    NotConfigured(String),

    #[error("prompt rendering failed: {0}")]
    Prompt(String),

    #[error("incomplete {subject} data: missing {field}")]
    IncompletePayload { subject: &'static str, field: &'static str },
}

// ─── Cache errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read {key}: {message}")]
    Read { key: String, message: String },

    #[error("failed to write {key}: {message}")]
    Write { key: String, message: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ScribeError>;
