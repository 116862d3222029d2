use super::cache::{CachedSummary, SummaryCache, SummaryKey};
use super::generator::{GenerationError, NarrativeGenerator};
use super::payload::{CharacterPayload, RealmPayload};
use super::prompt::{TeraEngine, build_character_prompt, build_realm_prompt};
use crate::armory::{CharacterProfile, ConnectedRealmGroup, Region};
use crate::config::GeminiConfig;
use crate::error::{ChronicleError, ScribeError};
use tokio::sync::Mutex;

/// How a chronicle request was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChronicleOutcome {
    /// Served from the cache without calling the generator.
    Cached(CachedSummary),
    /// Freshly generated and stored at index 0.
    Generated(CachedSummary),
    /// The generator declined or failed; nothing was stored.
    Unavailable(GenerationError),
}

impl ChronicleOutcome {
    pub fn summary(&self) -> Option<&CachedSummary> {
        match self {
            Self::Cached(summary) | Self::Generated(summary) => Some(summary),
            Self::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Temperatures {
    pub character: f64,
    pub realm: f64,
}

impl From<&GeminiConfig> for Temperatures {
    fn from(config: &GeminiConfig) -> Self {
        Self {
            character: config.character_temperature,
            realm: config.realm_temperature,
        }
    }
}

/// Decides when to generate and stores what the generator returns.
pub struct Chronicler {
    generator: Box<dyn NarrativeGenerator>,
    cache: SummaryCache,
    engine: Mutex<TeraEngine>,
    temperatures: Temperatures,
}

impl Chronicler {
    pub fn new(
        generator: Box<dyn NarrativeGenerator>,
        cache: SummaryCache,
        temperatures: Temperatures,
    ) -> Self {
        Self {
            generator,
            cache,
            engine: Mutex::new(TeraEngine::new()),
            temperatures,
        }
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    pub async fn character_chronicle(
        &self,
        profile: &CharacterProfile,
        region: Region,
        force_refresh: bool,
    ) -> Result<ChronicleOutcome, ScribeError> {
        let key = SummaryKey::character(region, &profile.realm_slug, &profile.name);
        if let Some(cached) = self.cached(&key, force_refresh) {
            return Ok(ChronicleOutcome::Cached(cached));
        }

        let payload = CharacterPayload::from_profile(profile);
        let prompt = build_character_prompt(&mut *self.engine.lock().await, &payload)?;
        self.generate_and_store(&key, &prompt, self.temperatures.character)
            .await
    }

    pub async fn realm_chronicle(
        &self,
        group: &ConnectedRealmGroup,
        region: Region,
        realm_slug: &str,
        force_refresh: bool,
    ) -> Result<ChronicleOutcome, ScribeError> {
        let key = SummaryKey::realm(region, realm_slug);
        if let Some(cached) = self.cached(&key, force_refresh) {
            return Ok(ChronicleOutcome::Cached(cached));
        }

        let payload = RealmPayload::from_group(group, realm_slug, region).ok_or(
            ChronicleError::IncompletePayload {
                subject: "realm",
                field: "member realms",
            },
        )?;
        let prompt = build_realm_prompt(&mut *self.engine.lock().await, &payload)?;
        self.generate_and_store(&key, &prompt, self.temperatures.realm)
            .await
    }

    fn cached(&self, key: &SummaryKey, force_refresh: bool) -> Option<CachedSummary> {
        if force_refresh {
            tracing::debug!(%key, "refresh requested; skipping cache");
            return None;
        }
        let cached = self.cache.latest(key);
        if cached.is_some() {
            tracing::debug!(%key, "serving cached chronicle");
        }
        cached
    }

    async fn generate_and_store(
        &self,
        key: &SummaryKey,
        prompt: &str,
        temperature: f64,
    ) -> Result<ChronicleOutcome, ScribeError> {
        tracing::info!(%key, generator = self.generator.name(), "generating chronicle");
        match self.generator.generate(prompt, temperature).await {
            Ok(text) => {
                let stored = self.cache.add(key, &text)?;
                Ok(ChronicleOutcome::Generated(stored))
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "chronicle not generated; cache left untouched");
                Ok(ChronicleOutcome::Unavailable(err))
            }
        }
    }
}
