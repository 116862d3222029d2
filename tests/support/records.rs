use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use realmscribe::armory::{
    CharacterProfile, ConnectedRealmGroup, GameVersion, PvpFlags, RealmStatus, RealmSummary,
};
use realmscribe::chronicle::{GenerationError, GenerationFuture, NarrativeGenerator};

pub fn thrall() -> CharacterProfile {
    CharacterProfile {
        name: "Thrall".into(),
        id: 42,
        level: 80,
        race: "Orc".into(),
        class: "Shaman".into(),
        faction: "Horde".into(),
        gender: "Male".into(),
        realm_name: "Area 52".into(),
        realm_slug: "area-52".into(),
        region: "US".into(),
        title: Some("Thrall the Warchief".into()),
        guild_name: Some("Horde Vanguard".into()),
        guild_rank: Some(0),
        guild_member_count: Some(640),
        average_item_level: Some(612),
        achievement_points: Some(21_450),
        mounts_collected: Some(412),
        pets_collected: Some(120),
        avatar_url: None,
        game_version: GameVersion::Retail,
        game_version_display: "Retail".into(),
        pvp_flags: PvpFlags {
            is_battlemaster: true,
            ..PvpFlags::default()
        },
    }
}

pub fn stormrage() -> ConnectedRealmGroup {
    ConnectedRealmGroup {
        id: Some(60),
        status_code: RealmStatus::Up,
        status_text: "Up".into(),
        population_code: "FULL".into(),
        population_text: "Full".into(),
        has_queue: false,
        member_realms: vec![RealmSummary {
            name: "Stormrage".into(),
            slug: "stormrage".into(),
            id: 60,
            timezone: "America/New_York".into(),
            type_code: "NORMAL".into(),
            type_text: "Normal".into(),
            category_text: "United States".into(),
            locale: "enUS".into(),
            region_text: "North America".into(),
        }],
    }
}

/// Replays scripted results and records every prompt it receives.
pub struct ScriptedGenerator {
    results: Mutex<Vec<Result<String, GenerationError>>>,
    calls: AtomicUsize,
    pub prompts: Mutex<Vec<(String, f64)>>,
}

impl ScriptedGenerator {
    pub fn new(mut results: Vec<Result<String, GenerationError>>) -> Self {
        results.reverse();
        Self {
            results: Mutex::new(results),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NarrativeGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate<'a>(&'a self, prompt: &'a str, temperature: f64) -> GenerationFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        let next = self
            .results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(GenerationError::Failed("script exhausted".into())));
        Box::pin(async move { next })
    }
}
