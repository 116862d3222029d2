use std::sync::Arc;

use tempfile::TempDir;

use crate::records::{ScriptedGenerator, stormrage, thrall};
use realmscribe::armory::Region;
use realmscribe::chronicle::{
    ChronicleOutcome, Chronicler, FileSummaryStore, GenerationError, MemorySummaryStore,
    NarrativeGenerator, SummaryCache, SummaryKey, Temperatures,
};

const TEMPERATURES: Temperatures = Temperatures {
    character: 0.9,
    realm: 0.8,
};

/// Shares one scripted generator between the chronicler and the test body.
struct Shared(Arc<ScriptedGenerator>);

impl NarrativeGenerator for Shared {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        temperature: f64,
    ) -> realmscribe::chronicle::GenerationFuture<'a> {
        self.0.generate(prompt, temperature)
    }
}

fn chronicler(
    script: Vec<Result<String, GenerationError>>,
    cache: SummaryCache,
) -> (Chronicler, Arc<ScriptedGenerator>) {
    let generator = Arc::new(ScriptedGenerator::new(script));
    let chronicler = Chronicler::new(Box::new(Shared(generator.clone())), cache, TEMPERATURES);
    (chronicler, generator)
}

fn memory_cache() -> SummaryCache {
    SummaryCache::new(Arc::new(MemorySummaryStore::new()), 10)
}

#[tokio::test]
async fn second_request_is_served_from_cache() {
    let (chronicler, generator) = chronicler(vec![Ok("The Warchief's tale.".into())], memory_cache());

    let first = chronicler
        .character_chronicle(&thrall(), Region::Us, false)
        .await
        .unwrap();
    assert!(matches!(first, ChronicleOutcome::Generated(_)));

    let second = chronicler
        .character_chronicle(&thrall(), Region::Us, false)
        .await
        .unwrap();
    let ChronicleOutcome::Cached(summary) = second else {
        panic!("expected cached chronicle");
    };
    assert_eq!(summary.text, "The Warchief's tale.");
    assert_eq!(generator.calls(), 1);

    let (prompt, temperature) = generator.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Thrall"));
    assert!((temperature - 0.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn refresh_generates_and_prepends() {
    let (chronicler, generator) = chronicler(
        vec![Ok("First telling.".into()), Ok("Second telling.".into())],
        memory_cache(),
    );

    chronicler
        .character_chronicle(&thrall(), Region::Us, false)
        .await
        .unwrap();
    let refreshed = chronicler
        .character_chronicle(&thrall(), Region::Us, true)
        .await
        .unwrap();
    assert!(matches!(refreshed, ChronicleOutcome::Generated(_)));
    assert_eq!(generator.calls(), 2);

    let key = SummaryKey::character(Region::Us, "area-52", "Thrall");
    assert_eq!(key.as_str(), "aiPlayerSummary-US-area-52-thrall-list");
    let stored = chronicler.cache().get(&key);
    let texts: Vec<&str> = stored.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Second telling.", "First telling."]);
}

#[tokio::test]
async fn generation_failure_is_never_cached() {
    let (chronicler, generator) = chronicler(
        vec![
            Err(GenerationError::Blocked("SAFETY".into())),
            Ok("Eventually told.".into()),
        ],
        memory_cache(),
    );

    let outcome = chronicler
        .realm_chronicle(&stormrage(), Region::Us, "stormrage", false)
        .await
        .unwrap();
    let ChronicleOutcome::Unavailable(err) = outcome else {
        panic!("expected unavailable");
    };
    assert_eq!(err, GenerationError::Blocked("SAFETY".into()));
    assert!(chronicler.cache().get(&SummaryKey::realm(Region::Us, "stormrage")).is_empty());

    // Nothing cached, so the next request generates again.
    let retry = chronicler
        .realm_chronicle(&stormrage(), Region::Us, "stormrage", false)
        .await
        .unwrap();
    assert_eq!(retry.summary().unwrap().text, "Eventually told.");
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn realm_prompt_uses_realm_temperature() {
    let (chronicler, generator) = chronicler(vec![Ok("A realm of storms.".into())], memory_cache());

    chronicler
        .realm_chronicle(&stormrage(), Region::Eu, "stormrage", false)
        .await
        .unwrap();

    let (prompt, temperature) = generator.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Stormrage"));
    assert!(prompt.contains("EU"));
    assert!((temperature - 0.8).abs() < f64::EPSILON);
}

#[tokio::test]
async fn incomplete_character_is_rejected_before_generation() {
    let (chronicler, generator) = chronicler(vec![Ok("unused".into())], memory_cache());
    let mut profile = thrall();
    profile.race = "N/A".into();

    let result = chronicler
        .character_chronicle(&profile, Region::Us, false)
        .await;
    assert!(result.is_err());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn file_store_persists_across_chroniclers() {
    let dir = TempDir::new().unwrap();
    let cache_dir = dir.path().join("summaries");

    let file_cache = || SummaryCache::new(Arc::new(FileSummaryStore::new(&cache_dir)), 2);

    let (first, _) = chronicler(
        vec![Ok("One.".into()), Ok("Two.".into()), Ok("Three.".into())],
        file_cache(),
    );
    for _ in 0..3 {
        first
            .realm_chronicle(&stormrage(), Region::Us, "stormrage", true)
            .await
            .unwrap();
    }

    let path = cache_dir.join("aiSummary-US-stormrage-list.json");
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entries = raw.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["text"], "Three.");
    assert!(entries[0]["timestamp"].is_i64());

    let (second, generator) = chronicler(Vec::new(), file_cache());
    let outcome = second
        .realm_chronicle(&stormrage(), Region::Us, "stormrage", false)
        .await
        .unwrap();
    let ChronicleOutcome::Cached(summary) = outcome else {
        panic!("expected cached chronicle");
    };
    assert_eq!(summary.text, "Three.");
    assert_eq!(generator.calls(), 0);

    let keys = second.cache().keys().unwrap();
    assert_eq!(keys, vec![SummaryKey::realm(Region::Us, "stormrage")]);
}
