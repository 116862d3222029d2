// ── Inputs ──────────────────────────────────────────────────────────────────
pub mod payload;
pub mod prompt;

// ── Generation ──────────────────────────────────────────────────────────────
pub mod gemini;
pub mod generator;

// ── Persistence and orchestration ───────────────────────────────────────────
pub mod cache;
pub mod service;

pub use cache::{
    CachedSummary, FileSummaryStore, MemorySummaryStore, SummaryCache, SummaryKey, SummaryStore,
};
pub use gemini::GeminiNarrator;
pub use generator::{GenerationError, GenerationFuture, NarrativeGenerator};
pub use payload::{CharacterPayload, RealmPayload};
pub use service::{ChronicleOutcome, Chronicler, Temperatures};
