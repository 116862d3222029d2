//! Response shapes of the Battle.net endpoints we consume. Only the fields the
//! normalizers read are modelled; everything else is ignored.

use super::names::DisplayName;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub(crate) access_token: Option<String>,
}

// ── Realm search ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConnectedRealmSearch {
    #[serde(default)]
    pub(crate) results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    #[serde(default)]
    pub(crate) data: Option<ConnectedRealmData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConnectedRealmData {
    #[serde(default)]
    pub(crate) id: Option<u64>,
    pub(crate) status: TypedName,
    pub(crate) population: TypedName,
    #[serde(default)]
    pub(crate) has_queue: bool,
    #[serde(default)]
    pub(crate) realms: Option<Vec<RealmData>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RealmData {
    pub(crate) id: u64,
    pub(crate) slug: String,
    #[serde(default)]
    pub(crate) name: Option<DisplayName>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(rename = "type", default)]
    pub(crate) realm_type: Option<TypedName>,
    #[serde(default)]
    pub(crate) category: Option<DisplayName>,
    #[serde(default)]
    pub(crate) region: Option<NamedRef>,
}

/// `{ "type": "UP", "name": {...} }` pairs used for status, population, faction…
#[derive(Debug, Deserialize)]
pub(crate) struct TypedName {
    #[serde(rename = "type", default)]
    pub(crate) kind: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<DisplayName>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedRef {
    #[serde(default)]
    pub(crate) id: Option<u64>,
    #[serde(default)]
    pub(crate) name: Option<DisplayName>,
    #[serde(default)]
    pub(crate) slug: Option<String>,
}

// ── Realm index ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RealmIndex {
    #[serde(default)]
    pub(crate) realms: Vec<NamedRef>,
}

// ── Character profile and sub-resources ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterProfileData {
    pub(crate) id: u64,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) level: u32,
    #[serde(default)]
    pub(crate) race: Option<NamedRef>,
    #[serde(default)]
    pub(crate) character_class: Option<NamedRef>,
    #[serde(default)]
    pub(crate) faction: Option<TypedName>,
    #[serde(default)]
    pub(crate) gender: Option<TypedName>,
    pub(crate) realm: NamedRef,
    #[serde(default)]
    pub(crate) guild: Option<GuildRef>,
    #[serde(default)]
    pub(crate) active_title: Option<ActiveTitle>,
    #[serde(default)]
    pub(crate) average_item_level: Option<u32>,
    #[serde(default)]
    pub(crate) achievement_points: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GuildRef {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) realm: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActiveTitle {
    #[serde(default)]
    pub(crate) display_string: Option<DisplayName>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CharacterMedia {
    #[serde(default)]
    pub(crate) assets: Vec<MediaAsset>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaAsset {
    pub(crate) key: String,
    pub(crate) value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MountCollection {
    #[serde(default)]
    pub(crate) mounts: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PetCollection {
    #[serde(default)]
    pub(crate) pets: Vec<CollectedPet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectedPet {
    #[serde(default)]
    pub(crate) species: Option<NamedRef>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AchievementSummary {
    #[serde(default)]
    pub(crate) total_points: Option<u32>,
    #[serde(default)]
    pub(crate) achievements: Vec<AchievementProgress>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AchievementProgress {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) completed_timestamp: Option<i64>,
    #[serde(default)]
    pub(crate) criteria: Option<AchievementCriteria>,
}

impl AchievementProgress {
    pub(crate) fn is_completed(&self) -> bool {
        self.completed_timestamp.is_some()
            || self.criteria.as_ref().is_some_and(|c| c.is_completed)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AchievementCriteria {
    #[serde(default)]
    pub(crate) is_completed: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GuildRoster {
    #[serde(default)]
    pub(crate) members: Vec<RosterMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterMember {
    pub(crate) character: RosterCharacter,
    pub(crate) rank: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterCharacter {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) realm: Option<NamedRef>,
}
