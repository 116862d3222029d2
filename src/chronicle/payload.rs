//! Structured inputs for narrative generation, built from normalized records
//! rather than raw API responses.

use crate::armory::names::NAME_FALLBACK;
use crate::armory::{CharacterProfile, ConnectedRealmGroup, Region};
use crate::error::ChronicleError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPayload {
    pub name: String,
    pub race: String,
    #[serde(rename = "character_class")]
    pub class: String,
    pub level: u32,
    pub realm: String,
    pub region: String,
    pub faction: String,
    pub title: Option<String>,
    pub guild: Option<String>,
    pub guild_rank: Option<u32>,
    pub guild_member_count: Option<u32>,
    pub average_item_level: Option<u32>,
    pub achievement_points: Option<u32>,
    pub mounts_collected: Option<u32>,
    pub pets_collected: Option<u32>,
    pub is_battlemaster: bool,
    #[serde(rename = "has250kHKs")]
    pub has_250k_hks: bool,
    #[serde(rename = "has100kHKs")]
    pub has_100k_hks: bool,
    pub game_version_display: String,
}

impl CharacterPayload {
    pub fn from_profile(profile: &CharacterProfile) -> Self {
        Self {
            name: profile.name.clone(),
            race: profile.race.clone(),
            class: profile.class.clone(),
            level: profile.level,
            realm: profile.realm_name.clone(),
            region: profile.region.clone(),
            faction: profile.faction.clone(),
            title: profile.title.clone(),
            guild: profile.guild_name.clone(),
            guild_rank: profile.guild_rank,
            guild_member_count: profile.guild_member_count,
            average_item_level: profile.average_item_level,
            achievement_points: profile.achievement_points,
            mounts_collected: profile.mounts_collected,
            pets_collected: profile.pets_collected,
            is_battlemaster: profile.pvp_flags.is_battlemaster,
            has_250k_hks: profile.pvp_flags.has_250k_hk,
            has_100k_hks: profile.pvp_flags.has_100k_hk,
            game_version_display: profile.game_version_display.clone(),
        }
    }

    /// Every field the prompt cannot do without must be present.
    pub fn validate(&self) -> Result<(), ChronicleError> {
        let essentials = [
            ("name", self.name.as_str()),
            ("race", self.race.as_str()),
            ("class", self.class.as_str()),
            ("realm", self.realm.as_str()),
            ("region", self.region.as_str()),
            ("faction", self.faction.as_str()),
            ("game version", self.game_version_display.as_str()),
        ];
        if let Some((field, _)) = essentials.iter().find(|(_, value)| is_missing(value)) {
            return Err(ChronicleError::IncompletePayload {
                subject: "character",
                field: *field,
            });
        }
        if self.level == 0 {
            return Err(ChronicleError::IncompletePayload {
                subject: "character",
                field: "level",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmPayload {
    pub name: String,
    pub region: String,
    /// Ruleset as shown to players, e.g. `Normal` or `RP PvP`.
    #[serde(rename = "type")]
    pub realm_type: String,
    /// Ruleset code when the API supplied one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_code: String,
    pub category: String,
}

impl RealmPayload {
    /// Describe the realm `slug` of `group`. Falls back to the group's primary
    /// realm when the slug is not a member.
    pub fn from_group(group: &ConnectedRealmGroup, slug: &str, region: Region) -> Option<Self> {
        let realm = group.member(slug).or_else(|| group.primary())?;
        Some(Self {
            name: realm.name.clone(),
            region: region.label(),
            realm_type: realm.type_text.clone(),
            type_code: realm.type_code.clone(),
            category: realm.category_text.clone(),
        })
    }

    pub fn validate(&self) -> Result<(), ChronicleError> {
        let essentials = [
            ("name", self.name.as_str()),
            ("region", self.region.as_str()),
            ("type", self.realm_type.as_str()),
            ("category", self.category.as_str()),
        ];
        match essentials.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ChronicleError::IncompletePayload {
                subject: "realm",
                field: *field,
            }),
            None => Ok(()),
        }
    }
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NAME_FALLBACK
}
