use super::http::ArmoryClient;
use super::identity::{CharacterIdentity, GameVersion, Locale, Region};
use super::names::{NAME_FALLBACK, REALM_NAME_FALLBACK, primary_name, slugify};
use super::namespace::{ApiFamily, full_namespace};
use super::types::{
    AchievementSummary, CharacterMedia, CharacterProfileData, GuildRoster, MountCollection,
    PetCollection,
};
use crate::error::ArmoryError;
use futures_util::future::join5;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;

/// PvP milestone achievements. Ids are fixed by the game data.
pub const ACHIEVEMENT_100K_HONORABLE_KILLS: u64 = 583;
pub const ACHIEVEMENT_250K_HONORABLE_KILLS: u64 = 2336;
pub const ACHIEVEMENT_BATTLEMASTER: u64 = 783;

const AVATAR_ASSET_PREFERENCE: &[&str] = &["avatar", "inset", "main"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvpFlags {
    pub has_100k_hk: bool,
    pub has_250k_hk: bool,
    pub is_battlemaster: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuildRole {
    GuildMaster,
    Officer,
    Member,
}

impl GuildRole {
    pub fn from_rank(rank: u32) -> Self {
        match rank {
            0 => Self::GuildMaster,
            1 | 2 => Self::Officer,
            _ => Self::Member,
        }
    }
}

/// Normalized character record. `None` means the source endpoint was
/// unavailable or does not exist for this game version; it never means zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    pub name: String,
    pub id: u64,
    pub level: u32,
    pub race: String,
    #[serde(rename = "class")]
    pub class: String,
    pub faction: String,
    pub gender: String,
    pub realm_name: String,
    pub realm_slug: String,
    pub region: String,
    pub title: Option<String>,
    pub guild_name: Option<String>,
    pub guild_rank: Option<u32>,
    pub guild_member_count: Option<u32>,
    pub average_item_level: Option<u32>,
    pub achievement_points: Option<u32>,
    pub mounts_collected: Option<u32>,
    pub pets_collected: Option<u32>,
    pub avatar_url: Option<String>,
    pub game_version: GameVersion,
    pub game_version_display: String,
    pub pvp_flags: PvpFlags,
}

impl CharacterProfile {
    pub fn guild_role(&self) -> Option<GuildRole> {
        self.guild_rank.map(GuildRole::from_rank)
    }
}

pub(crate) fn unique_species_count(pets: &PetCollection) -> u32 {
    let species: HashSet<u64> = pets
        .pets
        .iter()
        .filter_map(|pet| pet.species.as_ref().and_then(|s| s.id))
        .collect();
    u32::try_from(species.len()).unwrap_or(u32::MAX)
}

pub(crate) fn pvp_flags(summary: &AchievementSummary) -> PvpFlags {
    let completed: HashSet<u64> = summary
        .achievements
        .iter()
        .filter(|a| a.is_completed())
        .map(|a| a.id)
        .collect();
    PvpFlags {
        has_100k_hk: completed.contains(&ACHIEVEMENT_100K_HONORABLE_KILLS),
        has_250k_hk: completed.contains(&ACHIEVEMENT_250K_HONORABLE_KILLS),
        is_battlemaster: completed.contains(&ACHIEVEMENT_BATTLEMASTER),
    }
}

pub(crate) fn pick_avatar(media: &CharacterMedia) -> Option<String> {
    AVATAR_ASSET_PREFERENCE.iter().find_map(|key| {
        media
            .assets
            .iter()
            .find(|asset| asset.key == *key && !asset.value.is_empty())
            .map(|asset| asset.value.clone())
    })
}

/// Rank of the member with this id on this realm; `None` when the roster
/// does not list them.
pub(crate) fn rank_in_roster(roster: &GuildRoster, character_id: u64, realm_slug: &str) -> Option<u32> {
    roster
        .members
        .iter()
        .find(|member| {
            member.character.id == character_id
                && member
                    .character
                    .realm
                    .as_ref()
                    .and_then(|realm| realm.slug.as_deref())
                    .is_none_or(|slug| slug == realm_slug)
        })
        .map(|member| member.rank)
}

fn render_title(base: &CharacterProfileData, locale: Locale) -> Option<String> {
    let template = base
        .active_title
        .as_ref()?
        .display_string
        .as_ref()?
        .primary(locale)?;
    Some(template.replace("{name}", &base.name))
}

fn sub_path<'a>(base: &[&'a str], leaf: &[&'a str]) -> Vec<&'a str> {
    base.iter().chain(leaf).copied().collect()
}

/// Await a non-essential sub-fetch, degrading any failure to `None`.
async fn best_effort<T>(
    what: &'static str,
    fetch: impl Future<Output = Result<T, ArmoryError>>,
) -> Option<T> {
    match fetch.await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(what, error = %err, "optional fetch failed; field unavailable");
            None
        }
    }
}

struct GuildDetails {
    rank: Option<u32>,
    member_count: Option<u32>,
}

/// Fetch and merge everything known about one character.
///
/// The base profile is essential and its failure propagates. Media,
/// collections and achievements are fetched concurrently and individually
/// degrade to `None`. Mount and pet collections are never requested for
/// Classic Era. The guild roster is requested only for guild members.
pub async fn fetch_character_profile(
    client: &ArmoryClient,
    region: Region,
    game_version: GameVersion,
    realm_slug: &str,
    character_name: &str,
    token: &str,
) -> Result<CharacterProfile, ArmoryError> {
    let namespace = full_namespace(game_version, ApiFamily::Profile, region)?;
    let name = character_name.trim().to_lowercase();
    let base_path = ["profile", "wow", "character", realm_slug, name.as_str()];

    // Stage 1: essential.
    let base: CharacterProfileData = client
        .get_json(region, &base_path, &namespace, &[], token, "character or realm")
        .await?;

    // Stage 2: concurrent, independent, best-effort.
    let media_path = sub_path(&base_path, &["character-media"]);
    let mounts_path = sub_path(&base_path, &["collections", "mounts"]);
    let pets_path = sub_path(&base_path, &["collections", "pets"]);
    let achievements_path = sub_path(&base_path, &["achievements"]);

    let media = best_effort(
        "character media",
        client.get_json::<CharacterMedia>(region, &media_path, &namespace, &[], token, "media"),
    );
    let mounts = async {
        if !game_version.has_collections() {
            return None;
        }
        best_effort(
            "mount collection",
            client.get_json::<MountCollection>(region, &mounts_path, &namespace, &[], token, "mounts"),
        )
        .await
    };
    let pets = async {
        if !game_version.has_collections() {
            return None;
        }
        best_effort(
            "pet collection",
            client.get_json::<PetCollection>(region, &pets_path, &namespace, &[], token, "pets"),
        )
        .await
    };
    let achievements = best_effort(
        "achievement summary",
        client.get_json::<AchievementSummary>(
            region,
            &achievements_path,
            &namespace,
            &[],
            token,
            "achievements",
        ),
    );

    // Stage 3: depends only on Stage 1, so it overlaps Stage 2.
    let guild = async {
        let guild_ref = base.guild.as_ref()?;
        let guild_name = guild_ref.name.as_deref().filter(|n| !n.is_empty())?;
        let guild_slug = slugify(guild_name);
        let guild_realm_slug = guild_ref
            .realm
            .as_ref()
            .and_then(|realm| realm.slug.clone())
            .or_else(|| base.realm.slug.clone())
            .unwrap_or_else(|| realm_slug.to_string());
        let roster_path = [
            "data",
            "wow",
            "guild",
            guild_realm_slug.as_str(),
            guild_slug.as_str(),
            "roster",
        ];
        let roster = best_effort(
            "guild roster",
            client.get_json::<GuildRoster>(region, &roster_path, &namespace, &[], token, "guild"),
        )
        .await?;

        let character_realm = base.realm.slug.as_deref().unwrap_or(realm_slug);
        let rank = rank_in_roster(&roster, base.id, character_realm);
        if rank.is_none() {
            tracing::warn!(
                character = %base.name,
                guild = guild_name,
                "character missing from own guild roster"
            );
        }
        Some(GuildDetails {
            rank,
            member_count: u32::try_from(roster.members.len()).ok(),
        })
    };

    let (media, mounts, pets, achievements, guild) =
        join5(media, mounts, pets, achievements, guild).await;

    let locale = client.locale();
    let guild_name = base
        .guild
        .as_ref()
        .and_then(|g| g.name.clone())
        .filter(|n| !n.is_empty());

    Ok(CharacterProfile {
        id: base.id,
        level: base.level,
        race: primary_name(base.race.as_ref().and_then(|r| r.name.as_ref()), locale, NAME_FALLBACK),
        class: primary_name(
            base.character_class.as_ref().and_then(|c| c.name.as_ref()),
            locale,
            NAME_FALLBACK,
        ),
        faction: primary_name(base.faction.as_ref().and_then(|f| f.name.as_ref()), locale, NAME_FALLBACK),
        gender: primary_name(base.gender.as_ref().and_then(|g| g.name.as_ref()), locale, NAME_FALLBACK),
        realm_name: primary_name(base.realm.name.as_ref(), locale, REALM_NAME_FALLBACK),
        realm_slug: base.realm.slug.clone().unwrap_or_else(|| realm_slug.to_string()),
        region: region.label(),
        title: render_title(&base, locale),
        guild_rank: guild.as_ref().and_then(|g| g.rank),
        guild_member_count: guild.as_ref().and_then(|g| g.member_count),
        guild_name,
        average_item_level: base.average_item_level,
        achievement_points: base
            .achievement_points
            .or_else(|| achievements.as_ref().and_then(|a| a.total_points)),
        mounts_collected: mounts
            .as_ref()
            .map(|m| u32::try_from(m.mounts.len()).unwrap_or(u32::MAX)),
        pets_collected: pets.as_ref().map(unique_species_count),
        avatar_url: media.as_ref().and_then(pick_avatar),
        game_version,
        game_version_display: game_version.display_name().to_string(),
        pvp_flags: achievements.as_ref().map(pvp_flags).unwrap_or_default(),
        name: base.name,
    })
}

/// [`fetch_character_profile`] addressed by a [`CharacterIdentity`].
pub async fn fetch_character(
    client: &ArmoryClient,
    identity: &CharacterIdentity,
    token: &str,
) -> Result<CharacterProfile, ArmoryError> {
    fetch_character_profile(
        client,
        identity.realm.region,
        identity.realm.game_version,
        &identity.realm.slug,
        &identity.name,
        token,
    )
    .await
}
