// ── Addressing and naming ───────────────────────────────────────────────────
pub mod identity;
pub mod names;
pub mod namespace;

// ── Transport ───────────────────────────────────────────────────────────────
pub mod auth;
pub mod http;
pub(crate) mod types;

// ── Resolvers ───────────────────────────────────────────────────────────────
pub mod character;
pub mod realm;

pub use auth::{
    BrokerTokenProvider, ClientCredentialsTokenProvider, TokenProvider, create_token_provider,
    require_token,
};
pub use character::{
    ACHIEVEMENT_100K_HONORABLE_KILLS, ACHIEVEMENT_250K_HONORABLE_KILLS, ACHIEVEMENT_BATTLEMASTER,
    CharacterProfile, GuildRole, PvpFlags, fetch_character, fetch_character_profile,
};
pub use http::{ArmoryClient, build_http_client, build_http_client_with_timeout};
pub use identity::{
    CharacterIdentity, GameVersion, Locale, RealmIdentity, Region, Selection,
    normalize_character_name,
};
pub use names::{DisplayName, LocalizedName, primary_name, slugify, title_case_slug};
pub use namespace::{ApiFamily, full_namespace, to_api_namespace, to_url_type};
pub use realm::{
    ConnectedRealmGroup, RealmIndexEntry, RealmListing, RealmLookup, RealmNotFound, RealmStatus,
    RealmSummary, list_realms, realm_index, resolve_realm, resolve_realm_identity,
};
