use super::http::ArmoryClient;
use super::identity::{GameVersion, Locale, RealmIdentity, Region, Selection};
use super::names::{NAME_FALLBACK, REALM_NAME_FALLBACK, primary_name, title_case_slug};
use super::namespace::{ApiFamily, full_namespace, to_api_namespace};
use super::types::{ConnectedRealmData, ConnectedRealmSearch, RealmData, RealmIndex, TypedName};
use crate::error::ArmoryError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const SEARCH_PAGE_SIZE: u32 = 100;
const LISTING_PAGE_SIZE: u32 = 1000;
const DUMMY_REALM_PREFIXES: &[&str] = &["US PS"];
const INDEX_EXCLUDED_PREFIXES: &[&str] = &["Test Realm", "US PS"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RealmStatus {
    Up,
    Down,
}

impl RealmStatus {
    fn from_code(code: Option<&str>) -> Self {
        match code {
            Some(code) if code.eq_ignore_ascii_case("UP") => Self::Up,
            _ => Self::Down,
        }
    }
}

/// One realm inside a connected-realm group, with locale-resolved text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmSummary {
    pub name: String,
    pub slug: String,
    pub id: u64,
    pub timezone: String,
    /// Ruleset code such as `NORMAL`, `PVP` or `RPPVP`.
    pub type_code: String,
    pub type_text: String,
    pub category_text: String,
    pub locale: String,
    pub region_text: String,
}

/// Read-only snapshot of a connected-realm group, fetched fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedRealmGroup {
    pub id: Option<u64>,
    pub status_code: RealmStatus,
    pub status_text: String,
    pub population_code: String,
    pub population_text: String,
    pub has_queue: bool,
    pub member_realms: Vec<RealmSummary>,
}

impl ConnectedRealmGroup {
    /// Representative realm for group-level display.
    pub fn primary(&self) -> Option<&RealmSummary> {
        self.member_realms.first()
    }

    pub fn member(&self, slug: &str) -> Option<&RealmSummary> {
        self.member_realms.iter().find(|realm| realm.slug == slug)
    }

    pub fn is_connected(&self) -> bool {
        self.member_realms.len() > 1
    }

    pub fn connection_label(&self) -> String {
        if self.is_connected() {
            let names: Vec<&str> = self.member_realms.iter().map(|r| r.name.as_str()).collect();
            format!("Connected realms: {}", names.join(", "))
        } else {
            "Not connected to other realms".to_string()
        }
    }
}

/// Not-found is an expected outcome, carried as a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmNotFound {
    /// Title-cased name derived from the slug so callers can still render something.
    pub fallback_name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RealmLookup {
    Found(ConnectedRealmGroup),
    NotFound(RealmNotFound),
}

impl RealmLookup {
    pub fn found(&self) -> Option<&ConnectedRealmGroup> {
        match self {
            Self::Found(group) => Some(group),
            Self::NotFound(_) => None,
        }
    }
}

fn localized_text(name: Option<&TypedName>, locale: Locale) -> String {
    primary_name(name.and_then(|n| n.name.as_ref()), locale, NAME_FALLBACK)
}

fn summarize_realm(realm: &RealmData, locale: Locale) -> RealmSummary {
    RealmSummary {
        name: primary_name(realm.name.as_ref(), locale, REALM_NAME_FALLBACK),
        slug: realm.slug.clone(),
        id: realm.id,
        timezone: realm.timezone.clone().unwrap_or_default(),
        type_code: realm
            .realm_type
            .as_ref()
            .and_then(|t| t.kind.clone())
            .unwrap_or_default(),
        type_text: localized_text(realm.realm_type.as_ref(), locale),
        category_text: primary_name(realm.category.as_ref(), locale, NAME_FALLBACK),
        locale: realm.locale.clone().unwrap_or_default(),
        region_text: primary_name(
            realm.region.as_ref().and_then(|r| r.name.as_ref()),
            locale,
            NAME_FALLBACK,
        ),
    }
}

fn normalize_group(data: &ConnectedRealmData, realms: &[RealmData], locale: Locale) -> ConnectedRealmGroup {
    ConnectedRealmGroup {
        id: data.id,
        status_code: RealmStatus::from_code(data.status.kind.as_deref()),
        status_text: localized_text(Some(&data.status), locale),
        population_code: data.population.kind.clone().unwrap_or_default(),
        population_text: localized_text(Some(&data.population), locale),
        has_queue: data.has_queue,
        member_realms: realms.iter().map(|r| summarize_realm(r, locale)).collect(),
    }
}

/// Pick the first group whose member list contains `slug`.
pub(crate) fn find_group(
    search: &ConnectedRealmSearch,
    slug: &str,
    locale: Locale,
) -> Option<ConnectedRealmGroup> {
    for result in &search.results {
        let Some(data) = result.data.as_ref() else {
            tracing::warn!("skipping connected realm search result without data");
            continue;
        };
        let Some(realms) = data.realms.as_deref() else {
            tracing::warn!(group = ?data.id, "skipping connected realm group without realm list");
            continue;
        };
        if realms.iter().any(|realm| realm.slug == slug) {
            return Some(normalize_group(data, realms, locale));
        }
    }
    None
}

/// Locate the connected-realm group containing `slug`.
///
/// Only transport and decode failures are errors; an unknown slug yields
/// [`RealmLookup::NotFound`].
pub async fn resolve_realm(
    client: &ArmoryClient,
    region: Region,
    namespace_prefix: &str,
    slug: &str,
    token: &str,
) -> Result<RealmLookup, ArmoryError> {
    let namespace = format!("{namespace_prefix}-{region}");
    let search: ConnectedRealmSearch = client
        .get_json(
            region,
            &["data", "wow", "search", "connected-realm"],
            &namespace,
            &[
                ("realms.slug", slug.to_string()),
                ("_pageSize", SEARCH_PAGE_SIZE.to_string()),
            ],
            token,
            "connected realm",
        )
        .await?;

    let not_found = |error: String| -> Result<RealmLookup, ArmoryError> {
        tracing::info!(slug, namespace = %namespace, "realm not found");
        Ok(RealmLookup::NotFound(RealmNotFound {
            fallback_name: title_case_slug(slug),
            error,
        }))
    };

    if search.results.is_empty() {
        return not_found("No connected realms found for this game version/region.".into());
    }

    match find_group(&search, slug, client.locale()) {
        Some(group) => Ok(RealmLookup::Found(group)),
        None => not_found(format!(
            "Details for realm slug '{slug}' could not be located in this region/version."
        )),
    }
}

/// [`resolve_realm`] addressed by a [`RealmIdentity`].
pub async fn resolve_realm_identity(
    client: &ArmoryClient,
    identity: &RealmIdentity,
    token: &str,
) -> Result<RealmLookup, ArmoryError> {
    let prefix = to_api_namespace(identity.game_version, ApiFamily::Dynamic)?;
    resolve_realm(client, identity.region, prefix, &identity.slug, token).await
}

/// One row of the realm browser: a connected group shown through its first realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmListing {
    pub name: String,
    pub slug: String,
    pub status_code: RealmStatus,
    pub status_text: String,
    pub population_text: String,
    pub type_text: String,
    pub category_text: String,
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

pub(crate) fn listings_from_search(search: &ConnectedRealmSearch, locale: Locale) -> Vec<RealmListing> {
    let mut listings: Vec<RealmListing> = search
        .results
        .iter()
        .filter_map(|result| {
            let data = result.data.as_ref()?;
            let primary = data.realms.as_deref()?.first()?;
            let name = primary.name.as_ref()?.primary(locale)?.to_string();
            if primary.slug.is_empty() {
                return None;
            }
            Some(RealmListing {
                name,
                slug: primary.slug.clone(),
                status_code: RealmStatus::from_code(data.status.kind.as_deref()),
                status_text: localized_text(Some(&data.status), locale),
                population_text: localized_text(Some(&data.population), locale),
                type_text: localized_text(primary.realm_type.as_ref(), locale),
                category_text: primary_name(primary.category.as_ref(), locale, NAME_FALLBACK),
            })
        })
        .filter(|listing| {
            !DUMMY_REALM_PREFIXES
                .iter()
                .any(|prefix| listing.name.starts_with(prefix))
        })
        .collect();

    listings.sort_by(|a, b| by_name(&a.name, &b.name));
    listings
}

/// All connected realms for a selection, sorted by name.
pub async fn list_realms(
    client: &ArmoryClient,
    selection: Selection,
    token: &str,
) -> Result<Vec<RealmListing>, ArmoryError> {
    let namespace = full_namespace(selection.game_version, ApiFamily::Dynamic, selection.region)?;
    // The selection's locale drives both the request and name resolution here,
    // not the client default.
    let search: ConnectedRealmSearch = client
        .get_json_in(
            selection.locale,
            selection.region,
            &["data", "wow", "search", "connected-realm"],
            &namespace,
            &[("_pageSize", LISTING_PAGE_SIZE.to_string())],
            token,
            "connected realm list",
        )
        .await?;

    Ok(listings_from_search(&search, selection.locale))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmIndexEntry {
    pub name: String,
    pub slug: String,
}

/// Realm names and slugs for a picker, without status data.
pub async fn realm_index(
    client: &ArmoryClient,
    region: Region,
    game_version: GameVersion,
    token: &str,
) -> Result<Vec<RealmIndexEntry>, ArmoryError> {
    let namespace = full_namespace(game_version, ApiFamily::Dynamic, region)?;
    let index: RealmIndex = client
        .get_json(
            region,
            &["data", "wow", "realm", "index"],
            &namespace,
            &[],
            token,
            "realm index",
        )
        .await?;

    if index.realms.is_empty() {
        tracing::warn!(namespace = %namespace, "realm index is empty");
    }

    let mut entries: Vec<RealmIndexEntry> = index
        .realms
        .iter()
        .map(|realm| RealmIndexEntry {
            name: primary_name(realm.name.as_ref(), client.locale(), NAME_FALLBACK),
            slug: realm.slug.clone().unwrap_or_default(),
        })
        .filter(|entry| entry.name != NAME_FALLBACK && !entry.slug.is_empty())
        .filter(|entry| {
            !INDEX_EXCLUDED_PREFIXES
                .iter()
                .any(|prefix| entry.name.starts_with(prefix))
        })
        .collect();

    entries.sort_by(|a, b| by_name(&a.name, &b.name));
    Ok(entries)
}
