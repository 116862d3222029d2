//! Game version ↔ Battle.net namespace mapping.
//!
//! The table is enumerated explicitly per API family; nothing is derived from
//! string patterns on the way out. The reverse direction is only defined for
//! the dynamic family.

use super::identity::{GameVersion, Region};
use crate::error::ArmoryError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Battle.net API data family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApiFamily {
    Dynamic,
    Profile,
    Static,
}

const NAMESPACE_TABLE: &[(ApiFamily, GameVersion, &str)] = &[
    (ApiFamily::Dynamic, GameVersion::Retail, "dynamic"),
    (ApiFamily::Dynamic, GameVersion::Classic, "dynamic-classic"),
    (ApiFamily::Dynamic, GameVersion::ClassicEra, "dynamic-classic1x"),
    (ApiFamily::Profile, GameVersion::Retail, "profile"),
    (ApiFamily::Profile, GameVersion::Classic, "profile-classic"),
    (ApiFamily::Profile, GameVersion::ClassicEra, "profile-classic1x"),
    (ApiFamily::Static, GameVersion::Retail, "static"),
    (ApiFamily::Static, GameVersion::Classic, "static-classic"),
    (ApiFamily::Static, GameVersion::ClassicEra, "static-classic1x"),
];

/// Namespace prefix for a game version within an API family.
pub fn to_api_namespace(version: GameVersion, family: ApiFamily) -> Result<&'static str, ArmoryError> {
    NAMESPACE_TABLE
        .iter()
        .find(|(f, v, _)| *f == family && *v == version)
        .map(|(_, _, prefix)| *prefix)
        .ok_or_else(|| ArmoryError::UnsupportedVersion {
            version: version.to_string(),
            family: family.to_string(),
        })
}

/// String-typed entry point for identifiers arriving from URLs or the CLI.
pub fn to_api_namespace_str(version: &str, family: &str) -> Result<&'static str, ArmoryError> {
    let unsupported = || ArmoryError::UnsupportedVersion {
        version: version.to_string(),
        family: family.to_string(),
    };
    let version = GameVersion::from_str(version).map_err(|_| unsupported())?;
    let family = ApiFamily::from_str(family).map_err(|_| unsupported())?;
    to_api_namespace(version, family)
}

/// Full namespace sent on the wire, e.g. `profile-classic1x-eu`.
pub fn full_namespace(
    version: GameVersion,
    family: ApiFamily,
    region: Region,
) -> Result<String, ArmoryError> {
    let prefix = to_api_namespace(version, family)?;
    Ok(format!("{prefix}-{region}"))
}

/// Inverse of the dynamic mapping. Accepts bare prefixes or region-qualified
/// namespaces; returns `None` for anything unrecognised.
pub fn to_url_type(api_namespace: &str) -> Option<GameVersion> {
    let version = if api_namespace.starts_with("dynamic-classic1x") {
        Some(GameVersion::ClassicEra)
    } else if api_namespace.starts_with("dynamic-classic") {
        Some(GameVersion::Classic)
    } else if api_namespace.starts_with("dynamic") {
        Some(GameVersion::Retail)
    } else {
        None
    };

    if version.is_none() {
        tracing::warn!(namespace = api_namespace, "unknown API namespace");
    }
    version
}
