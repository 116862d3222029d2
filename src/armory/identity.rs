use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Battle.net API region.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Region {
    #[default]
    Us,
    Eu,
    Kr,
    Tw,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Kr => "kr",
            Self::Tw => "tw",
        }
    }

    /// Upper-case label used in display records and cache keys.
    pub fn label(self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

/// Game version partition. Serialized as the URL-friendly type identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum GameVersion {
    #[default]
    #[serde(rename = "retail")]
    #[strum(serialize = "retail")]
    Retail,
    #[serde(rename = "classic")]
    #[strum(serialize = "classic")]
    Classic,
    #[serde(rename = "classicera", alias = "classicEra", alias = "classic-era")]
    #[strum(to_string = "classicera", serialize = "classic-era", serialize = "classic_era")]
    ClassicEra,
}

impl GameVersion {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Retail => "Retail",
            Self::Classic => "Cataclysm",
            Self::ClassicEra => "Classic Era",
        }
    }

    /// Classic Era has no mount or pet collection endpoints.
    pub fn has_collections(self) -> bool {
        !matches!(self, Self::ClassicEra)
    }
}

/// Locales the Game Data APIs localize names into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Locale {
    #[default]
    #[serde(rename = "en_US")]
    #[strum(serialize = "en_US")]
    EnUs,
    #[serde(rename = "ko_KR")]
    #[strum(serialize = "ko_KR")]
    KoKr,
    #[serde(rename = "fr_FR")]
    #[strum(serialize = "fr_FR")]
    FrFr,
    #[serde(rename = "de_DE")]
    #[strum(serialize = "de_DE")]
    DeDe,
    #[serde(rename = "zh_CN")]
    #[strum(serialize = "zh_CN")]
    ZhCn,
    #[serde(rename = "es_ES")]
    #[strum(serialize = "es_ES")]
    EsEs,
    #[serde(rename = "zh_TW")]
    #[strum(serialize = "zh_TW")]
    ZhTw,
    #[serde(rename = "es_MX")]
    #[strum(serialize = "es_MX")]
    EsMx,
    #[serde(rename = "ru_RU")]
    #[strum(serialize = "ru_RU")]
    RuRu,
    #[serde(rename = "pt_BR")]
    #[strum(serialize = "pt_BR")]
    PtBr,
    #[serde(rename = "it_IT")]
    #[strum(serialize = "it_IT")]
    ItIt,
}

impl Locale {
    pub const FALLBACK: Self = Self::EnUs;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::KoKr => "ko_KR",
            Self::FrFr => "fr_FR",
            Self::DeDe => "de_DE",
            Self::ZhCn => "zh_CN",
            Self::EsEs => "es_ES",
            Self::ZhTw => "zh_TW",
            Self::EsMx => "es_MX",
            Self::RuRu => "ru_RU",
            Self::PtBr => "pt_BR",
            Self::ItIt => "it_IT",
        }
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// A realm as addressed by the user: region, game version and slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RealmIdentity {
    pub region: Region,
    pub game_version: GameVersion,
    pub slug: String,
}

impl RealmIdentity {
    pub fn new(region: Region, game_version: GameVersion, slug: impl Into<String>) -> Self {
        Self {
            region,
            game_version,
            slug: slug.into(),
        }
    }
}

/// A character as addressed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterIdentity {
    pub realm: RealmIdentity,
    pub name: String,
}

impl CharacterIdentity {
    pub fn new(realm: RealmIdentity, name: &str) -> Self {
        Self {
            realm,
            name: normalize_character_name(name),
        }
    }
}

/// Lookups address characters by their trimmed, lower-cased name.
pub fn normalize_character_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Current filter selection for listing realms. Updated by value, never shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub region: Region,
    pub game_version: GameVersion,
    pub locale: Locale,
}

impl Selection {
    pub fn with_region(self, region: Region) -> Self {
        Self { region, ..self }
    }

    pub fn with_game_version(self, game_version: GameVersion) -> Self {
        Self {
            game_version,
            ..self
        }
    }

    pub fn with_locale(self, locale: Locale) -> Self {
        Self { locale, ..self }
    }
}
