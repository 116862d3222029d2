use super::identity::Locale;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Fallback when no usable name exists.
pub const NAME_FALLBACK: &str = "N/A";
/// Fallback for realm-specific call sites.
pub const REALM_NAME_FALLBACK: &str = "Unknown Realm";

/// Convert display text to a URL-safe slug.
///
/// Whitespace, underscores and hyphen runs collapse to a single `-`; anything
/// outside `[a-z0-9-]` after lowercasing is dropped; leading and trailing
/// hyphens are trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
    }

    slug
}

/// Human-readable name derived purely from a slug: `"twisting-nether"` → `"Twisting Nether"`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Locale-keyed names in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedName {
    entries: Vec<(String, String)>,
}

impl LocalizedName {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Entry for `locale`; an empty string counts as absent.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, value)| key == locale && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    /// First non-empty entry in API order. Empty values are skipped rather
    /// than returned, so a blank leading locale never wins over a real name.
    pub fn first(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, value)| !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Preferred locale, then `en_US`, then the first entry.
    pub fn primary(&self, preferred: Locale) -> Option<&str> {
        self.get(preferred.as_str())
            .or_else(|| {
                if preferred == Locale::FALLBACK {
                    None
                } else {
                    self.get(Locale::FALLBACK.as_str())
                }
            })
            .or_else(|| self.first())
    }
}

impl Serialize for LocalizedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for LocalizedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = LocalizedName;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of locale to name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Option<String>>()? {
                    if let Some(value) = value {
                        entries.push((key, value));
                    }
                }
                Ok(LocalizedName { entries })
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// A name as the API delivers it: either already localized to one string
/// (when a `locale` query parameter was sent) or the full locale map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayName {
    Plain(String),
    Localized(LocalizedName),
}

impl DisplayName {
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    pub fn primary(&self, preferred: Locale) -> Option<&str> {
        match self {
            Self::Plain(name) if name.is_empty() => None,
            Self::Plain(name) => Some(name),
            Self::Localized(map) => map.primary(preferred),
        }
    }

    /// Best available name, or the caller's context-appropriate fallback.
    pub fn primary_or(&self, preferred: Locale, fallback: &str) -> String {
        self.primary(preferred).unwrap_or(fallback).to_string()
    }
}

/// Resolve an optional name field, mapping absence to the fallback literal.
pub fn primary_name(name: Option<&DisplayName>, preferred: Locale, fallback: &str) -> String {
    name.and_then(|n| n.primary(preferred))
        .unwrap_or(fallback)
        .to_string()
}
