//! Import map data model.
//!
//! Two shapes live here:
//! - [`ImportMap`]: the raw map as written by the author (keys and addresses
//!   are arbitrary strings, addresses may be `null`).
//! - [`NormalizedImportMap`]: the output of [`crate::normalize`], where every
//!   key is canonical, every entry is an [`Address`] and entries are sorted
//!   longest key first.

use crate::error::Error;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw module specifier map: specifier key to address (or `null`).
///
/// <https://html.spec.whatwg.org/multipage/webappapis.html#module-specifier-map>
pub type ModuleSpecifierMap = IndexMap<String, Option<String>>;

/// Raw scopes: scope prefix to module specifier map.
pub type Scopes = IndexMap<String, ModuleSpecifierMap>;

/// Raw integrity map: URL to integrity metadata. Not used by resolution.
pub type ModuleIntegrityMap = IndexMap<String, String>;

/// An import map as deserialized from JSON.
///
/// Only a JSON object is accepted at the top level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ImportMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<ModuleSpecifierMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Scopes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<ModuleIntegrityMap>,
}

impl TryFrom<Map<String, Value>> for ImportMap {
    type Error = serde_json::Error;

    fn try_from(mut object: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            imports: take_field(&mut object, "imports")?,
            scopes: take_field(&mut object, "scopes")?,
            integrity: take_field(&mut object, "integrity")?,
        })
    }
}

fn take_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    name: &str,
) -> Result<Option<T>, serde_json::Error> {
    object.remove(name).map(serde_json::from_value).transpose()
}

impl ImportMap {
    /// Deserialize an import map from JSON text.
    ///
    /// Structural checks (top level is an object, `imports` values are
    /// strings or `null`, ...) are enforced by deserialization. Unknown top
    /// level keys are ignored.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Target of a normalized specifier map entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Address {
    /// Serialized absolute URL.
    Mapped(String),
    /// Explicitly blocked key. Any lookup matching it fails.
    Blocked,
}

impl Address {
    /// The mapped URL, or `None` for a blocked entry.
    #[must_use]
    pub fn as_url_str(&self) -> Option<&str> {
        match self {
            Self::Mapped(url) => Some(url),
            Self::Blocked => None,
        }
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked)
    }
}

impl From<Option<String>> for Address {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Blocked, Self::Mapped)
    }
}

impl From<Address> for Option<String> {
    fn from(value: Address) -> Self {
        match value {
            Address::Mapped(url) => Some(url),
            Address::Blocked => None,
        }
    }
}

/// Normalized specifier map, ordered longest key first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecifierMap {
    entries: IndexMap<String, Address>,
}

impl SpecifierMap {
    pub(crate) fn from_sorted(entries: IndexMap<String, Address>) -> Self {
        Self { entries }
    }

    /// Iterate entries in match priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Address)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in match priority order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Address> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert back into the raw shape, blocked entries becoming `null`.
    #[must_use]
    pub fn to_raw(&self) -> ModuleSpecifierMap {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into()))
            .collect()
    }
}

/// Import map after sorting and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedImportMap {
    pub imports: SpecifierMap,
    pub scopes: IndexMap<String, SpecifierMap>,
}

impl NormalizedImportMap {
    /// Convert back into the raw shape. `integrity` is not carried over.
    #[must_use]
    pub fn to_raw(&self) -> ImportMap {
        ImportMap {
            imports: Some(self.imports.to_raw()),
            scopes: Some(
                self.scopes
                    .iter()
                    .map(|(prefix, map)| (prefix.clone(), map.to_raw()))
                    .collect(),
            ),
            integrity: None,
        }
    }

    /// Serialize as pretty-printed JSON, preserving match order.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
