//! Sorting and normalizing of import maps.
//!
//! Implements:
//! - <https://html.spec.whatwg.org/multipage/webappapis.html#sorting-and-normalizing-a-module-specifier-map>
//! - <https://html.spec.whatwg.org/multipage/webappapis.html#sorting-and-normalizing-scopes>
//!
//! Normalization never fails. Malformed entries are dropped or blocked and
//! reported as [`Warning`]s.

use crate::import_map::{
    Address, ImportMap, ModuleSpecifierMap, NormalizedImportMap, Scopes, SpecifierMap,
};
use crate::specifier::{ends_with_slash, resolve_url_like};
use crate::warning::Warning;
use indexmap::IndexMap;
use std::cmp::Reverse;
use url::Url;

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub import_map: NormalizedImportMap,
    /// Diagnostics in the order the offending entries were visited.
    pub warnings: Vec<Warning>,
}

/// Sort and normalize `raw` against `base_url`.
///
/// Missing `imports` or `scopes` become empty maps. `integrity` is ignored.
#[must_use]
pub fn normalize(raw: &ImportMap, base_url: &Url) -> Normalized {
    let mut warnings = Vec::new();

    let imports = raw
        .imports
        .as_ref()
        .map(|map| normalize_specifier_map(map, base_url, &mut warnings))
        .unwrap_or_default();

    let scopes = raw
        .scopes
        .as_ref()
        .map(|scopes| normalize_scopes(scopes, base_url, &mut warnings))
        .unwrap_or_default();

    Normalized {
        import_map: NormalizedImportMap { imports, scopes },
        warnings,
    }
}

fn normalize_specifier_map(
    original: &ModuleSpecifierMap,
    base_url: &Url,
    warnings: &mut Vec<Warning>,
) -> SpecifierMap {
    let mut normalized: IndexMap<String, Address> = IndexMap::with_capacity(original.len());

    for (specifier_key, value) in original {
        let Some(normalized_key) = normalize_specifier_key(specifier_key, base_url, warnings)
        else {
            continue;
        };
        let address = normalize_address(specifier_key, value.as_deref(), base_url, warnings);
        // Keys that collapse onto the same normalized key keep the first
        // position and the last value.
        normalized.insert(normalized_key, address);
    }

    SpecifierMap::from_sorted(sort_longest_first(normalized))
}

fn normalize_scopes(
    original: &Scopes,
    base_url: &Url,
    warnings: &mut Vec<Warning>,
) -> IndexMap<String, SpecifierMap> {
    let mut normalized: IndexMap<String, SpecifierMap> = IndexMap::with_capacity(original.len());

    for (scope_prefix, specifier_map) in original {
        let Ok(prefix_url) = base_url.join(scope_prefix) else {
            warnings.push(Warning::InvalidScopePrefix {
                prefix: scope_prefix.clone(),
            });
            continue;
        };
        let map = normalize_specifier_map(specifier_map, base_url, warnings);
        normalized.insert(prefix_url.into(), map);
    }

    sort_longest_first(normalized)
}

/// <https://html.spec.whatwg.org/multipage/webappapis.html#normalizing-a-specifier-key>
fn normalize_specifier_key(
    specifier_key: &str,
    base_url: &Url,
    warnings: &mut Vec<Warning>,
) -> Option<String> {
    if specifier_key.is_empty() {
        warnings.push(Warning::EmptySpecifierKey);
        return None;
    }

    let normalized = resolve_url_like(specifier_key, base_url)
        .map_or_else(|| specifier_key.to_owned(), Into::into);
    Some(normalized)
}

fn normalize_address(
    specifier_key: &str,
    value: Option<&str>,
    base_url: &Url,
    warnings: &mut Vec<Warning>,
) -> Address {
    let Some(value) = value else {
        warnings.push(Warning::NotStringAddress {
            key: specifier_key.to_owned(),
        });
        return Address::Blocked;
    };

    let Some(address_url) = resolve_url_like(value, base_url) else {
        warnings.push(Warning::InvalidAddress {
            key: specifier_key.to_owned(),
            address: value.to_owned(),
        });
        return Address::Blocked;
    };

    let address: String = address_url.into();
    if ends_with_slash(specifier_key) && !ends_with_slash(&address) {
        warnings.push(Warning::NotStartsWithBaseUrl {
            key: specifier_key.to_owned(),
            address,
        });
        return Address::Blocked;
    }

    Address::Mapped(address)
}

/// Length used to order keys and scope prefixes, in UTF-16 code units.
///
/// Keys that differ only in non-ASCII content order the same way browsers
/// order them.
#[must_use]
pub fn key_length(key: &str) -> usize {
    key.encode_utf16().count()
}

/// Stable sort by [`key_length`], longest first.
fn sort_longest_first<V>(mut map: IndexMap<String, V>) -> IndexMap<String, V> {
    map.sort_by_cached_key(|key, _| Reverse(key_length(key)));
    map
}
