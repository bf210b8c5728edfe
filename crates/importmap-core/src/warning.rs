//! Diagnostics produced while normalizing an import map.
//!
//! Warnings never abort normalization. Each one describes an entry that was
//! dropped or blocked, and the caller decides whether to log them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A malformed import map entry found during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A specifier key was the empty string. The entry was dropped.
    EmptySpecifierKey,
    /// The address was `null`. The key is blocked.
    NotStringAddress { key: String },
    /// The address could not be parsed as a URL. The key is blocked.
    InvalidAddress { key: String, address: String },
    /// The key ends with `/` but the address does not. The key is blocked.
    NotStartsWithBaseUrl { key: String, address: String },
    /// A scope prefix could not be parsed as a URL. The scope was dropped.
    InvalidScopePrefix { prefix: String },
}

/// Stable warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    EmptySpecifierKey,
    NotStringAddress,
    InvalidAddress,
    NotStartsWithBaseUrl,
    InvalidScopePrefix,
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EmptySpecifierKey => "EMPTY_SPECIFIER_KEY",
            Self::NotStringAddress => "NOT_STRING_ADDRESS",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::NotStartsWithBaseUrl => "NOT_STARTS_WITH_BASE_URL",
            Self::InvalidScopePrefix => "INVALID_SCOPE_PREFIX",
        };
        write!(f, "{s}")
    }
}

impl Warning {
    #[must_use]
    pub fn code(&self) -> WarningCode {
        match self {
            Self::EmptySpecifierKey => WarningCode::EmptySpecifierKey,
            Self::NotStringAddress { .. } => WarningCode::NotStringAddress,
            Self::InvalidAddress { .. } => WarningCode::InvalidAddress,
            Self::NotStartsWithBaseUrl { .. } => WarningCode::NotStartsWithBaseUrl,
            Self::InvalidScopePrefix { .. } => WarningCode::InvalidScopePrefix,
        }
    }

    /// The specifier key or scope prefix the warning is about, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::EmptySpecifierKey => None,
            Self::NotStringAddress { key }
            | Self::InvalidAddress { key, .. }
            | Self::NotStartsWithBaseUrl { key, .. } => Some(key),
            Self::InvalidScopePrefix { prefix } => Some(prefix),
        }
    }

    /// The offending address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::InvalidAddress { address, .. } | Self::NotStartsWithBaseUrl { address, .. } => {
                Some(address)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpecifierKey => write!(f, "specifier key cannot be an empty string"),
            Self::NotStringAddress { key } => {
                write!(f, "address for {key:?} must be a string; the key is blocked")
            }
            Self::InvalidAddress { key, address } => write!(
                f,
                "address {address:?} for {key:?} is not a valid URL; the key is blocked"
            ),
            Self::NotStartsWithBaseUrl { key, address } => write!(
                f,
                "address {address:?} for {key:?} must end with \"/\" since the key does; the key is blocked"
            ),
            Self::InvalidScopePrefix { prefix } => {
                write!(f, "scope prefix {prefix:?} is not a valid URL; the scope is ignored")
            }
        }
    }
}
