use thiserror::Error;

/// Fatal failure of a single `resolve` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{specifier:?} is a bare specifier, but was not remapped by the import map")]
    UnmappedBareSpecifier { specifier: String },

    #[error("resolution of {specifier:?} was blocked by a null entry for {key:?}")]
    BlockedByNullEntry { specifier: String, key: String },

    #[error("address {address:?} mapped by prefix {key:?} is not a URL ending with \"/\"")]
    InvalidMappedAddress { key: String, address: String },

    #[error(
        "resolution of {specifier:?} was blocked since the part after {key:?} could not be \
         URL-parsed relative to {address:?}"
    )]
    UnparseableRemainder {
        specifier: String,
        key: String,
        address: String,
    },

    #[error(
        "resolution of {specifier:?} was blocked due to it backtracking above its prefix {key:?}"
    )]
    BacktrackingAboveAddress {
        specifier: String,
        key: String,
        address: String,
    },
}

/// Stable codes for resolution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorCode {
    UnmappedBareSpecifier,
    BlockedByNullEntry,
    InvalidMappedAddress,
    UnparseableRemainder,
    BacktrackingAboveAddress,
}

impl std::fmt::Display for ResolveErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UnmappedBareSpecifier => "UNMAPPED_BARE_SPECIFIER",
            Self::BlockedByNullEntry => "BLOCKED_BY_NULL_ENTRY",
            Self::InvalidMappedAddress => "INVALID_MAPPED_ADDRESS",
            Self::UnparseableRemainder => "UNPARSEABLE_REMAINDER",
            Self::BacktrackingAboveAddress => "BACKTRACKING_ABOVE_ADDRESS",
        };
        write!(f, "{s}")
    }
}

impl ResolveError {
    #[must_use]
    pub fn code(&self) -> ResolveErrorCode {
        match self {
            Self::UnmappedBareSpecifier { .. } => ResolveErrorCode::UnmappedBareSpecifier,
            Self::BlockedByNullEntry { .. } => ResolveErrorCode::BlockedByNullEntry,
            Self::InvalidMappedAddress { .. } => ResolveErrorCode::InvalidMappedAddress,
            Self::UnparseableRemainder { .. } => ResolveErrorCode::UnparseableRemainder,
            Self::BacktrackingAboveAddress { .. } => ResolveErrorCode::BacktrackingAboveAddress,
        }
    }
}
