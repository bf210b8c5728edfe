#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod import_map;
pub mod normalize;
pub mod resolver;
pub mod specifier;
pub mod version;
pub mod warning;

pub use config::Config;
pub use error::{parse_base_url, Error};
pub use import_map::{
    Address, ImportMap, ModuleIntegrityMap, ModuleSpecifierMap, NormalizedImportMap, Scopes,
    SpecifierMap,
};
pub use normalize::{key_length, normalize, Normalized};
pub use resolver::{
    resolve, resolve_with_trace, ResolveError, ResolveErrorCode, ResolveResultWithTrace,
    ResolveTrace, ResolveTraceStep,
};
pub use version::VERSION;
pub use warning::{Warning, WarningCode};
