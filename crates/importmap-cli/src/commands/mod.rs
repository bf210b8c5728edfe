pub mod parse;
pub mod resolve;
pub mod version;

use importmap_core::{parse_base_url, Config, ImportMap, Warning};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::Path;
use url::Url;

/// Exit code when a command completed but reported failures.
pub const EXIT_FAILURE: i32 = 1;

/// Read and deserialize an import map file.
pub fn load_import_map(path: &Path) -> Result<ImportMap> {
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    ImportMap::from_json(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid import map {}", path.display()))
}

/// The global `--base-url`, parsed. Required by every command that uses it.
pub fn require_base_url(config: &Config) -> Result<Url> {
    let input = config
        .base_url
        .as_deref()
        .ok_or_else(|| miette!("a base URL is required (--base-url or IMPORTMAP_BASE_URL)"))?;
    parse_base_url(input).into_diagnostic()
}

pub fn log_warnings(warnings: &[Warning]) {
    for warning in warnings {
        tracing::warn!(
            code = %warning.code(),
            key = warning.key(),
            address = warning.address(),
            "{warning}"
        );
    }
}

/// A normalization warning as emitted in JSON output.
#[derive(Debug, Serialize)]
pub struct WarningOutput {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<&Warning> for WarningOutput {
    fn from(warning: &Warning) -> Self {
        Self {
            code: warning.code().to_string(),
            message: warning.to_string(),
            key: warning.key().map(str::to_string),
            address: warning.address().map(str::to_string),
        }
    }
}
