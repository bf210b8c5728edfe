use super::{load_import_map, log_warnings, require_base_url, WarningOutput, EXIT_FAILURE};
use importmap_core::version::SCHEMA_VERSION;
use importmap_core::{normalize, Config, NormalizedImportMap};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ParseOutput<'a> {
    schema_version: u32,
    import_map: &'a NormalizedImportMap,
    warnings: Vec<WarningOutput>,
}

/// Run the parse command.
///
/// Prints the normalized import map to stdout. Warnings go to the log and,
/// with `--json`, into the output object as well.
pub fn run(config: &Config, file: &Path, deny_warnings: bool) -> Result<()> {
    let base_url = require_base_url(config)?;
    let raw = load_import_map(file)?;

    let normalized = normalize(&raw, &base_url);
    log_warnings(&normalized.warnings);
    tracing::debug!(
        imports = normalized.import_map.imports.len(),
        scopes = normalized.import_map.scopes.len(),
        warnings = normalized.warnings.len(),
        "normalized import map"
    );

    if config.json {
        let output = ParseOutput {
            schema_version: SCHEMA_VERSION,
            import_map: &normalized.import_map,
            warnings: normalized.warnings.iter().map(WarningOutput::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", normalized.import_map.to_json_pretty().into_diagnostic()?);
    }

    if deny_warnings && !normalized.warnings.is_empty() {
        tracing::error!(
            warnings = normalized.warnings.len(),
            "normalization produced warnings"
        );
        std::process::exit(EXIT_FAILURE);
    }

    Ok(())
}
