use super::{load_import_map, log_warnings, require_base_url, WarningOutput, EXIT_FAILURE};
use importmap_core::version::SCHEMA_VERSION;
use importmap_core::{
    normalize, parse_base_url, resolve, resolve_with_trace, Config, NormalizedImportMap,
    ResolveError, ResolveTrace,
};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use url::Url;

pub struct ResolveArgs {
    pub specifiers: Vec<String>,
    pub map: PathBuf,
    pub map_base_url: Option<String>,
    pub trace: bool,
}

#[derive(Serialize)]
struct ResolveOutput {
    schema_version: u32,
    ok: bool,
    results: Vec<ResolvedSpecifier>,
    warnings: Vec<WarningOutput>,
}

#[derive(Serialize)]
struct ResolvedSpecifier {
    specifier: String,
    resolved: Option<String>,
    error_code: Option<String>,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<ResolveTrace>,
}

impl ResolvedSpecifier {
    fn new(
        specifier: &str,
        result: Result<String, ResolveError>,
        trace: Option<ResolveTrace>,
    ) -> Self {
        let (resolved, error_code, error) = match result {
            Ok(url) => (Some(url), None, None),
            Err(e) => (None, Some(e.code().to_string()), Some(e.to_string())),
        };
        Self {
            specifier: specifier.to_string(),
            resolved,
            error_code,
            error,
            trace,
        }
    }

    fn is_ok(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Run the resolve command.
///
/// `--base-url` is the referring module's URL. The map itself is
/// normalized against `--map-base-url`, falling back to `--base-url`.
pub fn run(config: &Config, args: &ResolveArgs) -> Result<()> {
    let base_url = require_base_url(config)?;
    let map_base_url = match args.map_base_url.as_deref() {
        Some(input) => parse_base_url(input).into_diagnostic()?,
        None => base_url.clone(),
    };

    let raw = load_import_map(&args.map)?;
    let normalized = normalize(&raw, &map_base_url);
    log_warnings(&normalized.warnings);

    let results: Vec<ResolvedSpecifier> = args
        .specifiers
        .iter()
        .map(|specifier| resolve_one(specifier, &normalized.import_map, &base_url, args.trace))
        .collect();
    let ok = results.iter().all(ResolvedSpecifier::is_ok);

    if config.json {
        let output = ResolveOutput {
            schema_version: SCHEMA_VERSION,
            ok,
            results,
            warnings: normalized.warnings.iter().map(WarningOutput::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        for result in &results {
            print_human(result);
        }
    }

    if !ok {
        std::process::exit(EXIT_FAILURE);
    }

    Ok(())
}

fn resolve_one(
    specifier: &str,
    import_map: &NormalizedImportMap,
    base_url: &Url,
    trace: bool,
) -> ResolvedSpecifier {
    let resolved = if trace {
        let outcome = resolve_with_trace(specifier, import_map, base_url);
        ResolvedSpecifier::new(specifier, outcome.result, Some(outcome.trace))
    } else {
        ResolvedSpecifier::new(specifier, resolve(specifier, import_map, base_url), None)
    };

    match (&resolved.resolved, &resolved.error_code) {
        (Some(url), _) => tracing::debug!(specifier, url = %url, "resolved"),
        (None, Some(code)) => tracing::debug!(specifier, code = %code, "resolution failed"),
        (None, None) => {}
    }
    resolved
}

fn print_human(result: &ResolvedSpecifier) {
    match (&result.resolved, &result.error) {
        (Some(url), _) => println!("{} -> {url}", result.specifier),
        (None, Some(error)) => println!("{} -> error: {error}", result.specifier),
        (None, None) => println!("{} -> error", result.specifier),
    }

    let Some(trace) = &result.trace else {
        return;
    };
    for step in &trace.steps {
        let mark = if step.ok { "ok" } else { "--" };
        let mut line = format!("  [{mark}] {}: {}", step.step, step.detail);
        if let Some(key) = &step.key {
            line.push_str(&format!(" (key {key:?})"));
        }
        if let Some(target) = &step.target {
            line.push_str(&format!(" => {target}"));
        }
        println!("{line}");
    }
}
