use importmap_core::version::{version_string, SCHEMA_VERSION};
use importmap_core::VERSION;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput {
    schema_version: u32,
    version: &'static str,
}

pub fn run(json: bool) -> Result<()> {
    if json {
        let output = VersionOutput {
            schema_version: SCHEMA_VERSION,
            version: VERSION,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", version_string());
    }
    Ok(())
}
