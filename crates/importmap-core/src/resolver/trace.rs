//! Resolution tracing for `importmap resolve --trace`.
//!
//! Provides step-by-step traces of module resolution for debugging
//! and understanding why a specifier resolves to a particular URL.

use serde::Serialize;

/// A single step in the resolution trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveTraceStep {
    /// Step name (e.g., "parse_specifier", "match_scope", "match_prefix")
    pub step: &'static str,
    /// Whether this step succeeded
    pub ok: bool,
    /// Human-readable description of what happened
    pub detail: String,
    /// Scope prefix under which this step ran, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Specifier map key matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Address or URL produced by this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            scope: None,
            key: None,
            target: None,
        }
    }

    /// Set the scope for this step.
    pub fn with_scope(mut self, scope: Option<&str>) -> Self {
        self.scope = scope.map(str::to_owned);
        self
    }

    /// Set the key for this step.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the target for this step.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Complete resolution trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps
    pub steps: Vec<ResolveTraceStep>,
}

impl ResolveTrace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to the trace.
    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    /// Names of the recorded steps, in order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step).collect()
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const PARSE_SPECIFIER: &str = "parse_specifier";
    pub const MATCH_SCOPE: &str = "match_scope";
    pub const MATCH_TOP_LEVEL: &str = "match_top_level";
    pub const MATCH_EXACT: &str = "match_exact";
    pub const MATCH_PREFIX: &str = "match_prefix";
    pub const RESOLVE_REMAINDER: &str = "resolve_remainder";
    pub const NO_MATCH: &str = "no_match";
    pub const FALLBACK_URL: &str = "fallback_url";
}
