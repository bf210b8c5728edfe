//! Module specifier resolution against a normalized import map.
//!
//! Implements <https://html.spec.whatwg.org/multipage/webappapis.html#resolve-a-module-specifier>
//! minus fetching: scopes first (most specific prefix first), then top-level
//! imports, then URL passthrough.
//! Tracing records each step for the `resolve --trace` command.

mod error;
mod resolve;
pub mod trace;

pub use error::{ResolveError, ResolveErrorCode};
pub use resolve::{resolve, resolve_with_trace, ResolveResultWithTrace};
pub use trace::{steps as trace_steps, ResolveTrace, ResolveTraceStep};
