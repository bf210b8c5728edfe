use super::error::ResolveError;
use super::trace::{steps, ResolveTrace, ResolveTraceStep};
use crate::import_map::{Address, NormalizedImportMap, SpecifierMap};
use crate::specifier::{ends_with_slash, is_special, resolve_url_like};
use url::Url;

/// Resolution outcome together with the steps that produced it.
#[derive(Debug, Clone)]
pub struct ResolveResultWithTrace {
    pub result: Result<String, ResolveError>,
    pub trace: ResolveTrace,
}

/// Resolve `specifier` as imported from `base_url`.
///
/// `import_map` must come from [`crate::normalize`]; it is never
/// re-normalized here.
pub fn resolve(
    specifier: &str,
    import_map: &NormalizedImportMap,
    base_url: &Url,
) -> Result<String, ResolveError> {
    resolve_inner(specifier, import_map, base_url, &mut Tracer { trace: None })
}

/// Resolve a specifier with tracing enabled.
///
/// The outcome is always identical to [`resolve`].
pub fn resolve_with_trace(
    specifier: &str,
    import_map: &NormalizedImportMap,
    base_url: &Url,
) -> ResolveResultWithTrace {
    let mut trace = ResolveTrace::new();
    let result = resolve_inner(
        specifier,
        import_map,
        base_url,
        &mut Tracer {
            trace: Some(&mut trace),
        },
    );
    ResolveResultWithTrace { result, trace }
}

/// Records steps only when a trace was requested. Steps are built lazily so
/// untraced resolution does not allocate for them.
struct Tracer<'a> {
    trace: Option<&'a mut ResolveTrace>,
}

impl Tracer<'_> {
    fn record(&mut self, step: impl FnOnce() -> ResolveTraceStep) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.add_step(step());
        }
    }
}

fn resolve_inner(
    specifier: &str,
    import_map: &NormalizedImportMap,
    base_url: &Url,
    tracer: &mut Tracer<'_>,
) -> Result<String, ResolveError> {
    let base_url_string = base_url.as_str();
    let as_url = resolve_url_like(specifier, base_url);
    let normalized_specifier = as_url.as_ref().map_or(specifier, Url::as_str);

    tracer.record(|| match &as_url {
        Some(url) => ResolveTraceStep::new(steps::PARSE_SPECIFIER, true, "URL-like specifier")
            .with_target(url.as_str()),
        None => ResolveTraceStep::new(steps::PARSE_SPECIFIER, false, "bare specifier"),
    });

    for (scope_prefix, scope_imports) in &import_map.scopes {
        if !scope_applies(scope_prefix, base_url_string) {
            continue;
        }
        tracer.record(|| {
            ResolveTraceStep::new(
                steps::MATCH_SCOPE,
                true,
                format!("{base_url_string} is inside scope"),
            )
            .with_scope(Some(scope_prefix))
        });
        if let Some(url) = resolve_imports_match(
            normalized_specifier,
            as_url.as_ref(),
            scope_imports,
            Some(scope_prefix),
            tracer,
        )? {
            return Ok(url);
        }
    }

    tracer.record(|| ResolveTraceStep::new(steps::MATCH_TOP_LEVEL, true, "top-level imports"));
    if let Some(url) = resolve_imports_match(
        normalized_specifier,
        as_url.as_ref(),
        &import_map.imports,
        None,
        tracer,
    )? {
        return Ok(url);
    }

    if let Some(url) = as_url {
        tracer.record(|| {
            ResolveTraceStep::new(steps::FALLBACK_URL, true, "unmapped URL resolves to itself")
                .with_target(url.as_str())
        });
        return Ok(url.into());
    }

    tracer.record(|| {
        ResolveTraceStep::new(steps::FALLBACK_URL, false, "bare specifier was not remapped")
    });
    Err(ResolveError::UnmappedBareSpecifier {
        specifier: specifier.to_owned(),
    })
}

fn scope_applies(scope_prefix: &str, base_url: &str) -> bool {
    scope_prefix == base_url
        || (ends_with_slash(scope_prefix) && base_url.starts_with(scope_prefix))
}

/// <https://html.spec.whatwg.org/multipage/webappapis.html#resolving-an-imports-match>
///
/// `Ok(None)` means no key applies and the caller moves on.
fn resolve_imports_match(
    normalized_specifier: &str,
    as_url: Option<&Url>,
    specifier_map: &SpecifierMap,
    scope: Option<&str>,
    tracer: &mut Tracer<'_>,
) -> Result<Option<String>, ResolveError> {
    for (specifier_key, address) in specifier_map.iter() {
        if specifier_key == normalized_specifier {
            let Address::Mapped(url) = address else {
                tracer.record(|| {
                    ResolveTraceStep::new(steps::MATCH_EXACT, false, "blocked by null entry")
                        .with_scope(scope)
                        .with_key(specifier_key)
                });
                return Err(ResolveError::BlockedByNullEntry {
                    specifier: normalized_specifier.to_owned(),
                    key: specifier_key.to_owned(),
                });
            };
            tracer.record(|| {
                ResolveTraceStep::new(steps::MATCH_EXACT, true, "exact key")
                    .with_scope(scope)
                    .with_key(specifier_key)
                    .with_target(url.as_str())
            });
            return Ok(Some(url.clone()));
        }

        if ends_with_slash(specifier_key)
            && normalized_specifier.starts_with(specifier_key)
            && as_url.map_or(true, is_special)
        {
            return resolve_prefix_match(
                normalized_specifier,
                specifier_key,
                address,
                scope,
                tracer,
            )
            .map(Some);
        }
    }

    tracer.record(|| {
        ResolveTraceStep::new(steps::NO_MATCH, false, "no key matched").with_scope(scope)
    });
    Ok(None)
}

fn resolve_prefix_match(
    normalized_specifier: &str,
    specifier_key: &str,
    address: &Address,
    scope: Option<&str>,
    tracer: &mut Tracer<'_>,
) -> Result<String, ResolveError> {
    let Address::Mapped(address) = address else {
        tracer.record(|| {
            ResolveTraceStep::new(steps::MATCH_PREFIX, false, "blocked by null entry")
                .with_scope(scope)
                .with_key(specifier_key)
        });
        return Err(ResolveError::BlockedByNullEntry {
            specifier: normalized_specifier.to_owned(),
            key: specifier_key.to_owned(),
        });
    };

    let invalid_address = || ResolveError::InvalidMappedAddress {
        key: specifier_key.to_owned(),
        address: address.clone(),
    };
    if !ends_with_slash(address) {
        return Err(invalid_address());
    }
    let address_url = Url::parse(address).map_err(|_| invalid_address())?;

    tracer.record(|| {
        ResolveTraceStep::new(steps::MATCH_PREFIX, true, "prefix key")
            .with_scope(scope)
            .with_key(specifier_key)
            .with_target(address.as_str())
    });

    let after_prefix = &normalized_specifier[specifier_key.len()..];
    let Ok(url) = address_url.join(after_prefix) else {
        tracer.record(|| {
            ResolveTraceStep::new(
                steps::RESOLVE_REMAINDER,
                false,
                format!("{after_prefix:?} is not a valid URL relative to the address"),
            )
        });
        return Err(ResolveError::UnparseableRemainder {
            specifier: normalized_specifier.to_owned(),
            key: specifier_key.to_owned(),
            address: address.clone(),
        });
    };

    if !url.as_str().starts_with(address.as_str()) {
        tracer.record(|| {
            ResolveTraceStep::new(steps::RESOLVE_REMAINDER, false, "backtracks above address")
                .with_target(url.as_str())
        });
        return Err(ResolveError::BacktrackingAboveAddress {
            specifier: normalized_specifier.to_owned(),
            key: specifier_key.to_owned(),
            address: address.clone(),
        });
    }

    tracer.record(|| {
        ResolveTraceStep::new(steps::RESOLVE_REMAINDER, true, "remainder resolved")
            .with_target(url.as_str())
    });
    Ok(url.into())
}
