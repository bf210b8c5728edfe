//! URL helpers shared by the normalizer and the resolver.

use url::Url;

/// Schemes the URL standard calls "special".
///
/// <https://url.spec.whatwg.org/#special-scheme>
pub const SPECIAL_SCHEMES: &[&str] = &["ftp", "file", "http", "https", "ws", "wss"];

/// Resolve a URL-like module specifier.
///
/// The specifier is parsed against `base` only when it starts with `/`,
/// `./` or `../`; anything else must be an absolute URL on its own. Returns
/// `None` when the specifier is not URL-like (for example a bare specifier
/// such as `lodash`).
///
/// <https://html.spec.whatwg.org/multipage/webappapis.html#resolving-a-url-like-module-specifier>
#[must_use]
pub fn resolve_url_like(specifier: &str, base: &Url) -> Option<Url> {
    if is_relative_like(specifier) {
        base.join(specifier).ok()
    } else {
        Url::parse(specifier).ok()
    }
}

fn is_relative_like(specifier: &str) -> bool {
    specifier.starts_with('/') || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Whether the URL has a special scheme.
#[must_use]
pub fn is_special(url: &Url) -> bool {
    SPECIAL_SCHEMES.contains(&url.scheme())
}

pub(crate) fn ends_with_slash(s: &str) -> bool {
    s.ends_with('/')
}
