use thiserror::Error;

/// Core error type for importmap operations outside of resolution.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse import map JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL {input:?}: {source}")]
    InvalidBaseUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// Parse an absolute base URL, mapping failures into [`Error::InvalidBaseUrl`].
pub fn parse_base_url(input: &str) -> Result<url::Url, Error> {
    url::Url::parse(input).map_err(|source| Error::InvalidBaseUrl {
        input: input.to_string(),
        source,
    })
}
