//! Resolution errors.

use thiserror::Error;
use url::Url;

/// Errors surfaced by source resolution.
///
/// Failures from a delegated resolver fetch are not represented here;
/// they propagate unchanged as [`anyhow::Error`].
#[derive(Debug, Error)]
pub enum Error {
    /// The source string does not parse as a URL after mapping.
    #[error("invalid source {0:?}")]
    InvalidSource(String),

    /// No registered resolver matched the canonical URL.
    #[error("unsupported source: {0}")]
    UnsupportedSource(Url),
}
