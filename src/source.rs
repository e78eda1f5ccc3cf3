//! Resolved source model.

use serde::{Deserialize, Serialize};
use url::Url;

/// A resolved source: a canonical URL plus an optional sub-directory
/// selected via `//<subdir>` in the original URL path.
///
/// Built exactly once during resolution and handed to the matched
/// resolver's fetch operation. Resolvers fetch the whole archive; the
/// sub-directory is informational unless a resolver implements selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Canonical URL with any sub-directory selector already stripped
    /// from the path.
    pub url: Url,
    /// Sub-directory within the fetched archive, empty when none was
    /// selected.
    pub subdir: String,
}
