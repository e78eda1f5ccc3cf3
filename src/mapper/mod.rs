//! Source string mappers.
//!
//! A mapper rewrites one shorthand form of a source into another, e.g.
//!
//! ```text
//! github.com/user/repo -> https://github.com/user/repo
//! user/repo            -> https://github.com/user/repo
//! ```
//!
//! Mappers are pure string transforms consulted in registration order;
//! the first match rewrites the source and stops the chain. Query
//! parameters and anchors are preserved verbatim.

use std::path::PathBuf;

/// Maps one form of a source to another, returning `None` when the
/// mapper does not apply.
pub type Mapper = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Maps shorthand GitHub URLs with no scheme.
///
/// An already-schemed `https://github.com/...` source counts as mapped
/// and passes through unchanged, short-circuiting the chain.
pub fn github(source: &str) -> Option<String> {
    if source.starts_with("https://github.com/") {
        return Some(source.to_string());
    }
    if source.starts_with("github.com/") {
        return Some(format!("https://{source}"));
    }
    None
}

/// Maps `org/repo` shorthand to a GitHub URL.
///
/// Exactly two `[A-Za-z0-9_-]` segments are required; fewer or more
/// segments, or characters outside the class, do not match.
pub fn github_org_repo(source: &str) -> Option<String> {
    let (path, modifiers) = split_modifiers(source);
    let (org, repo) = path.split_once('/')?;
    if !is_name(org) || !is_name(repo) {
        return None;
    }
    Some(format!("https://github.com/{org}/{repo}{modifiers}"))
}

/// Returns a [`Mapper`] that expands a bare `repo` shorthand against a
/// fixed organization. Sources already in `org/repo` form do not match.
pub fn single_github_org(org: impl Into<String>) -> Mapper {
    let org = org.into();
    Box::new(move |source| {
        let (repo, modifiers) = split_modifiers(source);
        if !is_name(repo) {
            return None;
        }
        Some(format!("https://github.com/{org}/{repo}{modifiers}"))
    })
}

/// Maps filesystem paths to `file://` URLs.
///
/// Absolute paths, `~/` paths, dot-relative paths, and bare names are
/// accepted when they stat as an existing directory; the emitted URL
/// carries the symlink-resolved absolute path. A `file://` source passes
/// through unchanged. Anything else is a silent non-match so the chain
/// can fall through to a later mapper or raw URL parsing.
pub fn file_path(source: &str) -> Option<String> {
    if source.is_empty() {
        return None;
    }
    if source.starts_with("file://") {
        return Some(source.to_string());
    }

    let path = if let Some(rest) = source.strip_prefix("~/") {
        dirs::home_dir()?.join(rest)
    } else {
        PathBuf::from(source)
    };

    // Canonicalization absolutizes, resolves symlinks, and fails for
    // paths that do not exist.
    let path = std::fs::canonicalize(path).ok()?;
    if !path.is_dir() {
        return None;
    }
    Some(format!("file://{}", path.display()))
}

/// Split a source at the start of its `?query`/`#fragment` modifiers.
fn split_modifiers(source: &str) -> (&str, &str) {
    match source.find(['?', '#']) {
        Some(idx) => source.split_at(idx),
        None => (source, ""),
    }
}

fn is_name(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
