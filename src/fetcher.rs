//! Source resolution and fetch dispatch.

use std::path::Path;

use url::Url;

use crate::error::Error;
use crate::mapper::{self, Mapper};
use crate::resolver::{FileResolver, GitResolver, Resolver, TarResolver, ZipResolver};
use crate::source::Source;

/// Retrieves archives from a pluggable set of sources.
///
/// All sources support an optional sub-directory, selected by appending
/// `//<subdir>` to the URL path:
///
/// ```text
/// git+ssh://host/path/to/repo.git//path/to/subdir
/// https://host/path/to/archive.tgz//path/to/subdir
/// ```
///
/// A fetcher is immutable once constructed and safe to share across
/// threads; every resolve/fetch call is independent.
pub struct Fetcher {
    mappers: Vec<Mapper>,
    resolvers: Vec<Box<dyn Resolver>>,
}

impl Fetcher {
    /// Create a fetcher from ordered resolver and mapper lists.
    ///
    /// Order is priority: the first mapper and the first resolver to
    /// match an input win outright.
    pub fn new(resolvers: Vec<Box<dyn Resolver>>, mappers: Vec<Mapper>) -> Self {
        Self { mappers, resolvers }
    }

    /// Resolve a source string to the resolver that will serve it and
    /// the canonical [`Source`].
    ///
    /// # Panics
    ///
    /// Panics if a mapper claims a match but produces a string that does
    /// not parse as a URL. That is a defect in the mapper, not an input
    /// error.
    pub fn resolve(&self, source: &str) -> Result<(&dyn Resolver, Source), Error> {
        let mut candidate = source.to_string();
        for mapper in &self.mappers {
            if let Some(mapped) = mapper(&candidate) {
                if let Err(err) = Url::parse(&mapped) {
                    panic!("mapper did not produce a valid URL {mapped:?}: {err}");
                }
                tracing::debug!(source, mapped = %mapped, "mapper rewrote source");
                candidate = mapped;
                break;
            }
        }

        let mut url =
            Url::parse(&candidate).map_err(|_| Error::InvalidSource(candidate.clone()))?;
        for resolver in &self.resolvers {
            if !resolver.matches(&url) {
                continue;
            }

            // Strip the sub-directory selector, if any.
            let split = url
                .path()
                .split_once("//")
                .map(|(base, subdir)| (base.to_string(), subdir.to_string()));
            let subdir = match split {
                Some((base, subdir)) => {
                    url.set_path(&base);
                    subdir
                }
                None => String::new(),
            };

            tracing::debug!(
                resolver = resolver.name(),
                url = %url,
                subdir = %subdir,
                "source resolved"
            );
            return Ok((resolver.as_ref(), Source { url, subdir }));
        }
        Err(Error::UnsupportedSource(url))
    }

    /// Fetch an archive from a source and unpack it into `dest`.
    ///
    /// The outcome of the delegated resolver is propagated unchanged.
    /// Dropping the returned future cancels an in-flight fetch.
    pub async fn fetch(&self, source: &str, dest: &Path) -> anyhow::Result<()> {
        let (resolver, resolved) = self.resolve(source)?;
        tracing::info!(resolver = resolver.name(), url = %resolved.url, "fetching");
        resolver.fetch(&resolved, dest).await
    }
}

impl Default for Fetcher {
    /// A fetcher wired with the built-in resolvers and mappers.
    ///
    /// The archive resolvers are registered ahead of git so tarball and
    /// zip URLs hosted on a git forge dispatch to the archive backends.
    fn default() -> Self {
        Self::new(
            vec![
                Box::new(FileResolver::new()),
                Box::new(TarResolver::new()),
                Box::new(ZipResolver::new()),
                Box::new(GitResolver::new()),
            ],
            vec![
                Box::new(mapper::github),
                Box::new(mapper::github_org_repo),
                Box::new(mapper::file_path),
            ],
        )
    }
}
