//! Local directory resolver.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use async_trait::async_trait;
use url::Url;

use super::Resolver;
use crate::fs;
use crate::source::Source;

/// Copies local directories.
///
/// The URL format supported is:
///
/// ```text
/// file:///absolute/path/to/dir
/// file://relative/path/to/dir
/// ```
#[derive(Debug, Default)]
pub struct FileResolver;

impl FileResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for FileResolver {
    fn name(&self) -> &'static str {
        "file"
    }

    fn matches(&self, url: &Url) -> bool {
        url.scheme() == "file"
    }

    async fn fetch(&self, source: &Source, dest: &Path) -> anyhow::Result<()> {
        let src = source_path(&source.url);

        let metadata =
            std::fs::metadata(&src).with_context(|| format!("stat {}", src.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", src.display());
        }

        tracing::debug!(src = %src.display(), dest = %dest.display(), "copying directory");
        fs::copy_dir(&src, dest).with_context(|| format!("copying {}", src.display()))?;
        Ok(())
    }
}

/// Filesystem path for a file URL. A host component is treated as the
/// leading segment of a relative path.
fn source_path(url: &Url) -> PathBuf {
    if let Ok(path) = url.to_file_path() {
        return path;
    }
    let relative = url.path().trim_start_matches('/');
    match url.host_str() {
        Some(host) if !host.is_empty() => Path::new(host).join(relative),
        _ => PathBuf::from(relative),
    }
}
