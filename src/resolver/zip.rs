//! Zip archive resolver.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use url::Url;

use super::{Resolver, effective_path, http};
use crate::source::Source;

/// Unpacks zip archives fetched over HTTP.
#[derive(Debug, Default)]
pub struct ZipResolver;

impl ZipResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for ZipResolver {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn matches(&self, url: &Url) -> bool {
        effective_path(url).ends_with(".zip")
    }

    async fn fetch(&self, source: &Source, dest: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dest)
            .with_context(|| format!("creating destination directory {}", dest.display()))?;

        let data = http::download(&source.url).await?;
        tracing::debug!(url = %source.url, bytes = data.len(), "extracting zip archive");
        extract(&data, dest)
    }
}

/// Extract a zip archive into a directory.
///
/// Entry paths are sanitized; entries that would escape the destination
/// are skipped.
fn extract(data: &[u8], dest: &Path) -> anyhow::Result<()> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).context("reading zip archive")?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("reading zip entry {index}"))?;

        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)
                .with_context(|| format!("creating {}", outpath.display()))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut outfile = std::fs::File::create(&outpath)
            .with_context(|| format!("creating {}", outpath.display()))?;
        std::io::copy(&mut entry, &mut outfile)
            .with_context(|| format!("writing {}", outpath.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                let _ = std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode));
            }
        }
    }
    Ok(())
}
