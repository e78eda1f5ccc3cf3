//! Tarball resolver.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use url::Url;

use super::{Resolver, effective_path, http};
use crate::source::Source;

/// Unpacks tarballs fetched over HTTP by streaming the response body
/// into `tar`.
#[derive(Debug, Default)]
pub struct TarResolver;

impl TarResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for TarResolver {
    fn name(&self) -> &'static str {
        "tar"
    }

    fn matches(&self, url: &Url) -> bool {
        is_tarball(effective_path(url))
    }

    async fn fetch(&self, source: &Source, dest: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dest)
            .with_context(|| format!("creating destination directory {}", dest.display()))?;

        let flag = compression_flag(source.url.path());
        tracing::debug!(url = %source.url, flag, "unpacking tarball");

        let args: Vec<&OsStr> = vec![
            OsStr::new("-x"),
            OsStr::new("-C"),
            dest.as_os_str(),
            OsStr::new(flag),
        ];
        http::fetch_into_pipe(&source.url, "tar", args).await
    }
}

/// Recognized tarball suffixes, compressed and uncompressed.
fn is_tarball(path: &str) -> bool {
    const SUFFIXES: &[&str] = &[
        ".tar", ".tgz", ".tbz", ".tbz2", ".txz", ".tzstd", ".tlz", ".tZ",
    ];
    if SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        return true;
    }
    // .tar.<compression>, e.g. .tar.gz or .tar.zst
    path.rfind(".tar.").is_some_and(|idx| {
        let ext = &path[idx + ".tar.".len()..];
        !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
    })
}

/// Map an archive path to the tar flag selecting its decompressor.
///
/// Unrecognized suffixes, including the compress-era `.tar.Z`/`.tZ`
/// forms, fall back to `-a` and leave detection to tar itself.
fn compression_flag(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
        "-z"
    } else if lower.ends_with(".tar.bz2") || lower.ends_with(".tbz") || lower.ends_with(".tbz2") {
        "-j"
    } else if lower.ends_with(".tar.xz") || lower.ends_with(".txz") {
        "-J"
    } else if lower.ends_with(".tar.zst") || lower.ends_with(".tzstd") {
        "--zstd"
    } else if lower.ends_with(".tar.lz") || lower.ends_with(".tlz") {
        "--lzip"
    } else {
        "-a"
    }
}
