//! Git repository resolver.

use std::path::Path;

use anyhow::{Context, bail};
use async_trait::async_trait;
use tokio::process::Command;
use url::Url;

use super::{Resolver, effective_path};
use crate::source::Source;

/// Hosts whose plain-https URLs are assumed to be clonable repositories.
const GIT_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// Clones git repositories.
///
/// The URL formats supported are:
///
/// ```text
/// git://host/path/to/repo
/// git+ssh://host/path/to/repo
/// git+https://host/path/to/repo
/// https://github.com/path/to/repo
/// https://host/path/to/repo.git
/// ```
///
/// All forms support `ref=<ref>` and `depth=<depth>` query parameters
/// that control cloning behaviour.
#[derive(Debug, Default)]
pub struct GitResolver;

impl GitResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for GitResolver {
    fn name(&self) -> &'static str {
        "git"
    }

    fn matches(&self, url: &Url) -> bool {
        match url.scheme() {
            "git" | "git+https" | "git+ssh" => true,
            "http" | "https" => {
                effective_path(url).ends_with(".git")
                    || url.host_str().is_some_and(|host| GIT_HOSTS.contains(&host))
            }
            _ => false,
        }
    }

    async fn fetch(&self, source: &Source, dest: &Path) -> anyhow::Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("clone");
        if let Some(depth) = query_param(&source.url, "depth") {
            cmd.args(["--depth", &depth]);
        }
        if let Some(reference) = query_param(&source.url, "ref") {
            cmd.args(["--branch", &reference]);
        }

        let repo_url = clone_url(&source.url);
        tracing::debug!(repo = %repo_url, dest = %dest.display(), "cloning repository");

        let output = cmd
            .arg(&repo_url)
            .arg(dest)
            .kill_on_drop(true)
            .output()
            .await
            .context("running git clone")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git clone failed: {}", stderr.trim());
        }
        Ok(())
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    for (key, value) in url.query_pairs() {
        if key == name {
            return Some(value.into_owned());
        }
    }
    None
}

/// Convert a snag git URL to a URL the git binary understands.
///
/// ```text
/// git+https://host/path -> https://host/path
/// git+ssh://host/path   -> git@host:path (SCP form)
/// git://host/path       -> git://host/path
/// ```
///
/// Query string and fragment are stripped.
fn clone_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);

    if url.scheme() == "git+ssh" {
        let host = url.host_str().unwrap_or_default();
        let path = url.path().trim_start_matches('/');
        return format!("git@{host}:{path}");
    }

    let rendered = url.to_string();
    match rendered.strip_prefix("git+") {
        Some(stripped) => stripped.to_string(),
        None => rendered,
    }
}
