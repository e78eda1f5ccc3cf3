//! HTTP retrieval helpers shared by the archive resolvers.

use std::ffi::OsStr;

use anyhow::{Context, bail};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use url::Url;

/// Download a URL into memory, failing on a non-success status.
pub(crate) async fn download(url: &Url) -> anyhow::Result<Vec<u8>> {
    let response = reqwest::get(url.clone())
        .await
        .with_context(|| format!("fetching {url}"))?;
    if !response.status().is_success() {
        bail!("fetching {url}: {}", response.status());
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("reading response body from {url}"))?;
    Ok(bytes.to_vec())
}

/// Retrieve a URL and pipe the response body into the stdin of the given
/// command.
///
/// The child is spawned with kill-on-drop so an abandoned fetch future
/// reaps it.
pub(crate) async fn fetch_into_pipe<I, S>(url: &Url, cmd: &str, args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut response = reqwest::get(url.clone())
        .await
        .with_context(|| format!("fetching {url}"))?;
    if !response.status().is_success() {
        bail!("fetching {url}: {}", response.status());
    }

    let mut child = Command::new(cmd)
        .args(args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning {cmd}"))?;

    let mut stdin = child.stdin.take().context("child stdin was not captured")?;
    let streamed: anyhow::Result<()> = async {
        while let Some(chunk) = response.chunk().await? {
            stdin.write_all(&chunk).await?;
        }
        stdin.shutdown().await?;
        Ok(())
    }
    .await;
    drop(stdin);

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("waiting for {cmd}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{cmd} failed: {}", stderr.trim());
    }

    // A broken pipe only matters if the command itself reported success.
    streamed?;
    Ok(())
}
