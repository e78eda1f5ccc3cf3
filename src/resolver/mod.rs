//! Backend resolvers.
//!
//! A resolver pairs a match predicate over a parsed URL with a fetch
//! operation that materializes an archive into a destination directory.
//! Resolvers are consulted in registration order and the first match
//! wins; overlapping predicates are resolved purely by that order.

mod file;
mod git;
mod http;
mod tar;
mod zip;

pub use file::FileResolver;
pub use git::GitResolver;
pub use tar::TarResolver;
pub use zip::ZipResolver;

use std::path::Path;

use async_trait::async_trait;
use url::Url;

use crate::source::Source;

/// A backend capable of fetching archives for a class of URLs.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Short identifier used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Returns true if this resolver can handle the given source URL.
    ///
    /// The path still carries any `//` sub-directory selector at this
    /// point; suffix checks must look at the path up to the selector.
    fn matches(&self, url: &Url) -> bool;

    /// Fetch an archive from a source and unpack it into `dest`,
    /// creating the directory if absent. Dropping the returned future
    /// cancels the fetch.
    async fn fetch(&self, source: &Source, dest: &Path) -> anyhow::Result<()>;
}

impl std::fmt::Debug for dyn Resolver + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The URL path up to any `//` sub-directory selector.
pub(crate) fn effective_path(url: &Url) -> &str {
    let path = url.path();
    match path.split_once("//") {
        Some((base, _)) => base,
        None => path,
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve every request on a fresh local port with a fixed response.
    ///
    /// Returns the base URL and the server task handle.
    pub(crate) async fn serve(status: &'static str, body: Vec<u8>) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };

                // Drain the request head before answering.
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request.windows(4).any(|window| window == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let header = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes()).await;
                let _ = stream.write_all(&body).await;
                let _ = stream.shutdown().await;
            }
        });

        (format!("http://{addr}"), handle)
    }
}
