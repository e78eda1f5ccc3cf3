//! Snag fetches archives from pluggable sources.
//!
//! A [`Fetcher`] takes a loosely-typed source string (a filesystem path,
//! GitHub `org/repo` shorthand, a tarball or zip URL, a git URL with
//! query modifiers), normalizes it to a canonical URL, picks the first
//! registered [`Resolver`] that can serve it, and delegates the fetch:
//!
//! ```ignore
//! let fetcher = snag::Fetcher::default();
//! fetcher.fetch("user/repo?ref=main", Path::new("./vendor/repo")).await?;
//! ```
//!
//! Mappers normalize shorthand strings and resolvers fetch; both are
//! ordered lists supplied at construction, so the built-in set behind
//! [`Fetcher::default`] can be re-assembled or extended freely.

pub mod error;
pub mod fetcher;
pub mod fs;
pub mod mapper;
pub mod resolver;
pub mod source;

pub use error::Error;
pub use fetcher::Fetcher;
pub use mapper::Mapper;
pub use resolver::{FileResolver, GitResolver, Resolver, TarResolver, ZipResolver};
pub use source::Source;
