//! End-to-end tests for the default fetcher.

use snag::{Error, Fetcher};

#[test]
fn resolves_org_repo_shorthand() {
    let fetcher = Fetcher::default();

    let (resolver, source) = fetcher.resolve("user/repo?ref=main").unwrap();
    assert_eq!(resolver.name(), "git");
    assert_eq!(source.url.as_str(), "https://github.com/user/repo?ref=main");
    assert_eq!(source.subdir, "");
}

#[test]
fn resolves_schemeless_github_paths() {
    let fetcher = Fetcher::default();

    let (resolver, source) = fetcher.resolve("github.com/user/repo").unwrap();
    assert_eq!(resolver.name(), "git");
    assert_eq!(source.url.as_str(), "https://github.com/user/repo");
}

#[test]
fn resolves_tarball_urls_with_subdirectory() {
    let fetcher = Fetcher::default();

    let (resolver, source) = fetcher
        .resolve("https://example.com/build/archive.tgz//pkg/dist")
        .unwrap();
    assert_eq!(resolver.name(), "tar");
    assert_eq!(source.url.path(), "/build/archive.tgz");
    assert_eq!(source.subdir, "pkg/dist");
}

#[test]
fn resolves_zip_urls() {
    let fetcher = Fetcher::default();

    let (resolver, source) = fetcher
        .resolve("https://example.com/release/archive.zip")
        .unwrap();
    assert_eq!(resolver.name(), "zip");
    assert_eq!(source.url.path(), "/release/archive.zip");
}

#[test]
fn resolves_existing_directories_to_canonical_file_urls() {
    let temp = tempfile::TempDir::new().unwrap();
    let canonical = temp.path().canonicalize().unwrap();
    let fetcher = Fetcher::default();

    let (resolver, source) = fetcher.resolve(temp.path().to_str().unwrap()).unwrap();
    assert_eq!(resolver.name(), "file");
    assert_eq!(source.url.scheme(), "file");
    assert_eq!(source.url.path(), canonical.to_str().unwrap());
}

#[test]
fn rejects_unsupported_sources() {
    let fetcher = Fetcher::default();

    let err = fetcher.resolve("ftp://host/file").unwrap_err();
    assert!(matches!(err, Error::UnsupportedSource(_)));
    assert!(err.to_string().contains("ftp://host/file"), "{err}");
}

#[test]
fn rejects_the_empty_source() {
    let fetcher = Fetcher::default();

    let err = fetcher.resolve("").unwrap_err();
    assert!(matches!(err, Error::InvalidSource(_)));
}

#[tokio::test]
async fn fetches_local_directories() {
    let src = tempfile::TempDir::new().unwrap();
    std::fs::write(src.path().join("file.txt"), "hello from test\n").unwrap();
    std::fs::create_dir_all(src.path().join("subdir")).unwrap();
    std::fs::write(src.path().join("subdir/nested.txt"), "nested content\n").unwrap();

    let work = tempfile::TempDir::new().unwrap();
    let dest = work.path().join("out");
    let fetcher = Fetcher::default();
    fetcher
        .fetch(src.path().to_str().unwrap(), &dest)
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(dest.join("file.txt")).unwrap(),
        "hello from test\n"
    );
    assert_eq!(
        std::fs::read_to_string(dest.join("subdir/nested.txt")).unwrap(),
        "nested content\n"
    );
}

#[tokio::test]
async fn fetch_surfaces_resolution_errors() {
    let work = tempfile::TempDir::new().unwrap();
    let fetcher = Fetcher::default();

    let err = fetcher
        .fetch("ftp://host/file", &work.path().join("out"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unsupported source"), "{err:#}");
}
