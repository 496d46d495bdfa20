use std::collections::HashMap;
use std::sync::Mutex;

use fs2::FileExt;
use readme_corpus::config::Config;
use readme_corpus::download::PageFetcher;
use readme_corpus::error::Error;
use readme_corpus::io::FileStore;
use readme_corpus::pipelines::CorpusBuilder;
use readme_corpus::record::{CONTENT_SENTINEL, LANGUAGE_SENTINEL};
use serial_test::serial;
use url::Url;

/// Serves pages from memory, and records requested urls.
struct Fixtures {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl Fixtures {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    fn search_page(mut self, page: usize, identifiers: &[&str]) -> Self {
        let mut html = String::from(
            r#"<header><a class="v-align-middle">Pricing</a><a class="v-align-middle">Explore</a></header><ul>"#,
        );
        for identifier in identifiers {
            html.push_str(&format!(
                r#"<li><a class="v-align-middle" href="/{0}">{0}</a></li>"#,
                identifier
            ));
        }
        html.push_str("</ul>");
        let url = format!(
            "https://github.com/search?p={}&q=stars%3A%3E0&s=stars&type=Repositories",
            page
        );
        self.pages.insert(url, html);
        self
    }

    fn repository(mut self, identifier: &str, langs: &[&str], readme: Option<&str>) -> Self {
        let tags: String = langs
            .iter()
            .map(|l| format!(r#"<li><span class="color-fg-default text-bold mr-1 lang">{}</span></li>"#, l))
            .collect();
        let readme = readme
            .map(|r| format!(r#"<article class="markdown-body entry-content container-lg p-5" itemprop="text">{}</article>"#, r))
            .unwrap_or_default();
        let html = format!(
            r#"<html><body><main><div class="repository-content "><ul class="list-style-none">{}</ul><div id="readme">{}</div></div></main></body></html>"#,
            tags, readme
        );
        self.pages
            .insert(format!("https://github.com/{}", identifier), html);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for Fixtures {
    fn fetch_page(&self, url: &Url) -> Result<String, Error> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url.as_str()).cloned().ok_or(Error::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

fn fixtures() -> Fixtures {
    Fixtures::new()
        .search_page(0, &["rust-lang/rust", "jupyter/notebook"])
        .search_page(1, &["torvalds/linux", "ghost/missing"])
        .repository(
            "rust-lang/rust",
            &["Rust", "Python"],
            Some("<h1>The Rust Programming Language</h1><p>Empowering everyone to build reliable software.</p>"),
        )
        .repository(
            "jupyter/notebook",
            &["Jupyter Notebook", "TypeScript", "Python"],
            Some("Jupyter Notebook: interactive computing"),
        )
        .repository("torvalds/linux", &["C"], None)
}

/// Fixture search pages list two repositories after the navigation links.
fn config(pages: usize) -> Config {
    Config {
        page_count: pages,
        window: 2,
        workers: 3,
        ..Default::default()
    }
}

#[test_log::test]
fn full_build() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("repositories.json"));
    let builder = CorpusBuilder::new(config(3), fixtures(), store);

    let (snapshot, report) = builder.build().unwrap();

    // page 2 does not exist
    assert_eq!(report.failed_pages, vec![2]);
    assert_eq!(report.failed_identifiers, vec!["ghost/missing".to_string()]);

    let records = snapshot.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].title(), "rust-lang/rust");
    assert_eq!(records[0].language(), Some("Rust"));
    assert!(records[0]
        .content()
        .unwrap()
        .starts_with("The Rust Programming Language"));

    assert_eq!(records[1].title(), "jupyter/notebook");
    assert_eq!(records[1].language(), Some("TypeScript"));

    assert_eq!(records[2].title(), "torvalds/linux");
    assert_eq!(records[2].language(), None);
    assert_eq!(records[2].content(), None);

    // exactly one fetch per search page, then one per identifier
    let requested = builder.fetcher().requested();
    assert_eq!(requested.iter().filter(|u| u.contains("/search?")).count(), 3);
    assert_eq!(requested.len(), 3 + 4);
}

#[test_log::test]
fn snapshot_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repositories.json");
    let builder = CorpusBuilder::new(config(2), fixtures(), FileStore::new(path.clone()));
    builder.load_or_build(false).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 3);
    for entry in array {
        let object = entry.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("title"));
        assert!(object.contains_key("language"));
        assert!(object.contains_key("content"));
    }
    assert_eq!(array[2]["language"], LANGUAGE_SENTINEL);
    assert_eq!(array[2]["content"], CONTENT_SENTINEL);
}

#[test_log::test]
fn cached_loads_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repositories.json");
    let builder = CorpusBuilder::new(config(2), fixtures(), FileStore::new(path.clone()));

    builder.load_or_build(true).unwrap();
    let nb_requests = builder.fetcher().requested().len();
    let on_disk = std::fs::read(&path).unwrap();

    let (first, report) = builder.load_or_build(true).unwrap();
    assert!(report.is_none());
    let (second, _) = builder.load_or_build(true).unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&path).unwrap(), on_disk);
    assert_eq!(builder.fetcher().requested().len(), nb_requests);
}

#[test_log::test]
fn stale_cache_is_returned_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repositories.json");
    std::fs::write(
        &path,
        r#"[{"title":"old/repo","language":"Perl","content":"Readme Not Located"}]"#,
    )
    .unwrap();

    let builder = CorpusBuilder::new(config(2), fixtures(), FileStore::new(path));
    let (snapshot, _) = builder.load_or_build(true).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.records()[0].title(), "old/repo");
    assert_eq!(snapshot.records()[0].content(), None);
    assert!(builder.fetcher().requested().is_empty());
}

#[test_log::test]
fn corrupt_cache_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repositories.json");
    std::fs::write(&path, "[{\"title\":").unwrap();

    let builder = CorpusBuilder::new(config(2), fixtures(), FileStore::new(path.clone()));
    let r = builder.load_or_build(true);
    assert!(matches!(r, Err(Error::CorruptSnapshot { .. })));

    // nothing was rebuilt over it
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"title\":");
}

#[test_log::test]
fn unreachable_host_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repositories.json");
    let previous = r#"[{"title":"old/repo","language":"Perl","content":"hello"}]"#;
    std::fs::write(&path, previous).unwrap();

    let builder = CorpusBuilder::new(config(2), Fixtures::new(), FileStore::new(path.clone()));
    assert!(builder.load_or_build(false).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), previous);
}

#[test_log::test]
fn login_wall_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repositories.json");
    let previous = r#"[{"title":"old/repo","language":"Perl","content":"hello"}]"#;
    std::fs::write(&path, previous).unwrap();

    let wall = "<html><body>Sign in to search</body></html>";
    let mut fixtures = Fixtures::new();
    for page in 0..2 {
        fixtures.pages.insert(
            format!(
                "https://github.com/search?p={}&q=stars%3A%3E0&s=stars&type=Repositories",
                page
            ),
            wall.to_string(),
        );
    }

    let builder = CorpusBuilder::new(config(2), fixtures, FileStore::new(path.clone()));
    assert!(matches!(builder.load_or_build(false), Err(Error::EmptyBuild)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), previous);
}

#[test_log::test]
fn held_lock_fails_before_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("repositories.json"));
    let other_writer = std::fs::File::create(store.lock_path()).unwrap();
    other_writer.try_lock_exclusive().unwrap();

    let builder = CorpusBuilder::new(config(2), fixtures(), store);
    assert!(matches!(builder.build(), Err(Error::Locked(_))));
    assert!(builder.fetcher().requested().is_empty());

    FileExt::unlock(&other_writer).unwrap();
    assert!(builder.build().is_ok());
}

#[test_log::test]
fn stale_lock_file_does_not_block() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("repositories.json"));
    // left behind by an interrupted build
    std::fs::write(store.lock_path(), "").unwrap();

    let builder = CorpusBuilder::new(config(2), fixtures(), store);
    let (snapshot, _) = builder.build().unwrap();
    assert_eq!(snapshot.len(), 3);
}

#[test]
#[serial]
fn default_relative_cache_path() {
    let config = Config {
        page_count: 1,
        window: 2,
        ..Default::default()
    };
    let path = config.cache_path.clone();
    let _ = std::fs::remove_file(&path);

    let builder = CorpusBuilder::new(config, fixtures(), FileStore::new(path.clone()));
    let (snapshot, report) = builder.load_or_build(true).unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(report.map(|r| r.fetched), Some(2));
    assert!(path.is_file());

    std::fs::remove_file(&path).unwrap();
}
