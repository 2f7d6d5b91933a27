//! Integration tests for the crawler
//!
//! These tests drive the full step cycle against the on-disk fixtures under
//! `tests/fixtures/` and against wiremock servers standing in for the wiki.

use std::path::PathBuf;
use tempfile::TempDir;
use wiki_ripple::config::parse_config;
use wiki_ripple::crawler::{LinkPolicy, LiveFetcher, LocalFetcher, WikiCrawler};
use wiki_ripple::index::{Index, SqliteIndex};
use wiki_ripple::{CrawlError, FetchError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JAVA: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";
const PROGRAMMING_LANGUAGE: &str = "https://en.wikipedia.org/wiki/Programming_language";
const OOP: &str = "https://en.wikipedia.org/wiki/Object-oriented_programming";

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn local_crawler(seed: &str) -> WikiCrawler<LocalFetcher, SqliteIndex> {
    let index = SqliteIndex::new_in_memory().expect("Failed to create index");
    WikiCrawler::new(seed, index, LocalFetcher::new(fixtures_dir()))
}

fn article(body: &str) -> String {
    format!(
        r#"<html><head><title>Test</title></head><body><div id="mw-content-text">{}</div></body></html>"#,
        body
    )
}

#[tokio::test]
async fn test_first_step_indexes_seed() {
    let mut crawler = local_crawler(JAVA);
    assert_eq!(crawler.queue_size(), 1);

    let result = crawler.step(false).await.expect("Step failed");

    assert_eq!(result.as_deref(), Some(JAVA));
    assert!(crawler.index().is_indexed(JAVA).unwrap());
    assert_eq!(
        crawler.frontier().iter().collect::<Vec<_>>(),
        vec![OOP, PROGRAMMING_LANGUAGE, PROGRAMMING_LANGUAGE]
    );
}

#[tokio::test]
async fn test_term_counts_after_crawl() {
    let mut crawler = local_crawler(JAVA);
    crawler.step(false).await.expect("Step failed");

    let index = crawler.index();
    assert_eq!(index.get_count(JAVA, "java").unwrap(), 3);
    assert_eq!(index.get_count(JAVA, "the").unwrap(), 3);
    assert_eq!(index.get_count(JAVA, "high").unwrap(), 1);
    assert_eq!(index.get_count(JAVA, "main").unwrap(), 0);

    let counts = index.get_term_counts("java").unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[JAVA], 3);
}

#[tokio::test]
async fn test_run_drains_fixture_site() {
    let mut crawler = local_crawler(JAVA);

    let report = crawler.run(10, false).await.expect("Crawl failed");

    assert_eq!(report.indexed, vec![JAVA, OOP, PROGRAMMING_LANGUAGE]);
    assert_eq!(report.skipped, 2);
    assert!(report.failed.is_empty());
    assert_eq!(crawler.queue_size(), 0);

    // Exhausted frontier stays exhausted
    assert_eq!(crawler.step(false).await.unwrap(), None);
    assert_eq!(crawler.step(true).await.unwrap(), None);

    let programming = crawler.index().get_term_counts("programming").unwrap();
    assert_eq!(programming[OOP], 2);
    assert_eq!(programming[PROGRAMMING_LANGUAGE], 1);
    assert_eq!(programming.get(JAVA), Some(&1));
}

#[tokio::test]
async fn test_already_indexed_seed_is_skipped() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("index.db");

    {
        let index = SqliteIndex::new(&db_path).expect("Failed to open index");
        let mut crawler = WikiCrawler::new(JAVA, index, LocalFetcher::new(fixtures_dir()));
        assert_eq!(crawler.step(false).await.unwrap().as_deref(), Some(JAVA));
    }

    // A second crawler over the same index sees the seed as visited, and the
    // missing fixture root proves nothing is fetched
    let index = SqliteIndex::new(&db_path).expect("Failed to reopen index");
    let mut crawler = WikiCrawler::new(JAVA, index, LocalFetcher::new(dir.path()));

    assert_eq!(crawler.step(false).await.unwrap(), None);
    assert_eq!(crawler.queue_size(), 0);
    assert_eq!(crawler.index().count_pages().unwrap(), 1);
}

#[tokio::test]
async fn test_missing_fixture_is_fetch_error() {
    let mut crawler = local_crawler("https://en.wikipedia.org/wiki/No_such_page");

    let result = crawler.step(false).await;

    assert!(matches!(
        result,
        Err(CrawlError::Fetch(FetchError::Fixture { .. }))
    ));
    assert_eq!(crawler.queue_size(), 0);
    assert_eq!(crawler.index().count_pages().unwrap(), 0);
}

#[tokio::test]
async fn test_crawler_from_config() {
    let config = parse_config(&format!(
        r#"
[crawler]
seed = "{}"
source = "local"
fixtures-dir = "{}"
max-pages = 2

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[index]
database-path = "unused.db"
"#,
        JAVA,
        fixtures_dir().display()
    ))
    .expect("Failed to parse config");

    let fetcher = LocalFetcher::new(config.crawler.fixtures_dir.clone().unwrap());
    let policy = LinkPolicy::new(&config.crawler.origin, &config.crawler.link_prefix);
    let mut crawler = WikiCrawler::new(
        &config.crawler.seed,
        SqliteIndex::new_in_memory().unwrap(),
        fetcher,
    )
    .with_policy(policy);

    let report = crawler
        .run(config.crawler.max_pages as usize, false)
        .await
        .expect("Crawl failed");

    assert_eq!(report.indexed, vec![JAVA, OOP]);
    assert_eq!(crawler.queue_size(), 2);
}

#[tokio::test]
async fn test_live_crawl_against_mock_server() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/wiki/Seed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article(
            r#"<p>Seed page <a href="/wiki/A">A</a></p>
               <p><a href="https://elsewhere.example/wiki/X">X</a> <a href="/wiki/Gone">Gone</a></p>"#,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article(
            r#"<p>Page A links back to <a href="/wiki/Seed">Seed</a></p>"#,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/wiki/Seed", base_url);
    let page_a = format!("{}/wiki/A", base_url);
    let gone = format!("{}/wiki/Gone", base_url);

    let dir = TempDir::new().unwrap();
    let index = SqliteIndex::new(&dir.path().join("index.db")).expect("Failed to open index");
    let fetcher = LiveFetcher::with_client(reqwest::Client::new());
    let mut crawler =
        WikiCrawler::new(&seed, index, fetcher).with_policy(LinkPolicy::new(&base_url, "/wiki/"));

    let report = crawler.run(10, false).await.expect("Crawl failed");

    assert_eq!(report.indexed, vec![seed.clone(), page_a.clone()]);
    assert_eq!(report.failed, vec![gone]);
    assert_eq!(report.skipped, 1);

    let index = crawler.into_index();
    assert_eq!(index.get_count(&page_a, "seed").unwrap(), 1);
    assert_eq!(index.get_urls("page").unwrap(), vec![page_a, seed]);
}

#[tokio::test]
async fn test_live_fetch_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/wiki/Broken", mock_server.uri());
    let mut crawler = WikiCrawler::new(
        &seed,
        SqliteIndex::new_in_memory().unwrap(),
        LiveFetcher::with_client(reqwest::Client::new()),
    );

    let result = crawler.step(false).await;

    assert!(matches!(
        result,
        Err(CrawlError::Fetch(FetchError::Status { status: 500, .. }))
    ));
    assert!(!crawler.index().is_indexed(&seed).unwrap());
}

#[tokio::test]
async fn test_live_fetch_without_content_section() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Plain"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>plain</p></body></html>"),
        )
        .mount(&mock_server)
        .await;

    let seed = format!("{}/wiki/Plain", mock_server.uri());
    let mut crawler = WikiCrawler::new(
        &seed,
        SqliteIndex::new_in_memory().unwrap(),
        LiveFetcher::with_client(reqwest::Client::new()),
    );

    assert!(matches!(
        crawler.step(false).await,
        Err(CrawlError::Fetch(FetchError::MissingContent { .. }))
    ));
}
