mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use getnews::api::handlers::{args_handler, index_handler};
use getnews::state::AppState;
use std::sync::Arc;

use common::{FailingNewsSource, StubNewsSource};

fn news_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/{args}", get(args_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn setup() -> (TestServer, Arc<StubNewsSource>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(StubNewsSource::new(common::default_articles()));
    let ctx = common::create_test_state(source.clone(), &dir.path().join("analytics.log"));
    (news_server(ctx.state), source, dir)
}

#[tokio::test]
async fn test_index_uses_country_subdomain() {
    let (server, source, _dir) = setup();

    let response = server.get("/").add_header("Host", "gb.getnews.tech").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Reuters - First story"));
    assert!(body.contains("Reuters - Second story"));
    assert!(body.contains("Powered by the News API"));

    let request = source.last_request().unwrap();
    assert_eq!(request.country.map(|c| c.as_str()), Some("gb"));
    assert_eq!(request.query, None);
    assert_eq!(request.page_size, 10);
}

#[tokio::test]
async fn test_bare_domain_has_no_country() {
    let (server, source, _dir) = setup();

    server
        .get("/")
        .add_header("Host", "getnews.tech")
        .await
        .assert_status_ok();

    assert_eq!(source.last_request().unwrap().country, None);
}

#[tokio::test]
async fn test_dev_subdomain_is_skipped() {
    let (server, source, _dir) = setup();

    server
        .get("/")
        .add_header("Host", "dev.getnews.tech")
        .await
        .assert_status_ok();
    assert_eq!(source.last_request().unwrap().country, None);

    server
        .get("/")
        .add_header("Host", "fr.dev.getnews.tech")
        .await
        .assert_status_ok();
    assert_eq!(
        source.last_request().unwrap().country.map(|c| c.as_str()),
        Some("fr")
    );
}

#[tokio::test]
async fn test_args_are_forwarded() {
    let (server, source, _dir) = setup();

    let response = server
        .get("/climate+change,category=science,n=5,page=2")
        .add_header("Host", "us.getnews.tech")
        .await;

    response.assert_status_ok();
    let request = source.last_request().unwrap();
    assert_eq!(request.query.as_deref(), Some("climate change"));
    assert_eq!(request.category.as_deref(), Some("science"));
    assert_eq!(request.page_size, 5);
    assert_eq!(request.page, 2);
}

#[tokio::test]
async fn test_article_urls_are_shortened() {
    let (server, _source, _dir) = setup();

    let body = server.get("/").await.text();

    assert!(body.contains("https://getnews.tech/s/"));
    assert!(!body.contains("https://example.com/first"));
}

#[tokio::test]
async fn test_unknown_country_is_rejected() {
    let (server, source, _dir) = setup();

    let response = server.get("/news").add_header("Host", "xx.getnews.tech").await;

    response.assert_status_bad_request();
    assert!(response.text().contains("xx is not a valid country to query."));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_invalid_arguments_are_rejected() {
    let (server, source, _dir) = setup();

    let response = server.get("/trump,colour=red").await;
    response.assert_status_bad_request();
    assert!(response.text().contains("Invalid arguments \"colour=red\"."));

    let response = server.get("/trump,category=cooking").await;
    response.assert_status_bad_request();
    assert!(response.text().contains("\"cooking\" is not a valid category."));

    let response = server.get("/trump,n=101").await;
    response.assert_status_bad_request();

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_reverse_flag_flips_order() {
    let (server, _source, _dir) = setup();

    let body = server.get("/markets,reverse").await.text();

    let first = body.find("First story").unwrap();
    let second = body.find("Second story").unwrap();
    assert!(second < first);
}

#[tokio::test]
async fn test_curl_gets_color_unless_disabled() {
    colored::control::set_override(true);
    let (server, _source, _dir) = setup();

    let colored_body = server
        .get("/markets")
        .add_header("User-Agent", "curl/8.5.0")
        .await
        .text();
    assert!(colored_body.contains('\u{1b}'));

    let plain_body = server
        .get("/markets,nocolor")
        .add_header("User-Agent", "curl/8.5.0")
        .await
        .text();
    assert!(!plain_body.contains('\u{1b}'));

    let browser_body = server
        .get("/markets")
        .add_header("User-Agent", "Mozilla/5.0")
        .await
        .text();
    assert!(!browser_body.contains('\u{1b}'));
}

#[tokio::test]
async fn test_repeated_requests_are_cached() {
    let (server, source, _dir) = setup();

    let first = server.get("/markets,n=5").await.text();
    // Presentation flags do not change the upstream request.
    server.get("/markets,n=5,nocolor").await.assert_status_ok();
    let again = server.get("/markets,n=5").await.text();

    assert_eq!(source.calls(), 1);
    assert_eq!(first, again);
}

#[tokio::test]
async fn test_upstream_failure_is_generic_500() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = common::create_test_state(
        Arc::new(FailingNewsSource),
        &dir.path().join("analytics.log"),
    );
    let server = news_server(ctx.state);

    let response = server.get("/markets").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text();
    assert!(body.contains("An error occurred. Please try again later."));
    assert!(!body.contains("Error fetching articles"));
}
