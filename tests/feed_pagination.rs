//! Integration tests for infinite-scroll pagination against a mock catalog.
//!
//! Each test starts its own wiremock server and drives a `Feed` the way the
//! UI loop does: run the returned request through `CatalogClient`, hand the
//! result back with `apply_page`, then report which rows are on screen.

use pretty_assertions::assert_eq;
use serde_json::json;
use shelf::catalog::{CatalogClient, CatalogError, PageQuery};
use shelf::feed::{Feed, FeedState, FetchRequest, PageOutcome};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn books_json(ids: std::ops::Range<u64>) -> Vec<serde_json::Value> {
    ids.map(|id| {
        json!({
            "id": id,
            "title": format!("Book {}", id),
            "authors": [{ "name": "Tolstoy, Leo", "birth_year": 1828 }],
            "formats": { "text/html": format!("https://example.com/{}.html", id) },
            "download_count": 10
        })
    })
    .collect()
}

async fn mount_page(server: &MockServer, page: u64, count: u64, ids: std::ops::Range<u64>) {
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": count,
            "next": null,
            "previous": null,
            "results": books_json(ids),
        })))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(
        &format!("{}/books/", server.uri()),
        Duration::from_secs(5),
        1024 * 1024,
    )
    .unwrap()
}

async fn run(client: &CatalogClient, feed: &mut Feed, request: FetchRequest) -> PageOutcome {
    let result = client.fetch_page(&request.query).await;
    feed.apply_page(request.generation, request.query.page, result)
}

#[tokio::test]
async fn test_drama_search_loads_second_page_at_tail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param("mime_type", "image/"))
        .and(query_param("topic", "Drama"))
        .and(query_param("search", "war"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 40,
            "results": books_json(0..32),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param("topic", "Drama"))
        .and(query_param("search", "war"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 40,
            "results": books_json(32..40),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut feed = Feed::new("Drama");
    let unfiltered = feed.start();

    // Typing before the first page arrives supersedes it.
    let request = feed.set_search("war").unwrap();
    assert_eq!(request.query, PageQuery::new("Drama", "war", 1));
    assert!(request.generation > unfiltered.generation);
    assert!(feed.books().is_empty());
    let outcome = run(&client, &mut feed, request).await;
    assert_eq!(outcome, PageOutcome::Appended { added: 32 });
    assert!(feed.has_more());

    // Top of the list only: no request.
    assert!(feed.report_visible(0..10).is_none());

    let next = feed.report_visible(22..32).unwrap();
    assert_eq!(next.query, PageQuery::new("Drama", "war", 2));
    run(&client, &mut feed, next).await;

    assert_eq!(feed.books().len(), 40);
    assert!(!feed.has_more());
    assert_eq!(feed.state(), FeedState::Loaded { has_more: false });

    // New tail visible, nothing left to load.
    assert!(feed.report_visible(30..40).is_none());
}

#[tokio::test]
async fn test_unfiltered_feed_walks_every_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 70, 0..32).await;
    mount_page(&server, 2, 70, 32..64).await;
    mount_page(&server, 3, 70, 64..70).await;

    let client = client_for(&server);
    let mut feed = Feed::new("");
    let mut request = Some(feed.start());
    let mut lengths = Vec::new();

    while let Some(r) = request.take() {
        run(&client, &mut feed, r).await;
        lengths.push(feed.books().len());
        let len = feed.books().len();
        request = feed.report_visible(len.saturating_sub(5)..len);
    }

    assert_eq!(lengths, vec![32, 64, 70]);
    let ids: Vec<u64> = feed.books().iter().map(|b| b.id).collect();
    assert_eq!(ids, (0..70).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_server_error_keeps_list_and_retries_same_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 40, 0..32).await;
    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 2, 40, 32..40).await;

    let client = client_for(&server);
    let mut feed = Feed::new("History");
    let first = feed.start();
    run(&client, &mut feed, first).await;

    let second = feed.report_visible(30..32).unwrap();
    assert_eq!(run(&client, &mut feed, second).await, PageOutcome::Failed);
    assert_eq!(feed.books().len(), 32);
    assert!(feed.has_more());
    assert!(!feed.is_loading());

    // Scroll away and back: the tail trigger fires again for page 2.
    assert!(feed.report_visible(0..10).is_none());
    let retry = feed.report_visible(30..32).unwrap();
    assert_eq!(retry.query.page, 2);
    run(&client, &mut feed, retry).await;
    assert_eq!(feed.books().len(), 40);
}

#[tokio::test]
async fn test_response_for_old_search_is_discarded() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 3, 0..3).await;

    let client = client_for(&server);
    let mut feed = Feed::new("Fiction");
    let first = feed.start();
    let current = feed.set_search("verne").unwrap();

    // Both requests were spawned; the older one answers last.
    let fresh = client.fetch_page(&current.query).await;
    feed.apply_page(current.generation, 1, fresh);
    let late = client.fetch_page(&first.query).await;
    assert_eq!(
        feed.apply_page(first.generation, 1, late),
        PageOutcome::Stale
    );
    assert_eq!(feed.books().len(), 3);
}

#[tokio::test]
async fn test_malformed_payload_reported_as_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"count\": \"many\"}"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_page(&PageQuery::new("", "", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}
