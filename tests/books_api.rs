//! Books API integration tests
//!
//! Starts the full server on an ephemeral port and exercises it with reqwest.

use std::sync::Arc;

use bookstore::http_server::{BooksState, HttpServer, HttpServerConfig};
use bookstore::store::BookStore;
use reqwest::StatusCode;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

/// Bind to port 0 and return the base URL plus the shared state.
async fn start_server(store: BookStore) -> (String, Arc<BooksState>) {
    let config = HttpServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    };
    let state = Arc::new(BooksState::with_store(store));
    let server = HttpServer::with_state(config, state.clone());
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        server
            .serve(listener, std::future::pending())
            .await
            .unwrap();
    });

    (format!("http://{addr}"), state)
}

async fn book_ids(client: &reqwest::Client, base: &str) -> Vec<i64> {
    let books: Vec<Value> = client
        .get(format!("{base}/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    books.iter().map(|b| b["id"].as_i64().unwrap()).collect()
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[tokio::test]
async fn test_crud_lifecycle() {
    let (base, _) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    // Seed records
    let resp = client.get(format!("{base}/books")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            { "id": 1, "title": "Gin Framework", "author": "Gin Devs" },
            { "id": 2, "title": "Go Programming", "author": "John Doe" }
        ])
    );

    // Create
    let resp = client
        .post(format!("{base}/books"))
        .json(&json!({ "title": "X", "author": "Y" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 3, "title": "X", "author": "Y" }));

    // Fetch
    let resp = client.get(format!("{base}/books/3")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 3, "title": "X", "author": "Y" }));

    // Update
    let resp = client
        .put(format!("{base}/books/3"))
        .json(&json!({ "title": "Z", "author": "Y" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 3, "title": "Z", "author": "Y" }));

    // Delete
    let resp = client.delete(format!("{base}/books/3")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Book deleted" }));

    // Gone
    let resp = client.get(format!("{base}/books/3")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Book not found" }));
}

// =============================================================================
// Store Properties Over HTTP
// =============================================================================

#[tokio::test]
async fn test_list_on_empty_store() {
    let (base, _) = start_server(BookStore::new()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/books")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_delete_twice() {
    let (base, state) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    let resp = client.delete(format!("{base}/books/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.store.len().unwrap(), 1);

    let resp = client.delete(format!("{base}/books/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.store.len().unwrap(), 1);
}

#[tokio::test]
async fn test_update_missing_leaves_store_untouched() {
    let (base, _) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/books/10"))
        .json(&json!({ "title": "Z", "author": "Y" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(book_ids(&client, &base).await, vec![1, 2]);
}

/// Ids come from the current count, so a create after a delete can repeat
/// an id that is still in use.
#[tokio::test]
async fn test_create_after_delete_reuses_count_based_id() {
    let (base, _) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/books"))
        .json(&json!({ "title": "A", "author": "a" }))
        .send()
        .await
        .unwrap();
    client.delete(format!("{base}/books/2")).send().await.unwrap();

    let resp = client
        .post(format!("{base}/books"))
        .json(&json!({ "title": "B", "author": "b" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 3);
    assert_eq!(book_ids(&client, &base).await, vec![1, 3, 3]);
}

#[tokio::test]
async fn test_concurrent_creates() {
    let (base, state) = start_server(BookStore::new()).await;
    let client = reqwest::Client::new();

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = client.clone();
            let url = format!("{base}/books");
            tokio::spawn(async move {
                let resp = client
                    .post(url)
                    .json(&json!({ "title": format!("t{i}"), "author": "a" }))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(resp.status(), StatusCode::CREATED);
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let mut ids = book_ids(&client, &base).await;
    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
    assert_eq!(state.store.len().unwrap(), 20);
}

// =============================================================================
// Input Validation
// =============================================================================

#[tokio::test]
async fn test_invalid_identifier() {
    let (base, _) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    let overflow = "99999999999999999999";
    for req in [
        client.get(format!("{base}/books/abc")),
        client.put(format!("{base}/books/abc")).json(&json!({ "title": "Z", "author": "Y" })),
        client.delete(format!("{base}/books/abc")),
        client.get(format!("{base}/books/{overflow}")),
        client.put(format!("{base}/books/{overflow}")).json(&json!({ "title": "Z", "author": "Y" })),
        client.delete(format!("{base}/books/{overflow}")),
        client.get(format!("{base}/books/%FF")),
    ] {
        let resp = req.send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Invalid ID" }));
    }
    assert_eq!(book_ids(&client, &base).await, vec![1, 2]);
}

#[tokio::test]
async fn test_signed_identifier() {
    let (base, _) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/books/+2")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 2);

    let resp = client.get(format!("{base}/books/-1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies() {
    let (base, state) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    let bodies = [
        json!({ "title": "only title" }),
        json!({ "title": "X", "author": 42 }),
        json!(["not", "an", "object"]),
    ];
    for body in bodies {
        let resp = client
            .post(format!("{base}/books"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = resp.json().await.unwrap();
        assert!(error["error"].is_string());
    }

    let resp = client
        .post(format!("{base}/books"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(state.store.len().unwrap(), 2);
}

#[tokio::test]
async fn test_update_malformed_body_leaves_store_untouched() {
    let (base, state) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();
    let before = state.store.list().unwrap();

    for body in [json!({ "title": "Z" }), json!({ "title": "Z", "author": false })] {
        let resp = client
            .put(format!("{base}/books/1"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: Value = resp.json().await.unwrap();
        assert!(error["error"].is_string());
    }

    let resp = client
        .put(format!("{base}/books/1"))
        .header("content-type", "application/json")
        .body("{\"title\":")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(state.store.list().unwrap(), before);
}

/// Clients such as `curl -d` send a form content type with a JSON body.
#[tokio::test]
async fn test_json_body_accepted_regardless_of_content_type() {
    let (base, _) = start_server(BookStore::seeded()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/books"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(r#"{"title":"X","author":"Y"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 3, "title": "X", "author": "Y" }));

    let resp = client
        .put(format!("{base}/books/3"))
        .body(r#"{"title":"Z","author":"Y"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 3, "title": "Z", "author": "Y" }));
}
