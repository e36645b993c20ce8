//! Book HTTP Routes
//!
//! CRUD endpoints over the in-memory book store.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::errors::{ApiError, ApiResult};
use crate::store::{Book, BookStore, NewBook};

// ==================
// Shared State
// ==================

/// Books state shared across handlers
pub struct BooksState {
    pub store: BookStore,
}

impl BooksState {
    /// State backed by the seeded store
    pub fn new() -> Self {
        Self::with_store(BookStore::seeded())
    }

    pub fn with_store(store: BookStore) -> Self {
        Self { store }
    }
}

impl Default for BooksState {
    fn default() -> Self {
        Self::new()
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Method and path of every book endpoint, in registration order
pub const BOOK_ROUTES: &[(&str, &str)] = &[
    ("POST", "/books"),
    ("GET", "/books"),
    ("GET", "/books/:id"),
    ("PUT", "/books/:id"),
    ("DELETE", "/books/:id"),
];

// ==================
// Book Routes
// ==================

/// Create book routes
pub fn book_routes(state: Arc<BooksState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/:id",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidIdentifier)
}

fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<i64> {
    let Path(raw) = path?;
    parse_id(&raw)
}

/// Decode a book body whatever the request's content type
fn parse_body(body: &[u8]) -> ApiResult<NewBook> {
    Ok(serde_json::from_slice(body)?)
}

// ==================
// CRUD Handlers
// ==================

async fn create_book_handler(
    State(state): State<Arc<BooksState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let new_book = parse_body(&body)?;
    let book = state.store.create(new_book)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn list_books_handler(
    State(state): State<Arc<BooksState>>,
) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(state.store.list()?))
}

async fn get_book_handler(
    State(state): State<Arc<BooksState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Book>> {
    let id = path_id(path)?;
    Ok(Json(state.store.get(id)?))
}

async fn update_book_handler(
    State(state): State<Arc<BooksState>>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<Book>> {
    // Identifier is checked before the body
    let id = path_id(path)?;
    let changes = parse_body(&body)?;
    Ok(Json(state.store.update(id, changes)?))
}

async fn delete_book_handler(
    State(state): State<Arc<BooksState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(path)?;
    state.store.delete(id)?;
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
