//! # Bookstore HTTP Server Module
//!
//! Axum server exposing the book store as a JSON API.
//!
//! # Endpoints
//!
//! - `POST /books` - Create a book
//! - `GET /books` - List all books
//! - `GET /books/:id` - Fetch one book
//! - `PUT /books/:id` - Replace title and author
//! - `DELETE /books/:id` - Remove a book

pub mod book_routes;
pub mod config;
pub mod errors;
pub mod server;

pub use book_routes::{book_routes, BooksState, BOOK_ROUTES};
pub use config::{ConfigError, HttpServerConfig};
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
