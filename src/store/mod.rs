//! # Book Store Module
//!
//! In-memory, insertion-ordered collection of books with CRUD operations.
//! The store lives only as long as the process; nothing is persisted.

pub mod book;
pub mod book_store;
pub mod errors;

pub use book::{Book, NewBook};
pub use book_store::BookStore;
pub use errors::{StoreError, StoreResult};
