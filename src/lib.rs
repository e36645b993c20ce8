//! bookstore - A minimal in-memory bookstore CRUD API
//!
//! Books live in a process-local [`store::BookStore`] and are served as JSON
//! by the axum server in [`http_server`].

pub mod cli;
pub mod http_server;
pub mod logging;
pub mod store;
