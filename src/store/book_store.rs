//! # Book Store
//!
//! Every operation runs as a single critical section over the book list.
//! Lookups are first-match linear scans in insertion order.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::book::{Book, NewBook};
use super::errors::{StoreError, StoreResult};

/// In-memory, insertion-ordered book collection
#[derive(Debug, Default)]
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the two records present at process start
    pub fn seeded() -> Self {
        Self::with_books(vec![
            Book::new(1, "Gin Framework", "Gin Devs"),
            Book::new(2, "Go Programming", "John Doe"),
        ])
    }

    /// Create a store with the given records, kept in order
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books.write().map_err(|_| StoreError::Poisoned)
    }

    /// Append a book, assigning `id = count + 1`.
    ///
    /// After deletions this can hand out an id that an existing record
    /// already carries. The collision is logged, not prevented.
    pub fn create(&self, new_book: NewBook) -> StoreResult<Book> {
        let mut books = self.write()?;

        let id = books.len() as i64 + 1;
        if books.iter().any(|b| b.id == id) {
            warn!(id, "assigned book id duplicates an existing record");
        }

        let book = Book::new(id, new_book.title, new_book.author);
        books.push(book.clone());

        info!(id, title = %book.title, "book created");
        Ok(book)
    }

    /// All books in insertion order
    pub fn list(&self) -> StoreResult<Vec<Book>> {
        Ok(self.read()?.clone())
    }

    /// First book with the given id
    pub fn get(&self, id: i64) -> StoreResult<Book> {
        let books = self.read()?;
        books.iter().find(|b| b.id == id).cloned().ok_or_else(|| {
            debug!(id, "book lookup missed");
            StoreError::NotFound(id)
        })
    }

    /// Replace title and author of the first book with the given id
    pub fn update(&self, id: i64, changes: NewBook) -> StoreResult<Book> {
        let mut books = self.write()?;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;

        book.title = changes.title;
        book.author = changes.author;

        info!(id, title = %book.title, "book updated");
        Ok(book.clone())
    }

    /// Remove the first book with the given id; later records shift down
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let mut books = self.write()?;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;

        books.remove(index);

        info!(id, "book deleted");
        Ok(())
    }

    /// Number of books held
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }
}
