//! Repository layer for catalog persistence
//!
//! [`CatalogStore`] is the seam between the services and the backing store.
//! Two implementations exist: PostgreSQL through `sqlx`, and an in-process
//! store used for development and tests. Neither enforces references between
//! collections; removals that must respect dependents are expressed as
//! conditional operations instead.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{
        Author, AuthorInput, Book, BookDetail, BookInput, BookInstance, BookInstanceInput,
        BookInstanceStatus, BookInstanceWithBook, BookWithAuthor, Genre, GenreInput,
    },
};

/// Result of a conditional removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// Nothing stored under the identifier
    Missing,
    /// Dependents still reference the record; nothing was removed
    Referenced,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Authors ordered by family name, then first name
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author>;
    /// Full replace; `NotFound` when absent
    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Author>;
    /// Removes the author unless a book references it
    async fn remove_author(&self, id: Uuid) -> AppResult<Removal>;
    async fn count_authors(&self) -> AppResult<i64>;

    /// Genres ordered by name
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn find_genre(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn create_genre(&self, input: &GenreInput) -> AppResult<Genre>;
    async fn update_genre(&self, id: Uuid, input: &GenreInput) -> AppResult<Genre>;
    /// Removes the genre unless a book lists it
    async fn remove_genre(&self, id: Uuid) -> AppResult<Removal>;
    async fn count_genres(&self) -> AppResult<i64>;

    /// Books ordered by title, authors resolved
    async fn list_books(&self) -> AppResult<Vec<BookWithAuthor>>;
    /// Book with author and genres resolved
    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookDetail>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn create_book(&self, input: &BookInput) -> AppResult<Book>;
    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Book>;
    /// Removes the book unless a copy references it
    async fn remove_book(&self, id: Uuid) -> AppResult<Removal>;
    async fn count_books(&self) -> AppResult<i64>;

    /// Copies ordered by due date, books resolved
    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceWithBook>>;
    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceWithBook>>;
    async fn instances_of_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn create_book_instance(&self, input: &BookInstanceInput) -> AppResult<BookInstance>;
    async fn update_book_instance(
        &self,
        id: Uuid,
        input: &BookInstanceInput,
    ) -> AppResult<BookInstance>;
    async fn remove_book_instance(&self, id: Uuid) -> AppResult<Removal>;
    /// All copies, or only those with `status`
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
}

/// Store handle shared by every service
pub type SharedStore = Arc<dyn CatalogStore>;

/// Open the store named by the connection string
pub async fn connect(config: &DatabaseConfig) -> AppResult<SharedStore> {
    if config.url.starts_with(memory::SCHEME) {
        tracing::warn!("Using the in-memory store; data is lost on shutdown");
        return Ok(Arc::new(memory::MemoryStore::new()));
    }

    let store = postgres::PgStore::connect(config).await?;
    Ok(Arc::new(store))
}
