//! Business logic services
//!
//! One operation per route. Each returns a view model, a redirect target or
//! an [`AppError`](crate::error::AppError). Independent store reads inside an
//! operation are issued together with `tokio::try_join!`.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use uuid::Uuid;

use crate::repository::SharedStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    pub genres: genres::GenreService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: SharedStore) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            authors: authors::AuthorService::new(store.clone()),
            books: books::BookService::new(store.clone()),
            genres: genres::GenreService::new(store.clone()),
            book_instances: book_instances::BookInstanceService::new(store),
        }
    }
}

/// Result of a create or update submission
#[derive(Debug)]
pub enum FormOutcome<P> {
    /// Persisted; continue at the record's page
    Saved { url: String },
    /// Nothing persisted; show the form again with its errors
    Invalid(P),
}

/// Result of a delete submission
#[derive(Debug)]
pub enum DeleteOutcome<P> {
    /// Removed, or already gone
    Deleted,
    /// Dependents still exist; show the confirmation page again
    Blocked(P),
}

/// A link to an entity page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub label: String,
}

/// Path identifiers are opaque; anything that is not a UUID names nothing
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}
