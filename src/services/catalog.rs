//! Catalog home page counts

use crate::{error::AppResult, models::BookInstanceStatus, repository::SharedStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    store: SharedStore,
}

impl CatalogService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Record counts per collection
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.store.count_books(),
            self.store.count_book_instances(None),
            self.store
                .count_book_instances(Some(BookInstanceStatus::Available)),
            self.store.count_authors(),
            self.store.count_genres(),
        )?;

        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::AppError;
    use crate::repository::MockCatalogStore;

    #[tokio::test]
    async fn test_counts() {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(|| Ok(3));
        store
            .expect_count_book_instances()
            .returning(|status| Ok(if status.is_some() { 2 } else { 5 }));
        store.expect_count_authors().returning(|| Ok(2));
        store.expect_count_genres().returning(|| Ok(4));

        let counts = CatalogService::new(Arc::new(store)).counts().await.unwrap();
        assert_eq!(
            counts,
            CatalogCounts {
                books: 3,
                book_instances: 5,
                book_instances_available: 2,
                authors: 2,
                genres: 4,
            }
        );
    }

    #[tokio::test]
    async fn test_any_failed_count_fails_the_page() {
        let mut store = MockCatalogStore::new();
        store.expect_count_books().returning(|| Ok(3));
        store
            .expect_count_book_instances()
            .returning(|_| Ok(0));
        store
            .expect_count_authors()
            .returning(|| Err(AppError::Store("timeout".to_string())));
        store.expect_count_genres().returning(|| Ok(4));

        let result = CatalogService::new(Arc::new(store)).counts().await;
        assert!(result.is_err());
    }
}
