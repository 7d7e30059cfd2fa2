//! In-process store
//!
//! Collections keep insertion order. Each operation takes the lock once, so
//! conditional removals see a consistent view of the dependents.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CatalogStore, Removal};
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorInput, Book, BookDetail, BookInput, BookInstance, BookInstanceInput,
        BookInstanceStatus, BookInstanceWithBook, BookWithAuthor, Genre, GenreInput,
    },
};

/// Connection string prefix selecting this store
pub const SCHEME: &str = "memory:";

#[derive(Default)]
struct Collections {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
    book_instances: IndexMap<Uuid, BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let data = self.data.read().await;
        let mut authors: Vec<Author> = data.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.data.read().await.authors.get(&id).cloned())
    }

    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author> {
        let author = input.clone().into_author(Uuid::new_v4());
        self.data
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Author> {
        let mut data = self.data.write().await;
        let slot = data
            .authors
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
        *slot = input.clone().into_author(id);
        Ok(slot.clone())
    }

    async fn remove_author(&self, id: Uuid) -> AppResult<Removal> {
        let mut data = self.data.write().await;
        if data.books.values().any(|b| b.author_id == id) {
            return Ok(Removal::Referenced);
        }
        Ok(match data.authors.shift_remove(&id) {
            Some(_) => Removal::Removed,
            None => Removal::Missing,
        })
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(count(self.data.read().await.authors.len()))
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let data = self.data.read().await;
        let mut genres: Vec<Genre> = data.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.data.read().await.genres.get(&id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let data = self.data.read().await;
        Ok(data.genres.values().find(|g| g.name == name).cloned())
    }

    async fn create_genre(&self, input: &GenreInput) -> AppResult<Genre> {
        let mut data = self.data.write().await;
        if data.genres.values().any(|g| g.name == input.name) {
            return Err(AppError::Store(format!("Genre name {} already exists", input.name)));
        }
        let genre = Genre {
            id: Uuid::new_v4(),
            name: input.name.clone(),
        };
        data.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update_genre(&self, id: Uuid, input: &GenreInput) -> AppResult<Genre> {
        let mut data = self.data.write().await;
        if data.genres.values().any(|g| g.id != id && g.name == input.name) {
            return Err(AppError::Store(format!("Genre name {} already exists", input.name)));
        }
        let slot = data
            .genres
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))?;
        slot.name = input.name.clone();
        Ok(slot.clone())
    }

    async fn remove_genre(&self, id: Uuid) -> AppResult<Removal> {
        let mut data = self.data.write().await;
        if data.books.values().any(|b| b.genre_ids.contains(&id)) {
            return Ok(Removal::Referenced);
        }
        Ok(match data.genres.shift_remove(&id) {
            Some(_) => Removal::Removed,
            None => Removal::Missing,
        })
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(count(self.data.read().await.genres.len()))
    }

    async fn list_books(&self) -> AppResult<Vec<BookWithAuthor>> {
        let data = self.data.read().await;
        let mut books: Vec<BookWithAuthor> = data
            .books
            .values()
            .map(|book| BookWithAuthor {
                author: data.authors.get(&book.author_id).cloned(),
                book: book.clone(),
            })
            .collect();
        books.sort_by(|a, b| a.book.title.cmp(&b.book.title));
        Ok(books)
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let data = self.data.read().await;
        Ok(data.books.get(&id).map(|book| BookDetail {
            author: data.authors.get(&book.author_id).cloned(),
            genres: book
                .genre_ids
                .iter()
                .filter_map(|g| data.genres.get(g).cloned())
                .collect(),
            book: book.clone(),
        }))
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let data = self.data.read().await;
        let mut books: Vec<Book> = data
            .books
            .values()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let data = self.data.read().await;
        let mut books: Vec<Book> = data
            .books
            .values()
            .filter(|b| b.genre_ids.contains(&genre_id))
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn create_book(&self, input: &BookInput) -> AppResult<Book> {
        let book = input.clone().into_book(Uuid::new_v4());
        self.data.write().await.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Book> {
        let mut data = self.data.write().await;
        let slot = data
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        *slot = input.clone().into_book(id);
        Ok(slot.clone())
    }

    async fn remove_book(&self, id: Uuid) -> AppResult<Removal> {
        let mut data = self.data.write().await;
        if data.book_instances.values().any(|i| i.book_id == id) {
            return Ok(Removal::Referenced);
        }
        Ok(match data.books.shift_remove(&id) {
            Some(_) => Removal::Removed,
            None => Removal::Missing,
        })
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(count(self.data.read().await.books.len()))
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let data = self.data.read().await;
        let mut instances: Vec<BookInstanceWithBook> = data
            .book_instances
            .values()
            .map(|instance| BookInstanceWithBook {
                book: data.books.get(&instance.book_id).cloned(),
                instance: instance.clone(),
            })
            .collect();
        instances.sort_by_key(|i| i.instance.due_back);
        Ok(instances)
    }

    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceWithBook>> {
        let data = self.data.read().await;
        Ok(data
            .book_instances
            .get(&id)
            .map(|instance| BookInstanceWithBook {
                book: data.books.get(&instance.book_id).cloned(),
                instance: instance.clone(),
            }))
    }

    async fn instances_of_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let data = self.data.read().await;
        let mut instances: Vec<BookInstance> = data
            .book_instances
            .values()
            .filter(|i| i.book_id == book_id)
            .cloned()
            .collect();
        instances.sort_by_key(|i| i.due_back);
        Ok(instances)
    }

    async fn create_book_instance(&self, input: &BookInstanceInput) -> AppResult<BookInstance> {
        let instance = input.clone().into_instance(Uuid::new_v4());
        self.data
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn update_book_instance(
        &self,
        id: Uuid,
        input: &BookInstanceInput,
    ) -> AppResult<BookInstance> {
        let mut data = self.data.write().await;
        let slot = data
            .book_instances
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?;
        *slot = input.clone().into_instance(id);
        Ok(slot.clone())
    }

    async fn remove_book_instance(&self, id: Uuid) -> AppResult<Removal> {
        Ok(match self.data.write().await.book_instances.shift_remove(&id) {
            Some(_) => Removal::Removed,
            None => Removal::Missing,
        })
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let data = self.data.read().await;
        let n = data
            .book_instances
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(count(n))
    }
}
