//! PostgreSQL store

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{CatalogStore, Removal};
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::{
        Author, AuthorInput, Book, BookDetail, BookInput, BookInstance, BookInstanceInput,
        BookInstanceStatus, BookInstanceWithBook, BookWithAuthor, Genre, GenreInput,
    },
};

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";
const BOOK_COLUMNS: &str = "id, title, author_id, summary, isbn, genre_ids";
const BOOK_INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back";

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    /// Open the pool and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(&config.url)?.options([(
            "statement_timeout",
            format!("{}s", config.statement_timeout_secs),
        )]);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }

    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn authors_by_ids(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Author>> {
        let rows = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = ANY($1)",
            AUTHOR_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|a| (a.id, a)).collect())
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        // Keep the order the book lists its genres in
        let mut by_id: HashMap<Uuid, Genre> = rows.into_iter().map(|g| (g.id, g)).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn books_by_ids(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = ANY($1)",
            BOOK_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|b| (b.id, b)).collect())
    }

    /// Tell `Missing` from `Referenced` after a conditional delete matched nothing
    async fn removal_outcome(&self, table: &str, id: Uuid, rows_affected: u64) -> AppResult<Removal> {
        if rows_affected > 0 {
            return Ok(Removal::Removed);
        }
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            table
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(if exists { Removal::Referenced } else { Removal::Missing })
    }

    async fn count(&self, table: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors ORDER BY family_name, first_name",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = $1",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(&format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.first_name)
        .bind(&input.family_name)
        .bind(input.date_of_birth)
        .bind(input.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.family_name)
        .bind(input.date_of_birth)
        .bind(input.date_of_death)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn remove_author(&self, id: Uuid) -> AppResult<Removal> {
        let result = sqlx::query(
            r#"
            DELETE FROM authors
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM books WHERE author_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        self.removal_outcome("authors", id, result.rows_affected()).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.count("authors").await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_genre(&self, input: &GenreInput) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_genre(&self, id: Uuid, input: &GenreInput) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    async fn remove_genre(&self, id: Uuid) -> AppResult<Removal> {
        let result = sqlx::query(
            r#"
            DELETE FROM genres
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM books WHERE $1 = ANY(genre_ids))
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        self.removal_outcome("genres", id, result.rows_affected()).await
    }

    async fn count_genres(&self) -> AppResult<i64> {
        self.count("genres").await
    }

    async fn list_books(&self) -> AppResult<Vec<BookWithAuthor>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY title",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut author_ids: Vec<Uuid> = books.iter().map(|b| b.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.authors_by_ids(&author_ids).await?;

        Ok(books
            .into_iter()
            .map(|book| BookWithAuthor {
                author: authors.get(&book.author_id).cloned(),
                book,
            })
            .collect())
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(book) = book else {
            return Ok(None);
        };

        let (author, genres) = tokio::try_join!(
            self.find_author(book.author_id),
            self.genres_by_ids(&book.genre_ids),
        )?;

        Ok(Some(BookDetail {
            book,
            author,
            genres,
        }))
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY title",
            BOOK_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids) ORDER BY title",
            BOOK_COLUMNS
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_book(&self, input: &BookInput) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(input.author_id)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(&input.genre_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, genre_ids = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id)
        .bind(&input.title)
        .bind(input.author_id)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(&input.genre_ids)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn remove_book(&self, id: Uuid) -> AppResult<Removal> {
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM book_instances WHERE book_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        self.removal_outcome("books", id, result.rows_affected()).await
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.count("books").await
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let instances = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances ORDER BY due_back",
            BOOK_INSTANCE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut book_ids: Vec<Uuid> = instances.iter().map(|i| i.book_id).collect();
        book_ids.sort_unstable();
        book_ids.dedup();
        let books = self.books_by_ids(&book_ids).await?;

        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceWithBook {
                book: books.get(&instance.book_id).cloned(),
                instance,
            })
            .collect())
    }

    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceWithBook>> {
        let instance = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(instance) = instance else {
            return Ok(None);
        };

        let mut books = self.books_by_ids(&[instance.book_id]).await?;
        Ok(Some(BookInstanceWithBook {
            book: books.remove(&instance.book_id),
            instance,
        }))
    }

    async fn instances_of_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances WHERE book_id = $1 ORDER BY due_back",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_book_instance(&self, input: &BookInstanceInput) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(&format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(input.book_id)
        .bind(&input.imprint)
        .bind(input.status)
        .bind(input.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_book_instance(
        &self,
        id: Uuid,
        input: &BookInstanceInput,
    ) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(&format!(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(id)
        .bind(input.book_id)
        .bind(&input.imprint)
        .bind(input.status)
        .bind(input.due_back)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    async fn remove_book_instance(&self, id: Uuid) -> AppResult<Removal> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(if result.rows_affected() == 0 {
            Removal::Missing
        } else {
            Removal::Removed
        })
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE $1::book_instance_status IS NULL OR status = $1",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
