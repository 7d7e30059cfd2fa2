//! Genre pages

use std::fmt::Display;

use uuid::Uuid;

use crate::{
    display,
    error::{AppError, AppResult},
    models::{Book, Genre, GenreForm, GenreInput},
    repository::{Removal, SharedStore},
    validation::{sanitize, FormErrors, Sanitized},
};

use super::{books::genre_link, books::BookEntry, parse_id, DeleteOutcome, FormOutcome, Link};

const CREATE_TITLE: &str = "Create Genre";
const UPDATE_TITLE: &str = "Update Genre";

#[derive(Debug, Clone)]
pub struct GenreDetailPage {
    pub genre: Link,
    pub books: Vec<BookEntry>,
}

#[derive(Debug, Clone)]
pub struct GenreFormPage {
    pub title: &'static str,
    pub form: GenreForm,
    pub errors: FormErrors,
}

/// Confirmation page; deletion is refused while `books` is not empty
#[derive(Debug, Clone)]
pub struct GenreDeletePage {
    pub id: String,
    pub genre: Link,
    pub books: Vec<BookEntry>,
}

impl GenreDeletePage {
    fn new(genre: &Genre, books: &[Book]) -> Self {
        Self {
            id: genre.id.to_string(),
            genre: genre_link(genre),
            books: books.iter().map(BookEntry::from).collect(),
        }
    }
}

fn not_found(id: impl Display) -> AppError {
    AppError::NotFound(format!("Genre {} not found", id))
}

#[derive(Clone)]
pub struct GenreService {
    store: SharedStore,
}

impl GenreService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All genres by name
    pub async fn list(&self) -> AppResult<Vec<Link>> {
        let genres = self.store.list_genres().await?;
        Ok(genres.iter().map(genre_link).collect())
    }

    /// Genre with the books listing it
    pub async fn detail(&self, id: &str) -> AppResult<GenreDetailPage> {
        let genre_id = parse_id(id).ok_or_else(|| not_found(id))?;
        let (genre, books) = tokio::try_join!(
            self.store.find_genre(genre_id),
            self.store.books_by_genre(genre_id),
        )?;
        let genre = genre.ok_or_else(|| not_found(id))?;

        Ok(GenreDetailPage {
            genre: genre_link(&genre),
            books: books.iter().map(BookEntry::from).collect(),
        })
    }

    pub fn create_form(&self) -> GenreFormPage {
        GenreFormPage {
            title: CREATE_TITLE,
            form: GenreForm::default(),
            errors: FormErrors::default(),
        }
    }

    /// A name already in use leads to the existing genre instead of a copy
    pub async fn create(&self, form: GenreForm) -> AppResult<FormOutcome<GenreFormPage>> {
        let input = match sanitize(form) {
            Sanitized::Invalid { form, errors } => {
                return Ok(FormOutcome::Invalid(GenreFormPage {
                    title: CREATE_TITLE,
                    form,
                    errors,
                }))
            }
            Sanitized::Valid(input) => input,
        };

        if let Some(existing) = self.store.find_genre_by_name(&input.name).await? {
            tracing::debug!("Genre {} already exists", existing.id);
            return Ok(FormOutcome::Saved {
                url: display::genre_url(existing.id),
            });
        }

        let genre = self.store.create_genre(&input).await?;
        tracing::info!("Created genre {}", genre.id);
        Ok(FormOutcome::Saved {
            url: display::genre_url(genre.id),
        })
    }

    /// `None` when there is nothing to delete
    pub async fn delete_page(&self, id: &str) -> AppResult<Option<GenreDeletePage>> {
        let Some(genre_id) = parse_id(id) else {
            return Ok(None);
        };
        let (genre, books) = tokio::try_join!(
            self.store.find_genre(genre_id),
            self.store.books_by_genre(genre_id),
        )?;
        Ok(genre.map(|genre| GenreDeletePage::new(&genre, &books)))
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<GenreDeletePage>> {
        let Some(genre_id) = parse_id(id) else {
            return Ok(DeleteOutcome::Deleted);
        };
        let (genre, books) = tokio::try_join!(
            self.store.find_genre(genre_id),
            self.store.books_by_genre(genre_id),
        )?;
        let Some(genre) = genre else {
            return Ok(DeleteOutcome::Deleted);
        };
        if !books.is_empty() {
            return Ok(DeleteOutcome::Blocked(GenreDeletePage::new(&genre, &books)));
        }

        match self.store.remove_genre(genre_id).await? {
            Removal::Removed | Removal::Missing => {
                tracing::info!("Deleted genre {}", genre_id);
                Ok(DeleteOutcome::Deleted)
            }
            Removal::Referenced => {
                tracing::warn!("Genre {} gained books before it could be deleted", genre_id);
                let books = self.store.books_by_genre(genre_id).await?;
                Ok(DeleteOutcome::Blocked(GenreDeletePage::new(&genre, &books)))
            }
        }
    }

    pub async fn edit_form(&self, id: &str) -> AppResult<GenreFormPage> {
        let genre_id = parse_id(id).ok_or_else(|| not_found(id))?;
        let genre = self
            .store
            .find_genre(genre_id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(GenreFormPage {
            title: UPDATE_TITLE,
            form: GenreForm::from(&genre),
            errors: FormErrors::default(),
        })
    }

    /// Renaming onto another genre's name is rejected
    pub async fn update(&self, id: &str, form: GenreForm) -> AppResult<FormOutcome<GenreFormPage>> {
        let genre_id = parse_id(id).ok_or_else(|| not_found(id))?;
        let (form, errors) = match sanitize(form) {
            Sanitized::Invalid { form, errors } => (form, errors),
            Sanitized::Valid(input) => {
                if !self.name_taken(genre_id, &input).await? {
                    let genre = self.store.update_genre(genre_id, &input).await?;
                    tracing::info!("Updated genre {}", genre.id);
                    return Ok(FormOutcome::Saved {
                        url: display::genre_url(genre.id),
                    });
                }
                let mut errors = FormErrors::default();
                errors.push("name", "Genre name is already in use.");
                (GenreForm { name: input.name }, errors)
            }
        };

        self.store
            .find_genre(genre_id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(FormOutcome::Invalid(GenreFormPage {
            title: UPDATE_TITLE,
            form,
            errors,
        }))
    }

    async fn name_taken(&self, genre_id: Uuid, input: &GenreInput) -> AppResult<bool> {
        let existing = self.store.find_genre_by_name(&input.name).await?;
        Ok(existing.is_some_and(|genre| genre.id != genre_id))
    }
}
