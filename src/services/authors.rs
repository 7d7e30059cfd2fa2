//! Author pages

use std::fmt::Display;

use crate::{
    display,
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book},
    repository::{Removal, SharedStore},
    validation::{sanitize, FormErrors, Sanitized},
};

use super::{books::BookEntry, parse_id, DeleteOutcome, FormOutcome};

const CREATE_TITLE: &str = "Create Author";
const UPDATE_TITLE: &str = "Update Author";

/// Author with its display values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: String,
    pub url: String,
    pub name: String,
    pub born: String,
    pub died: String,
    pub lifespan: String,
}

impl From<&Author> for AuthorSummary {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            url: display::author_url(author.id),
            name: display::author_name(&author.first_name, &author.family_name),
            born: display::long_date_or_unknown(author.date_of_birth),
            died: display::long_date_or_unknown(author.date_of_death),
            lifespan: display::author_lifespan(author.date_of_birth, author.date_of_death),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthorDetailPage {
    pub author: AuthorSummary,
    pub books: Vec<BookEntry>,
}

#[derive(Debug, Clone)]
pub struct AuthorFormPage {
    pub title: &'static str,
    pub form: AuthorForm,
    pub errors: FormErrors,
}

/// Confirmation page; deletion is refused while `books` is not empty
#[derive(Debug, Clone)]
pub struct AuthorDeletePage {
    pub author: AuthorSummary,
    pub books: Vec<BookEntry>,
}

impl AuthorDeletePage {
    fn new(author: &Author, books: &[Book]) -> Self {
        Self {
            author: author.into(),
            books: books.iter().map(BookEntry::from).collect(),
        }
    }
}

fn not_found(id: impl Display) -> AppError {
    AppError::NotFound(format!("Author {} not found", id))
}

#[derive(Clone)]
pub struct AuthorService {
    store: SharedStore,
}

impl AuthorService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All authors, by family name
    pub async fn list(&self) -> AppResult<Vec<AuthorSummary>> {
        let authors = self.store.list_authors().await?;
        Ok(authors.iter().map(AuthorSummary::from).collect())
    }

    /// Author with the books written by them
    pub async fn detail(&self, id: &str) -> AppResult<AuthorDetailPage> {
        let author_id = parse_id(id).ok_or_else(|| not_found(id))?;
        let (author, books) = tokio::try_join!(
            self.store.find_author(author_id),
            self.store.books_by_author(author_id),
        )?;
        let author = author.ok_or_else(|| not_found(id))?;

        Ok(AuthorDetailPage {
            author: (&author).into(),
            books: books.iter().map(BookEntry::from).collect(),
        })
    }

    pub fn create_form(&self) -> AuthorFormPage {
        AuthorFormPage {
            title: CREATE_TITLE,
            form: AuthorForm::default(),
            errors: FormErrors::default(),
        }
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<FormOutcome<AuthorFormPage>> {
        match sanitize(form) {
            Sanitized::Invalid { form, errors } => Ok(FormOutcome::Invalid(AuthorFormPage {
                title: CREATE_TITLE,
                form,
                errors,
            })),
            Sanitized::Valid(input) => {
                let author = self.store.create_author(&input).await?;
                tracing::info!("Created author {}", author.id);
                Ok(FormOutcome::Saved {
                    url: display::author_url(author.id),
                })
            }
        }
    }

    /// `None` when there is nothing to delete
    pub async fn delete_page(&self, id: &str) -> AppResult<Option<AuthorDeletePage>> {
        let Some(author_id) = parse_id(id) else {
            return Ok(None);
        };
        let (author, books) = tokio::try_join!(
            self.store.find_author(author_id),
            self.store.books_by_author(author_id),
        )?;
        Ok(author.map(|author| AuthorDeletePage::new(&author, &books)))
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<AuthorDeletePage>> {
        let Some(author_id) = parse_id(id) else {
            return Ok(DeleteOutcome::Deleted);
        };
        let (author, books) = tokio::try_join!(
            self.store.find_author(author_id),
            self.store.books_by_author(author_id),
        )?;
        let Some(author) = author else {
            return Ok(DeleteOutcome::Deleted);
        };
        if !books.is_empty() {
            return Ok(DeleteOutcome::Blocked(AuthorDeletePage::new(&author, &books)));
        }

        match self.store.remove_author(author_id).await? {
            Removal::Removed | Removal::Missing => {
                tracing::info!("Deleted author {}", author_id);
                Ok(DeleteOutcome::Deleted)
            }
            Removal::Referenced => {
                tracing::warn!("Author {} gained books before it could be deleted", author_id);
                let books = self.store.books_by_author(author_id).await?;
                Ok(DeleteOutcome::Blocked(AuthorDeletePage::new(&author, &books)))
            }
        }
    }

    pub async fn edit_form(&self, id: &str) -> AppResult<AuthorFormPage> {
        let author_id = parse_id(id).ok_or_else(|| not_found(id))?;
        let author = self
            .store
            .find_author(author_id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(AuthorFormPage {
            title: UPDATE_TITLE,
            form: AuthorForm::from(&author),
            errors: FormErrors::default(),
        })
    }

    /// Replace the stored author with the submitted values
    pub async fn update(&self, id: &str, form: AuthorForm) -> AppResult<FormOutcome<AuthorFormPage>> {
        let author_id = parse_id(id).ok_or_else(|| not_found(id))?;
        match sanitize(form) {
            Sanitized::Invalid { form, errors } => {
                self.store
                    .find_author(author_id)
                    .await?
                    .ok_or_else(|| not_found(id))?;
                Ok(FormOutcome::Invalid(AuthorFormPage {
                    title: UPDATE_TITLE,
                    form,
                    errors,
                }))
            }
            Sanitized::Valid(input) => {
                let author = self.store.update_author(author_id, &input).await?;
                tracing::info!("Updated author {}", author.id);
                Ok(FormOutcome::Saved {
                    url: display::author_url(author.id),
                })
            }
        }
    }
}
