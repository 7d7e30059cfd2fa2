//! Book pages

use std::fmt::Display;

use crate::{
    display,
    error::{AppError, AppResult},
    models::{Author, Book, BookForm, BookInstance, BookWithAuthor, Genre},
    repository::{Removal, SharedStore},
    validation::{sanitize, FormErrors, Sanitized},
};

use super::{book_instances::BookInstanceEntry, parse_id, DeleteOutcome, FormOutcome, Link};

const CREATE_TITLE: &str = "Create Book";
const UPDATE_TITLE: &str = "Update Book";

/// Short book listing used on author and genre pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
}

impl From<&Book> for BookEntry {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            url: display::book_url(book.id),
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListEntry {
    pub url: String,
    pub title: String,
    pub author: Option<Link>,
}

impl From<&BookWithAuthor> for BookListEntry {
    fn from(entry: &BookWithAuthor) -> Self {
        Self {
            url: display::book_url(entry.book.id),
            title: entry.book.title.clone(),
            author: entry.author.as_ref().map(author_link),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookDetailPage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub author: Option<Link>,
    pub summary: String,
    pub isbn: String,
    pub genres: Vec<Link>,
    pub copies: Vec<BookInstanceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreOption {
    pub id: String,
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct BookFormPage {
    pub title: &'static str,
    pub form: BookForm,
    pub authors: Vec<AuthorOption>,
    pub genres: Vec<GenreOption>,
    pub errors: FormErrors,
}

/// Confirmation page; deletion is refused while `copies` is not empty
#[derive(Debug, Clone)]
pub struct BookDeletePage {
    pub book: BookEntry,
    pub author: Option<Link>,
    pub copies: Vec<BookInstanceEntry>,
}

impl BookDeletePage {
    fn new(book: &Book, author: Option<&Author>, copies: &[BookInstance]) -> Self {
        Self {
            book: book.into(),
            author: author.map(author_link),
            copies: copies.iter().map(BookInstanceEntry::copy).collect(),
        }
    }
}

pub(crate) fn author_link(author: &Author) -> Link {
    Link {
        url: display::author_url(author.id),
        label: display::author_name(&author.first_name, &author.family_name),
    }
}

pub(crate) fn genre_link(genre: &Genre) -> Link {
    Link {
        url: display::genre_url(genre.id),
        label: genre.name.clone(),
    }
}

fn not_found(id: impl Display) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[derive(Clone)]
pub struct BookService {
    store: SharedStore,
}

impl BookService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All books by title, with their authors
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let books = self.store.list_books().await?;
        Ok(books.iter().map(BookListEntry::from).collect())
    }

    /// Book with author, genres and copies
    pub async fn detail(&self, id: &str) -> AppResult<BookDetailPage> {
        let book_id = parse_id(id).ok_or_else(|| not_found(id))?;
        let (detail, copies) = tokio::try_join!(
            self.store.find_book(book_id),
            self.store.instances_of_book(book_id),
        )?;
        let detail = detail.ok_or_else(|| not_found(id))?;

        Ok(BookDetailPage {
            id: detail.book.id.to_string(),
            url: display::book_url(detail.book.id),
            title: detail.book.title,
            author: detail.author.as_ref().map(author_link),
            summary: detail.book.summary,
            isbn: detail.book.isbn,
            genres: detail.genres.iter().map(genre_link).collect(),
            copies: copies.iter().map(BookInstanceEntry::copy).collect(),
        })
    }

    pub async fn create_form(&self) -> AppResult<BookFormPage> {
        self.form_page(CREATE_TITLE, BookForm::default(), FormErrors::default())
            .await
    }

    pub async fn create(&self, form: BookForm) -> AppResult<FormOutcome<BookFormPage>> {
        match sanitize(form) {
            Sanitized::Invalid { form, errors } => Ok(FormOutcome::Invalid(
                self.form_page(CREATE_TITLE, form, errors).await?,
            )),
            Sanitized::Valid(input) => {
                let book = self.store.create_book(&input).await?;
                tracing::info!("Created book {}", book.id);
                Ok(FormOutcome::Saved {
                    url: display::book_url(book.id),
                })
            }
        }
    }

    /// `None` when there is nothing to delete
    pub async fn delete_page(&self, id: &str) -> AppResult<Option<BookDeletePage>> {
        let Some(book_id) = parse_id(id) else {
            return Ok(None);
        };
        let (detail, copies) = tokio::try_join!(
            self.store.find_book(book_id),
            self.store.instances_of_book(book_id),
        )?;
        Ok(detail.map(|d| BookDeletePage::new(&d.book, d.author.as_ref(), &copies)))
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<BookDeletePage>> {
        let Some(book_id) = parse_id(id) else {
            return Ok(DeleteOutcome::Deleted);
        };
        let (detail, copies) = tokio::try_join!(
            self.store.find_book(book_id),
            self.store.instances_of_book(book_id),
        )?;
        let Some(detail) = detail else {
            return Ok(DeleteOutcome::Deleted);
        };
        if !copies.is_empty() {
            return Ok(DeleteOutcome::Blocked(BookDeletePage::new(
                &detail.book,
                detail.author.as_ref(),
                &copies,
            )));
        }

        match self.store.remove_book(book_id).await? {
            Removal::Removed | Removal::Missing => {
                tracing::info!("Deleted book {}", book_id);
                Ok(DeleteOutcome::Deleted)
            }
            Removal::Referenced => {
                tracing::warn!("Book {} gained copies before it could be deleted", book_id);
                let copies = self.store.instances_of_book(book_id).await?;
                Ok(DeleteOutcome::Blocked(BookDeletePage::new(
                    &detail.book,
                    detail.author.as_ref(),
                    &copies,
                )))
            }
        }
    }

    /// Form prefilled from the stored book, its genres checked
    pub async fn edit_form(&self, id: &str) -> AppResult<BookFormPage> {
        let book_id = parse_id(id).ok_or_else(|| not_found(id))?;
        let (detail, authors, genres) = tokio::try_join!(
            self.store.find_book(book_id),
            self.store.list_authors(),
            self.store.list_genres(),
        )?;
        let detail = detail.ok_or_else(|| not_found(id))?;

        Ok(build_form_page(
            UPDATE_TITLE,
            BookForm::from(&detail.book),
            &authors,
            &genres,
            FormErrors::default(),
        ))
    }

    pub async fn update(&self, id: &str, form: BookForm) -> AppResult<FormOutcome<BookFormPage>> {
        let book_id = parse_id(id).ok_or_else(|| not_found(id))?;
        match sanitize(form) {
            Sanitized::Invalid { form, errors } => {
                let (book, page) = tokio::try_join!(
                    self.store.find_book(book_id),
                    self.form_page(UPDATE_TITLE, form, errors)
                )?;
                book.ok_or_else(|| not_found(id))?;
                Ok(FormOutcome::Invalid(page))
            }
            Sanitized::Valid(input) => {
                let book = self.store.update_book(book_id, &input).await?;
                tracing::info!("Updated book {}", book.id);
                Ok(FormOutcome::Saved {
                    url: display::book_url(book.id),
                })
            }
        }
    }

    async fn form_page(
        &self,
        title: &'static str,
        form: BookForm,
        errors: FormErrors,
    ) -> AppResult<BookFormPage> {
        let (authors, genres) =
            tokio::try_join!(self.store.list_authors(), self.store.list_genres())?;
        Ok(build_form_page(title, form, &authors, &genres, errors))
    }
}

/// Mark the submitted author as selected and the submitted genres as checked
fn build_form_page(
    title: &'static str,
    form: BookForm,
    authors: &[Author],
    genres: &[Genre],
    errors: FormErrors,
) -> BookFormPage {
    let authors = authors
        .iter()
        .map(|author| {
            let id = author.id.to_string();
            AuthorOption {
                selected: id == form.author,
                name: display::author_name(&author.first_name, &author.family_name),
                id,
            }
        })
        .collect();
    let genres = genres
        .iter()
        .map(|genre| {
            let id = genre.id.to_string();
            GenreOption {
                checked: form.genre.contains(&id),
                name: genre.name.clone(),
                id,
            }
        })
        .collect();

    BookFormPage {
        title,
        form,
        authors,
        genres,
        errors,
    }
}
