//! Book instance (copy) pages

use std::fmt::Display;

use crate::{
    display,
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceForm, BookInstanceStatus, BookInstanceWithBook},
    repository::{Removal, SharedStore},
    validation::{sanitize, FormErrors, Sanitized},
};

use super::{parse_id, FormOutcome, Link};

const CREATE_TITLE: &str = "Create BookInstance";
const UPDATE_TITLE: &str = "Update BookInstance";

/// A copy with its display values. `book` is absent on pages that already
/// belong to the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceEntry {
    pub id: String,
    pub url: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: String,
    pub book: Option<Link>,
}

impl BookInstanceEntry {
    /// Entry without the book link
    pub fn copy(instance: &BookInstance) -> Self {
        Self {
            id: instance.id.to_string(),
            url: display::book_instance_url(instance.id),
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: display::long_date(instance.due_back),
            book: None,
        }
    }
}

impl From<&BookInstanceWithBook> for BookInstanceEntry {
    fn from(entry: &BookInstanceWithBook) -> Self {
        Self {
            book: entry.book.as_ref().map(book_link),
            ..Self::copy(&entry.instance)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOption {
    pub id: String,
    pub title: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOption {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct BookInstanceFormPage {
    pub title: &'static str,
    pub form: BookInstanceForm,
    pub books: Vec<BookOption>,
    pub statuses: Vec<StatusOption>,
    pub errors: FormErrors,
}

fn book_link(book: &Book) -> Link {
    Link {
        url: display::book_url(book.id),
        label: book.title.clone(),
    }
}

fn not_found(id: impl Display) -> AppError {
    AppError::NotFound(format!("Book copy {} not found", id))
}

#[derive(Clone)]
pub struct BookInstanceService {
    store: SharedStore,
}

impl BookInstanceService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All copies by due date, with their books
    pub async fn list(&self) -> AppResult<Vec<BookInstanceEntry>> {
        let instances = self.store.list_book_instances().await?;
        Ok(instances.iter().map(BookInstanceEntry::from).collect())
    }

    pub async fn detail(&self, id: &str) -> AppResult<BookInstanceEntry> {
        let instance = self.find(id).await?;
        Ok(BookInstanceEntry::from(&instance))
    }

    /// Empty form; `book` preselects a book when it names one
    pub async fn create_form(&self, book: Option<String>) -> AppResult<BookInstanceFormPage> {
        let form = BookInstanceForm {
            book: book.unwrap_or_default(),
            ..BookInstanceForm::default()
        };
        self.form_page(CREATE_TITLE, form, FormErrors::default())
            .await
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceFormPage>> {
        match sanitize(form) {
            Sanitized::Invalid { form, errors } => Ok(FormOutcome::Invalid(
                self.form_page(CREATE_TITLE, form, errors).await?,
            )),
            Sanitized::Valid(input) => {
                let instance = self.store.create_book_instance(&input).await?;
                tracing::info!("Created book copy {}", instance.id);
                Ok(FormOutcome::Saved {
                    url: display::book_instance_url(instance.id),
                })
            }
        }
    }

    /// `None` when there is nothing to delete
    pub async fn delete_page(&self, id: &str) -> AppResult<Option<BookInstanceEntry>> {
        let Some(instance_id) = parse_id(id) else {
            return Ok(None);
        };
        let instance = self.store.find_book_instance(instance_id).await?;
        Ok(instance.as_ref().map(BookInstanceEntry::from))
    }

    /// Copies have no dependents; removing a missing copy is a no-op
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let Some(instance_id) = parse_id(id) else {
            return Ok(());
        };
        match self.store.remove_book_instance(instance_id).await? {
            Removal::Removed => tracing::info!("Deleted book copy {}", instance_id),
            Removal::Missing | Removal::Referenced => {
                tracing::debug!("Book copy {} was not removed", instance_id)
            }
        }
        Ok(())
    }

    pub async fn edit_form(&self, id: &str) -> AppResult<BookInstanceFormPage> {
        let instance = self.find(id).await?;
        self.form_page(
            UPDATE_TITLE,
            BookInstanceForm::from(&instance.instance),
            FormErrors::default(),
        )
        .await
    }

    pub async fn update(
        &self,
        id: &str,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceFormPage>> {
        let instance_id = parse_id(id).ok_or_else(|| not_found(id))?;
        match sanitize(form) {
            Sanitized::Invalid { form, errors } => {
                let (copy, page) = tokio::try_join!(
                    self.store.find_book_instance(instance_id),
                    self.form_page(UPDATE_TITLE, form, errors)
                )?;
                copy.ok_or_else(|| not_found(id))?;
                Ok(FormOutcome::Invalid(page))
            }
            Sanitized::Valid(input) => {
                let instance = self.store.update_book_instance(instance_id, &input).await?;
                tracing::info!("Updated book copy {}", instance.id);
                Ok(FormOutcome::Saved {
                    url: display::book_instance_url(instance.id),
                })
            }
        }
    }

    async fn find(&self, id: &str) -> AppResult<BookInstanceWithBook> {
        let instance_id = parse_id(id).ok_or_else(|| not_found(id))?;
        self.store
            .find_book_instance(instance_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn form_page(
        &self,
        title: &'static str,
        form: BookInstanceForm,
        errors: FormErrors,
    ) -> AppResult<BookInstanceFormPage> {
        let books = self.store.list_books().await?;
        let books = books
            .iter()
            .map(|entry| {
                let id = entry.book.id.to_string();
                BookOption {
                    selected: id == form.book,
                    title: entry.book.title.clone(),
                    id,
                }
            })
            .collect();

        Ok(BookInstanceFormPage {
            title,
            statuses: status_options(&form.status),
            form,
            books,
            errors,
        })
    }
}

/// Every status, with the submitted one selected. Nothing submitted selects
/// the default status.
fn status_options(submitted: &str) -> Vec<StatusOption> {
    let chosen = submitted.parse().unwrap_or_default();
    BookInstanceStatus::ALL
        .into_iter()
        .map(|status: BookInstanceStatus| StatusOption {
            value: status.as_str(),
            selected: status == chosen,
        })
        .collect()
}
