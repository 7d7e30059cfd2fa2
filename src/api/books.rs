//! Book pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::Markup;

use crate::{
    error::AppResult,
    models::BookForm,
    services::{DeleteOutcome, FormOutcome},
    views, AppState,
};

use super::redirect;

const BOOKS: &str = "/catalog/books";

pub async fn list_books(State(state): State<AppState>) -> AppResult<Markup> {
    let books = state.services.books.list().await?;
    Ok(views::books::list(&books))
}

pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Markup> {
    let page = state.services.books.detail(&id).await?;
    Ok(views::books::detail(&page))
}

pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Markup> {
    let page = state.services.books.create_form().await?;
    Ok(views::books::form(&page))
}

/// Repeated `genre` keys arrive as a list
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::books::form(&page).into_response()),
    }
}

pub async fn delete_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.delete_page(&id).await? {
        Some(page) => Ok(views::books::delete(&page).into_response()),
        None => Ok(redirect(BOOKS)),
    }
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.delete(&id).await? {
        DeleteOutcome::Deleted => Ok(redirect(BOOKS)),
        DeleteOutcome::Blocked(page) => Ok(views::books::delete(&page).into_response()),
    }
}

pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let page = state.services.books.edit_form(&id).await?;
    Ok(views::books::form(&page))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.update(&id, form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::books::form(&page).into_response()),
    }
}
