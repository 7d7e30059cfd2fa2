//! Author pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::Markup;

use crate::{
    error::AppResult,
    models::AuthorForm,
    services::{DeleteOutcome, FormOutcome},
    views, AppState,
};

use super::redirect;

const AUTHORS: &str = "/catalog/authors";

pub async fn list_authors(State(state): State<AppState>) -> AppResult<Markup> {
    let authors = state.services.authors.list().await?;
    Ok(views::authors::list(&authors))
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let page = state.services.authors.detail(&id).await?;
    Ok(views::authors::detail(&page))
}

pub async fn create_author_form(State(state): State<AppState>) -> Markup {
    views::authors::form(&state.services.authors.create_form())
}

pub async fn create_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::authors::form(&page).into_response()),
    }
}

pub async fn delete_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.delete_page(&id).await? {
        Some(page) => Ok(views::authors::delete(&page).into_response()),
        None => Ok(redirect(AUTHORS)),
    }
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.authors.delete(&id).await? {
        DeleteOutcome::Deleted => Ok(redirect(AUTHORS)),
        DeleteOutcome::Blocked(page) => Ok(views::authors::delete(&page).into_response()),
    }
}

pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let page = state.services.authors.edit_form(&id).await?;
    Ok(views::authors::form(&page))
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(&id, form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::authors::form(&page).into_response()),
    }
}
