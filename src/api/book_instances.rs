//! Book instance (copy) pages

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::BookInstanceForm,
    services::FormOutcome,
    views, AppState,
};

use super::redirect;

const BOOK_INSTANCES: &str = "/catalog/bookinstances";

/// `?book=<id>` preselects the book, as linked from a book's page
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuery {
    pub book: Option<String>,
}

pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Markup> {
    let copies = state.services.book_instances.list().await?;
    Ok(views::book_instances::list(&copies))
}

pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let copy = state.services.book_instances.detail(&id).await?;
    Ok(views::book_instances::detail(&copy))
}

pub async fn create_book_instance_form(
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
) -> AppResult<Markup> {
    let page = state.services.book_instances.create_form(query.book).await?;
    Ok(views::book_instances::form(&page))
}

pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::book_instances::form(&page).into_response()),
    }
}

pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.book_instances.delete_page(&id).await? {
        Some(copy) => Ok(views::book_instances::delete(&copy).into_response()),
        None => Ok(redirect(BOOK_INSTANCES)),
    }
}

pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    state.services.book_instances.delete(&id).await?;
    Ok(redirect(BOOK_INSTANCES))
}

pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let page = state.services.book_instances.edit_form(&id).await?;
    Ok(views::book_instances::form(&page))
}

pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.update(&id, form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::book_instances::form(&page).into_response()),
    }
}
