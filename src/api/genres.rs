//! Genre pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::Markup;

use crate::{
    error::AppResult,
    models::GenreForm,
    services::{DeleteOutcome, FormOutcome},
    views, AppState,
};

use super::redirect;

const GENRES: &str = "/catalog/genres";

pub async fn list_genres(State(state): State<AppState>) -> AppResult<Markup> {
    let genres = state.services.genres.list().await?;
    Ok(views::genres::list(&genres))
}

pub async fn get_genre(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Markup> {
    let page = state.services.genres.detail(&id).await?;
    Ok(views::genres::detail(&page))
}

pub async fn create_genre_form(State(state): State<AppState>) -> Markup {
    views::genres::form(&state.services.genres.create_form())
}

pub async fn create_genre(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::genres::form(&page).into_response()),
    }
}

pub async fn delete_genre_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.delete_page(&id).await? {
        Some(page) => Ok(views::genres::delete(&page).into_response()),
        None => Ok(redirect(GENRES)),
    }
}

pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.genres.delete(&id).await? {
        DeleteOutcome::Deleted => Ok(redirect(GENRES)),
        DeleteOutcome::Blocked(page) => Ok(views::genres::delete(&page).into_response()),
    }
}

pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let page = state.services.genres.edit_form(&id).await?;
    Ok(views::genres::form(&page))
}

pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(&id, form).await? {
        FormOutcome::Saved { url } => Ok(redirect(&url)),
        FormOutcome::Invalid(page) => Ok(views::genres::form(&page).into_response()),
    }
}
