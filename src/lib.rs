//! Local Library catalog server
//!
//! Server-rendered pages for browsing and maintaining a small library
//! catalog: authors, genres, books and the physical copies of each book.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use api::router;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
