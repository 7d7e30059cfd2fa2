//! Test application and request helpers

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use locallibrary_server::{config::AppConfig, repository, router, services::Services, AppState};

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Page {
    /// Identifier at the end of the redirect target
    pub fn created_id(&self) -> String {
        let location = self.location.as_deref().expect("no redirect");
        location.rsplit('/').next().unwrap_or_default().to_string()
    }
}

/// Fresh application over an empty in-memory store
pub async fn app() -> Router {
    let mut config = AppConfig::default();
    config.database.url = "memory:".to_string();

    let store = repository::connect(&config.database)
        .await
        .expect("memory store");
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(store)),
    };
    router(state)
}

async fn send(app: &Router, request: Request<Body>) -> Page {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Page {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Page {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Submit an urlencoded form body
pub async fn post(app: &Router, uri: &str, form: &str) -> Page {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn create_author(app: &Router, first_name: &str, family_name: &str) -> String {
    let form = format!("first_name={}&family_name={}", first_name, family_name);
    let page = post(app, "/catalog/author/create", &form).await;
    assert_eq!(page.status, StatusCode::FOUND, "{}", page.body);
    page.created_id()
}

pub async fn create_genre(app: &Router, name: &str) -> String {
    let page = post(app, "/catalog/genre/create", &format!("name={}", name)).await;
    assert_eq!(page.status, StatusCode::FOUND, "{}", page.body);
    page.created_id()
}

pub async fn create_book(app: &Router, title: &str, author_id: &str, genre_ids: &[&str]) -> String {
    let mut form = format!(
        "title={}&author={}&summary=A+summary&isbn=9780000000000",
        title, author_id
    );
    for id in genre_ids {
        form.push_str(&format!("&genre={}", id));
    }
    let page = post(app, "/catalog/book/create", &form).await;
    assert_eq!(page.status, StatusCode::FOUND, "{}", page.body);
    page.created_id()
}
