//! Home, health and error pages

use axum::http::StatusCode;

use crate::support::{app, create_author, create_book, create_genre, get, post};

#[tokio::test]
async fn test_home_redirects_to_catalog() {
    let app = app().await;
    let page = get(&app, "/").await;
    assert_eq!(page.status, StatusCode::FOUND);
    assert_eq!(page.location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_catalog_counts() {
    let app = app().await;
    let author_id = create_author(&app, "Jane", "Austen").await;
    let genre_id = create_genre(&app, "Romance").await;
    let book_id = create_book(&app, "Emma", &author_id, &[&genre_id]).await;
    for status in ["Available", "Loaned"] {
        post(
            &app,
            "/catalog/bookinstance/create",
            &format!("book={}&imprint=Penguin&status={}", book_id, status),
        )
        .await;
    }

    let page = get(&app, "/catalog").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<li><strong>Books:</strong> 1</li>"));
    assert!(page.body.contains("<li><strong>Copies:</strong> 2</li>"));
    assert!(page.body.contains("<li><strong>Copies available:</strong> 1</li>"));
    assert!(page.body.contains("<li><strong>Authors:</strong> 1</li>"));
    assert!(page.body.contains("<li><strong>Genres:</strong> 1</li>"));
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let page = get(&app, "/health").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_malformed_identifier_is_not_found() {
    let app = app().await;
    for path in [
        "/catalog/author/not-an-id",
        "/catalog/book/42",
        "/catalog/genre/fantasy",
        "/catalog/bookinstance/x/update",
    ] {
        let page = get(&app, path).await;
        assert_eq!(page.status, StatusCode::NOT_FOUND, "{}", path);
        assert!(page.body.contains("<h1>Not Found</h1>"));
    }
}

#[tokio::test]
async fn test_unknown_path_renders_error_page() {
    let app = app().await;
    let page = get(&app, "/catalog/nowhere").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("<h2>404</h2>"));
    // Development mode shows the detail
    assert!(page.body.contains("<pre>Not found: No page at /catalog/nowhere</pre>"));
}
