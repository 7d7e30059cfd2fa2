//! Book and book instance pages

use axum::http::StatusCode;
use chrono::Utc;

use crate::support::{app, create_author, create_book, create_genre, get, post};

#[tokio::test]
async fn test_book_genres_none_one_many() {
    let app = app().await;
    let author_id = create_author(&app, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&app, "Fantasy").await;
    let sf = create_genre(&app, "Science+Fiction").await;

    let none = create_book(&app, "Always+Coming+Home", &author_id, &[]).await;
    let one = create_book(&app, "Tehanu", &author_id, &[&fantasy]).await;
    let many = create_book(&app, "The+Lathe+of+Heaven", &author_id, &[&fantasy, &sf]).await;

    let page = get(&app, &format!("/catalog/book/{}", none)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<p><strong>Genre: </strong></p>"));

    let page = get(&app, &format!("/catalog/book/{}", one)).await;
    assert!(page.body.contains(&format!("<a href=\"/catalog/genre/{}\">Fantasy</a>", fantasy)));

    let page = get(&app, &format!("/catalog/book/{}", many)).await;
    assert!(page.body.contains("Fantasy</a>, <a"));
    assert!(page.body.contains("Science Fiction"));
    assert!(page.body.contains("LeGuin, Ursula"));
}

#[tokio::test]
async fn test_book_requires_fields() {
    let app = app().await;
    let author_id = create_author(&app, "Jane", "Austen").await;

    let page = post(
        &app,
        "/catalog/book/create",
        &format!("title=Emma&author={}&summary=&isbn=", author_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Summary can't be empty."));
    assert!(page.body.contains("ISBN"));
    assert!(page.body.contains(&format!("<option value=\"{}\" selected>", author_id)));

    let list = get(&app, "/catalog/books").await;
    assert!(list.body.contains("There are no books."));
}

#[tokio::test]
async fn test_book_text_is_escaped_once() {
    let app = app().await;
    let author_id = create_author(&app, "Jane", "Austen").await;
    create_book(&app, "Pride+%26+Prejudice", &author_id, &[]).await;

    let list = get(&app, "/catalog/books").await;
    assert!(list.body.contains("Pride &amp; Prejudice"));
    assert!(!list.body.contains("&amp;amp;"));
    assert!(list.body.contains("(Austen, Jane)"));
}

#[tokio::test]
async fn test_books_listed_by_title() {
    let app = app().await;
    let author_id = create_author(&app, "Jane", "Austen").await;
    create_book(&app, "Persuasion", &author_id, &[]).await;
    create_book(&app, "Emma", &author_id, &[]).await;

    let list = get(&app, "/catalog/books").await;
    assert!(list.body.find("Emma").unwrap() < list.body.find("Persuasion").unwrap());
}

#[tokio::test]
async fn test_book_update_form_checks_stored_genres() {
    let app = app().await;
    let author_id = create_author(&app, "Jane", "Austen").await;
    let romance = create_genre(&app, "Romance").await;
    let satire = create_genre(&app, "Satire").await;
    let book_id = create_book(&app, "Emma", &author_id, &[&satire]).await;

    let form = get(&app, &format!("/catalog/book/{}/update", book_id)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(&format!("value=\"{}\" checked>", satire)));
    assert!(form.body.contains(&format!("value=\"{}\">", romance)));

    let updated = post(
        &app,
        &format!("/catalog/book/{}/update", book_id),
        &format!(
            "title=Emma&author={}&summary=Matchmaking&isbn=9780141439587&genre={}",
            author_id, romance
        ),
    )
    .await;
    assert_eq!(updated.location, Some(format!("/catalog/book/{}", book_id)));

    let detail = get(&app, &format!("/catalog/book/{}", book_id)).await;
    assert!(detail.body.contains("Romance"));
    assert!(!detail.body.contains("Satire"));
}

#[tokio::test]
async fn test_copy_without_status_is_in_maintenance() {
    let app = app().await;
    let author_id = create_author(&app, "George", "Eliot").await;
    let book_id = create_book(&app, "Middlemarch", &author_id, &[]).await;

    let page = post(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Penguin+Classics", book_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::FOUND);
    let location = page.location.unwrap();
    assert!(location.starts_with("/catalog/bookinstance/"));

    let detail = get(&app, &location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("<p class=\"text-danger\">Maintenance</p>"));
    assert!(detail.body.contains("Copy: Middlemarch"));

    let today = Utc::now().date_naive().format("%Y").to_string();
    assert!(detail.body.contains(&today));
}

#[tokio::test]
async fn test_copies_block_book_delete() {
    let app = app().await;
    let author_id = create_author(&app, "George", "Eliot").await;
    let book_id = create_book(&app, "Middlemarch", &author_id, &[]).await;
    let copy = post(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Penguin&status=Available&due_back=2031-01-02", book_id),
    )
    .await;
    let copy_path = copy.location.unwrap();

    let detail = get(&app, &format!("/catalog/book/{}", book_id)).await;
    assert!(detail.body.contains("Penguin"));
    assert!(detail.body.contains("text-success"));

    let blocked = post(&app, &format!("/catalog/book/{}/delete", book_id), "").await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert!(blocked.body.contains("Delete the following copies"));

    let removed = post(&app, &format!("{}/delete", copy_path), "").await;
    assert_eq!(removed.location.as_deref(), Some("/catalog/bookinstances"));

    let deleted = post(&app, &format!("/catalog/book/{}/delete", book_id), "").await;
    assert_eq!(deleted.location.as_deref(), Some("/catalog/books"));
    assert_eq!(
        get(&app, &format!("/catalog/book/{}", book_id)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_copy_with_unknown_status_is_rejected() {
    let app = app().await;
    let author_id = create_author(&app, "George", "Eliot").await;
    let book_id = create_book(&app, "Middlemarch", &author_id, &[]).await;

    let page = post(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Penguin&status=Lost", book_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Status must be one of"));

    let list = get(&app, "/catalog/bookinstances").await;
    assert!(list.body.contains("There are no book copies in this library."));
}

#[tokio::test]
async fn test_rejected_due_date_is_shown_escaped() {
    let app = app().await;
    let author_id = create_author(&app, "George", "Eliot").await;
    let book_id = create_book(&app, "Middlemarch", &author_id, &[]).await;

    let page = post(
        &app,
        "/catalog/bookinstance/create",
        &format!(
            "book={}&imprint=Penguin&due_back=%22%3E%3Cimg+src%3Dx+onerror%3Dalert(1)%3E",
            book_id
        ),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.body.contains("<img src=x"));
    assert!(page
        .body
        .contains("value=\"&quot;&gt;&lt;img src=x onerror=alert(1)&gt;\""));
}

#[tokio::test]
async fn test_rejected_update_of_missing_book_or_copy_is_not_found() {
    let app = app().await;
    let missing = "6a1e4b7c-0000-4000-8000-000000000000";

    let book = post(&app, &format!("/catalog/book/{}/update", missing), "title=Emma").await;
    assert_eq!(book.status, StatusCode::NOT_FOUND);

    let copy = post(
        &app,
        &format!("/catalog/bookinstance/{}/update", missing),
        "imprint=Penguin",
    )
    .await;
    assert_eq!(copy.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_copy_update_and_list() {
    let app = app().await;
    let author_id = create_author(&app, "George", "Eliot").await;
    let book_id = create_book(&app, "Middlemarch", &author_id, &[]).await;
    let created = post(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Penguin&status=Loaned&due_back=2031-03-04", book_id),
    )
    .await;
    let copy_path = created.location.unwrap();

    let form = get(&app, &format!("{}/update", copy_path)).await;
    assert!(form.body.contains("<option value=\"Loaned\" selected>"));
    assert!(form.body.contains("value=\"2031-03-04\""));

    let updated = post(
        &app,
        &format!("{}/update", copy_path),
        &format!("book={}&imprint=Penguin&status=Reserved&due_back=2031-04-05", book_id),
    )
    .await;
    assert_eq!(updated.location.as_deref(), Some(copy_path.as_str()));

    let list = get(&app, "/catalog/bookinstances").await;
    assert!(list.body.contains("Middlemarch : Penguin"));
    assert!(list.body.contains("Reserved"));
    assert!(list.body.contains("(Due: Apr 5th, 2031)"));
}
