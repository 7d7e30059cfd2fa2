//! Author and genre pages

use axum::http::StatusCode;

use crate::support::{app, create_author, create_book, create_genre, get, post};

#[tokio::test]
async fn test_create_then_fetch_author() {
    let app = app().await;

    let page = post(
        &app,
        "/catalog/author/create",
        "first_name=+Jane+&family_name=Austen&date_of_birth=1775-12-16&date_of_death=1817-07-18",
    )
    .await;
    assert_eq!(page.status, StatusCode::FOUND);
    let location = page.location.clone().unwrap();
    assert!(location.starts_with("/catalog/author/"));

    let detail = get(&app, &location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Author: Austen, Jane"));
    assert!(detail.body.contains("Dec 16th, 1775 - Jul 18th, 1817"));
    assert!(detail.body.contains("Lifespan: 42"));
    assert!(detail.body.contains("This author has no books."));
}

#[tokio::test]
async fn test_blank_name_is_rejected_and_nothing_stored() {
    let app = app().await;

    let page = post(&app, "/catalog/author/create", "first_name=+++&family_name=Austen").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First name must be specified."));
    assert!(page.body.contains("value=\"Austen\""));

    let list = get(&app, "/catalog/authors").await;
    assert!(list.body.contains("There are no authors."));
}

#[tokio::test]
async fn test_optional_dates() {
    let app = app().await;

    let rejected = post(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=not-a-date",
    )
    .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert!(rejected.body.contains("Date of birth is not a valid date."));

    let accepted = post(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=&date_of_death=",
    )
    .await;
    assert_eq!(accepted.status, StatusCode::FOUND);

    let detail = get(&app, accepted.location.as_deref().unwrap()).await;
    assert!(detail.body.contains("unknown - unknown"));
    assert!(detail.body.contains("Lifespan: unknown"));
}

#[tokio::test]
async fn test_rejected_date_is_shown_escaped() {
    let app = app().await;

    let page = post(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.body.contains("<script>alert(1)"));
    assert!(page
        .body
        .contains("value=\"&quot;&gt;&lt;script&gt;alert(1)&lt;&#x2F;script&gt;\""));
}

#[tokio::test]
async fn test_authors_listed_by_family_name() {
    let app = app().await;
    create_author(&app, "Mary", "Shelley").await;
    create_author(&app, "Jane", "Austen").await;
    create_author(&app, "Anne", "Bronte").await;

    let list = get(&app, "/catalog/authors").await;
    let austen = list.body.find("Austen, Jane").unwrap();
    let bronte = list.body.find("Bronte, Anne").unwrap();
    let shelley = list.body.find("Shelley, Mary").unwrap();
    assert!(austen < bronte && bronte < shelley);
}

#[tokio::test]
async fn test_author_delete_blocked_by_books() {
    let app = app().await;
    let author_id = create_author(&app, "Jane", "Austen").await;
    let book_id = create_book(&app, "Emma", &author_id, &[]).await;

    let delete_path = format!("/catalog/author/{}/delete", author_id);
    let blocked = post(&app, &delete_path, &format!("authorid={}", author_id)).await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert!(blocked.body.contains("Delete the following books"));
    assert!(blocked.body.contains("Emma"));

    let still_there = get(&app, &format!("/catalog/author/{}", author_id)).await;
    assert_eq!(still_there.status, StatusCode::OK);

    // Remove the book, then the author can go
    let removed = post(&app, &format!("/catalog/book/{}/delete", book_id), "").await;
    assert_eq!(removed.location.as_deref(), Some("/catalog/books"));

    let deleted = post(&app, &delete_path, &format!("authorid={}", author_id)).await;
    assert_eq!(deleted.status, StatusCode::FOUND);
    assert_eq!(deleted.location.as_deref(), Some("/catalog/authors"));

    let gone = get(&app, &format!("/catalog/author/{}", author_id)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_page_of_missing_author_redirects() {
    let app = app().await;
    let page = get(&app, "/catalog/author/6a1e4b7c-0000-4000-8000-000000000000/delete").await;
    assert_eq!(page.status, StatusCode::FOUND);
    assert_eq!(page.location.as_deref(), Some("/catalog/authors"));
}

#[tokio::test]
async fn test_update_author_keeps_identifier() {
    let app = app().await;
    let author_id = create_author(&app, "Jane", "Austin").await;

    let form = get(&app, &format!("/catalog/author/{}/update", author_id)).await;
    assert!(form.body.contains("Update Author"));
    assert!(form.body.contains("value=\"Austin\""));

    let updated = post(
        &app,
        &format!("/catalog/author/{}/update", author_id),
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16",
    )
    .await;
    assert_eq!(updated.location, Some(format!("/catalog/author/{}", author_id)));

    let detail = get(&app, &format!("/catalog/author/{}", author_id)).await;
    assert!(detail.body.contains("Austen, Jane"));

    let edit = get(&app, &format!("/catalog/author/{}/update", author_id)).await;
    assert!(edit.body.contains("value=\"1775-12-16\""));
}

#[tokio::test]
async fn test_update_of_missing_author_is_not_found() {
    let app = app().await;
    let page = post(
        &app,
        "/catalog/author/6a1e4b7c-0000-4000-8000-000000000000/update",
        "first_name=Jane&family_name=Austen",
    )
    .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rejected_update_of_missing_record_is_not_found() {
    let app = app().await;
    let missing = "6a1e4b7c-0000-4000-8000-000000000000";

    let author = post(
        &app,
        &format!("/catalog/author/{}/update", missing),
        "first_name=&family_name=Austen",
    )
    .await;
    assert_eq!(author.status, StatusCode::NOT_FOUND);

    let genre = post(&app, &format!("/catalog/genre/{}/update", missing), "name=ab").await;
    assert_eq!(genre.status, StatusCode::NOT_FOUND);

    create_genre(&app, "Fantasy").await;
    let renamed = post(&app, &format!("/catalog/genre/{}/update", missing), "name=Fantasy").await;
    assert_eq!(renamed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_long_genre_name_with_markup_characters() {
    let app = app().await;
    let name = format!("{}%26%26%26%26", "a".repeat(96));

    let created = post(&app, "/catalog/genre/create", &format!("name={}", name)).await;
    assert_eq!(created.status, StatusCode::FOUND);

    let detail = get(&app, created.location.as_deref().unwrap()).await;
    assert!(detail.body.contains(&format!("{}&amp;&amp;&amp;&amp;", "a".repeat(96))));
}

#[tokio::test]
async fn test_genres() {
    let app = app().await;

    let empty = get(&app, "/catalog/genres").await;
    assert!(empty.body.contains("There are no genres."));

    let short = post(&app, "/catalog/genre/create", "name=SF").await;
    assert_eq!(short.status, StatusCode::OK);
    assert!(short.body.contains("Genre name must contain between 3 and 100 characters."));

    let poetry = create_genre(&app, "Poetry").await;
    let fantasy = create_genre(&app, "Fantasy").await;

    // Same name leads to the existing genre
    let again = post(&app, "/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(again.location, Some(format!("/catalog/genre/{}", fantasy)));

    let list = get(&app, "/catalog/genres").await;
    assert!(list.body.find("Fantasy").unwrap() < list.body.find("Poetry").unwrap());

    let clash = post(&app, &format!("/catalog/genre/{}/update", poetry), "name=Fantasy").await;
    assert_eq!(clash.status, StatusCode::OK);
    assert!(clash.body.contains("Genre name is already in use."));

    let deleted = post(&app, &format!("/catalog/genre/{}/delete", poetry), "").await;
    assert_eq!(deleted.location.as_deref(), Some("/catalog/genres"));
    let gone = get(&app, &format!("/catalog/genre/{}", poetry)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_genre_delete_blocked_by_books() {
    let app = app().await;
    let author_id = create_author(&app, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&app, "Fantasy").await;
    create_book(&app, "Tehanu", &author_id, &[&fantasy]).await;

    let blocked = post(&app, &format!("/catalog/genre/{}/delete", fantasy), "").await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert!(blocked.body.contains("Delete the following books"));

    let detail = get(&app, &format!("/catalog/genre/{}", fantasy)).await;
    assert!(detail.body.contains("Tehanu"));
}
