//! HTML pages rendered with maud
//!
//! Text written through the forms is escaped before it is stored, so stored
//! values go through [`stored`] instead of maud's own escaping. Everything
//! else (generated dates, counts, error messages) is escaped by maud.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod errors;
pub mod genres;

use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

use crate::services::Link;
use crate::validation::FormErrors;

/// Text that was escaped when it was written
pub fn stored(value: &str) -> PreEscaped<&str> {
    PreEscaped(value)
}

/// Page shell with the navigation sidebar
pub fn layout(title: impl Render, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/static/stylesheets/style.css";
            }
            body {
                div.container {
                    nav.sidebar {
                        ul.sidebar-nav {
                            li { a href="/catalog" { "Home" } }
                            li { a href="/catalog/books" { "All books" } }
                            li { a href="/catalog/authors" { "All authors" } }
                            li { a href="/catalog/genres" { "All genres" } }
                            li { a href="/catalog/bookinstances" { "All book-instances" } }
                            li { hr; }
                            li { a href="/catalog/author/create" { "Create new author" } }
                            li { a href="/catalog/genre/create" { "Create new genre" } }
                            li { a href="/catalog/book/create" { "Create new book" } }
                            li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                        }
                    }
                    main.content {
                        (content)
                    }
                }
            }
        }
    }
}

/// Anchor for a stored label
pub fn link(link: &Link) -> Markup {
    html! { a href=(link.url) { (stored(&link.label)) } }
}

/// Validation messages above a re-rendered form
pub fn error_list(errors: &FormErrors) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors.iter() {
                    li { (error.message) }
                }
            }
        }
    }
}

/// Delete confirmation: a single button posting back to the same path
pub fn confirm_delete(prompt: &str, field: &str, id: &str) -> Markup {
    html! {
        p { (prompt) }
        form method="POST" action="" {
            div.form-group {
                input type="hidden" name=(field) value=(id);
            }
            button.btn.btn-primary type="submit" { "Delete" }
        }
    }
}
