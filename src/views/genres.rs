use maud::{html, Markup, PreEscaped};

use super::{confirm_delete, error_list, layout, link, stored};
use crate::services::books::BookEntry;
use crate::services::genres::{GenreDeletePage, GenreDetailPage, GenreFormPage};
use crate::services::Link;

pub fn list(genres: &[Link]) -> Markup {
    layout(
        "Genre List",
        html! {
            h1 { "Genre List" }
            @if genres.is_empty() {
                p { "There are no genres." }
            } @else {
                ul {
                    @for genre in genres {
                        li { (link(genre)) }
                    }
                }
            }
        },
    )
}

fn books_listed(books: &[BookEntry]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn detail(page: &GenreDetailPage) -> Markup {
    layout(
        PreEscaped(format!("Genre: {}", page.genre.label)),
        html! {
            h1 { "Genre: " (stored(&page.genre.label)) }

            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                @if page.books.is_empty() {
                    p { "This genre has no books." }
                } @else {
                    (books_listed(&page.books))
                }
            }

            hr;
            p { a href={ (page.genre.url) "/delete" } { "Delete genre" } }
            p { a href={ (page.genre.url) "/update" } { "Update genre" } }
        },
    )
}

pub fn form(page: &GenreFormPage) -> Markup {
    layout(
        page.title,
        html! {
            h1 { (page.title) }
            form method="POST" action="" {
                div.form-group {
                    label for="name" { "Genre:" }
                    input.form-control id="name" type="text" placeholder="Fantasy, Poetry etc."
                        name="name" required value=(stored(&page.form.name));
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(&page.errors))
        },
    )
}

pub fn delete(page: &GenreDeletePage) -> Markup {
    layout(
        "Delete Genre",
        html! {
            h1 { "Delete Genre: " (stored(&page.genre.label)) }

            @if page.books.is_empty() {
                (confirm_delete("Do you really want to delete this Genre?", "genreid", &page.id))
            } @else {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Books" }
                    (books_listed(&page.books))
                }
            }
        },
    )
}
