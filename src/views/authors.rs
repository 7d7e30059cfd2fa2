use maud::{html, Markup, PreEscaped};

use super::{confirm_delete, error_list, layout, stored};
use crate::services::authors::{AuthorDeletePage, AuthorDetailPage, AuthorFormPage, AuthorSummary};
use crate::services::books::BookEntry;

pub fn list(authors: &[AuthorSummary]) -> Markup {
    layout(
        "Author List",
        html! {
            h1 { "Author List" }
            @if authors.is_empty() {
                p { "There are no authors." }
            } @else {
                ul {
                    @for author in authors {
                        li {
                            a href=(author.url) { (stored(&author.name)) }
                            " (" (author.born) " - " (author.died) ")"
                        }
                    }
                }
            }
        },
    )
}

fn books_written(books: &[BookEntry]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn detail(page: &AuthorDetailPage) -> Markup {
    let author = &page.author;
    layout(
        PreEscaped(format!("Author: {}", author.name)),
        html! {
            h1 { "Author: " (stored(&author.name)) }
            p { (author.born) " - " (author.died) }
            p { "Lifespan: " (author.lifespan) }

            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                @if page.books.is_empty() {
                    p { "This author has no books." }
                } @else {
                    (books_written(&page.books))
                }
            }

            hr;
            p { a href={ (author.url) "/delete" } { "Delete author" } }
            p { a href={ (author.url) "/update" } { "Update author" } }
        },
    )
}

pub fn form(page: &AuthorFormPage) -> Markup {
    let form = &page.form;
    layout(
        page.title,
        html! {
            h1 { (page.title) }
            form method="POST" action="" {
                div.form-group {
                    label for="first_name" { "First Name:" }
                    input.form-control id="first_name" type="text" placeholder="First name"
                        name="first_name" required value=(stored(&form.first_name));
                    label for="family_name" { "Family Name:" }
                    input.form-control id="family_name" type="text" placeholder="Family name"
                        name="family_name" required value=(stored(&form.family_name));
                }
                div.form-group {
                    label for="date_of_birth" { "Date of birth:" }
                    input.form-control id="date_of_birth" type="date" name="date_of_birth"
                        value=(stored(&form.date_of_birth));
                }
                div.form-group {
                    label for="date_of_death" { "Date of death:" }
                    input.form-control id="date_of_death" type="date" name="date_of_death"
                        value=(stored(&form.date_of_death));
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(&page.errors))
        },
    )
}

pub fn delete(page: &AuthorDeletePage) -> Markup {
    let author = &page.author;
    layout(
        "Delete Author",
        html! {
            h1 { "Delete Author: " (stored(&author.name)) }
            p { (author.born) " - " (author.died) }

            @if page.books.is_empty() {
                (confirm_delete("Do you really want to delete this Author?", "authorid", &author.id))
            } @else {
                p { strong { "Delete the following books before attempting to delete this author." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Books" }
                    (books_written(&page.books))
                }
            }
        },
    )
}
