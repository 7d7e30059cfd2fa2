use maud::{html, Markup, PreEscaped};

use super::{book_instances::copy_details, confirm_delete, error_list, layout, link, stored};
use crate::services::books::{BookDeletePage, BookDetailPage, BookFormPage, BookListEntry};

pub fn list(books: &[BookListEntry]) -> Markup {
    layout(
        "Book List",
        html! {
            h1 { "Book List" }
            @if books.is_empty() {
                p { "There are no books." }
            } @else {
                ul {
                    @for book in books {
                        li {
                            a href=(book.url) { (stored(&book.title)) }
                            @if let Some(author) = &book.author {
                                " (" (stored(&author.label)) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn detail(page: &BookDetailPage) -> Markup {
    layout(
        PreEscaped(format!("Title: {}", page.title)),
        html! {
            h1 { "Title: " (stored(&page.title)) }
            p {
                strong { "Author: " }
                @if let Some(author) = &page.author { (link(author)) }
            }
            p { strong { "Summary: " } (stored(&page.summary)) }
            p { strong { "ISBN: " } (stored(&page.isbn)) }
            p {
                strong { "Genre: " }
                @for (i, genre) in page.genres.iter().enumerate() {
                    @if i > 0 { ", " }
                    (link(genre))
                }
            }

            div style="margin-left:20px;margin-top:20px" {
                h4 { "Copies" }
                @if page.copies.is_empty() {
                    p { "There are no copies of this book in the library." }
                } @else {
                    @for copy in &page.copies {
                        hr;
                        (copy_details(copy))
                        p { strong { "Id: " } a href=(copy.url) { (copy.id) } }
                    }
                }
            }

            hr;
            p { a href={ "/catalog/bookinstance/create?book=" (page.id) } { "Add copy" } }
            p { a href={ (page.url) "/delete" } { "Delete Book" } }
            p { a href={ (page.url) "/update" } { "Update Book" } }
        },
    )
}

pub fn form(page: &BookFormPage) -> Markup {
    let form = &page.form;
    layout(
        page.title,
        html! {
            h1 { (page.title) }
            form method="POST" action="" {
                div.form-group {
                    label for="title" { "Title:" }
                    input.form-control id="title" type="text" placeholder="Name of book"
                        name="title" required value=(stored(&form.title));
                }
                div.form-group {
                    label for="author" { "Author:" }
                    select.form-control id="author" name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in &page.authors {
                            option value=(author.id) selected[author.selected] {
                                (stored(&author.name))
                            }
                        }
                    }
                }
                div.form-group {
                    label for="summary" { "Summary:" }
                    textarea.form-control id="summary" placeholder="Summary" name="summary" required {
                        (stored(&form.summary))
                    }
                }
                div.form-group {
                    label for="isbn" { "ISBN:" }
                    input.form-control id="isbn" type="text" placeholder="ISBN13" name="isbn"
                        required value=(stored(&form.isbn));
                }
                div.form-group {
                    label { "Genre:" }
                    div {
                        @for genre in &page.genres {
                            div style="display: inline; padding-right:10px;" {
                                input.checkbox-input type="checkbox" name="genre" id=(genre.id)
                                    value=(genre.id) checked[genre.checked];
                                label for=(genre.id) { " " (stored(&genre.name)) }
                            }
                        }
                    }
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(&page.errors))
        },
    )
}

pub fn delete(page: &BookDeletePage) -> Markup {
    layout(
        "Delete Book",
        html! {
            h1 { "Delete Book: " (stored(&page.book.title)) }
            p {
                strong { "Author: " }
                @if let Some(author) = &page.author { (link(author)) }
            }
            p { strong { "Summary: " } (stored(&page.book.summary)) }

            @if page.copies.is_empty() {
                (confirm_delete("Do you really want to delete this Book?", "bookid", &page.book.id))
            } @else {
                p { strong { "Delete the following copies before attempting to delete this book." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Copies" }
                    @for copy in &page.copies {
                        hr;
                        (copy_details(copy))
                        p { strong { "Id: " } a href=(copy.url) { (copy.id) } }
                    }
                }
            }
        },
    )
}
