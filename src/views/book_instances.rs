use maud::{html, Markup, PreEscaped};

use super::{confirm_delete, error_list, layout, link, stored};
use crate::models::BookInstanceStatus;
use crate::services::book_instances::{BookInstanceEntry, BookInstanceFormPage};

fn status_class(status: BookInstanceStatus) -> &'static str {
    match status {
        BookInstanceStatus::Available => "text-success",
        BookInstanceStatus::Maintenance => "text-danger",
        BookInstanceStatus::Loaned | BookInstanceStatus::Reserved => "text-warning",
    }
}

/// Status, imprint and, unless the copy is on the shelf, the due date
pub fn copy_details(copy: &BookInstanceEntry) -> Markup {
    html! {
        p class=(status_class(copy.status)) { (copy.status.as_str()) }
        p { strong { "Imprint: " } (stored(&copy.imprint)) }
        @if copy.status != BookInstanceStatus::Available {
            p { strong { "Due back: " } (copy.due_back) }
        }
    }
}

pub fn list(copies: &[BookInstanceEntry]) -> Markup {
    layout(
        "Book Instance List",
        html! {
            h1 { "Book Instance List" }
            @if copies.is_empty() {
                p { "There are no book copies in this library." }
            } @else {
                ul {
                    @for copy in copies {
                        li {
                            a href=(copy.url) {
                                @if let Some(book) = &copy.book { (stored(&book.label)) }
                                " : " (stored(&copy.imprint))
                            }
                            " - "
                            span class=(status_class(copy.status)) { (copy.status.as_str()) }
                            @if copy.status != BookInstanceStatus::Available {
                                span { " (Due: " (copy.due_back) ")" }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn detail(copy: &BookInstanceEntry) -> Markup {
    let label = copy.book.as_ref().map(|b| b.label.as_str()).unwrap_or_default();
    layout(
        PreEscaped(format!("Copy: {}", label)),
        html! {
            h1 { "ID: " (copy.id) }
            p {
                strong { "Title: " }
                @if let Some(book) = &copy.book { (link(book)) }
            }
            (copy_details(copy))

            hr;
            p { a href={ (copy.url) "/delete" } { "Delete BookInstance" } }
            p { a href={ (copy.url) "/update" } { "Update BookInstance" } }
        },
    )
}

pub fn form(page: &BookInstanceFormPage) -> Markup {
    let form = &page.form;
    layout(
        page.title,
        html! {
            h1 { (page.title) }
            form method="POST" action="" {
                div.form-group {
                    label for="book" { "Book:" }
                    select.form-control id="book" name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in &page.books {
                            option value=(book.id) selected[book.selected] { (stored(&book.title)) }
                        }
                    }
                }
                div.form-group {
                    label for="imprint" { "Imprint:" }
                    input.form-control id="imprint" type="text" placeholder="Publisher and date information"
                        name="imprint" required value=(stored(&form.imprint));
                }
                div.form-group {
                    label for="due_back" { "Date when book available:" }
                    input.form-control id="due_back" type="date" name="due_back"
                        value=(stored(&form.due_back));
                }
                div.form-group {
                    label for="status" { "Status:" }
                    select.form-control id="status" name="status" required {
                        @for status in &page.statuses {
                            option value=(status.value) selected[status.selected] { (status.value) }
                        }
                    }
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(&page.errors))
        },
    )
}

pub fn delete(copy: &BookInstanceEntry) -> Markup {
    layout(
        "Delete BookInstance",
        html! {
            h1 { "Delete BookInstance" }
            p { strong { "ID: " } (copy.id) }
            p {
                strong { "Title: " }
                @if let Some(book) = &copy.book { (link(book)) }
            }
            (copy_details(copy))
            (confirm_delete("Do you really want to delete this BookInstance?", "bookinstanceid", &copy.id))
        },
    )
}
