use maud::{html, Markup};

use super::layout;
use crate::services::catalog::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Markup {
    layout(
        "Local Library Home",
        html! {
            h1 { "Local Library Home" }
            p {
                "Welcome to " em { "LocalLibrary" } ", a very basic website for browsing and "
                "maintaining a small library catalog."
            }

            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books:" } " " (counts.books) }
                li { strong { "Copies:" } " " (counts.book_instances) }
                li { strong { "Copies available:" } " " (counts.book_instances_available) }
                li { strong { "Authors:" } " " (counts.authors) }
                li { strong { "Genres:" } " " (counts.genres) }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_counts() {
        let page = index(&CatalogCounts {
            books: 7,
            book_instances: 11,
            book_instances_available: 4,
            authors: 5,
            genres: 3,
        })
        .into_string();
        assert!(page.contains("<li><strong>Books:</strong> 7</li>"));
        assert!(page.contains("<li><strong>Copies available:</strong> 4</li>"));
    }
}
