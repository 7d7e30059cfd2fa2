//! Book model and form

use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{author::Author, genre::Genre};
use crate::validation::{
    escape_in_place, parse_identifier, trim_in_place, validate_identifier, validate_identifiers,
    FormErrors, FormInput,
};

/// Stored book. `author_id` and `genre_ids` are unresolved references.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

/// Book with its author resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with every reference resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl BookInput {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            title: self.title,
            author_id: self.author_id,
            summary: self.summary,
            isbn: self.isbn,
            genre_ids: self.genre_ids,
        }
    }
}

/// Submitted book form. Repeated `genre` keys collect into `genre`; a missing
/// key gives an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "can't be empty."),
        custom(function = "validate_identifier")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be empty."))]
    pub isbn: String,
    #[serde(default)]
    #[validate(custom(function = "validate_identifiers"))]
    pub genre: Vec<String>,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(Uuid::to_string).collect(),
        }
    }
}

impl FormInput for BookForm {
    type Output = BookInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("title", "Title"),
        ("author", "Author"),
        ("summary", "Summary"),
        ("isbn", "ISBN"),
        ("genre", "Genre"),
    ];

    fn trim(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.author);
        trim_in_place(&mut self.summary);
        trim_in_place(&mut self.isbn);
        self.genre.iter_mut().for_each(trim_in_place);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.title);
        escape_in_place(&mut self.author);
        escape_in_place(&mut self.summary);
        escape_in_place(&mut self.isbn);
        self.genre.iter_mut().for_each(escape_in_place);
    }

    fn coerce(&self) -> Result<BookInput, FormErrors> {
        let mut errors = FormErrors::default();
        let author_id = parse_identifier(&self.author, "author", &mut errors);
        let genre_ids: Vec<Uuid> = self
            .genre
            .iter()
            .filter_map(|g| parse_identifier(g, "genre", &mut errors))
            .collect();

        match author_id {
            Some(author_id) if errors.is_empty() => Ok(BookInput {
                title: self.title.clone(),
                author_id,
                summary: self.summary.clone(),
                isbn: self.isbn.clone(),
                genre_ids,
            }),
            _ => Err(errors),
        }
    }
}
