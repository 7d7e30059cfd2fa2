//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorInput};
pub use book::{Book, BookDetail, BookForm, BookInput, BookWithAuthor};
pub use book_instance::{
    BookInstance, BookInstanceForm, BookInstanceInput, BookInstanceStatus, BookInstanceWithBook,
};
pub use genre::{Genre, GenreForm, GenreInput};
