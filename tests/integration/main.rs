//! Router-level tests against the in-memory store

mod authors;
mod books;
mod site;
mod support;
