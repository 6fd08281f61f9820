//! Core data models for bibliography entries and CrossRef metadata.

mod author;
mod entry;
mod work;

pub use author::AuthorName;
pub use entry::{field, BibEntry};
pub use work::{RateLimit, WorkMetadata};
