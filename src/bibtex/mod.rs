//! Reading the source BibTeX export.
//!
//! - [`split_entries`]: cut the document into `@type{...}` fragments
//! - [`FieldTokenizer`] / [`extract_fields`]: pull `name = {value}` pairs out of a fragment body
//!
//! This is deliberately narrow: string macros, `@string`/`@preamble`
//! handling and quoted values are not supported.

mod splitter;
mod tokenizer;

pub use splitter::{split_entries, RawEntry};
pub use tokenizer::{extract_fields, Field, FieldTokenizer};
