//! Author name parsing for the "Surname, Given M." layout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A personal name split into surname, given name and middle initial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorName {
    /// Surname (the last whitespace-separated token)
    pub last: String,

    /// Given name
    pub first: String,

    /// Initial taken from the second token of names with three or more tokens
    pub middle_initial: Option<char>,
}

impl AuthorName {
    /// Parse a "Given [Middle ...] Surname" name.
    ///
    /// The last token is the surname. With more than two tokens the second
    /// one becomes the middle initial and any tokens between it and the
    /// surname stay part of the given name. Returns `None` for blank input.
    pub fn parse(name: &str) -> Option<Self> {
        let tokens: Vec<&str> = name.split_whitespace().collect();
        let (last, given) = tokens.split_last()?;

        let (first, middle_initial) = match given {
            [] => (String::new(), None),
            [first] => (first.to_string(), None),
            [first, middle, rest @ ..] => {
                let first = std::iter::once(*first)
                    .chain(rest.iter().copied())
                    .collect::<Vec<_>>()
                    .join(" ");
                (first, middle.chars().next())
            }
        };

        Some(Self {
            last: last.to_string(),
            first,
            middle_initial,
        })
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last, self.first)?;
        if let Some(initial) = self.middle_initial {
            write!(f, " {}.", initial)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_token_name() {
        let name = AuthorName::parse("Jane Doe").unwrap();
        assert_eq!(name.last, "Doe");
        assert_eq!(name.first, "Jane");
        assert_eq!(name.middle_initial, None);
        assert_eq!(name.to_string(), "Doe, Jane");
    }

    #[test]
    fn test_middle_initial() {
        let name = AuthorName::parse("John Q. Smith").unwrap();
        assert_eq!(name.first, "John");
        assert_eq!(name.middle_initial, Some('Q'));
        assert_eq!(name.to_string(), "Smith, John Q.");

        let spelled = AuthorName::parse("John Quincy Adams").unwrap();
        assert_eq!(spelled.to_string(), "Adams, John Q.");
    }

    #[test]
    fn test_extra_given_tokens_are_kept() {
        let name = AuthorName::parse("Maria Ana Luisa Garcia").unwrap();
        assert_eq!(name.first, "Maria Luisa");
        assert_eq!(name.middle_initial, Some('A'));
        assert_eq!(name.to_string(), "Garcia, Maria Luisa A.");
    }

    #[test]
    fn test_single_token_name() {
        let name = AuthorName::parse("Plato").unwrap();
        assert_eq!(name.first, "");
        assert_eq!(name.to_string(), "Plato, ");
    }

    #[test]
    fn test_blank_name() {
        assert!(AuthorName::parse("   ").is_none());
    }

    #[test]
    fn test_irregular_whitespace() {
        let name = AuthorName::parse("  Ada   Lovelace ").unwrap();
        assert_eq!(name.to_string(), "Lovelace, Ada");
    }
}
