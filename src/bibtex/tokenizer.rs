//! Field tokenizer for entry bodies.
//!
//! Walks the body once with a small state machine that tracks brace depth,
//! so nested braces stay inside their value and field names are only
//! matched as whole words (`title` never matches inside `booktitle`).
//! Only brace-delimited values are produced; quoted and bare values are
//! stepped over.

use std::collections::HashMap;

/// A `name = {value}` pair borrowed from the entry body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between fields
    Outside,
    /// Reading a field name that started at the given offset
    InName { start: usize },
    /// Name read, waiting for `=`
    AfterName,
    /// `=` read, waiting for the value
    AfterEquals,
    /// Inside a braced value that started at the given offset
    InValue { start: usize, depth: usize },
    /// Inside a quoted value
    SkipQuoted { depth: usize },
    /// Inside a bare value such as `year = 2015`
    SkipBare,
}

/// Iterator over the brace-delimited fields of an entry body.
#[derive(Debug, Clone)]
pub struct FieldTokenizer<'a> {
    body: &'a str,
    pos: usize,
    state: State,
    name: &'a str,
}

impl<'a> FieldTokenizer<'a> {
    pub fn new(body: &'a str) -> Self {
        Self {
            body,
            pos: 0,
            state: State::Outside,
            name: "",
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}

impl<'a> Iterator for FieldTokenizer<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Field<'a>> {
        while let Some(c) = self.body[self.pos..].chars().next() {
            let at = self.pos;
            self.pos += c.len_utf8();

            let state = self.state;
            self.state = match state {
                State::Outside if c.is_ascii_alphabetic() => State::InName { start: at },
                State::Outside => State::Outside,

                State::InName { .. } if is_name_char(c) => state,
                State::InName { start } => {
                    self.name = &self.body[start..at];
                    match c {
                        '=' => State::AfterEquals,
                        c if c.is_whitespace() => State::AfterName,
                        _ => State::Outside,
                    }
                }

                State::AfterName => match c {
                    '=' => State::AfterEquals,
                    c if c.is_whitespace() => State::AfterName,
                    c if c.is_ascii_alphabetic() => State::InName { start: at },
                    _ => State::Outside,
                },

                State::AfterEquals => match c {
                    '{' => State::InValue {
                        start: self.pos,
                        depth: 1,
                    },
                    '"' => State::SkipQuoted { depth: 0 },
                    ',' => State::Outside,
                    c if c.is_whitespace() => State::AfterEquals,
                    _ => State::SkipBare,
                },

                State::InValue { start, depth } => match c {
                    '{' => State::InValue {
                        start,
                        depth: depth + 1,
                    },
                    '}' if depth == 1 => {
                        self.state = State::Outside;
                        return Some(Field {
                            name: self.name,
                            value: &self.body[start..at],
                        });
                    }
                    '}' => State::InValue {
                        start,
                        depth: depth - 1,
                    },
                    _ => state,
                },

                State::SkipQuoted { depth } => match c {
                    '{' => State::SkipQuoted { depth: depth + 1 },
                    '}' => State::SkipQuoted {
                        depth: depth.saturating_sub(1),
                    },
                    '"' if depth == 0 => State::Outside,
                    _ => state,
                },

                State::SkipBare if c == ',' => State::Outside,
                State::SkipBare => State::SkipBare,
            };
        }

        // An unterminated value is dropped
        None
    }
}

/// Collect the fields of an entry body keyed by lower-cased name.
///
/// When a name appears more than once the first occurrence wins.
pub fn extract_fields(body: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for field in FieldTokenizer::new(body) {
        fields
            .entry(field.name.to_ascii_lowercase())
            .or_insert_with(|| field.value.to_string());
    }
    fields
}
