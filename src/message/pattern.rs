//! Shell-style glob patterns for selecting result fields.
//!
//! A [`Pattern`] is compiled once from text and matched against field
//! names. Supported syntax:
//!
//! | Token | Matches |
//! |-------|---------|
//! | `*` | any run of characters, including none |
//! | `?` | exactly one character |
//! | `[seq]` | one character in `seq` (ranges like `a-z` allowed) |
//! | `[!seq]` | one character not in `seq` |
//!
//! Everything else matches itself, case-sensitively. A `[` without a
//! closing `]` is a literal. Matching is anchored at both ends.
//!
//! [`FieldPatterns`] is the ordered list built from the comma-separated
//! `field_names` setting.

use serde_json::Value;

use crate::error::{json_kind, AlertError};
use crate::logging::DEBUG_TARGET;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnyRun,
    Class { negated: bool, items: Vec<ClassItem> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassItem {
    Single(char),
    Range(char, char),
}

impl Token {
    fn matches_one(&self, c: char) -> bool {
        match self {
            Self::Literal(l) => *l == c,
            Self::AnyChar => true,
            Self::AnyRun => false,
            Self::Class { negated, items } => {
                let hit = items.iter().any(|item| match *item {
                    ClassItem::Single(s) => s == c,
                    ClassItem::Range(lo, hi) => lo <= c && c <= hi,
                });
                hit != *negated
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            tokens: compile(source),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().collect();
        let tokens = &self.tokens;

        let (mut t, mut n) = (0, 0);
        // Position of the last `*` and the name index it is currently absorbing up to.
        let mut backtrack: Option<(usize, usize)> = None;

        while n < name.len() {
            if let Some(token) = tokens.get(t) {
                if *token == Token::AnyRun {
                    backtrack = Some((t, n));
                    t += 1;
                    continue;
                }
                if token.matches_one(name[n]) {
                    t += 1;
                    n += 1;
                    continue;
                }
            }
            match backtrack {
                Some((star, absorbed)) => {
                    backtrack = Some((star, absorbed + 1));
                    t = star + 1;
                    n = absorbed + 1;
                }
                None => return false,
            }
        }

        tokens[t..].iter().all(|token| *token == Token::AnyRun)
    }
}

fn compile(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                // Consecutive stars are equivalent to one.
                if tokens.last() != Some(&Token::AnyRun) {
                    tokens.push(Token::AnyRun);
                }
                i += 1;
            }
            '?' => {
                tokens.push(Token::AnyChar);
                i += 1;
            }
            '[' => match parse_class(&chars, i) {
                Some((token, next)) => {
                    tokens.push(token);
                    i = next;
                }
                None => {
                    tokens.push(Token::Literal('['));
                    i += 1;
                }
            },
            c => {
                tokens.push(Token::Literal(c));
                i += 1;
            }
        }
    }

    tokens
}

/// Parse a bracket expression starting at `chars[open] == '['`.
///
/// Returns the class token and the index just past the closing `]`, or
/// `None` when the bracket is never closed.
fn parse_class(chars: &[char], open: usize) -> Option<(Token, usize)> {
    let mut j = open + 1;
    let negated = chars.get(j) == Some(&'!');
    if negated {
        j += 1;
    }
    let body_start = j;
    // A `]` directly after `[` or `[!` is part of the set.
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    if j >= chars.len() {
        return None;
    }

    let body = &chars[body_start..j];
    let mut items = Vec::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            items.push(ClassItem::Range(body[k], body[k + 2]));
            k += 3;
        } else {
            items.push(ClassItem::Single(body[k]));
            k += 1;
        }
    }

    Some((Token::Class { negated, items }, j + 1))
}

/// Ordered list of field-name patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatterns {
    patterns: Vec<Pattern>,
}

impl FieldPatterns {
    /// Split a comma-separated pattern list. Patterns are not trimmed, so
    /// `"a, b"` yields `a` and ` b`.
    #[must_use]
    pub fn parse(field_names: &str) -> Self {
        Self {
            patterns: field_names.split(',').map(Pattern::new).collect(),
        }
    }

    /// Build the list from the raw `configuration.field_names` value.
    pub fn from_value(value: &Value) -> Result<Self, AlertError> {
        match value {
            Value::String(s) => Ok(Self::parse(s)),
            other => Err(AlertError::FieldNamesNotSplittable {
                found: json_kind(other),
            }),
        }
    }

    /// Patterns for a `field_names` value that could not be split.
    ///
    /// The raw value is used as the list itself: an array yields its
    /// elements, an object its keys. A value that is not a list of strings
    /// cannot be matched against, which is an error as soon as there is a
    /// field to match (`has_fields`).
    pub fn salvage(value: &Value, has_fields: bool) -> Result<Self, AlertError> {
        let patterns: Vec<Pattern> = match value {
            Value::Array(items) => {
                if has_fields && items.iter().any(|item| !item.is_string()) {
                    return Err(AlertError::FieldNamesNotIterable {
                        found: "an array with non-string elements",
                    });
                }
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(Pattern::new)
                    .collect()
            }
            Value::Object(map) => map.keys().map(String::as_str).map(Pattern::new).collect(),
            other if has_fields => {
                return Err(AlertError::FieldNamesNotIterable {
                    found: json_kind(other),
                })
            }
            _ => Vec::new(),
        };
        Ok(Self { patterns })
    }

    /// First pattern matching `name`, if any.
    ///
    /// Every comparison is traced on the debug channel.
    #[must_use]
    pub fn find_match(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|pattern| {
            tracing::debug!(
                target: DEBUG_TARGET,
                key = %name,
                field_name = %pattern.as_str(),
                "Key and Field Name"
            );
            pattern.matches(name)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl std::fmt::Display for FieldPatterns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, p) in self.patterns.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(p.as_str())?;
        }
        Ok(())
    }
}
