//! Structure normalization.
//!
//! A window of symbols is reduced to its *shape*: each element is replaced by
//! the index at which its symbol first appeared in the window. The result
//! depends only on the repetition pattern, never on which symbols occur, so
//! `[A, B, A, C]` and `[X, Y, X, Z]` share the shape `"0102"`.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Canonical shape string produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(String);

impl Shape {
    /// Returns the shape as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the shape and returns the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces `seq` to its first-occurrence shape.
///
/// Indices are written in decimal and concatenated. An empty input yields an
/// empty shape.
#[must_use]
pub fn normalize<T: Eq + Hash>(seq: &[T]) -> Shape {
    let mut first_seen: HashMap<&T, usize> = HashMap::with_capacity(seq.len());
    let mut out = String::with_capacity(seq.len());
    for item in seq {
        let next = first_seen.len();
        let idx = *first_seen.entry(item).or_insert(next);
        out.push_str(&idx.to_string());
    }
    Shape(out)
}
