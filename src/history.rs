//! Append-only record of observed symbols.

use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

/// Ordered, append-only sequence of recorded symbols.
///
/// History is the single source of truth the engines read from. It only
/// grows; the session replaces it wholesale on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<Symbol>);

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a symbol.
    pub fn push(&mut self, symbol: Symbol) {
        self.0.push(symbol);
    }

    /// Number of recorded symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded symbols, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    /// The most recently recorded symbol.
    #[must_use]
    pub fn last(&self) -> Option<&Symbol> {
        self.0.last()
    }

    /// The trailing `len` symbols, or `None` if fewer have been recorded.
    #[must_use]
    pub fn tail(&self, len: usize) -> Option<&[Symbol]> {
        if len == 0 || self.0.len() < len {
            return None;
        }
        Some(&self.0[self.0.len() - len..])
    }

    /// Literal rule key for the trailing `len` symbols: their labels
    /// concatenated in order.
    #[must_use]
    pub fn tail_key(&self, len: usize) -> Option<String> {
        self.tail(len).map(concat_labels)
    }
}

impl FromIterator<Symbol> for History {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Symbol> for History {
    fn extend<T: IntoIterator<Item = Symbol>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

fn concat_labels(symbols: &[Symbol]) -> String {
    let mut key = String::with_capacity(symbols.iter().map(|s| s.as_str().len()).sum());
    for s in symbols {
        key.push_str(s.as_str());
    }
    key
}
