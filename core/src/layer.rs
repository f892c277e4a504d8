use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Symbol;

/// Stack of stones on one cell, bottom to top. Only the top stone can leave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer {
    stones: SmallVec<[Symbol; 3]>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<Symbol> {
        self.stones.last().copied()
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.stones.push(symbol);
    }

    pub fn pop(&mut self) -> Option<Symbol> {
        self.stones.pop()
    }

    pub fn height(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Iterates from the bottom stone up to the top one.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Symbol> + '_ {
        self.stones.iter().copied()
    }
}

impl FromIterator<Symbol> for Layer {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self {
            stones: iter.into_iter().collect(),
        }
    }
}

impl From<&[Symbol]> for Layer {
    fn from(stones: &[Symbol]) -> Self {
        stones.iter().copied().collect()
    }
}
