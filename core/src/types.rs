use core::num::NonZeroU8;

use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Face of a stone tile, in `[0, symbol_count)`.
pub type Symbol = u8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// A symbol as stored in the tray: `symbol + 1`, so that an empty slot
/// (`None`, the zero byte) can never be mistaken for symbol `0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrayTile(NonZeroU8);

impl TrayTile {
    /// Encodes `symbol`, returning `None` only for `Symbol::MAX` which has no 1-based form.
    pub const fn from_symbol(symbol: Symbol) -> Option<Self> {
        match symbol.checked_add(1) {
            Some(encoded) => match NonZeroU8::new(encoded) {
                Some(encoded) => Some(Self(encoded)),
                None => None,
            },
            None => None,
        }
    }

    pub const fn symbol(self) -> Symbol {
        self.0.get() - 1
    }

    /// The raw 1-based value.
    pub const fn encoded(self) -> u8 {
        self.0.get()
    }
}
