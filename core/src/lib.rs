#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use layer::*;
pub use scores::*;
pub use session::*;
pub use snapshot::*;
pub use tray::*;
pub use types::*;

mod error;
mod generator;
mod layer;
mod scores;
mod session;
mod snapshot;
mod tray;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub symbol_count: u8,
    pub cols: Coord,
    pub rows: Coord,
}

impl BoardConfig {
    pub const fn new_unchecked(symbol_count: u8, cols: Coord, rows: Coord) -> Self {
        Self {
            symbol_count,
            cols,
            rows,
        }
    }

    pub fn new(symbol_count: u8, cols: Coord, rows: Coord) -> Self {
        Self::new_unchecked(symbol_count.max(1), cols.max(1), rows.max(1))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.cols, self.rows)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub tray: TrayConfig,
    pub time_limit_secs: u32,
}

impl GameConfig {
    pub const fn new(board: BoardConfig, tray: TrayConfig, time_limit_secs: u32) -> Self {
        Self {
            board,
            tray,
            time_limit_secs,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const BOARD_COLS: Coord = 8;
    pub const BOARD_ROWS: Coord = 5;

    pub const fn symbol_count(self) -> u8 {
        match self {
            Self::Easy => 7,
            Self::Normal => 10,
            Self::Hard => 15,
        }
    }

    pub const fn time_limit_secs(self) -> u32 {
        match self {
            Self::Easy | Self::Normal => 180,
            Self::Hard => 90,
        }
    }

    pub const fn config(self) -> GameConfig {
        GameConfig::new(
            BoardConfig::new_unchecked(self.symbol_count(), Self::BOARD_COLS, Self::BOARD_ROWS),
            TrayConfig::new_unchecked(3, 7, SlotScan::CurrentCapacity),
            self.time_limit_secs(),
        )
    }
}

/// The stacks of stones laid out on the board, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    layers: Array2<Layer>,
}

impl Grid {
    /// Wraps dealt stacks whose shape already fits in `Coord` on both axes.
    pub(crate) fn new_unchecked(layers: Array2<Layer>) -> Self {
        Self { layers }
    }

    /// Checks that the board is a non-empty rectangle addressable by `Coord`, holding at
    /// least one stone and only symbols with a tray encoding.
    pub fn from_layer_array(layers: Array2<Layer>) -> Result<Self> {
        let (row_count, col_count) = layers.dim();
        if row_count == 0
            || col_count == 0
            || row_count > Coord::MAX.into()
            || col_count > Coord::MAX.into()
        {
            return Err(GameError::InvalidBoardShape);
        }

        if let Some(bad) = layers
            .iter()
            .flat_map(Layer::iter)
            .find(|&s| TrayTile::from_symbol(s).is_none())
        {
            return Err(GameError::InvalidSymbol(bad));
        }

        let grid = Self { layers };
        if grid.is_cleared() {
            return Err(GameError::EmptyBoard);
        }
        Ok(grid)
    }

    /// Builds a grid from rows of cells, each cell listing its stones bottom to top.
    pub fn from_layers(rows: Vec<Vec<Vec<Symbol>>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != col_count) {
            return Err(GameError::InvalidBoardShape);
        }

        let cells: Vec<Layer> = rows
            .iter()
            .flatten()
            .map(|stones| Layer::from(stones.as_slice()))
            .collect();
        let layers = Array2::from_shape_vec([row_count, col_count], cells)
            .map_err(|_| GameError::InvalidBoardShape)?;

        Self::from_layer_array(layers)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.layers.dim();
        // dimensions are bounded by Coord when the grid is built
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn layer(&self, coords: Coord2) -> Option<&Layer> {
        self.layers.get(coords.to_nd_index())
    }

    pub fn top_at(&self, coords: Coord2) -> Option<Symbol> {
        self.layer(coords).and_then(Layer::top)
    }

    pub fn is_cleared(&self) -> bool {
        self.layers.iter().all(Layer::is_empty)
    }

    pub fn tile_count(&self) -> usize {
        self.layers.iter().map(Layer::height).sum()
    }

    /// How many stones of each symbol are on the board.
    pub fn symbol_counts(&self) -> BTreeMap<Symbol, usize> {
        let mut counts = BTreeMap::new();
        for symbol in self.layers.iter().flat_map(Layer::iter) {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        counts
    }

    /// Iterates cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Layer)> + '_ {
        self.layers
            .indexed_iter()
            .map(|((row, col), layer)| ((row as Coord, col as Coord), layer))
    }

    pub(crate) fn pop_at(&mut self, coords: Coord2) -> Option<Symbol> {
        self.layers[coords.to_nd_index()].pop()
    }

    pub(crate) fn push_at(&mut self, coords: Coord2, symbol: Symbol) {
        self.layers[coords.to_nd_index()].push(symbol);
    }
}

impl Index<Coord2> for Grid {
    type Output = Layer;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.layers[coords.to_nd_index()]
    }
}

/// What happened to the board and tray after an accepted pick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickReport {
    pub coords: Coord2,
    pub symbol: Symbol,
    pub slot: usize,
    pub matched: bool,
    pub state: SessionState,
}
