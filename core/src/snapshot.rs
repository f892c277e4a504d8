use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell shows: its top stone and how many stones are stacked there.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub top: Option<Symbol>,
    pub height: u8,
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub tray: Vec<Option<Symbol>>,
    pub tray_capacity: u8,
    pub score: u32,
    pub total_score: u32,
    pub remaining_secs: i64,
    pub state: SessionState,
    pub loss_reason: Option<LossReason>,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        let grid = session.grid();
        let size = grid.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::default());
        for (coords, layer) in grid.iter_cells() {
            cells[coords.to_nd_index()] = CellView {
                top: layer.top(),
                height: layer.height().try_into().unwrap_or(u8::MAX),
            };
        }

        let tray = session.tray();
        Self {
            size,
            cells,
            tray: tray
                .slots()
                .iter()
                .map(|slot| slot.map(TrayTile::symbol))
                .collect(),
            tray_capacity: tray.capacity(),
            score: session.score(),
            total_score: session.total_score(),
            remaining_secs: session.remaining_secs(),
            state: session.state(),
            loss_reason: session.loss_reason(),
        }
    }
}
