use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Stones of one symbol that clear each other once they meet in the tray.
pub const MATCH_SIZE: usize = 3;

/// Which tray slots a picked stone may land in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotScan {
    /// Only the first `capacity` slots are usable.
    #[default]
    CurrentCapacity,
    /// Every slot up to `max_capacity` is usable whatever the current capacity is.
    MaxCapacity,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayConfig {
    pub capacity: u8,
    pub max_capacity: u8,
    pub scan: SlotScan,
}

impl TrayConfig {
    pub const fn new_unchecked(capacity: u8, max_capacity: u8, scan: SlotScan) -> Self {
        Self {
            capacity,
            max_capacity,
            scan,
        }
    }

    pub fn new(capacity: u8, max_capacity: u8, scan: SlotScan) -> Self {
        let max_capacity = max_capacity.max(1);
        let capacity = capacity.clamp(1, max_capacity);
        Self::new_unchecked(capacity, max_capacity, scan)
    }
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self::new_unchecked(3, 7, SlotScan::CurrentCapacity)
    }
}

/// Collector row where picked stones wait for their matching pair of siblings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tray {
    slots: SmallVec<[Option<TrayTile>; 7]>,
    capacity: u8,
    scan: SlotScan,
}

impl Tray {
    pub fn new(config: TrayConfig) -> Self {
        let config = TrayConfig::new(config.capacity, config.max_capacity, config.scan);
        Self {
            slots: smallvec![None; config.max_capacity.into()],
            capacity: config.capacity,
            scan: config.scan,
        }
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn max_capacity(&self) -> u8 {
        // slot count never exceeds the u8 it was built from
        self.slots.len() as u8
    }

    pub fn scan(&self) -> SlotScan {
        self.scan
    }

    pub fn slots(&self) -> &[Option<TrayTile>] {
        &self.slots
    }

    /// Slots a new stone may be placed into.
    pub fn usable_slots(&self) -> &[Option<TrayTile>] {
        match self.scan {
            SlotScan::CurrentCapacity => &self.slots[..usize::from(self.capacity)],
            SlotScan::MaxCapacity => &self.slots,
        }
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    pub fn is_full(&self) -> bool {
        self.usable_slots().iter().all(Option::is_some)
    }

    pub fn count(&self, tile: TrayTile) -> usize {
        self.slots.iter().filter(|&&slot| slot == Some(tile)).count()
    }

    /// Whether some symbol currently sits in exactly [`MATCH_SIZE`] slots.
    pub fn has_triple(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|&tile| self.count(tile) == MATCH_SIZE)
    }

    /// Puts `tile` into the lowest free usable slot and returns its index.
    pub fn place(&mut self, tile: TrayTile) -> Result<usize> {
        let limit = self.usable_slots().len();
        let index = self.slots[..limit]
            .iter()
            .position(Option::is_none)
            .ok_or(GameError::TrayFull)?;
        self.slots[index] = Some(tile);
        Ok(index)
    }

    /// Empties every slot holding `tile`, returning how many were cleared.
    pub fn clear_all(&mut self, tile: TrayTile) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut().filter(|slot| **slot == Some(tile)) {
            *slot = None;
            cleared += 1;
        }
        cleared
    }

    /// Empties the first slot holding `tile`, returning its index.
    pub fn remove_first(&mut self, tile: TrayTile) -> Option<usize> {
        let index = self.slots.iter().position(|&slot| slot == Some(tile))?;
        self.slots[index] = None;
        Some(index)
    }

    /// Opens one more slot, up to the maximum. Returns whether capacity changed.
    pub fn grow(&mut self) -> bool {
        if self.capacity < self.max_capacity() {
            self.capacity += 1;
            true
        } else {
            false
        }
    }
}
