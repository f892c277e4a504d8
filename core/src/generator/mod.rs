use crate::*;
pub use random::*;

mod random;

/// Tallest stack dealt to a single cell while the pool lasts.
pub const MAX_STACK_HEIGHT: usize = 3;

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Grid;
}

/// How many stones of each symbol a board of this shape receives.
///
/// Always a positive multiple of [`MATCH_SIZE`], so every symbol can be cleared by whole matches.
pub fn stones_per_symbol(config: BoardConfig) -> usize {
    let total_cells = usize::from(config.total_cells());
    let symbol_count = usize::from(config.symbol_count.max(1));
    match total_cells / symbol_count / MATCH_SIZE * MATCH_SIZE {
        0 => MATCH_SIZE,
        count => count,
    }
}
