use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Deals a shuffled pool of stones onto the board in random stacks of one to three.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Grid {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_with_rng(config, &mut rng)
    }
}

/// Generates a board drawing all randomness from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Grid {
    let config = BoardConfig::new(config.symbol_count, config.cols, config.rows);
    let per_symbol = stones_per_symbol(config);

    let mut pool: Vec<Symbol> = (0..config.symbol_count)
        .flat_map(|symbol| core::iter::repeat_n(symbol, per_symbol))
        .collect();
    pool.shuffle(rng);

    let mut layers: Array2<Layer> = Array2::default(config.size().to_nd_index());
    let mut remaining = pool.as_slice();
    for layer in layers.iter_mut() {
        let height = rng.random_range(1..=MAX_STACK_HEIGHT).min(remaining.len());
        let (stack, rest) = remaining.split_at(height);
        *layer = Layer::from(stack);
        remaining = rest;
    }

    // the pool outgrew the dealt stacks, pile the rest on top instead of dropping it
    if !remaining.is_empty() {
        log::debug!(
            "Board {}x{} too small for {} stones, stacking {} leftovers",
            config.rows,
            config.cols,
            pool.len(),
            remaining.len()
        );
        let cols = usize::from(config.cols);
        let cells = layers.len();
        for (i, &symbol) in remaining.iter().enumerate() {
            let cell = i % cells;
            layers[[cell / cols, cell % cols]].push(symbol);
        }
    }

    log::debug!(
        "Generated {} stones of {} symbols on a {}x{} board",
        pool.len(),
        config.symbol_count,
        config.rows,
        config.cols
    );
    Grid::new_unchecked(layers)
}
