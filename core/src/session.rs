use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Points awarded for every cleared match.
pub const MATCH_POINTS: u32 = 10;

/// Once the running score passes this, the tray opens a slot and the running score restarts.
pub const CAPACITY_BONUS_THRESHOLD: u32 = 20;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Tray full and nothing left to match.
    Deadlock,
    /// Countdown reached zero.
    TimeUp,
}

/// A stone taken from `coords` into the tray.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub coords: Coord2,
    pub tile: TrayTile,
}

impl MoveRecord {
    pub const fn symbol(&self) -> Symbol {
        self.tile.symbol()
    }
}

/// One game in play: the board, the tray, the score and the countdown.
///
/// Every tile listed in the move history is sitting in the tray; a match drops the
/// history of the cleared symbol together with its tiles, so matches cannot be undone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    grid: Grid,
    tray: Tray,
    history: Vec<MoveRecord>,
    score: u32,
    total_score: u32,
    time_limit_secs: u32,
    remaining_secs: i64,
    state: SessionState,
    loss_reason: Option<LossReason>,
}

impl Session {
    pub fn new(grid: Grid, tray: TrayConfig, time_limit_secs: u32) -> Self {
        Self {
            grid,
            tray: Tray::new(tray),
            history: Vec::new(),
            score: 0,
            total_score: 0,
            time_limit_secs,
            remaining_secs: time_limit_secs.into(),
            state: Default::default(),
            loss_reason: None,
        }
    }

    pub fn from_config(config: GameConfig, generator: impl BoardGenerator) -> Self {
        let grid = generator.generate(config.board);
        Self::new(grid, config.tray, config.time_limit_secs)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn loss_reason(&self) -> Option<LossReason> {
        self.loss_reason
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Running score toward the next tray slot.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    pub fn can_pick(&self, coords: Coord2) -> bool {
        !self.state.is_finished()
            && self.grid.top_at(coords).is_some()
            && !self.tray.is_full()
    }

    /// Cells whose top stone could be picked right now, in row-major order.
    pub fn pickable_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.grid
            .iter_cells()
            .map(|(coords, _)| coords)
            .filter(|&coords| self.can_pick(coords))
    }

    /// Moves the top stone of `coords` into the tray, resolving a match and the end of the game.
    pub fn pick(&mut self, coords: Coord2) -> Result<PickReport> {
        self.try_pick(coords)
            .inspect_err(|err| log::trace!("Pick at {coords:?} rejected: {err}"))
    }

    /// Puts the most recently picked stone still in the tray back on its cell.
    pub fn undo(&mut self) -> Result<MoveRecord> {
        self.try_undo()
            .inspect_err(|err| log::trace!("Undo rejected: {err}"))
    }

    /// Updates the countdown, losing the game once no time is left.
    pub fn tick(&mut self, remaining_secs: i64) -> Result<SessionState> {
        self.check_not_finished()?;
        self.remaining_secs = remaining_secs;
        if remaining_secs <= 0 {
            self.end_game(SessionState::Lost, Some(LossReason::TimeUp));
        }
        Ok(self.state)
    }

    /// Same as [`Session::tick`] with the time left after `elapsed_secs` of play.
    pub fn tick_elapsed(&mut self, elapsed_secs: u32) -> Result<SessionState> {
        self.tick(i64::from(self.time_limit_secs) - i64::from(elapsed_secs))
    }

    fn try_pick(&mut self, coords: Coord2) -> Result<PickReport> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        let symbol = self.grid.top_at(coords).ok_or(GameError::EmptyCell)?;
        let tile = TrayTile::from_symbol(symbol).ok_or(GameError::InvalidSymbol(symbol))?;
        let slot = self.tray.place(tile)?;
        self.grid.pop_at(coords);
        self.history.push(MoveRecord { coords, tile });
        log::debug!("Picked {symbol} from {coords:?} into slot {slot}");

        let matched = self.tray.count(tile) >= MATCH_SIZE;
        if matched {
            self.resolve_match(tile);
        }

        Ok(PickReport {
            coords,
            symbol,
            slot,
            matched,
            state: self.evaluate(),
        })
    }

    fn try_undo(&mut self) -> Result<MoveRecord> {
        self.check_not_finished()?;

        let record = *self.history.last().ok_or(GameError::NothingToUndo)?;
        if self.tray.remove_first(record.tile).is_none() {
            log::warn!("History names {record:?} but the tray does not hold it");
            return Err(GameError::NothingToUndo);
        }
        self.history.pop();
        self.grid.push_at(record.coords, record.symbol());
        log::debug!("Returned {} to {:?}", record.symbol(), record.coords);

        Ok(record)
    }

    fn resolve_match(&mut self, tile: TrayTile) {
        let cleared = self.tray.clear_all(tile);
        self.history.retain(|record| record.tile != tile);
        self.score += MATCH_POINTS;
        self.total_score += MATCH_POINTS;
        log::debug!(
            "Matched {cleared} of symbol {}, score {} total {}",
            tile.symbol(),
            self.score,
            self.total_score
        );

        if self.score > CAPACITY_BONUS_THRESHOLD {
            if self.tray.grow() {
                log::debug!("Tray capacity raised to {}", self.tray.capacity());
            }
            self.score = 0;
        }
    }

    fn evaluate(&mut self) -> SessionState {
        if self.grid.is_cleared() {
            self.end_game(SessionState::Won, None);
        } else if self.tray.is_full() && !self.tray.has_triple() {
            self.end_game(SessionState::Lost, Some(LossReason::Deadlock));
        }
        self.state
    }

    fn end_game(&mut self, state: SessionState, reason: Option<LossReason>) {
        if self.state.is_finished() {
            return;
        }

        self.state = state;
        self.loss_reason = reason;
        match state {
            SessionState::Won => log::info!("Board cleared, total score {}", self.total_score),
            _ => log::info!("Game lost: {reason:?}"),
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn grid(rows: Vec<Vec<Vec<Symbol>>>) -> Grid {
        Grid::from_layers(rows).unwrap()
    }

    fn session(rows: Vec<Vec<Vec<Symbol>>>, capacity: u8) -> Session {
        Session::new(
            grid(rows),
            TrayConfig::new(capacity, 7, SlotScan::CurrentCapacity),
            180,
        )
    }

    fn tile(symbol: Symbol) -> TrayTile {
        TrayTile::from_symbol(symbol).unwrap()
    }

    #[test]
    fn three_of_a_kind_clear_and_score() {
        let mut session = session(vec![vec![vec![1, 1, 1, 0, 0], vec![2, 2, 2, 0]]], 3);

        session.pick((0, 0)).unwrap();
        session.pick((0, 0)).unwrap();
        let report = session.pick((0, 1)).unwrap();

        assert!(report.matched);
        assert_eq!(report.symbol, 0);
        assert_eq!(report.state, SessionState::InProgress);
        assert_eq!(session.score(), 10);
        assert_eq!(session.total_score(), 10);
        assert!(session.tray().is_empty());
    }

    #[test]
    fn clearing_the_board_wins_and_grows_the_tray() {
        let mut session = session(vec![vec![vec![1, 1, 1, 0, 0], vec![2, 2, 2, 0]]], 3);

        for coords in [(0, 0), (0, 0), (0, 1), (0, 0), (0, 0), (0, 0), (0, 1), (0, 1)] {
            assert_eq!(session.pick(coords).unwrap().state, SessionState::InProgress);
        }
        let report = session.pick((0, 1)).unwrap();

        assert!(report.matched);
        assert_eq!(report.state, SessionState::Won);
        assert_eq!(session.total_score(), 30);
        assert_eq!(session.score(), 0);
        assert_eq!(session.tray().capacity(), 4);
        assert_eq!(session.loss_reason(), None);
    }

    #[test]
    fn full_tray_without_triple_is_lost() {
        let mut session = session(vec![vec![vec![0], vec![1], vec![2], vec![0]]], 3);

        assert_eq!(session.pick((0, 0)).unwrap().state, SessionState::InProgress);
        assert_eq!(session.pick((0, 1)).unwrap().state, SessionState::InProgress);
        let report = session.pick((0, 2)).unwrap();

        assert_eq!(report.state, SessionState::Lost);
        assert_eq!(session.loss_reason(), Some(LossReason::Deadlock));
        assert_eq!(session.pick((0, 3)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn countdown_reaching_zero_is_lost() {
        let mut session = session(vec![vec![vec![0, 0, 0]]], 3);

        assert_eq!(session.tick(12), Ok(SessionState::InProgress));
        assert_eq!(session.tick(0), Ok(SessionState::Lost));
        assert_eq!(session.loss_reason(), Some(LossReason::TimeUp));
        assert_eq!(session.tick(5), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn tick_elapsed_counts_down_from_the_limit() {
        let mut session = session(vec![vec![vec![0]]], 3);

        assert_eq!(session.tick_elapsed(30), Ok(SessionState::InProgress));
        assert_eq!(session.remaining_secs(), 150);
        assert_eq!(session.tick_elapsed(181), Ok(SessionState::Lost));
    }

    #[test]
    fn undo_on_fresh_session_is_rejected() {
        let mut session = session(vec![vec![vec![0, 1]]], 3);
        let before = session.clone();

        assert_eq!(session.undo(), Err(GameError::NothingToUndo));
        assert_eq!(session, before);
    }

    #[test]
    fn undo_restores_cell_and_tray() {
        let mut session = session(vec![vec![vec![2, 0], vec![1]]], 3);
        session.pick((0, 1)).unwrap();
        let before = session.clone();

        session.pick((0, 0)).unwrap();
        let record = session.undo().unwrap();

        assert_eq!(record, MoveRecord { coords: (0, 0), tile: tile(0) });
        assert_eq!(session.grid(), before.grid());
        assert_eq!(session.tray(), before.tray());
        assert_eq!(session.history(), before.history());
        assert_eq!(session.total_score(), before.total_score());
    }

    #[test]
    fn undo_clears_first_slot_holding_the_symbol() {
        let mut session = session(vec![vec![vec![0], vec![1], vec![2, 0]]], 4);
        session.pick((0, 0)).unwrap();
        session.pick((0, 1)).unwrap();
        session.pick((0, 2)).unwrap();
        assert_eq!(session.state(), SessionState::InProgress);

        let record = session.undo().unwrap();

        assert_eq!(record, MoveRecord { coords: (0, 2), tile: tile(0) });
        // the returned stone came from slot 2, but slot 0 is the first holding its symbol
        assert_eq!(session.tray().slots()[..3], [None, Some(tile(1)), Some(tile(0))]);
        assert_eq!(session.grid().top_at((0, 2)), Some(0));
        assert_eq!(session.grid()[(0, 2)].height(), 2);
        assert_eq!(session.grid().top_at((0, 0)), None);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn match_commits_its_moves() {
        let mut session = session(vec![vec![vec![0, 0, 0], vec![1, 5]]], 4);
        session.pick((0, 1)).unwrap();
        for _ in 0..3 {
            session.pick((0, 0)).unwrap();
        }

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.undo().unwrap().symbol(), 5);
        assert_eq!(session.undo(), Err(GameError::NothingToUndo));
        assert_eq!(session.grid()[(0, 0)].height(), 0);
        assert_eq!(session.total_score(), 10);
    }

    #[test]
    fn match_leaves_other_slots_alone() {
        let mut session = session(vec![vec![vec![0, 0], vec![2, 1], vec![0]]], 5);
        session.pick((0, 0)).unwrap();
        session.pick((0, 1)).unwrap();
        session.pick((0, 0)).unwrap();

        let report = session.pick((0, 2)).unwrap();

        assert!(report.matched);
        assert_eq!(session.tray().count(tile(1)), 1);
        assert_eq!(session.tray().occupied(), 1);
        assert_eq!(session.tray().slots()[1], Some(tile(1)));
    }

    #[test]
    fn cleared_board_wins_over_full_tray() {
        let mut session = session(vec![vec![vec![0], vec![1]]], 2);

        session.pick((0, 0)).unwrap();
        let report = session.pick((0, 1)).unwrap();

        assert_eq!(report.state, SessionState::Won);
        assert!(session.tray().is_full());
    }

    #[test]
    fn rejected_picks_change_nothing() {
        let mut session = session(vec![vec![vec![0], vec![], vec![1], vec![2]]], 3);
        session.pick((0, 0)).unwrap();
        let before = session.clone();

        assert_eq!(session.pick((1, 0)), Err(GameError::OutOfBounds));
        assert_eq!(session.pick((0, 4)), Err(GameError::OutOfBounds));
        assert_eq!(session, before);
    }

    #[test]
    fn pick_rejects_empty_cell() {
        let mut session = session(vec![vec![vec![0, 1], vec![], vec![0, 0]]], 2);
        session.pick((0, 0)).unwrap();
        let before = session.clone();

        assert_eq!(session.pick((0, 1)), Err(GameError::EmptyCell));
        assert_eq!(session, before);
        assert!(session.can_pick((0, 0)));
        assert!(!session.can_pick((0, 1)));
        assert_eq!(session.pickable_cells().collect::<Vec<_>>(), [(0, 0), (0, 2)]);
    }

    #[test]
    fn max_scan_reaches_a_match_past_capacity() {
        let mut session = Session::new(
            grid(vec![vec![vec![0, 0, 0], vec![1]]]),
            TrayConfig::new(2, 7, SlotScan::MaxCapacity),
            60,
        );
        session.pick((0, 0)).unwrap();
        session.pick((0, 0)).unwrap();
        session.pick((0, 0)).unwrap();

        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.tray().is_empty());
    }

    #[test]
    fn legacy_scan_can_overfill_current_capacity() {
        let mut session = Session::new(
            grid(vec![vec![vec![0], vec![1], vec![2], vec![3], vec![0, 0]]]),
            TrayConfig::new(3, 7, SlotScan::MaxCapacity),
            60,
        );
        for col in 0..4 {
            session.pick((0, col)).unwrap();
        }

        // deliberately diverges from the capacity bound of the default scan
        assert_eq!(session.tray().occupied(), 4);
        assert_eq!(session.tray().capacity(), 3);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn tray_never_exceeds_capacity_with_default_scan() {
        let mut session = Session::from_config(
            Difficulty::Normal.config(),
            RandomBoardGenerator::new(11),
        );

        loop {
            let Some(coords) = session.pickable_cells().next() else {
                break;
            };
            session.pick(coords).unwrap();
            let tray = session.tray();
            assert!(tray.occupied() <= usize::from(tray.capacity()));
            assert!(tray.capacity() <= tray.max_capacity());
        }
        assert!(session.is_finished());
    }

    #[test]
    fn capacity_bonus_needs_more_than_twenty_points() {
        let mut session = session(
            vec![vec![vec![0, 0, 0], vec![1, 1, 1], vec![2, 2, 2], vec![3]]],
            3,
        );
        for col in 0..2 {
            for _ in 0..3 {
                session.pick((0, col)).unwrap();
            }
        }
        assert_eq!(session.score(), 20);
        assert_eq!(session.tray().capacity(), 3);

        for _ in 0..3 {
            session.pick((0, 2)).unwrap();
        }
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_score(), 30);
        assert_eq!(session.tray().capacity(), 4);
    }

    #[test]
    fn default_state_is_in_progress() {
        assert_eq!(SessionState::default(), SessionState::InProgress);
        assert_eq!(session(vec![vec![vec![0]]], 3).state(), SessionState::InProgress);
    }

    #[test]
    fn commands_after_win_are_rejected() {
        let mut session = session(vec![vec![vec![0]]], 3);
        session.pick((0, 0)).unwrap();

        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.undo(), Err(GameError::AlreadyEnded));
        assert_eq!(session.tick(0), Err(GameError::AlreadyEnded));
        assert_eq!(session.state(), SessionState::Won);
    }
}
