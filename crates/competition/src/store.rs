use shared::domain::{CompetitionState, Direction};

/// Owns the single [`CompetitionState`] and enforces its invariants.
///
/// The store knows only the catalog length, so `current_index` can never
/// leave `0..len`.
#[derive(Debug, Clone)]
pub struct CompetitionStore {
    state: CompetitionState,
    last_index: usize,
}

impl CompetitionStore {
    pub fn new(catalog_len: usize) -> Self {
        Self {
            state: CompetitionState::default(),
            last_index: catalog_len.saturating_sub(1),
        }
    }

    pub fn get(&self) -> CompetitionState {
        self.state
    }

    /// Restarts from the first question, even when already running.
    pub fn start(&mut self) {
        self.state = CompetitionState {
            started: true,
            current_index: 0,
            answer_revealed: false,
        };
    }

    pub fn end(&mut self) {
        self.state.started = false;
    }

    /// Moves one question in `direction`. Returns `false` and leaves the state
    /// untouched when already at that edge of the catalog.
    pub fn advance(&mut self, direction: Direction) -> bool {
        let index = self.state.current_index;
        let target = match direction {
            Direction::Next if index < self.last_index => index + 1,
            Direction::Previous if index > 0 => index - 1,
            _ => return false,
        };
        self.state.current_index = target;
        self.state.answer_revealed = false;
        true
    }

    pub fn reveal_answer(&mut self) {
        self.state.answer_revealed = true;
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
