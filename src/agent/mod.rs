use rand::Rng;

use crate::einstein::prelude::*;
use crate::mcts::prelude::*;

/// Owns the board and search tree for one side of one game. Does not own
/// the process's pseudo-random generator — the protocol loop does, since
/// per §5 a single generator is seeded once at startup and every
/// stochastic draw across the whole run, games included, comes from it in
/// sequence.
pub struct EinsteinAgent {
    board: Board,
    driver: Driver,
    config: SearchConfig,
    own_move_count: usize,
}

impl EinsteinAgent {
    pub fn new(perm_r: [u8; NUM_CUBES], perm_b: [u8; NUM_CUBES], config: SearchConfig) -> EinsteinAgent {
        EinsteinAgent { board: Board::new(perm_r, perm_b), driver: Driver::new(), config, own_move_count: 0 }
    }

    pub fn winner(&self) -> Color {
        self.board.winner()
    }

    /// Applies an opponent (or replayed) move to the agent's own board model.
    pub fn play_move(&mut self, mv: Move) -> Result<()> {
        self.board.make_move(mv)
    }

    /// Undoes the last two half-moves, as required when the opponent
    /// signals the undo sentinel.
    pub fn undo_last_two(&mut self) {
        self.board.undo_move();
        self.board.undo_move();
    }

    /// Searches for, applies, and returns this side's next move.
    pub fn generate_move(&mut self, rng: &mut impl Rng) -> Move {
        let (mv, stats) = self.driver.search(self.board.clone(), &self.config, rng, self.own_move_count);
        log::debug!(
            "turn {}: chose {:?} after {} iterations ({:?}, depth {}, {} nodes)",
            self.board.turn_count(),
            mv,
            stats.iterations,
            stats.elapsed,
            stats.max_depth,
            stats.nodes_expanded,
        );
        self.board.make_move(mv).expect("the engine only ever chooses a legal move");
        self.own_move_count += 1;
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::time::Duration;

    fn fast_agent() -> EinsteinAgent {
        let config = SearchConfig { batch_size: 4, iteration_cap: 200, time_budget: Duration::from_millis(200), ..SearchConfig::default() };
        EinsteinAgent::new([0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5], config)
    }

    #[test]
    fn generate_move_advances_own_move_count() {
        let mut agent = fast_agent();
        let mut rng = rand::rngs::StdRng::seed_from_u64(17);
        assert_eq!(agent.own_move_count, 0);
        agent.generate_move(&mut rng);
        assert_eq!(agent.own_move_count, 1);
    }

    #[test]
    fn play_then_undo_restores_winner_and_turn() {
        let mut agent = fast_agent();
        let mv = agent.board.legal_moves()[0];
        let before_turn = agent.board.turn_count();
        agent.play_move(mv).unwrap();
        agent.board.undo_move();
        assert_eq!(agent.board.turn_count(), before_turn);
        assert_eq!(agent.winner(), Color::Other);
    }
}
