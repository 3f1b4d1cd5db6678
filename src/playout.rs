/*
 *  Random playout policy used to score a freshly-expanded node.
 */

use rand::Rng;

use crate::einstein::prelude::*;
use crate::ordering::MoveOrdering;

/// Plays `board` out to a terminal position using `ordering`'s move
/// selection at every ply, and returns the result from R's perspective:
/// `1.0` for an R win, `-1.0` for a B win, `0.0` for a draw. Operates on
/// an owned copy, so the caller's board is never mutated.
pub fn rollout(mut board: Board, ordering: &MoveOrdering, rng: &mut impl Rng) -> f64 {
    while board.winner() == Color::Other {
        let legal = board.legal_moves();
        let mv = ordering.pick_one(&board, &legal, rng);
        board.make_move(mv).expect("a rollout move drawn from legal_moves is always legal");
    }
    match board.winner() {
        Color::R => 1.0,
        Color::B => -1.0,
        Color::NoOne => 0.0,
        Color::Other => unreachable!("loop exits only once the board is terminal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rollout_terminates_with_a_definite_result() {
        let board = Board::new([0, 1, 2, 3, 4, 5], [5, 4, 3, 2, 1, 0]);
        let ordering = MoveOrdering::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let result = rollout(board, &ordering, &mut rng);
        assert!(result == 1.0 || result == -1.0 || result == 0.0);
    }

    #[test]
    fn rollout_does_not_mutate_caller_board() {
        let board = Board::new([0, 1, 2, 3, 4, 5], [5, 4, 3, 2, 1, 0]);
        let before = board.side_to_move();
        let ordering = MoveOrdering::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let _ = rollout(board.clone(), &ordering, &mut rng);
        assert_eq!(board.side_to_move(), before);
    }
}
