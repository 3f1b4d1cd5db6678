use crate::einstein::prelude::*;

/// The outcome category of a legal move, used both for move ordering and
/// for the root's early-game self-capture filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveClass {
    /// Destination holds an enemy cube whose rank is lower than the mover's.
    CaptureSmallerEnemy,
    /// Destination holds an enemy cube whose rank is at least the mover's.
    CaptureEnemy,
    /// Destination is empty and uninteresting.
    Quiet,
    /// Destination holds a friendly cube.
    SelfCapture,
    /// Destination is this side's finish corner, and the moving rank is
    /// not the side's smallest surviving one — parking a spare cube there
    /// blocks the smallest from arriving.
    CornerTrap,
}

impl MoveClass {
    /// The original game's move-quality score: higher is better for the
    /// mover. `SelfCapture` and `CornerTrap` share the worst score, since
    /// both discourage the move in the same way.
    pub fn value(&self) -> i32 {
        match self {
            MoveClass::CaptureSmallerEnemy => 2,
            MoveClass::CaptureEnemy => 1,
            MoveClass::Quiet => 0,
            MoveClass::SelfCapture | MoveClass::CornerTrap => -1,
        }
    }

    pub fn is_self_capturing(&self) -> bool {
        self.value() <= -1
    }
}

impl Board {
    /// Classifies a legal move. Passing is always `Quiet`.
    pub fn evaluate_move(&self, mv: Move) -> MoveClass {
        if mv.is_pass() {
            return MoveClass::Quiet;
        }

        let color = self.side_to_move();
        let dest = self
            .destination(color, mv.rank, mv.dir)
            .expect("a legal move always has an on-board destination");

        match self.cube_at(dest.0, dest.1) {
            None => {
                let is_finish_corner = dest == Board::finish_corner(color);
                let not_smallest = self.smallest_surviving_rank(color) != Some(mv.rank);
                if is_finish_corner && not_smallest {
                    MoveClass::CornerTrap
                } else {
                    MoveClass::Quiet
                }
            }
            Some(occupant) if occupant.color == color => {
                let smallest = self
                    .smallest_surviving_rank(color)
                    .expect("the mover itself is present, so some rank is");
                if smallest > occupant.rank && Board::near_finish_block(color, dest) {
                    MoveClass::Quiet
                } else {
                    MoveClass::SelfCapture
                }
            }
            Some(occupant) => {
                if occupant.rank < mv.rank {
                    MoveClass::CaptureSmallerEnemy
                } else {
                    MoveClass::CaptureEnemy
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_is_always_quiet() {
        let b = Board::new([0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5]);
        assert_eq!(b.evaluate_move(Move::PASS), MoveClass::Quiet);
    }

    #[test]
    fn capturing_a_lower_rank_is_capture_smaller_enemy() {
        // R's rank 5 sits one diagonal step from B's rank 0; dir 2 is (1,1) for R.
        let from = 2 * BOARD_SIDE + 2;
        let to = 3 * BOARD_SIDE + 3;
        let b = Board::from_parts(&[(Color::R, 5, from), (Color::B, 0, to)], [1, 1], Color::R);
        assert_eq!(b.evaluate_move(Move::ordinary(5, 2)), MoveClass::CaptureSmallerEnemy);
    }

    #[test]
    fn capturing_an_equal_or_higher_rank_is_capture_enemy() {
        let from = 2 * BOARD_SIDE + 2;
        let to = 3 * BOARD_SIDE + 3;
        let b = Board::from_parts(&[(Color::R, 0, from), (Color::B, 5, to)], [1, 1], Color::R);
        assert_eq!(b.evaluate_move(Move::ordinary(0, 2)), MoveClass::CaptureEnemy);
    }

    #[test]
    fn values_rank_capture_smaller_highest() {
        assert!(MoveClass::CaptureSmallerEnemy.value() > MoveClass::CaptureEnemy.value());
        assert!(MoveClass::CaptureEnemy.value() > MoveClass::Quiet.value());
        assert!(MoveClass::Quiet.value() > MoveClass::SelfCapture.value());
        assert_eq!(MoveClass::SelfCapture.value(), MoveClass::CornerTrap.value());
    }
}
