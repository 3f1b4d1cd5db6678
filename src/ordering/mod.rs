/*
 *  Move ordering for both the expansion queue and the playout policy.
 */

use rand::{seq::SliceRandom, Rng};

use crate::einstein::prelude::*;

/// The four priority buckets a legal move can fall into. Used directly as
/// the deterministic priority order; collapsed further for weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    CaptureSmaller,
    Capture,
    Quiet,
    SelfCapture,
}

impl Bucket {
    pub fn of(class: MoveClass) -> Bucket {
        match class {
            MoveClass::CaptureSmallerEnemy => Bucket::CaptureSmaller,
            MoveClass::CaptureEnemy => Bucket::Capture,
            MoveClass::Quiet => Bucket::Quiet,
            MoveClass::SelfCapture | MoveClass::CornerTrap => Bucket::SelfCapture,
        }
    }
}

/// Priority order used to concatenate buckets in deterministic mode.
const DETERMINISTIC_ORDER: [Bucket; 4] = [Bucket::CaptureSmaller, Bucket::Capture, Bucket::Quiet, Bucket::SelfCapture];

/// Per-bucket weights for weighted-stochastic sampling. `CaptureSmaller`
/// and `Capture` share the "enemy-capture" weight: stochastic mode does
/// not distinguish smaller captures from equal-or-larger ones.
#[derive(Clone, Copy, Debug)]
pub struct BucketWeights {
    pub capture: u32,
    pub quiet: u32,
    pub self_capture: u32,
}

impl Default for BucketWeights {
    fn default() -> Self {
        BucketWeights { capture: 50, quiet: 5, self_capture: 1 }
    }
}

impl BucketWeights {
    fn of(&self, bucket: Bucket) -> u32 {
        match bucket {
            Bucket::CaptureSmaller | Bucket::Capture => self.capture,
            Bucket::Quiet => self.quiet,
            Bucket::SelfCapture => self.self_capture,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum OrderingMode {
    Deterministic,
    Stochastic,
}

#[derive(Clone, Debug)]
pub struct MoveOrdering {
    pub mode: OrderingMode,
    pub weights: BucketWeights,
}

impl Default for MoveOrdering {
    fn default() -> Self {
        MoveOrdering { mode: OrderingMode::Deterministic, weights: BucketWeights::default() }
    }
}

impl MoveOrdering {
    fn bucket_of(&self, board: &Board, mv: Move) -> Bucket {
        Bucket::of(board.evaluate_move(mv))
    }

    /// Builds the full expansion queue for `moves`, shuffled within
    /// buckets for deterministic mode and weight-sampled without
    /// replacement for stochastic mode.
    pub fn enqueue(&self, board: &Board, mut moves: Vec<Move>, rng: &mut impl Rng) -> VecDeque<Move> {
        match self.mode {
            OrderingMode::Deterministic => {
                moves.shuffle(rng);
                let mut buckets: [Vec<Move>; 4] = Default::default();
                for mv in moves {
                    let idx = DETERMINISTIC_ORDER.iter().position(|&b| b == self.bucket_of(board, mv)).unwrap();
                    buckets[idx].push(mv);
                }
                buckets.into_iter().flatten().collect()
            }
            OrderingMode::Stochastic => self.stochastic_queue(board, moves, rng),
        }
    }

    fn stochastic_queue(&self, board: &Board, moves: Vec<Move>, rng: &mut impl Rng) -> VecDeque<Move> {
        let mut pools: [Vec<Move>; 4] = Default::default();
        for mv in moves {
            let idx = DETERMINISTIC_ORDER.iter().position(|&b| b == self.bucket_of(board, mv)).unwrap();
            pools[idx].push(mv);
        }

        let mut queue = VecDeque::new();
        loop {
            let weights: Vec<u32> = DETERMINISTIC_ORDER
                .iter()
                .zip(pools.iter())
                .map(|(&bucket, pool)| if pool.is_empty() { 0 } else { self.weights.of(bucket) })
                .collect();
            let total: u32 = weights.iter().sum();
            if total == 0 {
                break;
            }
            let mut roll = rng.gen_range(0..total);
            let mut chosen = 0;
            for (i, &w) in weights.iter().enumerate() {
                if roll < w {
                    chosen = i;
                    break;
                }
                roll -= w;
            }
            let pool = &mut pools[chosen];
            let pick = rng.gen_range(0..pool.len());
            queue.push_back(pool.remove(pick));
        }
        queue
    }

    /// Picks a single move without materializing the whole queue —
    /// the playout policy calls this once per ply.
    pub fn pick_one(&self, board: &Board, moves: &[Move], rng: &mut impl Rng) -> Move {
        if moves.len() == 1 {
            return moves[0];
        }
        match self.mode {
            OrderingMode::Deterministic => {
                for &bucket in &DETERMINISTIC_ORDER {
                    let candidates: Vec<Move> = moves.iter().copied().filter(|&mv| self.bucket_of(board, mv) == bucket).collect();
                    if !candidates.is_empty() {
                        return candidates[rng.gen_range(0..candidates.len())];
                    }
                }
                moves[0]
            }
            OrderingMode::Stochastic => {
                let buckets: Vec<Bucket> = moves.iter().map(|&mv| self.bucket_of(board, mv)).collect();
                let weights: Vec<u32> = buckets.iter().map(|&b| self.weights.of(b)).collect();
                let total: u32 = weights.iter().sum();
                if total == 0 {
                    return moves[rng.gen_range(0..moves.len())];
                }
                let mut roll = rng.gen_range(0..total);
                for (i, &w) in weights.iter().enumerate() {
                    if roll < w {
                        return moves[i];
                    }
                    roll -= w;
                }
                moves[moves.len() - 1]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn opening_board() -> Board {
        Board::new([0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5])
    }

    #[test]
    fn deterministic_queue_contains_every_legal_move_exactly_once() {
        let board = opening_board();
        let moves = board.legal_moves();
        let ordering = MoveOrdering::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let queue = ordering.enqueue(&board, moves.clone(), &mut rng);
        assert_eq!(queue.len(), moves.len());
        for mv in &moves {
            assert!(queue.contains(mv));
        }
    }

    #[test]
    fn stochastic_queue_contains_every_legal_move_exactly_once() {
        let board = opening_board();
        let moves = board.legal_moves();
        let ordering = MoveOrdering { mode: OrderingMode::Stochastic, weights: BucketWeights::default() };
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let queue = ordering.enqueue(&board, moves.clone(), &mut rng);
        assert_eq!(queue.len(), moves.len());
        for mv in &moves {
            assert!(queue.contains(mv));
        }
    }

    #[test]
    fn pick_one_returns_a_legal_move() {
        let board = opening_board();
        let moves = board.legal_moves();
        let ordering = MoveOrdering::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let picked = ordering.pick_one(&board, &moves, &mut rng);
        assert!(moves.contains(&picked));
    }

    #[test]
    fn single_move_is_picked_without_consulting_rng() {
        let board = opening_board();
        let ordering = MoveOrdering::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let only = [Move::PASS];
        assert_eq!(ordering.pick_one(&board, &only, &mut rng), Move::PASS);
    }
}
