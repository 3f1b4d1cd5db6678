use std::time::{Duration, Instant};

use rand::Rng;

use crate::einstein::prelude::*;
use crate::mcts::{config::SearchConfig, node::Node};
use crate::ordering::Bucket;
use crate::playout::rollout;

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub iterations: u64,
    pub elapsed: Duration,
    pub max_depth: usize,
    pub nodes_expanded: usize,
}

/// The arena-backed search tree for a single move decision. A fresh
/// `Driver` is built for every move; the whole tree for the previous
/// move is dropped with it.
pub struct Driver {
    arena: Vec<Node>,
}

impl Driver {
    pub fn new() -> Self {
        Driver { arena: Vec::new() }
    }

    fn push(&mut self, node: Node) -> usize {
        self.arena.push(node);
        self.arena.len() - 1
    }

    /// Runs the search from `board` and returns the chosen move together
    /// with bookkeeping about the search that produced it. `own_move_index`
    /// is how many of this side's own moves have already been played this
    /// game, used to gate the root's early-game self-capture filter.
    pub fn search(&mut self, board: Board, config: &SearchConfig, rng: &mut impl Rng, own_move_index: usize) -> (Move, SearchStats) {
        self.arena.clear();

        let legal = board.legal_moves();
        if legal.len() == 1 {
            return (legal[0], SearchStats::default());
        }

        let root = self.push(Node::root(board));
        self.prime_root(root, config, rng, own_move_index);

        let start = Instant::now();
        let mut iterations = 0u64;
        let mut max_depth = 0usize;

        while iterations < config.iteration_cap && start.elapsed() < config.time_budget {
            let depth = self.iterate(root, config, rng);
            max_depth = max_depth.max(depth);
            iterations += config.batch_size as u64;
        }

        let stats = SearchStats { iterations, elapsed: start.elapsed(), max_depth, nodes_expanded: self.arena.len() - 1 };
        let mv = self.decide_move(root, config);
        (mv, stats)
    }

    fn iterate(&mut self, root: usize, config: &SearchConfig, rng: &mut impl Rng) -> usize {
        let (mut leaf, mut depth) = self.select(root, config);
        if !self.arena[leaf].is_terminal() && !self.arena[leaf].is_fully_expanded() {
            leaf = self.expand(leaf, config, rng);
            depth += 1;
        }
        self.simulate_and_backprop(leaf, config, rng);
        depth
    }

    /// Descends from `root` by repeatedly choosing the best UCT child of
    /// a fully-expanded, non-terminal node, pruning each parent along the
    /// way before picking its child.
    fn select(&mut self, root: usize, config: &SearchConfig) -> (usize, usize) {
        let mut current = root;
        let mut depth = 0;
        while !self.arena[current].is_terminal() && self.arena[current].is_fully_expanded() {
            match self.choose_child(current, config, false) {
                Some(next) => {
                    current = next;
                    depth += 1;
                }
                None => break,
            }
        }
        (current, depth)
    }

    /// Pops one pending move off `parent`, applies it, and records the
    /// resulting node as a new child.
    fn expand(&mut self, parent: usize, config: &SearchConfig, rng: &mut impl Rng) -> usize {
        let mv = self.arena[parent].pending.pop_front().expect("expand is only called on a non-fully-expanded node");
        let mut child_board = self.arena[parent].board.clone();
        child_board.make_move(mv).expect("queued moves are always legal");

        let child = self.push(Node::child(parent, mv, child_board));
        self.prime_child(child, config, rng);

        self.arena[parent].children.push(child);
        self.arena[parent].live_children += 1;
        child
    }

    fn prime_root(&mut self, root: usize, config: &SearchConfig, rng: &mut impl Rng, own_move_index: usize) {
        let board = self.arena[root].board.clone();
        let legal = board.legal_moves();
        let mut queue = config.ordering.enqueue(&board, legal, rng);

        if own_move_index < EARLY_GAME_SELF_MOVES || queue.len() > EARLY_GAME_QUEUE_THRESHOLD {
            let (non_self, self_capturing): (VecDeque<Move>, VecDeque<Move>) =
                queue.into_iter().partition(|&mv| Bucket::of(board.evaluate_move(mv)) != Bucket::SelfCapture);
            queue = if !non_self.is_empty() { non_self } else { self_capturing };
        }

        self.arena[root].pending = queue;
    }

    fn prime_child(&mut self, child: usize, config: &SearchConfig, rng: &mut impl Rng) {
        let board = self.arena[child].board.clone();
        let legal = board.legal_moves();
        self.arena[child].pending = config.ordering.enqueue(&board, legal, rng);
    }

    /// Runs `K` independent rollouts from `node` and backpropagates their
    /// sum and sum-of-squares up to the root.
    fn simulate_and_backprop(&mut self, node: usize, config: &SearchConfig, rng: &mut impl Rng) {
        let board = self.arena[node].board.clone();
        let mut sum = 0.0;
        let mut sq_sum = 0.0;
        for _ in 0..config.batch_size {
            let result = rollout(board.clone(), &config.ordering, rng);
            sum += result;
            sq_sum += result * result;
        }

        let mut cursor = Some(node);
        while let Some(idx) = cursor {
            let n = &mut self.arena[idx];
            n.visits += config.batch_size as u64;
            n.value_sum += sum;
            n.value_sq_sum += sq_sum;
            cursor = n.parent;
        }
    }

    /// Shared by selection (UCT, with pruning) and the final move
    /// decision (plain win rate, no pruning): both reduce to "pick the
    /// best live child of this parent".
    fn choose_child(&mut self, parent: usize, config: &SearchConfig, decide_mode: bool) -> Option<usize> {
        let children = self.arena[parent].children.clone();
        if children.len() == 1 {
            return Some(children[0]);
        }
        if self.arena[parent].live_children <= 1 {
            return children.iter().copied().find(|&c| !self.arena[c].pruned);
        }

        if !decide_mode {
            self.progressive_prune(parent, config);
        }

        let sign = if self.arena[parent].board.side_to_move() == Color::R { 1.0 } else { -1.0 };
        let parent_visits = self.arena[parent].visits as f64;

        let mut best: Option<(usize, f64)> = None;
        for &c in &children {
            if self.arena[c].pruned {
                continue;
            }
            let score = if decide_mode {
                sign * self.arena[c].mean()
            } else {
                let n_c = self.arena[c].visits as f64;
                sign * self.arena[c].mean() + config.exploration_c * (parent_visits.ln() / n_c).sqrt()
            };
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((c, score)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Marks children that are confidently worse than the current best
    /// child as pruned, once they (and the best child) have enough visits
    /// and low enough variance to be trusted.
    fn progressive_prune(&mut self, parent: usize, config: &SearchConfig) {
        let children = self.arena[parent].children.clone();
        if self.arena[parent].live_children <= 1 {
            return;
        }

        let qualifying: Vec<usize> = children
            .iter()
            .copied()
            .filter(|&c| !self.arena[c].pruned && self.arena[c].visits >= config.pp_min_visits && self.arena[c].std_dev() < config.pp_epsilon)
            .collect();
        if qualifying.len() <= 1 {
            return;
        }

        let sign = if self.arena[parent].board.side_to_move() == Color::R { 1.0 } else { -1.0 };
        let anchor = *qualifying
            .iter()
            .max_by(|&&a, &&b| (sign * self.arena[a].mean()).partial_cmp(&(sign * self.arena[b].mean())).unwrap())
            .unwrap();
        let anchor_score = sign * self.arena[anchor].mean();
        let lower_bound = anchor_score - config.pp_alpha * self.arena[anchor].std_dev();

        for &c in &qualifying {
            if c == anchor {
                continue;
            }
            let upper_bound = sign * self.arena[c].mean() + config.pp_alpha * self.arena[c].std_dev();
            if lower_bound > upper_bound {
                self.arena[c].pruned = true;
                self.arena[parent].live_children -= 1;
            }
        }
    }

    fn decide_move(&mut self, root: usize, config: &SearchConfig) -> Move {
        if self.arena[root].children.is_empty() {
            return Move::PASS;
        }
        match self.choose_child(root, config, true) {
            Some(c) => self.arena[c].incoming_move.expect("a child always has an incoming move"),
            None => Move::PASS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fast_config() -> SearchConfig {
        SearchConfig {
            batch_size: 4,
            iteration_cap: 400,
            time_budget: Duration::from_millis(500),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn search_returns_a_legal_move() {
        let board = Board::new([0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5]);
        let legal = board.legal_moves();
        let mut driver = Driver::new();
        let config = fast_config();
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let (mv, stats) = driver.search(board, &config, &mut rng, 0);
        assert!(legal.contains(&mv));
        assert!(stats.iterations > 0);
    }

    #[test]
    fn single_legal_move_short_circuits_search() {
        // R's only cube sits at (5,0): dirs 0 and 2 run off the board, leaving
        // exactly one legal ordinary move (dir 1, to (5,1)).
        let r_square = 5 * BOARD_SIDE;
        let b_square = 5;
        let board = Board::from_parts(&[(Color::R, 0, r_square), (Color::B, 0, b_square)], [1, 1], Color::R);
        let expected = Move::ordinary(0, 1);
        assert_eq!(board.legal_moves(), vec![expected]);

        let mut driver = Driver::new();
        let config = SearchConfig { iteration_cap: 1, ..SearchConfig::default() };
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let (mv, stats) = driver.search(board, &config, &mut rng, 0);
        assert_eq!(mv, expected);
        assert_eq!(stats.iterations, 0);
    }

    #[test]
    fn pass_only_position_short_circuits_without_iterating() {
        // R's only cube sits in B's home corner: all three of R's forward
        // directions run off the board, so the only legal move is a pass.
        let r_square = B_CORNER;
        let b_square = 1;
        let board = Board::from_parts(&[(Color::R, 0, r_square), (Color::B, 0, b_square)], [1, 1], Color::R);
        assert_eq!(board.legal_moves(), vec![Move::PASS]);
        assert_eq!(board.winner(), Color::Other);

        let mut driver = Driver::new();
        let config = SearchConfig { iteration_cap: 100, ..SearchConfig::default() };
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let (mv, stats) = driver.search(board, &config, &mut rng, 0);
        assert_eq!(mv, Move::PASS);
        assert_eq!(stats.iterations, 0);
    }

    #[test]
    fn progressive_prune_drops_a_confidently_worse_child() {
        // Two qualifying children of an R-to-move root: A (mean 0.9, sigma 0.1)
        // clearly dominates B (mean 0.1, sigma 0.1) once both have enough visits.
        let board = Board::new([0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5]);
        let config = SearchConfig { pp_min_visits: 5, pp_alpha: 0.1, pp_epsilon: 10.0, ..SearchConfig::default() };

        let mut driver = Driver::new();
        let root = driver.push(Node::root(board.clone()));

        let legal = board.legal_moves();
        let mv_a = legal[0];
        let mv_b = legal[1];

        let mut child_a = Node::child(root, mv_a, board.clone());
        seed_stats(&mut child_a, 10, 0.9, 0.1);
        let a = driver.push(child_a);

        let mut child_b = Node::child(root, mv_b, board.clone());
        seed_stats(&mut child_b, 10, 0.1, 0.1);
        let b = driver.push(child_b);

        driver.arena[root].children = vec![a, b];
        driver.arena[root].live_children = 2;

        driver.progressive_prune(root, &config);

        assert!(!driver.arena[a].pruned);
        assert!(driver.arena[b].pruned);
        assert_eq!(driver.arena[root].live_children, 1);
    }

    fn seed_stats(node: &mut Node, visits: u64, mean: f64, std_dev: f64) {
        node.visits = visits;
        node.value_sum = mean * visits as f64;
        node.value_sq_sum = (mean * mean + std_dev * std_dev) * visits as f64;
    }

    #[test]
    fn iteration_count_never_exceeds_cap_plus_batch() {
        let board = Board::new([0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5]);
        let mut driver = Driver::new();
        let config = SearchConfig { iteration_cap: 100, batch_size: 30, time_budget: Duration::from_secs(30), ..SearchConfig::default() };
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let (_, stats) = driver.search(board, &config, &mut rng, 0);
        assert!(stats.iterations <= config.iteration_cap + config.batch_size as u64);
    }
}
