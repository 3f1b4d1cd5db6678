use std::time::Duration;

use crate::ordering::MoveOrdering;

/// All tunable parameters of one search. Defaults match the values the
/// original engine shipped with.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// UCT exploration constant `C`.
    pub exploration_c: f64,
    /// Rollouts run per expansion/terminal visit, `K`.
    pub batch_size: u32,
    /// Wall-clock budget per move, `T_max`.
    pub time_budget: Duration,
    /// Hard cap on simulated iterations, `I_max`.
    pub iteration_cap: u64,
    /// Minimum visits before a child is eligible for progressive pruning, `N_pp`.
    pub pp_min_visits: u64,
    /// Confidence-interval multiplier, `alpha`.
    pub pp_alpha: f64,
    /// Maximum standard deviation for pruning eligibility, `epsilon`.
    pub pp_epsilon: f64,
    pub ordering: MoveOrdering,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            exploration_c: std::f64::consts::SQRT_2,
            batch_size: 30,
            time_budget: Duration::from_millis(9_500),
            iteration_cap: 200_000,
            pp_min_visits: 200,
            pp_alpha: 0.5,
            pp_epsilon: 0.4,
            ordering: MoveOrdering::default(),
        }
    }
}
