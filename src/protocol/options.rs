use std::time::Duration;

use clap::Parser;

use crate::prelude::*;

#[derive(Clone, Debug, Parser)]
pub struct AgentOptions {
    #[arg(long)]
    pub log_level: Option<String>,

    /// A name recorded in the log file's filename, to tell apart multiple
    /// tuning variants running side by side.
    #[arg(long, default_value = "default")]
    pub variant_name: String,

    #[arg(long)]
    pub exploration_c: Option<f64>,

    #[arg(long)]
    pub iteration_cap: Option<u64>,

    #[arg(long)]
    pub time_cap_secs: Option<f64>,

    #[arg(long)]
    pub batch_size: Option<u32>,

    #[arg(long)]
    pub pp_min_visits: Option<u64>,

    #[arg(long)]
    pub pp_alpha: Option<f64>,

    #[arg(long)]
    pub pp_epsilon: Option<f64>,

    #[arg(long, default_value_t = false)]
    pub stochastic: bool,

    #[arg(long)]
    pub weight_capture: Option<u32>,

    #[arg(long)]
    pub weight_quiet: Option<u32>,

    #[arg(long)]
    pub weight_self_capture: Option<u32>,

    /// Seeds the single PRNG shared by the whole agent for this process.
    /// Omit to seed from the wall clock.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentOptions {
    pub fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::default();

        if let Some(c) = self.exploration_c {
            config.exploration_c = c;
        }
        if let Some(cap) = self.iteration_cap {
            config.iteration_cap = cap;
        }
        if let Some(secs) = self.time_cap_secs {
            config.time_budget = Duration::from_secs_f64(secs);
        }
        if let Some(k) = self.batch_size {
            config.batch_size = k;
        }
        if let Some(n) = self.pp_min_visits {
            config.pp_min_visits = n;
        }
        if let Some(alpha) = self.pp_alpha {
            config.pp_alpha = alpha;
        }
        if let Some(epsilon) = self.pp_epsilon {
            config.pp_epsilon = epsilon;
        }
        if self.stochastic {
            config.ordering.mode = OrderingMode::Stochastic;
        }
        if let Some(w) = self.weight_capture {
            config.ordering.weights.capture = w;
        }
        if let Some(w) = self.weight_quiet {
            config.ordering.weights.quiet = w;
        }
        if let Some(w) = self.weight_self_capture {
            config.ordering.weights.self_capture = w;
        }

        config
    }
}
