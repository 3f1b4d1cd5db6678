#![allow(dead_code)]

pub mod agent;
pub mod einstein;
pub mod mcts;
pub mod ordering;
pub mod playout;
pub mod protocol;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::collections::VecDeque;
    }
}

pub mod prelude {
    pub use super::agent::*;
    pub use super::einstein::prelude::*;
    pub use super::mcts::prelude::*;
    pub use super::ordering::*;
    pub use super::playout::*;
    pub use super::protocol::*;
    pub use super::utils::prelude::*;
}
