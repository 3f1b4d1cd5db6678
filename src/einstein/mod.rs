/*
 *  An implementation of EinStein würfelt nicht! in Rust.
 */

pub(crate) mod board;
pub(crate) mod classify;
pub(crate) mod color;
pub mod consts;
pub mod notation;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, Move, MoveRecord},
        classify::MoveClass,
        color::Color,
        consts::*,
        notation::*,
    };
}
