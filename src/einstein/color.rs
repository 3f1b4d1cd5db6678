use crate::einstein::prelude::*;

/// A side, a cell occupant, or a game outcome. EinStein würfelt nicht! only
/// ever has two sides, but a board cell can be empty and a game can be
/// undecided or drawn, so all four states share one type throughout.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    R = 0,
    B = 1,
    /// Both home corners are cross-occupied with equal rank: a draw.
    NoOne = 2,
    /// The game has not yet reached a terminal position.
    Other = 3,
}

impl Color {
    /// The row/column index used to look up this side's own tables.
    /// Panics if called on `NoOne` or `Other`, which never own cubes.
    pub fn index(&self) -> usize {
        match self {
            Color::R => 0,
            Color::B => 1,
            _ => panic!("{:?} is not a playing side", self),
        }
    }

    pub fn opponent(&self) -> Color {
        match self {
            Color::R => Color::B,
            Color::B => Color::R,
            other => *other,
        }
    }

    pub fn is_side(&self) -> bool {
        matches!(self, Color::R | Color::B)
    }
}
