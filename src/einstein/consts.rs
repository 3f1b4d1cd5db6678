/// The board is always a 6x6 grid.
pub const BOARD_SIDE: usize = 6;

/// Number of squares on the board.
pub const NUM_SQUARES: usize = BOARD_SIDE * BOARD_SIDE;

/// Each side starts with 6 uniquely-ranked cubes.
pub const NUM_CUBES: usize = 6;

/// Linear index of R's home corner (top-left).
pub const R_CORNER: usize = 0;

/// Linear index of B's home corner (bottom-right).
pub const B_CORNER: usize = NUM_SQUARES - 1;

/// R's cubes start filling these squares, in permutation-string order.
pub const R_INITIAL_SQUARES: [(usize, usize); NUM_CUBES] = [
    (0, 0), (0, 1), (0, 2),
    (1, 0), (1, 1),
    (2, 0),
];

/// B's cubes start filling these squares, in permutation-string order.
pub const B_INITIAL_SQUARES: [(usize, usize); NUM_CUBES] = [
    (3, 5),
    (4, 4), (4, 5),
    (5, 3), (5, 4), (5, 5),
];

/// Number of this side's own moves, from the start of the game, during
/// which the root's self-capturing moves are filtered out of the expansion
/// queue whenever a non-self-capturing alternative exists.
pub const EARLY_GAME_SELF_MOVES: usize = 4;

/// Above this many queued root moves, the self-capture filter applies
/// regardless of how many of the side's own moves have been played.
pub const EARLY_GAME_QUEUE_THRESHOLD: usize = 9;
