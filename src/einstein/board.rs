use crate::einstein::prelude::*;

/// One of the six uniquely-ranked cubes belonging to a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cube {
    pub color: Color,
    pub rank: u8,
}

/// A single half-move: either an ordinary (rank, direction) pair, or one
/// of the two out-of-band sentinels used on the wire. `legal_moves` never
/// yields `UNDO` — that sentinel is only ever handed to a board from the
/// protocol layer, which calls `undo_move` directly instead of routing it
/// through `make_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub rank: u8,
    pub dir: u8,
}

impl Move {
    pub const PASS: Move = Move { rank: 15, dir: 15 };
    pub const UNDO: Move = Move { rank: 16, dir: 16 };

    pub fn ordinary(rank: u8, dir: u8) -> Move {
        Move { rank, dir }
    }

    pub fn is_pass(&self) -> bool {
        *self == Move::PASS
    }

    pub fn is_undo(&self) -> bool {
        *self == Move::UNDO
    }
}

/// Enough information to reverse exactly one `make_move` call.
#[derive(Clone, Copy, Debug)]
pub struct MoveRecord {
    pub mover: Color,
    pub was_pass: bool,
    pub from: usize,
    pub to: usize,
    pub captured: Option<Cube>,
}

/// The 6x6 board: cube placement, remaining counts, side to move, and
/// enough history to undo back to the start of the game.
///
/// Squares are linear indices `row * BOARD_SIDE + col`. A captured cube
/// simply has no entry in `positions`/`present` and no cell in `grid` —
/// there is no sentinel coordinate to keep in sync by hand.
#[derive(Clone, Debug)]
pub struct Board {
    grid: [Option<Cube>; NUM_SQUARES],
    positions: [[Option<(usize, usize)>; NUM_CUBES]; 2],
    present: [[bool; NUM_CUBES]; 2],
    remaining: [u8; 2],
    side_to_move: Color,
    turn_cnt: u32,
    winner: Color,
    history: Vec<MoveRecord>,
}

impl Board {
    /// Builds the starting position from two rank permutations. `perm[j]`
    /// is the rank occupying that side's `j`-th canonical starting square.
    pub fn new(perm_r: [u8; NUM_CUBES], perm_b: [u8; NUM_CUBES]) -> Board {
        let mut grid = [None; NUM_SQUARES];
        let mut positions = [[None; NUM_CUBES]; 2];
        let mut present = [[false; NUM_CUBES]; 2];

        for (squares, perm, color) in [
            (&R_INITIAL_SQUARES, &perm_r, Color::R),
            (&B_INITIAL_SQUARES, &perm_b, Color::B),
        ] {
            let ci = color.index();
            for (square, &rank) in squares.iter().zip(perm.iter()) {
                positions[ci][rank as usize] = Some(*square);
                present[ci][rank as usize] = true;
                grid[Self::index(*square)] = Some(Cube { color, rank });
            }
        }

        Board {
            grid,
            positions,
            present,
            remaining: [NUM_CUBES as u8, NUM_CUBES as u8],
            side_to_move: Color::R,
            turn_cnt: 1,
            winner: Color::Other,
            history: Vec::new(),
        }
    }

    // -- coordinate helpers --------------------------------------------

    fn index((row, col): (usize, usize)) -> usize {
        row * BOARD_SIDE + col
    }

    fn coord(idx: usize) -> (usize, usize) {
        (idx / BOARD_SIDE, idx % BOARD_SIDE)
    }

    fn direction(color: Color, dir: u8) -> (isize, isize) {
        match (color, dir) {
            (Color::R, 0) => (1, 0),
            (Color::R, 1) => (0, 1),
            (Color::R, 2) => (1, 1),
            (Color::B, 0) => (-1, 0),
            (Color::B, 1) => (0, -1),
            (Color::B, 2) => (-1, -1),
            _ => panic!("direction {dir} is not valid for {color:?}"),
        }
    }

    /// The square a (color, rank) cube would land on by moving in `dir`,
    /// or `None` if the cube is gone or the destination is off-board.
    pub(crate) fn destination(&self, color: Color, rank: u8, dir: u8) -> Option<(usize, usize)> {
        let (row, col) = self.positions[color.index()][rank as usize]?;
        let (dr, dc) = Self::direction(color, dir);
        let nr = row as isize + dr;
        let nc = col as isize + dc;
        if nr < 0 || nc < 0 || nr >= BOARD_SIDE as isize || nc >= BOARD_SIDE as isize {
            None
        } else {
            Some((nr as usize, nc as usize))
        }
    }

    /// The far corner a side is racing its cubes toward: B's starting
    /// corner for R, R's starting corner for B.
    pub(crate) fn finish_corner(color: Color) -> (usize, usize) {
        match color {
            Color::R => Self::coord(B_CORNER),
            Color::B => Self::coord(R_CORNER),
            _ => panic!("{color:?} has no finish corner"),
        }
    }

    /// Whether `dest` lies in the 2x2 block anchored on `color`'s finish corner.
    pub(crate) fn near_finish_block(color: Color, dest: (usize, usize)) -> bool {
        let (fr, fc) = Self::finish_corner(color);
        let rows = if fr == 0 { 0..=1 } else { (BOARD_SIDE - 2)..=(BOARD_SIDE - 1) };
        let cols = if fc == 0 { 0..=1 } else { (BOARD_SIDE - 2)..=(BOARD_SIDE - 1) };
        rows.contains(&dest.0) && cols.contains(&dest.1)
    }

    // -- queries ---------------------------------------------------------

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_cnt
    }

    pub fn winner(&self) -> Color {
        self.winner
    }

    pub fn cube_at(&self, row: usize, col: usize) -> Option<Cube> {
        self.grid[Self::index((row, col))]
    }

    pub fn remaining(&self, color: Color) -> u8 {
        self.remaining[color.index()]
    }

    /// The lowest rank this side still has on the board, if any.
    pub fn smallest_surviving_rank(&self, color: Color) -> Option<u8> {
        let ci = color.index();
        (0..NUM_CUBES as u8).find(|&rank| self.present[ci][rank as usize])
    }

    /// All legal moves for the side to move. Never empty: a side with no
    /// on-board destination for any of its cubes must pass.
    pub fn legal_moves(&self) -> Vec<Move> {
        let color = self.side_to_move;
        let ci = color.index();
        let mut moves = Vec::new();
        for rank in 0..NUM_CUBES as u8 {
            if !self.present[ci][rank as usize] {
                continue;
            }
            for dir in 0..3u8 {
                if self.destination(color, rank, dir).is_some() {
                    moves.push(Move::ordinary(rank, dir));
                }
            }
        }
        if moves.is_empty() {
            moves.push(Move::PASS);
        }
        moves
    }

    // -- mutation ----------------------------------------------------------

    fn advance_turn(&mut self) {
        if self.side_to_move == Color::B {
            self.turn_cnt += 1;
        }
        self.side_to_move = self.side_to_move.opponent();
    }

    fn retreat_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        if self.side_to_move == Color::B {
            self.turn_cnt -= 1;
        }
    }

    fn compute_winner(&self) -> Color {
        if self.remaining[Color::B.index()] == 0 {
            return Color::R;
        }
        if self.remaining[Color::R.index()] == 0 {
            return Color::B;
        }
        let r_corner = self.grid[R_CORNER];
        let b_corner = self.grid[B_CORNER];
        if let (Some(rc), Some(bc)) = (r_corner, b_corner) {
            if rc.color == Color::B && bc.color == Color::R {
                return match rc.rank.cmp(&bc.rank) {
                    std::cmp::Ordering::Greater => Color::R,
                    std::cmp::Ordering::Less => Color::B,
                    std::cmp::Ordering::Equal => Color::NoOne,
                };
            }
        }
        Color::Other
    }

    /// Applies a legal move, updating occupancy, remaining counts, the
    /// turn counter and winner. Returns an error if `mv` is not in
    /// `legal_moves()` — a caller asking for an illegal move is a bug,
    /// not a recoverable condition, but we report it rather than panic
    /// so callers (and tests) can observe the failure.
    pub fn make_move(&mut self, mv: Move) -> Result<()> {
        if !self.legal_moves().contains(&mv) {
            return Err(anyhow!("{mv:?} is not legal for {:?} in this position", self.side_to_move));
        }

        let color = self.side_to_move;
        if mv.is_pass() {
            self.history.push(MoveRecord { mover: color, was_pass: true, from: 0, to: 0, captured: None });
            self.advance_turn();
            return Ok(());
        }

        let ci = color.index();
        let from = self.positions[ci][mv.rank as usize].expect("legal move implies the cube is present");
        let to = self.destination(color, mv.rank, mv.dir).expect("legal move implies an on-board destination");
        let from_idx = Self::index(from);
        let to_idx = Self::index(to);

        let captured = self.grid[to_idx];
        if let Some(cube) = captured {
            let cap_ci = cube.color.index();
            self.remaining[cap_ci] -= 1;
            self.positions[cap_ci][cube.rank as usize] = None;
            self.present[cap_ci][cube.rank as usize] = false;
        }

        self.grid[to_idx] = self.grid[from_idx].take();
        self.positions[ci][mv.rank as usize] = Some(to);

        self.history.push(MoveRecord { mover: color, was_pass: false, from: from_idx, to: to_idx, captured });
        self.winner = self.compute_winner();
        self.advance_turn();
        Ok(())
    }

    /// Reverses the most recent `make_move`. A no-op on an empty history.
    pub fn undo_move(&mut self) {
        let Some(rec) = self.history.pop() else { return };
        self.retreat_turn();
        if rec.was_pass {
            return;
        }

        let mover_ci = rec.mover.index();
        let moved = self.grid[rec.to].expect("undo target must hold the cube that moved there");
        self.grid[rec.from] = Some(moved);
        self.positions[mover_ci][moved.rank as usize] = Some(Self::coord(rec.from));

        match rec.captured {
            Some(cube) => {
                self.grid[rec.to] = Some(cube);
                let cap_ci = cube.color.index();
                self.positions[cap_ci][cube.rank as usize] = Some(Self::coord(rec.to));
                self.present[cap_ci][cube.rank as usize] = true;
                self.remaining[cap_ci] += 1;
            }
            None => {
                self.grid[rec.to] = None;
            }
        }

        self.winner = self.compute_winner();
    }

    /// Builds a board from an explicit cube layout instead of the starting
    /// permutations, for exercising positions `new` can never produce
    /// (terminal corner configurations, a side with a single stranded
    /// cube). Test-only: production code always starts from `new`.
    #[cfg(test)]
    pub(crate) fn from_parts(placements: &[(Color, u8, usize)], remaining: [u8; 2], side_to_move: Color) -> Board {
        let mut grid = [None; NUM_SQUARES];
        let mut positions = [[None; NUM_CUBES]; 2];
        let mut present = [[false; NUM_CUBES]; 2];

        for &(color, rank, square) in placements {
            let ci = color.index();
            grid[square] = Some(Cube { color, rank });
            positions[ci][rank as usize] = Some(Self::coord(square));
            present[ci][rank as usize] = true;
        }

        let mut board = Board {
            grid,
            positions,
            present,
            remaining,
            side_to_move,
            turn_cnt: 1,
            winner: Color::Other,
            history: Vec::new(),
        };
        board.winner = board.compute_winner();
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Board {
        Board::new([0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5])
    }

    #[test]
    fn starting_position_has_twelve_cubes() {
        let b = fresh();
        assert_eq!(b.remaining(Color::R), 6);
        assert_eq!(b.remaining(Color::B), 6);
        assert_eq!(b.winner(), Color::Other);
        assert_eq!(b.side_to_move(), Color::R);
    }

    #[test]
    fn legal_moves_never_empty() {
        let b = fresh();
        assert!(!b.legal_moves().is_empty());
    }

    #[test]
    fn make_move_then_undo_restores_position() {
        let mut b = fresh();
        let before = format!("{:?}", b.grid);
        let mv = b.legal_moves()[0];
        b.make_move(mv).unwrap();
        assert_ne!(format!("{:?}", b.grid), before);
        b.undo_move();
        assert_eq!(format!("{:?}", b.grid), before);
        assert_eq!(b.side_to_move(), Color::R);
        assert_eq!(b.turn_count(), 1);
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut b = fresh();
        let legal = b.legal_moves();
        let illegal = (0..NUM_CUBES as u8)
            .flat_map(|rank| (0..3u8).map(move |dir| Move::ordinary(rank, dir)))
            .find(|mv| !legal.contains(mv))
            .expect("some rank/direction pair must be illegal in the opening position");
        assert!(b.make_move(illegal).is_err());
    }

    #[test]
    fn capturing_reduces_remaining_and_clears_presence() {
        // R's rank 0 sits one diagonal step from B's rank 5; dir 2 is (1,1) for R.
        let from = 2 * BOARD_SIDE + 2;
        let to = 3 * BOARD_SIDE + 3;
        let mut b = Board::from_parts(&[(Color::R, 0, from), (Color::B, 5, to)], [1, 1], Color::R);

        let mv = Move::ordinary(0, 2);
        assert!(b.legal_moves().contains(&mv));

        b.make_move(mv).unwrap();
        assert_eq!(b.remaining(Color::B), 0);
        assert_eq!(b.smallest_surviving_rank(Color::B), None);
        assert_eq!(b.cube_at(3, 3), Some(Cube { color: Color::R, rank: 0 }));
        assert_eq!(b.cube_at(2, 2), None);
    }

    #[test]
    fn undo_after_a_capture_restores_the_captured_cube() {
        let from = 2 * BOARD_SIDE + 2;
        let to = 3 * BOARD_SIDE + 3;
        let mut b = Board::from_parts(&[(Color::R, 0, from), (Color::B, 5, to)], [1, 1], Color::R);

        b.make_move(Move::ordinary(0, 2)).unwrap();
        b.undo_move();

        assert_eq!(b.remaining(Color::B), 1);
        assert_eq!(b.cube_at(2, 2), Some(Cube { color: Color::R, rank: 0 }));
        assert_eq!(b.cube_at(3, 3), Some(Cube { color: Color::B, rank: 5 }));
        assert_eq!(b.side_to_move(), Color::R);
    }

    #[test]
    fn smallest_surviving_rank_tracks_captures() {
        let b = fresh();
        assert_eq!(b.smallest_surviving_rank(Color::R), Some(0));
    }

    #[test]
    fn compute_winner_corner_cross_favors_the_higher_rank() {
        // B's rank 5 sits in R's home corner, R's rank 0 sits in B's home corner: R wins.
        let b = Board::from_parts(&[(Color::B, 5, R_CORNER), (Color::R, 0, B_CORNER)], [1, 1], Color::R);
        assert_eq!(b.compute_winner(), Color::R);

        let b = Board::from_parts(&[(Color::B, 0, R_CORNER), (Color::R, 5, B_CORNER)], [1, 1], Color::R);
        assert_eq!(b.compute_winner(), Color::B);
    }

    #[test]
    fn compute_winner_corner_cross_is_a_draw_on_equal_ranks() {
        let b = Board::from_parts(&[(Color::B, 0, R_CORNER), (Color::R, 0, B_CORNER)], [1, 1], Color::R);
        assert_eq!(b.compute_winner(), Color::NoOne);
    }

    #[test]
    fn compute_winner_declares_the_side_with_surviving_cubes_once_the_other_has_none() {
        let b = Board::from_parts(&[(Color::B, 0, 1)], [0, 1], Color::R);
        assert_eq!(b.compute_winner(), Color::B);
    }
}
