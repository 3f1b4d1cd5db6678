use regex::Regex;

use crate::einstein::prelude::*;

/// Encodes a wire value (a rank, direction, or one of the 15/16 sentinels)
/// as the single character `'0' + value`.
pub fn encode_char(value: u8) -> char {
    (b'0' + value) as char
}

/// Decodes a wire character back into its value. Any character below `'0'`
/// or representing a value above 16 is a protocol violation.
pub fn decode_char(c: char) -> Result<u8> {
    let byte = c as u32;
    let zero = '0' as u32;
    if byte < zero || byte - zero > 16 {
        return Err(anyhow!("invalid wire character {c:?}"));
    }
    Ok((byte - zero) as u8)
}

/// Encodes a move as its two-character wire representation.
pub fn encode_move(mv: Move) -> String {
    format!("{}{}", encode_char(mv.rank), encode_char(mv.dir))
}

/// Decodes a two-character wire representation into a move.
pub fn decode_move(rank: char, dir: char) -> Result<Move> {
    Ok(Move { rank: decode_char(rank)?, dir: decode_char(dir)? })
}

/// A validated 6-digit rank permutation, as sent at the start of a game.
#[derive(Clone, Copy, Debug)]
pub struct Permutation(pub [u8; NUM_CUBES]);

impl std::str::FromStr for Permutation {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let pattern = Regex::new(r"^[0-5]{6}$")?;
        if !pattern.is_match(s) {
            return Err(anyhow!("invalid permutation string {s:?}"));
        }

        let mut digits = [0u8; NUM_CUBES];
        let mut seen = [false; NUM_CUBES];
        for (i, c) in s.chars().enumerate() {
            let value = c.to_digit(10).unwrap() as u8;
            if seen[value as usize] {
                return Err(anyhow!("permutation string {s:?} repeats rank {value}"));
            }
            seen[value as usize] = true;
            digits[i] = value;
        }

        Ok(Permutation(digits))
    }
}
