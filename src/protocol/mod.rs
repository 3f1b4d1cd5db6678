mod options;

use std::io::{Read, Write};

use rand::{rngs::StdRng, SeedableRng};

pub use options::AgentOptions;

use crate::prelude::*;

/// Drives the stdio wire protocol: per-game setup, then a strict
/// alternation of "it's our turn, emit a move" and "read the opponent's
/// move (or the undo sentinel)" until the board reaches a terminal state.
///
/// Owns the single pseudo-random generator for the whole process, seeded
/// once at construction. Every game played over a `'y'` continuation draws
/// from this same generator rather than a fresh one, per §5's single
/// shared-generator requirement.
pub struct AgentLoop<I: Read, O: Write> {
    input: I,
    output: O,
    config: SearchConfig,
    rng: StdRng,
}

impl<I: Read, O: Write> AgentLoop<I, O> {
    pub fn new(input: I, output: O, config: SearchConfig, seed: Option<u64>) -> AgentLoop<I, O> {
        let rng = StdRng::seed_from_u64(seed.unwrap_or_else(clock_seed));
        AgentLoop { input, output, config, rng }
    }

    /// Plays games back to back for as long as the peer keeps sending a
    /// continuation character of `'y'`.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.play_one_game()?;
            if self.read_char()? != 'y' {
                break;
            }
        }
        Ok(())
    }

    fn play_one_game(&mut self) -> Result<()> {
        let perm_r = self.read_permutation()?;
        let perm_b = self.read_permutation()?;
        let start = self.read_char()?;
        let mut agent_turn = match start {
            'f' => true,
            's' => false,
            other => return Err(anyhow!("protocol violation: expected 'f' or 's', got {other:?}")),
        };

        let mut agent = EinsteinAgent::new(perm_r.0, perm_b.0, self.config.clone());

        log::info!("new game: agent moves {}", if agent_turn { "first" } else { "second" });

        while agent.winner() == Color::Other {
            if agent_turn {
                let mv = agent.generate_move(&mut self.rng);
                self.write_move(mv)?;
                agent_turn = false;
            } else {
                let mv = self.read_move()?;
                if mv.is_undo() {
                    agent.undo_last_two();
                    continue;
                }
                agent.play_move(mv)?;
                agent_turn = true;
            }
        }

        log::info!("game over: winner {:?}", agent.winner());
        Ok(())
    }

    fn read_char(&mut self) -> Result<char> {
        let mut byte = [0u8; 1];
        self.input.read_exact(&mut byte)?;
        Ok(byte[0] as char)
    }

    fn read_permutation(&mut self) -> Result<Permutation> {
        let mut chars = String::with_capacity(NUM_CUBES);
        for _ in 0..NUM_CUBES {
            chars.push(self.read_char()?);
        }
        chars.parse::<Permutation>()
    }

    fn read_move(&mut self) -> Result<Move> {
        let rank = self.read_char()?;
        let dir = self.read_char()?;
        decode_move(rank, dir)
    }

    fn write_move(&mut self, mv: Move) -> Result<()> {
        write!(self.output, "{}", encode_move(mv))?;
        self.output.flush()?;
        Ok(())
    }
}

/// Seeds the agent's single PRNG from the wall clock, used whenever no
/// explicit `--seed` is given.
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(0)
}
