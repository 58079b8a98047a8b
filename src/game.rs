use crate::{board, CellSet, Shape};
use log::debug;
use rand::{seq::IndexedRandom, Rng};
use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum GameError {
    #[error("no room to place a {shape} block")]
    NoPlacement { shape: Shape },
}

/// A board being filled by random blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    width: i32,
    height: i32,
    board: CellSet,
    clear_full_rows: bool,
    turn: u64,
}

impl Game {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
            board: CellSet::new(),
            clear_full_rows: false,
            turn: 0,
        }
    }

    /// Clear full rows after every block comes to rest.
    pub fn with_full_rows_cleared(mut self) -> Self {
        self.clear_full_rows = true;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn board(&self) -> &CellSet {
        &self.board
    }

    /// Blocks dropped since the board was last emptied.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Empty the board.
    pub fn reset(&mut self) {
        self.board = CellSet::new();
        self.turn = 0;
    }

    /// Drop `shape` at a random valid placement.
    pub fn drop_shape<R: Rng>(&mut self, shape: Shape, rng: &mut R) -> Result<(), GameError> {
        let moves = board::placements(shape, &self.board, self.width);
        let chosen = moves.choose(rng).ok_or(GameError::NoPlacement { shape })?;
        debug!(
            "turn {}: {shape} chosen from {} placements",
            self.turn,
            moves.len()
        );
        let mut fallen = board::fall(&self.board, chosen, self.height);
        if self.clear_full_rows {
            fallen = board::clear_full_rows(&fallen, self.width);
        }
        self.board = fallen;
        self.turn += 1;
        Ok(())
    }

    /// Drop a random block at a random valid placement.
    ///
    /// On error the board is left as it was.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let shape = rng.random::<Shape>();
        self.drop_shape(shape, rng)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&board::render(&self.board, self.width, self.height))
    }
}
