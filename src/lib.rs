//! A falling block simulator.
//!
//! The board is a [`CellSet`] of occupied cells. Blocks ([`Shape`]) enter at a horizontal
//! [placement](board::placements), [fall](board::fall) until something stops them, and are
//! merged into the board.

pub mod board;
mod cell;
mod game;
mod shape;

pub use cell::{Cell, CellSet};
pub use game::{Game, GameError};
pub use shape::{rotate, Shape};

/// Default board width, in cells.
pub const WIDTH: u16 = 32;
/// Default board height, in cells.
pub const HEIGHT: u16 = 32;

static_assertions::assert_impl_all!(Cell: Copy, Ord, std::hash::Hash);
static_assertions::assert_impl_all!(CellSet: Clone, Eq, FromIterator<Cell>);
