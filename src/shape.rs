use crate::{Cell, CellSet};
use rand::{
    distr::{Distribution, StandardUniform},
    Rng,
};
use static_assertions::const_assert_eq;
use strum::{Display, EnumCount, EnumIter, EnumString};

/// The seven blocks. They differ only by their cells, see [`Shape::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, EnumCount, Display)]
pub enum Shape {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

const_assert_eq!(<Shape as EnumCount>::COUNT, 7);

impl Shape {
    /// Every shape, in declaration order. Sized by the derived count, so a new variant that
    /// isn't listed here fails to compile.
    pub const ALL: [Shape; <Shape as EnumCount>::COUNT] = [
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::O,
        Shape::S,
        Shape::T,
        Shape::Z,
    ];

    /// The canonical orientation, as `(x, y)` pairs.
    pub const fn coords(self) -> [(i32, i32); 4] {
        match self {
            Shape::I => [(0, 0), (0, 1), (0, 2), (0, 3)],
            Shape::J => [(0, 2), (1, 2), (1, 1), (1, 0)],
            Shape::L => [(1, 2), (0, 2), (0, 1), (0, 0)],
            Shape::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            Shape::S => [(0, 1), (1, 0), (1, 1), (2, 0)],
            Shape::T => [(0, 1), (1, 0), (1, 1), (2, 1)],
            Shape::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
        }
    }

    pub fn cells(self) -> CellSet {
        CellSet::from(self.coords())
    }

    /// The four quarter-turn states.
    ///
    /// State 0 is [`Shape::cells`] as defined. Each later state turns the previous
    /// (already normalized) state by a quarter and normalizes again.
    pub fn rotations(self) -> [CellSet; 4] {
        let first = self.cells();
        let second = rotate(&first);
        let third = rotate(&second);
        let fourth = rotate(&third);
        [first, second, third, fourth]
    }
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        Shape::ALL[rng.random_range(0..Shape::ALL.len())]
    }
}

/// Quarter turn `(x, y) -> (y, -x)`, then normalize.
pub fn rotate(cells: &CellSet) -> CellSet {
    cells
        .iter()
        .map(|&Cell { x, y }| Cell::new(y, -x))
        .collect::<CellSet>()
        .normalize()
}
