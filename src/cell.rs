use derive_more::{Add, Display, From};
use std::collections::{btree_set, BTreeSet};

/// A coordinate on the board. `x` grows rightward, `y` grows downward.
///
/// Coordinates are plain `i32`s. Board sides fit in a `u16`, so moving a cell by a
/// board-sized offset stays far from overflow; [`CellSet::translate`] doesn't check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, From, Add, Display)]
#[display(fmt = "({}, {})", x, y)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, From)]
// choice: BTreeSet, not HashSet, so iteration (and therefore rendering, debug output and
//         random sampling over derived lists) is deterministic
pub struct CellSet(BTreeSet<Cell>);

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from rows of flags, `rows[y][x]` marking `(x, y)` occupied.
    /// Backs the [`grid!`](crate::grid) macro.
    pub fn from_rows(rows: &[&[bool]]) -> Self {
        (0..)
            .zip(rows)
            .flat_map(|(y, row)| {
                (0..)
                    .zip(row.iter())
                    .filter(|(_, occupied)| **occupied)
                    .map(move |(x, _)| Cell::new(x, y))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, cell: impl Into<Cell>) -> bool {
        self.0.contains(&cell.into())
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Cell> {
        self.0.iter()
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        self.iter().map(|&cell| cell + Cell::new(dx, dy)).collect()
    }

    /// Shift the set so that its smallest `x` and smallest `y` are both zero.
    ///
    /// The two minimums are taken independently, so the result need not contain `(0, 0)`.
    /// The empty set normalizes to itself.
    pub fn normalize(&self) -> Self {
        let min_x = self.iter().map(|cell| cell.x).min();
        let min_y = self.iter().map(|cell| cell.y).min();
        match (min_x, min_y) {
            (Some(min_x), Some(min_y)) => self.translate(-min_x, -min_y),
            _ => Self::new(),
        }
    }

    pub fn in_bounds_x(&self, width: i32) -> bool {
        self.iter().all(|cell| (0..width).contains(&cell.x))
    }

    pub fn in_bounds_y(&self, height: i32) -> bool {
        self.iter().all(|cell| (0..height).contains(&cell.y))
    }

    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.in_bounds_x(width) && self.in_bounds_y(height)
    }

    pub fn collides(&self, other: &Self) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    pub fn union(&self, other: &Self) -> Self {
        self.0.union(&other.0).copied().collect()
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(i32, i32); N]> for CellSet {
    fn from(coords: [(i32, i32); N]) -> Self {
        coords.into_iter().map(Cell::from).collect()
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = btree_set::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = &'a Cell;
    type IntoIter = btree_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`CellSet`](crate::CellSet) from rows of `#` (occupied) and `.` (empty).
///
/// ```
/// use blockfall::{grid, CellSet};
/// assert_eq!(
///     grid![
///         [. #],
///         [# #],
///     ],
///     CellSet::from([(1, 0), (0, 1), (1, 1)])
/// );
/// ```
#[macro_export]
macro_rules! grid {
    (@cell #) => {
        true
    };
    (@cell .) => {
        false
    };
    ($([$($cell:tt)*]),* $(,)?) => {
        $crate::CellSet::from_rows(&[ // begin grid
            $(&[ // begin row
                $(
                    $crate::grid!(@cell $cell),
                )*
            ][..]),* // end row
        ]) // end grid
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_macro_reads_rows_top_down() {
        assert_eq!(
            grid![
                [# . .],
                [. . #],
            ],
            CellSet::from([(0, 0), (2, 1)])
        );
    }

    #[test]
    fn empty_grid() {
        assert!(grid![].is_empty());
        assert!(grid![[. .], [. .]].is_empty());
    }

    #[test]
    fn translate_moves_every_cell() {
        assert_eq!(
            CellSet::from([(0, 0), (1, 2)]).translate(3, -1),
            CellSet::from([(3, -1), (4, 1)])
        );
    }

    #[test]
    fn normalize_takes_minimums_independently() {
        // neither cell sits at the minimum of both axes
        let normalized = CellSet::from([(2, 7), (5, 4)]).normalize();
        assert_eq!(normalized, CellSet::from([(0, 3), (3, 0)]));
        assert!(!normalized.contains((0, 0)));
    }

    #[test]
    fn normalize_anchors_at_zero() {
        let normalized = CellSet::from([(-3, 9), (-1, 12), (4, 10)]).normalize();
        assert_eq!(normalized.iter().map(|cell| cell.x).min(), Some(0));
        assert_eq!(normalized.iter().map(|cell| cell.y).min(), Some(0));
    }

    #[test]
    fn normalize_empty() {
        assert_eq!(CellSet::new().normalize(), CellSet::new());
    }

    #[test]
    fn bounds_checks_are_per_axis() {
        let cells = CellSet::from([(0, -2), (3, 1)]);
        assert!(cells.in_bounds_x(4));
        assert!(!cells.in_bounds_x(3));
        assert!(!cells.in_bounds_y(10));
        assert!(!cells.in_bounds(4, 10));
        assert!(CellSet::from([(0, 0), (3, 9)]).in_bounds(4, 10));
    }

    #[test]
    fn empty_set_is_in_bounds() {
        assert!(CellSet::new().in_bounds(0, 0));
    }

    #[test]
    fn collision_needs_a_shared_cell() {
        let a = CellSet::from([(0, 0), (1, 0)]);
        assert!(a.collides(&CellSet::from([(1, 0), (5, 5)])));
        assert!(!a.collides(&CellSet::from([(0, 1), (1, 1)])));
        assert!(!a.collides(&CellSet::new()));
    }

    #[test]
    fn union_deduplicates() {
        let merged = CellSet::from([(0, 0), (1, 0)]).union(&CellSet::from([(1, 0), (2, 0)]));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn cell_display() {
        assert_eq!(Cell::new(-1, 4).to_string(), "(-1, 4)");
    }
}
