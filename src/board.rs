//! Operations on the static board: where a block may enter, where it comes to rest, clearing
//! full rows and drawing it.

use crate::{Cell, CellSet, Shape};
use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Bound,
};

/// Every horizontal translation of every rotation of `shape` that fits in `width` columns and
/// doesn't overlap `board`.
///
/// Rows are not checked, a placement may hang above the visible frame. Symmetric shapes yield
/// the same cells more than once (one entry per rotation that produces them).
pub fn placements(shape: Shape, board: &CellSet, width: i32) -> Vec<CellSet> {
    shape
        .rotations()
        .iter()
        .flat_map(|rotation| (0..width).map(move |dx| rotation.translate(dx, 0)))
        .filter(|candidate| candidate.in_bounds_x(width))
        .filter(|candidate| !board.collides(candidate))
        .collect()
}

/// Move `falling` down one row at a time until the next row would overlap `board` or leave
/// `0..height`, then merge it into `board`.
///
/// If the first step is already blocked, `falling` is merged where it is.
pub fn fall(board: &CellSet, falling: &CellSet, height: i32) -> CellSet {
    if falling.is_empty() {
        return board.clone();
    }
    let mut resting = falling.clone();
    loop {
        // a cell on or past the last row can't move, and stepping it could overflow
        if resting.iter().any(|cell| cell.y >= height - 1) {
            break;
        }
        let next = resting.translate(0, 1);
        if board.collides(&next) || !next.in_bounds_y(height) {
            break;
        }
        resting = next;
    }
    board.union(&resting)
}

/// Rows holding exactly `width` cells.
pub fn full_rows(board: &CellSet, width: i32) -> BTreeSet<i32> {
    let mut rows = BTreeMap::<i32, usize>::new();
    for cell in board {
        *rows.entry(cell.y).or_default() += 1;
    }
    rows
        .into_iter()
        .filter(|(_, count)| i32::try_from(*count) == Ok(width))
        .map(|(y, _)| y)
        .collect()
}

/// Remove full rows, moving every remaining cell down by the number of full rows beneath it.
pub fn clear_full_rows(board: &CellSet, width: i32) -> CellSet {
    let full = full_rows(board, width);
    if full.is_empty() {
        return board.clone();
    }
    board
        .iter()
        .filter(|cell| !full.contains(&cell.y))
        .map(|&Cell { x, y }| {
            let shift: i32 = full
                .range((Bound::Excluded(y), Bound::Unbounded))
                .map(|_| 1)
                .sum();
            Cell::new(x, y + shift)
        })
        .collect()
}

/// Draw `width` by `height` cells of `board` inside a border, `#` for occupied.
///
/// Every line ends in a newline except the bottom border.
pub fn render(board: &CellSet, width: i32, height: i32) -> String {
    let border = "-".repeat(usize::try_from(width).unwrap_or_default() + 2);
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for y in 0..height {
        out.push('|');
        out.extend((0..width).map(|x| if board.contains((x, y)) { '#' } else { ' ' }));
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}
