/*
rating.rs

Copyright 2025 Hervé Quatremain

This file is part of Hidden Match.

Hidden Match is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hidden Match is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hidden Match. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Star rating of a completed puzzle.
//!
//! The rating compares the number of moves with a target number of moves that grows with the
//! number of items: 6 moves for 4 items, plus 2 moves for each additional item.

use crate::progression::MIN_ITEMS;

/// Target number of moves for a puzzle with [`MIN_ITEMS`] items.
const BASE_MOVES: usize = 6;

/// Additional moves allowed for each item above [`MIN_ITEMS`].
const MOVES_PER_ITEM: usize = 2;

/// Return the target number of moves for the given puzzle size.
///
/// Smaller puzzles get a smaller target on the same line: 2 moves for 2 items.
pub fn base_target(item_count: usize) -> usize {
    // BASE_MOVES + (item_count - MIN_ITEMS) * MOVES_PER_ITEM, without going below zero
    (BASE_MOVES + item_count * MOVES_PER_ITEM).saturating_sub(MIN_ITEMS * MOVES_PER_ITEM)
}

/// Return the rating, between 1 and 3 stars.
///
/// Three stars up to 60% of the target number of moves, two stars up to the target, and one star
/// above.
pub fn stars(move_count: usize, item_count: usize) -> u8 {
    let target: usize = base_target(item_count);

    // move_count <= target * 0.6, without floating point
    if move_count * 10 <= target * 6 {
        3
    } else if move_count <= target {
        2
    } else {
        1
    }
}

/// Short comment on the efficiency of the solution.
pub fn star_text(move_count: usize, item_count: usize) -> &'static str {
    match stars(move_count, item_count) {
        3 => "Excellent efficiency!",
        2 => "Good strategy!",
        _ => "Room for improvement!",
    }
}

/// Congratulation message for the given rating.
pub fn performance_message(stars: u8) -> &'static str {
    match stars {
        3 => "Perfect! You're a puzzle master!",
        2 => "Great job! Well solved!",
        _ => "Good work! Keep practicing!",
    }
}
