/*
progression.rs

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

//! Level progression.
//!
//! Every ten levels the puzzle gets one more item, from four items at level 1 up to eight items
//! from level 41.

/// Number of items for the first levels.
pub const MIN_ITEMS: usize = 4;

/// Maximum number of items, whatever the level.
pub const MAX_ITEMS: usize = 8;

/// Number of levels played before adding an item.
pub const LEVELS_PER_ITEM: u32 = 10;

/// Return the number of items for the given level.
///
/// Levels start at 1. Level 0 is handled as level 1.
pub fn item_count_for_level(level: u32) -> usize {
    let step: usize = (level.max(1) - 1) as usize / LEVELS_PER_ITEM as usize;
    MAX_ITEMS.min(MIN_ITEMS + step)
}

/// Return the first and last levels played with the given number of items.
///
/// The last level is None for [`MAX_ITEMS`], which is used for all the remaining levels.
/// Return None if no level uses that number of items.
pub fn level_range_for_item_count(item_count: usize) -> Option<(u32, Option<u32>)> {
    if !(MIN_ITEMS..=MAX_ITEMS).contains(&item_count) {
        return None;
    }
    let first: u32 = (item_count - MIN_ITEMS) as u32 * LEVELS_PER_ITEM + 1;
    if item_count == MAX_ITEMS {
        Some((first, None))
    } else {
        Some((first, Some(first + LEVELS_PER_ITEM - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_count_steps() {
        assert_eq!(item_count_for_level(1), 4);
        assert_eq!(item_count_for_level(10), 4);
        assert_eq!(item_count_for_level(11), 5);
        assert_eq!(item_count_for_level(20), 5);
        assert_eq!(item_count_for_level(40), 7);
        assert_eq!(item_count_for_level(41), 8);
        assert_eq!(item_count_for_level(100), 8);
        assert_eq!(item_count_for_level(0), 4);
    }

    #[test]
    fn item_count_never_decreases() {
        let mut previous: usize = item_count_for_level(1);
        for level in 2..500 {
            let count: usize = item_count_for_level(level);
            assert!(count >= previous, "level {level} decreased");
            assert!(count <= MAX_ITEMS);
            previous = count;
        }
    }

    #[test]
    fn level_ranges() {
        assert_eq!(level_range_for_item_count(4), Some((1, Some(10))));
        assert_eq!(level_range_for_item_count(5), Some((11, Some(20))));
        assert_eq!(level_range_for_item_count(8), Some((41, None)));
        assert_eq!(level_range_for_item_count(3), None);
        assert_eq!(level_range_for_item_count(9), None);
    }
}
