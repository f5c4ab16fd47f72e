/*
progress.rs

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

//! Player progress.
//!
//! [`LevelProgress`] is the record that the persistence layer stores for the player: cumulative
//! results, the current level, the hint allowance, and the level in progress, if any, so that the
//! player can resume it.
//! [`LevelScore`] is the record stored each time the player completes a level.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::arrangement::Arrangement;
use crate::hints::DEFAULT_HINTS;

/// Snapshot of a level in progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelInProgress {
    /// Arrangement shown to the player.
    pub visible: Arrangement,

    /// Hidden arrangement.
    pub target: Arrangement,

    /// Number of moves so far.
    pub move_count: usize,

    /// Number of items at their target position.
    pub match_count: usize,

    /// Position of the selected item.
    pub selected: Option<usize>,
}

/// Result of a completed level.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LevelScore {
    /// Completed level.
    pub level: u32,

    /// Number of moves, including the moves done with hints.
    pub moves: usize,

    /// Rating between 1 and 3 stars.
    pub stars: u8,

    /// Number of items in the puzzle.
    pub item_count: usize,

    /// Completion timestamp.
    pub when: SystemTime,
}

/// Saved progress of the player.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelProgress {
    /// Level being played, starting at 1.
    pub current_level: u32,

    /// Sum of the stars of all the completed levels.
    pub total_stars: u32,

    /// Sum of the moves of all the completed levels.
    pub total_moves: usize,

    /// Number of completed levels.
    pub levels_completed: u32,

    /// Number of hints left.
    #[serde(default = "default_hints")]
    pub hints_remaining: u32,

    /// Level in progress, or None when no move has been done yet in the current level.
    #[serde(default)]
    pub level_in_progress: Option<LevelInProgress>,
}

fn default_hints() -> u32 {
    DEFAULT_HINTS
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelProgress {
    /// Create a [`LevelProgress`] object for a new player.
    pub fn new() -> Self {
        Self {
            current_level: 1,
            total_stars: 0,
            total_moves: 0,
            levels_completed: 0,
            hints_remaining: DEFAULT_HINTS,
            level_in_progress: None,
        }
    }

    /// Add the result of a completed level to the totals.
    ///
    /// The current level does not change: the player moves to the next level with
    /// [`LevelProgress::advance`].
    pub fn record_completion(&mut self, moves: usize, stars: u8) {
        self.total_stars += stars as u32;
        self.total_moves += moves;
        self.levels_completed += 1;
        self.level_in_progress = None;
    }

    /// Move to the next level.
    pub fn advance(&mut self) {
        self.current_level += 1;
        self.level_in_progress = None;
    }

    /// Average number of stars per completed level.
    pub fn average_stars(&self) -> Option<f32> {
        if self.levels_completed == 0 {
            None
        } else {
            Some(self.total_stars as f32 / self.levels_completed as f32)
        }
    }
}
