/*
highscores.rs

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

//! Manage the score boards of the levels.
//!
//! The main object, [`HighScores`], maintains a board of the best results for each level.
//! A result is added each time the player completes a level.
//! See [`crate::saver::FileStore`], which saves and restores the [`HighScores`] object.
//!
//! Results are ordered by number of stars, highest first, and then by number of moves, lowest
//! first.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::progress::LevelScore;

/// Number of entries per board (number of top scores to keep).
const BOARD_SIZE: usize = 10;

/// Board order: [`Ordering::Less`] when `a` ranks before `b`.
fn compare_scores(a: &LevelScore, b: &LevelScore) -> Ordering {
    b.stars.cmp(&a.stars).then(a.moves.cmp(&b.moves))
}

/// Sorted list of the top scores for a level.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct LevelScoreBoard {
    /// Sorted list of the top scores.
    /// The number of scores in this list is controlled by the [`BOARD_SIZE`] constant.
    top: Vec<LevelScore>,
}

impl LevelScoreBoard {
    /// Add a score to the board and return the position in the board, or None if the score does
    /// not make it to the board.
    ///
    /// The returned position starts at 1 (top score). A new score ranks after the existing
    /// scores with the same stars and moves.
    fn add_score(&mut self, score: LevelScore) -> Option<usize> {
        let position: usize = self
            .top
            .iter()
            .position(|s| compare_scores(&score, s) == Ordering::Less)
            .unwrap_or(self.top.len());
        if position >= BOARD_SIZE {
            return None;
        }
        self.top.insert(position, score);
        self.top.truncate(BOARD_SIZE);
        Some(position + 1)
    }
}

/// List of the score boards for the levels.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HighScores {
    /// Map of the [`LevelScoreBoard`] boards indexed by the level number.
    board: HashMap<u32, LevelScoreBoard>,
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        Self {
            board: HashMap::new(),
        }
    }

    /// Add a score to the board of its level and return the position in the board, or None if
    /// the score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score).
    pub fn add_score(&mut self, score: LevelScore) -> Option<usize> {
        self.board.entry(score.level).or_default().add_score(score)
    }

    /// Return the sorted list of [`LevelScore`] for the given level.
    ///
    /// Return None when the board is empty.
    pub fn get_scores(&self, level: u32) -> Option<&Vec<LevelScore>> {
        self.board
            .get(&level)
            .map(|b| &b.top)
            .filter(|top| !top.is_empty())
    }

    /// Return the best score for the given level.
    pub fn best_score(&self, level: u32) -> Option<&LevelScore> {
        self.get_scores(level).and_then(|top| top.first())
    }

    /// Return the levels that have a board, in increasing order.
    pub fn levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = self.board.keys().copied().collect();
        levels.sort_unstable();
        levels
    }

    /// Return whether the list of boards is empty (no board for any level)
    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }
}
