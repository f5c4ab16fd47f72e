/*
memory.rs

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

//! Store that keeps the progress and the score boards in memory.
//!
//! Used by embedders that persist the data themselves, and by the tests.

use std::error::Error;

use super::ProgressStore;
use crate::highscores::HighScores;
use crate::progress::{LevelProgress, LevelScore};

/// In-memory [`ProgressStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    /// Last saved progress.
    pub progress: Option<LevelProgress>,

    /// Score boards.
    pub scores: HighScores,

    /// Number of times the progress was saved.
    pub saves: usize,
}

impl MemoryStore {
    /// Create an empty [`MemoryStore`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`MemoryStore`] object with a saved progress.
    pub fn with_progress(progress: LevelProgress) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load_progress(&self) -> Result<Option<LevelProgress>, Box<dyn Error>> {
        Ok(self.progress.clone())
    }

    fn save_progress(&mut self, progress: &LevelProgress) -> Result<(), Box<dyn Error>> {
        self.progress = Some(progress.clone());
        self.saves += 1;
        Ok(())
    }

    fn delete_progress(&mut self) {
        self.progress = None;
    }

    fn load_scores(&self) -> Result<HighScores, Box<dyn Error>> {
        Ok(self.scores.clone())
    }

    fn save_score(&mut self, score: &LevelScore) -> Result<Option<usize>, Box<dyn Error>> {
        Ok(self.scores.add_score(*score))
    }
}
