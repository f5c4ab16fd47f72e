/*
saver.rs

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

//! Persistence of the player progress and of the score boards.
//!
//! The game does not know where its data is stored. The session host ([`crate::host::Host`])
//! only uses the [`ProgressStore`] trait:
//!
//! * After every move or hint, the host saves the [`LevelProgress`] object, which includes a
//!   snapshot of the level in progress.
//! * When the player completes a level, the host saves a [`LevelScore`] record.
//!
//! Two implementations are provided: [`FileStore`] keeps JSON files in a data directory, and
//! [`memory::MemoryStore`] keeps everything in memory.

pub mod json;
pub mod memory;

use log::debug;
use std::error::Error;
use std::path::PathBuf;

use self::json::SaverJson;
use crate::config::{HIGHSCORES_FILE, PROGRESS_FILE};
use crate::highscores::HighScores;
use crate::progress::{LevelProgress, LevelScore};

/// Storage used by the session host.
pub trait ProgressStore {
    /// Return the saved progress, or None for a new player.
    fn load_progress(&self) -> Result<Option<LevelProgress>, Box<dyn Error>>;

    /// Save the progress, replacing the previous one.
    fn save_progress(&mut self, progress: &LevelProgress) -> Result<(), Box<dyn Error>>;

    /// Delete the saved progress.
    fn delete_progress(&mut self);

    /// Return the score boards.
    fn load_scores(&self) -> Result<HighScores, Box<dyn Error>>;

    /// Add the result of a completed level to the score boards.
    ///
    /// Return the position in the level board, starting at 1, or None if the score did not make
    /// it to the board.
    fn save_score(&mut self, score: &LevelScore) -> Result<Option<usize>, Box<dyn Error>>;
}

/// Store that saves JSON files in a data directory.
pub struct FileStore {
    progress: SaverJson<LevelProgress>,
    highscores: SaverJson<HighScores>,
}

impl FileStore {
    /// Create a [`FileStore`] object for the given data directory.
    ///
    /// The directory is created when the first file is saved.
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Data directory: {data_dir:?}");
        Self {
            progress: SaverJson::new(&data_dir, PROGRESS_FILE),
            highscores: SaverJson::new(&data_dir, HIGHSCORES_FILE),
        }
    }

    /// Delete all the saved files.
    pub fn delete_all(&mut self) {
        self.progress.delete();
        self.highscores.delete();
    }
}

impl ProgressStore for FileStore {
    fn load_progress(&self) -> Result<Option<LevelProgress>, Box<dyn Error>> {
        self.progress.load()
    }

    fn save_progress(&mut self, progress: &LevelProgress) -> Result<(), Box<dyn Error>> {
        self.progress.store(progress)
    }

    fn delete_progress(&mut self) {
        self.progress.delete();
    }

    fn load_scores(&self) -> Result<HighScores, Box<dyn Error>> {
        Ok(self.highscores.load()?.unwrap_or_default())
    }

    fn save_score(&mut self, score: &LevelScore) -> Result<Option<usize>, Box<dyn Error>> {
        let mut scores: HighScores = self.load_scores()?;
        let position: Option<usize> = scores.add_score(*score);
        self.highscores.store(&scores)?;
        Ok(position)
    }
}
