/*
json.rs

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

//! JSON file holding one serialized object.
//!
//! [`super::FileStore`] uses one [`SaverJson`] per file: the player progress in
//! [`crate::config::PROGRESS_FILE`] and the score boards in [`crate::config::HIGHSCORES_FILE`].
//! The file is written to a temporary sibling first and then renamed over the previous version,
//! so an interrupted save leaves the previous file intact.

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// JSON file that stores a `T` object.
#[derive(Debug)]
pub struct SaverJson<T> {
    path: PathBuf,
    content: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> SaverJson<T> {
    /// Create a [`SaverJson`] object for the `file_name` file in `data_dir`.
    pub fn new(data_dir: &Path, file_name: &str) -> Self {
        let path: PathBuf = data_dir.join(file_name);
        debug!("Save file: {path:?}");
        Self {
            path,
            content: PhantomData,
        }
    }

    /// Path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the object, or return None if the file does not exist yet.
    pub fn load(&self) -> Result<Option<T>, Box<dyn Error>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(serde_json::from_reader(BufReader::new(file))?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file content with the given object.
    pub fn store(&self, object: &T) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let partial: PathBuf = self.path.with_extension("json.partial");
        {
            let mut writer = BufWriter::new(File::create(&partial)?);
            serde_json::to_writer(&mut writer, object)?;
            writer.flush()?;
        }
        fs::rename(&partial, &self.path)?;
        Ok(())
    }

    /// Delete the file. A missing file is not an error.
    pub fn delete(&self) {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                debug!("Cannot delete {:?}: {e}", self.path)
            }
            _ => (),
        }
    }
}
