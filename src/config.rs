/*
config.rs

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

//! Application settings.

use std::path::PathBuf;

/// Name of the application, also used for the data directory.
pub const APPLICATION_NAME: &str = "hidden-match";

/// Version and license notice printed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (C) 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law."
);

/// Name of the file that stores the player progress.
pub const PROGRESS_FILE: &str = "progress.json";

/// Name of the file that stores the score boards.
pub const HIGHSCORES_FILE: &str = "highscores.json";

/// Return the directory where the game saves its files.
///
/// The directory is `hidden-match` under the local data directory of the platform
/// (`$XDG_DATA_HOME` or `~/.local/share` on Linux, `~/Library/Application Support` on macOS,
/// `%LOCALAPPDATA%` on Windows). The current directory is used as a last resort.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APPLICATION_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_named_after_the_application() {
        let dir: PathBuf = default_data_dir();
        assert_eq!(dir.file_name().and_then(|n| n.to_str()), Some(APPLICATION_NAME));
        if let Some(base) = dirs::data_local_dir() {
            assert_eq!(dir, base.join(APPLICATION_NAME));
        }
    }
}
