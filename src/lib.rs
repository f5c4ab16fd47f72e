/*
lib.rs

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

//! Hidden Match: swap the items until they match a hidden arrangement.
//!
//! After each swap, the player only learns how many items are at their target position.
//! The [`host::Host`] object runs a session: it owns the level in progress ([`game::Game`]),
//! the hint allowance ([`hints::HintAllowance`]), and the player progress, and saves them through
//! a [`saver::ProgressStore`].

pub mod arrangement;
pub mod config;
pub mod game;
pub mod generator;
pub mod highscores;
pub mod hints;
pub mod host;
pub mod item;
pub mod progress;
pub mod progression;
pub mod rating;
pub mod reward;
pub mod saver;
