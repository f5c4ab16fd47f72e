/*
hints.rs

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

//! Manage the player's hint allowance.
//!
//! The player starts with three hints. When no hint is left, watching a rewarded ad restores the
//! allowance to three hints. The allowance is reset, never increased beyond the refill amount.

use log::debug;

use serde::{Deserialize, Serialize};

/// Number of hints at the start of the game.
pub const DEFAULT_HINTS: u32 = 3;

/// Number of hints after a reward is granted.
pub const REWARD_HINTS: u32 = 3;

/// Manage the hint counter.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintAllowance {
    // Number of hints the player can still use.
    remaining: u32,
}

impl Default for HintAllowance {
    fn default() -> Self {
        Self::new()
    }
}

impl HintAllowance {
    /// Create a [`HintAllowance`] object with [`DEFAULT_HINTS`] hints.
    pub fn new() -> Self {
        Self {
            remaining: DEFAULT_HINTS,
        }
    }

    /// Create a [`HintAllowance`] object from a saved number of hints.
    pub fn with_remaining(remaining: u32) -> Self {
        Self { remaining }
    }

    /// Return the number of hints left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether no hint is left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one hint.
    ///
    /// Return `false`, and do not change the counter, if no hint is left.
    pub fn spend(&mut self) -> bool {
        if self.remaining == 0 {
            debug!("No hint left");
            return false;
        }
        self.remaining -= 1;
        debug!("Hint used: {} left", self.remaining);
        true
    }

    /// Set the number of hints, whatever the previous value.
    pub fn refill(&mut self, amount: u32) {
        debug!("Hints refilled: {} -> {amount}", self.remaining);
        self.remaining = amount;
    }
}
