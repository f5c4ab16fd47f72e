/*
arrangement.rs

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

//! Ordered sequence of items, and the match counting between two sequences.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use crate::item::Item;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrangementError {
    /// The two arrangements do not have the same length.
    LengthMismatch { left: usize, right: usize },

    /// The two arrangements do not contain the same items.
    ItemMismatch,

    /// An item appears more than once in the arrangement.
    DuplicatedItem(Item),
}

impl fmt::Display for ArrangementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArrangementError::LengthMismatch { left, right } => {
                write!(f, "arrangement lengths differ ({left} and {right})")
            }
            ArrangementError::ItemMismatch => {
                write!(f, "arrangements are not permutations of the same items")
            }
            ArrangementError::DuplicatedItem(item) => {
                write!(f, "item {item} appears more than once")
            }
        }
    }
}

impl Error for ArrangementError {}

/// Arrangement object.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Arrangement {
    items: Vec<Item>,
}

impl From<Vec<Item>> for Arrangement {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl Arrangement {
    /// Create an [`Arrangement`] object from a list of items.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the arrangement has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return the item at the given position.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Return the items as a slice.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Exchange two items.
    ///
    /// Panics if one of the indexes is out of range. Callers validate the indexes first.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    /// Return the first position of the given item.
    pub fn position(&self, item: &Item) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// Return the lowest position where the two arrangements differ.
    pub fn first_mismatch(&self, other: &Arrangement) -> Option<usize> {
        self.items
            .iter()
            .zip(other.items.iter())
            .position(|(a, b)| a != b)
    }

    /// Count the positions holding the same item in both arrangements.
    ///
    /// # Errors
    ///
    /// The method returns an error if the arrangements have different lengths.
    pub fn compare(&self, other: &Arrangement) -> Result<usize, ArrangementError> {
        compare(self, other)
    }

    /// Whether all the items are distinct.
    pub fn has_distinct_items(&self) -> Result<(), ArrangementError> {
        let mut seen: HashSet<&Item> = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item) {
                return Err(ArrangementError::DuplicatedItem(*item));
            }
        }
        Ok(())
    }

    /// Verify that the other arrangement holds exactly the same items, in any order.
    pub fn is_permutation_of(&self, other: &Arrangement) -> Result<(), ArrangementError> {
        if self.len() != other.len() {
            return Err(ArrangementError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let mut a: Vec<Item> = self.items.clone();
        let mut b: Vec<Item> = other.items.clone();
        a.sort_unstable();
        b.sort_unstable();
        if a == b {
            Ok(())
        } else {
            Err(ArrangementError::ItemMismatch)
        }
    }
}

/// Count the positions `i` where `a[i] == b[i]`.
///
/// # Errors
///
/// The function returns an error if the two arrangements do not have the same length.
pub fn compare(a: &Arrangement, b: &Arrangement) -> Result<usize, ArrangementError> {
    if a.len() != b.len() {
        return Err(ArrangementError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.items
        .iter()
        .zip(b.items.iter())
        .filter(|(x, y)| x == y)
        .count())
}
