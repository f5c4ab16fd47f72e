/*
generator.rs

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

//! Generate random puzzles.
//!
//! A puzzle is composed of two arrangements of the same distinct items:
//!
//! * The target arrangement, hidden from the player.
//! * The visible arrangement, which the player reorders by swapping items.
//!
//! Both arrangements are Fisher-Yates shuffles of the selected items. The visible arrangement is
//! shuffled again until no item is at its target position, so that every puzzle starts with zero
//! matches.
//!
//! The random number generator is provided by the caller. Use a seeded generator, such as
//! [`rand::rngs::StdRng`], to reproduce a puzzle.

use log::debug;
use rand::Rng;
use rand::seq::index;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use crate::arrangement::{self, Arrangement};
use crate::item::{Color, Item, ItemKind, Shape};

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Fewer than two items cannot be arranged without a match.
    TooFewItems(usize),

    /// The alphabet does not have enough distinct items.
    AlphabetTooSmall { requested: usize, available: usize },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeneratorError::TooFewItems(n) => {
                write!(f, "cannot build a puzzle with {n} item(s), at least 2 are required")
            }
            GeneratorError::AlphabetTooSmall {
                requested,
                available,
            } => write!(
                f,
                "cannot select {requested} distinct items, only {available} are available"
            ),
        }
    }
}

impl Error for GeneratorError {}

/// A generated puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Hidden arrangement that the player must find.
    pub target: Arrangement,

    /// Starting arrangement shown to the player.
    pub visible: Arrangement,
}

/// [`Generator`] object.
#[derive(Debug, Default)]
pub struct Generator {
    /// Variant of the game, which defines the items to select.
    pub kind: ItemKind,

    /// Number of visible arrangements that were shuffled during the last generation.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last puzzle.
    pub duration: f32,
}

impl Generator {
    /// Create the object.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            iteration: 0,
            duration: 0.0,
        }
    }

    /// Generate and return a random puzzle of `item_count` items.
    ///
    /// # Errors
    ///
    /// The method returns an error if `item_count` is lower than 2, because the only arrangement
    /// of a single item always matches, or if the alphabet does not have enough items.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        item_count: usize,
        rng: &mut R,
    ) -> Result<Puzzle, GeneratorError> {
        self.iteration = 0;
        self.duration = 0.0;
        let start: Instant = Instant::now();

        if item_count < 2 {
            return Err(GeneratorError::TooFewItems(item_count));
        }

        let items: Vec<Item> = self.select_items(item_count, rng)?;

        let target: Arrangement = Arrangement::new(shuffle(&items, rng));
        let visible: Arrangement = loop {
            self.iteration += 1;
            let candidate: Arrangement = Arrangement::new(shuffle(&items, rng));
            // Both arrangements have the same length by construction
            if arrangement::compare(&candidate, &target) == Ok(0) {
                break candidate;
            }
        };

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Generated {} {} in {} iteration(s) ({}s)",
            item_count, self.kind, self.iteration, self.duration
        );
        Ok(Puzzle { target, visible })
    }

    /// Randomly select `item_count` distinct items from the alphabet.
    ///
    /// For shapes, a subset of shapes and a subset of colors are selected, and then paired.
    fn select_items<R: Rng + ?Sized>(
        &self,
        item_count: usize,
        rng: &mut R,
    ) -> Result<Vec<Item>, GeneratorError> {
        let available: usize = self.kind.alphabet_size();
        if item_count > available {
            return Err(GeneratorError::AlphabetTooSmall {
                requested: item_count,
                available,
            });
        }

        let colors: Vec<Color> = Color::all();
        let color_subset: Vec<Color> = index::sample(rng, colors.len(), item_count)
            .into_iter()
            .map(|i| colors[i])
            .collect();

        let items: Vec<Item> = match self.kind {
            ItemKind::Bottles => color_subset.into_iter().map(Item::Bottle).collect(),
            ItemKind::Shapes => {
                let shapes: Vec<Shape> = Shape::all();
                index::sample(rng, shapes.len(), item_count)
                    .into_iter()
                    .map(|i| shapes[i])
                    .zip(color_subset)
                    .map(|(shape, color)| Item::Shape { shape, color })
                    .collect()
            }
        };
        Ok(items)
    }
}

/// Return a Fisher-Yates shuffle of the given items.
///
/// From the last position down to position 1, the item is exchanged with an item at a uniformly
/// chosen position between 0 and its own position.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled: Vec<T> = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j: usize = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
