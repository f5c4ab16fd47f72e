/*
item.rs

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

//! Puzzle pieces.
//!
//! A puzzle is played either with colored bottles or with colored shapes. Both variants use the
//! same engine: an [`Item`] only needs structural equality, so the engine never looks at the
//! colors or the shapes themselves.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

/// Number of entries in the [`Color`] alphabet.
pub const COLOR_COUNT: usize = 8;

/// Number of entries in the [`Shape`] alphabet.
pub const SHAPE_COUNT: usize = 8;

/// Item colors.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    FromRepr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Red,
    Green,
    Blue,
    Orange,
    Purple,
    Pink,
    Teal,
    Yellow,
}

/// Item shapes.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    FromRepr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Shape {
    Square,
    Circle,
    Triangle,
    Hexagon,
    Diamond,
    Star,
    Heart,
    Pentagon,
}

impl Color {
    /// Return the color alphabet, in declaration order.
    pub fn all() -> Vec<Color> {
        (0..COLOR_COUNT as u8).filter_map(Color::from_repr).collect()
    }
}

impl Shape {
    /// Return the shape alphabet, in declaration order.
    pub fn all() -> Vec<Shape> {
        (0..SHAPE_COUNT as u8).filter_map(Shape::from_repr).collect()
    }
}

/// Variant of the game, which defines the alphabet the items are drawn from.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    /// Colored bottles.
    #[default]
    Bottles,

    /// Colored shapes.
    Shapes,
}

impl ItemKind {
    /// Number of distinct items available for this variant.
    pub fn alphabet_size(&self) -> usize {
        match self {
            ItemKind::Bottles => COLOR_COUNT,
            ItemKind::Shapes => SHAPE_COUNT.min(COLOR_COUNT),
        }
    }

    /// Name of the items, used in messages ("bottles", "shapes").
    pub fn noun(&self, count: usize) -> &'static str {
        match (self, count) {
            (ItemKind::Bottles, 1) => "bottle",
            (ItemKind::Bottles, _) => "bottles",
            (ItemKind::Shapes, 1) => "shape",
            (ItemKind::Shapes, _) => "shapes",
        }
    }
}

/// A puzzle piece.
///
/// Two items are equal when all their attributes are equal.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Bottle(Color),
    Shape { shape: Shape, color: Color },
}

impl Item {
    /// Color of the item.
    pub fn color(&self) -> Color {
        match self {
            Item::Bottle(color) => *color,
            Item::Shape { color, .. } => *color,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Item::Bottle(color) => write!(f, "{color}"),
            Item::Shape { shape, color } => write!(f, "{color} {shape}"),
        }
    }
}
