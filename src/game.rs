/*
game.rs

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

//! Manage the status of a level in progress.
//!
//! A [`Game`] holds the visible and the hidden arrangements of a level, the selected item, and the
//! move counter. The number of items at their target position is recomputed after every move,
//! and the game is complete when all the items are at their target position. After that, moves
//! and hints are ignored.
//!
//! The player moves items by selecting two positions in turn: the first call to
//! [`Game::select_or_swap`] selects an item, the second one swaps the two items. Selecting the
//! same position twice clears the selection.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::arrangement::{self, Arrangement, ArrangementError};
use crate::generator::{Generator, GeneratorError, Puzzle};
use crate::hints::HintAllowance;
use crate::item::Item;
use crate::progress::LevelInProgress;
use crate::progression;
use crate::rating;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The position does not exist in the arrangement.
    IndexOutOfRange { index: usize, len: usize },

    /// The visible and the hidden arrangements are inconsistent.
    Invariant(ArrangementError),

    /// A new puzzle has items already at their target position.
    StartsWithMatches(usize),

    /// The puzzle cannot be generated.
    Generator(GeneratorError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::IndexOutOfRange { index, len } => {
                write!(f, "position {index} is out of range (0..{len})")
            }
            GameError::Invariant(e) => write!(f, "invalid puzzle state: {e}"),
            GameError::StartsWithMatches(n) => {
                write!(f, "new puzzle starts with {n} item(s) at their target position")
            }
            GameError::Generator(e) => write!(f, "cannot generate the puzzle: {e}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::IndexOutOfRange { .. } | GameError::StartsWithMatches(_) => None,
            GameError::Invariant(e) => Some(e),
            GameError::Generator(e) => Some(e),
        }
    }
}

impl From<ArrangementError> for GameError {
    fn from(e: ArrangementError) -> Self {
        GameError::Invariant(e)
    }
}

impl From<GeneratorError> for GameError {
    fn from(e: GeneratorError) -> Self {
        GameError::Generator(e)
    }
}

/// Status of the level.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Complete,
}

/// Evolution of the number of matches after a move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Worsened,
    Unchanged,
}

/// Result of a move (a swap or a hint).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Number of items at their target position after the move.
    pub match_count: usize,

    /// Whether the move completed the level.
    pub complete: bool,

    /// Number of matches compared to before the move.
    pub trend: Trend,
}

/// Result of [`Game::select_or_swap`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The item at the given position is now selected.
    Selected(usize),

    /// The player selected the same item again, which cleared the selection.
    Deselected,

    /// The selected item and the item at the given position were swapped.
    Swapped(MoveOutcome),

    /// The level is complete. Nothing changed.
    Ignored,
}

/// Result of [`Game::apply_hint`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// The item at position `fixed` is now at its target position.
    Applied { fixed: usize, outcome: MoveOutcome },

    /// No hint left. The player can ask for a reward.
    Exhausted,

    /// The level is complete. Nothing changed.
    Ignored,
}

/// Data the presentation layer needs to render the level.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub level: u32,
    pub item_count: usize,
    pub items: Vec<Item>,
    pub selected: Option<usize>,
    pub match_count: usize,
    pub move_count: usize,
    pub complete: bool,
    pub stars: Option<u8>,
    pub hints_remaining: u32,
}

/// Manage the status of the level in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Level number, starting at 1.
    level: u32,

    /// Arrangement shown to the player.
    visible: Arrangement,

    /// Hidden arrangement.
    target: Arrangement,

    /// Position of the selected item.
    selected: Option<usize>,

    /// Number of swaps, including the swaps done by hints.
    move_count: usize,

    /// Number of items at their target position. Always up to date.
    match_count: usize,

    status: GameStatus,
}

impl Game {
    /// Create a [`Game`] object from a generated or provided puzzle.
    ///
    /// # Errors
    ///
    /// The method returns an error if the two arrangements are not permutations of the same
    /// distinct items, or if an item of the visible arrangement is already at its target
    /// position.
    pub fn new(level: u32, target: Arrangement, visible: Arrangement) -> Result<Self, GameError> {
        let game: Game = Self::build(level, target, visible)?;
        if game.match_count > 0 {
            return Err(GameError::StartsWithMatches(game.match_count));
        }
        Ok(game)
    }

    /// Validate the arrangements and compute the number of matches.
    fn build(level: u32, target: Arrangement, visible: Arrangement) -> Result<Self, GameError> {
        Self::validate(&target, &visible)?;
        let match_count: usize = arrangement::compare(&visible, &target)?;
        let mut game = Self {
            level,
            visible,
            target,
            selected: None,
            move_count: 0,
            match_count,
            status: GameStatus::InProgress,
        };
        game.update_status();
        Ok(game)
    }

    /// Generate a random puzzle sized for the given level.
    pub fn generate<R: Rng + ?Sized>(
        level: u32,
        generator: &mut Generator,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let item_count: usize = progression::item_count_for_level(level);
        let puzzle: Puzzle = generator.generate(item_count, rng)?;
        info!("Level {level}: new puzzle with {item_count} {}", generator.kind);
        Self::new(level, puzzle.target, puzzle.visible)
    }

    /// Rebuild a [`Game`] object from a saved snapshot.
    ///
    /// The number of matches is recomputed from the arrangements. A saved value that disagrees
    /// is ignored.
    ///
    /// # Errors
    ///
    /// The method returns an error if the arrangements are inconsistent or if the selected
    /// position is out of range.
    pub fn from_snapshot(level: u32, snapshot: &LevelInProgress) -> Result<Self, GameError> {
        let mut game = Self::build(level, snapshot.target.clone(), snapshot.visible.clone())?;
        if let Some(index) = snapshot.selected {
            game.check_index(index)?;
        }
        if game.match_count != snapshot.match_count {
            debug!(
                "Saved match count {} differs from the computed value {}",
                snapshot.match_count, game.match_count
            );
        }
        game.selected = snapshot.selected;
        game.move_count = snapshot.move_count;
        Ok(game)
    }

    /// Return a snapshot of the level for saving.
    pub fn snapshot(&self) -> LevelInProgress {
        LevelInProgress {
            visible: self.visible.clone(),
            target: self.target.clone(),
            move_count: self.move_count,
            match_count: self.match_count,
            selected: self.selected,
        }
    }

    /// Verify that the two arrangements hold the same distinct items.
    fn validate(target: &Arrangement, visible: &Arrangement) -> Result<(), ArrangementError> {
        target.has_distinct_items()?;
        visible.is_permutation_of(target)
    }

    fn check_index(&self, index: usize) -> Result<(), GameError> {
        if index >= self.visible.len() {
            return Err(GameError::IndexOutOfRange {
                index,
                len: self.visible.len(),
            });
        }
        Ok(())
    }

    /// Select the item at the given position, or swap it with the selected item.
    ///
    /// # Errors
    ///
    /// The method returns an error if the position is out of range. The game does not change.
    pub fn select_or_swap(&mut self, index: usize) -> Result<SelectOutcome, GameError> {
        self.check_index(index)?;
        if self.is_complete() {
            return Ok(SelectOutcome::Ignored);
        }

        match self.selected {
            None => {
                self.selected = Some(index);
                Ok(SelectOutcome::Selected(index))
            }
            Some(s) if s == index => {
                self.selected = None;
                Ok(SelectOutcome::Deselected)
            }
            Some(s) => {
                let outcome: MoveOutcome = self.swap(s, index)?;
                Ok(SelectOutcome::Swapped(outcome))
            }
        }
    }

    /// Move one item to its target position and consume one hint.
    ///
    /// The fixed item is the one at the lowest position that is not at its target position, so
    /// the same game always gets the same hints.
    ///
    /// # Errors
    ///
    /// The method returns an error if the arrangements are inconsistent.
    pub fn apply_hint(&mut self, hints: &mut HintAllowance) -> Result<HintOutcome, GameError> {
        if self.is_complete() {
            return Ok(HintOutcome::Ignored);
        }
        if hints.is_exhausted() {
            return Ok(HintOutcome::Exhausted);
        }

        // All positions are correct only when the game is complete
        let Some(wrong) = self.visible.first_mismatch(&self.target) else {
            return Ok(HintOutcome::Ignored);
        };
        let Some(expected) = self.target.get(wrong).copied() else {
            return Ok(HintOutcome::Ignored);
        };
        let Some(current) = self.visible.position(&expected) else {
            return Err(GameError::Invariant(ArrangementError::ItemMismatch));
        };
        if current == wrong {
            return Ok(HintOutcome::Ignored);
        }

        debug!("Hint: moving {expected} from position {current} to {wrong}");
        let outcome: MoveOutcome = self.swap(wrong, current)?;
        hints.spend();
        Ok(HintOutcome::Applied {
            fixed: wrong,
            outcome,
        })
    }

    /// Swap two items, count the move, and refresh the number of matches.
    fn swap(&mut self, a: usize, b: usize) -> Result<MoveOutcome, GameError> {
        let previous: usize = self.match_count;

        self.visible.swap(a, b);
        self.move_count += 1;
        self.selected = None;
        self.match_count = arrangement::compare(&self.visible, &self.target)?;
        self.update_status();

        let trend: Trend = match self.match_count.cmp(&previous) {
            std::cmp::Ordering::Greater => Trend::Improved,
            std::cmp::Ordering::Less => Trend::Worsened,
            std::cmp::Ordering::Equal => Trend::Unchanged,
        };
        debug!(
            "Move {}: swapped {a} and {b}, {} match(es)",
            self.move_count, self.match_count
        );
        Ok(MoveOutcome {
            match_count: self.match_count,
            complete: self.is_complete(),
            trend,
        })
    }

    /// The game is complete when all the items are at their target position. Once complete, the
    /// game stays complete.
    fn update_status(&mut self) {
        if self.status == GameStatus::InProgress && self.match_count == self.item_count() {
            self.status = GameStatus::Complete;
            self.selected = None;
            info!(
                "Level {} complete in {} move(s)",
                self.level, self.move_count
            );
        }
    }

    /// Whether all the items are at their target position.
    pub fn is_complete(&self) -> bool {
        self.status == GameStatus::Complete
    }

    /// Return the status of the level.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Return the number of items at their target position.
    pub fn match_count(&self) -> usize {
        self.match_count
    }

    /// Return the number of moves so far.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Return the number of items in the puzzle.
    pub fn item_count(&self) -> usize {
        self.target.len()
    }

    /// Return the level number.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Return the position of the selected item.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Return the arrangement shown to the player.
    pub fn visible(&self) -> &Arrangement {
        &self.visible
    }

    /// Return the hidden arrangement.
    pub fn target(&self) -> &Arrangement {
        &self.target
    }

    /// Return the rating, or None if the level is not complete.
    pub fn stars(&self) -> Option<u8> {
        if self.is_complete() {
            Some(rating::stars(self.move_count, self.item_count()))
        } else {
            None
        }
    }

    /// Return the data to render the level.
    pub fn view(&self, hints: &HintAllowance) -> GameView {
        GameView {
            level: self.level,
            item_count: self.item_count(),
            items: self.visible.items().to_vec(),
            selected: self.selected,
            match_count: self.match_count,
            move_count: self.move_count,
            complete: self.is_complete(),
            stars: self.stars(),
            hints_remaining: hints.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Color, ItemKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const A: Item = Item::Bottle(Color::Red);
    const B: Item = Item::Bottle(Color::Green);
    const C: Item = Item::Bottle(Color::Blue);
    const D: Item = Item::Bottle(Color::Orange);

    /// Target [A, B, C, D], visible [B, A, D, C]: no match.
    fn sample_game() -> Game {
        Game::new(
            1,
            Arrangement::new(vec![A, B, C, D]),
            Arrangement::new(vec![B, A, D, C]),
        )
        .unwrap()
    }

    fn swap(game: &mut Game, a: usize, b: usize) -> SelectOutcome {
        assert_eq!(game.select_or_swap(a), Ok(SelectOutcome::Selected(a)));
        game.select_or_swap(b).unwrap()
    }

    #[test]
    fn new_game_state() {
        let game = sample_game();
        assert_eq!(game.match_count(), 0);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.selected(), None);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.stars(), None);
    }

    #[test]
    fn end_to_end_four_items() {
        let mut game = sample_game();

        // [A, B, D, C]: two matches
        let outcome = swap(&mut game, 0, 1);
        assert_eq!(
            outcome,
            SelectOutcome::Swapped(MoveOutcome {
                match_count: 2,
                complete: false,
                trend: Trend::Improved,
            })
        );
        assert!(!game.is_complete());

        // [A, D, B, C]: one match
        let outcome = swap(&mut game, 1, 2);
        assert_eq!(
            outcome,
            SelectOutcome::Swapped(MoveOutcome {
                match_count: 1,
                complete: false,
                trend: Trend::Worsened,
            })
        );

        // [A, B, D, C]
        swap(&mut game, 1, 2);
        assert_eq!(game.match_count(), 2);

        // [A, B, C, D]
        let outcome = swap(&mut game, 3, 2);
        assert_eq!(
            outcome,
            SelectOutcome::Swapped(MoveOutcome {
                match_count: 4,
                complete: true,
                trend: Trend::Improved,
            })
        );
        assert!(game.is_complete());
        assert_eq!(game.move_count(), 4);
        assert_eq!(game.stars(), Some(2));
    }

    #[test]
    fn one_match_then_completion() {
        // Target [A, B, C, D], visible [D, A, B, C]
        let mut game = Game::new(
            1,
            Arrangement::new(vec![A, B, C, D]),
            Arrangement::new(vec![D, A, B, C]),
        )
        .unwrap();
        assert_eq!(game.match_count(), 0);

        // [A, D, B, C]
        swap(&mut game, 0, 1);
        assert_eq!(game.match_count(), 1);
        assert!(!game.is_complete());
        // [A, B, D, C]
        swap(&mut game, 1, 2);
        assert_eq!(game.match_count(), 2);
        // [A, B, C, D]
        swap(&mut game, 2, 3);
        assert_eq!(game.match_count(), 4);
        assert!(game.is_complete());
        assert_eq!(game.stars(), Some(3));
    }

    #[test]
    fn selection_toggle() {
        let mut game = sample_game();
        assert_eq!(game.select_or_swap(2), Ok(SelectOutcome::Selected(2)));
        assert_eq!(game.selected(), Some(2));
        assert_eq!(game.select_or_swap(2), Ok(SelectOutcome::Deselected));
        assert_eq!(game.selected(), None);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.visible(), &Arrangement::new(vec![B, A, D, C]));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut game = sample_game();
        game.select_or_swap(1).unwrap();
        let before: Game = game.clone();
        assert_eq!(
            game.select_or_swap(4),
            Err(GameError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn complete_game_ignores_input() {
        let mut game = sample_game();
        swap(&mut game, 0, 1);
        swap(&mut game, 2, 3);
        assert!(game.is_complete());

        let mut hints = HintAllowance::new();
        assert_eq!(game.select_or_swap(0), Ok(SelectOutcome::Ignored));
        assert_eq!(game.apply_hint(&mut hints), Ok(HintOutcome::Ignored));
        assert_eq!(hints.remaining(), 3);
        assert_eq!(game.move_count(), 2);
        assert!(game.is_complete());
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn hints_fix_the_lowest_wrong_position() {
        let mut game = sample_game();
        let mut hints = HintAllowance::new();

        // [B, A, D, C] -> [A, B, D, C]
        assert_eq!(
            game.apply_hint(&mut hints),
            Ok(HintOutcome::Applied {
                fixed: 0,
                outcome: MoveOutcome {
                    match_count: 2,
                    complete: false,
                    trend: Trend::Improved,
                }
            })
        );
        assert_eq!(hints.remaining(), 2);

        // [A, B, D, C] -> [A, B, C, D]
        let outcome = game.apply_hint(&mut hints).unwrap();
        assert!(matches!(outcome, HintOutcome::Applied { fixed: 2, .. }));
        assert!(game.is_complete());
        assert_eq!(game.move_count(), 2);
        assert_eq!(hints.remaining(), 1);
    }

    #[test]
    fn hint_clears_the_selection() {
        let mut game = sample_game();
        let mut hints = HintAllowance::new();
        game.select_or_swap(3).unwrap();
        game.apply_hint(&mut hints).unwrap();
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn exhausted_hints() {
        let mut game = sample_game();
        let mut hints = HintAllowance::with_remaining(0);
        let before: Game = game.clone();
        assert_eq!(game.apply_hint(&mut hints), Ok(HintOutcome::Exhausted));
        assert_eq!(game, before);
        assert_eq!(hints.remaining(), 0);
    }

    #[test]
    fn hints_are_deterministic() {
        let mut generator = Generator::new(ItemKind::Shapes);
        let original: Game =
            Game::generate(45, &mut generator, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(original.item_count(), 8);

        let play = |mut game: Game| {
            let mut hints = HintAllowance::with_remaining(100);
            let mut states: Vec<Arrangement> = Vec::new();
            while !game.is_complete() {
                let wrong: Option<usize> = game.visible().first_mismatch(game.target());
                match game.apply_hint(&mut hints).unwrap() {
                    HintOutcome::Applied { fixed, .. } => assert_eq!(Some(fixed), wrong),
                    other => panic!("unexpected outcome {other:?}"),
                }
                states.push(game.visible().clone());
            }
            states
        };
        let first = play(original.clone());
        let second = play(original);
        assert_eq!(first, second);
        assert!(first.len() < 8);
    }

    #[test]
    fn match_count_is_never_stale() {
        let mut generator = Generator::new(ItemKind::Bottles);
        let mut rng = StdRng::seed_from_u64(2024);
        for level in [1, 15, 27, 33, 50] {
            let mut game: Game = Game::generate(level, &mut generator, &mut rng).unwrap();
            assert_eq!(game.match_count(), 0);
            let n: usize = game.item_count();
            for _ in 0..200 {
                if game.is_complete() {
                    // Completion happens exactly at n matches
                    assert_eq!(game.match_count(), n);
                    break;
                }
                let a: usize = rng.random_range(0..n);
                game.select_or_swap(a).unwrap();
                let b: usize = rng.random_range(0..n);
                game.select_or_swap(b).unwrap();
                assert_eq!(
                    game.match_count(),
                    arrangement::compare(game.visible(), game.target()).unwrap()
                );
                assert_eq!(game.is_complete(), game.match_count() == n);
                assert_eq!(game.visible().is_permutation_of(game.target()), Ok(()));
            }
        }
    }

    #[test]
    fn invalid_arrangements() {
        assert_eq!(
            Game::new(
                1,
                Arrangement::new(vec![A, B, C]),
                Arrangement::new(vec![B, A])
            ),
            Err(GameError::Invariant(ArrangementError::LengthMismatch {
                left: 2,
                right: 3
            }))
        );
        assert_eq!(
            Game::new(
                1,
                Arrangement::new(vec![A, B]),
                Arrangement::new(vec![C, A])
            ),
            Err(GameError::Invariant(ArrangementError::ItemMismatch))
        );
        assert_eq!(
            Game::new(
                1,
                Arrangement::new(vec![A, A]),
                Arrangement::new(vec![A, A])
            ),
            Err(GameError::Invariant(ArrangementError::DuplicatedItem(A)))
        );
    }

    #[test]
    fn new_puzzle_without_matches_only() {
        // Already solved
        assert_eq!(
            Game::new(
                1,
                Arrangement::new(vec![A, B, C, D]),
                Arrangement::new(vec![A, B, C, D])
            ),
            Err(GameError::StartsWithMatches(4))
        );
        // One item in place
        assert_eq!(
            Game::new(
                1,
                Arrangement::new(vec![A, B, C, D]),
                Arrangement::new(vec![A, C, D, B])
            ),
            Err(GameError::StartsWithMatches(1))
        );

        // A saved level in progress can have matches
        let snapshot = LevelInProgress {
            visible: Arrangement::new(vec![A, C, D, B]),
            target: Arrangement::new(vec![A, B, C, D]),
            move_count: 2,
            match_count: 1,
            selected: None,
        };
        let restored: Game = Game::from_snapshot(1, &snapshot).unwrap();
        assert_eq!(restored.match_count(), 1);
        assert!(!restored.is_complete());
    }

    #[test]
    fn snapshot_restore() {
        let mut game = sample_game();
        swap(&mut game, 0, 1);
        game.select_or_swap(3).unwrap();

        let mut snapshot: LevelInProgress = game.snapshot();
        assert_eq!(snapshot.move_count, 1);
        assert_eq!(snapshot.match_count, 2);
        assert_eq!(snapshot.selected, Some(3));

        let json: String = serde_json::to_string(&snapshot).unwrap();
        let restored: Game = Game::from_snapshot(1, &serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(restored, game);

        // A stale match count is recomputed
        snapshot.match_count = 3;
        let restored: Game = Game::from_snapshot(1, &snapshot).unwrap();
        assert_eq!(restored.match_count(), 2);

        snapshot.selected = Some(9);
        assert_eq!(
            Game::from_snapshot(1, &snapshot),
            Err(GameError::IndexOutOfRange { index: 9, len: 4 })
        );
    }

    #[test]
    fn view() {
        let mut game = sample_game();
        let hints = HintAllowance::with_remaining(1);
        game.select_or_swap(0).unwrap();
        let view: GameView = game.view(&hints);
        assert_eq!(view.level, 1);
        assert_eq!(view.item_count, 4);
        assert_eq!(view.items, vec![B, A, D, C]);
        assert_eq!(view.selected, Some(0));
        assert!(!view.complete);
        assert_eq!(view.stars, None);
        assert_eq!(view.hints_remaining, 1);
    }
}
