/*
host.rs

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

//! Session host.
//!
//! The [`Host`] object owns the level in progress ([`Game`]), the hint allowance, and the player
//! progress, and connects them to the external collaborators:
//!
//! * The store ([`ProgressStore`]) receives the progress after every move or hint, and a score
//!   record when a level is complete. Store failures are reported as [`Notification`]s. They never
//!   change the game.
//! * The reward channel ([`RewardChannel`]) receives the rewarded ad results. Pending results are
//!   applied before every player action, as a reset of the hint allowance.
//!
//! The presentation layer sends player actions to the host and renders the returned
//! [`Update`] objects.

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::SystemTime;

use crate::game::{Game, GameError, GameView, HintOutcome, MoveOutcome, SelectOutcome};
use crate::generator::Generator;
use crate::highscores::HighScores;
use crate::hints::{HintAllowance, REWARD_HINTS};
use crate::item::ItemKind;
use crate::progress::{LevelProgress, LevelScore};
use crate::rating;
use crate::reward::{RewardChannel, RewardEvent, RewardProvider};
use crate::saver::ProgressStore;

/// Message for the player about something that happened outside the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The saved progress cannot be read. The player starts from scratch.
    LoadFailed(String),

    /// The progress or the score cannot be saved. The game goes on.
    SaveFailed(String),

    /// The level in progress was inconsistent and has been replaced by a new puzzle.
    LevelDiscarded(String),

    /// A reward was granted: the hint allowance is back to the given value.
    RewardGranted(u32),

    /// The reward request failed.
    RewardFailed(String),

    /// The completed level made it to the score board, at the given position (starting at 1).
    BoardPosition(usize),
}

/// What the host did with a player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select(SelectOutcome),
    Hint(HintOutcome),

    /// A new puzzle started for the given level.
    LevelStarted(u32),

    /// The action did not apply.
    Nothing,
}

/// Result of a player action.
#[derive(Debug, Clone)]
pub struct Update {
    pub event: Event,

    /// Score record when the action completed the level.
    pub completion: Option<LevelScore>,

    pub notifications: Vec<Notification>,

    /// State of the level after the action.
    pub view: GameView,
}

/// Session host.
pub struct Host<S: ProgressStore> {
    store: S,
    progress: LevelProgress,
    game: Game,
    hints: HintAllowance,
    generator: Generator,
    rng: StdRng,

    /// Seed of the random number generator, for reproducing a session.
    seed: u64,

    rewards: RewardChannel,

    /// Notifications not yet returned to the presentation layer.
    notifications: Vec<Notification>,
}

impl<S: ProgressStore> Host<S> {
    /// Create a [`Host`] object and resume the saved progress, if any.
    ///
    /// When `seed` is None, a random seed is used.
    ///
    /// # Errors
    ///
    /// The method returns an error if a puzzle cannot be generated for the current level.
    pub fn start(store: S, kind: ItemKind, seed: Option<u64>) -> Result<Self, GameError> {
        let seed: u64 = seed.unwrap_or_else(|| rand::rng().random());
        info!("Starting session with seed {seed}");

        let mut notifications: Vec<Notification> = Vec::new();
        let mut progress: LevelProgress = match store.load_progress() {
            Ok(Some(p)) => {
                debug!("Saved progress = {p:?}");
                p
            }
            Ok(None) => {
                debug!("No saved progress");
                LevelProgress::new()
            }
            Err(e) => {
                warn!("Error getting the saved progress: {e}");
                notifications.push(Notification::LoadFailed(e.to_string()));
                LevelProgress::new()
            }
        };
        progress.current_level = progress.current_level.max(1);

        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let mut generator: Generator = Generator::new(kind);
        let level: u32 = progress.current_level;

        let restored: Option<Game> = match &progress.level_in_progress {
            Some(snapshot) => match Game::from_snapshot(level, snapshot) {
                Ok(g) => Some(g),
                Err(e) => {
                    error!("Discarding the saved level {level}: {e}");
                    notifications.push(Notification::LevelDiscarded(e.to_string()));
                    None
                }
            },
            None => None,
        };
        let game: Game = match restored {
            Some(g) => g,
            None => {
                progress.level_in_progress = None;
                Game::generate(level, &mut generator, &mut rng)?
            }
        };

        Ok(Self {
            store,
            hints: HintAllowance::with_remaining(progress.hints_remaining),
            progress,
            game,
            generator,
            rng,
            seed,
            rewards: RewardChannel::new(),
            notifications,
        })
    }

    /// The player tapped the item at the given position.
    ///
    /// # Errors
    ///
    /// The method returns an error if the position is out of range. Nothing changes.
    pub fn tap_index(&mut self, index: usize) -> Result<Update, GameError> {
        self.poll_rewards();
        let mut completion: Option<LevelScore> = None;

        let event: Event = match self.game.select_or_swap(index) {
            Ok(outcome) => {
                if let SelectOutcome::Swapped(m) = outcome {
                    completion = self.after_move(m);
                }
                Event::Select(outcome)
            }
            Err(e @ GameError::IndexOutOfRange { .. }) => return Err(e),
            Err(e) => {
                self.discard_level(e)?;
                Event::LevelStarted(self.game.level())
            }
        };
        Ok(self.update(event, completion))
    }

    /// The player asked for a hint.
    ///
    /// When no hint is left, the returned event is [`HintOutcome::Exhausted`] and the presentation
    /// layer can offer a rewarded ad.
    ///
    /// # Errors
    ///
    /// The method returns an error only if a replacement puzzle cannot be generated.
    pub fn request_hint(&mut self) -> Result<Update, GameError> {
        self.poll_rewards();
        let mut completion: Option<LevelScore> = None;

        let event: Event = match self.game.apply_hint(&mut self.hints) {
            Ok(outcome) => {
                match outcome {
                    HintOutcome::Applied { outcome: m, .. } => completion = self.after_move(m),
                    HintOutcome::Exhausted => info!("No hint left"),
                    HintOutcome::Ignored => (),
                }
                Event::Hint(outcome)
            }
            Err(e) => {
                self.discard_level(e)?;
                Event::LevelStarted(self.game.level())
            }
        };
        Ok(self.update(event, completion))
    }

    /// Ask the provider for a rewarded ad. The result is applied later, by the next action or by
    /// [`Host::wait_for_reward`].
    pub fn request_reward(&self, provider: &dyn RewardProvider) {
        debug!("Requesting a reward");
        provider.request_reward(self.rewards.sender());
    }

    /// Wait for the result of a reward request and apply it.
    pub fn wait_for_reward(&mut self) -> Update {
        if let Some(event) = self.rewards.wait() {
            self.apply_reward(event);
        }
        self.poll_rewards();
        self.update(Event::Nothing, None)
    }

    /// Apply the pending reward results.
    pub fn poll_rewards(&mut self) {
        for event in self.rewards.drain() {
            self.apply_reward(event);
        }
    }

    fn apply_reward(&mut self, event: RewardEvent) {
        match event {
            RewardEvent::Granted => {
                self.hints.refill(REWARD_HINTS);
                info!("Reward granted: {} hints", self.hints.remaining());
                self.progress.hints_remaining = self.hints.remaining();
                self.save_progress();
                self.notifications
                    .push(Notification::RewardGranted(self.hints.remaining()));
            }
            RewardEvent::Failed(reason) => {
                warn!("Reward failed: {reason}");
                self.notifications.push(Notification::RewardFailed(reason));
            }
        }
    }

    /// Start the next level. Ignored if the current level is not complete.
    ///
    /// # Errors
    ///
    /// The method returns an error if the puzzle cannot be generated.
    pub fn next_level(&mut self) -> Result<Update, GameError> {
        self.poll_rewards();
        if !self.game.is_complete() {
            return Ok(self.update(Event::Nothing, None));
        }
        self.progress.advance();
        self.new_game()?;
        self.save_progress();
        Ok(self.update(Event::LevelStarted(self.game.level()), None))
    }

    /// Replace the current level by a new puzzle of the same level.
    ///
    /// # Errors
    ///
    /// The method returns an error if the puzzle cannot be generated.
    pub fn restart(&mut self) -> Result<Update, GameError> {
        self.poll_rewards();
        self.progress.level_in_progress = None;
        self.new_game()?;
        self.save_progress();
        Ok(self.update(Event::LevelStarted(self.game.level()), None))
    }

    /// Return the state of the level.
    pub fn view(&self) -> GameView {
        self.game.view(&self.hints)
    }

    /// Return the notifications not yet reported.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn hints(&self) -> &HintAllowance {
        &self.hints
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the score boards.
    pub fn scores(&self) -> HighScores {
        match self.store.load_scores() {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Error getting the scores: {e}");
                HighScores::new()
            }
        }
    }

    /// Save the state after a move, and record the score when the move completed the level.
    fn after_move(&mut self, outcome: MoveOutcome) -> Option<LevelScore> {
        self.progress.hints_remaining = self.hints.remaining();

        if !outcome.complete {
            self.progress.level_in_progress = Some(self.game.snapshot());
            self.save_progress();
            return None;
        }

        let moves: usize = self.game.move_count();
        let item_count: usize = self.game.item_count();
        let score = LevelScore {
            level: self.game.level(),
            moves,
            stars: rating::stars(moves, item_count),
            item_count,
            when: SystemTime::now(),
        };
        info!(
            "Level {} complete: {} move(s), {} star(s)",
            score.level, score.moves, score.stars
        );
        self.progress.record_completion(score.moves, score.stars);

        match self.store.save_score(&score) {
            Ok(Some(position)) => self
                .notifications
                .push(Notification::BoardPosition(position)),
            Ok(None) => (),
            Err(e) => {
                warn!("Error saving the score: {e}");
                self.notifications.push(Notification::SaveFailed(e.to_string()));
            }
        }
        self.save_progress();
        Some(score)
    }

    fn save_progress(&mut self) {
        if let Err(e) = self.store.save_progress(&self.progress) {
            warn!("Error saving the progress: {e}");
            self.notifications.push(Notification::SaveFailed(e.to_string()));
        }
    }

    fn new_game(&mut self) -> Result<(), GameError> {
        self.game = Game::generate(
            self.progress.current_level,
            &mut self.generator,
            &mut self.rng,
        )?;
        Ok(())
    }

    /// Replace an inconsistent level by a new puzzle.
    fn discard_level(&mut self, e: GameError) -> Result<(), GameError> {
        error!("Discarding level {}: {e}", self.game.level());
        self.notifications
            .push(Notification::LevelDiscarded(e.to_string()));
        self.progress.level_in_progress = None;
        self.new_game()?;
        self.save_progress();
        Ok(())
    }

    fn update(&mut self, event: Event, completion: Option<LevelScore>) -> Update {
        Update {
            event,
            completion,
            notifications: self.take_notifications(),
            view: self.view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrangement::Arrangement;
    use crate::item::{Color, Item};
    use crate::progress::LevelInProgress;
    use crate::saver::memory::MemoryStore;
    use async_channel::Sender;
    use std::error::Error;

    /// Store that fails all the time.
    struct FailingStore;

    impl ProgressStore for FailingStore {
        fn load_progress(&self) -> Result<Option<LevelProgress>, Box<dyn Error>> {
            Err("disk unavailable".into())
        }

        fn save_progress(&mut self, _: &LevelProgress) -> Result<(), Box<dyn Error>> {
            Err("disk full".into())
        }

        fn delete_progress(&mut self) {}

        fn load_scores(&self) -> Result<HighScores, Box<dyn Error>> {
            Err("disk unavailable".into())
        }

        fn save_score(&mut self, _: &LevelScore) -> Result<Option<usize>, Box<dyn Error>> {
            Err("disk full".into())
        }
    }

    /// Provider that answers immediately.
    struct Immediate(RewardEvent);

    impl RewardProvider for Immediate {
        fn request_reward(&self, sender: Sender<RewardEvent>) {
            sender.try_send(self.0.clone()).unwrap();
        }
    }

    /// Swap items until the level is complete, using the hidden arrangement.
    fn solve<S: ProgressStore>(host: &mut Host<S>) -> Update {
        loop {
            let game: &Game = host.game();
            let wrong: usize = game.visible().first_mismatch(game.target()).unwrap();
            let expected: Item = *game.target().get(wrong).unwrap();
            let from: usize = game.visible().position(&expected).unwrap();
            host.tap_index(wrong).unwrap();
            let update: Update = host.tap_index(from).unwrap();
            if update.view.complete {
                return update;
            }
        }
    }

    #[test]
    fn new_player() {
        let host = Host::start(MemoryStore::new(), ItemKind::Bottles, Some(1)).unwrap();
        assert_eq!(host.seed(), 1);
        assert_eq!(host.progress().current_level, 1);
        assert_eq!(host.hints().remaining(), 3);
        let view: GameView = host.view();
        assert_eq!(view.item_count, 4);
        assert_eq!(view.match_count, 0);
        assert_eq!(view.move_count, 0);
    }

    #[test]
    fn moves_are_saved() {
        let mut host = Host::start(MemoryStore::new(), ItemKind::Bottles, Some(2)).unwrap();

        // Selecting does not save
        let update: Update = host.tap_index(0).unwrap();
        assert_eq!(update.event, Event::Select(SelectOutcome::Selected(0)));
        assert_eq!(host.store().saves, 0);

        host.tap_index(1).unwrap();
        assert_eq!(host.store().saves, 1);
        let saved: &LevelProgress = host.store().progress.as_ref().unwrap();
        let snapshot: &LevelInProgress = saved.level_in_progress.as_ref().unwrap();
        assert_eq!(snapshot.move_count, 1);
        assert_eq!(&snapshot.visible, host.game().visible());
        assert_eq!(snapshot.match_count, host.game().match_count());
        assert_eq!(saved.hints_remaining, 3);
    }

    #[test]
    fn out_of_range_tap() {
        let mut host = Host::start(MemoryStore::new(), ItemKind::Bottles, Some(3)).unwrap();
        let before: Game = host.game().clone();
        assert_eq!(
            host.tap_index(4).unwrap_err(),
            GameError::IndexOutOfRange { index: 4, len: 4 }
        );
        assert_eq!(host.game(), &before);
    }

    #[test]
    fn completion_and_next_level() {
        let mut host = Host::start(MemoryStore::new(), ItemKind::Shapes, Some(4)).unwrap();

        // Not complete yet
        assert_eq!(host.next_level().unwrap().event, Event::Nothing);

        let update: Update = solve(&mut host);
        let score: LevelScore = update.completion.unwrap();
        assert_eq!(score.level, 1);
        assert_eq!(score.moves, host.game().move_count());
        assert_eq!(Some(score.stars), update.view.stars);
        assert!(update.notifications.contains(&Notification::BoardPosition(1)));

        let progress: &LevelProgress = host.progress();
        assert_eq!(progress.levels_completed, 1);
        assert_eq!(progress.total_stars, score.stars as u32);
        assert_eq!(progress.total_moves, score.moves);
        assert_eq!(progress.current_level, 1);
        assert!(progress.level_in_progress.is_none());
        assert_eq!(
            host.scores().best_score(1).map(|s| s.moves),
            Some(score.moves)
        );

        let update: Update = host.next_level().unwrap();
        assert_eq!(update.event, Event::LevelStarted(2));
        assert_eq!(update.view.match_count, 0);
        assert!(!update.view.complete);
        assert_eq!(host.store().progress.as_ref().unwrap().current_level, 2);
    }

    #[test]
    fn hints_and_rewards() {
        let mut host = Host::start(
            MemoryStore::with_progress(LevelProgress {
                hints_remaining: 1,
                ..LevelProgress::new()
            }),
            ItemKind::Bottles,
            Some(5),
        )
        .unwrap();
        assert_eq!(host.hints().remaining(), 1);

        let update: Update = host.request_hint().unwrap();
        assert!(matches!(
            update.event,
            Event::Hint(HintOutcome::Applied { fixed: 0, .. })
        ));
        assert_eq!(update.view.hints_remaining, 0);
        assert_eq!(update.view.move_count, 1);
        assert_eq!(host.store().progress.as_ref().unwrap().hints_remaining, 0);

        let update: Update = host.request_hint().unwrap();
        assert_eq!(update.event, Event::Hint(HintOutcome::Exhausted));
        assert_eq!(update.view.move_count, 1);

        // The grant is applied before the next action
        host.request_reward(&Immediate(RewardEvent::Granted));
        let update: Update = host.request_hint().unwrap();
        assert!(
            update
                .notifications
                .contains(&Notification::RewardGranted(3))
        );
        assert!(matches!(update.event, Event::Hint(HintOutcome::Applied { .. })));
        assert_eq!(update.view.hints_remaining, 2);

        host.request_reward(&Immediate(RewardEvent::Failed("no ad".to_string())));
        let update: Update = host.wait_for_reward();
        assert_eq!(
            update.notifications,
            vec![Notification::RewardFailed("no ad".to_string())]
        );
        assert_eq!(host.hints().remaining(), 2);
    }

    #[test]
    fn reward_resets_a_partial_allowance() {
        let mut host = Host::start(MemoryStore::new(), ItemKind::Bottles, Some(6)).unwrap();
        host.request_hint().unwrap();
        assert_eq!(host.hints().remaining(), 2);
        host.request_reward(&Immediate(RewardEvent::Granted));
        host.poll_rewards();
        assert_eq!(host.hints().remaining(), 3);
    }

    #[test]
    fn resume_saved_level() {
        let target = Arrangement::new(vec![
            Item::Bottle(Color::Red),
            Item::Bottle(Color::Green),
            Item::Bottle(Color::Blue),
            Item::Bottle(Color::Teal),
        ]);
        let visible = Arrangement::new(vec![
            Item::Bottle(Color::Red),
            Item::Bottle(Color::Blue),
            Item::Bottle(Color::Teal),
            Item::Bottle(Color::Green),
        ]);
        let progress = LevelProgress {
            current_level: 7,
            hints_remaining: 2,
            level_in_progress: Some(LevelInProgress {
                visible: visible.clone(),
                target: target.clone(),
                move_count: 5,
                match_count: 1,
                selected: Some(2),
            }),
            ..LevelProgress::new()
        };
        let host = Host::start(MemoryStore::with_progress(progress), ItemKind::Bottles, None)
            .unwrap();
        assert_eq!(host.game().level(), 7);
        assert_eq!(host.game().visible(), &visible);
        assert_eq!(host.game().target(), &target);
        assert_eq!(host.game().move_count(), 5);
        assert_eq!(host.game().match_count(), 1);
        assert_eq!(host.game().selected(), Some(2));
        assert_eq!(host.hints().remaining(), 2);
    }

    #[test]
    fn inconsistent_saved_level_is_replaced() {
        let progress = LevelProgress {
            current_level: 11,
            level_in_progress: Some(LevelInProgress {
                visible: Arrangement::new(vec![
                    Item::Bottle(Color::Red),
                    Item::Bottle(Color::Blue),
                ]),
                target: Arrangement::new(vec![Item::Bottle(Color::Red)]),
                move_count: 1,
                match_count: 1,
                selected: None,
            }),
            ..LevelProgress::new()
        };
        let mut host = Host::start(MemoryStore::with_progress(progress), ItemKind::Bottles, Some(8))
            .unwrap();
        assert_eq!(host.game().item_count(), 5);
        assert_eq!(host.game().move_count(), 0);
        assert_eq!(host.game().match_count(), 0);
        let notifications: Vec<Notification> = host.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert!(matches!(notifications[0], Notification::LevelDiscarded(_)));
    }

    #[test]
    fn store_failures_do_not_stop_the_game() {
        let mut host = Host::start(FailingStore, ItemKind::Bottles, Some(9)).unwrap();
        assert_eq!(
            host.take_notifications(),
            vec![Notification::LoadFailed("disk unavailable".to_string())]
        );

        host.tap_index(0).unwrap();
        let update: Update = host.tap_index(1).unwrap();
        assert_eq!(update.view.move_count, 1);
        assert_eq!(
            update.notifications,
            vec![Notification::SaveFailed("disk full".to_string())]
        );

        let update: Update = solve(&mut host);
        assert!(update.completion.is_some());
        assert!(update.view.complete);
        assert_eq!(host.progress().levels_completed, 1);
        assert!(host.scores().is_empty());
    }

    #[test]
    fn same_seed_same_session() {
        let a = Host::start(MemoryStore::new(), ItemKind::Shapes, Some(77)).unwrap();
        let b = Host::start(MemoryStore::new(), ItemKind::Shapes, Some(77)).unwrap();
        assert_eq!(a.game(), b.game());
    }
}
