/*
reward.rs

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

//! Rewarded ads.
//!
//! When the player has no hint left, they can watch an ad to get their hints back. The ad
//! network is an external system: the game asks a [`RewardProvider`] for a reward, and the
//! provider reports the result later, from any thread, through a [`RewardChannel`].
//! The session host drains the channel between player actions and applies each grant.

use async_channel::{Receiver, Sender};
use log::debug;
use std::thread;
use std::time::Duration;

/// Result of a reward request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardEvent {
    /// The player watched the ad to the end.
    Granted,

    /// No ad could be shown, or the player closed it early.
    Failed(String),
}

/// External system that shows rewarded ads.
pub trait RewardProvider {
    /// Show an ad and report the result through `sender`.
    ///
    /// The method must not block. The result can be sent at any time.
    fn request_reward(&self, sender: Sender<RewardEvent>);
}

/// Channel that carries the reward results to the session host.
#[derive(Debug)]
pub struct RewardChannel {
    sender: Sender<RewardEvent>,
    receiver: Receiver<RewardEvent>,
}

impl Default for RewardChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardChannel {
    /// Create a [`RewardChannel`] object.
    pub fn new() -> Self {
        let (sender, receiver) = async_channel::unbounded::<RewardEvent>();
        Self { sender, receiver }
    }

    /// Return a sender for a [`RewardProvider`].
    pub fn sender(&self) -> Sender<RewardEvent> {
        self.sender.clone()
    }

    /// Return the results received so far, without waiting.
    pub fn drain(&self) -> Vec<RewardEvent> {
        let mut events: Vec<RewardEvent> = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait for the next result.
    pub fn wait(&self) -> Option<RewardEvent> {
        self.receiver.recv_blocking().ok()
    }
}

/// Provider that pretends to show an ad and always grants the reward after a delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAd {
    /// Duration of the ad.
    pub delay: Duration,
}

impl RewardProvider for SimulatedAd {
    fn request_reward(&self, sender: Sender<RewardEvent>) {
        let delay: Duration = self.delay;
        debug!("Showing a simulated ad for {delay:?}");
        thread::spawn(move || {
            thread::sleep(delay);
            if sender.send_blocking(RewardEvent::Granted).is_err() {
                debug!("Reward dropped: nobody is listening");
            }
        });
    }
}
