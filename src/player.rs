/*
player.rs

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

//! Play the game in the terminal.
//!
//! The items are listed with their position, starting at 1. The player types a position to
//! select an item, and then another position to swap the two items.

use chrono::{DateTime, Local};
use log::error;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use hidden_match::game::{GameError, GameView, HintOutcome, SelectOutcome, Trend};
use hidden_match::highscores::HighScores;
use hidden_match::host::{Event, Host, Notification, Update};
use hidden_match::item::ItemKind;
use hidden_match::rating;
use hidden_match::reward::SimulatedAd;
use hidden_match::saver::FileStore;

use crate::cli_options::PlayOptions;

/// Duration of the simulated rewarded ad.
const AD_DURATION: Duration = Duration::from_secs(2);

const HELP: &str = "Commands:
  <position>  select an item, or swap it with the selected item
  h           use a hint
  a           watch an ad to get your hints back
  n           next level (once the level is complete)
  r           restart the level with a new puzzle
  s           show the best scores
  q           quit";

/// Run the game until the player quits. Return the exit code.
pub fn play(options: PlayOptions) -> u8 {
    let mut store = FileStore::new(options.data_dir);
    if options.reset {
        store.delete_all();
    }

    let mut host: Host<FileStore> = match Host::start(store, options.kind, options.seed) {
        Ok(h) => h,
        Err(e) => {
            error!("Cannot start the game: {e}");
            eprintln!("Error: {e}");
            return 1;
        }
    };

    println!("Welcome to Hidden Match!");
    println!("Swap the {} until they match the hidden arrangement.", options.kind.noun(2));
    println!("{HELP}");
    print_notifications(&host.take_notifications());
    print_view(&host.view(), options.kind);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return 1;
        }

        let line: String = match lines.next() {
            Some(Ok(l)) => l,
            Some(Err(e)) => {
                eprintln!("Error reading input: {e}");
                return 1;
            }
            // End of input
            None => break,
        };

        let result: Result<Update, GameError> = match line.trim() {
            "" => continue,
            "q" => break,
            "?" => {
                println!("{HELP}");
                continue;
            }
            "s" => {
                print_scores(&host.scores());
                continue;
            }
            "h" => host.request_hint(),
            "a" => {
                if host.hints().remaining() > 0 {
                    println!("You still have hints.");
                    continue;
                }
                println!("Watching an ad...");
                host.request_reward(&SimulatedAd { delay: AD_DURATION });
                Ok(host.wait_for_reward())
            }
            "n" => {
                if !host.game().is_complete() {
                    println!("Complete the level first.");
                    continue;
                }
                host.next_level()
            }
            "r" => host.restart(),
            input => match input.parse::<usize>() {
                Ok(position) if position >= 1 => host.tap_index(position - 1),
                _ => {
                    println!("Unknown command. Type ? for help.");
                    continue;
                }
            },
        };

        match result {
            Ok(update) => print_update(&update, options.kind),
            Err(GameError::IndexOutOfRange { len, .. }) => {
                println!("Type a position between 1 and {len}.")
            }
            Err(e) => {
                error!("{e}");
                eprintln!("Error: {e}");
                return 1;
            }
        }
    }

    let progress = host.progress();
    println!(
        "Levels completed: {}, total stars: {}, total moves: {}",
        progress.levels_completed, progress.total_stars, progress.total_moves
    );
    if let Some(average) = progress.average_stars() {
        println!("Average: {average:.1} stars per level");
    }
    println!("Thanks for playing!");
    0
}

fn print_update(update: &Update, kind: ItemKind) {
    print_notifications(&update.notifications);

    match update.event {
        Event::Select(SelectOutcome::Selected(i)) => println!("Selected {}", i + 1),
        Event::Select(SelectOutcome::Deselected) => println!("Selection cleared"),
        Event::Select(SelectOutcome::Swapped(outcome)) => match outcome.trend {
            Trend::Improved => println!("Better!"),
            Trend::Worsened => println!("Worse..."),
            Trend::Unchanged => (),
        },
        Event::Hint(HintOutcome::Applied { fixed, .. }) => {
            println!("Hint: position {} is now correct", fixed + 1)
        }
        Event::Hint(HintOutcome::Exhausted) => {
            println!("No hint left. Type a to watch an ad and get your hints back.")
        }
        Event::Select(SelectOutcome::Ignored) | Event::Hint(HintOutcome::Ignored) => {
            println!("The level is complete. Type n for the next level.")
        }
        Event::LevelStarted(level) => println!("Level {level}"),
        Event::Nothing => (),
    }

    if let Some(score) = &update.completion {
        println!();
        println!("Level {} complete in {} moves!", score.level, score.moves);
        println!(
            "{} {}",
            "*".repeat(score.stars as usize),
            rating::star_text(score.moves, score.item_count)
        );
        println!("{}", rating::performance_message(score.stars));
        println!("Type n for the next level.");
        return;
    }

    print_view(&update.view, kind);
}

fn print_view(view: &GameView, kind: ItemKind) {
    println!();
    println!(
        "Level {} - moves: {} - hints: {}",
        view.level, view.move_count, view.hints_remaining
    );
    for (i, item) in view.items.iter().enumerate() {
        let marker: &str = if view.selected == Some(i) { ">" } else { " " };
        println!("{marker}{:>2}. {item}", i + 1);
    }
    if view.complete {
        return;
    }
    println!("{}", match_feedback(view.match_count, kind));
}

/// Return the message about the number of items at their target position.
fn match_feedback(match_count: usize, kind: ItemKind) -> String {
    match match_count {
        0 => format!("No {} match", kind.noun(0)),
        k => format!("{k} {} match", kind.noun(k)),
    }
}

fn print_notifications(notifications: &[Notification]) {
    for n in notifications {
        match n {
            Notification::LoadFailed(e) => {
                println!("Cannot load your progress ({e}). Starting over.")
            }
            Notification::SaveFailed(e) => println!("Cannot save your progress: {e}"),
            Notification::LevelDiscarded(_) => {
                println!("The saved level was damaged. Here is a new puzzle.")
            }
            Notification::RewardGranted(hints) => println!("Reward: you have {hints} hints."),
            Notification::RewardFailed(e) => println!("No reward: {e}"),
            Notification::BoardPosition(1) => println!("New best score!"),
            Notification::BoardPosition(p) => println!("Your score ranks #{p} for this level."),
        }
    }
}

fn print_scores(scores: &HighScores) {
    if scores.is_empty() {
        println!("No score yet.");
        return;
    }
    for level in scores.levels() {
        let Some(top) = scores.get_scores(level) else {
            continue;
        };
        println!("Level {level}");
        for (i, score) in top.iter().enumerate() {
            let when: DateTime<Local> = score.when.into();
            println!(
                "{:>3}. {:<3} {:>3} moves  {}",
                i + 1,
                "*".repeat(score.stars as usize),
                score.moves,
                when.format("%Y-%m-%d %H:%M")
            );
        }
    }
}
