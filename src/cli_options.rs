/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, Hidden Match starts a game in the terminal.
//! The other options are intended for developers tuning the levels.
//!
//! # Examples
//!
//! List the number of items for the levels:
//!
//! ```
//! $ hidden-match --levels
//! 4 items: levels 1 to 10
//! 5 items: levels 11 to 20
//! 6 items: levels 21 to 30
//! 7 items: levels 31 to 40
//! 8 items: levels 41 and above
//! ```
//!
//! Generate three puzzles for level 12 with shapes, and print some statistics:
//!
//! ```
//! $ hidden-match -l 12 -c 3 -k shapes -s 42 --summary
//! ```
//!
//! Start a new game with a reproducible sequence of puzzles:
//!
//! ```
//! $ hidden-match --reset --seed 42
//! ```

use clap::Parser;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::path::PathBuf;

use hidden_match::arrangement::Arrangement;
use hidden_match::config::{self, COPYRIGHT_NOTICE};
use hidden_match::generator::{Generator, Puzzle};
use hidden_match::item::ItemKind;
use hidden_match::progression::{self, MAX_ITEMS, MIN_ITEMS};
use hidden_match::rating;

/// Swap the items until they match the hidden arrangement.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the number of items for each level
    #[arg(long, default_value_t = false)]
    levels: bool,

    /// Level to generate puzzles for
    #[arg(short, long, group = "generate")]
    level: Option<u32>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Print some statistics after generating the puzzles
    #[arg(long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// Type of items
    #[arg(value_enum, short, long, default_value_t = ItemKind::Bottles)]
    kind: ItemKind,

    /// Seed for the random number generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory where the progress and the scores are saved
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Delete the saved progress and scores before starting
    #[arg(long, default_value_t = false)]
    reset: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Options for a game in the terminal.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub kind: ItemKind,
    pub seed: Option<u64>,
    pub data_dir: PathBuf,
    pub reset: bool,
}

/// What to do after parsing the command line.
#[derive(Debug)]
pub enum Action {
    /// Exit with the given code.
    Exit(u8),

    /// Start a game.
    Play(PlayOptions),
}

/// Parse and process command-line options.
pub fn parse() -> Action {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the levels
    //
    if args.levels {
        for item_count in MIN_ITEMS..=MAX_ITEMS {
            match progression::level_range_for_item_count(item_count) {
                Some((first, Some(last))) => {
                    println!("{item_count} items: levels {first} to {last}")
                }
                Some((first, None)) => println!("{item_count} items: levels {first} and above"),
                None => (),
            }
        }
        return Action::Exit(0);
    }

    if let Some(level) = args.level {
        return Action::Exit(generate(level, &args));
    }

    Action::Play(PlayOptions {
        kind: args.kind,
        seed: args.seed,
        data_dir: args.data_dir.unwrap_or_else(config::default_data_dir),
        reset: args.reset,
    })
}

/// Generate and print puzzles for a level.
fn generate(level: u32, args: &Args) -> u8 {
    let seed: u64 = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    let mut generator: Generator = Generator::new(args.kind);
    let item_count: usize = progression::item_count_for_level(level);

    println!(
        "Level {level}: {item_count} {}, {} moves for 3 stars, seed {seed}",
        args.kind.noun(item_count),
        rating::base_target(item_count) * 6 / 10
    );

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut iterations: usize = 0;
    for i in 0..args.count {
        debug!("Puzzle {i}");

        let puzzle: Puzzle = match generator.generate(item_count, &mut rng) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        };
        total += generator.duration;
        if generator.duration > max {
            max = generator.duration;
        }
        iterations += generator.iteration;

        println!(" target: {}", format_items(&puzzle.target));
        println!("visible: {}", format_items(&puzzle.visible));
    }

    if args.summary && args.count > 0 {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
average iterations = {}",
            total,
            total / args.count as f32,
            max,
            iterations as f32 / args.count as f32,
        );
    }
    0
}

/// Return the items of the arrangement as a comma-separated list.
fn format_items(items: &Arrangement) -> String {
    let names: Vec<String> = items.items().iter().map(|i| i.to_string()).collect();
    format!("[{}]", names.join(", "))
}
