//! kanadrill - kana writing and kanji reading drills in the terminal
//!
//! ## Quick Start
//!
//! ```bash
//! # Drill hiragana only
//! kanadrill kana --hiragana-only
//!
//! # Drill kanji readings from a deck file
//! kanadrill kanji --deck readings.toml
//!
//! # Inspect the configuration
//! kanadrill config show
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
