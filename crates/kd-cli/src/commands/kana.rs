//! Kana command
//!
//! Run a kana writing drill on stdin/stdout. Every input line is split into
//! kana units which are submitted in order.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use kd_core::session::{KanaFeedback, KanaSession};
use kd_core::timer::SystemClock;
use kd_core::Script;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use super::load_config;

/// Line that abandons the running drill
pub const QUIT: &str = ":q";

/// Arguments for the kana command
#[derive(Debug, Args)]
pub struct KanaArgs {
    /// Only drill the enabled hiragana syllables
    #[arg(long, conflicts_with = "katakana_only")]
    pub hiragana_only: bool,

    /// Only drill the enabled katakana syllables
    #[arg(long)]
    pub katakana_only: bool,

    /// Seed for a reproducible drill order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the kana command
pub fn execute(args: KanaArgs, config_path: &Path) -> Result<()> {
    let mut config = load_config(config_path)?;
    if args.hiragana_only {
        config.kana.katakana.clear();
    }
    if args.katakana_only {
        config.kana.hiragana.clear();
    }
    if args.seed.is_some() {
        config.rng.seed = args.seed;
    }

    let mut session = KanaSession::from_config(&config, Arc::new(SystemClock))?;
    session
        .reset()
        .context("Enable at least one syllable of the selected script")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    drive(&mut session, stdin.lock(), stdout.lock(), args.json)
}

/// Feed input lines into the session until it finishes or input ends
pub fn drive<R: BufRead, W: Write>(
    session: &mut KanaSession,
    input: R,
    mut out: W,
    json: bool,
) -> Result<()> {
    writeln!(
        out,
        "{} {} items. Type the kana, '{}' to quit.",
        "Kana writing drill:".bold(),
        session.queue().len(),
        QUIT
    )?;
    print_prompt(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        session.tick();

        if line == QUIT {
            session.abort();
            break;
        }
        if line.is_empty() {
            print_prompt(session, &mut out)?;
            continue;
        }

        let feedback = session.submit_all(line);
        print_feedback(&feedback, &mut out)?;

        if session.phase().is_finished() {
            break;
        }
        print_status(session, &mut out)?;
        print_prompt(session, &mut out)?;
    }

    // Input ran out before the queue did.
    session.abort();
    print_summary(session, &mut out, json)
}

fn print_prompt<W: Write>(session: &KanaSession, out: &mut W) -> Result<()> {
    if let (Some(item), Some(prompt)) = (session.current_item(), session.current_prompt()) {
        let heading = match item.script() {
            Script::Hiragana => prompt.heading.cyan(),
            Script::Katakana => prompt.heading.magenta(),
        };
        writeln!(out, "{}: {}", heading, prompt.text.bold())?;
    }
    Ok(())
}

fn print_feedback<W: Write>(feedback: &KanaFeedback, out: &mut W) -> Result<()> {
    match feedback {
        KanaFeedback::Ignored => {}
        KanaFeedback::Partial { entered } => writeln!(out, "  {} ...", entered)?,
        KanaFeedback::TryAgain { entered } => {
            writeln!(out, "  {} {}", entered.red(), "Try again".red())?
        }
        KanaFeedback::Correct { answer } => {
            writeln!(out, "  {} {}", answer.green(), "Correct".green())?
        }
        KanaFeedback::Mistake { answer } => {
            writeln!(out, "  {} {}", answer.red(), "Mistake".red().bold())?
        }
    }
    Ok(())
}

fn print_status<W: Write>(session: &KanaSession, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!(
            "Time: {}  Remaining: {}  Mistakes: {}",
            session.time_display(),
            session.remaining(),
            session.mistake_total()
        )
        .dimmed()
    )?;
    Ok(())
}

fn print_summary<W: Write>(session: &KanaSession, out: &mut W, json: bool) -> Result<()> {
    let Some(summary) = session.summary() else {
        return Ok(());
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else if summary.completed {
        writeln!(
            out,
            "{} Time: {}  Mistakes: {}",
            "Finished.".green().bold(),
            summary.time,
            summary.mistakes
        )?;
    } else {
        writeln!(
            out,
            "{} {} of {} items answered.",
            "Aborted.".yellow(),
            summary.answered,
            session.queue().len()
        )?;
    }
    Ok(())
}
