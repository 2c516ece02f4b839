//! Kanji command
//!
//! Run a kanji reading drill from a deck file. Each input line is one
//! submitted reading; an empty line reveals the answer.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use kd_core::deck::{ExampleWord, MemoryDeck, ReadingDeck};
use kd_core::session::{KanjiFeedback, KanjiSession, KanjiStep, Verdict};
use kd_core::timer::SystemClock;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::kana::QUIT;
use super::load_config;

/// Arguments for the kanji command
#[derive(Debug, Args)]
pub struct KanjiArgs {
    /// Deck file with kanji, example words and drills (TOML)
    #[arg(long, short)]
    pub deck: PathBuf,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the kanji command
pub fn execute(args: KanjiArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let deck = MemoryDeck::load(&args.deck)
        .with_context(|| format!("Failed to load deck {}", args.deck.display()))?;
    tracing::info!("Loaded deck {:?} with {} drills", args.deck, deck.pending());

    let mut session = KanjiSession::from_config(deck, &config, Arc::new(SystemClock));
    session.start().context("The deck has no drills queued")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    drive(&mut session, stdin.lock(), stdout.lock(), args.json)
}

/// Feed input lines into the session until it finishes or input ends
pub fn drive<D, R, W>(session: &mut KanjiSession<D>, input: R, mut out: W, json: bool) -> Result<()>
where
    D: ReadingDeck,
    R: BufRead,
    W: Write,
{
    writeln!(
        out,
        "{} type the reading, an empty line to reveal, '{}' to quit.",
        "Kanji reading drill:".bold(),
        QUIT
    )?;
    print_prompt(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        session.tick();

        if line.trim() == QUIT {
            session.abort();
            break;
        }

        let KanjiFeedback::Judged(judgement) = session.submit(&line) else {
            continue;
        };

        match judgement.verdict {
            Verdict::Correct => writeln!(out, "  {}", "Correct".green())?,
            Verdict::Incorrect => writeln!(
                out,
                "  {} Tried: {}",
                "Incorrect".red(),
                session.attempts().join(", ")
            )?,
            Verdict::Revealed | Verdict::RevealedAfterCap => {
                writeln!(out, "  {}", "Incorrect".red())?
            }
        }
        if let Some(answer) = &judgement.answer {
            writeln!(out, "  Reading: {}", answer.bold())?;
        }
        if judgement.verdict != Verdict::Incorrect {
            let next = if judgement.has_next { "Continue" } else { "Finish" };
            writeln!(out, "  {}", next.dimmed())?;
        }

        match session.advance_explicitly() {
            KanjiStep::Finished => break,
            KanjiStep::Retry | KanjiStep::NextItem => print_prompt(session, &mut out)?,
            KanjiStep::Ignored => {}
        }
    }

    session.abort();
    print_summary(session, &mut out, json)
}

fn highlight(word: &ExampleWord) -> String {
    word.written()
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if word.highlights.contains(&i) {
                format!("[{}]", c)
            } else {
                c.to_string()
            }
        })
        .collect()
}

fn print_prompt<D: ReadingDeck, W: Write>(session: &KanjiSession<D>, out: &mut W) -> Result<()> {
    let Some(item) = session.current_item() else {
        return Ok(());
    };

    writeln!(out, "{}", item.kanji.to_string().bold())?;
    for word in &item.words {
        writeln!(out, "  {}  {}", highlight(word), word.kana().dimmed())?;
    }
    Ok(())
}

fn print_summary<D: ReadingDeck, W: Write>(
    session: &KanjiSession<D>,
    out: &mut W,
    json: bool,
) -> Result<()> {
    let Some(summary) = session.summary() else {
        return Ok(());
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else if summary.completed {
        writeln!(
            out,
            "{} {} readings, {} mistakes.",
            "Finished.".green().bold(),
            summary.answered,
            summary.mistakes
        )?;
    } else {
        writeln!(out, "{} {} readings answered.", "Aborted.".yellow(), summary.answered)?;
    }
    Ok(())
}
