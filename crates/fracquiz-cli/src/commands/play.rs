//! The `fracquiz play` command: the interactive terminal game.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use fracquiz_core::{AdvancePolicy, GameSession, QuizEngine, RandomSource, Verdict};

const RESTART: &str = ":restart";
const QUIT: &str = ":quit";

pub fn execute(seed: Option<u64>, config_path: Option<PathBuf>) -> Result<()> {
    let engine = super::build_engine(config_path.as_deref())?;
    let mut rng = super::seeded_rng(seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let tally = run_game(&engine, &mut rng, stdin.lock(), stdout.lock())?;

    println!("\n{}", summary_table(&tally));
    Ok(())
}

/// Counts for the end-of-game summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub score: u32,
    pub level: u8,
    pub correct: u32,
    pub wrong: u32,
    pub invalid: u32,
}

impl Tally {
    fn reset(&mut self, session: &GameSession) {
        *self = Tally {
            score: session.score(),
            level: session.level().number(),
            ..Tally::default()
        };
    }
}

/// Play until `:quit` or end of input, returning the final tally.
pub fn run_game<R, I, W>(engine: &QuizEngine, rng: &mut R, input: I, mut out: W) -> Result<Tally>
where
    R: RandomSource + ?Sized,
    I: BufRead,
    W: Write,
{
    let mut session = engine.start(rng);
    let mut tally = Tally::default();
    tally.reset(&session);

    print_instructions(&mut out)?;
    print_question(&mut out, &session)?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            QUIT => break,
            RESTART => {
                session = engine.restart(rng);
                tally.reset(&session);
                writeln!(out, "Game restarted!")?;
                print_question(&mut out, &session)?;
                continue;
            }
            _ => {}
        }

        let evaluation = engine.evaluate(&line, session, rng);
        match &evaluation.verdict {
            Verdict::Correct => {
                tally.correct += 1;
                writeln!(out, "Correct! Next question coming...")?;
            }
            Verdict::Wrong { .. } if engine.config().advance == AdvancePolicy::Always => {
                tally.wrong += 1;
                writeln!(out, "Wrong answer. Next question coming...")?;
            }
            Verdict::Wrong { .. } => {
                tally.wrong += 1;
                writeln!(out, "Wrong answer. Try again with this question.")?;
            }
            Verdict::Invalid(_) => {
                tally.invalid += 1;
                writeln!(
                    out,
                    "Invalid input. Use 1/2 for fractions or 0.5 for decimals."
                )?;
            }
            Verdict::Empty => writeln!(out, "Please type an answer before submitting.")?,
        }
        if let Some(level) = evaluation.level_up {
            writeln!(out, "Level Up -> Level {level}!")?;
        }

        session = evaluation.session;
        tally.score = session.score();
        tally.level = session.level().number();
        print_question(&mut out, &session)?;
    }

    Ok(tally)
}

fn print_instructions(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Fraction & Decimal Quiz")?;
    writeln!(out, "Answer fractions like 1/2 or 3/4, decimals like 0.25 or 0.5.")?;
    writeln!(out, "A correct answer gives you a new question; a wrong one keeps the same question.")?;
    writeln!(out, "Type {RESTART} to start over or {QUIT} to stop.")
}

fn print_question(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Level {} | Score {}", session.level(), session.score())?;
    writeln!(out, "{}", session.question().prompt())?;
    write!(out, "> ")?;
    out.flush()
}

fn summary_table(tally: &Tally) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Score", "Level", "Correct", "Wrong", "Invalid"]);
    table.add_row(vec![
        Cell::new(tally.score),
        Cell::new(tally.level),
        Cell::new(tally.correct),
        Cell::new(tally.wrong),
        Cell::new(tally.invalid),
    ]);
    table
}
