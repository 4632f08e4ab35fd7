/// Interactive comparison prompt.
///
/// Shows the current pair, reads the user's pick, and feeds it to the
/// engine until the queue runs dry or the user quits. Generic over the
/// reader/writer so the loop can be driven from tests.
use charsort_core::{Item, Progress, RankingEngine};
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use crate::output::{write_table, Summary};
use crate::parse::{parse_choice, parse_yes, Choice};

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every scheduled comparison was decided.
    Completed,
    /// The user quit, or input ended, before the queue was empty.
    Stopped,
}

/// Build the question shown for one pair.
pub fn build_prompt(first: &Item, second: &Item, done: usize, total: usize) -> String {
    format!(
        "[{current}/{total}] Who do you prefer?\n\
         \x20 1) {first}\n\
         \x20 2) {second}\n\
         (1/2, s = standings, q = quit) > ",
        current = done + 1,
        first = first.display_name,
        second = second.display_name,
    )
}

pub(crate) fn summary_of<R: Rng>(engine: &RankingEngine<R>) -> Summary {
    let session = engine.session();
    Summary {
        submitted: session.submitted_comparisons(),
        total: session.total_comparisons(),
        complete: session.is_complete(),
    }
}

/// Run comparisons until the session completes or the user stops.
pub fn run_comparisons<R: Rng>(
    engine: &mut RankingEngine<R>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Outcome> {
    let handle = engine.handle();

    loop {
        let Some((first, second)) = engine.current_pair(handle).map_err(io::Error::other)? else {
            return Ok(Outcome::Completed);
        };
        let session = engine.session();
        write!(
            out,
            "\n{}",
            build_prompt(first, second, session.submitted_comparisons(), session.total_comparisons())
        )?;
        out.flush()?;
        let (first, second) = (first.id.clone(), second.id.clone());

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed before completion");
            return Ok(Outcome::Stopped);
        }

        let (winner, loser) = match parse_choice(&line) {
            Some(Choice::First) => (first, second),
            Some(Choice::Second) => (second, first),
            Some(Choice::Standings) => {
                let rankings = engine.final_rankings(handle).map_err(io::Error::other)?;
                writeln!(out)?;
                write_table(out, &rankings, &summary_of(engine))?;
                continue;
            }
            Some(Choice::Quit) => return Ok(Outcome::Stopped),
            None => {
                writeln!(out, "Please type 1 or 2 (or s / q).")?;
                continue;
            }
        };

        match engine.submit_preference(handle, &winner, &loser) {
            Ok(Progress::Complete) => return Ok(Outcome::Completed),
            Ok(Progress::Next(_)) => {}
            Err(e) => {
                // Recoverable: nothing changed, re-query and ask again.
                warn!(error = %e, "preference rejected");
                writeln!(out, "{e}")?;
            }
        }
    }
}

/// Ask whether to start over. End of input counts as no.
pub fn ask_restart(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "\nStart over? [y/N] ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(parse_yes(&line))
}
