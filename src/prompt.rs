//! Interactive trial-count prompt.
//!
//! A bounded loop: each invalid line costs one attempt, `q`/`quit` or end of
//! input ends the prompt early, and running out of attempts is an error.
//! Accepted counts lie in [`PROMPT_MIN_TRIALS`]`..=`[`PROMPT_MAX_TRIALS`].

use std::io::{BufRead, Write};

use crate::constants::{PROMPT_MAX_TRIALS, PROMPT_MIN_TRIALS};
use crate::error::{validate_trials, Result, SimulationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Trials(u64),
    Quit,
}

fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit")
}

/// Parse one line of input. `Ok(None)` is the quit sentinel.
pub fn parse_trials_input(line: &str) -> Result<Option<u64>> {
    let line = line.trim();
    if is_quit(line) {
        return Ok(None);
    }
    let raw: i64 = line
        .parse()
        .map_err(|_| SimulationError::invalid_argument(format!("not an integer: {line:?}")))?;
    let trials = validate_trials(raw)?;
    if !(PROMPT_MIN_TRIALS..=PROMPT_MAX_TRIALS).contains(&trials) {
        return Err(SimulationError::invalid_argument(format!(
            "trials must be between {PROMPT_MIN_TRIALS} and {PROMPT_MAX_TRIALS}, got {trials}"
        )));
    }
    Ok(Some(trials))
}

/// Ask for a trial count on `output`, reading answers from `input`.
pub fn prompt_trials<R, W>(
    input: &mut R,
    output: &mut W,
    max_attempts: usize,
) -> Result<PromptOutcome>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    for attempt in 1..=max_attempts {
        write!(
            output,
            "Number of trials ({PROMPT_MIN_TRIALS}-{PROMPT_MAX_TRIALS}, q to quit): "
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(PromptOutcome::Quit);
        }

        match parse_trials_input(&line) {
            Ok(Some(trials)) => return Ok(PromptOutcome::Trials(trials)),
            Ok(None) => return Ok(PromptOutcome::Quit),
            Err(e) => {
                tracing::warn!(attempt, max_attempts, "rejected input: {e}");
                writeln!(output, "  {e}")?;
            }
        }
    }
    Err(SimulationError::PromptExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str, attempts: usize) -> (Result<PromptOutcome>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let res = prompt_trials(&mut reader, &mut out, attempts);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_accepts_valid_count() {
        let (res, out) = run("1000\n", 3);
        assert_eq!(res.unwrap(), PromptOutcome::Trials(1000));
        assert!(out.starts_with("Number of trials"));
    }

    #[test]
    fn test_retries_after_invalid_input() {
        let (res, out) = run("abc\n-5\n50\n2500\n", 5);
        assert_eq!(res.unwrap(), PromptOutcome::Trials(2500));
        assert!(out.contains("not an integer"));
        assert!(out.contains("positive integer"));
        assert!(out.contains("between 100 and 10000"));
    }

    #[test]
    fn test_quit_sentinel() {
        assert_eq!(run("Q\n", 3).0.unwrap(), PromptOutcome::Quit);
        assert_eq!(run("bad\nquit\n", 3).0.unwrap(), PromptOutcome::Quit);
    }

    #[test]
    fn test_end_of_input_quits() {
        assert_eq!(run("", 3).0.unwrap(), PromptOutcome::Quit);
    }

    #[test]
    fn test_attempts_are_bounded() {
        let (res, _) = run("x\nx\nx\nx\n", 3);
        match res {
            Err(SimulationError::PromptExhausted { attempts }) => assert_eq!(attempts, 3),
            other => panic!("expected PromptExhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_bounds() {
        assert_eq!(parse_trials_input(" 100 ").unwrap(), Some(100));
        assert_eq!(parse_trials_input("10000").unwrap(), Some(10_000));
        assert!(parse_trials_input("10001").is_err());
        assert!(parse_trials_input("0").unwrap_err().is_invalid_argument());
    }
}
