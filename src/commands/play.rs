//! Human play
//!
//! The user guesses a random secret; each guess gets scored until the code
//! is cracked or the user types `exit`.

use crate::core::{Code, GameConfig, evaluate};
use crate::output::format_feedback;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// How a game of human play ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The secret was guessed in `rounds` guesses
    Solved { rounds: usize },
    /// The user quit (or input ended) after `rounds` scored guesses
    Quit { rounds: usize },
}

/// Play one game against `secret`, reading guesses from `input`
///
/// Invalid guesses are reported and do not count as a round.
///
/// # Errors
/// Returns an error if reading input or writing output fails.
pub fn play<R: BufRead, W: Write>(
    game: GameConfig,
    secret: Code,
    mut input: R,
    output: &mut W,
) -> Result<PlayOutcome> {
    writeln!(
        output,
        "Guess the code: {} places, colors 1 to {}. Type 'exit' to give up.",
        game.n_places(),
        game.n_colors()
    )?;

    let mut rounds = 0;
    let mut line = String::new();
    loop {
        write!(output, "{}. Guess: ", rounds + 1)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("Failed to read guess")? == 0 {
            writeln!(output)?;
            return Ok(PlayOutcome::Quit { rounds });
        }

        let text = line.trim();
        if text.eq_ignore_ascii_case("exit") {
            writeln!(output, "The code was {secret}")?;
            return Ok(PlayOutcome::Quit { rounds });
        }

        let guess = match game.parse_code(text) {
            Ok(guess) => guess,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };

        rounds += 1;
        let feedback = evaluate(&secret, &guess);
        writeln!(output, "Response: {}", format_feedback(feedback, game.n_places()))?;

        if feedback.is_solved(game.n_places()) {
            writeln!(output, "Solved in {rounds} guesses!")?;
            return Ok(PlayOutcome::Solved { rounds });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, secret: &[u8]) -> (PlayOutcome, String) {
        let game = GameConfig::default();
        let secret = Code::new(secret).unwrap();
        let mut output = Vec::new();
        let outcome = play(game, secret, input.as_bytes(), &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn solves_after_guesses() {
        let (outcome, output) = run("1,1,2,2\n(1, 2, 3, 4)\n", &[1, 2, 3, 4]);
        assert_eq!(outcome, PlayOutcome::Solved { rounds: 2 });
        assert!(output.contains("(1, 1)"));
        assert!(output.contains("Solved in 2 guesses"));
    }

    #[test]
    fn invalid_guesses_do_not_count() {
        let (outcome, output) = run("1,7,1,1\n1,2\nred\n6 6 6 6\n", &[6, 6, 6, 6]);
        assert_eq!(outcome, PlayOutcome::Solved { rounds: 1 });
        assert!(output.contains("Each color must be between 1 and 6"));
        assert!(output.contains("The guess must be of length 4"));
        assert!(output.contains("Not a color"));
    }

    #[test]
    fn exit_reveals_secret() {
        let (outcome, output) = run("1 1 1 1\nexit\n", &[2, 3, 4, 5]);
        assert_eq!(outcome, PlayOutcome::Quit { rounds: 1 });
        assert!(output.contains("The code was (2, 3, 4, 5)"));
    }

    #[test]
    fn end_of_input_quits() {
        let (outcome, _) = run("", &[1, 1, 1, 1]);
        assert_eq!(outcome, PlayOutcome::Quit { rounds: 0 });
    }
}
