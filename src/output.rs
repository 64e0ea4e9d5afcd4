//! Terminal output formatting
//!
//! Colored rendering of codes, key pegs, solution paths and guess histograms.
//! Color is dropped automatically when stdout is not a terminal, or when
//! disabled with [`set_color`].

use crate::commands::{FirstGuess, GuessDistribution, SolveResult, StatsReport};
use crate::core::{Code, Feedback};
use colored::{Color, Colorize};

const PALETTE: [Color; 8] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::BrightWhite,
    Color::BrightBlack,
];

/// Widest histogram bar, in characters
const BAR_WIDTH: usize = 50;

/// Force color on or off for everything printed afterwards
pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Render a code as colored symbols, e.g. `(1, 1, 2, 2)`
#[must_use]
pub fn format_code(code: &Code) -> String {
    let symbols: Vec<String> = code
        .symbols()
        .iter()
        .map(|&s| {
            let color = PALETTE[usize::from(s.saturating_sub(1)) % PALETTE.len()];
            s.to_string().color(color).bold().to_string()
        })
        .collect();
    format!("({})", symbols.join(", "))
}

/// Render feedback as key pegs followed by the numeric pair
///
/// Exact matches are black pegs, color-only matches white pegs, and the
/// remaining places are dots.
#[must_use]
pub fn format_feedback(feedback: Feedback, n_places: usize) -> String {
    let exact = usize::from(feedback.exact());
    let color_only = usize::from(feedback.color_only());
    let empty = n_places.saturating_sub(exact + color_only);

    format!(
        "{}{}{} {feedback}",
        "●".repeat(exact).bright_black().bold(),
        "○".repeat(color_only).white(),
        "·".repeat(empty).dimmed()
    )
}

/// Print a solution path
pub fn print_solve_result(result: &SolveResult, strategy: &str) {
    println!("Secret: {}", format_code(&result.secret));
    for (i, step) in result.guesses.iter().enumerate() {
        println!(
            "{:>3}. {}  {}  {} -> {} candidates",
            i + 1,
            format_code(&step.guess),
            format_feedback(step.feedback, step.guess.len()),
            step.candidates_before,
            step.candidates_after
        );
    }

    if result.success {
        let summary = format!("Solved in {} guesses with {strategy}", result.rounds());
        println!("{}", summary.green().bold());
    } else {
        let summary = format!("Not solved after {} guesses", result.rounds());
        println!("{}", summary.red().bold());
    }
}

/// Print an opening guess
pub fn print_first_guess(opening: &FirstGuess, strategy: &str) {
    println!("Opening for {strategy}: {}", format_code(&opening.guess));
    println!(
        "  {} outcomes, at most {} codes left",
        opening.buckets, opening.largest_bucket
    );
    if let Some(depth) = opening.depth {
        println!("  secret isolated within {depth} guesses");
    }
}

/// Text histogram of a guess distribution, one line per guess count
#[must_use]
pub fn format_histogram(distribution: &GuessDistribution) -> String {
    let peak = distribution.iter().map(|(_, games)| games).max().unwrap_or(0);
    let mut out = String::new();

    for (rounds, games) in distribution.iter() {
        let len = if peak == 0 { 0 } else { (games * BAR_WIDTH).div_ceil(peak) };
        out.push_str(&format!("{rounds:>3} | {} {games}\n", "█".repeat(len).cyan()));
    }
    out
}

/// Print a batch report with its histogram
pub fn print_report(report: &StatsReport) {
    let distribution = report.distribution();
    println!(
        "{}",
        format!(
            "Mastermind with {} strategy ({} places, {} colors)",
            report.strategy, report.n_places, report.n_colors
        )
        .bold()
    );
    print!("{}", format_histogram(&distribution));
    println!(
        "Games: {}  Mean: {:.4}  Worst: {}",
        distribution.total(),
        distribution.mean(),
        distribution.max()
    );
}
