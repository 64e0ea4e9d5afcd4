use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mastermind_solver::commands::{
    self, SolveConfig, StatsConfig, StatsReport, random_secret, solve_secret,
};
use mastermind_solver::core::{CodeSpace, GameConfig};
use mastermind_solver::output;
use mastermind_solver::solver::{
    DEFAULT_CEILING, DEFAULT_SEARCH_DEPTH, Strategy, StrategyConfig, StrategyKind, StrategyType,
};
use mastermind_solver::store::{FileStore, FirstRound, FirstRoundStore};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Mastermind solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of colors
    #[arg(short, long, global = true, default_value_t = 6)]
    colors: u8,

    /// Number of places per code
    #[arg(short, long, global = true, default_value_t = 4)]
    places: usize,

    /// Guess selection strategy: knuth, lookahead or deepening
    #[arg(short, long, global = true, default_value_t = StrategyKind::Knuth)]
    strategy: StrategyKind,

    /// Plies scored by the lookahead strategy
    #[arg(long, global = true, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: usize,

    /// Depth bound at which the deepening strategy gives up
    #[arg(long, global = true, default_value_t = DEFAULT_CEILING)]
    ceiling: usize,

    /// Directory for cached opening guesses
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Neither read nor write cached opening guesses
    #[arg(long, global = true)]
    no_cache: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the solver crack a secret (random if omitted)
    Solve {
        /// Secret code, e.g. "1,2,3,4"
        secret: Option<String>,
    },
    /// Guess a random secret yourself
    Play,
    /// Solve every secret and show how many guesses each took
    Stats {
        /// Directory to save the report in
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show a saved report instead of computing one
        #[arg(long, conflicts_with = "output")]
        load: Option<PathBuf>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Show the opening guess
    FirstGuess,
}

impl Cli {
    fn game(&self) -> Result<GameConfig> {
        GameConfig::new(self.colors, self.places).context("Invalid game configuration")
    }

    fn strategy_config(&self) -> StrategyConfig {
        StrategyConfig {
            kind: self.strategy,
            search_depth: self.depth,
            ceiling: self.ceiling,
        }
    }

    fn store(&self) -> Option<Box<dyn FirstRoundStore>> {
        if self.no_cache {
            return None;
        }
        let dir = self.cache_dir.clone().or_else(FileStore::default_dir)?;
        Some(Box::new(FileStore::new(dir)))
    }

    fn strategy(&self, space: Arc<CodeSpace>) -> StrategyType {
        let strategy = StrategyType::new(self.strategy_config(), space);
        match self.store() {
            Some(store) => strategy.with_store(store),
            None => strategy,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.no_color {
        output::set_color(false);
    }

    match &cli.command {
        Command::Solve { secret } => run_solve(&cli, secret.as_deref()),
        Command::Play => run_play(&cli),
        Command::Stats {
            output,
            load,
            no_progress,
        } => run_stats(&cli, output.as_ref(), load.as_ref(), *no_progress),
        Command::FirstGuess => run_first_guess(&cli),
    }
}

fn run_solve(cli: &Cli, secret: Option<&str>) -> Result<()> {
    let game = cli.game()?;
    let space = Arc::new(CodeSpace::new(game));

    let secret = match secret {
        Some(text) => game
            .parse_code(text)
            .with_context(|| format!("Invalid secret '{text}'"))?,
        None => random_secret(&space).context("Code space is empty")?,
    };

    let mut strategy = cli.strategy(space);
    let result = solve_secret(&SolveConfig::new(game, secret), &mut strategy)?;
    output::print_solve_result(&result, strategy.name());
    Ok(())
}

fn run_play(cli: &Cli) -> Result<()> {
    let game = cli.game()?;
    let space = CodeSpace::new(game);
    let secret = random_secret(&space).context("Code space is empty")?;

    commands::play(game, secret, io::stdin().lock(), &mut io::stdout())?;
    Ok(())
}

fn run_stats(
    cli: &Cli,
    output_dir: Option<&PathBuf>,
    load: Option<&PathBuf>,
    no_progress: bool,
) -> Result<()> {
    if let Some(path) = load {
        let report = StatsReport::load(path)?;
        output::print_report(&report);
        return Ok(());
    }

    let game = cli.game()?;
    let space = Arc::new(CodeSpace::new(game));

    // Goes through the store so the opening is loaded or saved like any run
    let mut opener = cli.strategy(space);
    opener.new_guess().context("Failed to compute the opening guess")?;
    let opening = opener.current_entry().map(FirstRound::from);

    let config = StatsConfig {
        show_progress: !no_progress,
        ..StatsConfig::new(game, cli.strategy_config())
    };
    let report = commands::run_stats(&config, opening)?;
    output::print_report(&report);

    if let Some(dir) = output_dir {
        let path = report.save(dir)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn run_first_guess(cli: &Cli) -> Result<()> {
    let game = cli.game()?;
    let mut strategy = cli.strategy(Arc::new(CodeSpace::new(game)));
    let opening = commands::first_guess(&mut strategy)?;
    output::print_first_guess(&opening, &cli.strategy_config().label());
    Ok(())
}
