use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use eight_puzzle::{Board, Outcome, Renderer, Solver};

/// Solve an 8-puzzle optimally and play the solution back.
#[derive(Parser)]
#[command(name = "eight-puzzle", version, about)]
struct Cli {
    /// Start board, nine cells row-major; `_` or 0 is the blank.
    #[arg(default_value = "7 4 8 / 5 3 2 / _ 1 6")]
    board: String,
    /// Ignore BOARD and start from a random solvable board.
    #[arg(long)]
    shuffle: bool,
    /// Seed for --shuffle.
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,
    /// Pause between steps, in milliseconds.
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
    /// Print each step instead of redrawing the terminal.
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let start = if cli.shuffle {
        match cli.seed {
            Some(seed) => Board::shuffled(&mut StdRng::seed_from_u64(seed)),
            None => Board::shuffled(&mut thread_rng()),
        }
    } else {
        cli.board
            .parse::<Board>()
            .with_context(|| format!("invalid start board '{}'", cli.board))?
    };

    let outcome = Solver::new(start).solve();
    let solution = match outcome {
        Outcome::Solved(solution) => solution,
        Outcome::NoSolution(stats) => {
            println!("No solution found ({} boards explored)", stats.expanded);
            return Ok(());
        }
        Outcome::Cancelled(_) => anyhow::bail!("search was cancelled"),
    };

    let delay = Duration::from_millis(cli.delay_ms);
    let played = if cli.plain {
        Renderer::plain(std::io::stdout(), delay).play(&solution.path)
    } else {
        Renderer::terminal(delay).play(&solution.path)
    };
    played.context("failed to draw solution")?;

    let moves: Vec<String> = solution.moves().iter().map(|m| m.to_string()).collect();
    println!(
        "Found optimal solution with {} moves: {}",
        solution.len(),
        moves.join(" ")
    );
    Ok(())
}
