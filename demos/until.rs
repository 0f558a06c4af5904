//! # Probabilistic until over a DTMC
//!
//! Checks `P⋈p(Φ U≤k Ψ)` or `P⋈p(Φ U Ψ)` on a six-state chain where
//! `Φ = {s0, s2, s4, s5}` and `Ψ = {s4, s5}`.
//!
//! Run with:
//! - `cargo run --example until -- bounded --steps 3 --op ">=" --threshold 0.5`
//! - `cargo run --example until -- unbounded --op "<" --threshold 0.85`

use clap::{Parser, Subcommand};
use color_eyre::Result;
use markov_rs::bound::{Comparison, ProbabilityBound};
use markov_rs::dtmc::Dtmc;
use markov_rs::incidence::IncidenceVector;
use markov_rs::matrix::SquareMatrix;
use markov_rs::set::FiniteOrderedSet;

#[derive(Parser)]
#[command(author, version, about = "Probabilistic until over a DTMC")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step-bounded until: Φ U≤k Ψ
    Bounded {
        /// Step bound k
        #[arg(short, long, default_value_t = 3)]
        steps: usize,

        /// Comparison operator: <, <=, >, >=
        #[arg(long, default_value = ">=")]
        op: Comparison,

        /// Probability threshold
        #[arg(short, long, default_value_t = 0.5)]
        threshold: f64,
    },

    /// Unbounded until: Φ U Ψ
    Unbounded {
        /// Comparison operator: <, <=, >, >=
        #[arg(long, default_value = ">=")]
        op: Comparison,

        /// Probability threshold
        #[arg(short, long, default_value_t = 0.5)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let cli = Cli::parse();

    let states = FiniteOrderedSet::from_range("s", 6, 0);
    let p = SquareMatrix::from_rows(vec![
        vec![0.0, 0.1, 0.9, 0.0, 0.0, 0.0],
        vec![0.4, 0.0, 0.6, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.1, 0.1, 0.5, 0.3],
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.7, 0.3],
    ])?;
    let dtmc = Dtmc::new(states, p)?;
    let phi = dtmc.states().incidence_vector_of(["s0", "s2", "s4", "s5"])?;
    let psi = dtmc.states().incidence_vector_of(["s4", "s5"])?;
    log::info!("Sat(Φ) = {}, Sat(Ψ) = {}", phi, psi);

    let (formula, bound, probabilities) = match cli.command {
        Commands::Bounded { steps, op, threshold } => {
            let bound = ProbabilityBound::new(op, threshold)?;
            let probabilities = dtmc.bounded_until_probabilities(&phi, &psi, steps)?;
            (format!("Φ U≤{} Ψ", steps), bound, probabilities)
        }
        Commands::Unbounded { op, threshold } => {
            let bound = ProbabilityBound::new(op, threshold)?;
            let probabilities = dtmc.unbounded_until_probabilities(&phi, &psi)?;
            ("Φ U Ψ".to_string(), bound, probabilities)
        }
    };

    for (label, p) in dtmc.states().iter().zip(&probabilities) {
        println!("Pr({}, {}) = {:.6}", label, formula, p);
    }
    let sat: IncidenceVector = bound.filter(&probabilities);
    println!("Sat(P{}({})) = {}", bound, formula, dtmc.states().subset(&sat)?);

    Ok(())
}
