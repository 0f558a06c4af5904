//! # Transient analysis of a two-state CTMC
//!
//! A machine alternates between `up` and `down`: it fails with rate `--fail`
//! and is repaired with rate `--repair`. Starting `up`, the demo prints the
//! probability of each state at time `--time`, computed by uniformization,
//! next to the closed form and the steady state.
//!
//! Run with: `cargo run --example uniformization -- --time 1 --epsilon 1e-6`

use clap::Parser;
use color_eyre::Result;
use markov_rs::config::AnalysisConfig;
use markov_rs::ctmc::Ctmc;
use markov_rs::matrix::SquareMatrix;
use markov_rs::poisson;
use markov_rs::set::FiniteOrderedSet;

#[derive(Parser)]
#[command(author, version, about = "Transient analysis of a two-state CTMC by uniformization")]
struct Cli {
    /// Failure rate (up → down)
    #[arg(long, default_value_t = 3.0)]
    fail: f64,

    /// Repair rate (down → up)
    #[arg(long, default_value_t = 2.0)]
    repair: f64,

    /// Time horizon
    #[arg(short, long, default_value_t = 1.0)]
    time: f64,

    /// Truncation precision of the Poisson sum
    #[arg(short, long, default_value_t = 1e-4)]
    epsilon: f64,

    /// Maximum number of Poisson terms
    #[arg(long, value_name = "INT")]
    max_iterations: Option<usize>,
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

    let mut config = AnalysisConfig::default();
    if let Some(max_iterations) = cli.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }

    // "down" < "up" in the canonical order
    let states = FiniteOrderedSet::new(["up", "down"]);
    let r = SquareMatrix::from_rows(vec![vec![0.0, cli.repair], vec![cli.fail, 0.0]])?;
    let ctmc = Ctmc::new(states, r)?;
    log::info!("states = {}", ctmc.states());

    let report = ctmc.validate();
    if !report.is_valid() {
        return Err(color_eyre::eyre::eyre!("invalid rate matrix: {}", report));
    }

    let lambda = ctmc.uniformization_rate()?;
    let k = poisson::truncation_point(lambda, cli.time, cli.epsilon, config.max_iterations)?;
    println!("λ = {}", lambda);
    println!("kε = {}", k);
    println!("P_uniform =\n{}", ctmc.uniformized_matrix()?);

    let up = ctmc.states().index_of("up")?;
    let mut initial = vec![0.0; ctmc.states().len()];
    initial[up] = 1.0;
    let pi = ctmc.transient_distribution_with_config(&initial, cli.time, cli.epsilon, &config)?;

    let total = cli.fail + cli.repair;
    let exact_up = cli.repair / total + cli.fail / total * (-total * cli.time).exp();
    for (label, p) in ctmc.states().iter().zip(&pi) {
        println!("π({}) [{}] = {:.6}", cli.time, label, p);
    }
    println!("closed form [up] = {:.6}", exact_up);

    let steady = ctmc.steady_state_with_config(&config)?;
    for (label, p) in ctmc.states().iter().zip(&steady) {
        println!("π(∞) [{}] = {:.6}", label, p);
    }

    Ok(())
}
