use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cfg;
mod scenario;

use cfg::DemoConfig;

#[derive(Parser)]
#[command(author, version, about = "Toy FRI-style commitment demonstrations")]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit, split, fold, prove and verify a random point.
    Run(RunArgs),
    /// Print the full reduction tree of a commitment, root first.
    Tree(CommonArgs),
}

#[derive(Args, Clone, Debug, Default)]
struct CommonArgs {
    /// Optional path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Polynomial coefficients, lowest degree first (overrides config file).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    coefficients: Option<Vec<i64>>,

    /// Field and combine modulus (overrides config file).
    #[arg(long)]
    modulus: Option<u64>,

    /// Number of evaluation points, a power of two (overrides config file).
    /// `tree` sizes the domain from the polynomial when this is absent.
    #[arg(long)]
    num_points: Option<usize>,
}

#[derive(Args, Clone, Debug, Default)]
struct RunArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Seed for the challenge and point sampler (overrides config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = dispatch(cli.command) {
        error!(?err, "fri-demo command failed");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => {
            let mut config = load_config(&args.common)?;
            if let Some(seed) = args.seed {
                config.seed = seed;
            }
            run(&config, args.json)
        }
        Commands::Tree(args) => {
            let config = load_config(&args)?;
            print_tree(&config, args.num_points)
        }
    }
}

fn load_config(args: &CommonArgs) -> anyhow::Result<DemoConfig> {
    let mut config = DemoConfig::load(args.config.as_deref())?;
    if let Some(coefficients) = &args.coefficients {
        config.coefficients = coefficients.clone();
    }
    if let Some(modulus) = args.modulus {
        config.modulus = modulus;
        config.params.combine_modulus = modulus;
    }
    if let Some(num_points) = args.num_points {
        config.params.num_points = num_points;
    }
    Ok(config)
}

fn run(config: &DemoConfig, json: bool) -> anyhow::Result<()> {
    let report = scenario::run(config).context("demonstration scenario failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("seed       {}", report.seed);
        println!("modulus    {}", report.modulus);
        println!("challenge  {}", report.challenge);
        println!("point      {}", report.point);
        println!("split check {}", verdict(report.split_consistent));
        for entry in &report.commitments {
            println!();
            println!("[{}] {}", entry.label, entry.polynomial);
            println!("  root     {}", entry.root);
            println!("  value    {}", entry.value);
            for (level, t) in entry.proof.iter().enumerate() {
                println!("  level {level}  {} = combine({}, {})", t.parent, t.left, t.right);
            }
            println!("  verified {}", verdict(entry.verified));
        }
    }

    if !report.all_verified() {
        anyhow::bail!("at least one proof failed to verify");
    }
    info!("all proofs verified");
    Ok(())
}

fn print_tree(config: &DemoConfig, num_points: Option<usize>) -> anyhow::Result<()> {
    let (poly, commitment) = scenario::tree_commitment(config, num_points)?;

    println!("{poly} is getting committed to");
    for level in commitment.tree().levels().iter().rev() {
        println!("{level:?}");
    }
    Ok(())
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "FAILED"
    }
}
