//! sensorwin CLI — Command-line interface for stream simulation and
//! signal smoothing.
//!
//! Usage:
//!   sensorwin simulate [OPTIONS]    Run the synthetic sample stream
//!   sensorwin smooth [VALUES]...    Smooth scalars from args or stdin

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "sensorwin",
    about = "Real-time sensor sample windowing and smoothing",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a synthetic sample stream through a monitored series
    Simulate {
        /// Number of samples to stream
        #[arg(short, long, default_value = "32")]
        samples: usize,

        /// Window capacity
        #[arg(short, long, default_value = "8")]
        capacity: usize,

        /// Components per sample
        #[arg(short, long, default_value = "1")]
        dimension: usize,

        /// Filter algorithm: ewma|sma|passthrough
        #[arg(short, long, default_value = "ewma")]
        filter: String,

        /// Fixed EWMA weight in (0, 1); auto-computed when omitted
        #[arg(long)]
        weight: Option<f64>,

        /// Polling rate (Hz)
        #[arg(short, long, default_value = "240")]
        rate: u32,

        /// Seed for the synthetic signal
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Smooth a scalar signal given as arguments (or stdin when empty)
    Smooth {
        /// Input values
        values: Vec<f64>,

        /// Window capacity
        #[arg(short, long, default_value = "8")]
        capacity: usize,

        /// Filter algorithm: ewma|sma|passthrough
        #[arg(short, long, default_value = "ewma")]
        filter: String,

        /// Fixed EWMA weight in (0, 1); auto-computed when omitted
        #[arg(long)]
        weight: Option<f64>,

        /// Apply the velocity-dependent motion gain to the output
        #[arg(long)]
        motion_gain: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    sensorwin_common::logging::init_logging(&sensorwin_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Simulate {
            samples,
            capacity,
            dimension,
            filter,
            weight,
            rate,
            seed,
        } => commands::simulate::run(samples, capacity, dimension, &filter, weight, rate, seed).await,
        Commands::Smooth {
            values,
            capacity,
            filter,
            weight,
            motion_gain,
        } => commands::smooth::run(values, capacity, &filter, weight, motion_gain),
    }
}
