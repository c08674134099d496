//! `lexidrill` binary: profiles, drill sessions and lexicon statistics from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;
mod prompt;

#[derive(Parser)]
#[command(name = "lexidrill", version, about = "Adaptive vocabulary trainer")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the profile lexicons
    #[arg(long, global = true)]
    profiles_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a profile from the seed lexicon
    Init {
        /// Profile name
        #[arg(long)]
        profile: String,

        /// Seed lexicon TOML file
        #[arg(long)]
        seed_lexicon: Option<PathBuf>,
    },

    /// List profiles
    Profiles,

    /// Run a drill session
    Drill {
        /// Profile name (prompted if omitted)
        #[arg(long)]
        profile: Option<String>,

        /// 0: primary -> secondary, 1: secondary -> primary
        #[arg(long)]
        direction: Option<String>,

        /// A, V, P, G or W (whole lexicon)
        #[arg(long)]
        category: Option<String>,

        /// Number of words
        #[arg(long)]
        count: Option<usize>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Sampling strategy: top-up, reservoir
        #[arg(long)]
        strategy: Option<String>,

        /// Save the session report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show weight statistics for a profile
    Stats {
        /// Profile name
        #[arg(long)]
        profile: String,

        /// Number of hardest words to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Validate a seed lexicon file
    Validate {
        /// Seed lexicon TOML file
        #[arg(long)]
        seed_lexicon: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lexidrill=info")),
        )
        .init();

    let cli = Cli::parse();
    let globals = commands::Globals {
        config: cli.config,
        profiles_dir: cli.profiles_dir,
    };

    let result = match cli.command {
        Commands::Init {
            profile,
            seed_lexicon,
        } => commands::init::execute(&globals, profile, seed_lexicon),
        Commands::Profiles => commands::profiles::execute(&globals),
        Commands::Drill {
            profile,
            direction,
            category,
            count,
            seed,
            strategy,
            report,
        } => commands::drill::execute(
            &globals,
            commands::drill::DrillArgs {
                profile,
                direction,
                category,
                count,
                seed,
                strategy,
                report,
            },
        ),
        Commands::Stats { profile, top } => commands::stats::execute(&globals, profile, top),
        Commands::Validate { seed_lexicon } => commands::validate::execute(seed_lexicon),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
