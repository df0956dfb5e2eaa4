//! fracquiz CLI: the terminal game and its companion commands.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use fracquiz_core::Level;

mod commands;

#[derive(Parser)]
#[command(name = "fracquiz", version, about = "Fraction and decimal conversion quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz in the terminal
    Play {
        /// Seed for a reproducible question sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print generated questions without playing
    Ask {
        /// Level to draw from (1, 2 or 3)
        #[arg(long, default_value = "1")]
        level: Level,

        /// Seed for a reproducible question sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Number of questions
        #[arg(long, default_value = "1")]
        count: usize,

        /// Print the expected answer under each question
        #[arg(long)]
        show_answer: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the configured question pools
    Pools {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Serve the quiz over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Seed for a reproducible question sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Seconds a session may sit idle before it is dropped
        #[arg(long, default_value = "1800")]
        session_ttl: u64,

        /// Most sessions held at once
        #[arg(long, default_value = "10000")]
        max_sessions: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter fracquiz.toml
    Init,

    /// Check a config file for problems
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        "fracquiz=info"
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { seed, config } => commands::play::execute(seed, config),
        Commands::Ask {
            level,
            seed,
            count,
            show_answer,
            config,
        } => commands::ask::execute(level, seed, count, show_answer, config),
        Commands::Pools { config } => commands::pools::execute(config),
        Commands::Serve {
            addr,
            seed,
            session_ttl,
            max_sessions,
            config,
        } => commands::serve::execute(addr, seed, session_ttl, max_sessions, config).await,
        Commands::Init => commands::init::execute(),
        Commands::Validate { config } => commands::validate::execute(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
