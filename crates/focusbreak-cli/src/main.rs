use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod presenter;

#[derive(Parser)]
#[command(name = "focusbreak", version, about = "Focusbreak CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive focus session in the terminal
    Run {
        /// Pin the rest-interval RNG for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Print session events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { seed, json } => commands::run::run(seed, json),
        Commands::Completions { shell } => commands::completions::run(shell, Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
