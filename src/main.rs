//! vidshelf - in-memory video catalogue and player
//!
//! # Usage
//!
//! ```bash
//! # Interactive shell
//! vidshelf --library data/videos.txt
//!
//! # Scripted session
//! vidshelf run session.txt --answer-prompts
//!
//! # One-shot queries
//! vidshelf search cat --json
//! vidshelf list
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vidshelf::cli::{Cli, Command, ExitCode, Output};
use vidshelf::commands;
use vidshelf::config::Config;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };

    init_tracing(&cli, &config);

    run(cli, config).await.into()
}

/// Install the stderr subscriber. RUST_LOG beats --verbose beats the config.
fn init_tracing(cli: &Cli, config: &Config) {
    let fallback = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_filter.clone().unwrap_or_else(|| "warn".to_string())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli, config: Config) -> ExitCode {
    let output = Output::new(&cli);
    // Sessions render text unless JSON was asked for explicitly
    let session_output = Output {
        json: cli.json,
        quiet: cli.quiet,
    };
    let library = config.library_path(cli.library.as_deref());
    let seed = cli.seed.or(config.random_seed);
    let player = commands::build_player(&library, seed).await;

    match cli.command {
        None | Some(Command::Shell) => {
            commands::shell_cmd(player, &config, &session_output).await
        }

        Some(Command::Run(cmd)) => commands::run_cmd(cmd, player, &session_output).await,

        Some(Command::List) => commands::list_cmd(&player, &output),

        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &player, &output),

        Some(Command::Count) => commands::count_cmd(&player, &output),
    }
}
