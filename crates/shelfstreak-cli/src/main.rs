use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shelfstreak_core::{logging, Config};

mod commands;

#[derive(Parser)]
#[command(
    name = "shelfstreak-cli",
    version,
    about = "Shelfstreak reading tracker CLI",
    disable_help_subcommand = true
)]
struct Cli {
    /// User id to act as
    #[arg(long, global = true, default_value = "local")]
    user: String,

    /// Server id the command is issued in
    #[arg(long, global = true, default_value = "local")]
    guild: String,

    /// Print replies as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Pin the calendar date (YYYY-MM-DD)
    #[arg(long, global = true, hide = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Bot(commands::bot::BotCommand),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Write a copy of the database
    Backup {
        /// Target directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = Config::load()
        .ok()
        .and_then(|config| config.log_directory().ok())
        .and_then(|dir| logging::init(&dir).ok());

    let result = match cli.command {
        Commands::Bot(cmd) => {
            let session = commands::bot::Session {
                user: cli.user,
                guild: cli.guild,
                json: cli.json,
                today: cli.today,
            };
            commands::bot::run(session, cmd).await
        }
        Commands::Config { action } => commands::config::run(action),
        Commands::Backup { dir } => commands::backup::run(dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
