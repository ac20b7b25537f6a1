//! crud - users/products dashboard in your terminal

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod output;
mod transport;

use commands::{ProductCommands, UserCommands};

/// Users/products dashboard in your terminal
#[derive(Parser)]
#[command(name = "crud", version, about, long_about = None)]
struct Cli {
    /// API base URL, including the /api prefix
    #[arg(long, global = true, env = "CRUD_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend and database connectivity
    Status,

    /// Show status plus both collections
    Dashboard,

    /// List, add or delete users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// List, add or delete products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut dash = commands::dashboard(&cli.api_url);

    let result = match cli.command {
        Commands::Status => commands::status(&mut dash),
        Commands::Dashboard => commands::overview(&mut dash),
        Commands::Users { command } => commands::users(&mut dash, command, commands::confirm),
        Commands::Products { command } => commands::products(&mut dash, command, commands::confirm),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output::error(&format!("Error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
