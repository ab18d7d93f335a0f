//! csnotes CLI - terminal client for a csnotes server
//!
//! One-shot commands for scripting and an interactive shell over the list,
//! viewer and editor panels.

mod auth;
mod cli;
mod commands;
mod config;
mod error;
mod terminal;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::auth_cmd::{run_login, run_logout, run_register};
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::shell::run_shell;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "csnotes=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api_url = cli.api_url;

    match cli.command {
        Some(Commands::Login { username, password }) => {
            run_login(api_url, &username, &password).await?;
        }
        Some(Commands::Register { username, password }) => {
            run_register(api_url, &username, &password).await?;
        }
        Some(Commands::Logout) => run_logout()?,
        Some(Commands::List { json }) => run_list(api_url, json).await?,
        Some(Commands::Show { id }) => run_show(api_url, &id).await?,
        Some(Commands::New { title, content }) => run_add(api_url, &title, &content).await?,
        Some(Commands::Edit { id, title, content }) => {
            run_edit(api_url, &id, &title, content.as_deref()).await?;
        }
        Some(Commands::Delete { id, yes }) => run_delete(api_url, &id, yes).await?,
        Some(Commands::Shell) | None => run_shell(api_url).await?,
    }

    Ok(())
}
