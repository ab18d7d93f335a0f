use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "csnotes")]
#[command(about = "Read and write notes on a csnotes server from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the csnotes server (overrides CSNOTES_API_URL and config.json)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token (OS keychain, or a token file)
    Login {
        #[arg(long, value_name = "NAME")]
        username: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account on the server (8+ character username and password)
    Register {
        #[arg(long, value_name = "NAME")]
        username: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// List notes in server order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one note
    Show {
        /// Note ID
        id: String,
    },
    /// Create a new note
    #[command(alias = "add")]
    New {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Replace the title and content of a note
    Edit {
        /// Note ID
        id: String,
        #[arg(long)]
        title: String,
        /// New content (keeps the current content when omitted)
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive list / viewer / editor session (default)
    Shell,
}
