use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tamalog-tui")]
#[command(about = "Terminal client for the けんこうCheers! health tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against Firebase
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Sign in from the command line and save the session
    Login,
    /// Remove the saved session
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
