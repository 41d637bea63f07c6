use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agora", about = "Agora: a small social network backend", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the sample feed, newest first
    Feed(ShowArgs),
    /// Print the sample users with follow counts
    Users(ShowArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory with the browser client (overrides the config file)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
    /// Start with an empty store instead of the sample data
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
