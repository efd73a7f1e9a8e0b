use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{convert, info, interface, rank};

#[derive(Parser, Debug)]
#[command(
    name = "dockforge",
    about = "Converts molecular-docking run output into a normalized archive model of the docked assembly.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a full run directory into the normalized archive model.
    Convert(convert::ConvertArgs),
    /// Inspect one coordinate file: chains, counts, sequences.
    Info(info::InfoArgs),
    /// Show the cluster ranking of a run directory.
    Rank(rank::RankArgs),
    /// Detect the inter-chain interface of one coordinate file.
    Interface(interface::InterfaceArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => convert::run(&args),
        Command::Info(args) => info::run(&args),
        Command::Rank(args) => rank::run(&args),
        Command::Interface(args) => interface::run(&args),
    }
}
