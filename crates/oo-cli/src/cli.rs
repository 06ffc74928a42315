use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "oo",
    about = "Inspect prototype chains and merges in JSON object scenes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the objects in a scene
    List(ListArgs),
    /// Resolve a key through an object's prototype chain
    Resolve(ResolveArgs),
    /// Show an object's uber chain
    Chain(ChainArgs),
    /// Merge source objects into a target and print the result
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct ListArgs {
    pub scene: PathBuf,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub scene: PathBuf,
    pub object: String,
    pub key: String,
}

#[derive(Args)]
pub struct ChainArgs {
    pub scene: PathBuf,
    pub object: String,
}

#[derive(Args)]
pub struct MergeArgs {
    pub scene: PathBuf,
    pub target: String,
    #[arg(required = true)]
    pub sources: Vec<String>,
    /// Copy only keys the sources own directly
    #[arg(long)]
    pub own_only: bool,
    /// Copy undefined values instead of skipping them
    #[arg(long)]
    pub keep_absent: bool,
    /// TOML file with merge options
    #[arg(long)]
    pub config: Option<PathBuf>,
}
