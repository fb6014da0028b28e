use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "polylink",
    about = "Read and write JSON documents linked through a content-addressed store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory of the filesystem content store
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// TOML configuration file (store and cache selection)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a JSON document and print its address
    Put(PutArgs),
    /// Print the JSON value at a path, resolving links
    Get(GetArgs),
    /// Print the address a document has or would receive
    Address(AddressArgs),
    /// Report whether a document is a link
    IsLink(IsLinkArgs),
}

#[derive(Args)]
pub struct PutArgs {
    /// File holding the document
    pub file: PathBuf,
}

#[derive(Args)]
pub struct GetArgs {
    /// Address of the root document
    pub address: String,
    /// Slash-separated field path; omit for the whole document
    pub path: Option<String>,
    /// Leave a link at the final segment unresolved
    #[arg(long)]
    pub unresolved: bool,
}

#[derive(Args)]
pub struct AddressArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct IsLinkArgs {
    pub file: PathBuf,
}
