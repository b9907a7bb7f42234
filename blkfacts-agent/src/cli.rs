use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Block-device facts from blkid")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one collection cycle and print the resulting facts
    Collect {
        #[arg(long)]
        json: bool,
    },
    /// Collect, reassemble the device records, and print them as JSON
    Query,
}
