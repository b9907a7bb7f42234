use anyhow::{Context, Result};
use blkfacts_agent::facts::FactValue;
use blkfacts_agent::store::FactStore;
use blkfacts_agent::{assemble, cli, cycle, logging};
use blkfacts_hal::LinuxHal;
use clap::Parser;
use std::collections::BTreeMap;

fn main() -> Result<()> {
    logging::init();
    let cli = cli::Cli::parse();
    let hal = LinuxHal::new();

    match &cli.command {
        cli::Command::Collect { json } => collect(&hal, *json),
        cli::Command::Query => query(&hal),
    }
}

fn collect(hal: &LinuxHal, json: bool) -> Result<()> {
    let mut store = FactStore::new();
    store.commit(cycle::collect(hal));

    if json {
        let map: BTreeMap<&str, &FactValue> = store.iter().map(|(name, value, _)| (name, value)).collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (name, value, _) in store.iter() {
            println!("{name} => {value}");
        }
    }
    Ok(())
}

fn query(hal: &LinuxHal) -> Result<()> {
    let mut store = FactStore::new();
    store.commit(cycle::collect(hal));

    let devices = assemble::assemble(&store).context("reassembling blkid facts")?;
    println!("{}", serde_json::to_string_pretty(&devices)?);
    Ok(())
}
