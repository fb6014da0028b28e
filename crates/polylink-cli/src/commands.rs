use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use polylink::{
    assert_link, InMemoryContentStore, Polymorph, PolymorphConfig, RawJson, Resolver, StoreConfig,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Put(args) => cmd_put(&build_resolver(&cli)?, args),
        Command::Get(args) => cmd_get(&build_resolver(&cli)?, args),
        Command::Address(args) => cmd_address(args),
        Command::IsLink(args) => cmd_is_link(args),
    }
}

fn build_resolver(cli: &Cli) -> anyhow::Result<Resolver> {
    let mut config = match &cli.config {
        Some(path) => PolymorphConfig::load(path)?,
        None => PolymorphConfig::default(),
    };
    if let Some(root) = &cli.store {
        config.store = StoreConfig::Fs { root: root.clone() };
    }
    if config.store == StoreConfig::Memory {
        anyhow::bail!("no content store configured: pass --store <dir> or --config <file>");
    }
    Ok(config.build_resolver()?)
}

fn read_document(path: &Path) -> anyhow::Result<RawJson> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice::<serde_json::Value>(&bytes)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(RawJson::from(bytes))
}

fn cmd_put(resolver: &Resolver, args: &PutArgs) -> anyhow::Result<()> {
    let raw = read_document(&args.file)?;
    let address = Polymorph::from_raw(resolver.clone(), raw).compute_address()?;
    println!("{} {}", "✓".green().bold(), address.to_string().yellow());
    Ok(())
}

fn cmd_get(resolver: &Resolver, args: &GetArgs) -> anyhow::Result<()> {
    println!("{}", render_get(resolver, args)?);
    Ok(())
}

fn render_get(resolver: &Resolver, args: &GetArgs) -> anyhow::Result<String> {
    let doc = Polymorph::from_address(resolver.clone(), args.address.as_str());
    let raw = match (&args.path, args.unresolved) {
        (None, false) => doc.as_raw()?,
        (None, true) => doc.encode()?,
        (Some(path), false) => doc.get_raw(path)?,
        (Some(path), true) => doc.get_unresolved_raw(path)?,
    };
    Ok(match raw.to_value::<serde_json::Value>() {
        Ok(value) => serde_json::to_string_pretty(&value)?,
        Err(_) => raw.to_string(),
    })
}

/// Addresses as assigned by the bundled store backends, computed without
/// touching any configured store.
fn cmd_address(args: &AddressArgs) -> anyhow::Result<()> {
    let raw = read_document(&args.file)?;
    let scratch = Resolver::new(Arc::new(InMemoryContentStore::new()));
    let address = Polymorph::from_raw(scratch, raw).compute_address()?;
    println!("{}", address.to_string().yellow());
    Ok(())
}

fn cmd_is_link(args: &IsLinkArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    match assert_link(&bytes) {
        Ok(address) => println!("{} {}", "link".green().bold(), address.to_string().yellow()),
        Err(reason) => println!("{} ({})", "literal".cyan(), reason.to_string().dimmed()),
    }
    Ok(())
}
