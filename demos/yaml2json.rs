//! Converts documents to pretty-printed JSON.
//!
//! Run with: cargo run --example yaml2json -- config.yaml [more.yaml ...]

use anyhow::{Context, Result};
use clap::Parser;
use serde_yamlite::{from_file, Value};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "yaml2json", about = "Convert documents to JSON", version)]
struct Args {
    /// Increase output logging verbosity.
    #[arg(short, long)]
    verbose: bool,

    /// Documents to convert.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Trace
    } else {
        log::Level::Warn
    })?;

    for path in &args.files {
        log::info!("converting {}", path.display());
        let doc: Value = from_file(path)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        let json = serde_json::to_string_pretty(&doc)
            .with_context(|| format!("cannot generate JSON for {}", path.display()))?;
        println!("{}", json);
    }

    Ok(())
}
