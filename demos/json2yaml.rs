//! Converts JSON files to documents.
//!
//! Run with: cargo run --example json2yaml -- data.json [more.json ...]

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "json2yaml", about = "Convert JSON files to documents", version)]
struct Args {
    /// Increase output logging verbosity.
    #[arg(short, long)]
    verbose: bool,

    /// JSON files to convert. Each must hold an object.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Warn
    })?;

    for path in &args.files {
        log::info!("converting {}", path.display());
        let data = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let json: serde_json::Value = serde_json::from_str(&data)
            .with_context(|| format!("cannot parse JSON file {}", path.display()))?;
        if !json.is_object() {
            bail!("{} does not hold a JSON object", path.display());
        }
        let text = serde_yamlite::to_string(&json)
            .with_context(|| format!("cannot generate a document for {}", path.display()))?;
        print!("{}", text);
    }

    Ok(())
}
