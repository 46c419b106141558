//! Formlift CLI - extract structured form fields from flattened text.
//!
//! Reads one or more text files (the output of an upstream document text
//! producer), runs the extraction pipeline, and writes the field list as
//! JSON next to each input or to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use rayon::prelude::*;

use formlift_catalog::Catalog;
use formlift_core::Field;
use formlift_pipeline::FormExtractor;

#[derive(Parser, Debug)]
#[command(name = "formlift", version, about = "Extract form fields from flattened document text")]
struct Args {
    /// Input text files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Custom catalog JSON (defaults to the built-in catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Write a `.fields.json` file next to each input instead of stdout.
    #[arg(short = 'o', long)]
    output: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let custom;
    let catalog: &Catalog = match &args.catalog {
        Some(path) => {
            custom = Catalog::from_file(path)
                .with_context(|| format!("loading catalog {}", path.display()))?;
            &custom
        }
        None => Catalog::builtin(),
    };
    let extractor = FormExtractor::with_catalog(catalog);

    // Documents are independent; failing files are skipped with a warning
    // so one bad input never blocks the rest of a batch.
    let results: Vec<(PathBuf, Vec<Field>)> = args
        .inputs
        .par_iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(text) => Some((path.clone(), extractor.extract(&text))),
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                None
            }
        })
        .collect();

    for (path, fields) in &results {
        let json = if args.pretty {
            serde_json::to_string_pretty(fields)?
        } else {
            serde_json::to_string(fields)?
        };
        if args.output {
            let out = output_path(path);
            fs::write(&out, &json).with_context(|| format!("writing {}", out.display()))?;
            println!("{} -> {} ({} fields)", path.display(), out.display(), fields.len());
        } else {
            println!("{json}");
        }
    }
    Ok(())
}

/// `intake.txt` -> `intake.fields.json`, in the input's directory.
fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    input.with_file_name(format!("{}.fields.json", stem.to_string_lossy()))
}
