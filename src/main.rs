use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use boxsplit_core::{decompose, file_stem, BoxNode, DecomposeOptions, OrphanPolicy};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Split a flat box export into per-parent layout documents", long_about = None)]
struct Args {
    /// Input JSON file: a flat array of boxes with root-canvas percentages
    input: PathBuf,

    /// Output directory (default: a `layouts` directory beside the input)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also emit a document of the root-level boxes under this name
    #[arg(long)]
    root: Option<String>,

    /// Drop the whole subtree under a box whose parent cannot be resolved,
    /// instead of only its membership in the missing group
    #[arg(long)]
    prune_orphans: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    if !value.is_array() {
        bail!(
            "Input {} must be a JSON array of boxes",
            args.input.display()
        );
    }
    let boxes: Vec<BoxNode> = serde_json::from_value(value)
        .with_context(|| format!("Failed to decode boxes from {}", args.input.display()))?;

    let options = DecomposeOptions {
        root_key: args.root.clone(),
        orphan_policy: if args.prune_orphans {
            OrphanPolicy::PruneDescendants
        } else {
            OrphanPolicy::KeepDescendants
        },
    };
    let decomposition = decompose(&boxes, &options)?;
    tracing::info!(
        boxes = boxes.len(),
        documents = decomposition.len(),
        "decomposition complete"
    );

    let out_dir = match args.out {
        Some(dir) => dir,
        None => match args.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join("layouts"),
            _ => PathBuf::from("layouts"),
        },
    };
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create directory {}", out_dir.display()))?;

    let mut written = 0;
    for (key, document) in decomposition.documents() {
        let path = out_dir.join(format!("{}.json", file_stem(key)));
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{}", path.display());
        written += 1;
    }

    eprintln!("{written} file(s) written to {}", out_dir.display());
    Ok(())
}
