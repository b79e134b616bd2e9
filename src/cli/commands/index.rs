//! classfinder index - Build or inspect the local artifact index

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::{FinderError, Result};
use crate::search::{IndexBuilder, LocalIndex};

#[derive(Args, Debug)]
pub struct IndexArgs {
    #[command(subcommand)]
    pub command: IndexCommand,
}

#[derive(Subcommand, Debug)]
pub enum IndexCommand {
    /// Build an index from a JSON-lines artifact listing
    Build(BuildArgs),

    /// Show whether an index opens and how many artifacts it holds
    Info(InfoArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Listing with one `{"g","a","v","classes"}` object per line
    #[arg(long, short, value_name = "FILE")]
    pub input: PathBuf,

    /// Index directory to create or replace (default: configured index_dir)
    #[arg(long, short, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Index directory (default: configured index_dir)
    #[arg(long, value_name = "DIR")]
    pub index_dir: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &IndexArgs) -> Result<()> {
    match &args.command {
        IndexCommand::Build(build) => run_build(ctx, build),
        IndexCommand::Info(info) => run_info(ctx, info),
    }
}

fn run_build(ctx: &AppContext, args: &BuildArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| ctx.config.paths.index_dir.clone());
    let start = Instant::now();

    let reader = BufReader::new(File::open(&args.input)?);
    let mut builder = IndexBuilder::create(&output)?;
    builder.add_jsonl(reader)?;
    let count = builder.finish()?;
    let elapsed = start.elapsed();

    info!(input = %args.input.display(), output = %output.display(), artifacts = count, "Built index");

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "index_dir": output.display().to_string(),
            "artifacts": count,
            "elapsed_ms": elapsed.as_millis(),
        })));
    }

    if !ctx.quiet {
        println!(
            "{} Indexed {} artifacts into {} in {:.2?}",
            "✓".green(),
            count.to_string().bold(),
            output.display(),
            elapsed
        );
    }
    Ok(())
}

fn run_info(ctx: &AppContext, args: &InfoArgs) -> Result<()> {
    let index_dir = args
        .index_dir
        .clone()
        .unwrap_or_else(|| ctx.config.paths.index_dir.clone());

    let index = LocalIndex::new(&index_dir);
    if !index.open() {
        return Err(FinderError::IndexMissing(index_dir.display().to_string()));
    }
    let artifacts = index.num_docs();

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "index_dir": index_dir.display().to_string(),
            "artifacts": artifacts,
        })));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Local index")
        .kv("path", &index_dir.display().to_string())
        .kv("artifacts", &artifacts.to_string());
    emit_human(layout);
    Ok(())
}
