//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

/// classfinder - Find the Maven artifact that provides a Java class
#[derive(Parser, Debug)]
#[command(name = "classfinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/classfinder/config.toml)
    #[arg(long, global = true, env = "CLASSFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for artifacts providing a class
    Search(commands::search::SearchArgs),

    /// Build or inspect the local artifact index
    Index(commands::index::IndexArgs),

    /// Answer JSON commands on stdin, one per line
    Serve(commands::serve::ServeArgs),
}
