//! classfinder search - Find artifacts providing a class
//!
//! Runs the same ranked search the serve loop answers, against the
//! configured (or overridden) index and usage catalog.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::{FinderError, Result};
use crate::search::{ClassMatch, MatchKind, RankingPolicy};
use crate::service::SearchService;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Class name, simple (`ArrayList`) or qualified (`java.util.ArrayList`)
    pub query: String,

    /// Local index directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub index_dir: Option<PathBuf>,

    /// Usage catalog JSON file (overrides config)
    #[arg(long, value_name = "FILE")]
    pub usage: Option<PathBuf>,

    /// Skip the remote search endpoint
    #[arg(long)]
    pub offline: bool,

    /// Maximum number of results to print
    #[arg(long, short, default_value = "20")]
    pub limit: usize,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(FinderError::QueryParse("class name is empty".to_string()));
    }

    let mut config = ctx.config.clone();
    if args.offline {
        config.remote.enabled = false;
    }
    let index_dir = args
        .index_dir
        .clone()
        .unwrap_or_else(|| config.paths.index_dir.clone());
    let usage = args
        .usage
        .clone()
        .unwrap_or_else(|| config.paths.usage_catalog.clone());

    let service = SearchService::initialize(index_dir, usage, &config);
    let results = service.search(query);
    let starred = RankingPolicy::from_config(&config.ranking).starred_size(results.len());
    let shown = &results[..results.len().min(args.limit)];

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "query": query,
            "count": results.len(),
            "starred": starred,
            "local_index": service.is_index_open(),
            "results": shown,
        })));
    }

    display_results(&service, query, shown, results.len(), starred);
    Ok(())
}

fn display_results(
    service: &SearchService,
    query: &str,
    shown: &[ClassMatch],
    total: usize,
    starred: usize,
) {
    let mut layout = HumanLayout::new();
    layout.title(&format!("Artifacts for '{query}'"));

    if !service.is_index_open() {
        layout.push_line(format!(
            "{} local index unavailable at {}",
            "!".yellow(),
            service.index_path().display()
        ));
        layout.blank();
    }

    if shown.is_empty() {
        layout.push_line("No matching artifacts found".dimmed().to_string());
        emit_human(layout);
        return;
    }

    for (i, m) in shown.iter().enumerate() {
        let marker = if i < starred { "★".yellow().to_string() } else { " ".to_string() };
        let kind = match m.match_kind {
            MatchKind::Prefix => "prefix".green(),
            MatchKind::Fuzzy => "fuzzy".magenta(),
        };
        layout.push_line(format!(
            "{marker} {} {}",
            m.fully_qualified_class_name.bold(),
            format!("[{kind}]").dimmed()
        ));
        layout.push_line(format!(
            "    {}:{}:{}  {}",
            m.group_id.cyan(),
            m.artifact_id.cyan(),
            m.version,
            format!("usage {}", m.usage_score).dimmed()
        ));
    }

    if total > shown.len() {
        layout.blank();
        layout.kv("more", &format!("{} not shown", total - shown.len()));
    }
    emit_human(layout);
}
