//! classfinder serve - JSON command loop over stdin/stdout
//!
//! One command object per input line, one response object per output line.
//! Lines that do not parse as a command get a structured error line instead.

use std::io::{self, BufRead, Write};

use clap::Args;
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::error::{FinderError, Result};
use crate::handler::{Command, CommandRegistry};
use crate::service::SearchService;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Initialize from the configured index and usage catalog at startup
    /// instead of waiting for an `initialize_searcher` command
    #[arg(long)]
    pub preload: bool,
}

pub fn run(ctx: &AppContext, args: &ServeArgs) -> Result<()> {
    let registry = if args.preload {
        let service = SearchService::initialize(
            &ctx.config.paths.index_dir,
            &ctx.config.paths.usage_catalog,
            &ctx.config,
        );
        CommandRegistry::with_service(ctx.config.clone(), service)
    } else {
        CommandRegistry::new(ctx.config.clone())
    };

    info!(preload = args.preload, "Serving commands on stdin");
    let handled = serve_lines(&registry, io::stdin().lock(), io::stdout().lock())?;
    info!(handled, "Input closed; shutting down");
    Ok(())
}

/// Answer every command read from `reader`. Returns the number of lines
/// answered once the input ends.
pub fn serve_lines(
    registry: &CommandRegistry,
    reader: impl BufRead,
    mut writer: impl Write,
) -> Result<usize> {
    let mut handled = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(request = %line, "<-");

        let payload = match serde_json::from_str::<Command>(&line) {
            Ok(command) => serde_json::to_string(&registry.dispatch(command))?,
            Err(e) => {
                warn!(error = %e, "Unparseable command");
                let err = FinderError::Json(e).to_structured();
                serde_json::to_string(&serde_json::json!({ "error": err }))?
            }
        };

        debug!(response = %payload, "->");
        writeln!(writer, "{payload}")?;
        writer.flush()?;
        handled += 1;
    }
    Ok(handled)
}
