//! Per-invocation state shared by CLI commands.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;

pub struct AppContext {
    pub config: Config,
    pub robot_mode: bool,
    pub quiet: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        Ok(Self {
            config,
            robot_mode: cli.json,
            quiet: cli.quiet,
        })
    }
}
