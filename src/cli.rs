//! Command-line surface shared by `optimize-images` and `overwrite-originals`.
//!
//! Both binaries take the same flags and follow the same flow:
//!
//! ```text
//! parse args → init logging → load config → enumerate → per-file pipeline → summary
//! ```
//!
//! Only setup failures (config, glob patterns, directory walk, logger) end the
//! run with an error. Per-file problems are reported in the summary and the
//! process still exits 0.

use crate::config::{self, ConfigError, ToolConfig};
use crate::derive::generate_derivatives;
use crate::output::{self, Tool};
use crate::overwrite::overwrite_originals;
use crate::results::ConversionResult;
use crate::{logging, scan};
use std::path::PathBuf;
use tracing::debug;

/// Flags common to both binaries.
#[derive(clap::Args, Clone, Debug)]
pub struct CommonArgs {
    /// Project root that glob patterns are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Config file (defaults to <root>/image-optimizer.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a documented stock image-optimizer.toml and exit
    #[arg(long)]
    pub print_config: bool,
}

impl CommonArgs {
    /// Resolve the effective configuration.
    ///
    /// An explicit `--config` must exist; the implicit root file is optional.
    pub fn load_config(&self) -> Result<ToolConfig, ConfigError> {
        match &self.config {
            Some(path) if !path.exists() => Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", path.display()),
            ))),
            Some(path) => config::load_config_file(path),
            None => config::load_config(&self.root),
        }
    }
}

/// Run one tool end to end.
pub fn run(tool: Tool, args: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    logging::init(args.verbose)?;

    let config = args.load_config()?;
    debug!(root = %args.root.display(), patterns = ?config.patterns, "configuration loaded");

    let files = scan::enumerate(&args.root, &config.patterns)?;
    if files.is_empty() {
        output::print_nothing_found(tool);
        return Ok(());
    }

    output::print_found(tool, files.len());
    let report = |result: &ConversionResult| output::print_progress(tool, result);

    let results = match tool {
        Tool::Derivatives => {
            generate_derivatives(&args.root, &files, &config.derivatives, report)
        }
        Tool::Overwrite => overwrite_originals(&args.root, &files, &config.overwrite, report),
    };

    output::print_summary(tool, &results);
    output::print_done(tool);
    Ok(())
}
