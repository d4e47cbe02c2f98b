//! SUNTIM CLI - audit team roster driver
//!
//! Loads a project document, replays a script of gestures and commands
//! against an editing session, prints what the script asks for and
//! optionally saves the result.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SUNTIM_*`)
//! 3. Project config (`.suntim/config.toml` in the root directory)
//! 4. Global config (`~/.suntim/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `SUNTIM_DEBUG`: Enable debug mode (`true`/`false`)
//! - `SUNTIM_HISTORY_CAPACITY`: Undo history depth
//! - `SUNTIM_GROW_ON_ROLE_CHANGE`: Grow a full role on role change
//! - `SUNTIM_PROJECT_DIR`: Directory used by the `save` script command
//!
//! # Output
//!
//! stdout carries rendered output only. Logs and command errors
//! (`error [CODE]: message`) go to stderr.

mod driver;
mod render;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use driver::Driver;
use script::ScriptParser;
use std::io::Read;
use std::path::{Path, PathBuf};
use suntim_runtime::config::{ConfigLoader, ConfigResolver, SuntimConfig};
use suntim_runtime::project::{ProjectDocument, ProjectStore};
use suntim_runtime::RosterSession;
use suntim_types::ErrorCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// SUNTIM CLI - audit team roster driver
#[derive(Parser, Debug)]
#[command(name = "suntim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Root directory for project config (defaults to current directory)
    #[arg(short = 'C', long = "root", value_name = "DIR")]
    root: Option<PathBuf>,

    /// Project document to open; a directory opens its newest document
    #[arg(long, value_name = "FILE")]
    project: Option<PathBuf>,

    /// Script to replay (defaults to stdin)
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Save the result; a directory gets a generated file name
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Stop at the first failing command
    #[arg(long)]
    strict: bool,

    /// Override the undo history depth
    #[arg(long, value_name = "N")]
    history: Option<usize>,
}

/// CLI-based configuration resolver.
///
/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    debug: bool,
    history: Option<usize>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        Self {
            project_root: project_root(args.root.clone(), std::env::current_dir),
            debug: args.debug,
            history: args.history,
        }
    }

    fn resolve(&self) -> Result<SuntimConfig> {
        let mut config = ConfigLoader::new()
            .with_project_root(&self.project_root)
            .load()
            .context("config error")?;
        self.apply(&mut config);
        Ok(config)
    }
}

/// `--root`, else the working directory, else `.`.
///
/// Runs before the subscriber is installed, so the fallback is reported
/// on stderr directly.
fn project_root(
    root: Option<PathBuf>,
    current_dir: impl FnOnce() -> std::io::Result<PathBuf>,
) -> PathBuf {
    root.unwrap_or_else(|| {
        current_dir().unwrap_or_else(|e| {
            eprintln!("warning: failed to get current directory ({e}), using '.'");
            PathBuf::from(".")
        })
    })
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut SuntimConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(n) = self.history {
            config.history.capacity = n;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.resolve()?;

    // Terminal filter: --debug > --verbose > RUST_LOG env > default "warn"
    let filter = if args.debug || config.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(path = %resolver.project_root.display(), "Project root");

    let mut driver = open(args.project.as_deref(), &config)?;
    let script = read_script(args.script.as_deref())?;

    let mut failures = 0usize;
    for (n, line) in script.lines().enumerate() {
        match driver.execute(ScriptParser::parse(line)) {
            Ok(Some(text)) => println!("{text}"),
            Ok(None) => {}
            Err(e) => {
                failures += 1;
                eprintln!("error [{}]: {e}", e.code());
                if args.strict {
                    anyhow::bail!("script stopped at line {}", n + 1);
                }
            }
        }
    }
    info!(failures, "Script finished");

    if let Some(ref target) = args.save {
        let path = save(&driver.document(), target)?;
        println!("saved {}", path.display());
    }

    Ok(())
}

/// Opens `project`, or an empty session when none is given.
fn open(project: Option<&Path>, config: &SuntimConfig) -> Result<Driver> {
    let Some(path) = project else {
        return Ok(Driver::new(RosterSession::empty(config), config));
    };

    let doc = if path.is_dir() {
        let (file, doc) = ProjectStore::new(path)?
            .latest()?
            .with_context(|| format!("no project documents in {}", path.display()))?;
        info!(path = %file.display(), "Opening newest project");
        doc
    } else {
        ProjectStore::load(path).with_context(|| format!("cannot open {}", path.display()))?
    };

    Driver::from_document(doc, config).with_context(|| format!("invalid project {}", path.display()))
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("cannot read script {}", p.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read script from stdin")?;
            Ok(buf)
        }
    }
}

fn save(doc: &ProjectDocument, target: &Path) -> Result<PathBuf> {
    if target.is_dir() {
        Ok(ProjectStore::new(target)?.save(doc)?)
    } else {
        ProjectStore::save_to(doc, target)
            .with_context(|| format!("cannot save {}", target.display()))?;
        Ok(target.to_path_buf())
    }
}
