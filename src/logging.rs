//! Tracing subscriber setup for the command line.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Level for this crate's own events given the command-line flags.
pub fn crate_level(verbose: bool, logfile: bool) -> &'static str {
    match (verbose, logfile) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    }
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool, logfile: bool) -> String {
    format!("warn,diffscribe={}", crate_level(verbose, logfile))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Install the global subscriber: stderr by default, or an append-only log file.
pub fn init(verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(verbose, logfile.is_some()).into());

    match logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(expand_home(path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(false)
                .init();
        }
    }
    Ok(())
}
