// commands.rs

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::{Mode, Settings};
use crate::error::{Error, Result};
use crate::history::History;
use crate::parser::parse_path;
use crate::util::{indexed_lines, writeln_ignore_broken_pipe};

pub const EXIT_FUZZY_FALLBACK: u8 = 2;
pub const EXIT_CACHE_LOCATION: u8 = 3;

// Only `main` turns these into exit statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The requested path did not exist; recent locations were listed instead.
    FuzzyFallback,
    CacheLocationPrinted,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::FuzzyFallback => ExitCode::from(EXIT_FUZZY_FALLBACK),
            Outcome::CacheLocationPrinted => ExitCode::from(EXIT_CACHE_LOCATION),
        }
    }
}

pub fn run<W: Write>(settings: &Settings, out: &mut W) -> Result<Outcome> {
    let history = History::new(&settings.cache_path);
    match &settings.mode {
        Mode::CacheLocation => {
            emit(out, history.cache_path().display().to_string())?;
            Ok(Outcome::CacheLocationPrinted)
        }
        Mode::List(k) => {
            let entries = history.top_k(*k)?;
            for line in indexed_lines(&entries, *k) {
                emit(out, line)?;
            }
            Ok(Outcome::Success)
        }
        Mode::Lookup(n) => {
            emit(out, history.nth_previous(*n)?)?;
            Ok(Outcome::Success)
        }
        Mode::Record(raw) => {
            let path = parse_path(raw, &settings.home)?;
            match std::fs::metadata(&path) {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), "path is not a file or directory");
                    let entries = history.fuzzy_list()?;
                    for line in indexed_lines(&entries, entries.len().saturating_sub(1)) {
                        emit(out, line)?;
                    }
                    return Ok(Outcome::FuzzyFallback);
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Failed to stat {}", path.display()))
                        .into());
                }
            }
            let entry = loggable(&path)?;
            history.record(entry)?;
            info!(path = entry, "recorded");
            emit(out, entry)?;
            Ok(Outcome::Success)
        }
    }
}

// One log line per path, so the path must be UTF-8 without line breaks.
fn loggable(path: &Path) -> Result<&str> {
    match path.to_str() {
        Some(entry) if !entry.contains(['\n', '\r']) => Ok(entry),
        Some(entry) => Err(Error::Arguments(format!(
            "Path contains a line break and cannot be recorded: {entry:?}"
        ))),
        None => Err(Error::Arguments(format!(
            "Path is not valid UTF-8 and cannot be recorded: {}",
            path.display()
        ))),
    }
}

fn emit<W: Write, S: AsRef<str>>(out: &mut W, line: S) -> Result<()> {
    writeln_ignore_broken_pipe(out, line).context("Failed writing to stdout")?;
    Ok(())
}
