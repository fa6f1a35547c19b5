// config.rs

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use nix::unistd::{getuid, User};

use crate::error::{Error, Result};
use crate::parser::parse_path;

pub const DEFAULT_CACHE_FILE: &str = "~/.active.txt";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(
    name = "active",
    version,
    about = "Remember the directories you visit and jump back to them"
)]
pub struct Cli {
    /// Path to record. Without one, the most recent path is printed.
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Will list out the most recent paths.
    // The count must be attached (`-l=5`, `--list=5`) so `-l <PATH>` keeps
    // the path positional.
    #[arg(
        short,
        long,
        value_name = "COUNT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "10"
    )]
    pub list: Option<usize>,

    /// Will get the n-th previous path.
    /// Using -n or --n where n is a number will also work.
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub previous: usize,

    /// Print the location of the cache file and exit.
    #[arg(long)]
    pub cache_path: bool,

    /// Cache file to use instead of the default.
    #[arg(long, env = "ACTIVE_CACHE", value_name = "FILE", default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: String,

    /// Diagnostics filter (trace, debug, info, warn, error).
    #[arg(long, env = "ACTIVE_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Parses `args` (program name first). Help and version requests print
    /// and exit here; every other parse failure becomes `Error::Arguments`.
    pub fn parse_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                let rendered = e.to_string();
                let message = rendered.trim_end().trim_start_matches("error: ");
                Err(Error::Arguments(message.to_string()))
            }
        }
    }
}

// Variants are in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    CacheLocation,
    List(usize),
    Record(String),
    Lookup(usize),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub home: PathBuf,
    pub cache_path: PathBuf,
    pub mode: Mode,
}

impl Settings {
    pub fn resolve(cli: &Cli, home: PathBuf) -> Result<Self> {
        let cache_path = parse_path(&cli.cache_file, &home)?;
        let mode = mode_for(cli)?;
        Ok(Self {
            home,
            cache_path,
            mode,
        })
    }
}

fn mode_for(cli: &Cli) -> Result<Mode> {
    if cli.paths.len() > 1 {
        return Err(Error::Arguments(format!(
            "Too many arguments: {}",
            cli.paths.len()
        )));
    }
    if cli.cache_path {
        return Ok(Mode::CacheLocation);
    }
    if let Some(k) = cli.list.filter(|&k| k > 0) {
        return Ok(Mode::List(k));
    }
    Ok(match cli.paths.first() {
        Some(path) => Mode::Record(path.clone()),
        None => Mode::Lookup(cli.previous),
    })
}

/// Home directory of the invoking user, from the user database.
pub fn home_dir() -> Result<PathBuf> {
    let uid = getuid();
    match User::from_uid(uid) {
        Ok(Some(user)) => Ok(user.dir),
        Ok(None) => Err(Error::User(format!("no passwd entry for uid {uid}"))),
        Err(errno) => Err(Error::User(errno.to_string())),
    }
}
