// parser.rs

use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::error::Result;

/// Rewrites `-N` (and `--N`) into `--previous=N`, so `active -2` reads as
/// "two visits back". Negative values are taken by absolute value.
pub fn expand_previous_shorthand<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| match arg.strip_prefix('-').map(str::parse::<i64>) {
            Some(Ok(num)) => format!("--previous={}", num.unsigned_abs()),
            _ => arg,
        })
        .collect()
}

pub fn expand_tilde(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Makes `path` absolute against the working directory and drops `.` and
/// `..` components lexically, without touching the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .with_context(|| format!("Failed to get absolute path: {}", path.display()))?
            .join(path)
    };
    Ok(normalize(&path))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to go above the root.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

pub fn parse_path(path: &str, home: &Path) -> Result<PathBuf> {
    absolutize(&expand_tilde(path, home))
}
