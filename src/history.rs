// history.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use itertools::Itertools;
use tracing::debug;

use crate::error::Result;
use crate::store::LogStore;

pub const FUZZY_WINDOW: usize = 100;

// Holds only the cache location. Every operation opens the store and drops
// the handle before returning.
#[derive(Debug, Clone)]
pub struct History {
    cache_path: PathBuf,
}

impl History {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn open(&self) -> Result<LogStore> {
        LogStore::open(&self.cache_path)
    }

    /// Entry `n` steps back (0 = most recent). Past the end this clamps to the
    /// oldest entry; an empty log gives `""`.
    pub fn nth_previous(&self, n: usize) -> Result<String> {
        let mut store = self.open()?;
        let mut oldest = String::new();
        for (i, entry) in entries(store.scan_backward()?).enumerate() {
            let entry = entry?;
            if i == n {
                return Ok(entry);
            }
            oldest = entry;
        }
        debug!(n, "fewer entries than requested, clamping to oldest");
        Ok(oldest)
    }

    pub fn top_k(&self, k: usize) -> Result<Vec<String>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let mut store = self.open()?;
        let found = entries(store.scan_backward()?)
            .take(k)
            .collect::<Result<Vec<_>>>()?;
        debug!(k, found = found.len(), "listed recent entries");
        Ok(found)
    }

    /// The last `FUZZY_WINDOW` entries with duplicates removed, keeping each
    /// path at the position of its most recent occurrence.
    pub fn fuzzy_list(&self) -> Result<Vec<String>> {
        Ok(self.top_k(FUZZY_WINDOW)?.into_iter().unique().collect())
    }

    // Duplicates are kept.
    pub fn record(&self, path: &str) -> Result<()> {
        let mut store = self.open()?;
        debug!(cache = %store.path().display(), path, "recording");
        store.append(path)
    }
}

fn entries<I>(lines: I) -> impl Iterator<Item = Result<String>>
where
    I: Iterator<Item = std::io::Result<Bytes>>,
{
    lines.filter_map(|line| match line.context("Error scanning cache") {
        Ok(raw) => {
            let text = String::from_utf8_lossy(&raw);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Ok(trimmed.to_string()))
            }
        }
        Err(e) => Some(Err(e.into())),
    })
}
