// store.rs

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::error::Result;

pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// The on-disk log: one entry per line, only ever appended to.
#[derive(Debug)]
pub struct LogStore {
    file: File,
    path: PathBuf,
}

impl LogStore {
    // Creates the file if missing, but not its parent directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.create(true).read(true).write(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        let file = options
            .open(path)
            .with_context(|| format!("Failed to get or create cache at '{}'", path.display()))?;
        debug!(path = %path.display(), "opened cache");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `entry` plus its terminating newline at the end of the log in a
    /// single write. Entries spanning several lines are refused.
    pub fn append(&mut self, entry: &str) -> Result<()> {
        if entry.contains(['\n', '\r']) {
            let err = io::Error::new(io::ErrorKind::InvalidInput, "entry contains a line break");
            return Err(err)
                .with_context(|| format!("Refusing to write {entry:?} to cache"))
                .map_err(Into::into);
        }
        self.file
            .seek(SeekFrom::End(0))
            .context("Failed seeking to the end of the cache")?;
        let mut line = String::with_capacity(entry.len() + 1);
        line.push_str(entry);
        line.push('\n');
        self.file
            .write_all(line.as_bytes())
            .context("Failed writing to cache")?;
        debug!(entry, "appended to cache");
        Ok(())
    }

    pub fn scan_backward(&mut self) -> Result<ReverseLines<&mut File>> {
        let len = self.file.metadata().context("Failed to stat cache")?.len();
        trace!(len, "scanning cache backward");
        Ok(ReverseLines::new(&mut self.file, len))
    }
}

/// Lines of a seekable source, last first, read in chunks backward from the
/// end. The newline ending the final line does not yield an empty line.
pub struct ReverseLines<R> {
    reader: R,
    // Start offset of the bytes held in `buf`.
    pos: u64,
    buf: BytesMut,
    chunk_size: usize,
    tail_pending: bool,
    finished: bool,
}

impl<R: Read + Seek> ReverseLines<R> {
    pub fn new(reader: R, len: u64) -> Self {
        Self::with_chunk_size(reader, len, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(reader: R, len: u64, chunk_size: usize) -> Self {
        Self {
            reader,
            pos: len,
            buf: BytesMut::new(),
            chunk_size: chunk_size.max(1),
            tail_pending: true,
            finished: len == 0,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        let n = self.pos.min(self.chunk_size as u64) as usize;
        self.pos -= n as u64;
        self.reader.seek(SeekFrom::Start(self.pos))?;

        let mut chunk = BytesMut::with_capacity(n + self.buf.len());
        chunk.resize(n, 0);
        self.reader.read_exact(&mut chunk[..])?;
        chunk.extend_from_slice(&self.buf);
        self.buf = chunk;

        if self.tail_pending {
            self.tail_pending = false;
            if self.buf.last() == Some(&b'\n') {
                self.buf.truncate(self.buf.len() - 1);
            }
        }
        Ok(())
    }
}

impl<R: Read + Seek> Iterator for ReverseLines<R> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if !self.tail_pending {
                if let Some(idx) = self.buf.iter().rposition(|&b| b == b'\n') {
                    let line = self.buf.split_off(idx + 1).freeze();
                    self.buf.truncate(idx);
                    return Some(Ok(line));
                }
                if self.pos == 0 {
                    self.finished = true;
                    return Some(Ok(std::mem::take(&mut self.buf).freeze()));
                }
            }
            if let Err(e) = self.fill() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}
