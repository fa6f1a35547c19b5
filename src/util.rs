// util.rs

use std::io::Write;

pub fn writeln_ignore_broken_pipe<W: std::io::Write, S: AsRef<str>>(mut w: W, s: S) -> std::io::Result<()> {
    match writeln!(w, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

// `<index>: <path>`, indices zero-padded to the width of `width_of`.
pub fn indexed_lines<'a, I>(entries: I, width_of: usize) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = &'a String>,
    I::IntoIter: 'a,
{
    let width = digits(width_of);
    entries
        .into_iter()
        .enumerate()
        .map(move |(i, entry)| format!("{i:0width$}: {entry}"))
}
