// error.rs

use thiserror::Error;

/// Fatal conditions. Anything here ends the process with exit status 1.
#[derive(Debug, Error)]
pub enum Error {
    // I/O failures carry their context through `anyhow::Context`.
    #[error("{0}\nError: {}", .0.root_cause())]
    Io(#[from] anyhow::Error),
    #[error("Invalid arguments\nError: {0}")]
    Arguments(String),
    #[error("Failed to get the current user\nError: {0}")]
    User(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io;

    #[test]
    fn io_error_message_carries_context_and_cause() {
        let err: Error = Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "no such file"))
            .context("Failed to get or create cache at '/nope/.active.txt'")
            .unwrap_err()
            .into();
        assert_eq!(
            err.to_string(),
            "Failed to get or create cache at '/nope/.active.txt'\nError: no such file"
        );
    }

    #[test]
    fn argument_error_message() {
        let msg = Error::Arguments("Too many arguments: 3".into()).to_string();
        assert!(msg.contains("Too many arguments: 3"));
    }
}
