use std::io;
use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

/// Every way a typing session can fail. All of them end the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load dictionary: {}", path.display())]
    CorpusLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot build a sentence from an empty dictionary")]
    EmptyCorpus,

    #[error("failed to {operation} terminal attributes: {source}")]
    TerminalControl {
        operation: &'static str,
        #[source]
        source: Errno,
    },

    #[error("error reading stdin: {0}")]
    InputRead(#[source] io::Error),

    #[error("error writing to terminal: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
