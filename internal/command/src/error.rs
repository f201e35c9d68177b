use std::path::PathBuf;

use thiserror::Error;

/// Possible errors from the `command` crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot write command file {path:?}: {err}")]
    Emit {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("unknown shell {0:?}: expected one of cmd, posix")]
    UnknownShell(String),
}
