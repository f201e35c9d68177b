use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot save tag file {path:?}: {err}")]
    Save {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
