use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Command(#[from] dir_switch_command::Error),

    #[error("cannot determine the current directory: {0}")]
    CurrentDirectory(#[source] std::io::Error),

    #[error("cannot determine the home directory; set DS_HOME or pass --home")]
    NoHomeDirectory,

    #[error(transparent)]
    TagFile(#[from] tag_file::Error),
}
