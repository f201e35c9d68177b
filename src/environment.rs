use std::path::PathBuf;

use crate::error::{Error, Result};

/// The two things we need to know about the process's surroundings.
pub(crate) trait Environment {
    fn current_directory(&self) -> Result<PathBuf>;

    fn home_directory(&self) -> Result<PathBuf>;
}

/// The real environment, as reported by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct System;

impl Environment for System {
    fn current_directory(&self) -> Result<PathBuf> {
        std::env::current_dir().map_err(Error::CurrentDirectory)
    }

    fn home_directory(&self) -> Result<PathBuf> {
        dirs::home_dir().ok_or(Error::NoHomeDirectory)
    }
}
