//! `command` writes the directive that the calling shell wrapper acts on.
//!
//! A child process cannot change its parent shell's working directory, so
//! instead we leave a small script behind in the command file and the wrapper
//! sources it once we exit. Exactly one [`Directive`] is written per run.

use std::{
    fmt::Display,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

mod dialect;
pub use dialect::{Cmd, Dialect, Posix};

mod error;
pub use error::Error;

/// The action the shell wrapper should take after we exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Change into the given directory.
    ChangeDirectory(String),

    /// Show an informational message.
    Inform(String),

    /// Show an error message.
    Error(String),
}

/// The shell dialect to render directives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Cmd,
    Posix,
}

impl Shell {
    pub fn command_file_name(&self) -> &'static str {
        match self {
            Shell::Cmd => Cmd.command_file_name(),
            Shell::Posix => Posix.command_file_name(),
        }
    }

    pub fn write(&self, directive: &Directive, writer: &mut impl Write) -> std::io::Result<()> {
        match self {
            Shell::Cmd => Cmd.write(directive, writer),
            Shell::Posix => Posix.write(directive, writer),
        }
    }
}

impl Default for Shell {
    #[cfg(windows)]
    fn default() -> Self {
        Shell::Cmd
    }

    #[cfg(not(windows))]
    fn default() -> Self {
        Shell::Posix
    }
}

impl FromStr for Shell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cmd" => Ok(Shell::Cmd),
            "posix" | "sh" | "bash" | "zsh" => Ok(Shell::Posix),
            _ => Err(Error::UnknownShell(s.to_string())),
        }
    }
}

impl Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shell::Cmd => write!(f, "cmd"),
            Shell::Posix => write!(f, "posix"),
        }
    }
}

/// `Emitter` overwrites the command file with a single directive.
#[derive(Debug, Clone)]
pub struct Emitter {
    shell: Shell,
    path: PathBuf,
}

impl Emitter {
    pub fn new<P: AsRef<Path>>(shell: Shell, path: P) -> Self {
        Self {
            shell,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Truncates the command file and writes `directive` to it.
    pub fn emit(&self, directive: &Directive) -> Result<(), Error> {
        let emit_error = |err| Error::Emit {
            path: self.path.clone(),
            err,
        };

        let mut writer = BufWriter::new(fs::File::create(&self.path).map_err(emit_error)?);
        self.shell
            .write(directive, &mut writer)
            .map_err(emit_error)?;
        writer.flush().map_err(emit_error)?;

        log::debug!("emitted {:?} to {:?} as {}", directive, self.path, self.shell);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_from_str() {
        assert_eq!("cmd".parse::<Shell>().unwrap(), Shell::Cmd);
        assert_eq!("CMD".parse::<Shell>().unwrap(), Shell::Cmd);
        assert_eq!("posix".parse::<Shell>().unwrap(), Shell::Posix);
        assert_eq!("zsh".parse::<Shell>().unwrap(), Shell::Posix);
        assert!(matches!(
            "fish".parse::<Shell>(),
            Err(Error::UnknownShell(s)) if s == "fish"
        ));
    }

    #[test]
    fn test_emit_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Shell::Posix.command_file_name());
        let emitter = Emitter::new(Shell::Posix, &path);

        emitter
            .emit(&Directive::Error("a rather long message".into()))
            .unwrap();
        emitter
            .emit(&Directive::ChangeDirectory("/r".into()))
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "cd -- '/r'\n");
    }

    #[test]
    fn test_emit_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ds_command.cmd");

        match Emitter::new(Shell::Cmd, &path).emit(&Directive::Inform("hi".into())) {
            Err(Error::Emit { path: err_path, .. }) => assert_eq!(err_path, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
