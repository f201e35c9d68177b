use std::io::{self, Write};

use crate::Directive;

/// A `Dialect` knows how to spell a [`Directive`] for one kind of shell.
pub trait Dialect {
    /// The command file name used when none is configured.
    fn command_file_name(&self) -> &'static str;

    fn write(&self, directive: &Directive, writer: &mut impl Write) -> io::Result<()>;
}

/// Windows `cmd.exe`, where the command file is run as a batch file.
#[derive(Debug, Clone, Copy)]
pub struct Cmd;

impl Dialect for Cmd {
    fn command_file_name(&self) -> &'static str {
        "ds_command.cmd"
    }

    fn write(&self, directive: &Directive, writer: &mut impl Write) -> io::Result<()> {
        match directive {
            // Plain `cd` won't switch drives.
            Directive::ChangeDirectory(path) => writeln!(writer, "cd /d {}", cmd_escape(path)),
            Directive::Inform(message) => writeln!(writer, "echo {}", cmd_escape(message)),
            Directive::Error(message) => {
                // Keep cmd from echoing the command line itself, so only the
                // message is shown.
                writeln!(writer, "@echo off")?;
                writeln!(writer, "echo|set /p={}", cmd_escape(message))
            }
        }
    }
}

/// POSIX shells (sh, bash, zsh, ...), where the command file is sourced.
#[derive(Debug, Clone, Copy)]
pub struct Posix;

impl Dialect for Posix {
    fn command_file_name(&self) -> &'static str {
        ".ds_command"
    }

    fn write(&self, directive: &Directive, writer: &mut impl Write) -> io::Result<()> {
        match directive {
            Directive::ChangeDirectory(path) => writeln!(writer, "cd -- {}", posix_quote(path)),
            Directive::Inform(message) => {
                writeln!(writer, "printf '%s\\n' {}", posix_quote(message))
            }
            Directive::Error(message) => {
                writeln!(writer, "printf '%s\\n' {} >&2", posix_quote(message))
            }
        }
    }
}

fn cmd_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '^' | '&' | '|' | '<' | '>' | '(' | ')' | '"' => {
                escaped.push('^');
                escaped.push(c);
            }
            '%' => escaped.push_str("%%"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn posix_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
