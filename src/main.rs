use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use dir_switch_command::Shell;
use structopt::{
    clap::{self, AppSettings, ErrorKind},
    StructOpt,
};

use crate::{
    environment::Environment,
    invocation::{Config, Outcome},
};

mod environment;
mod error;
mod invocation;
mod previous;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "ds",
    about = "Jumps to a tagged directory. Tags live one per line in the tag file in your home directory, as a tag followed by a directory. With no tag, jumps back to the previous directory. The result is written to a command file for the calling shell wrapper to run.",
    setting = AppSettings::ColorNever
)]
struct Opt {
    #[structopt(
        long,
        env = "DS_COMMAND_FILE",
        parse(from_os_str),
        help = "command file, relative to the home directory unless absolute [default: depends on --shell]"
    )]
    command_file: Option<PathBuf>,

    #[structopt(
        long,
        env = "DS_HOME",
        parse(from_os_str),
        help = "directory holding the tag and command files, instead of the home directory"
    )]
    home: Option<PathBuf>,

    #[structopt(
        long,
        env = "DS_SHELL",
        help = "shell dialect for the command file: cmd or posix [default: cmd on Windows, posix elsewhere]"
    )]
    shell: Option<Shell>,

    #[structopt(
        long,
        env = "DS_TAG_FILE",
        default_value = tag_file::DEFAULT_FILE_NAME,
        parse(from_os_str),
        help = "tag file name within the home directory"
    )]
    tag_file: PathBuf,

    #[structopt(
        long,
        help = "record the current directory as the previous directory when jumping to a tag"
    )]
    track_jumps: bool,

    #[structopt(
        short,
        long,
        parse(from_occurrences),
        help = "log more detail to stderr; may be repeated"
    )]
    verbose: u8,

    #[structopt(name = "TAG", help = "tag to jump to")]
    tags: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments. A command line we can't parse still has
    // to leave a directive behind for the wrapper.
    let opt = match Opt::from_iter_safe(std::env::args_os()) {
        Ok(opt) => opt,
        Err(err) => {
            let outcome =
                reject_arguments(err, &environment::System, |name| std::env::var_os(name))?;
            std::process::exit(outcome.exit_code());
        }
    };

    // Set up logging. This goes to stderr, so it never ends up in the command
    // file.
    let _logger = flexi_logger::Logger::try_with_env_or_str(log_spec(opt.verbose))?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let env = environment::System;
    let config = config_from_opt(&opt, &env)?;
    log::debug!("running with {:?}", config);

    match invocation::run(&config, &env, &opt.tags)? {
        Outcome::Done => Ok(()),
        outcome => {
            log::debug!("exiting after {:?}", outcome);
            std::process::exit(outcome.exit_code());
        }
    }
}

fn config_from_opt<E: Environment>(opt: &Opt, env: &E) -> anyhow::Result<Config> {
    let home = match &opt.home {
        Some(home) => home.clone(),
        None => env.home_directory()?,
    };

    Ok(build_config(
        &home,
        &opt.tag_file,
        opt.command_file.as_deref(),
        opt.shell.unwrap_or_default(),
        opt.track_jumps,
    ))
}

/// Works out the configuration from environment variables alone, for when the
/// command line couldn't be parsed.
fn fallback_config<E, V>(env: &E, var: V) -> anyhow::Result<Config>
where
    E: Environment,
    V: Fn(&str) -> Option<OsString>,
{
    let home = match var("DS_HOME") {
        Some(home) => PathBuf::from(home),
        None => env.home_directory()?,
    };
    let shell = var("DS_SHELL")
        .and_then(|shell| shell.to_str().and_then(|shell| shell.parse().ok()))
        .unwrap_or_default();
    let tag_file = var("DS_TAG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(tag_file::DEFAULT_FILE_NAME));
    let command_file = var("DS_COMMAND_FILE").map(PathBuf::from);

    Ok(build_config(
        &home,
        &tag_file,
        command_file.as_deref(),
        shell,
        false,
    ))
}

fn build_config(
    home: &Path,
    tag_file: &Path,
    command_file: Option<&Path>,
    shell: Shell,
    track_jumps: bool,
) -> Config {
    let command_file = command_file.unwrap_or_else(|| Path::new(shell.command_file_name()));

    Config {
        tag_file: home.join(tag_file),
        command_file: home.join(command_file),
        shell,
        track_jumps,
    }
}

/// Handles a command line that clap rejected. Help and version requests exit
/// as usual; anything else becomes an error directive.
fn reject_arguments<E, V>(err: clap::Error, env: &E, var: V) -> anyhow::Result<Outcome>
where
    E: Environment,
    V: Fn(&str) -> Option<OsString>,
{
    if let ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed = err.kind {
        err.exit();
    }

    let config = fallback_config(env, var)?;
    Ok(invocation::reject(&config, &argument_error_message(&err))?)
}

/// The first line of clap's error, without its `error:` prefix.
fn argument_error_message(err: &clap::Error) -> String {
    let line = err.message.lines().next().unwrap_or_default();
    line.trim_start_matches("error:").trim().to_string()
}

fn log_spec(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
