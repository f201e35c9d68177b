//! A single run of `ds`: load the tag file, work out where to go, and leave a
//! directive behind for the shell wrapper.

use std::path::{Path, PathBuf};

use dir_switch_command::{Directive, Emitter, Shell};
use tag_file::TagStore;
use tag_resolver::Resolver;

use crate::{
    environment::Environment,
    error::Result,
    previous::Tracker,
};

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) tag_file: PathBuf,
    pub(crate) command_file: PathBuf,
    pub(crate) shell: Shell,
    pub(crate) track_jumps: bool,
}

/// How a run ended, from the point of view of the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Done,

    /// We were given this many tags, rather than zero or one.
    ArgumentCount(usize),

    /// The command line couldn't be parsed at all.
    InvalidArguments,
}

impl Outcome {
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Outcome::Done => 0,
            Outcome::ArgumentCount(_) | Outcome::InvalidArguments => 2,
        }
    }
}

/// Runs `ds` with the given tags and writes exactly one directive to the
/// command file.
pub(crate) fn run<E: Environment>(config: &Config, env: &E, tags: &[String]) -> Result<Outcome> {
    let (directive, outcome) = match tags {
        [] => (toggle(config, env)?, Outcome::Done),
        [query] => (jump(config, env, query)?, Outcome::Done),
        _ => (
            Directive::Error(format!("Expected 1 argument. {} received.", tags.len())),
            Outcome::ArgumentCount(tags.len()),
        ),
    };

    Emitter::new(config.shell, &config.command_file).emit(&directive)?;
    Ok(outcome)
}

/// Writes an error directive for a command line that couldn't be parsed, so
/// the wrapper still has something to act on.
pub(crate) fn reject(config: &Config, message: &str) -> Result<Outcome> {
    let directive = Directive::Error(message.to_string());
    Emitter::new(config.shell, &config.command_file).emit(&directive)?;
    Ok(Outcome::InvalidArguments)
}

fn toggle<E: Environment>(config: &Config, env: &E) -> Result<Directive> {
    let current_dir = current_directory(env)?;
    let mut store = TagStore::load(&config.tag_file);

    // The toggle creates the entry itself if it's missing, which is what lets
    // it tell the user that there was nowhere to go yet.
    Tracker::new(&config.tag_file).toggle(&mut store, &current_dir)
}

fn jump<E: Environment>(config: &Config, env: &E, query: &str) -> Result<Directive> {
    let current_dir = current_directory(env)?;
    let mut store = TagStore::load(&config.tag_file);
    let tracker = Tracker::new(&config.tag_file);

    let tracking = if config.track_jumps {
        tracker.record(&mut store, &current_dir)
    } else {
        tracker.ensure_tracked(&mut store, &current_dir)
    };
    log::trace!("previous directory tracking: {:?}", tracking);

    let directive = Resolver::new(&config.tag_file).resolve(store.entries(), query);
    store.save(&config.tag_file)?;

    Ok(directive)
}

fn current_directory<E: Environment>(env: &E) -> Result<String> {
    Ok(directory_string(&env.current_directory()?))
}

fn directory_string(path: &Path) -> String {
    match path.to_str() {
        Some(s) => s.to_string(),
        None => {
            let lossy = path.to_string_lossy().into_owned();
            log::warn!(
                "{:?} is not valid UTF-8; it will be recorded as {:?}",
                path,
                lossy
            );
            lossy
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::error::Error;

    struct Fake {
        home: PathBuf,
        cwd: PathBuf,
    }

    impl Environment for Fake {
        fn current_directory(&self) -> Result<PathBuf> {
            Ok(self.cwd.clone())
        }

        fn home_directory(&self) -> Result<PathBuf> {
            Ok(self.home.clone())
        }
    }

    struct Harness {
        home: TempDir,
        config: Config,
    }

    impl Harness {
        fn new(track_jumps: bool) -> Self {
            let home = tempfile::tempdir().unwrap();
            let config = Config {
                tag_file: home.path().join("tags"),
                command_file: home.path().join(".ds_command"),
                shell: Shell::Posix,
                track_jumps,
            };

            Self { home, config }
        }

        fn with_tags(self, content: &str) -> Self {
            fs::write(&self.config.tag_file, content).unwrap();
            self
        }

        fn run(&self, cwd: &str, tags: &[&str]) -> Outcome {
            let env = Fake {
                home: self.home.path().to_path_buf(),
                cwd: PathBuf::from(cwd),
            };
            let tags: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();

            run(&self.config, &env, &tags).unwrap()
        }

        fn command(&self) -> String {
            fs::read_to_string(&self.config.command_file).unwrap()
        }

        fn tags(&self) -> String {
            fs::read_to_string(&self.config.tag_file).unwrap()
        }
    }

    #[test]
    fn test_toggle_pairing() {
        let h = Harness::new(false);

        assert_eq!(h.run("/a", &[]), Outcome::Done);
        assert_eq!(
            h.command(),
            "printf '%s\\n' 'Set previous directory to \"/a\".'\n"
        );
        assert_eq!(h.tags(), "previous_directory /a");

        assert_eq!(h.run("/b", &[]), Outcome::Done);
        assert_eq!(h.command(), "cd -- '/a'\n");
        assert_eq!(h.tags(), "previous_directory /b");

        assert_eq!(h.run("/a", &[]), Outcome::Done);
        assert_eq!(h.command(), "cd -- '/b'\n");
        assert_eq!(h.tags(), "previous_directory /a");
    }

    #[test]
    fn test_jump() {
        let h = Harness::new(false).with_tags("build /repo/build\nsrc /repo/src\n");

        assert_eq!(h.run("/work", &["buidl"]), Outcome::Done);
        assert_eq!(h.command(), "cd -- '/repo/build'\n");
        assert_eq!(
            h.tags(),
            "build /repo/build\nsrc /repo/src\nprevious_directory /work"
        );
    }

    #[test]
    fn test_jump_leaves_previous_directory_alone() {
        let h = Harness::new(false).with_tags("src /repo/src\nprevious_directory /old");

        h.run("/work", &["src"]);
        assert_eq!(h.command(), "cd -- '/repo/src'\n");
        assert_eq!(h.tags(), "src /repo/src\nprevious_directory /old");

        h.run("/repo/src", &[]);
        assert_eq!(h.command(), "cd -- '/old'\n");
    }

    #[test]
    fn test_jump_tracking_jumps() {
        let h = Harness::new(true).with_tags("src /repo/src\nprevious_directory /old");

        h.run("/work", &["src"]);
        assert_eq!(h.command(), "cd -- '/repo/src'\n");
        assert_eq!(h.tags(), "src /repo/src\nprevious_directory /work");

        h.run("/repo/src", &[]);
        assert_eq!(h.command(), "cd -- '/work'\n");
    }

    #[test]
    fn test_jump_without_tag_file() {
        let h = Harness::new(false);

        // The only entry is the one just recorded for the current directory.
        assert_eq!(h.run("/work", &["anything"]), Outcome::Done);
        assert_eq!(h.command(), "cd -- '/work'\n");
        assert_eq!(h.tags(), "previous_directory /work");
    }

    #[test]
    fn test_argument_count() {
        let h = Harness::new(false).with_tags("src /repo/src");

        let outcome = h.run("/work", &["a", "b"]);
        assert_eq!(outcome, Outcome::ArgumentCount(2));
        assert_ne!(outcome.exit_code(), 0);
        assert_eq!(
            h.command(),
            "printf '%s\\n' 'Expected 1 argument. 2 received.' >&2\n"
        );
        assert_eq!(h.tags(), "src /repo/src");
    }

    #[test]
    fn test_reject() {
        let h = Harness::new(false).with_tags("src /repo/src");

        let outcome = reject(&h.config, "Found argument '-x' which wasn't expected").unwrap();
        assert_eq!(outcome, Outcome::InvalidArguments);
        assert_ne!(outcome.exit_code(), 0);
        assert_eq!(
            h.command(),
            "printf '%s\\n' 'Found argument '\\''-x'\\'' which wasn'\\''t expected' >&2\n"
        );
        assert_eq!(h.tags(), "src /repo/src");
    }

    #[test]
    fn test_directory_string() {
        assert_eq!(directory_string(Path::new("/repo/src")), "/repo/src");
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_string_not_utf8() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let path = Path::new(OsStr::from_bytes(b"/repo/\xffsrc"));
        assert_eq!(directory_string(path), "/repo/\u{fffd}src");
    }

    #[test]
    fn test_cmd_dialect() {
        let mut h = Harness::new(false).with_tags("src C:\\repo\\src");
        h.config.shell = Shell::Cmd;

        h.run("C:\\work", &["src"]);
        assert_eq!(h.command(), "cd /d C:\\repo\\src\n");
    }

    #[test]
    fn test_persistence_error() {
        let h = Harness::new(false);
        let config = Config {
            tag_file: h.home.path().join("missing").join("tags"),
            ..h.config.clone()
        };
        let env = Fake {
            home: h.home.path().to_path_buf(),
            cwd: PathBuf::from("/a"),
        };

        assert!(matches!(run(&config, &env, &[]), Err(Error::TagFile(_))));
        assert!(!Path::new(&config.command_file).exists());
    }
}
