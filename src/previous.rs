//! The `previous_directory` entry, which lets a bare `ds` bounce between the
//! two most recent working directories in the same way as `cd -`.

use std::path::{Path, PathBuf};

use dir_switch_command::Directive;
use tag_file::{TagEntry, TagStore};

use crate::error::Result;

/// The reserved tag under which the previous directory is kept.
pub(crate) const PREVIOUS_DIRECTORY_TAG: &str = "previous_directory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tracking {
    /// There was no entry, so one was added for the current directory.
    Created,

    /// An entry already existed and was left alone.
    Existing,
}

#[derive(Debug, Clone)]
pub(crate) struct Tracker {
    tag_file: PathBuf,
}

impl Tracker {
    pub(crate) fn new<P: AsRef<Path>>(tag_file: P) -> Self {
        Self {
            tag_file: tag_file.as_ref().to_path_buf(),
        }
    }

    /// Makes sure the store has a previous directory entry, adding one for
    /// `current_dir` if needed.
    ///
    /// An existing entry is deliberately not updated here: [`toggle()`]
    /// relies on reading the value from before this visit.
    ///
    /// [`toggle()`]: Self::toggle
    pub(crate) fn ensure_tracked(&self, store: &mut TagStore, current_dir: &str) -> Tracking {
        if store.find(PREVIOUS_DIRECTORY_TAG).is_some() {
            Tracking::Existing
        } else {
            log::debug!("tracking {:?} as the previous directory", current_dir);
            store.push(TagEntry::new(PREVIOUS_DIRECTORY_TAG, current_dir));
            Tracking::Created
        }
    }

    /// Sets the previous directory entry to `current_dir`, creating it if
    /// needed.
    pub(crate) fn record(&self, store: &mut TagStore, current_dir: &str) -> Tracking {
        match store.find_mut(PREVIOUS_DIRECTORY_TAG) {
            Some(entry) => {
                log::debug!(
                    "replacing previous directory {:?} with {:?}",
                    entry.directory(),
                    current_dir
                );
                entry.set_directory(current_dir);
                Tracking::Existing
            }
            None => self.ensure_tracked(store, current_dir),
        }
    }

    /// Swaps the stored previous directory with `current_dir`, saves the
    /// store, and returns the directive to jump to the old value.
    ///
    /// If nothing has been recorded yet, there's nowhere to go: the current
    /// directory is recorded and the user is told so.
    pub(crate) fn toggle(&self, store: &mut TagStore, current_dir: &str) -> Result<Directive> {
        let directive = match store.find_mut(PREVIOUS_DIRECTORY_TAG) {
            Some(entry) => {
                let target = entry.directory().to_string();
                entry.set_directory(current_dir);

                log::debug!("toggling from {:?} to {:?}", current_dir, target);
                Directive::ChangeDirectory(target)
            }
            None => {
                store.push(TagEntry::new(PREVIOUS_DIRECTORY_TAG, current_dir));
                Directive::Inform(format!(
                    "Set previous directory to \"{}\".",
                    current_dir
                ))
            }
        };

        store.save(&self.tag_file)?;
        Ok(directive)
    }
}
