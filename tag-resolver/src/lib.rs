//! Fuzzy resolution of a query tag to a directory.
//!
//! Every tag in the store is compared with the query by edit distance. An
//! exact match ends the search immediately; otherwise the closest tag wins,
//! with ties going to whichever entry appears first in the tag file. There is
//! no threshold: a distant match is still a match.

use std::path::{Path, PathBuf};

use dir_switch_command::Directive;
use tag_file::TagEntry;

mod distance;
pub use distance::{edit_distance, Distance};

/// The entry chosen for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    pub entry: &'a TagEntry,
    pub distance: Distance,
}

/// Finds the entry closest to `query`, or `None` if there are no entries.
pub fn nearest<'a, I>(entries: I, query: &str) -> Option<Match<'a>>
where
    I: IntoIterator<Item = &'a TagEntry>,
{
    let mut best: Option<Match<'a>> = None;

    for entry in entries {
        let distance = edit_distance(entry.tag(), query);
        log::trace!("{:?} is {} from {:?}", entry.tag(), distance, query);

        if distance.is_exact() {
            return Some(Match { entry, distance });
        }

        // Strictly less than, so the earlier entry keeps a tie.
        if best.as_ref().map_or(true, |m| distance < m.distance) {
            best = Some(Match { entry, distance });
        }
    }

    best
}

/// `Resolver` turns a query into the [`Directive`] to hand to the shell.
#[derive(Debug, Clone)]
pub struct Resolver {
    tag_file: PathBuf,
}

impl Resolver {
    /// Constructs a resolver. `tag_file` is only used to tell the user which
    /// file to edit when there's nothing to resolve against.
    pub fn new<P: AsRef<Path>>(tag_file: P) -> Self {
        Self {
            tag_file: tag_file.as_ref().to_path_buf(),
        }
    }

    pub fn resolve(&self, entries: &[TagEntry], query: &str) -> Directive {
        match nearest(entries, query) {
            Some(Match { entry, distance }) => {
                if distance.is_exact() {
                    log::debug!("{:?} matched exactly", query);
                } else {
                    log::info!(
                        "no exact match for {:?}; using {:?} at distance {}",
                        query,
                        entry.tag(),
                        distance
                    );
                }
                Directive::ChangeDirectory(entry.directory().to_string())
            }
            None => Directive::Error(format!(
                "The tag file is empty. Please edit \"{}\".",
                self.tag_file.display()
            )),
        }
    }
}
