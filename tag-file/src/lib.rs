//! Reading and writing the plain text tag file that maps short tags to
//! directories.
//!
//! The file holds one entry per line: a tag, whitespace, then a directory.
//! Order is significant, and duplicate tags are allowed; lookups return the
//! first match.

use std::{
    fs,
    borrow::Cow,
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

mod entry;
pub use entry::TagEntry;

mod error;
pub use error::Error;

/// The tag file name used when none is configured.
pub const DEFAULT_FILE_NAME: &str = "tags";

/// An in-memory copy of the tag file.
///
/// The store is loaded in full, edited in place, and then written back over
/// the file it came from. Writes are not atomic, and there is no locking
/// between processes: the last writer wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStore {
    entries: Vec<TagEntry>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the tag file at `path`.
    ///
    /// A missing or unreadable file is treated as an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        match fs::File::open(path) {
            Ok(file) => match Self::read(file) {
                Ok(store) => {
                    log::debug!("loaded {} tag(s) from {:?}", store.len(), path);
                    store
                }
                Err(e) => {
                    log::warn!("cannot read tag file {:?}: {}", path, e);
                    Self::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("tag file {:?} does not exist", path);
                Self::new()
            }
            Err(e) => {
                log::warn!("cannot open tag file {:?}: {}", path, e);
                Self::new()
            }
        }
    }

    /// Reads tag entries from `reader`, one per line.
    ///
    /// A trailing newline at the end of the input does not create an extra
    /// entry, but every other line does, including blank ones.
    pub fn read<R: Read>(reader: R) -> Result<Self, Error> {
        // BufRead::lines() would reject invalid UTF-8 outright; we'd rather
        // keep the rest of the file, so read raw lines and decode lossily.
        let mut r = BufReader::new(reader);
        let mut entries = Vec::new();

        loop {
            let mut raw = Vec::new();
            if r.read_until(b'\n', &mut raw)? == 0 {
                break;
            }

            if raw.last() == Some(&b'\n') {
                raw.pop();
            }

            let line = String::from_utf8_lossy(&raw);
            if let Cow::Owned(_) = line {
                log::warn!(
                    "line {} of the tag file is not valid UTF-8; invalid bytes will be replaced on save: {:?}",
                    entries.len() + 1,
                    line
                );
            }
            entries.push(TagEntry::parse(&line));
        }

        Ok(Self { entries })
    }

    /// Overwrites the file at `path` with the current entries.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let save_error = |err| Error::Save {
            path: path.to_path_buf(),
            err,
        };

        let mut writer = BufWriter::new(fs::File::create(path).map_err(save_error)?);
        self.write(&mut writer).map_err(|e| match e {
            Error::Io(err) => save_error(err),
            e => e,
        })?;
        writer.flush().map_err(save_error)?;

        log::debug!("saved {} tag(s) to {:?}", self.len(), path);
        Ok(())
    }

    /// Writes the entries to `writer`, separated by newlines. No newline
    /// follows the last entry.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writer.write_all(b"\n")?;
            }
            write!(writer, "{}", entry)?;
        }

        Ok(())
    }

    /// Returns the first entry with exactly the given tag.
    pub fn find(&self, tag: &str) -> Option<&TagEntry> {
        self.entries.iter().find(|entry| entry.tag() == tag)
    }

    pub fn find_mut(&mut self, tag: &str) -> Option<&mut TagEntry> {
        self.entries.iter_mut().find(|entry| entry.tag() == tag)
    }

    pub fn push(&mut self, entry: TagEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
