use std::fmt::Display;

/// A single line of the tag file: a tag and the directory it points at.
///
/// Neither field is validated. A line without a directory produces an entry
/// with an empty directory, and a blank line produces an entry where both are
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEntry {
    tag: String,
    directory: String,
}

impl TagEntry {
    pub fn new<T, D>(tag: T, directory: D) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        Self {
            tag: tag.into(),
            directory: directory.into(),
        }
    }

    /// Parses a line from the tag file.
    ///
    /// The tag is the first whitespace delimited token; everything after it,
    /// trimmed, is the directory. Any line parses, even a blank one.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        match line.split_once(char::is_whitespace) {
            Some((tag, directory)) => Self::new(tag, directory.trim_start()),
            None => Self::new(line, ""),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn set_directory<D: Into<String>>(&mut self, directory: D) {
        self.directory = directory.into();
    }
}

impl Display for TagEntry {
    /// Formats the entry as a tag file line, without the line terminator.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tag, self.directory)
    }
}
