//! Wait event catalog parsing.
//!
//! The catalog is a line-oriented text file:
//!
//! ```text
//! # comment
//! Section: ClassName - WaitEventActivity
//!
//! WaitEventActivity	ARCHIVER_MAIN	"Waiting in main loop of archiver process."
//! ABI_compatibility:
//! WaitEventActivity	LATE_ADDITION	"Added after release."
//! ```
//!
//! Parsing is purely syntactic: every line is classified into a [`Line`],
//! and data lines become [`RawRecord`]s tagged with the class of the most
//! recent section header and whether they sit inside an ABI region.
//! Grouping and ordering happen later in [`crate::catalog`].

use std::path::Path;

use crate::error::{Error, Result};

/// Leading text of a section header line.
const SECTION_PREFIX: &str = "Section: ClassName";

/// Separator between the header text and the class name.
const SECTION_SEPARATOR: &str = "- ";

/// Line that opens an ABI-preserving region.
const ABI_MARKER: &str = "ABI_compatibility:";

/// One classified catalog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A `#` comment.
    Comment,
    /// Empty or whitespace-only.
    Blank,
    /// `Section: ClassName - <class>`; carries the class name.
    SectionHeader(&'a str),
    /// `ABI_compatibility:`.
    AbiMarker,
    /// `<group>\t<key>\t"<description>"`.
    DataLine {
        key: &'a str,
        description: &'a str,
    },
    /// Anything else, with the reason it was rejected.
    Invalid(&'static str),
}

/// A data line as read from the catalog, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Class from the most recent section header (e.g. `"WaitEventIO"`).
    pub class: String,

    /// Bare event identifier (e.g. `"BUFFILE_READ"`).
    pub key: String,

    /// Quoted description, verbatim including quotes and markup.
    pub description: String,

    /// Whether the line follows an `ABI_compatibility:` marker in its section.
    pub abi: bool,

    /// 1-based line number in the catalog.
    pub line_number: usize,
}

/// Classify a single catalog line.
pub fn classify_line(line: &str) -> Line<'_> {
    if line.starts_with('#') {
        return Line::Comment;
    }
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = line.strip_prefix(SECTION_PREFIX) {
        return match rest.rsplit_once(SECTION_SEPARATOR) {
            Some((_, class)) if !class.trim().is_empty() => Line::SectionHeader(class.trim()),
            _ => Line::Invalid("section header has no class name"),
        };
    }
    if line == ABI_MARKER {
        return Line::AbiMarker;
    }
    match split_data_line(line) {
        Ok((key, description)) => Line::DataLine { key, description },
        Err(reason) => Line::Invalid(reason),
    }
}

/// Split a data line into its key and quoted description.
///
/// Fields are separated by runs of tabs. The first field (the class the
/// line was historically grouped under) is validated and discarded.
fn split_data_line(line: &str) -> std::result::Result<(&str, &str), &'static str> {
    const FIELDS: &str = "expected three tab-separated fields";

    let (group, rest) = line.split_once('\t').ok_or(FIELDS)?;
    let (key, description) = rest.trim_start_matches('\t').split_once('\t').ok_or(FIELDS)?;
    let description = description.trim_start_matches('\t');

    if !is_identifier(group) || !is_identifier(key) {
        return Err("identifier fields must contain only word characters");
    }
    if description.contains('\t') {
        return Err(FIELDS);
    }
    if !is_sentence(description) {
        return Err("description must be a quoted sentence ending in a period");
    }
    Ok((key, description))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

/// `"` + word character + anything + `."`.
fn is_sentence(s: &str) -> bool {
    let Some(body) = s.strip_prefix('"').and_then(|b| b.strip_suffix(".\"")) else {
        return false;
    };
    body.chars().next().is_some_and(is_word_char)
}

/// Parse catalog text into records, in file order.
///
/// Fails on the first invalid line, or on a data line that precedes every
/// section header.
pub fn parse_catalog(input: &str) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut class: Option<&str> = None;
    let mut abi = false;

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        match classify_line(line) {
            Line::Comment | Line::Blank => {}
            Line::SectionHeader(name) => {
                class = Some(name);
                abi = false;
            }
            Line::AbiMarker => abi = true,
            Line::DataLine { key, description } => {
                let Some(class) = class else {
                    return Err(Error::DataBeforeSection {
                        line_number,
                        line: line.to_string(),
                    });
                };
                records.push(RawRecord {
                    class: class.to_string(),
                    key: key.to_string(),
                    description: description.to_string(),
                    abi,
                    line_number,
                });
            }
            Line::Invalid(reason) => {
                return Err(Error::Parse {
                    line_number,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    tracing::debug!(records = records.len(), "parsed catalog");
    Ok(records)
}

/// Load and parse a catalog file from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_catalog(&content)
}
