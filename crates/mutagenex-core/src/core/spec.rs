use super::models::mutation::{MutationParseError, MutationRecord};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::slice;
use thiserror::Error;
use tracing::debug;

/// Where a batch of raw mutation tokens came from, or why none could be read.
///
/// Callers branch on this value instead of catching faults: an input that
/// looks like a file path (it has an extension) but cannot be read is an
/// answer, not an exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Tokens split out of an inline comma-separated list.
    Inline(Vec<String>),
    /// Tokens read from a mutation file, one per line, blanks dropped.
    File(Vec<String>),
    /// The input had a file extension but no such file exists.
    FileNotFound(PathBuf),
    /// The input had a file extension and exists, but is not a regular file.
    NotAFile(PathBuf),
}

/// Resolves a raw `--mutations` input into an ordered token batch.
///
/// An existing regular file is read line by line (trimmed, blank lines
/// dropped, order preserved). Anything else with a recognizable file
/// extension is reported as a missing or invalid file. Everything else is
/// treated as an inline comma-separated list. Tokens are never deduplicated.
pub fn load_tokens(input: &str) -> io::Result<TokenSource> {
    let path = Path::new(input);
    if path.is_file() {
        debug!(path = %path.display(), "Reading mutation tokens from file");
        let contents = fs::read_to_string(path)?;
        let tokens = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        return Ok(TokenSource::File(tokens));
    }
    if path.extension().is_some() {
        return Ok(if path.exists() {
            TokenSource::NotAFile(path.to_path_buf())
        } else {
            TokenSource::FileNotFound(path.to_path_buf())
        });
    }
    debug!("Treating mutation input as an inline comma-separated list");
    Ok(TokenSource::Inline(
        input.split(',').map(str::to_string).collect(),
    ))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("No mutations were provided.")]
    Empty,

    #[error(transparent)]
    Token(#[from] MutationParseError),
}

/// A validated, ordered, non-empty batch of mutations.
///
/// Order is significant: mutations are applied in listed order, and a later
/// mutation may depend on an earlier one having already altered the
/// structure. Repeated mutations are legal and applied repeatedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationSpec {
    records: Vec<MutationRecord>,
}

impl MutationSpec {
    /// Validates and parses a token batch, all-or-nothing.
    ///
    /// The first invalid token rejects the entire batch, so a run either
    /// starts with every mutation validated or touches no file at all. This
    /// is distinct from per-mutation runtime misses, which are recovered
    /// locally during application.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, SpecError> {
        if tokens.is_empty() {
            return Err(SpecError::Empty);
        }
        let records = tokens
            .iter()
            .map(|token| token.as_ref().parse::<MutationRecord>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[MutationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, MutationRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a MutationSpec {
    type Item = &'a MutationRecord;
    type IntoIter = slice::Iter<'a, MutationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
