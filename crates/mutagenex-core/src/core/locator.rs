use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File extension of the structure files this tool consumes and produces.
pub const STRUCTURE_EXTENSION: &str = "pdb";

/// A reference to one input structure and its derived output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureFile {
    path: PathBuf,
    name: String,
}

impl StructureFile {
    fn new(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bare file name, reused for the mutated copy.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the mutated copy of this structure is written.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.name)
    }
}

#[derive(Debug, Error)]
pub enum LocateError {
    #[error(
        "Input path '{}' is neither a .{STRUCTURE_EXTENSION} file nor a directory.",
        .0.display()
    )]
    InvalidInputPath(PathBuf),

    #[error("Failed to read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves an input path into the ordered list of structure files to process.
///
/// A directory yields every `.pdb` entry it contains, sorted by file name so
/// runs are deterministic regardless of filesystem enumeration order. A single
/// `.pdb` file yields itself. An empty result is valid: the caller decides how
/// to report it.
pub fn locate(input_path: &Path) -> Result<Vec<StructureFile>, LocateError> {
    if input_path.is_dir() {
        let entries = fs::read_dir(input_path).map_err(|source| LocateError::ReadDir {
            path: input_path.to_path_buf(),
            source,
        })?;

        let mut files: Vec<StructureFile> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == STRUCTURE_EXTENSION)
            })
            .filter_map(StructureFile::new)
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            count = files.len(),
            directory = %input_path.display(),
            "Enumerated structure files"
        );
        return Ok(files);
    }

    if input_path.is_file()
        && input_path
            .extension()
            .is_some_and(|ext| ext == STRUCTURE_EXTENSION)
    {
        return match StructureFile::new(input_path.to_path_buf()) {
            Some(file) => Ok(vec![file]),
            None => Err(LocateError::InvalidInputPath(input_path.to_path_buf())),
        };
    }

    Err(LocateError::InvalidInputPath(input_path.to_path_buf()))
}
