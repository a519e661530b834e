pub mod applier;
pub mod error;
pub mod progress;
pub mod pymol;
pub mod report;
pub mod session;

use crate::core::models::residue::AminoAcid;
use error::EngineError;
use std::path::Path;

/// The capability surface of the external molecular-modeling engine.
///
/// The engine owns a single working context that holds at most one structure
/// at a time; its selection, mode, and apply operations act on that context,
/// not on parameters. Callers therefore drive it strictly sequentially and
/// must [`clear_context`](MutationEngine::clear_context) between structures.
/// [`session::EngineSession`] enforces that discipline.
pub trait MutationEngine {
    /// Probes whether the engine can be used at all. Checked once, before
    /// any file is touched.
    fn is_available(&self) -> bool;

    /// Loads a structure into the (empty) working context.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Enters the stateful mutagenesis mode scoped to the working context.
    fn enter_mutation_mode(&mut self) -> Result<(), EngineError>;

    /// Selects the atoms matching `expression` and returns how many matched.
    /// A count of zero means the addressed residue is absent from this
    /// structure; no selection is made in that case.
    fn select(&mut self, expression: &str) -> Result<u64, EngineError>;

    /// Sets the residue type the current selection will be mutated to.
    fn set_target_residue(&mut self, target: AminoAcid) -> Result<(), EngineError>;

    /// Commits the pending mutation in-place within the working context.
    fn commit_mutation(&mut self) -> Result<(), EngineError>;

    /// Leaves mutagenesis mode.
    fn exit_mutation_mode(&mut self) -> Result<(), EngineError>;

    /// Persists the working context to `path`, overwriting if present.
    fn save(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Resets the working context to empty. Stale state from one structure
    /// would silently corrupt the next structure's selections.
    fn clear_context(&mut self) -> Result<(), EngineError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Load(PathBuf),
        EnterMode,
        Select(String),
        SetTarget(AminoAcid),
        Commit,
        ExitMode,
        Save(PathBuf),
        Clear,
    }

    /// Scripted in-memory engine for protocol tests.
    pub struct MockEngine {
        pub available: bool,
        /// Atom counts returned per selection expression; anything not
        /// listed matches `default_count`.
        pub counts: HashMap<String, u64>,
        pub default_count: u64,
        /// File names whose load is scripted to fail.
        pub fail_load: HashSet<String>,
        /// When set, `save` writes a marker file so callers can observe
        /// output on disk.
        pub write_on_save: bool,
        pub calls: Vec<Call>,
    }

    impl MockEngine {
        pub fn new() -> Self {
            Self {
                available: true,
                counts: HashMap::new(),
                default_count: 1,
                fail_load: HashSet::new(),
                write_on_save: false,
                calls: Vec::new(),
            }
        }
    }

    impl MutationEngine for MockEngine {
        fn is_available(&self) -> bool {
            self.available
        }

        fn load(&mut self, path: &Path) -> Result<(), EngineError> {
            self.calls.push(Call::Load(path.to_path_buf()));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.fail_load.contains(&name) {
                return Err(EngineError::LoadFailed(path.to_path_buf()));
            }
            Ok(())
        }

        fn enter_mutation_mode(&mut self) -> Result<(), EngineError> {
            self.calls.push(Call::EnterMode);
            Ok(())
        }

        fn select(&mut self, expression: &str) -> Result<u64, EngineError> {
            self.calls.push(Call::Select(expression.to_string()));
            Ok(self
                .counts
                .get(expression)
                .copied()
                .unwrap_or(self.default_count))
        }

        fn set_target_residue(&mut self, target: AminoAcid) -> Result<(), EngineError> {
            self.calls.push(Call::SetTarget(target));
            Ok(())
        }

        fn commit_mutation(&mut self) -> Result<(), EngineError> {
            self.calls.push(Call::Commit);
            Ok(())
        }

        fn exit_mutation_mode(&mut self) -> Result<(), EngineError> {
            self.calls.push(Call::ExitMode);
            Ok(())
        }

        fn save(&mut self, path: &Path) -> Result<(), EngineError> {
            self.calls.push(Call::Save(path.to_path_buf()));
            if self.write_on_save {
                fs::write(path, b"MUTATED\n")?;
            }
            Ok(())
        }

        fn clear_context(&mut self) -> Result<(), EngineError> {
            self.calls.push(Call::Clear);
            Ok(())
        }
    }
}
