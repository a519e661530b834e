use super::MutationEngine;
use super::error::EngineError;
use crate::core::models::residue::AminoAcid;
use std::path::Path;
use tracing::warn;

/// Exclusive ownership of the engine's working context for one structure.
///
/// The session is acquired by loading a structure and released on drop, at
/// which point the working context is cleared unconditionally. This holds on
/// every exit path, so a failure partway through one file can never leave
/// stale atoms behind for the next file's selections to match.
pub struct EngineSession<'a> {
    engine: &'a mut dyn MutationEngine,
}

impl<'a> EngineSession<'a> {
    /// Loads `path` into the working context and takes ownership of it.
    ///
    /// If the load itself fails the context is cleared immediately; a failed
    /// load may still have left partial state behind.
    pub fn load(
        engine: &'a mut dyn MutationEngine,
        path: &Path,
    ) -> Result<EngineSession<'a>, EngineError> {
        match engine.load(path) {
            Ok(()) => Ok(Self { engine }),
            Err(e) => {
                if let Err(clear_err) = engine.clear_context() {
                    warn!("Failed to clear engine context after failed load: {clear_err}");
                }
                Err(e)
            }
        }
    }

    pub fn enter_mutation_mode(&mut self) -> Result<(), EngineError> {
        self.engine.enter_mutation_mode()
    }

    pub fn select(&mut self, expression: &str) -> Result<u64, EngineError> {
        self.engine.select(expression)
    }

    pub fn set_target_residue(&mut self, target: AminoAcid) -> Result<(), EngineError> {
        self.engine.set_target_residue(target)
    }

    pub fn commit_mutation(&mut self) -> Result<(), EngineError> {
        self.engine.commit_mutation()
    }

    pub fn exit_mutation_mode(&mut self) -> Result<(), EngineError> {
        self.engine.exit_mutation_mode()
    }

    pub fn save(&mut self, path: &Path) -> Result<(), EngineError> {
        self.engine.save(path)
    }
}

impl Drop for EngineSession<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.engine.clear_context() {
            warn!("Failed to clear engine context: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{Call, MockEngine};
    use std::path::PathBuf;

    #[test]
    fn drop_clears_the_working_context() {
        let mut engine = MockEngine::new();
        {
            let _session = EngineSession::load(&mut engine, Path::new("a.pdb")).unwrap();
        }
        assert_eq!(
            engine.calls,
            vec![Call::Load(PathBuf::from("a.pdb")), Call::Clear]
        );
    }

    #[test]
    fn failed_load_clears_and_propagates() {
        let mut engine = MockEngine::new();
        engine.fail_load.insert("broken.pdb".to_string());

        let result = EngineSession::load(&mut engine, Path::new("broken.pdb"));
        assert!(matches!(result, Err(EngineError::LoadFailed(_))));
        drop(result);
        assert_eq!(
            engine.calls,
            vec![Call::Load(PathBuf::from("broken.pdb")), Call::Clear]
        );
    }

    #[test]
    fn context_is_cleared_even_on_early_return() {
        fn partial(engine: &mut MockEngine) -> Result<(), EngineError> {
            let mut session = EngineSession::load(engine, Path::new("a.pdb"))?;
            session.enter_mutation_mode()?;
            Err(EngineError::Protocol("engine hiccup".to_string()))
        }

        let mut engine = MockEngine::new();
        assert!(partial(&mut engine).is_err());
        assert_eq!(engine.calls.last(), Some(&Call::Clear));
    }
}
