use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine is not available: {0}")]
    Unavailable(String),

    #[error("Failed to launch engine process '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Engine process exited unexpectedly")]
    ProcessExited,

    #[error("Engine protocol error: {0}")]
    Protocol(String),

    #[error("Engine failed to load structure from '{}'", .0.display())]
    LoadFailed(PathBuf),

    #[error("Engine failed to save structure to '{}'", .0.display())]
    SaveFailed(PathBuf),

    #[error("I/O error while driving the engine: {0}")]
    Io(#[from] io::Error),
}
