use mutagenex::core::spec::SpecError;
use mutagenex::workflows::mutate::MutateError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid mutation format detected. Please correct the mutations: {0}")]
    Spec(#[from] SpecError),

    #[error("Mutation input error: {0}")]
    Mutations(String),

    #[error(transparent)]
    Workflow(#[from] MutateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Exit code per failure class: 2 for bad input, 3 for an unusable
    /// engine, 4 for I/O, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Spec(_) | CliError::Mutations(_) => 2,
            CliError::Workflow(MutateError::EngineUnavailable) => 3,
            CliError::Workflow(MutateError::Locate(_)) => 2,
            CliError::Workflow(MutateError::OutputDir { .. }) => 4,
            CliError::Io(_) => 4,
            CliError::Other(_) => 1,
        }
    }
}
