use crate::core::locator::{self, LocateError, STRUCTURE_EXTENSION};
use crate::core::spec::MutationSpec;
use crate::engine::MutationEngine;
use crate::engine::applier;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::RunReport;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum MutateError {
    #[error("Mutation engine is not available or not accessible.")]
    EngineUnavailable,

    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error("Failed to create output directory '{}': {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// End-of-run tally across all files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub mutations_applied: usize,
    pub mutations_skipped: usize,
}

impl RunSummary {
    pub fn touched_any_file(&self) -> bool {
        self.files_processed > 0 || self.files_failed > 0
    }
}

/// Applies a validated mutation batch to every structure under `input_path`.
///
/// Files are processed strictly sequentially, one engine context at a time.
/// An engine fault while processing one file (a corrupt structure, a failed
/// save) is confined to that file: it is recorded as a warning and the batch
/// moves on. Only setup-level failures abort the run before any file is
/// touched.
pub fn run(
    engine: &mut dyn MutationEngine,
    input_path: &Path,
    output_path: &Path,
    spec: &MutationSpec,
    reporter: &ProgressReporter,
    report: &mut RunReport,
) -> Result<RunSummary, MutateError> {
    if !engine.is_available() {
        return Err(MutateError::EngineUnavailable);
    }

    let files = locator::locate(input_path)?;
    if files.is_empty() {
        warn!(
            directory = %input_path.display(),
            "No structure files found; nothing to do"
        );
        report.push(format!(
            "No .{STRUCTURE_EXTENSION} files found in '{}'.",
            input_path.display()
        ));
        return Ok(RunSummary::default());
    }

    fs::create_dir_all(output_path).map_err(|source| MutateError::OutputDir {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(
        files = files.len(),
        mutations = spec.len(),
        "Starting mutagenesis batch"
    );
    reporter.report(Progress::PhaseStart {
        name: "Mutating structure files",
    });
    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });

    let mut summary = RunSummary::default();
    for file in &files {
        match applier::apply_mutations(engine, file, spec, output_path, report) {
            Ok(file_report) => {
                summary.files_processed += 1;
                summary.mutations_applied += file_report.applied;
                summary.mutations_skipped += file_report.skipped;
            }
            Err(e) => {
                // Confined to this file; the rest of the batch still runs.
                error!(file = %file.name(), error = %e, "Failed to process structure file");
                report.push(format!("ERROR processing '{}': {}", file.name(), e));
                summary.files_failed += 1;
            }
        }
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(
        processed = summary.files_processed,
        failed = summary.files_failed,
        applied = summary.mutations_applied,
        skipped = summary.mutations_skipped,
        "Mutagenesis batch finished"
    );
    Ok(summary)
}
