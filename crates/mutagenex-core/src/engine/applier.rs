use super::MutationEngine;
use super::error::EngineError;
use super::report::RunReport;
use super::session::EngineSession;
use crate::core::locator::StructureFile;
use crate::core::spec::MutationSpec;
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of attempting one mutation against one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationOutcome {
    Applied,
    /// The addressed residue/chain does not exist in this structure. The
    /// mutation is skipped; the rest of the batch still runs.
    SkippedNotFound,
}

/// Per-file tally of mutation outcomes, in application order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub applied: usize,
    pub skipped: usize,
    pub outcomes: Vec<ApplicationOutcome>,
}

impl FileReport {
    fn record(&mut self, outcome: ApplicationOutcome) {
        match outcome {
            ApplicationOutcome::Applied => self.applied += 1,
            ApplicationOutcome::SkippedNotFound => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Applies a mutation batch to one structure file and writes the mutated copy.
///
/// Protocol, strictly sequential: load the structure, enter mutagenesis mode,
/// then for each mutation select its residue and either commit the change or
/// skip it with a warning when the selection matches nothing. The file is
/// saved with whichever mutations succeeded, and the working context is
/// cleared when the session drops, on success and failure alike.
pub fn apply_mutations(
    engine: &mut dyn MutationEngine,
    file: &StructureFile,
    spec: &MutationSpec,
    output_dir: &Path,
    report: &mut RunReport,
) -> Result<FileReport, EngineError> {
    debug!(file = %file.path().display(), "Loading structure into engine context");
    let mut session = EngineSession::load(engine, file.path())?;
    session.enter_mutation_mode()?;

    let mut file_report = FileReport::default();
    for record in spec {
        let selection = record.selection();
        let count = session.select(&selection)?;
        if count == 0 {
            warn!(
                file = %file.name(),
                mutation = %record,
                "Selection matched no atoms; skipping mutation"
            );
            report.push(format!(
                "Residue {} (chain {}) not found in '{}'; mutation to {} skipped.",
                record.position,
                record.chain_id,
                file.name(),
                record.target
            ));
            file_report.record(ApplicationOutcome::SkippedNotFound);
            continue;
        }

        debug!(mutation = %record, atoms = count, "Applying mutation");
        session.set_target_residue(record.target)?;
        session.commit_mutation()?;
        file_report.record(ApplicationOutcome::Applied);
    }

    session.exit_mutation_mode()?;

    let output = file.output_path(output_dir);
    session.save(&output)?;
    info!(
        file = %file.name(),
        applied = file_report.applied,
        skipped = file_report.skipped,
        "Saved mutated structure"
    );

    Ok(file_report)
}
