use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use chrono::Local;
use mutagenex::core::spec::{self, MutationSpec, TokenSource};
use mutagenex::engine::progress::ProgressReporter;
use mutagenex::engine::pymol::PyMolEngine;
use mutagenex::engine::report::RunReport;
use mutagenex::workflows::mutate as workflow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: &Cli) -> Result<()> {
    info!("Loading mutation specification...");
    let tokens = match spec::load_tokens(&args.mutations)? {
        TokenSource::Inline(tokens) | TokenSource::File(tokens) => tokens,
        TokenSource::FileNotFound(path) => {
            return Err(CliError::Mutations(format!(
                "the file '{}' does not exist",
                path.display()
            )));
        }
        TokenSource::NotAFile(path) => {
            return Err(CliError::Mutations(format!(
                "the path '{}' is not a valid file",
                path.display()
            )));
        }
    };
    let spec = MutationSpec::parse(&tokens)?;
    info!(mutations = spec.len(), "Mutation specification validated.");

    let mut engine = PyMolEngine::with_executable(&args.pymol);
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut report = RunReport::new();

    let summary = workflow::run(
        &mut engine,
        &args.input_path,
        &args.output_path,
        &spec,
        &reporter,
        &mut report,
    )?;

    if !summary.touched_any_file() {
        println!("Warning: No PDB files found in the specified directory.");
    } else {
        println!(
            "Mutagenesis completed: {} file(s) processed, {} failed, {} mutation(s) applied, {} skipped.",
            summary.files_processed,
            summary.files_failed,
            summary.mutations_applied,
            summary.mutations_skipped
        );
    }

    if report.has_warnings() {
        println!("{} warning(s) were recorded during the run.", report.len());
    }

    if args.log {
        let log_path = write_run_log(&args.output_path, &report)?;
        println!("Run log written to: {}", log_path.display());
    }

    Ok(())
}

/// Persists the run report verbatim, one timestamped event per line, to
/// `output_dir/mutagenex_<YYMMDD_HHMMSS>.log`.
fn write_run_log(output_dir: &Path, report: &RunReport) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let stamp = Local::now();
    let path = output_dir.join(format!("mutagenex_{}.log", stamp.format("%y%m%d_%H%M%S")));

    let mut file = fs::File::create(&path)?;
    let event_stamp = stamp.format("%Y-%m-%d %H:%M:%S");
    if report.is_empty() {
        writeln!(
            file,
            "[{event_stamp}] INFO  Run completed with no warnings."
        )?;
    } else {
        for warning in report.warnings() {
            writeln!(file, "[{event_stamp}] WARN  {warning}")?;
        }
    }
    info!(path = %path.display(), "Run log persisted");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_log_contains_one_line_per_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = RunReport::new();
        report.push("Residue 9999 (chain Z) not found in 'a.pdb'; mutation to PRO skipped.");
        report.push("ERROR processing 'b.pdb': Engine failed to load structure from 'b.pdb'");

        let path = write_run_log(dir.path(), &report).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("9999"));
        assert!(lines[1].contains("b.pdb"));
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("mutagenex_")
        );
    }

    #[test]
    fn empty_report_still_produces_a_log_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let report = RunReport::new();

        let path = write_run_log(dir.path(), &report).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("no warnings"));
    }

    #[test]
    fn run_log_creates_the_output_directory_if_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results");
        let report = RunReport::new();

        let path = write_run_log(&nested, &report).unwrap();
        assert!(path.is_file());
    }
}
