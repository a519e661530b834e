use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mutagenex - batch point mutagenesis for protein structure files, driven through PyMOL's mutagenesis wizard.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Directory containing the original PDB files, or a single PDB file.
    #[arg(value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Directory to save the mutated PDB files.
    #[arg(value_name = "OUTPUT_PATH")]
    pub output_path: PathBuf,

    /// Comma-separated list of mutations in 'resno_chain_newresidue' form
    /// (e.g. '58_A_PRO,110A_H_ALA'), or path to a mutation file with one
    /// token per line.
    #[arg(short, long, required = true, value_name = "LIST_OR_PATH")]
    pub mutations: String,

    /// Persist the run report to OUTPUT_PATH/mutagenex_<timestamp>.log.
    #[arg(long)]
    pub log: bool,

    /// Path to the PyMOL executable.
    #[arg(long, value_name = "PATH", default_value = "pymol")]
    pub pymol: PathBuf,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_paths_and_mutations() {
        let cli = Cli::parse_from([
            "mutagenex",
            "input_dir",
            "output_dir",
            "--mutations",
            "58_A_PRO,110A_H_ALA",
        ]);
        assert_eq!(cli.input_path, PathBuf::from("input_dir"));
        assert_eq!(cli.output_path, PathBuf::from("output_dir"));
        assert_eq!(cli.mutations, "58_A_PRO,110A_H_ALA");
        assert!(!cli.log);
        assert_eq!(cli.pymol, PathBuf::from("pymol"));
    }

    #[test]
    fn mutations_option_is_required() {
        let result = Cli::try_parse_from(["mutagenex", "input_dir", "output_dir"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from([
            "mutagenex",
            "in",
            "out",
            "-m",
            "58_A_PRO",
            "--quiet",
            "--verbose",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn log_flag_and_pymol_override_are_parsed() {
        let cli = Cli::parse_from([
            "mutagenex",
            "in",
            "out",
            "-m",
            "58_A_PRO",
            "--log",
            "--pymol",
            "/opt/pymol/bin/pymol",
        ]);
        assert!(cli.log);
        assert_eq!(cli.pymol, PathBuf::from("/opt/pymol/bin/pymol"));
    }
}
