use super::MutationEngine;
use super::error::EngineError;
use crate::core::models::residue::AminoAcid;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tracing::{debug, trace, warn};

const ACK_MARKER: &str = "MTX_ACK";
const COUNT_MARKER: &str = "MTX_COUNT";

/// Adapter that drives a headless PyMOL process through its mutagenesis
/// wizard.
///
/// PyMOL is launched once per engine (`-cqp`: headless, quiet, commands from
/// stdin) and spoken to over a line-oriented protocol: every command line is
/// followed by a sentinel `print` whose echo confirms the command was
/// consumed. Launching quiet keeps the engine's console chatter out of the
/// protocol stream and out of the user's terminal.
///
/// PyMOL reports most wizard faults as console text rather than exit codes,
/// so failures are detected by observable effects instead: a load that leaves
/// the context empty is a failed load, and a save that produces no file is a
/// failed save.
pub struct PyMolEngine {
    executable: PathBuf,
    process: Option<PyMolProcess>,
}

impl PyMolEngine {
    pub fn new() -> Self {
        Self::with_executable("pymol")
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            process: None,
        }
    }

    fn process(&mut self) -> Result<&mut PyMolProcess, EngineError> {
        if self.process.is_none() {
            self.process = Some(PyMolProcess::spawn(&self.executable)?);
        }
        match self.process.as_mut() {
            Some(process) => Ok(process),
            None => Err(EngineError::ProcessExited),
        }
    }
}

impl Default for PyMolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationEngine for PyMolEngine {
    fn is_available(&self) -> bool {
        let probe = Command::new(&self.executable)
            .args(["-cq", "-d", "quit"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match probe {
            Ok(status) => status.success(),
            Err(e) => {
                debug!(
                    executable = %self.executable.display(),
                    error = %e,
                    "Engine availability probe failed"
                );
                false
            }
        }
    }

    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let process = self.process()?;
        process.command(&format!(
            "cmd.load({})",
            py_str(&path.display().to_string())
        ))?;
        // A failed load prints an error and leaves the context empty; probe
        // the atom count rather than parsing engine chatter.
        if process.query_count("all")? == 0 {
            return Err(EngineError::LoadFailed(path.to_path_buf()));
        }
        Ok(())
    }

    fn enter_mutation_mode(&mut self) -> Result<(), EngineError> {
        self.process()?.command("cmd.wizard(\"mutagenesis\")")
    }

    fn select(&mut self, expression: &str) -> Result<u64, EngineError> {
        let process = self.process()?;
        let count = process.query_count(expression)?;
        // do_select on an empty selection makes the wizard print an error;
        // the count gate keeps the protocol stream clean.
        if count > 0 {
            process.command(&format!(
                "cmd.get_wizard().do_select({})",
                py_str(expression)
            ))?;
        }
        Ok(count)
    }

    fn set_target_residue(&mut self, target: AminoAcid) -> Result<(), EngineError> {
        self.process()?.command(&format!(
            "cmd.get_wizard().set_mode({})",
            py_str(target.three_letter())
        ))
    }

    fn commit_mutation(&mut self) -> Result<(), EngineError> {
        self.process()?.command("cmd.get_wizard().apply()")
    }

    fn exit_mutation_mode(&mut self) -> Result<(), EngineError> {
        self.process()?.command("cmd.set_wizard()")
    }

    fn save(&mut self, path: &Path) -> Result<(), EngineError> {
        self.process()?.command(&format!(
            "cmd.save({})",
            py_str(&path.display().to_string())
        ))?;
        if !path.exists() {
            return Err(EngineError::SaveFailed(path.to_path_buf()));
        }
        Ok(())
    }

    fn clear_context(&mut self) -> Result<(), EngineError> {
        self.process()?.command("cmd.delete(\"all\")")
    }
}

struct PyMolProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl PyMolProcess {
    fn spawn(executable: &Path) -> Result<Self, EngineError> {
        debug!(executable = %executable.display(), "Spawning engine process");
        let mut child = Command::new(executable)
            .args(["-cqp"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Launch {
                command: executable.display().to_string(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(EngineError::ProcessExited)?;
        let stdout = child.stdout.take().ok_or(EngineError::ProcessExited)?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    /// Sends one python statement and waits for its ack sentinel.
    ///
    /// The sentinel is a separate stdin line, so it still executes (and the
    /// protocol stays in sync) when the statement itself fails inside the
    /// engine.
    fn command(&mut self, statement: &str) -> Result<(), EngineError> {
        trace!(statement, "engine <-");
        writeln!(self.stdin, "/{statement}")?;
        writeln!(self.stdin, "/print(\"{ACK_MARKER}\")")?;
        self.stdin.flush()?;
        self.wait_for(ACK_MARKER)?;
        Ok(())
    }

    /// Asks the engine how many atoms match `selection`.
    fn query_count(&mut self, selection: &str) -> Result<u64, EngineError> {
        writeln!(
            self.stdin,
            "/print(\"{COUNT_MARKER} %d\" % cmd.count_atoms({}))",
            py_str(selection)
        )?;
        writeln!(self.stdin, "/print(\"{ACK_MARKER}\")")?;
        self.stdin.flush()?;

        let mut count = None;
        loop {
            let line = self.read_line()?;
            if let Some(payload) = line.strip_prefix(COUNT_MARKER) {
                count = Some(payload.trim().parse::<u64>().map_err(|_| {
                    EngineError::Protocol(format!("unparseable atom count '{}'", payload.trim()))
                })?);
            } else if line.starts_with(ACK_MARKER) {
                // count_atoms raised (e.g. malformed selection) and printed
                // nothing before the sentinel.
                return count.ok_or_else(|| {
                    EngineError::Protocol(format!("no atom count returned for '{selection}'"))
                });
            }
        }
    }

    fn wait_for(&mut self, marker: &str) -> Result<String, EngineError> {
        loop {
            let line = self.read_line()?;
            if let Some(rest) = line.strip_prefix(marker) {
                return Ok(rest.trim().to_string());
            }
        }
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(EngineError::ProcessExited);
        }
        let line = line.trim_end().to_string();
        trace!(line = %line, "engine ->");
        Ok(line)
    }
}

impl Drop for PyMolProcess {
    fn drop(&mut self) {
        let _ = writeln!(self.stdin, "/cmd.quit()");
        let _ = self.stdin.flush();
        if let Err(e) = self.child.kill() {
            trace!("Engine process already gone on shutdown: {e}");
        }
        if let Err(e) = self.child.wait() {
            warn!("Failed to reap engine process: {e}");
        }
    }
}

/// Renders `s` as a double-quoted python string literal.
fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
