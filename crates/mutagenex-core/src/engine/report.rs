/// Accumulates run warnings in emission order.
///
/// One report exists per invocation: the applier and workflow write into it,
/// and it is read exactly once at the end of the run for the console summary
/// or the persisted log artifact.
#[derive(Debug, Default)]
pub struct RunReport {
    warnings: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consumes the report, yielding the warnings in emission order.
    pub fn drain(self) -> Vec<String> {
        self.warnings
    }
}
