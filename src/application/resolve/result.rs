//! Resolve Result

use crate::domain::services::RunReport;

#[derive(Debug, Clone, Default)]
pub struct ResolveResult {
    pub report: RunReport,
    /// Whether the build index was written.
    pub index_saved: bool,
    /// Whether the context set was written.
    pub context_set_saved: bool,
}

impl ResolveResult {
    pub fn succeeded(&self) -> bool {
        self.report.succeeded()
    }
}
