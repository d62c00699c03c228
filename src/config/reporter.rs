//! Diagnostic sinks used while loading.

use tracing::{error, warn};

use crate::domain::Diagnostic;

/// Receives load-time diagnostics.
pub trait Reporter {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Default reporter: forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        if diagnostic.invalidates() {
            error!("{}", diagnostic);
        } else {
            warn!("{}", diagnostic);
        }
    }
}

/// Collects diagnostics for later inspection.
impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}
