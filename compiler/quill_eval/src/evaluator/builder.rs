//! `EvaluatorBuilder` for creating evaluators with various configurations.

use super::Evaluator;
use crate::environment::VariableStore;
use crate::summary_handler::{stdout_handler, SharedSummaryHandler};

/// Builder for [`Evaluator`].
///
/// Defaults: an empty store, debug mode off, summaries to stdout (only
/// written when debug mode is on).
#[derive(Default)]
pub struct EvaluatorBuilder {
    store: Option<VariableStore>,
    debug_mode: bool,
    summary_handler: Option<SharedSummaryHandler>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder configured from the environment.
    ///
    /// `QUILL_DEBUG=1` (or `true`) turns debug mode on.
    pub fn from_env() -> Self {
        let debug_mode = std::env::var("QUILL_DEBUG")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        Self::new().debug_mode(debug_mode)
    }

    /// Start from an existing store.
    #[must_use]
    pub fn store(mut self, store: VariableStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Report every assignment to the summary handler.
    #[must_use]
    pub fn debug_mode(mut self, on: bool) -> Self {
        self.debug_mode = on;
        self
    }

    #[must_use]
    pub fn summary_handler(mut self, handler: SharedSummaryHandler) -> Self {
        self.summary_handler = Some(handler);
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            store: self.store.unwrap_or_default(),
            debug_mode: self.debug_mode,
            summary_handler: self.summary_handler.unwrap_or_else(stdout_handler),
        }
    }
}
