//! The evaluator facade.
//!
//! An [`Evaluator`] owns the variable store and exposes the operations a
//! markup interpreter needs: the `(set:)`, `(put:)` and `(move:)` macros,
//! reading references, operators, temp scopes and custom-macro parameters.

mod builder;

pub use builder::EvaluatorBuilder;

use quill_values::{CustomMacro, EvalError, EvalResult, Value, VarRef};

use crate::assignment::{AssignOperator, AssignmentRequest};
use crate::environment::VariableStore;
use crate::operators::{evaluate_binary, BinaryOp};
use crate::summary_handler::SharedSummaryHandler;

pub struct Evaluator {
    store: VariableStore,
    debug_mode: bool,
    summary_handler: SharedSummaryHandler,
}

impl Evaluator {
    /// An evaluator with an empty store, debug mode off.
    pub fn new() -> Self {
        EvaluatorBuilder::new().build()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn summary_handler(&self) -> &SharedSummaryHandler {
        &self.summary_handler
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VariableStore {
        &mut self.store
    }

    /// `(set: $x to 1, ...)`.
    pub fn set(&mut self, requests: &[AssignmentRequest]) -> EvalResult<()> {
        self.run("set", AssignOperator::To, requests, false)
    }

    /// `(put: 1 into $x, ...)`.
    pub fn put(&mut self, requests: &[AssignmentRequest]) -> EvalResult<()> {
        self.run("put", AssignOperator::Into, requests, false)
    }

    /// `(move: $a into $x, ...)`: like `put`, but the moved values are
    /// removed from where they came from.
    pub fn move_into(&mut self, requests: &[AssignmentRequest]) -> EvalResult<()> {
        self.run("move", AssignOperator::Into, requests, true)
    }

    /// Requests run in order; the first failure stops the rest.
    fn run(
        &mut self,
        name: &str,
        expected: AssignOperator,
        requests: &[AssignmentRequest],
        delete_source: bool,
    ) -> EvalResult<()> {
        if let Some(wrong) = requests.iter().find(|r| r.operator != expected) {
            let other = wrong.operator;
            return Err(EvalError::syntax(format!(
                "Please say '{expected}' rather than '{other}' when using the ({name}:) macro."
            ))
            .with_source(wrong.to_string()));
        }
        let _span = tracing::debug_span!("assign", macro_name = name).entered();
        for request in requests {
            let summary = request.execute(&mut self.store, delete_source)?;
            if self.debug_mode {
                self.summary_handler.line(&summary);
            }
        }
        Ok(())
    }

    /// Current value of a reference.
    pub fn get(&self, var_ref: &VarRef) -> EvalResult {
        var_ref.get(&self.store)
    }

    pub fn binary(&self, left: &Value, op: BinaryOp, right: &Value) -> EvalResult {
        evaluate_binary(left, right, op)
    }

    /// Enter a new temp scope (a hook or custom-macro body).
    pub fn push_scope(&mut self) {
        self.store.push_scope();
    }

    pub fn pop_scope(&mut self) {
        self.store.pop_scope();
    }

    /// Bind a custom macro's arguments into the innermost temp scope.
    pub fn bind_parameters(&mut self, mac: &CustomMacro, args: &[Value]) -> EvalResult<()> {
        crate::parameters::bind_parameters(mac, args, &mut self.store)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
