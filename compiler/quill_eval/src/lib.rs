#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add noise across the crate"
)]
//! Quill Eval - assignment, destructuring and operators for the Quill story
//! language.
//!
//! This crate provides:
//! - The concrete variable store (`VariableStore`) behind `quill_values::Storage`
//! - Destructuring of pattern targets against source values
//! - Assignment requests and the `(set:)`/`(put:)`/`(move:)` consumers
//! - The binary operator table, with determiners, and unary operators
//! - Custom-macro parameter binding
//! - `Evaluator`, a facade tying these together, and its builder
//!
//! # Ordering
//!
//! Evaluation and destructuring run left to right. Assignment applies its
//! bindings right to left, so deleting moved values from a source array
//! never shifts positions that haven't been processed yet.

mod assignment;
mod destructure;
mod determiners;
mod environment;
mod evaluator;
pub mod logging;
mod operators;
mod parameters;
pub mod summary_handler;
mod unary_operators;

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;

pub use assignment::{AssignOperator, AssignmentRequest};
pub use destructure::{destructure, Binding, BindingTarget, Target};
pub use environment::{Scope, VariableStore};
pub use evaluator::{Evaluator, EvaluatorBuilder};
pub use logging::init_tracing;
pub use operators::{evaluate_binary, BinaryOp, OpFlags};
pub use parameters::bind_parameters;
pub use summary_handler::{
    buffer_handler, silent_handler, stdout_handler, SharedSummaryHandler, SummaryHandlerImpl,
};
pub use unary_operators::{determine, evaluate_unary, make_spreader, typify, UnaryOp};
