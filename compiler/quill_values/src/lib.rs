#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add noise across the crate"
)]
//! Quill Values - the runtime value model of the Quill story language.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Heap`) and their canonical source rendering
//! - Evaluation errors (`EvalError`, `EvalResult`) as ordinary data
//! - The datatype registry (`Datatype`, `DatatypeName`)
//! - Structural pattern matching (`matches`) including rest/spread elements
//! - String patterns, which can capture substrings into typed variables
//! - Typed variables (`TypedVar`) and references to storage (`VarRef`)
//!
//! # Storage
//!
//! Values never mutate storage directly. Every read or write goes through a
//! [`VarRef`] against something implementing [`Storage`]; the concrete
//! variable store lives in `quill_eval`.
//!
//! # Value sharing
//!
//! Composite and domain payloads sit behind `Heap<T>`, a shared immutable
//! allocation. Cloning a value never copies its contents, and since shared
//! values are never mutated in place, a clone behaves as a deep copy.

mod datatype;
mod errors;
mod pattern;
mod reference;
mod stack;
mod string_pattern;
mod typed_var;
mod value;

pub use datatype::{Datatype, DatatypeName};
pub use errors::{
    cannot_store, capitalize, contains_error, division_by_zero, invalid_operand, modulo_by_zero,
    non_finite_result, only_primitives, type_mismatch, EvalError, EvalResult,
};
pub use pattern::{
    is_composite_pattern, is_pattern, matches, rest_inner, Arity, Capture, Destructurable,
    TypeSignature,
};
pub use quill_diagnostic::{Diagnostic, ErrorKind};
pub use reference::{ordinal, Accessor, Operand, Storage, VarRef, VarScope};
pub use stack::ensure_sufficient_stack;
pub use string_pattern::StringPattern;
pub use typed_var::TypedVar;
pub use value::{
    ChangerCall, Changer, CodeHook, CollectionKind, Colour, Command, CustomMacro, Determined,
    Determiner, Gradient, GradientStop, Heap, Lambda, PrimitiveKind, Value,
};
