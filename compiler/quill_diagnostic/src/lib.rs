//! Diagnostic support for the Quill story language.
//!
//! Runtime failures in Quill are ordinary data rather than unwinding
//! exceptions. Whatever layer produces one tags it with an [`ErrorKind`],
//! and the host eventually turns it into an annotated error marker:
//!
//! - the kind (searchable, stable lowercase name)
//! - a message (what went wrong)
//! - the failing source text (where it went wrong)
//! - an explanation (why it usually happens), looked up per kind
//!
//! This crate owns the kind taxonomy and the marker rendering; the value
//! layer (`quill_values`) owns the error values themselves.

mod diagnostic;
mod error_kind;

pub use diagnostic::Diagnostic;
pub use error_kind::ErrorKind;
