//! Test modules for the operator and parameter implementations.
