//! Error types for the ISO 2022 engine
//!
//! The engine shares the workspace error type. Only construction and
//! configuration report errors; stream problems are represented in the
//! decoded text.

pub use asn1_core::{Asn1Error, Asn1Result, Slot};
