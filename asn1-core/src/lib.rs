//! Core types and utilities for the ASN.1 string codecs
//!
//! This crate provides the error type shared by the workspace and the small
//! value types that describe an ISO/IEC 2022 code structure: graphic and
//! control code elements, the 7/8-bit mode, the single-shift area, behaviour
//! flags, and the codeset type taxonomy.

pub mod error;
pub mod types;

pub use error::{Asn1Error, Asn1Result, Slot};
pub use types::{Bits, CodeElement, CodesetType, ControlElement, Flags, SingleShiftArea};
