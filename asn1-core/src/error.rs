use std::fmt;
use thiserror::Error;

use crate::types::{CodeElement, CodesetType, ControlElement};

/// Where a codeset was about to be bound when resolution failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// One of the control slots (C0 or C1)
    Control(ControlElement),
    /// One of the graphic slots (G0 to G3)
    Graphic(CodeElement),
    /// The encoder's permitted graphic codeset list
    Permitted,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Control(element) => write!(f, "{}", element),
            Slot::Graphic(element) => write!(f, "{}", element),
            Slot::Permitted => f.write_str("permitted graphic set list"),
        }
    }
}

/// Main error type for the ASN.1 string codecs
///
/// Only configuration problems surface as errors. Malformed ISO 2022 input is
/// never reported here: the decoder represents it in its output instead.
#[derive(Error, Debug)]
pub enum Asn1Error {
    #[error("Unknown code set ISO IR {number} for {slot}")]
    UnknownCodeset { slot: Slot, number: u32 },

    #[error("Attempted to select {found} code set ISO IR {number} into {slot}")]
    CodesetMismatch {
        slot: Slot,
        number: u32,
        found: CodesetType,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for the ASN.1 string codecs
pub type Asn1Result<T> = Result<T, Asn1Error>;
