//! ASN.1 legacy string codecs - Main entry point
//!
//! This library converts the ISO/IEC 2022 based ASN.1 string types
//! (TeletexString, VideotexString, GeneralString, GraphicString) to and from
//! Unicode.
//!
//! # Architecture
//!
//! - `asn1-core`: Error type, code structure types and flags
//! - `asn1-iso2022`: Codesets, codeset factory, ISO 2022 decoder and encoder
//!
//! # Usage
//!
//! ```rust
//! use asn1::{BuiltinFactory, StringCodec, StringProfile};
//!
//! let mut codec = StringCodec::new(StringProfile::Teletex, BuiltinFactory::shared())?;
//! let bytes = codec.encode("Hello");
//! assert_eq!(codec.decode(&bytes), "Hello");
//! # Ok::<(), asn1::Asn1Error>(())
//! ```

// Re-export core types
pub use asn1_core::{
    Asn1Error, Asn1Result, Bits, CodeElement, CodesetType, ControlElement, Flags, SingleShiftArea,
    Slot,
};

// Re-export the string codecs
pub use asn1_iso2022::{
    BuiltinFactory, CodesetFactory, Decoder, Encoder, Iso2022Config, StringCodec, StringProfile,
};

// Re-export codesets for custom factories
pub mod codeset {
    pub use asn1_iso2022::codeset::*;
    pub use asn1_iso2022::codesets;
}
