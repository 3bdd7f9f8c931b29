//! ISO/IEC 2022 text transcoding for ASN.1 legacy string types
//!
//! This crate converts between Unicode and the ISO 2022 byte strings used by
//! TeletexString, VideotexString, GeneralString and GraphicString values.
//!
//! - [`codeset`]: codeset traits and the shared [`Codeset`] handle
//! - [`codesets`]: the built-in character sets
//! - [`factory`]: resolving ISO-IR registration numbers to codesets
//! - [`tables`]: the escape sequence registration tables
//! - [`decoder`]: the byte-at-a-time escape sequence state machine
//! - [`encoder`]: Unicode to ISO 2022 with set designation
//! - [`profile`]: ready-made codecs for the ASN.1 string types
//!
//! # Usage Example
//!
//! ```rust
//! use asn1_iso2022::{BuiltinFactory, Decoder, Encoder, Iso2022Config};
//!
//! let factory = BuiltinFactory::shared();
//! let config = Iso2022Config::default();
//!
//! let mut encoder = Encoder::new(factory.clone(), &config)?;
//! encoder.set_permitted_graphic_codesets(&[6, 100])?;
//! let bytes = encoder.encode("caf\u{e9}", b'?');
//!
//! let mut decoder = Decoder::new(factory, &config)?;
//! assert_eq!(decoder.decode(&bytes), "caf\u{e9}");
//! # Ok::<(), asn1_iso2022::Asn1Error>(())
//! ```

mod bindings;

pub mod codeset;
pub mod codesets;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod profile;
pub mod tables;

pub use codeset::{
    Codeset, CodesetIdentity, ControlCodeset, DocsCodeset, DocsProgress, GraphicCodeset,
};
pub use config::Iso2022Config;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Asn1Error, Asn1Result, Slot};
pub use factory::{BuiltinFactory, CodesetFactory};
pub use profile::{StringCodec, StringProfile};
