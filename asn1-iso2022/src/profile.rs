//! ASN.1 restricted character string types built on ISO 2022
//!
//! TeletexString, VideotexString, GeneralString and GraphicString values are
//! ISO 2022 byte strings that start from a fixed code structure. A
//! [`StringCodec`] pairs a decoder and a canonical-mode encoder set up for one
//! of these types and converts whole values.

use std::sync::Arc;

use asn1_core::{Asn1Result, CodeElement, ControlElement, Flags};
use serde::{Deserialize, Serialize};

use crate::codeset::registry;
use crate::config::Iso2022Config;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::factory::CodesetFactory;

/// Byte written for characters a profile cannot represent
pub const DEFAULT_REPLACEMENT: u8 = b'?';

/// ISO 2022-based ASN.1 string type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringProfile {
    /// TeletexString (T61String)
    Teletex,
    /// VideotexString
    Videotex,
    /// GeneralString
    General,
    /// GraphicString
    Graphic,
}

impl StringProfile {
    /// Initial code structure of values of this type
    pub fn config(self) -> Iso2022Config {
        let canonical = Flags::ALLOW_ESCAPES | Flags::ALLOW_CONTROL_CHARS | Flags::CANONICAL_MODE;
        match self {
            StringProfile::Teletex => Iso2022Config::new()
                .with_graphic(CodeElement::G0, registry::TELETEX)
                .with_flags(canonical),
            StringProfile::Videotex => Iso2022Config::new()
                .with_graphic(CodeElement::G0, registry::TELETEX)
                .with_control(ControlElement::C1, registry::VIDEOTEX_ATTRIBUTES)
                .with_flags(canonical),
            StringProfile::General | StringProfile::Graphic => Iso2022Config::new().with_flags(canonical),
        }
    }

    /// Flags the decoder uses
    fn decoder_flags(self) -> Flags {
        match self {
            StringProfile::Graphic => Flags::ALLOW_ESCAPES,
            _ => Flags::ALLOW_ESCAPES | Flags::ALLOW_CONTROL_CHARS,
        }
    }

    /// Sets the encoder may designate
    fn permitted(self, factory: &dyn CodesetFactory) -> Vec<u32> {
        match self {
            StringProfile::Teletex => vec![
                registry::ASCII,
                registry::TELETEX,
                registry::TELETEX_SUPPLEMENTARY,
            ],
            StringProfile::Videotex => vec![
                registry::KATAKANA,
                registry::MOSAIC_3,
                registry::ARABIC,
                registry::TELETEX,
            ],
            StringProfile::General | StringProfile::Graphic => factory.graphic_codesets(),
        }
    }
}

/// Converts whole values of one string type
pub struct StringCodec {
    profile: StringProfile,
    decoder: Decoder,
    encoder: Encoder,
}

impl StringCodec {
    /// Build the decoder and encoder for a profile
    ///
    /// # Errors
    /// If the factory cannot resolve a set the profile needs.
    pub fn new(profile: StringProfile, factory: Arc<dyn CodesetFactory>) -> Asn1Result<Self> {
        let config = profile.config();
        let decoder_config = config.clone().with_flags(profile.decoder_flags());

        let decoder = Decoder::new(Arc::clone(&factory), &decoder_config)?;
        let mut encoder = Encoder::new(Arc::clone(&factory), &config)?;
        encoder.set_permitted_graphic_codesets(&profile.permitted(factory.as_ref()))?;

        log::debug!("String codec ready for {:?}", profile);
        Ok(Self {
            profile,
            decoder,
            encoder,
        })
    }

    pub fn profile(&self) -> StringProfile {
        self.profile
    }

    /// Encode a value, writing `?` for unrepresentable characters
    pub fn encode(&mut self, text: &str) -> Vec<u8> {
        self.encode_with_replacement(text, DEFAULT_REPLACEMENT)
    }

    pub fn encode_with_replacement(&mut self, text: &str, replacement: u8) -> Vec<u8> {
        self.encoder.reset();
        self.encoder.encode(text, replacement)
    }

    /// Decode a value
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.decoder.reset();
        self.decoder.decode(bytes)
    }
}
