//! Codeset factory: resolves ISO-IR registration numbers to codesets
//!
//! Decoders and encoders never construct codesets themselves. They ask a
//! [`CodesetFactory`] at construction time, and the decoder asks again for
//! every designating escape sequence it meets. The factory is passed in
//! explicitly, usually as one shared [`BuiltinFactory`] for the process.

use std::sync::Arc;

use asn1_core::{CodesetType, ControlElement};

use crate::codeset::{registry, Codeset};
use crate::codesets::{
    Arabic, Ascii, EucMultibyte, Iso646, Iso8859RightHalf, Katakana, Latin1, Mosaic,
    OpaqueControl, RegisteredGraphic, StandardControl, Teletex, TeletexSupplementary, Ucs2,
    Ucs4, Utf16, Utf8,
};
use crate::tables;

/// Source of codesets
///
/// # Contract
/// - `get_codeset` returns a fresh handle per call, or `None` for an unknown
///   number. An unknown number is not an error at this level; callers turn
///   it into one that names the number and the target slot.
/// - `graphic_codesets` and `control_codesets` list the numbers the factory
///   prefers, most preferred first. They are defaults, not restrictions.
#[cfg_attr(test, mockall::automock)]
pub trait CodesetFactory: Send + Sync {
    fn get_codeset(&self, number: u32) -> Option<Codeset>;

    fn graphic_codesets(&self) -> Vec<u32>;

    fn control_codesets(&self) -> Vec<u32>;
}

/// Graphic sets in order of preference
const PREFERRED_GRAPHIC: [u32; 9] = [
    registry::LATIN_9,
    registry::LATIN_1,
    registry::ASCII,
    registry::KATAKANA,
    registry::MOSAIC_3,
    registry::MOSAIC_3_REVISED,
    registry::ARABIC,
    registry::TELETEX,
    registry::TELETEX_SUPPLEMENTARY,
];

/// Control sets in order of preference
const PREFERRED_CONTROL: [u32; 3] = [
    registry::STANDARD_C0,
    registry::STANDARD_C1,
    registry::VIDEOTEX_ATTRIBUTES,
];

/// The built-in catalog
///
/// Besides the sets with real mappings, every other number listed in the
/// graphic and control escape tables resolves to a placeholder of the right
/// type, so any registered designation is accepted by the decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFactory;

impl BuiltinFactory {
    pub fn new() -> Self {
        Self
    }

    /// A shared handle, ready to pass to decoders and encoders
    pub fn shared() -> Arc<dyn CodesetFactory> {
        Arc::new(Self)
    }

    fn registered(number: u32) -> Option<Codeset> {
        match tables::registered_type(number)? {
            CodesetType::C0 => Some(Codeset::control(OpaqueControl::new(number, ControlElement::C0))),
            CodesetType::C1 => Some(Codeset::control(OpaqueControl::new(number, ControlElement::C1))),
            kind => RegisteredGraphic::new(number, kind).map(Codeset::graphic),
        }
    }
}

impl CodesetFactory for BuiltinFactory {
    fn get_codeset(&self, number: u32) -> Option<Codeset> {
        let codeset = match number {
            registry::STANDARD_C0 => Codeset::control(StandardControl::c0()),
            registry::STANDARD_C1 => Codeset::control(StandardControl::c1()),
            registry::VIDEOTEX_ATTRIBUTES => Codeset::control(OpaqueControl::videotex_attributes()),
            registry::ASCII => Codeset::graphic(Ascii::new()),
            registry::KATAKANA => Codeset::graphic(Katakana::new()),
            registry::MOSAIC_3 => Codeset::graphic(Mosaic::original()),
            registry::MOSAIC_3_REVISED => Codeset::graphic(Mosaic::revised()),
            registry::ARABIC => Codeset::graphic(Arabic::new()),
            registry::LATIN_1 => Codeset::graphic(Latin1::new()),
            registry::TELETEX => Codeset::graphic(Teletex::new()),
            registry::TELETEX_SUPPLEMENTARY => Codeset::graphic(TeletexSupplementary::new()),
            registry::UTF_8 => Codeset::docs(Utf8::with_standard_return()),
            190..=192 => Codeset::docs(Utf8::without_standard_return(number)),
            193..=195 => Codeset::docs(Utf16::new(number)),
            162 | 174 | 176 => Codeset::docs(Ucs2::new(number)),
            163 | 175 | 177 => Codeset::docs(Ucs4::new(number)),
            _ => {
                if let Some(variant) = Iso646::variant(number) {
                    Codeset::graphic(variant)
                } else if let Some(right_half) = Iso8859RightHalf::for_registration(number) {
                    Codeset::graphic(right_half)
                } else if let Some(multibyte) = EucMultibyte::for_registration(number) {
                    Codeset::graphic(multibyte)
                } else {
                    return Self::registered(number);
                }
            }
        };

        Some(codeset)
    }

    fn graphic_codesets(&self) -> Vec<u32> {
        PREFERRED_GRAPHIC.to_vec()
    }

    fn control_codesets(&self) -> Vec<u32> {
        PREFERRED_CONTROL.to_vec()
    }
}
