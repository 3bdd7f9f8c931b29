//! Construction parameters for decoders and encoders

use asn1_core::{Asn1Error, Asn1Result, Bits, CodeElement, ControlElement, Flags, SingleShiftArea};
use serde::{Deserialize, Serialize};

use crate::codeset::registry;

/// Initial code structure of a decoder or encoder
///
/// A registration number of 0 leaves the element empty.
///
/// # Defaults
/// - 8-bit code
/// - C0 = ISO IR 1, C1 empty
/// - G0 = ASCII (ISO IR 6), G1-G3 empty
/// - G0 invoked into GL, G1 into GR
/// - single shifts act on GR (the 8-bit default)
/// - escapes and control characters allowed, non-canonical encoding
///
/// # Usage Example
///
/// ```rust
/// use asn1_core::{Bits, CodeElement};
/// use asn1_iso2022::Iso2022Config;
///
/// let config = Iso2022Config::new()
///     .with_bits(Bits::Seven)
///     .with_graphic(CodeElement::G1, 100);
/// assert_eq!(config.graphic, [6, 100, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iso2022Config {
    /// 7-bit or 8-bit code
    pub bits: Bits,
    /// Registration numbers bound into C0 and C1
    pub control: [u32; 2],
    /// Registration numbers bound into G0-G3
    pub graphic: [u32; 4],
    /// Element initially invoked into GL
    pub initial_gl: CodeElement,
    /// Element initially invoked into GR
    pub initial_gr: CodeElement,
    /// Where single shifts take effect
    pub single_shift_area: SingleShiftArea,
    /// Behaviour flags
    pub flags: Flags,
}

impl Default for Iso2022Config {
    fn default() -> Self {
        Self {
            bits: Bits::Eight,
            control: [registry::STANDARD_C0, 0],
            graphic: [registry::ASCII, 0, 0, 0],
            initial_gl: CodeElement::G0,
            initial_gr: CodeElement::G1,
            single_shift_area: SingleShiftArea::Default,
            flags: Flags::ALLOW_ESCAPES | Flags::ALLOW_CONTROL_CHARS,
        }
    }
}

impl Iso2022Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bits(mut self, bits: Bits) -> Self {
        self.bits = bits;
        self
    }

    /// Bind a control set (0 for none)
    pub fn with_control(mut self, element: ControlElement, number: u32) -> Self {
        self.control[element.index()] = number;
        self
    }

    /// Bind a graphic set (0 for none)
    pub fn with_graphic(mut self, element: CodeElement, number: u32) -> Self {
        self.graphic[element.index()] = number;
        self
    }

    pub fn with_initial_gl(mut self, element: CodeElement) -> Self {
        self.initial_gl = element;
        self
    }

    pub fn with_initial_gr(mut self, element: CodeElement) -> Self {
        self.initial_gr = element;
        self
    }

    pub fn with_single_shift_area(mut self, area: SingleShiftArea) -> Self {
        self.single_shift_area = area;
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Check the parts of the configuration that need no codeset lookup
    ///
    /// # Errors
    /// `Asn1Error::Config` if G0 is invoked into GR; G0 can only be invoked
    /// into GL.
    pub fn validate(&self) -> Asn1Result<()> {
        if self.initial_gr == CodeElement::G0 {
            return Err(Asn1Error::Config("G0 cannot be invoked into GR".to_string()));
        }
        Ok(())
    }
}
