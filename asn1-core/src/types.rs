//! ISO/IEC 2022 code structure types
//!
//! These are plain values shared by the decoder, the encoder and their
//! configuration. They carry no codeset data themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the code in use
///
/// In 7-bit mode only the GL half (0x20-0x7F) carries graphic characters and
/// C1 functions are written as `ESC Fe`. In 8-bit mode GR (0xA0-0xFF) and the
/// C1 range (0x80-0x9F) are available as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Bits {
    Seven,
    #[default]
    Eight,
}

/// Graphic code element (G0 to G3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CodeElement {
    G0 = 0,
    G1 = 1,
    G2 = 2,
    G3 = 3,
}

impl CodeElement {
    /// All graphic elements, in slot order
    pub const ALL: [CodeElement; 4] = [
        CodeElement::G0,
        CodeElement::G1,
        CodeElement::G2,
        CodeElement::G3,
    ];

    /// Slot index (0-3)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get element from a slot index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for CodeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.index())
    }
}

/// Control code element (C0 or C1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlElement {
    C0 = 0,
    C1 = 1,
}

impl ControlElement {
    pub const ALL: [ControlElement; 2] = [ControlElement::C0, ControlElement::C1];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The codeset type a codeset must have to be bound into this element
    pub fn codeset_type(self) -> CodesetType {
        match self {
            ControlElement::C0 => CodesetType::C0,
            ControlElement::C1 => CodesetType::C1,
        }
    }
}

impl fmt::Display for ControlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.index())
    }
}

/// Which half of the code table single shifts (SS2/SS3) act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SingleShiftArea {
    /// GR in 8-bit mode, GL in 7-bit mode
    #[default]
    Default,
    Gl,
    Gr,
}

impl SingleShiftArea {
    /// Resolve `Default` against the bit mode
    pub fn resolve(self, bits: Bits) -> Self {
        match (self, bits) {
            (SingleShiftArea::Default, Bits::Eight) => SingleShiftArea::Gr,
            (SingleShiftArea::Default, Bits::Seven) => SingleShiftArea::Gl,
            (area, _) => area,
        }
    }
}

bitflags::bitflags! {
    /// Behaviour flags for decoders and encoders
    ///
    /// `ALLOW_SHIFT_CHARS` lets LS0, LS1, SS2 and SS3 through even when
    /// `ALLOW_CONTROL_CHARS` is clear; other control characters are then shown
    /// as control pictures. `ALLOW_CONTROL_CHARS` does not affect escape
    /// sequences, which are governed by `ALLOW_ESCAPES` alone.
    /// `CANONICAL_MODE` only affects the encoder: it selects the CER/DER rules
    /// for which element a newly designated set goes into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Flags: u32 {
        const ALLOW_ESCAPES       = 0x0001;
        const ALLOW_CONTROL_CHARS = 0x0002;
        const ALLOW_SHIFT_CHARS   = 0x0004;
        const CANONICAL_MODE      = 0x0008;
    }
}

/// Kind of a registered codeset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodesetType {
    /// C0 control set
    C0,
    /// C1 control set
    C1,
    /// 94-character graphic set
    G94,
    /// 96-character graphic set
    G96,
    /// Multiple-byte graphic set
    Multibyte,
    /// Other coding system, returning via `ESC 2/5 4/0`
    DocsWithReturn,
    /// Other coding system without standard return
    DocsWithoutReturn,
}

impl CodesetType {
    pub fn is_graphic(self) -> bool {
        matches!(self, CodesetType::G94 | CodesetType::G96 | CodesetType::Multibyte)
    }
}

impl fmt::Display for CodesetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodesetType::C0 => "C0 control",
            CodesetType::C1 => "C1 control",
            CodesetType::G94 => "94-character graphic",
            CodesetType::G96 => "96-character graphic",
            CodesetType::Multibyte => "multiple-byte graphic",
            CodesetType::DocsWithReturn => "non-ISO 2022 (with standard return)",
            CodesetType::DocsWithoutReturn => "non-ISO 2022 (without standard return)",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shift_area_resolve() {
        assert_eq!(SingleShiftArea::Default.resolve(Bits::Eight), SingleShiftArea::Gr);
        assert_eq!(SingleShiftArea::Default.resolve(Bits::Seven), SingleShiftArea::Gl);
        assert_eq!(SingleShiftArea::Gl.resolve(Bits::Eight), SingleShiftArea::Gl);
    }

    #[test]
    fn test_code_element_index() {
        for (n, element) in CodeElement::ALL.iter().enumerate() {
            assert_eq!(element.index(), n);
            assert_eq!(CodeElement::from_index(n), Some(*element));
        }
        assert_eq!(CodeElement::from_index(4), None);
        assert_eq!(CodeElement::G3.to_string(), "G3");
    }

    #[test]
    fn test_codeset_type_classes() {
        assert!(CodesetType::Multibyte.is_graphic());
        assert!(!CodesetType::C1.is_graphic());
    }
}
