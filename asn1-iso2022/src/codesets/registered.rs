//! Graphic sets that are registered but have no mapping available
//!
//! Designating one of these is still a valid escape sequence; every code
//! position it carries decodes to U+FFFD and nothing encodes to it.

use asn1_core::CodesetType;

use crate::codeset::{CodesetIdentity, GraphicCodeset, REPLACEMENT};

#[derive(Debug, Clone, Copy)]
pub struct RegisteredGraphic {
    number: u32,
    kind: CodesetType,
}

impl RegisteredGraphic {
    /// Returns `None` unless `kind` is a graphic set type
    pub fn new(number: u32, kind: CodesetType) -> Option<Self> {
        kind.is_graphic().then_some(Self { number, kind })
    }
}

impl CodesetIdentity for RegisteredGraphic {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        self.kind
    }
}

impl GraphicCodeset for RegisteredGraphic {
    fn decode(&self, _byte: u8, out: &mut String) {
        out.push(REPLACEMENT);
    }

    fn encode(&self, _sequence: &[char], _base: u8) -> Option<Vec<u8>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_is_replaced() {
        let set = RegisteredGraphic::new(87, CodesetType::Multibyte).unwrap();
        let mut out = String::new();
        set.decode(0x30, &mut out);
        set.decode(0x21, &mut out);
        assert_eq!(out, "\u{fffd}\u{fffd}");
        assert_eq!(set.encode(&['A'], 0), None);
    }

    #[test]
    fn test_rejects_non_graphic_kind() {
        assert!(RegisteredGraphic::new(1, CodesetType::C0).is_none());
        assert!(RegisteredGraphic::new(2, CodesetType::G94).is_some());
    }
}
