//! Control sets: ISO 646 C0, ISO 6429 C1, and sets with no usable mapping

use asn1_core::{CodesetType, ControlElement};

use crate::codeset::{registry, CodesetIdentity, ControlCodeset};

/// Standard control set: every byte in the element's range is its own function
#[derive(Debug, Clone, Copy)]
pub struct StandardControl {
    element: ControlElement,
}

impl StandardControl {
    /// ISO IR 1
    pub fn c0() -> Self {
        Self {
            element: ControlElement::C0,
        }
    }

    /// ISO IR 77
    pub fn c1() -> Self {
        Self {
            element: ControlElement::C1,
        }
    }

    fn in_range(&self, byte: u8) -> bool {
        match self.element {
            ControlElement::C0 => byte < 0x20,
            ControlElement::C1 => (0x80..=0x9f).contains(&byte),
        }
    }
}

impl CodesetIdentity for StandardControl {
    fn registration_number(&self) -> u32 {
        match self.element {
            ControlElement::C0 => registry::STANDARD_C0,
            ControlElement::C1 => registry::STANDARD_C1,
        }
    }

    fn codeset_type(&self) -> CodesetType {
        self.element.codeset_type()
    }
}

impl ControlCodeset for StandardControl {
    fn decode(&self, byte: u8) -> Option<u8> {
        self.in_range(byte).then_some(byte)
    }

    fn encode(&self, function: u8) -> Option<u8> {
        self.in_range(function).then_some(function)
    }
}

/// A registered control set whose functions have no equivalent here
///
/// Used for the videotex attribute set (ISO IR 73) and for every other
/// registered C0/C1 set; designating one disables the element's controls.
#[derive(Debug, Clone, Copy)]
pub struct OpaqueControl {
    number: u32,
    element: ControlElement,
}

impl OpaqueControl {
    pub fn new(number: u32, element: ControlElement) -> Self {
        Self { number, element }
    }

    /// ISO IR 73
    pub fn videotex_attributes() -> Self {
        Self::new(registry::VIDEOTEX_ATTRIBUTES, ControlElement::C1)
    }
}

impl CodesetIdentity for OpaqueControl {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        self.element.codeset_type()
    }
}

impl ControlCodeset for OpaqueControl {
    fn decode(&self, _byte: u8) -> Option<u8> {
        None
    }

    fn encode(&self, _function: u8) -> Option<u8> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_c0() {
        let c0 = StandardControl::c0();
        assert_eq!(c0.decode(0x0d), Some(0x0d));
        assert_eq!(c0.decode(0x85), None);
        assert_eq!(c0.encode(0x0e), Some(0x0e));
        assert_eq!(c0.encode(0x8e), None);
        assert_eq!(c0.registration_number(), 1);
    }

    #[test]
    fn test_standard_c1() {
        let c1 = StandardControl::c1();
        assert_eq!(c1.decode(0x8e), Some(0x8e));
        assert_eq!(c1.decode(0x0e), None);
        assert_eq!(c1.codeset_type(), CodesetType::C1);
        assert_eq!(c1.registration_number(), 77);
    }

    #[test]
    fn test_videotex_attributes_map_nothing() {
        let attributes = OpaqueControl::videotex_attributes();
        assert_eq!(attributes.codeset_type(), CodesetType::C1);
        assert!((0x80..=0x9f).all(|b| attributes.decode(b).is_none()));
        assert_eq!(attributes.encode(0x8e), None);
    }
}
