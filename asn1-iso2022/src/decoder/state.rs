//! Decoder parse state
//!
//! # State Diagram
//!
//! ```text
//! NORMAL --SS2/SS3--> SINGLE_SHIFT --one byte--> NORMAL
//! NORMAL --ESC--> ESCAPE
//! ESCAPE --2/0--> ANNOUNCE --F--> NORMAL
//! ESCAPE --2/1, 2/2--> CONTROL_DESIGNATE --F--> NORMAL
//! ESCAPE --2/3--> SINGLE_CONTROL --any--> NORMAL (held)
//! ESCAPE --2/4--> MULTIBYTE --I--> MULTIBYTE_DESIGNATE --F--> NORMAL
//!                           --F (old form)--> NORMAL
//! ESCAPE --2/5--> OTHER_CODING_SYSTEM --2/15--> OTHER_CODING_SYSTEM_NO_RETURN
//! OTHER_CODING_SYSTEM --F--> DOCS --ESC 2/5 4/0--> NORMAL
//! OTHER_CODING_SYSTEM_NO_RETURN --F--> DOCS (until reset)
//! ESCAPE --2/6--> REVISED_REGISTRATION --F--> NORMAL
//! ESCAPE --2/8..2/11, 2/13..2/15--> DESIGNATE --2/1--> DESIGNATE_EXTENDED
//! DESIGNATE, MULTIBYTE_DESIGNATE --2/0--> DRCS --2/0..2/15 (up to 7)--> DRCS
//! ```
//!
//! Every state other than NORMAL knows the bytes consumed since ESC, so a
//! rejected sequence can be reproduced literally.

use asn1_core::{CodeElement, CodesetType, ControlElement, SingleShiftArea};

use crate::tables::intermediate;

/// Number of intermediate digits a DRCS designation may carry
pub(crate) const DRCS_MAX_DIGITS: u8 = 7;

/// Size of the graphic set named by a designation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetSize {
    Chars94,
    Chars96,
}

impl SetSize {
    /// The designating intermediate byte for an element
    pub(crate) fn intermediate(self, element: CodeElement) -> u8 {
        let base = match self {
            SetSize::Chars94 => intermediate::DESIGNATE_94,
            SetSize::Chars96 => intermediate::DESIGNATE_96,
        };
        // Elements are 0-3
        base + element.index() as u8
    }

    /// The type a single-byte set of this size has
    pub(crate) fn codeset_type(self) -> CodesetType {
        match self {
            SetSize::Chars94 => CodesetType::G94,
            SetSize::Chars96 => CodesetType::G96,
        }
    }
}

/// Whether a coding system returns to ISO 2022 with `ESC 2/5 4/0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Standard,
    NoReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Normal,
    /// The next byte is taken from G2 or G3; `saved` is the element the
    /// shifted pointer goes back to
    SingleShift {
        area: SingleShiftArea,
        saved: CodeElement,
    },
    Escape,
    Announce,
    ControlDesignate(ControlElement),
    SingleControl,
    Multibyte,
    MultibyteDesignate {
        element: CodeElement,
        size: SetSize,
    },
    OtherCodingSystem,
    OtherCodingSystemNoReturn,
    /// Bytes belong to another coding system until it returns
    Docs(ReturnKind),
    RevisedRegistration,
    Designate {
        element: CodeElement,
        size: SetSize,
    },
    DesignateExtended {
        element: CodeElement,
    },
    /// Dynamically redefinable set; `id` holds one nibble per digit
    Drcs {
        multibyte: bool,
        element: CodeElement,
        size: SetSize,
        digits: u8,
        id: u32,
    },
}

impl ParseState {
    /// Bytes consumed after ESC to reach this state
    pub fn prefix(&self) -> Vec<u8> {
        match *self {
            ParseState::Normal
            | ParseState::SingleShift { .. }
            | ParseState::Docs(_)
            | ParseState::Escape => Vec::new(),
            ParseState::Announce => vec![intermediate::ANNOUNCE],
            ParseState::ControlDesignate(ControlElement::C0) => vec![intermediate::C0_DESIGNATE],
            ParseState::ControlDesignate(ControlElement::C1) => vec![intermediate::C1_DESIGNATE],
            ParseState::SingleControl => vec![intermediate::SINGLE_CONTROL],
            ParseState::Multibyte => vec![intermediate::MULTIBYTE],
            ParseState::MultibyteDesignate { element, size } => {
                vec![intermediate::MULTIBYTE, size.intermediate(element)]
            }
            ParseState::OtherCodingSystem => vec![intermediate::OTHER_CODING_SYSTEM],
            ParseState::OtherCodingSystemNoReturn => {
                vec![intermediate::OTHER_CODING_SYSTEM, intermediate::NO_RETURN]
            }
            ParseState::RevisedRegistration => vec![intermediate::REVISED_REGISTRATION],
            ParseState::Designate { element, size } => vec![size.intermediate(element)],
            ParseState::DesignateExtended { element } => {
                vec![SetSize::Chars94.intermediate(element), intermediate::EXTENDED]
            }
            ParseState::Drcs {
                multibyte,
                element,
                size,
                digits,
                id,
            } => {
                let mut bytes = Vec::with_capacity(usize::from(digits) + 3);
                if multibyte {
                    bytes.push(intermediate::MULTIBYTE);
                }
                bytes.push(size.intermediate(element));
                bytes.push(intermediate::ANNOUNCE);
                for shift in (0..u32::from(digits)).rev() {
                    // Digits are 2/0-2/15, so the nibble restores the byte
                    bytes.push(0x20 | ((id >> (4 * shift)) & 0x0f) as u8);
                }
                bytes
            }
        }
    }
}

/// Outcome of feeding one byte to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The byte was used
    Consume,
    /// The byte must be examined again in the (now NORMAL) state
    Hold,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_prefixes() {
        assert!(ParseState::Escape.prefix().is_empty());
        assert_eq!(ParseState::Multibyte.prefix(), b"$".to_vec());
        assert_eq!(ParseState::OtherCodingSystemNoReturn.prefix(), b"%/".to_vec());
        assert_eq!(
            ParseState::Designate {
                element: CodeElement::G1,
                size: SetSize::Chars96
            }
            .prefix(),
            b"-".to_vec()
        );
        assert_eq!(
            ParseState::DesignateExtended {
                element: CodeElement::G2
            }
            .prefix(),
            b"*!".to_vec()
        );
        assert_eq!(
            ParseState::MultibyteDesignate {
                element: CodeElement::G0,
                size: SetSize::Chars94
            }
            .prefix(),
            b"$(".to_vec()
        );
    }

    #[test]
    fn test_drcs_prefix_restores_digits() {
        let state = ParseState::Drcs {
            multibyte: true,
            element: CodeElement::G3,
            size: SetSize::Chars94,
            digits: 3,
            id: 0x1a5,
        };
        assert_eq!(state.prefix(), b"$+ !*%".to_vec());
    }
}
