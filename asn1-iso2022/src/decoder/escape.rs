//! Escape sequence grammar
//!
//! Each handler receives the state the byte arrived in, with the decoder
//! already back in NORMAL. A handler either moves to a new state, finishes
//! the sequence, or rejects it: the escape symbol and the bytes consumed so
//! far are written out and the current byte is held for NORMAL.

use asn1_core::{Bits, CodeElement, CodesetType, ControlElement, SingleShiftArea};

use super::state::{ParseState, ReturnKind, SetSize, Step, DRCS_MAX_DIGITS};
use super::Decoder;
use crate::codeset::{Codeset, CODESET_DRCS, ESCAPE_SYMBOL, REPLACEMENT};
use crate::tables::{
    self, intermediate, locking_shift, C0_SETS, C1_SETS, DOCS_WITHOUT_RETURN, DOCS_WITH_RETURN,
    G94_SETS, G94_SETS_EXTENDED, G96_SETS, MULTIBYTE_SETS,
};

/// Facilities selected by `ESC 2/0 F`, numbered `F - 4/0`
const ACS_SEVEN_BIT: u8 = 10;
const ACS_EIGHT_BIT: u8 = 11;
const ACS_SINGLE_SHIFT_GR: u8 = 28;

/// Element addressed by an intermediate byte, counted from its 94/96 base
fn element_at(offset: u8) -> CodeElement {
    CodeElement::from_index(usize::from(offset)).unwrap_or(CodeElement::G3)
}

/// Private use character standing for an escape sequence with no equivalent
fn private_use(byte: u8) -> char {
    char::from_u32(0xe000 + u32::from(byte)).unwrap_or(REPLACEMENT)
}

impl Decoder {
    pub(super) fn escape(&mut self, state: ParseState, byte: u8, out: &mut String) -> Step {
        match state {
            ParseState::Escape => self.introducer(byte, out),
            ParseState::Announce => self.announce(byte, out),
            ParseState::ControlDesignate(element) => self.designate_control(element, byte, out),
            ParseState::SingleControl => self.reject(state, out),
            ParseState::Multibyte => self.multibyte(byte, out),
            ParseState::MultibyteDesignate { element, size } => match byte {
                intermediate::ANNOUNCE => self.enter(ParseState::Drcs {
                    multibyte: true,
                    element,
                    size,
                    digits: 0,
                    id: 0,
                }),
                _ if tables::is_final(byte) => {
                    let number = tables::lookup(&MULTIBYTE_SETS, byte);
                    self.designate_graphic(state, element, number, CodesetType::Multibyte, out)
                }
                _ => self.reject(state, out),
            },
            // 2/15 is the only intermediate registered after 2/5; `ESC 2/5 I F`
            // with any other I is rejected like an unknown sequence
            ParseState::OtherCodingSystem => match byte {
                intermediate::NO_RETURN => self.enter(ParseState::OtherCodingSystemNoReturn),
                _ if tables::is_final(byte) => {
                    let number = tables::lookup(&DOCS_WITH_RETURN, byte);
                    self.designate_docs(state, number, ReturnKind::Standard, out)
                }
                _ => self.reject(state, out),
            },
            ParseState::OtherCodingSystemNoReturn => {
                if tables::is_final(byte) {
                    let number = tables::lookup(&DOCS_WITHOUT_RETURN, byte);
                    self.designate_docs(state, number, ReturnKind::NoReturn, out)
                } else {
                    self.reject(state, out)
                }
            }
            // Identify revised registration: the revision is not tracked
            ParseState::RevisedRegistration => {
                if tables::is_final(byte) {
                    Step::Consume
                } else {
                    self.reject(state, out)
                }
            }
            ParseState::Designate { element, size } => match byte {
                intermediate::ANNOUNCE => self.enter(ParseState::Drcs {
                    multibyte: false,
                    element,
                    size,
                    digits: 0,
                    id: 0,
                }),
                intermediate::EXTENDED if size == SetSize::Chars94 => {
                    self.enter(ParseState::DesignateExtended { element })
                }
                _ if tables::is_final(byte) => {
                    let table = match size {
                        SetSize::Chars94 => &G94_SETS,
                        SetSize::Chars96 => &G96_SETS,
                    };
                    let number = tables::lookup(table, byte);
                    self.designate_graphic(state, element, number, size.codeset_type(), out)
                }
                _ => self.reject(state, out),
            },
            ParseState::DesignateExtended { element } => {
                if tables::is_final(byte) {
                    let number = tables::lookup(&G94_SETS_EXTENDED, byte);
                    self.designate_graphic(state, element, number, CodesetType::G94, out)
                } else {
                    self.reject(state, out)
                }
            }
            ParseState::Drcs {
                multibyte,
                element,
                size,
                digits,
                id,
            } => match byte {
                0x20..=0x2f if digits < DRCS_MAX_DIGITS => self.enter(ParseState::Drcs {
                    multibyte,
                    element,
                    size,
                    digits: digits + 1,
                    id: (id << 4) | u32::from(byte & 0x0f),
                }),
                _ if tables::is_final(byte) => {
                    let expected = if multibyte {
                        CodesetType::Multibyte
                    } else {
                        size.codeset_type()
                    };
                    self.designate_graphic(state, element, Some(id | CODESET_DRCS), expected, out)
                }
                _ => self.reject(state, out),
            },
            // Not escape states
            ParseState::Normal | ParseState::SingleShift { .. } | ParseState::Docs(_) => Step::Hold,
        }
    }

    /// The byte after ESC
    fn introducer(&mut self, byte: u8, out: &mut String) -> Step {
        match byte {
            intermediate::ANNOUNCE => self.enter(ParseState::Announce),
            intermediate::C0_DESIGNATE => self.enter(ParseState::ControlDesignate(ControlElement::C0)),
            intermediate::C1_DESIGNATE => self.enter(ParseState::ControlDesignate(ControlElement::C1)),
            intermediate::SINGLE_CONTROL => self.enter(ParseState::SingleControl),
            intermediate::MULTIBYTE => self.enter(ParseState::Multibyte),
            intermediate::OTHER_CODING_SYSTEM => self.enter(ParseState::OtherCodingSystem),
            intermediate::REVISED_REGISTRATION => self.enter(ParseState::RevisedRegistration),
            0x28..=0x2b => self.enter(ParseState::Designate {
                element: element_at(byte - intermediate::DESIGNATE_94),
                size: SetSize::Chars94,
            }),
            0x2d..=0x2f => self.enter(ParseState::Designate {
                element: element_at(byte - intermediate::DESIGNATE_96),
                size: SetSize::Chars96,
            }),
            // Fp: private control functions
            0x30..=0x3f => {
                out.push(private_use(byte));
                Step::Consume
            }
            // Fe: C1 control in its 7-bit form
            0x40..=0x5f => {
                self.control(byte + 0x40, out);
                Step::Consume
            }
            0x60..=0x7e => self.independent_function(byte, out),
            // 2/7 and 2/12 are reserved; controls, DEL and 8-bit bytes end the sequence
            _ => self.reject(ParseState::Escape, out),
        }
    }

    /// Fs: independent control functions
    fn independent_function(&mut self, byte: u8, out: &mut String) -> Step {
        match byte {
            0x60..=0x64 => out.push(private_use(byte)),
            locking_shift::LS2 => self.bindings.gl = CodeElement::G2,
            locking_shift::LS3 => self.bindings.gl = CodeElement::G3,
            locking_shift::LS1R | locking_shift::LS2R | locking_shift::LS3R => {
                let element = match byte {
                    locking_shift::LS1R => CodeElement::G1,
                    locking_shift::LS2R => CodeElement::G2,
                    _ => CodeElement::G3,
                };
                match self.bits {
                    Bits::Eight => self.bindings.gr = element,
                    Bits::Seven => self.bindings.gl = element,
                }
            }
            _ => return self.reject(ParseState::Escape, out),
        }
        Step::Consume
    }

    /// `ESC 2/0 F`: announce code structure
    fn announce(&mut self, byte: u8, out: &mut String) -> Step {
        if !(0x41..=0x7e).contains(&byte) {
            return self.reject(ParseState::Announce, out);
        }

        match byte - 0x40 {
            ACS_SEVEN_BIT => self.bits = Bits::Seven,
            ACS_EIGHT_BIT => self.bits = Bits::Eight,
            ACS_SINGLE_SHIFT_GR => self.single_shift_area = SingleShiftArea::Gr,
            facility => log::debug!("Ignoring announced facility {}", facility),
        }
        Step::Consume
    }

    /// `ESC 2/4 ...`: multiple-byte designations
    fn multibyte(&mut self, byte: u8, out: &mut String) -> Step {
        match byte {
            // Old form, G0 only: ESC 2/4 4/0, 4/1 and 4/2
            0x40..=0x42 => {
                let number = tables::lookup(&MULTIBYTE_SETS, byte);
                self.designate_graphic(ParseState::Multibyte, CodeElement::G0, number, CodesetType::Multibyte, out)
            }
            0x28..=0x2b => self.enter(ParseState::MultibyteDesignate {
                element: element_at(byte - intermediate::DESIGNATE_94),
                size: SetSize::Chars94,
            }),
            0x2d..=0x2f => self.enter(ParseState::MultibyteDesignate {
                element: element_at(byte - intermediate::DESIGNATE_96),
                size: SetSize::Chars96,
            }),
            _ => self.reject(ParseState::Multibyte, out),
        }
    }

    fn designate_control(&mut self, element: ControlElement, byte: u8, out: &mut String) -> Step {
        let state = ParseState::ControlDesignate(element);
        let table = match element {
            ControlElement::C0 => &C0_SETS,
            ControlElement::C1 => &C1_SETS,
        };

        let resolved = tables::lookup(table, byte)
            .and_then(|number| self.resolve(number, element.codeset_type()))
            .and_then(Codeset::into_control);

        match resolved {
            Some(codeset) => {
                log::debug!("Designated ISO IR {} into {}", codeset.registration_number(), element);
                self.bindings.designate_control(element, codeset);
                Step::Consume
            }
            None => self.reject(state, out),
        }
    }

    fn designate_graphic(
        &mut self,
        state: ParseState,
        element: CodeElement,
        number: Option<u32>,
        expected: CodesetType,
        out: &mut String,
    ) -> Step {
        let resolved = number
            .and_then(|number| self.resolve(number, expected))
            .and_then(Codeset::into_graphic);

        match resolved {
            Some(codeset) => {
                log::debug!("Designated ISO IR {} into {}", codeset.registration_number(), element);
                self.bindings.designate(element, codeset);
                Step::Consume
            }
            None => self.reject(state, out),
        }
    }

    fn designate_docs(
        &mut self,
        state: ParseState,
        number: Option<u32>,
        kind: ReturnKind,
        out: &mut String,
    ) -> Step {
        let Some(number) = number else {
            return self.reject(state, out);
        };

        let expected = match kind {
            ReturnKind::Standard => CodesetType::DocsWithReturn,
            ReturnKind::NoReturn => CodesetType::DocsWithoutReturn,
        };
        match self.factory.get_codeset(number) {
            Some(codeset) if codeset.codeset_type() == expected => match codeset.into_docs() {
                Some(docs) => {
                    log::debug!("Switching to coding system ISO IR {}", number);
                    self.docs = Some(docs);
                    self.enter(ParseState::Docs(kind))
                }
                None => self.reject(state, out),
            },
            Some(codeset) => {
                log::debug!(
                    "Ignoring designation of {} code set ISO IR {} as {}",
                    codeset.codeset_type(),
                    number,
                    expected
                );
                self.reject(state, out)
            }
            None => {
                log::debug!("Coding system ISO IR {} is not available, replacing its data", number);
                self.docs = None;
                self.enter(ParseState::Docs(kind))
            }
        }
    }

    fn resolve(&self, number: u32, expected: CodesetType) -> Option<Codeset> {
        match self.factory.get_codeset(number) {
            Some(codeset) if codeset.codeset_type() == expected => Some(codeset),
            Some(codeset) => {
                log::debug!(
                    "Ignoring designation of {} code set ISO IR {} as {}",
                    codeset.codeset_type(),
                    number,
                    expected
                );
                None
            }
            None => {
                log::debug!("Ignoring designation of unknown code set ISO IR {}", number);
                None
            }
        }
    }

    fn enter(&mut self, state: ParseState) -> Step {
        self.state = state;
        Step::Consume
    }

    /// Write out an abandoned sequence and hold the current byte
    fn reject(&mut self, state: ParseState, out: &mut String) -> Step {
        let prefix = state.prefix();
        log::debug!("Rejected escape sequence ESC {:02X?}", prefix);

        out.push(ESCAPE_SYMBOL);
        out.extend(prefix.iter().map(|&b| char::from(b)));
        self.state = ParseState::Normal;
        Step::Hold
    }
}
