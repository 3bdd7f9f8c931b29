//! ISO/IEC 2022 decoder
//!
//! Turns a byte stream in an ISO 2022 code structure into Unicode text. The
//! decoder keeps the designations and invocations made by the stream, any
//! escape sequence left unfinished at the end of a buffer, and a coding
//! system selected with `ESC 2/5 F` (with the bytes of a character it has
//! only partly seen) from one [`Decoder::decode`] call to the next, until
//! [`Decoder::reset`].
//!
//! # Malformed input
//!
//! Nothing in the input is dropped without a trace:
//! - an abandoned escape sequence is written as U+241B followed by the bytes
//!   consumed after ESC, and the byte that ended it is decoded on its own
//! - a byte with no mapping in the invoked set becomes U+FFFD
//! - a control character that is not allowed becomes its control picture
//!   (U+2400 + byte) in C0, or U+FFFD in C1
//!
//! # Usage Example
//!
//! ```rust
//! use asn1_iso2022::{BuiltinFactory, Decoder, Iso2022Config};
//!
//! let mut decoder = Decoder::new(BuiltinFactory::shared(), &Iso2022Config::default())?;
//! // Designate ISO 8859-1 into G1, which is invoked into GR
//! assert_eq!(decoder.decode(b"\x1b-A\xa1"), "\u{a1}");
//! # Ok::<(), asn1_iso2022::Asn1Error>(())
//! ```

mod escape;
mod state;

use std::sync::Arc;

use asn1_core::{Asn1Result, Bits, CodeElement, CodesetType, ControlElement, Flags, SingleShiftArea};

use crate::bindings::Bindings;
use crate::codeset::{DocsCodeset, DocsProgress, ESCAPE_SYMBOL, REPLACEMENT};
use crate::config::Iso2022Config;
use crate::factory::CodesetFactory;
use crate::tables::{intermediate, ESC, LS0, LS1, SS2, SS3};

pub use state::{ParseState, ReturnKind, SetSize, Step};

/// Standard return from a coding system with standard return
const STANDARD_RETURN: [u8; 3] = [ESC, intermediate::OTHER_CODING_SYSTEM, 0x40];

pub struct Decoder {
    factory: Arc<dyn CodesetFactory>,
    bindings: Bindings,
    bits: Bits,
    single_shift_area: SingleShiftArea,
    flags: Flags,
    initial_bits: Bits,
    initial_single_shift_area: SingleShiftArea,
    state: ParseState,
    /// Coding system in use while in `ParseState::Docs`; `None` replaces
    /// the data of an unavailable one
    docs: Option<Arc<dyn DocsCodeset>>,
    /// Tail of the last chunk the coding system could not use yet
    pending: Vec<u8>,
}

impl Decoder {
    /// Create a decoder in the initial state described by `config`
    ///
    /// # Errors
    /// - `Asn1Error::UnknownCodeset` if the factory does not know a
    ///   configured registration number
    /// - `Asn1Error::CodesetMismatch` if a number resolves to a set that
    ///   cannot go into its slot
    /// - `Asn1Error::Config` for an inconsistent configuration
    pub fn new(factory: Arc<dyn CodesetFactory>, config: &Iso2022Config) -> Asn1Result<Self> {
        config.validate()?;
        let bindings = Bindings::new(factory.as_ref(), config)?;

        Ok(Self {
            factory,
            bindings,
            bits: config.bits,
            single_shift_area: config.single_shift_area,
            flags: config.flags,
            initial_bits: config.bits,
            initial_single_shift_area: config.single_shift_area,
            state: ParseState::Normal,
            docs: None,
            pending: Vec::new(),
        })
    }

    /// Decode one buffer
    pub fn decode(&mut self, input: &[u8]) -> String {
        let mut out = String::with_capacity(input.len());
        let mut pos = 0;

        while pos < input.len() {
            if let ParseState::Docs(kind) = self.state {
                pos += self.other_coding_system(kind, &input[pos..], &mut out);
                continue;
            }
            match self.step(input[pos], &mut out) {
                Step::Consume => pos += 1,
                Step::Hold => {}
            }
        }

        self.finish(&mut out);
        out
    }

    /// Decode one buffer into UTF-16 code units
    pub fn decode_utf16(&mut self, input: &[u8]) -> Vec<u16> {
        self.decode(input).encode_utf16().collect()
    }

    /// Return to the state the decoder was constructed in
    pub fn reset(&mut self) {
        self.bindings.reset();
        self.bits = self.initial_bits;
        self.single_shift_area = self.initial_single_shift_area;
        self.state = ParseState::Normal;
        self.docs = None;
        self.pending.clear();
    }

    /// Feed one byte to the state machine
    pub fn step(&mut self, byte: u8, out: &mut String) -> Step {
        match self.state {
            ParseState::Normal => {
                self.normal(byte, out);
                Step::Consume
            }
            ParseState::SingleShift { area, saved } => self.single_shifted(area, saved, byte, out),
            ParseState::Docs(kind) => {
                if self.other_coding_system(kind, &[byte], out) == 0 {
                    Step::Hold
                } else {
                    Step::Consume
                }
            }
            state => {
                self.state = ParseState::Normal;
                self.escape(state, byte, out)
            }
        }
    }

    pub fn bits(&self) -> Bits {
        self.bits
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Elements currently invoked into GL and GR
    pub fn invoked(&self) -> (CodeElement, CodeElement) {
        (self.bindings.gl, self.bindings.gr)
    }

    /// Registration number of the set designated into a graphic element
    pub fn designated(&self, element: CodeElement) -> Option<u32> {
        self.bindings.graphic_number(element)
    }

    /// Registration number of the set designated into a control element
    pub fn designated_control(&self, element: ControlElement) -> Option<u32> {
        self.bindings.control_number(element)
    }

    fn normal(&mut self, byte: u8, out: &mut String) {
        match byte {
            ESC => {
                if self.flags.contains(Flags::ALLOW_ESCAPES) {
                    self.finish(out);
                    self.state = ParseState::Escape;
                } else {
                    out.push(ESCAPE_SYMBOL);
                }
            }
            0x80..=0xff if self.bits == Bits::Seven => out.push(REPLACEMENT),
            0x00..=0x1f | 0x80..=0x9f => self.control(byte, out),
            0x20..=0x7f => match self.bindings.graphic(self.bindings.gl) {
                Some(set) if set.codeset_type() == CodesetType::G94 && (byte == 0x20 || byte == 0x7f) => {
                    out.push(char::from(byte))
                }
                Some(set) => set.decode(byte, out),
                None => out.push(REPLACEMENT),
            },
            _ => match self.bindings.graphic(self.bindings.gr) {
                Some(set) => set.decode(byte - 0x80, out),
                None => out.push(REPLACEMENT),
            },
        }
    }

    /// A C0 byte, a C1 byte, or the C1 function of `ESC Fe`
    fn control(&mut self, byte: u8, out: &mut String) {
        let element = if byte < 0x80 {
            ControlElement::C0
        } else {
            ControlElement::C1
        };

        let function = if self.flags.contains(Flags::ALLOW_CONTROL_CHARS) {
            self.bindings.control(element).and_then(|set| set.decode(byte))
        } else if self.flags.contains(Flags::ALLOW_SHIFT_CHARS) && matches!(byte, LS0 | LS1 | SS2 | SS3) {
            Some(byte)
        } else {
            None
        };

        match (function, element) {
            (Some(function), _) => self.apply_control(function, out),
            (None, ControlElement::C0) => {
                out.push(char::from_u32(0x2400 + u32::from(byte)).unwrap_or(REPLACEMENT))
            }
            (None, ControlElement::C1) => out.push(REPLACEMENT),
        }
    }

    fn apply_control(&mut self, function: u8, out: &mut String) {
        match function {
            LS0 => self.lock_left(CodeElement::G0, out),
            LS1 => self.lock_left(CodeElement::G1, out),
            SS2 => self.single_shift(CodeElement::G2, out),
            SS3 => self.single_shift(CodeElement::G3, out),
            _ => out.push(char::from(function)),
        }
    }

    fn lock_left(&mut self, element: CodeElement, out: &mut String) {
        self.finish_element(self.bindings.gl, out);
        self.bindings.gl = element;
    }

    fn single_shift(&mut self, element: CodeElement, out: &mut String) {
        let area = self.single_shift_area.resolve(self.bits);
        let pointer = match area {
            SingleShiftArea::Gl => &mut self.bindings.gl,
            _ => &mut self.bindings.gr,
        };
        let saved = std::mem::replace(pointer, element);

        self.finish_element(saved, out);
        self.state = ParseState::SingleShift { area, saved };
    }

    fn single_shifted(&mut self, area: SingleShiftArea, saved: CodeElement, byte: u8, out: &mut String) -> Step {
        let in_area = match area {
            SingleShiftArea::Gl => (0x20..=0x7f).contains(&byte),
            _ => byte >= 0xa0,
        };

        self.state = ParseState::Normal;
        if !in_area {
            out.push(REPLACEMENT);
            self.unshift(area, saved, out);
            return Step::Hold;
        }

        self.normal(byte, out);
        self.unshift(area, saved, out);
        Step::Consume
    }

    fn unshift(&mut self, area: SingleShiftArea, saved: CodeElement, out: &mut String) {
        let pointer = match area {
            SingleShiftArea::Gl => &mut self.bindings.gl,
            _ => &mut self.bindings.gr,
        };
        let shifted = std::mem::replace(pointer, saved);
        // A single shift covers one byte
        self.finish_element(shifted, out);
    }

    /// Flush the sets invoked into GL and GR
    fn finish(&self, out: &mut String) {
        self.finish_element(self.bindings.gl, out);
        if self.bindings.gr != self.bindings.gl {
            self.finish_element(self.bindings.gr, out);
        }
    }

    fn finish_element(&self, element: CodeElement, out: &mut String) {
        if let Some(set) = self.bindings.graphic(element) {
            set.finish(out);
        }
    }

    /// Feed a chunk to the active coding system, returning how much of
    /// `input` it used
    ///
    /// Bytes left over from the previous chunk go in front of `input`. On
    /// the standard return the decoder is back in NORMAL and the rest of
    /// `input` is left for it.
    fn other_coding_system(&mut self, kind: ReturnKind, input: &[u8], out: &mut String) -> usize {
        let carried = self.pending.len();
        let mut chunk = std::mem::take(&mut self.pending);
        chunk.extend_from_slice(input);

        let progress = match &self.docs {
            Some(docs) => docs.decode(&chunk, out),
            None => skip_foreign(&chunk, kind, out),
        };

        if progress.returned {
            log::debug!("Returned from other coding system");
            self.docs = None;
            self.state = ParseState::Normal;
            progress.consumed.saturating_sub(carried)
        } else {
            self.pending = chunk.get(progress.consumed..).map(<[u8]>::to_vec).unwrap_or_default();
            input.len()
        }
    }
}

/// Replace the data of an unavailable coding system
///
/// Each byte becomes U+FFFD. With standard return the data ends at
/// `ESC 2/5 4/0`, which is consumed silently, and a chunk ending in part of
/// it leaves that part for the next chunk.
fn skip_foreign(input: &[u8], kind: ReturnKind, out: &mut String) -> DocsProgress {
    for pos in 0..input.len() {
        if kind == ReturnKind::Standard {
            let rest = &input[pos..];
            if rest.starts_with(&STANDARD_RETURN) {
                return DocsProgress::returned(pos + STANDARD_RETURN.len());
            }
            if STANDARD_RETURN.starts_with(rest) {
                return DocsProgress::pending(pos);
            }
        }
        out.push(REPLACEMENT);
    }
    DocsProgress::pending(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeset::Codeset;
    use crate::codesets::{Ascii, StandardControl};
    use crate::factory::{BuiltinFactory, MockCodesetFactory};
    use crate::tables::{C0_SETS, C1_SETS, EscapeTable, G94_SETS, G96_SETS};
    use mockall::predicate::eq;

    fn decoder(config: Iso2022Config) -> Decoder {
        Decoder::new(BuiltinFactory::shared(), &config).unwrap()
    }

    fn default_decoder() -> Decoder {
        decoder(Iso2022Config::default())
    }

    #[test]
    fn test_decode_ascii() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"A"), "A");
        assert_eq!(dec.decode(b"Hello, world!"), "Hello, world!");
        assert_eq!(dec.decode_utf16(b"A"), vec![0x41]);
    }

    #[test]
    fn test_designate_latin1_into_g1() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b\x2d\x41\xa1"), "\u{a1}");
        assert_eq!(dec.designated(CodeElement::G1), Some(100));
        // The designation persists across calls
        assert_eq!(dec.decode(b"\xe9"), "\u{e9}");
    }

    #[test]
    fn test_reserved_intermediate_is_held() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b\x27"), "\u{241b}'");
        assert_eq!(dec.decode(b"\x1b,A"), "\u{241b},A");
        assert_eq!(dec.state(), ParseState::Normal);
    }

    #[test]
    fn test_escape_ended_by_control() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b\x1b(B"), "\u{241b}");
        assert_eq!(dec.designated(CodeElement::G0), Some(6));
    }

    #[test]
    fn test_unregistered_final() {
        let mut dec = default_decoder();
        // 7/14 has no 94-set registered
        assert_eq!(dec.decode(b"\x1b(~x"), "\u{241b}(~x");
        assert_eq!(dec.designated(CodeElement::G0), Some(6));
    }

    #[test]
    fn test_escapes_disallowed() {
        let mut dec = decoder(Iso2022Config::new().with_flags(Flags::ALLOW_CONTROL_CHARS));
        assert_eq!(dec.decode(b"\x1b-A\xa1"), "\u{241b}-A\u{fffd}");
    }

    #[test]
    fn test_control_pictures() {
        let mut dec = decoder(Iso2022Config::new().with_flags(Flags::ALLOW_ESCAPES));
        assert_eq!(dec.decode(b"a\tb\x00"), "a\u{2409}b\u{2400}");
        assert_eq!(dec.decode(b"\x85"), "\u{fffd}");
        // ESC Fe obeys the same rule
        assert_eq!(dec.decode(b"\x1bE"), "\u{fffd}");
    }

    #[test]
    fn test_controls_allowed() {
        let mut dec = decoder(Iso2022Config::new().with_control(ControlElement::C1, 77));
        assert_eq!(dec.decode(b"a\r\n\x85"), "a\r\n\u{85}");
        assert_eq!(dec.decode(b"\x1bE"), "\u{85}");
        // No C1 set bound
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x85"), "\u{fffd}");
    }

    #[test]
    fn test_shift_chars_without_control_chars() {
        let config = Iso2022Config::new()
            .with_graphic(CodeElement::G1, 100)
            .with_flags(Flags::ALLOW_ESCAPES | Flags::ALLOW_SHIFT_CHARS);
        let mut dec = decoder(config);
        assert_eq!(dec.decode(b"\x0e\x21\x0f!\t"), "\u{a1}!\u{2409}");
    }

    #[test]
    fn test_locking_shifts() {
        let mut dec = decoder(Iso2022Config::new().with_graphic(CodeElement::G1, 13));
        assert_eq!(dec.decode(b"A\x0e\x31\x0fB"), "A\u{ff71}B");
        // The shift state persists
        assert_eq!(dec.decode(b"\x0e\x31"), "\u{ff71}");
        assert_eq!(dec.invoked(), (CodeElement::G1, CodeElement::G1));
        assert_eq!(dec.decode(b"\x31"), "\u{ff71}");
    }

    #[test]
    fn test_space_stays_literal_in_94_sets() {
        let mut dec = decoder(
            Iso2022Config::new()
                .with_graphic(CodeElement::G1, 13)
                .with_initial_gl(CodeElement::G1),
        );
        assert_eq!(dec.decode(b"\x31 \x31\x7f"), "\u{ff71} \u{ff71}\u{7f}");
    }

    #[test]
    fn test_single_shift_gr() {
        let config = Iso2022Config::new()
            .with_control(ControlElement::C1, 77)
            .with_graphic(CodeElement::G1, 100)
            .with_graphic(CodeElement::G2, 13);
        let mut dec = decoder(config);
        assert_eq!(dec.decode(b"\x8e\xb1\xa1A"), "\u{ff71}\u{a1}A");
        assert_eq!(dec.invoked(), (CodeElement::G0, CodeElement::G1));
    }

    #[test]
    fn test_single_shift_invalid_byte() {
        let config = Iso2022Config::new()
            .with_control(ControlElement::C1, 77)
            .with_graphic(CodeElement::G1, 100)
            .with_graphic(CodeElement::G2, 13);
        let mut dec = decoder(config);
        // 'A' lies outside GR: it is held and decoded from G0
        assert_eq!(dec.decode(b"\x8eA\xa1"), "\u{fffd}A\u{a1}");
        assert_eq!(dec.state(), ParseState::Normal);
        assert_eq!(dec.invoked(), (CodeElement::G0, CodeElement::G1));
    }

    #[test]
    fn test_single_shift_split_across_calls() {
        let config = Iso2022Config::new()
            .with_control(ControlElement::C1, 77)
            .with_graphic(CodeElement::G3, 13);
        let mut dec = decoder(config);
        assert_eq!(dec.decode(b"\x8f"), "");
        assert!(matches!(dec.state(), ParseState::SingleShift { .. }));
        assert_eq!(dec.decode(b"\xb1"), "\u{ff71}");
    }

    #[test]
    fn test_seven_bit_single_shift_via_escape() {
        let config = Iso2022Config::new()
            .with_bits(Bits::Seven)
            .with_control(ControlElement::C1, 77)
            .with_graphic(CodeElement::G2, 13);
        let mut dec = decoder(config);
        // ESC 4/14 is SS2; in 7-bit mode single shifts act on GL
        assert_eq!(dec.decode(b"\x1bN\x31A"), "\u{ff71}A");
    }

    #[test]
    fn test_seven_bit_high_bytes() {
        let mut dec = decoder(
            Iso2022Config::new()
                .with_bits(Bits::Seven)
                .with_graphic(CodeElement::G1, 100),
        );
        assert_eq!(dec.decode(b"\xa1\x85A"), "\u{fffd}\u{fffd}A");
    }

    #[test]
    fn test_locking_shift_escapes() {
        let config = Iso2022Config::new()
            .with_graphic(CodeElement::G1, 100)
            .with_graphic(CodeElement::G2, 13)
            .with_graphic(CodeElement::G3, 13);
        let mut dec = decoder(config);
        assert_eq!(dec.decode(b"\x1bn\x31"), "\u{ff71}");
        assert_eq!(dec.invoked(), (CodeElement::G2, CodeElement::G1));
        assert_eq!(dec.decode(b"\x1b}\xb1"), "\u{ff71}");
        assert_eq!(dec.invoked(), (CodeElement::G2, CodeElement::G2));
        assert_eq!(dec.decode(b"\x1bo\x1b~\xa1"), "\u{a1}");
        assert_eq!(dec.invoked(), (CodeElement::G3, CodeElement::G1));
    }

    #[test]
    fn test_locking_shift_right_in_seven_bit_mode() {
        let config = Iso2022Config::new()
            .with_bits(Bits::Seven)
            .with_graphic(CodeElement::G1, 100);
        let mut dec = decoder(config);
        assert_eq!(dec.decode(b"\x1b~\x21"), "\u{a1}");
        assert_eq!(dec.invoked().0, CodeElement::G1);
    }

    #[test]
    fn test_unhandled_independent_function() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1bz"), "\u{241b}z");
    }

    #[test]
    fn test_private_functions() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b0\x1ba"), "\u{e030}\u{e061}");
    }

    #[test]
    fn test_single_control_function_is_literal() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b#4"), "\u{241b}#4");
    }

    #[test]
    fn test_announce_code_structure() {
        let mut dec = decoder(Iso2022Config::new().with_graphic(CodeElement::G1, 100));
        assert_eq!(dec.decode(b"\x1b J\xa1"), "\u{fffd}");
        assert_eq!(dec.bits(), Bits::Seven);
        assert_eq!(dec.decode(b"\x1b K\xa1"), "\u{a1}");
        assert_eq!(dec.bits(), Bits::Eight);
        // Facility 4/0 does not exist
        assert_eq!(dec.decode(b"\x1b @"), "\u{241b} @");
        // Other facilities are accepted
        assert_eq!(dec.decode(b"\x1b C"), "");
    }

    #[test]
    fn test_reset_restores_bit_mode() {
        let mut dec = decoder(Iso2022Config::new().with_graphic(CodeElement::G1, 100));
        dec.decode(b"\x1b J");
        dec.reset();
        assert_eq!(dec.bits(), Bits::Eight);
        assert_eq!(dec.decode(b"\xa1"), "\u{a1}");
    }

    #[test]
    fn test_reset_restores_designations() {
        let mut dec = default_decoder();
        let input = b"x\x1b-A\xa1\x0e";
        let first = dec.decode(input);
        dec.decode(b"\x1b(J");
        assert_eq!(dec.designated(CodeElement::G0), Some(14));

        dec.reset();
        assert_eq!(dec.designated(CodeElement::G0), Some(6));
        assert_eq!(dec.designated(CodeElement::G1), None);
        assert_eq!(dec.invoked(), (CodeElement::G0, CodeElement::G1));
        assert_eq!(dec.decode(input), first);
    }

    #[test]
    fn test_reset_clears_pending_escape() {
        let mut dec = default_decoder();
        dec.decode(b"\x1b(");
        dec.reset();
        assert_eq!(dec.decode(b"B"), "B");
    }

    #[test]
    fn test_codesets_shared_with_initial_bindings() {
        let mut dec = default_decoder();
        let ascii = dec.bindings.graphic(CodeElement::G0).unwrap().clone();
        assert_eq!(Arc::strong_count(&ascii), 3);

        dec.decode(b"\x1b(J");
        assert_eq!(Arc::strong_count(&ascii), 2);
        dec.reset();
        assert_eq!(Arc::strong_count(&ascii), 3);
    }

    #[test]
    fn test_split_escape_sequence() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b-"), "");
        assert_eq!(dec.decode(b"A\xa1"), "\u{a1}");
    }

    #[test]
    fn test_split_anywhere_matches_whole() {
        let input: &[u8] = b"A\x1b-A\xa1\x8e\x1b(~\x1b'B\x0e\x0f\tZ\x1b(J\\";
        let whole = default_decoder().decode(input);

        for split in 0..=input.len() {
            let mut dec = default_decoder();
            let mut joined = dec.decode(&input[..split]);
            joined.push_str(&dec.decode(&input[split..]));
            assert_eq!(joined, whole, "split at {}", split);
        }
    }

    #[test]
    fn test_multibyte_designations() {
        let mut dec = default_decoder();
        // Old form into G0
        assert_eq!(dec.decode(b"\x1b$B\x24\x22"), "\u{3042}");
        assert_eq!(dec.designated(CodeElement::G0), Some(168));
        dec.reset();
        // KS C 5601 into G1, invoked into GR
        assert_eq!(dec.decode(b"\x1b$)C\xb0\xa1"), "\u{ac00}");
        assert_eq!(dec.designated(CodeElement::G1), Some(149));
        // G0 takes any final byte in the modern form
        assert_eq!(dec.decode(b"\x1b$(A"), "");
        assert_eq!(dec.designated(CodeElement::G0), Some(58));
    }

    #[test]
    fn test_incomplete_multibyte_character_is_flushed() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b$B\x24"), "\u{fffd}");
        // An escape sequence interrupts the pair as well
        assert_eq!(dec.decode(b"\x24\x1b(BA"), "\u{fffd}A");
    }

    #[test]
    fn test_extended_94_set_designation() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b*!A"), "");
        assert_eq!(dec.designated(CodeElement::G2), Some(151));
        assert_eq!(dec.decode(b"\x1b-!A"), "\u{241b}-!A");
    }

    #[test]
    fn test_revised_registration_is_ignored() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b&@\x1b)d"), "");
        assert_eq!(dec.designated(CodeElement::G1), Some(173));
        assert_eq!(dec.decode(b"\x1b&\x01"), "\u{241b}&\u{1}");
    }

    #[test]
    fn test_control_set_designation() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b\"C\x85"), "\u{85}");
        assert_eq!(dec.designated_control(ControlElement::C1), Some(77));
        assert_eq!(dec.decode(b"\x1b!\x7e"), "\u{241b}!~");
    }

    #[test]
    fn test_escape_table_completeness() {
        let cases: [(&EscapeTable, &[u8], Option<CodeElement>, Option<ControlElement>); 4] = [
            (&G94_SETS, b"\x1b(", Some(CodeElement::G0), None),
            (&G96_SETS, b"\x1b-", Some(CodeElement::G1), None),
            (&C0_SETS, b"\x1b!", None, Some(ControlElement::C0)),
            (&C1_SETS, b"\x1b\"", None, Some(ControlElement::C1)),
        ];

        for (table, intro, graphic, control) in cases {
            for (index, &number) in table.iter().enumerate() {
                if number == 0 {
                    continue;
                }
                let mut dec = default_decoder();
                let mut sequence = intro.to_vec();
                sequence.push(0x40 + index as u8);
                assert_eq!(dec.decode(&sequence), "", "ISO IR {}", number);

                let designated = match (graphic, control) {
                    (Some(element), _) => dec.designated(element),
                    (_, Some(element)) => dec.designated_control(element),
                    _ => None,
                };
                assert_eq!(designated, Some(u32::from(number)));
            }
        }
    }

    #[test]
    fn test_drcs_designation() {
        let mut factory = MockCodesetFactory::new();
        factory
            .expect_get_codeset()
            .with(eq(1))
            .returning(|_| Some(Codeset::control(StandardControl::c0())));
        factory
            .expect_get_codeset()
            .with(eq(6))
            .returning(|_| Some(Codeset::graphic(Ascii::new())));
        factory
            .expect_get_codeset()
            .with(eq(0x8000_0012))
            .times(1)
            .returning(|_| Some(Codeset::graphic(Ascii::new())));

        let mut dec = Decoder::new(Arc::new(factory), &Iso2022Config::default()).unwrap();
        assert_eq!(dec.decode(b"\x1b) !\"@\xc1"), "A");
    }

    #[test]
    fn test_drcs_type_mismatch() {
        let mut factory = MockCodesetFactory::new();
        factory
            .expect_get_codeset()
            .with(eq(1))
            .returning(|_| Some(Codeset::control(StandardControl::c0())));
        factory
            .expect_get_codeset()
            .with(eq(6))
            .returning(|_| Some(Codeset::graphic(Ascii::new())));
        // A 94-set offered for a multiple-byte DRCS
        factory
            .expect_get_codeset()
            .with(eq(0x8000_0000))
            .times(1)
            .returning(|_| Some(Codeset::graphic(Ascii::new())));

        let mut dec = Decoder::new(Arc::new(factory), &Iso2022Config::default()).unwrap();
        assert_eq!(dec.decode(b"\x1b$) @"), "\u{241b}$) @");
    }

    #[test]
    fn test_drcs_digit_cap() {
        let mut dec = default_decoder();
        let output = dec.decode(b"\x1b( !!!!!!!!@");
        assert_eq!(output, "\u{241b}( !!!!!!!!@");
        assert_eq!(dec.designated(CodeElement::G0), Some(6));
    }

    #[test]
    fn test_unknown_drcs() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b( !@"), "\u{241b}( !@");
    }

    #[test]
    fn test_docs_with_standard_return() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"a\x1b%G\xc3\xa9\xe2\x82\xac\x1b%@b"), "a\u{e9}\u{20ac}b");
        assert_eq!(dec.state(), ParseState::Normal);
    }

    #[test]
    fn test_docs_without_return() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b%/@\x00\xe9\x00A"), "\u{e9}A");
        // Still UCS-2 in the next buffer, ESC included
        assert_eq!(dec.decode(b"\x00B\x1b%"), "B\u{1b25}");
        assert_eq!(dec.state(), ParseState::Docs(ReturnKind::NoReturn));

        dec.reset();
        assert_eq!(dec.decode(b"\x1b%/G\xc3\xa9"), "\u{e9}");
    }

    #[test]
    fn test_docs_persists_across_calls() {
        let mut dec = default_decoder();
        assert_eq!(dec.decode(b"\x1b%G\xc3"), "");
        assert_eq!(dec.state(), ParseState::Docs(ReturnKind::Standard));
        assert_eq!(dec.decode(b"\xa9\x1b%@A"), "\u{e9}A");
        assert_eq!(dec.state(), ParseState::Normal);

        // A return split between buffers
        assert_eq!(dec.decode(b"\x1b%Gx\x1b"), "x");
        assert_eq!(dec.decode(b"%"), "");
        assert_eq!(dec.decode(b"@y"), "y");
    }

    #[test]
    fn test_reset_leaves_other_coding_system() {
        let mut dec = default_decoder();
        dec.decode(b"\x1b%G\xe2\x82");
        dec.reset();
        assert_eq!(dec.state(), ParseState::Normal);
        assert_eq!(dec.decode(b"\xacA"), "\u{fffd}A");
    }

    #[test]
    fn test_docs_split_anywhere_matches_whole() {
        let inputs: [&[u8]; 4] = [
            b"\x1b%G\xc3\xa9\x1b%@A",
            b"x\x1b%G\xe2\x82\xac\x1b\x1b%@y",
            b"\x1b%Aab\x1b%@c",
            b"\x1b%/@\x00A\xd8\x3d\xde\x00",
        ];
        assert_eq!(default_decoder().decode(inputs[0]), "\u{e9}A");

        for input in inputs {
            let whole = default_decoder().decode(input);
            for split in 0..=input.len() {
                let mut dec = default_decoder();
                let mut joined = dec.decode(&input[..split]);
                joined.push_str(&dec.decode(&input[split..]));
                assert_eq!(joined, whole, "{:02x?} split at {}", input, split);
            }
        }
    }

    #[test]
    fn test_step_through_other_coding_system() {
        let mut dec = default_decoder();
        let mut out = String::new();
        for &byte in b"\x1b%G\xc3\xa9\x1b%@A" {
            while dec.step(byte, &mut out) == Step::Hold {}
        }
        assert_eq!(out, "\u{e9}A");
    }

    #[test]
    fn test_docs_intermediates_other_than_no_return() {
        let mut dec = default_decoder();
        // Only 2/15 may follow 2/5
        assert_eq!(dec.decode(b"\x1b%!G\xc3\xa9"), "\u{241b}%!G\u{fffd}\u{fffd}");
        assert_eq!(dec.decode(b"\x1b% G"), "\u{241b}% G");
        assert_eq!(dec.state(), ParseState::Normal);
    }

    #[test]
    fn test_docs_invalid_forms() {
        let mut dec = default_decoder();
        // 4/0 is the return itself, not a coding system
        assert_eq!(dec.decode(b"\x1b%@"), "\u{241b}%@");
        assert_eq!(dec.decode(b"\x1b%/~"), "\u{241b}%/~");
        assert_eq!(dec.decode(b"\x1b%!"), "\u{241b}%!");
    }

    #[test]
    fn test_unavailable_coding_system_is_replaced() {
        let mut dec = default_decoder();
        // ISO IR 108 (NAPLPS) is registered but not available
        assert_eq!(dec.decode(b"\x1b%Aab\x1b%@c"), "\u{fffd}\u{fffd}c");
        assert_eq!(dec.decode(b"\x1b%Ax\x1bx\x1b%"), "\u{fffd}".repeat(3));
        // The return is completed by the next buffer
        assert_eq!(dec.decode(b"@d"), "d");

        // Without return it runs on until reset
        assert_eq!(dec.decode(b"\x1b%/Bab\x1b%@"), "\u{fffd}".repeat(5));
        assert_eq!(dec.decode(b"cd"), "\u{fffd}\u{fffd}");
        dec.reset();
        assert_eq!(dec.decode(b"cd"), "cd");
    }

    #[test]
    fn test_skip_foreign() {
        let mut out = String::new();
        assert_eq!(
            skip_foreign(b"ab\x1b%@cd", ReturnKind::Standard, &mut out),
            DocsProgress::returned(5)
        );
        assert_eq!(out, "\u{fffd}\u{fffd}");

        out.clear();
        assert_eq!(
            skip_foreign(b"ab\x1b%@cd", ReturnKind::NoReturn, &mut out),
            DocsProgress::pending(7)
        );
        assert_eq!(out.chars().count(), 7);

        out.clear();
        assert_eq!(
            skip_foreign(b"ab\x1b", ReturnKind::Standard, &mut out),
            DocsProgress::pending(2)
        );
        assert_eq!(out, "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_g0_invoked_into_gr_is_rejected() {
        let config = Iso2022Config::new().with_initial_gr(CodeElement::G0);
        assert!(Decoder::new(BuiltinFactory::shared(), &config).is_err());
    }
}
