//! ISO/IEC 2022 encoder
//!
//! Turns Unicode text into bytes using the sets currently designated and,
//! when none of them can represent a character, designating a set from the
//! permitted list. The escape sequences and shifts it writes are the ones
//! the [`Decoder`](crate::Decoder) reads back.
//!
//! # Attempt Order
//!
//! For each character, together with any combining marks that follow it:
//! 1. C0/C1 controls go through the bound control sets
//! 2. the set invoked into GL
//! 3. 8-bit: the set invoked into GR, then the other elements through a
//!    single shift or a locking shift.
//!    7-bit: the other elements through a single shift or a locking shift
//!    into GL
//! 4. the permitted sets in order, designated into the replacement element
//! 5. the replacement byte, once for the whole cluster
//!
//! # Replacement Element
//!
//! In canonical mode a new 94-character or multiple-byte set always goes
//! into G0 and a new 96-character set into G1. Otherwise the least recently
//! used element is replaced (G1-G3 for 96-character sets).

use std::sync::Arc;

use asn1_core::{Asn1Result, Bits, CodeElement, CodesetType, ControlElement, Flags, SingleShiftArea, Slot};

use crate::bindings::{resolve_graphic, Bindings};
use crate::codeset::GraphicCodeset;
use crate::config::Iso2022Config;
use crate::factory::CodesetFactory;
use crate::tables::{locking_shift, ESC, LS0, LS1, SS2, SS3};

/// Combining mark ranges that extend a character into a combining sequence
fn is_combining(ch: char) -> bool {
    matches!(ch, '\u{300}'..='\u{36f}' | '\u{1dc0}'..='\u{1dff}' | '\u{20d0}'..='\u{20ff}')
}

/// Functions that must never be written as plain control characters
fn is_shift_or_escape(function: u8) -> bool {
    matches!(function, ESC | LS0 | LS1 | SS2 | SS3)
}

/// Locking shift invoking an element into GR
fn locking_shift_gr(element: CodeElement) -> Option<Vec<u8>> {
    match element {
        CodeElement::G0 => None,
        CodeElement::G1 => Some(vec![ESC, locking_shift::LS1R]),
        CodeElement::G2 => Some(vec![ESC, locking_shift::LS2R]),
        CodeElement::G3 => Some(vec![ESC, locking_shift::LS3R]),
    }
}

pub struct Encoder {
    factory: Arc<dyn CodesetFactory>,
    bindings: Bindings,
    bits: Bits,
    single_shift_area: SingleShiftArea,
    flags: Flags,
    permitted: Vec<Arc<dyn GraphicCodeset>>,
    last_used: [u32; 4],
    clock: u32,
}

impl Encoder {
    /// Create an encoder in the initial state described by `config`
    ///
    /// The permitted list starts empty.
    ///
    /// # Errors
    /// As for [`Decoder::new`](crate::Decoder::new).
    pub fn new(factory: Arc<dyn CodesetFactory>, config: &Iso2022Config) -> Asn1Result<Self> {
        config.validate()?;
        let bindings = Bindings::new(factory.as_ref(), config)?;

        Ok(Self {
            factory,
            bindings,
            bits: config.bits,
            single_shift_area: config.single_shift_area,
            flags: config.flags,
            permitted: Vec::new(),
            last_used: [0; 4],
            clock: 0,
        })
    }

    /// Replace the list of sets the encoder may designate, most preferred first
    ///
    /// # Errors
    /// If a number is unknown or not a graphic set. The previous list is
    /// kept in that case.
    pub fn set_permitted_graphic_codesets(&mut self, numbers: &[u32]) -> Asn1Result<()> {
        let permitted = numbers
            .iter()
            .map(|&number| resolve_graphic(self.factory.as_ref(), Slot::Permitted, number))
            .collect::<Asn1Result<Vec<_>>>()?;

        log::debug!("Permitted graphic sets: {:?}", numbers);
        self.permitted = permitted;
        Ok(())
    }

    /// Registration numbers of the permitted sets, in order
    pub fn permitted_graphic_codesets(&self) -> Vec<u32> {
        self.permitted.iter().map(|set| set.registration_number()).collect()
    }

    /// Return to the construction-time designations and invocations
    ///
    /// The permitted list is kept.
    pub fn reset(&mut self) {
        self.bindings.reset();
        self.last_used = [0; 4];
        self.clock = 0;
    }

    pub fn bits(&self) -> Bits {
        self.bits
    }

    /// Elements currently invoked into GL and GR
    pub fn invoked(&self) -> (CodeElement, CodeElement) {
        (self.bindings.gl, self.bindings.gr)
    }

    /// Registration number of the set designated into a graphic element
    pub fn designated(&self, element: CodeElement) -> Option<u32> {
        self.bindings.graphic_number(element)
    }

    /// Encode a string, writing `replacement` for what cannot be represented
    pub fn encode(&mut self, text: &str, replacement: u8) -> Vec<u8> {
        let units: Vec<Option<char>> = text.chars().map(Some).collect();
        self.encode_units(&units, replacement)
    }

    /// Encode UTF-16 code units
    ///
    /// An unpaired surrogate is written as `replacement`.
    pub fn encode_utf16(&mut self, text: &[u16], replacement: u8) -> Vec<u8> {
        let units: Vec<Option<char>> = char::decode_utf16(text.iter().copied())
            .map(Result::ok)
            .collect();
        self.encode_units(&units, replacement)
    }

    fn encode_units(&mut self, units: &[Option<char>], replacement: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(units.len());
        let mut pos = 0;

        while pos < units.len() {
            let Some(ch) = units[pos] else {
                out.push(replacement);
                pos += 1;
                continue;
            };

            if let Ok(code) = u8::try_from(ch) {
                if code < 0x20 || (0x80..=0x9f).contains(&code) {
                    self.encode_control(code, replacement, &mut out);
                    pos += 1;
                    continue;
                }
            }

            let mut end = pos + 1;
            while let Some(&Some(mark)) = units.get(end) {
                if !is_combining(mark) {
                    break;
                }
                end += 1;
            }

            let cluster: Vec<char> = units[pos..end].iter().flatten().copied().collect();
            if !self.encode_cluster(&cluster, &mut out) {
                out.push(replacement);
            }
            pos = end;
        }

        out
    }

    fn encode_control(&self, function: u8, replacement: u8, out: &mut Vec<u8>) {
        let element = if function < 0x80 {
            ControlElement::C0
        } else {
            ControlElement::C1
        };

        let byte = self
            .bindings
            .control(element)
            .and_then(|set| set.encode(function))
            .filter(|&byte| !is_shift_or_escape(function) && !is_shift_or_escape(byte));

        match byte {
            Some(byte) if byte >= 0x80 && self.bits == Bits::Seven => out.extend([ESC, byte - 0x40]),
            Some(byte) => out.push(byte),
            None => out.push(replacement),
        }
    }

    fn encode_cluster(&mut self, cluster: &[char], out: &mut Vec<u8>) -> bool {
        let gl = self.bindings.gl;
        if let Some(bytes) = self.encode_with(gl, cluster, 0) {
            out.extend(bytes);
            self.touch(gl);
            return true;
        }

        let shifted = match self.bits {
            Bits::Eight => self.encode_eight_bit(cluster, out),
            Bits::Seven => self.encode_seven_bit(cluster, out),
        };

        shifted || self.designate_permitted(cluster, out)
    }

    fn encode_eight_bit(&mut self, cluster: &[char], out: &mut Vec<u8>) -> bool {
        let (gl, gr) = (self.bindings.gl, self.bindings.gr);
        if let Some(bytes) = self.encode_with(gr, cluster, 0x80) {
            out.extend(bytes);
            self.touch(gr);
            return true;
        }

        for element in CodeElement::ALL {
            if element == gl || element == gr {
                continue;
            }

            // G0 can only be invoked into GL
            if element == CodeElement::G0 {
                let Some(bytes) = self.encode_with(element, cluster, 0) else {
                    continue;
                };
                let Some(shift) = self.locking_shift_gl(element) else {
                    continue;
                };
                out.extend(shift);
                out.extend(bytes);
                self.bindings.gl = element;
                self.touch(element);
                return true;
            }

            let Some(bytes) = self.encode_with(element, cluster, 0x80) else {
                continue;
            };

            if let Some(shift) = self.single_shift_for(element, bytes.len()) {
                out.extend(shift);
                // The shifted byte lands in the single-shift area whatever
                // base the set honoured
                match self.single_shift_area.resolve(self.bits) {
                    SingleShiftArea::Gl => out.push(bytes[0] & 0x7f),
                    _ => out.push(bytes[0] | 0x80),
                }
                self.touch(element);
                return true;
            }

            if let Some(shift) = locking_shift_gr(element) {
                out.extend(shift);
                out.extend(bytes);
                self.bindings.gr = element;
                self.touch(element);
                return true;
            }
        }

        false
    }

    fn encode_seven_bit(&mut self, cluster: &[char], out: &mut Vec<u8>) -> bool {
        let gl = self.bindings.gl;

        for element in CodeElement::ALL {
            if element == gl {
                continue;
            }
            let Some(bytes) = self.encode_with(element, cluster, 0) else {
                continue;
            };

            if self.single_shift_area.resolve(self.bits) != SingleShiftArea::Gr {
                if let Some(shift) = self.single_shift_for(element, bytes.len()) {
                    out.extend(shift);
                    out.extend(bytes);
                    self.touch(element);
                    return true;
                }
            }

            if let Some(shift) = self.locking_shift_gl(element) {
                out.extend(shift);
                out.extend(bytes);
                self.bindings.gl = element;
                self.touch(element);
                return true;
            }
        }

        false
    }

    /// Designate the first permitted set that can encode the cluster
    fn designate_permitted(&mut self, cluster: &[char], out: &mut Vec<u8>) -> bool {
        let (replace, replace_96) = self.replacement_elements();

        for set in self.permitted.clone() {
            let is_96 = set.codeset_type() == CodesetType::G96;
            let into_gr = is_96 && self.bits == Bits::Eight;
            let element = if is_96 { replace_96 } else { replace };

            let base = if into_gr { 0x80 } else { 0 };
            let Some(bytes) = set.encode(cluster, base) else {
                continue;
            };
            let Some(designation) = set.invoke(element) else {
                continue;
            };

            let shift = if into_gr {
                if self.bindings.gr == element {
                    Vec::new()
                } else {
                    match locking_shift_gr(element) {
                        Some(shift) => shift,
                        None => continue,
                    }
                }
            } else if self.bindings.gl == element {
                Vec::new()
            } else {
                match self.locking_shift_gl(element) {
                    Some(shift) => shift,
                    None => continue,
                }
            };

            log::debug!("Designating ISO IR {} into {}", set.registration_number(), element);
            out.extend(designation);
            out.extend(shift);
            out.extend(bytes);

            self.bindings.designate(element, set);
            if into_gr {
                self.bindings.gr = element;
            } else {
                self.bindings.gl = element;
            }
            self.touch(element);
            return true;
        }

        false
    }

    /// Elements a new set goes into: any element, and one that is not G0
    fn replacement_elements(&self) -> (CodeElement, CodeElement) {
        if self.flags.contains(Flags::CANONICAL_MODE) {
            return (CodeElement::G0, CodeElement::G1);
        }

        let age = |element: CodeElement| self.clock.wrapping_sub(self.last_used[element.index()]);
        let oldest = |candidates: &[CodeElement]| {
            candidates
                .iter()
                .copied()
                .fold(None, |best: Option<CodeElement>, element| match best {
                    Some(current) if age(element) <= age(current) => Some(current),
                    _ => Some(element),
                })
                .unwrap_or(CodeElement::G1)
        };

        (oldest(&CodeElement::ALL), oldest(&CodeElement::ALL[1..]))
    }

    fn touch(&mut self, element: CodeElement) {
        if !self.flags.contains(Flags::CANONICAL_MODE) {
            self.clock = self.clock.wrapping_add(1);
            self.last_used[element.index()] = self.clock;
        }
    }

    fn encode_with(&self, element: CodeElement, cluster: &[char], base: u8) -> Option<Vec<u8>> {
        self.bindings.graphic(element)?.encode(cluster, base)
    }

    /// The byte a shift function is written as, C1 first
    fn shift_byte(&self, function: u8) -> Option<u8> {
        [ControlElement::C1, ControlElement::C0]
            .into_iter()
            .find_map(|element| self.bindings.control(element)?.encode(function))
    }

    /// Single shift for a one-byte encoding from G2 or G3
    fn single_shift_for(&self, element: CodeElement, len: usize) -> Option<Vec<u8>> {
        let function = match element {
            CodeElement::G2 => SS2,
            CodeElement::G3 => SS3,
            _ => return None,
        };
        if len != 1 {
            return None;
        }

        let byte = self.shift_byte(function)?;
        if byte >= 0x80 && self.bits == Bits::Seven {
            Some(vec![ESC, byte - 0x40])
        } else {
            Some(vec![byte])
        }
    }

    /// Locking shift invoking an element into GL
    fn locking_shift_gl(&self, element: CodeElement) -> Option<Vec<u8>> {
        match element {
            CodeElement::G0 => self.shift_byte(LS0).map(|byte| vec![byte]),
            CodeElement::G1 => self.shift_byte(LS1).map(|byte| vec![byte]),
            CodeElement::G2 => Some(vec![ESC, locking_shift::LS2]),
            CodeElement::G3 => Some(vec![ESC, locking_shift::LS3]),
        }
    }
}
