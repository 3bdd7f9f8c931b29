//! Codeset capability traits and the shared codeset handle
//!
//! A codeset maps code positions of one registered character set to Unicode
//! and back. There are three capabilities, one per kind of set:
//!
//! - [`GraphicCodeset`]: 94-, 96- and multiple-byte graphic sets, bound into
//!   G0-G3 and invoked into GL/GR
//! - [`ControlCodeset`]: C0 and C1 control sets
//! - [`DocsCodeset`]: coding systems reached through DESIGNATE OTHER CODING
//!   SYSTEM, which consume raw bytes until they return (or until the end)
//!
//! Codesets are shared through [`Arc`]: a decoder holds the same instance in a
//! code element and in its initial bindings, so cloning a [`Codeset`] is how a
//! reference is retained and dropping it is how it is released.

use std::fmt;
use std::sync::Arc;

use asn1_core::{CodeElement, CodesetType};

use crate::tables;

/// U+241B SYMBOL FOR ESCAPE, emitted in place of a rejected ESC
pub const ESCAPE_SYMBOL: char = '\u{241b}';

/// U+FFFD REPLACEMENT CHARACTER, emitted for undecodable bytes
pub const REPLACEMENT: char = '\u{fffd}';

/// Flag marking a registration number as a DRCS identifier
///
/// The low 28 bits carry the nibbles of the DRCS intermediate bytes.
pub const CODESET_DRCS: u32 = 0x8000_0000;

/// ISO-IR registration numbers of the built-in codesets
pub mod registry {
    /// ISO 646 C0 control set
    pub const STANDARD_C0: u32 = 1;
    /// ISO 6429 C1 control set
    pub const STANDARD_C1: u32 = 77;
    /// Attribute control set for videotex (C1)
    pub const VIDEOTEX_ATTRIBUTES: u32 = 73;
    /// ISO 646 IRV (ASCII)
    pub const ASCII: u32 = 6;
    /// JIS C 6220 katakana
    pub const KATAKANA: u32 = 13;
    /// Third supplementary set of mosaic characters
    pub const MOSAIC_3: u32 = 72;
    /// Third supplementary set of mosaic characters, revised
    pub const MOSAIC_3_REVISED: u32 = 173;
    /// ASMO 449 Arabic
    pub const ARABIC: u32 = 89;
    /// ISO 8859-1 right half
    pub const LATIN_1: u32 = 100;
    /// CCITT T.61 primary set
    pub const TELETEX: u32 = 102;
    /// CCITT T.61 supplementary set
    pub const TELETEX_SUPPLEMENTARY: u32 = 103;
    /// ISO 8859-15 right half
    pub const LATIN_9: u32 = 203;
    /// UTF-8 with standard return
    pub const UTF_8: u32 = 196;
}

/// Identity shared by all codesets: `(registration number, type)`
pub trait CodesetIdentity: Send + Sync {
    /// ISO-IR registration number (or DRCS identifier)
    fn registration_number(&self) -> u32;

    /// Kind of set
    fn codeset_type(&self) -> CodesetType;
}

/// A C0 or C1 control set
///
/// Control sets translate between the bytes on the wire and the standard
/// control functions (ISO 6429 positions) the decoder and encoder act on.
pub trait ControlCodeset: CodesetIdentity {
    /// Map a control byte to its function, `None` if it has no equivalent
    fn decode(&self, byte: u8) -> Option<u8>;

    /// Map a control function to its byte, `None` if it has no equivalent
    fn encode(&self, function: u8) -> Option<u8>;
}

/// A 94-, 96- or multiple-byte graphic set
pub trait GraphicCodeset: CodesetIdentity {
    /// Decode one code position
    ///
    /// `byte` is always in 0x20-0x7F, whichever half of the code table it
    /// arrived in. Multiple-byte sets buffer lead bytes internally.
    fn decode(&self, byte: u8, out: &mut String);

    /// Flush any incomplete multiple-byte sequence as U+FFFD
    ///
    /// Called on shifts, before an escape sequence, and at the end of input.
    fn finish(&self, _out: &mut String) {}

    /// Escape sequence designating this set into `element`
    fn invoke(&self, element: CodeElement) -> Option<Vec<u8>> {
        tables::designation(self.registration_number(), self.codeset_type(), element)
    }

    /// Encode a combining sequence (base character plus combining marks)
    ///
    /// `base` is added to every encoded code position: 0x00 for GL, 0x80 for
    /// GR. Returns `None` unless the whole sequence can be represented.
    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>>;
}

/// How far a coding system got through one chunk of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocsProgress {
    /// Bytes used from the start of the chunk
    pub consumed: usize,
    /// Whether the chunk contained the standard return
    pub returned: bool,
}

impl DocsProgress {
    /// Everything up to `consumed` was used and more input is expected
    pub fn pending(consumed: usize) -> Self {
        Self {
            consumed,
            returned: false,
        }
    }

    /// The standard return ended at `consumed`
    pub fn returned(consumed: usize) -> Self {
        Self {
            consumed,
            returned: true,
        }
    }
}

/// A coding system other than ISO 2022
///
/// Input arrives in chunks. The decoder keeps whatever a chunk leaves
/// unconsumed and puts it in front of the next chunk, so a character or a
/// return sequence split between two buffers is decoded as if it had
/// arrived in one.
pub trait DocsCodeset: CodesetIdentity {
    /// Decode bytes from the start of `input`
    ///
    /// Systems with standard return stop after `ESC 2/5 4/0`, which is
    /// consumed but produces no output. Otherwise everything is consumed
    /// except an incomplete sequence at the very end, which the next chunk
    /// may complete. No consumed byte may go unrepresented.
    fn decode(&self, input: &[u8], out: &mut String) -> DocsProgress;
}

/// Shared handle to a resolved codeset
#[derive(Clone)]
pub enum Codeset {
    Control(Arc<dyn ControlCodeset>),
    Graphic(Arc<dyn GraphicCodeset>),
    Docs(Arc<dyn DocsCodeset>),
}

impl Codeset {
    /// Wrap a control set
    pub fn control<C: ControlCodeset + 'static>(codeset: C) -> Self {
        Codeset::Control(Arc::new(codeset))
    }

    /// Wrap a graphic set
    pub fn graphic<G: GraphicCodeset + 'static>(codeset: G) -> Self {
        Codeset::Graphic(Arc::new(codeset))
    }

    /// Wrap a coding system
    pub fn docs<D: DocsCodeset + 'static>(codeset: D) -> Self {
        Codeset::Docs(Arc::new(codeset))
    }

    pub fn registration_number(&self) -> u32 {
        match self {
            Codeset::Control(c) => c.registration_number(),
            Codeset::Graphic(g) => g.registration_number(),
            Codeset::Docs(d) => d.registration_number(),
        }
    }

    pub fn codeset_type(&self) -> CodesetType {
        match self {
            Codeset::Control(c) => c.codeset_type(),
            Codeset::Graphic(g) => g.codeset_type(),
            Codeset::Docs(d) => d.codeset_type(),
        }
    }

    pub fn into_control(self) -> Option<Arc<dyn ControlCodeset>> {
        match self {
            Codeset::Control(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_graphic(self) -> Option<Arc<dyn GraphicCodeset>> {
        match self {
            Codeset::Graphic(g) => Some(g),
            _ => None,
        }
    }

    pub fn into_docs(self) -> Option<Arc<dyn DocsCodeset>> {
        match self {
            Codeset::Docs(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Debug for Codeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codeset")
            .field("number", &self.registration_number())
            .field("type", &self.codeset_type())
            .finish()
    }
}
