//! Unicode coding systems reached through DESIGNATE OTHER CODING SYSTEM
//!
//! UTF-8 is available with standard return (ISO IR 196) and without (the
//! implementation levels 190-192). UTF-16, UCS-2 and UCS-4 are only
//! registered without standard return, so they run to the end of the input.
//!
//! A chunk is consumed up to, but not including, an incomplete character or
//! an incomplete standard return at its end.

use asn1_core::CodesetType;

use crate::codeset::{CodesetIdentity, DocsCodeset, DocsProgress, ESCAPE_SYMBOL, REPLACEMENT, registry};
use crate::tables::{intermediate, ESC};

/// Final byte of the standard return, `ESC 2/5 4/0`
const RETURN_FINAL: u8 = 0x40;

/// UTF-8
#[derive(Debug, Clone, Copy)]
pub struct Utf8 {
    number: u32,
    with_return: bool,
}

impl Utf8 {
    /// ISO IR 196, returning on `ESC 2/5 4/0`
    pub fn with_standard_return() -> Self {
        Self {
            number: registry::UTF_8,
            with_return: true,
        }
    }

    /// ISO IR 190, 191 or 192
    pub fn without_standard_return(number: u32) -> Self {
        Self {
            number,
            with_return: false,
        }
    }
}

fn push_utf8(bytes: &[u8], out: &mut String) {
    if !bytes.is_empty() {
        let (text, _) = encoding_rs::UTF_8.decode_without_bom_handling(bytes);
        out.push_str(&text);
    }
}

/// Length of a UTF-8 sequence cut off at the end of `bytes`
fn incomplete_utf8_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let byte = bytes[bytes.len() - back];
        if byte & 0xc0 == 0x80 {
            continue;
        }
        let needed = match byte {
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return 0,
        };
        return if needed > back { back } else { 0 };
    }
    0
}

impl CodesetIdentity for Utf8 {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        if self.with_return {
            CodesetType::DocsWithReturn
        } else {
            CodesetType::DocsWithoutReturn
        }
    }
}

impl DocsCodeset for Utf8 {
    fn decode(&self, input: &[u8], out: &mut String) -> DocsProgress {
        if !self.with_return {
            let complete = input.len() - incomplete_utf8_tail(input);
            push_utf8(&input[..complete], out);
            return DocsProgress::pending(complete);
        }

        let mut run_start = 0;
        let mut pos = 0;
        while pos < input.len() {
            if input[pos] != ESC {
                pos += 1;
                continue;
            }

            push_utf8(&input[run_start..pos], out);
            match (input.get(pos + 1), input.get(pos + 2)) {
                (Some(&intermediate::OTHER_CODING_SYSTEM), Some(&RETURN_FINAL)) => {
                    return DocsProgress::returned(pos + 3);
                }
                (Some(&intermediate::OTHER_CODING_SYSTEM), Some(_)) => {
                    // Not a return: keep the escape visible and go on with
                    // the byte that followed 2/5
                    out.push(ESCAPE_SYMBOL);
                    out.push('%');
                    pos += 2;
                }
                // The return may be completed by the next chunk
                (None, _) | (Some(&intermediate::OTHER_CODING_SYSTEM), None) => {
                    return DocsProgress::pending(pos);
                }
                _ => {
                    out.push(ESCAPE_SYMBOL);
                    pos += 1;
                }
            }
            run_start = pos;
        }

        let complete = input.len() - incomplete_utf8_tail(&input[run_start..]);
        push_utf8(&input[run_start..complete], out);
        DocsProgress::pending(complete)
    }
}

/// UTF-16, big-endian
#[derive(Debug, Clone, Copy)]
pub struct Utf16 {
    number: u32,
}

impl Utf16 {
    /// ISO IR 193, 194 or 195
    pub fn new(number: u32) -> Self {
        Self { number }
    }
}

impl CodesetIdentity for Utf16 {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::DocsWithoutReturn
    }
}

impl DocsCodeset for Utf16 {
    fn decode(&self, input: &[u8], out: &mut String) -> DocsProgress {
        let mut complete = input.len() & !1;
        // A high surrogate waits for its pair
        if complete >= 2 && (0xd8..=0xdb).contains(&input[complete - 2]) {
            complete -= 2;
        }

        // Unpaired surrogates come out as U+FFFD
        let (text, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(&input[..complete]);
        out.push_str(&text);
        DocsProgress::pending(complete)
    }
}

/// UCS-2, big-endian
#[derive(Debug, Clone, Copy)]
pub struct Ucs2 {
    number: u32,
}

impl Ucs2 {
    /// ISO IR 162, 174 or 176
    pub fn new(number: u32) -> Self {
        Self { number }
    }
}

impl CodesetIdentity for Ucs2 {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::DocsWithoutReturn
    }
}

impl DocsCodeset for Ucs2 {
    fn decode(&self, input: &[u8], out: &mut String) -> DocsProgress {
        let chunks = input.chunks_exact(2);
        let complete = input.len() - chunks.remainder().len();

        for unit in chunks {
            let code = u32::from(u16::from_be_bytes([unit[0], unit[1]]));
            // Surrogate code units are not characters in UCS-2
            out.push(char::from_u32(code).unwrap_or(REPLACEMENT));
        }
        DocsProgress::pending(complete)
    }
}

/// UCS-4, big-endian
#[derive(Debug, Clone, Copy)]
pub struct Ucs4 {
    number: u32,
}

impl Ucs4 {
    /// ISO IR 163, 175 or 177
    pub fn new(number: u32) -> Self {
        Self { number }
    }
}

impl CodesetIdentity for Ucs4 {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::DocsWithoutReturn
    }
}

impl DocsCodeset for Ucs4 {
    fn decode(&self, input: &[u8], out: &mut String) -> DocsProgress {
        let chunks = input.chunks_exact(4);
        let complete = input.len() - chunks.remainder().len();

        for unit in chunks {
            let code = u32::from_be_bytes([unit[0], unit[1], unit[2], unit[3]]);
            out.push(char::from_u32(code).unwrap_or(REPLACEMENT));
        }
        DocsProgress::pending(complete)
    }
}
