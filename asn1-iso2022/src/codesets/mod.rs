//! Built-in codesets
//!
//! Each module implements one family of registered sets. The factory in
//! [`crate::factory`] decides which registration numbers map onto which type.

mod arabic;
mod ascii;
mod control;
mod iso8859;
mod katakana;
mod latin1;
mod multibyte;
mod registered;
mod teletex;
mod unicode;
mod videotex;

pub use arabic::Arabic;
pub use ascii::{Ascii, Iso646};
pub use control::{OpaqueControl, StandardControl};
pub use iso8859::Iso8859RightHalf;
pub use katakana::Katakana;
pub use latin1::Latin1;
pub use multibyte::EucMultibyte;
pub use registered::RegisteredGraphic;
pub use teletex::{Teletex, TeletexSupplementary};
pub use unicode::{Ucs2, Ucs4, Utf16, Utf8};
pub use videotex::Mosaic;

use crate::codeset::REPLACEMENT;

/// Table entry for positions with no Unicode equivalent
const NE: u16 = 0xfffd;

/// The only character of a single-character sequence
fn single(sequence: &[char]) -> Option<char> {
    match *sequence {
        [ch] => Some(ch),
        _ => None,
    }
}

/// Decode through a table covering 2/0-7/15
fn table_decode(map: &[u16; 96], byte: u8) -> char {
    byte.checked_sub(0x20)
        .and_then(|index| map.get(usize::from(index)))
        .and_then(|&code| char::from_u32(u32::from(code)))
        .unwrap_or(REPLACEMENT)
}

/// Find the code position of a character in a table covering 2/0-7/15
fn table_encode(map: &[u16; 96], ch: char) -> Option<u8> {
    let code = u16::try_from(u32::from(ch)).ok().filter(|&c| c != NE)?;
    let index = map.iter().position(|&c| c == code)?;
    u8::try_from(index).ok().map(|index| index + 0x20)
}
