//! ISO-IR registration tables for escape sequence final bytes
//!
//! Each table is indexed by `F - 0x40`, where `F` is the final byte of the
//! designating escape sequence, and holds the ISO-IR registration number of
//! the set it designates (0 means nothing is registered at that position).
//!
//! The same tables drive both directions: the decoder looks up final bytes,
//! and graphic codesets derive their designation sequences from them.

use asn1_core::{CodeElement, CodesetType};

/// A table of 64 registration numbers indexed by final byte
pub type EscapeTable = [u8; 64];

/// Escape character
pub const ESC: u8 = 0x1b;
/// Locking shift zero (SHIFT IN)
pub const LS0: u8 = 0x0f;
/// Locking shift one (SHIFT OUT)
pub const LS1: u8 = 0x0e;
/// Single shift two
pub const SS2: u8 = 0x8e;
/// Single shift three
pub const SS3: u8 = 0x8f;

/// Intermediate bytes
pub mod intermediate {
    pub const ANNOUNCE: u8 = 0x20;
    pub const C0_DESIGNATE: u8 = 0x21;
    pub const C1_DESIGNATE: u8 = 0x22;
    pub const SINGLE_CONTROL: u8 = 0x23;
    pub const MULTIBYTE: u8 = 0x24;
    pub const OTHER_CODING_SYSTEM: u8 = 0x25;
    pub const REVISED_REGISTRATION: u8 = 0x26;
    /// `ESC ( ... ESC +`: G0-G3 designate 94-set
    pub const DESIGNATE_94: u8 = 0x28;
    /// `ESC , ... ESC /`: G0-G3 designate 96-set (`ESC ,` is reserved)
    pub const DESIGNATE_96: u8 = 0x2c;
    /// Second intermediate of the four-byte 94-set designations
    pub const EXTENDED: u8 = 0x21;
    /// Second intermediate of DOCS without standard return
    pub const NO_RETURN: u8 = 0x2f;
}

/// Fs final bytes acting as locking shifts
pub mod locking_shift {
    pub const LS2: u8 = 0x6e;
    pub const LS3: u8 = 0x6f;
    pub const LS3R: u8 = 0x7c;
    pub const LS2R: u8 = 0x7d;
    pub const LS1R: u8 = 0x7e;
}

/// 94-character graphic sets, three-byte escape (`ESC I F`)
pub static G94_SETS: EscapeTable = [
    2, 4, 6, 8, 254, 9, 255, 10, 11, 13, 14, 21, 16, 39, 37, 38, //
    53, 54, 25, 55, 57, 27, 47, 49, 31, 15, 17, 18, 19, 50, 51, 59, //
    60, 61, 70, 71, 173, 68, 69, 84, 85, 86, 88, 89, 90, 91, 92, 93, //
    94, 95, 96, 98, 99, 102, 103, 121, 122, 137, 141, 146, 128, 147, 0, 0,
];

/// 94-character graphic sets, four-byte escape (`ESC I 2/1 F`)
pub static G94_SETS_EXTENDED: EscapeTable = [
    150, 151, 170, 207, 230, 231, 232, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// 96-character graphic sets (`ESC I F`)
pub static G96_SETS: EscapeTable = [
    111, 100, 101, 109, 110, 123, 126, 127, 138, 139, 142, 143, 144, 148, 152, 153, //
    154, 155, 156, 164, 166, 167, 157, 0, 158, 179, 180, 181, 182, 197, 198, 199, //
    200, 201, 203, 204, 205, 206, 226, 208, 209, 227, 234, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 129, 0, 0,
];

/// Multiple-byte graphic sets (`ESC 2/4 I F`)
pub static MULTIBYTE_SETS: EscapeTable = [
    42, 58, 168, 149, 159, 165, 169, 171, 172, 183, 184, 185, 186, 187, 202, 228, //
    229, 233, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// C0 control sets (`ESC 2/1 F`)
pub static C0_SETS: EscapeTable = [
    1, 7, 48, 26, 36, 106, 74, 104, 130, 132, 134, 135, 140, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// C1 control sets (`ESC 2/2 F`)
pub static C1_SETS: EscapeTable = [
    56, 73, 124, 77, 133, 40, 136, 105, 107, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Other coding systems with standard return (`ESC 2/5 F`)
pub static DOCS_WITH_RETURN: EscapeTable = [
    0, 108, 178, 131, 145, 160, 161, 196, 188, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Other coding systems without standard return (`ESC 2/5 2/15 F`)
pub static DOCS_WITHOUT_RETURN: EscapeTable = [
    162, 163, 125, 174, 175, 176, 177, 190, 191, 192, 193, 194, 195, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Check whether a byte can terminate a designation (4/0 to 7/14)
pub fn is_final(byte: u8) -> bool {
    (0x40..=0x7e).contains(&byte)
}

/// Look up the registration number for a final byte
///
/// Returns `None` for bytes outside 4/0-7/14 and for unregistered positions.
pub fn lookup(table: &EscapeTable, final_byte: u8) -> Option<u32> {
    if !is_final(final_byte) {
        return None;
    }
    match table[usize::from(final_byte - 0x40)] {
        0 => None,
        number => Some(u32::from(number)),
    }
}

/// Find the final byte a registration number occupies in a table
pub fn final_byte(table: &EscapeTable, number: u32) -> Option<u8> {
    if number == 0 {
        return None;
    }
    table
        .iter()
        .position(|&n| u32::from(n) == number)
        .and_then(|index| u8::try_from(index).ok())
        .map(|index| 0x40 + index)
}

/// The kind of set a registration number is listed as, if any
///
/// Only the graphic and control tables are consulted; coding systems
/// reached through DOCS are not designatable into a code element.
pub fn registered_type(number: u32) -> Option<CodesetType> {
    let listed = |table: &EscapeTable| final_byte(table, number).is_some();

    if listed(&G94_SETS) || listed(&G94_SETS_EXTENDED) {
        Some(CodesetType::G94)
    } else if listed(&G96_SETS) {
        Some(CodesetType::G96)
    } else if listed(&MULTIBYTE_SETS) {
        Some(CodesetType::Multibyte)
    } else if listed(&C0_SETS) {
        Some(CodesetType::C0)
    } else if listed(&C1_SETS) {
        Some(CodesetType::C1)
    } else {
        None
    }
}

/// Build the escape sequence designating a graphic set into `element`
///
/// # Returns
/// `None` when the set is not registered in the table for its kind, or when
/// the designation is impossible (a 96-character set cannot go into G0).
pub fn designation(number: u32, kind: CodesetType, element: CodeElement) -> Option<Vec<u8>> {
    // Elements are 0-3, so the offsets below stay within column 2
    let offset = element.index() as u8;

    match kind {
        CodesetType::G94 => {
            let i = intermediate::DESIGNATE_94 + offset;
            if let Some(f) = final_byte(&G94_SETS, number) {
                Some(vec![ESC, i, f])
            } else {
                final_byte(&G94_SETS_EXTENDED, number).map(|f| vec![ESC, i, intermediate::EXTENDED, f])
            }
        }
        CodesetType::G96 => {
            if element == CodeElement::G0 {
                return None;
            }
            final_byte(&G96_SETS, number).map(|f| vec![ESC, intermediate::DESIGNATE_96 + offset, f])
        }
        CodesetType::Multibyte => final_byte(&MULTIBYTE_SETS, number)
            .map(|f| vec![ESC, intermediate::MULTIBYTE, intermediate::DESIGNATE_94 + offset, f]),
        _ => None,
    }
}
