//! Unsigned value stream over the flexible-polyline alphabet.
//!
//! Every character carries six bits: five payload bits and a continuation
//! flag (`0x20`). A value is spread over one or more characters, least
//! significant group first.

use crate::flexpolyline::{DecodeError, EncodingFault};

const ENCODING_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Lowest character code covered by the decoding table (`'-'`).
const DECODING_OFFSET: u32 = b'-' as u32;

const INVALID: u8 = 0xFF;

/// Maps `'-'..='z'` to its 6-bit value, `INVALID` for gaps.
const DECODING_TABLE: [u8; 78] = build_decoding_table();

const fn build_decoding_table() -> [u8; 78] {
    let mut table = [INVALID; 78];
    let mut i = 0;
    while i < ENCODING_TABLE.len() {
        table[(ENCODING_TABLE[i] - b'-') as usize] = i as u8;
        i += 1;
    }
    table
}

fn decode_char(character: char) -> Option<u8> {
    let index = (character as u32).checked_sub(DECODING_OFFSET)? as usize;
    match DECODING_TABLE.get(index) {
        Some(&value) if value != INVALID => Some(value),
        _ => None,
    }
}

/// Lazy, forward-only iterator over the unsigned values of an encoded string.
///
/// Yields `Err` at most once; after an error the iterator is exhausted.
#[derive(Debug)]
pub struct UnsignedValues<'a> {
    chars: std::str::CharIndices<'a>,
    failed: bool,
}

impl<'a> UnsignedValues<'a> {
    pub fn new(encoded: &'a str) -> Self {
        Self {
            chars: encoded.char_indices(),
            failed: false,
        }
    }

    fn fail(&mut self, fault: EncodingFault) -> Option<Result<u64, DecodeError>> {
        self.failed = true;
        Some(Err(DecodeError::InvalidEncoding(fault)))
    }
}

impl Iterator for UnsignedValues<'_> {
    type Item = Result<u64, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut result: u64 = 0;
        let mut shift: u32 = 0;
        while let Some((position, character)) = self.chars.next() {
            let Some(value) = decode_char(character) else {
                return self.fail(EncodingFault::InvalidCharacter {
                    position,
                    character,
                });
            };

            let chunk = u64::from(value & 0x1F);
            if shift >= u64::BITS || (chunk << shift) >> shift != chunk {
                return self.fail(EncodingFault::Overflow);
            }
            result |= chunk << shift;

            if value & 0x20 == 0 {
                return Some(Ok(result));
            }
            shift += 5;
        }

        if shift > 0 {
            return self.fail(EncodingFault::Truncated);
        }
        None
    }
}

/// Maps a signed value onto the unsigned zig-zag space.
///
/// Negative values land on odd numbers via one's complement.
pub fn zigzag(value: i64) -> u64 {
    let shifted = value << 1;
    if value < 0 {
        !shifted as u64
    } else {
        shifted as u64
    }
}

/// Inverse of [`zigzag`]: odd values are inverted before the shift.
pub fn unzigzag(value: u64) -> i64 {
    let half = (value >> 1) as i64;
    if value & 1 == 1 { !half } else { half }
}

pub(crate) fn push_unsigned(mut value: u64, out: &mut String) {
    while value > 0x1F {
        out.push(ENCODING_TABLE[((value & 0x1F) | 0x20) as usize] as char);
        value >>= 5;
    }
    out.push(ENCODING_TABLE[value as usize] as char);
}

pub(crate) fn push_signed(value: i64, out: &mut String) {
    push_unsigned(zigzag(value), out);
}
