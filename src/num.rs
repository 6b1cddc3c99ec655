//! Canonical "script number" codec.
//!
//! Integers on the stack are variable-length little-endian byte strings with
//! the sign carried in the top bit of the most significant byte. Zero is the
//! empty string. Encoding always emits the minimal form; decoding accepts
//! non-minimal encodings (for example `[0x00, 0x00]` decodes to 0) up to a
//! per-operation byte limit.

use crate::error::ScriptError;

/// The decode limit used by ordinary arithmetic opcodes.
pub const DEFAULT_SCRIPT_NUM_LEN: usize = 4;

/// Encode an integer as a minimal script number.
pub fn encode_num(n: i64) -> Vec<u8> {
    if n == 0 {
        return vec![];
    }

    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut result = Vec::new();

    while abs > 0 {
        result.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // If the most significant byte already carries 0x80 an extra byte is
    // needed to hold the sign; otherwise the sign folds into that byte.
    if result.last().is_some_and(|&b| b & 0x80 != 0) {
        result.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        let len = result.len();
        result[len - 1] |= 0x80;
    }

    result
}

/// Decode a script number of at most `max_len` bytes.
///
/// Any encoding within the limit is accepted, minimal or not.
///
/// # Errors
///
/// Returns [`ScriptError::NumberTooBig`] when the input is longer than
/// `max_len`.
pub fn decode_num(bytes: &[u8], max_len: usize) -> Result<i64, ScriptError> {
    if bytes.len() > max_len {
        return Err(ScriptError::NumberTooBig);
    }
    if bytes.is_empty() {
        return Ok(0);
    }

    let mut result: i64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        result |= (*byte as i64) << (8 * i);
    }

    // The top bit of the most significant byte is the sign, not magnitude.
    let last = *bytes.last().expect("checked non-empty");
    if last & 0x80 != 0 {
        result &= !(0x80i64 << (8 * (bytes.len() - 1)));
        result = -result;
    }
    Ok(result)
}

/// Whether a stack entry is "true".
///
/// False is any representation of zero: the empty string, or all zero bytes
/// where the final byte may instead be 0x80 (negative zero). Everything else
/// is true.
pub fn cast_to_bool(bytes: &[u8]) -> bool {
    for (i, byte) in bytes.iter().enumerate() {
        if *byte != 0 {
            return !(i == bytes.len() - 1 && *byte == 0x80);
        }
    }
    false
}
