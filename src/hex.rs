use crate::error::ScriptError;

/// Decode a hexadecimal string into a byte vector.
///
/// Accepts upper- and lowercase digits, no `0x` prefix.
///
/// # Errors
///
/// Returns [`ScriptError::InvalidHex`] on odd length or a non-hex character.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, ScriptError> {
    if hex.len() % 2 != 0 {
        return Err(ScriptError::InvalidHex);
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);

    for i in (0..hex.len()).step_by(2) {
        let pair = hex.get(i..i + 2).ok_or(ScriptError::InvalidHex)?;
        let byte = u8::from_str_radix(pair, 16).map_err(|_| ScriptError::InvalidHex)?;
        bytes.push(byte);
    }

    Ok(bytes)
}

/// Encode bytes as a lowercase hex string. Used by the disassembler to
/// render data pushes.
pub fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_empty() {
        assert_eq!(decode_hex("").unwrap(), vec![]);
    }

    #[test]
    fn decode_mixed_case() {
        assert_eq!(decode_hex("aAbB").unwrap(), vec![0xaa, 0xbb]);
        assert_eq!(decode_hex("FF").unwrap(), vec![0xff]);
    }

    #[test]
    fn decode_odd_length() {
        assert_eq!(decode_hex("abc"), Err(ScriptError::InvalidHex));
    }

    #[test]
    fn decode_bad_characters() {
        assert_eq!(decode_hex("zz"), Err(ScriptError::InvalidHex));
        assert_eq!(decode_hex("0x00"), Err(ScriptError::InvalidHex));
    }

    #[test]
    fn encode_is_lowercase() {
        assert_eq!(encode_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(encode_hex(&[]), "");
    }

    #[test]
    fn round_trip() {
        let bytes = vec![0x00, 0x7f, 0x80, 0xff];
        assert_eq!(decode_hex(&encode_hex(&bytes)).unwrap(), bytes);
    }
}
