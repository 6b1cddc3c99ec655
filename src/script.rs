//! Script parsing, re-serialization, and disassembly.
//!
//! The parser walks raw script bytes and produces [`ParsedOpcode`]s using
//! the length shapes in the opcode table. It accepts invalid, disabled, and
//! reserved opcodes verbatim — legality is the engine's concern at execution
//! time. The only parse failure is running out of bytes mid-push.

use crate::error::ScriptError;
use crate::hex::decode_hex;
use crate::opcode::{self, codes, ParsedOpcode};

/// Scripts above this many bytes are rejected at engine construction.
pub const MAX_SCRIPT_SIZE: usize = 10000;

/// Parse raw script bytes into opcodes.
///
/// # Errors
///
/// Returns [`ScriptError::ShortScript`] if a push instruction's declared
/// data extends past the end of the script.
pub fn parse_script(bytes: &[u8]) -> Result<Vec<ParsedOpcode>, ScriptError> {
    let mut ops = Vec::new();
    let mut pos = 0;
    let len = bytes.len();

    while pos < len {
        let code = bytes[pos];
        pos += 1;

        match opcode::info(code).length {
            1 => ops.push(ParsedOpcode::op(code)),

            // Direct push: the opcode byte itself fixes the data length.
            n if n > 1 => {
                let need = (n - 1) as usize;
                if pos + need > len {
                    return Err(ScriptError::ShortScript);
                }
                ops.push(ParsedOpcode { code, data: bytes[pos..pos + need].to_vec() });
                pos += need;
            }

            // Prefixed push: a 1/2/4-byte little-endian length follows.
            prefix => {
                let width = prefix.unsigned_abs() as usize;
                if pos + width > len {
                    return Err(ScriptError::ShortScript);
                }
                let mut need = 0usize;
                for (i, byte) in bytes[pos..pos + width].iter().enumerate() {
                    need |= (*byte as usize) << (8 * i);
                }
                pos += width;
                if pos + need > len {
                    return Err(ScriptError::ShortScript);
                }
                ops.push(ParsedOpcode { code, data: bytes[pos..pos + need].to_vec() });
                pos += need;
            }
        }
    }

    Ok(ops)
}

/// Parse a hex-encoded script string.
pub fn parse_script_hex(hex: &str) -> Result<Vec<ParsedOpcode>, ScriptError> {
    parse_script(&decode_hex(hex)?)
}

/// Re-emit parsed opcodes as script bytes, reproducing the exact encoding
/// they were parsed from.
pub fn serialize(ops: &[ParsedOpcode]) -> Vec<u8> {
    let mut out = Vec::new();
    for op in ops {
        op.serialize_into(&mut out);
    }
    out
}

/// Disassemble raw script bytes into a single space-joined line.
///
/// Parse errors are propagated, not hidden.
pub fn disasm(bytes: &[u8]) -> Result<String, ScriptError> {
    let ops = parse_script(bytes)?;
    Ok(ops
        .iter()
        .map(ParsedOpcode::disasm)
        .collect::<Vec<_>>()
        .join(" "))
}

/// Remove every data push whose payload equals `data`. Used to strip
/// signatures out of the subscript before hashing, since a signature cannot
/// commit to itself.
pub fn remove_data_push(ops: &[ParsedOpcode], data: &[u8]) -> Vec<ParsedOpcode> {
    if data.is_empty() {
        return ops.to_vec();
    }
    ops.iter()
        .filter(|op| op.info().length == 1 || op.data != data)
        .cloned()
        .collect()
}

/// Remove every occurrence of a plain opcode.
pub fn remove_opcode(ops: &[ParsedOpcode], code: u8) -> Vec<ParsedOpcode> {
    ops.iter().filter(|op| op.code != code).cloned().collect()
}

/// Whether a parsed public-key script is the pay-to-script-hash pattern:
/// `OP_HASH160 <20-byte hash> OP_EQUAL`.
pub fn is_pay_to_script_hash(ops: &[ParsedOpcode]) -> bool {
    ops.len() == 3
        && ops[0].code == codes::OP_HASH160
        && ops[1].code == codes::OP_DATA_20
        && ops[2].code == codes::OP_EQUAL
}

/// Whether a parsed script consists solely of push opcodes.
pub fn is_push_only(ops: &[ParsedOpcode]) -> bool {
    ops.iter().all(ParsedOpcode::is_push)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script() {
        assert!(parse_script(&[]).unwrap().is_empty());
    }

    #[test]
    fn single_opcode() {
        let ops = parse_script(&[0x76]).unwrap();
        assert_eq!(ops, vec![ParsedOpcode::op(codes::OP_DUP)]);
    }

    #[test]
    fn direct_push() {
        let ops = parse_script(&[0x03, 0xaa, 0xbb, 0xcc]).unwrap();
        assert_eq!(ops, vec![ParsedOpcode { code: 0x03, data: vec![0xaa, 0xbb, 0xcc] }]);
    }

    #[test]
    fn direct_push_truncated() {
        assert_eq!(parse_script(&[0x03, 0xaa, 0xbb]), Err(ScriptError::ShortScript));
    }

    #[test]
    fn pushdata1() {
        let ops = parse_script(&[0x4c, 0x02, 0xde, 0xad]).unwrap();
        assert_eq!(
            ops,
            vec![ParsedOpcode { code: codes::OP_PUSHDATA1, data: vec![0xde, 0xad] }]
        );
    }

    #[test]
    fn pushdata1_missing_length() {
        assert_eq!(parse_script(&[0x4c]), Err(ScriptError::ShortScript));
    }

    #[test]
    fn pushdata1_truncated_data() {
        assert_eq!(parse_script(&[0x4c, 0x05, 0x01, 0x02]), Err(ScriptError::ShortScript));
    }

    #[test]
    fn pushdata1_zero_length() {
        let ops = parse_script(&[0x4c, 0x00]).unwrap();
        assert_eq!(ops, vec![ParsedOpcode { code: codes::OP_PUSHDATA1, data: vec![] }]);
    }

    #[test]
    fn pushdata2() {
        let ops = parse_script(&[0x4d, 0x03, 0x00, 0xaa, 0xbb, 0xcc]).unwrap();
        assert_eq!(ops[0].data, vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn pushdata2_missing_length() {
        assert_eq!(parse_script(&[0x4d, 0x03]), Err(ScriptError::ShortScript));
    }

    #[test]
    fn pushdata4() {
        let ops = parse_script(&[0x4e, 0x03, 0x00, 0x00, 0x00, 0xaa, 0xbb, 0xcc]).unwrap();
        assert_eq!(ops[0].data, vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn pushdata4_missing_length() {
        assert_eq!(parse_script(&[0x4e, 0x01, 0x00]), Err(ScriptError::ShortScript));
    }

    #[test]
    fn illegal_opcodes_parse_fine() {
        // Legality is checked at execution time, not parse time.
        assert!(parse_script(&[0x50]).unwrap()[0].is_reserved());
        assert!(parse_script(&[0x7e]).unwrap()[0].is_disabled());
        assert!(parse_script(&[0xba]).unwrap()[0].is_invalid());
    }

    #[test]
    fn p2pkh_script_shape() {
        let mut script = vec![0x76, 0xa9, 0x14];
        script.extend_from_slice(&[0xab; 20]);
        script.push(0x88);
        script.push(0xac);
        let ops = parse_script(&script).unwrap();
        assert_eq!(ops.len(), 5);
        assert_eq!(ops[0].code, codes::OP_DUP);
        assert_eq!(ops[2].data, vec![0xab; 20]);
        assert_eq!(ops[4].code, codes::OP_CHECKSIG);
    }

    #[test]
    fn serialize_round_trips() {
        let scripts: [&[u8]; 5] = [
            &[0x51, 0x51, 0x87],
            &[0x03, 0xaa, 0xbb, 0xcc, 0x76],
            &[0x4c, 0x02, 0xde, 0xad],
            &[0x4d, 0x01, 0x00, 0x5a],
            &[0x4e, 0x01, 0x00, 0x00, 0x00, 0x5a],
        ];
        for script in scripts {
            let ops = parse_script(script).unwrap();
            assert_eq!(serialize(&ops), script, "round trip of {script:02x?}");
        }
    }

    #[test]
    fn parse_hex_wrapper() {
        let ops = parse_script_hex("515187").unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(parse_script_hex("zz"), Err(ScriptError::InvalidHex));
    }

    #[test]
    fn disasm_line() {
        let mut script = vec![0x76, 0xa9, 0x02, 0xab, 0xcd];
        script.push(0x88);
        assert_eq!(disasm(&script).unwrap(), "OP_DUP OP_HASH160 abcd OP_EQUALVERIFY");
    }

    #[test]
    fn disasm_propagates_parse_errors() {
        assert_eq!(disasm(&[0x4c]), Err(ScriptError::ShortScript));
    }

    #[test]
    fn remove_data_push_by_equality() {
        let ops = parse_script(&[0x02, 0xaa, 0xbb, 0x51, 0x02, 0xaa, 0xbb]).unwrap();
        let cleaned = remove_data_push(&ops, &[0xaa, 0xbb]);
        assert_eq!(cleaned, vec![ParsedOpcode::op(codes::OP_1)]);

        // A different payload is left alone.
        let kept = remove_data_push(&ops, &[0xaa]);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn remove_data_push_empty_target_is_noop() {
        let ops = parse_script(&[0x00, 0x51]).unwrap();
        assert_eq!(remove_data_push(&ops, &[]).len(), 2);
    }

    #[test]
    fn remove_opcode_strips_code_separators() {
        let ops = parse_script(&[0x51, 0xab, 0x52, 0xab]).unwrap();
        let cleaned = remove_opcode(&ops, codes::OP_CODESEPARATOR);
        assert_eq!(
            cleaned,
            vec![ParsedOpcode::op(codes::OP_1), ParsedOpcode::op(codes::OP_2)]
        );
    }

    #[test]
    fn p2sh_pattern() {
        let mut script = vec![0xa9, 0x14];
        script.extend_from_slice(&[0x11; 20]);
        script.push(0x87);
        assert!(is_pay_to_script_hash(&parse_script(&script).unwrap()));

        // A 19-byte hash push is not the pattern.
        let mut script = vec![0xa9, 0x13];
        script.extend_from_slice(&[0x11; 19]);
        script.push(0x87);
        assert!(!is_pay_to_script_hash(&parse_script(&script).unwrap()));
    }

    #[test]
    fn push_only_classification() {
        let pushy = parse_script(&[0x00, 0x4f, 0x51, 0x60, 0x02, 0xaa, 0xbb]).unwrap();
        assert!(is_push_only(&pushy));
        let not_pushy = parse_script(&[0x51, 0x76]).unwrap();
        assert!(!is_push_only(&not_pushy));
    }
}
