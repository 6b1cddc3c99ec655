//! Signature-hash construction.
//!
//! A signature commits to a digest derived from the spending transaction,
//! the subscript in effect at the CHECKSIG, and a one-byte hash type. The
//! construction here must be byte-exact: the historical quirks (the
//! SIGHASH_SINGLE out-of-range constant, blanked outputs serializing value
//! -1) are consensus behavior, not bugs to fix.

use crate::hash::hash256;
use crate::opcode::{codes, ParsedOpcode};
use crate::script::{remove_opcode, serialize};
use crate::tx::{Transaction, TxOut};

/// Commit to all inputs and outputs (the default).
pub const SIG_HASH_ALL: u8 = 0x01;
/// Commit to no outputs; other inputs' sequences are blanked.
pub const SIG_HASH_NONE: u8 = 0x02;
/// Commit only to the output paired with the signed input.
pub const SIG_HASH_SINGLE: u8 = 0x03;
/// Modifier bit: commit only to the signed input.
pub const SIG_HASH_ANY_ONE_CAN_PAY: u8 = 0x80;
/// Mask selecting the base hash type from the flag byte.
pub const SIG_HASH_MASK: u8 = 0x1f;

/// Compute the 32-byte digest a signature over input `idx` commits to.
///
/// `subscript` is the tail of the executing public-key script from the last
/// OP_CODESEPARATOR onward, with pushes of the signature itself already
/// removed by the caller.
pub fn calc_signature_hash(
    subscript: &[ParsedOpcode],
    hash_type: u8,
    tx: &Transaction,
    idx: usize,
) -> [u8; 32] {
    // Historical wart: SIGHASH_SINGLE with no matching output signs the
    // constant 1 instead of a transaction digest.
    if hash_type & SIG_HASH_MASK == SIG_HASH_SINGLE && idx >= tx.outputs.len() {
        let mut digest = [0u8; 32];
        digest[0] = 0x01;
        return digest;
    }

    hash256(&preimage(subscript, hash_type, tx, idx))
}

/// The serialized buffer that gets double-hashed.
fn preimage(subscript: &[ParsedOpcode], hash_type: u8, tx: &Transaction, idx: usize) -> Vec<u8> {
    // Remaining separators never make it into the digest.
    let script = serialize(&remove_opcode(subscript, codes::OP_CODESEPARATOR));

    let mut tx_copy = tx.clone();
    for (i, input) in tx_copy.inputs.iter_mut().enumerate() {
        input.signature_script = if i == idx { script.clone() } else { Vec::new() };
    }

    match hash_type & SIG_HASH_MASK {
        SIG_HASH_NONE => {
            tx_copy.outputs.clear();
            for (i, input) in tx_copy.inputs.iter_mut().enumerate() {
                if i != idx {
                    input.sequence = 0;
                }
            }
        }
        SIG_HASH_SINGLE => {
            tx_copy.outputs.truncate(idx + 1);
            for output in tx_copy.outputs.iter_mut().take(idx) {
                *output = TxOut { value: -1, pk_script: Vec::new() };
            }
            for (i, input) in tx_copy.inputs.iter_mut().enumerate() {
                if i != idx {
                    input.sequence = 0;
                }
            }
        }
        // SIG_HASH_ALL and any unrecognized base type leave the copy as-is.
        _ => {}
    }

    if hash_type & SIG_HASH_ANY_ONE_CAN_PAY != 0 {
        tx_copy.inputs = vec![tx_copy.inputs[idx].clone()];
    }

    let mut buf = tx_copy.serialize();
    buf.extend_from_slice(&(hash_type as u32).to_le_bytes());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use crate::tx::{OutPoint, TxIn};

    fn two_in_two_out() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![
                TxIn {
                    previous_outpoint: OutPoint { hash: [0xaa; 32], index: 0 },
                    signature_script: vec![0x51, 0x52],
                    sequence: 0xffffffff,
                },
                TxIn {
                    previous_outpoint: OutPoint { hash: [0xbb; 32], index: 1 },
                    signature_script: vec![0x53],
                    sequence: 0xffffffff,
                },
            ],
            outputs: vec![
                TxOut { value: 1000, pk_script: vec![0x51] },
                TxOut { value: 2000, pk_script: vec![0x52] },
            ],
            lock_time: 0,
        }
    }

    fn subscript() -> Vec<crate::opcode::ParsedOpcode> {
        parse_script(&[0x76, 0xa9, 0x02, 0x01, 0x02, 0x88, 0xac]).unwrap()
    }

    #[test]
    fn preimage_replaces_scripts() {
        let tx = two_in_two_out();
        let buf = preimage(&subscript(), SIG_HASH_ALL, &tx, 0);

        // Input 0 carries the subscript, input 1 an empty script; the
        // original signature scripts never appear.
        let sub = serialize(&subscript());
        assert!(buf.windows(sub.len()).any(|w| w == sub.as_slice()));
        // Input 1's script varint is 0 (offset: 4 ver + 1 count + 36 outpoint
        // + 1 + 7 script + 4 seq + 36 outpoint).
        assert_eq!(buf[4 + 1 + 36 + 1 + 7 + 4 + 36], 0);
        // Trailing hash type word.
        assert_eq!(&buf[buf.len() - 4..], &[1, 0, 0, 0]);
    }

    #[test]
    fn preimage_strips_code_separators() {
        let tx = two_in_two_out();
        let with_sep = parse_script(&[0x51, 0xab, 0x52]).unwrap();
        let without_sep = parse_script(&[0x51, 0x52]).unwrap();
        assert_eq!(
            preimage(&with_sep, SIG_HASH_ALL, &tx, 0),
            preimage(&without_sep, SIG_HASH_ALL, &tx, 0)
        );
    }

    #[test]
    fn sighash_none_drops_outputs_and_blanks_sequences() {
        let tx = two_in_two_out();
        let buf = preimage(&subscript(), SIG_HASH_NONE, &tx, 0);
        // Output count varint is 0, immediately before the 4-byte locktime
        // and 4-byte hash type at the tail.
        assert_eq!(buf[buf.len() - 9], 0);
        // Input 1's sequence (last 4 bytes before output count) is zero.
        assert_eq!(&buf[buf.len() - 13..buf.len() - 9], &[0, 0, 0, 0]);
    }

    #[test]
    fn sighash_single_blanks_earlier_outputs() {
        let tx = two_in_two_out();
        let buf = preimage(&subscript(), SIG_HASH_SINGLE, &tx, 1);
        // Output 0 serializes as value -1 with an empty script.
        let blanked: &[u8] = &[0xff; 8];
        assert!(buf.windows(8).any(|w| w == blanked));
        // Both outputs are still present.
        let digest_all = calc_signature_hash(&subscript(), SIG_HASH_SINGLE, &tx, 1);
        let digest_other = calc_signature_hash(&subscript(), SIG_HASH_ALL, &tx, 1);
        assert_ne!(digest_all, digest_other);
    }

    #[test]
    fn sighash_single_out_of_range_is_the_constant_one() {
        let tx = two_in_two_out();
        let mut tx = tx;
        tx.inputs.push(tx.inputs[0].clone());
        let digest = calc_signature_hash(&subscript(), SIG_HASH_SINGLE, &tx, 2);
        let mut expected = [0u8; 32];
        expected[0] = 0x01;
        assert_eq!(digest, expected);

        // The ANYONECANPAY bit does not bypass the wart.
        let digest = calc_signature_hash(
            &subscript(),
            SIG_HASH_SINGLE | SIG_HASH_ANY_ONE_CAN_PAY,
            &tx,
            2,
        );
        assert_eq!(digest, expected);
    }

    #[test]
    fn anyonecanpay_keeps_only_signed_input() {
        let tx = two_in_two_out();
        let solo = preimage(&subscript(), SIG_HASH_ALL | SIG_HASH_ANY_ONE_CAN_PAY, &tx, 1);
        // Input count is 1 and the only outpoint is input 1's.
        assert_eq!(solo[4], 1);
        assert_eq!(&solo[5..37], &[0xbb; 32]);
    }

    #[test]
    fn hash_types_commit_to_different_digests() {
        let tx = two_in_two_out();
        let all = calc_signature_hash(&subscript(), SIG_HASH_ALL, &tx, 0);
        let none = calc_signature_hash(&subscript(), SIG_HASH_NONE, &tx, 0);
        let single = calc_signature_hash(&subscript(), SIG_HASH_SINGLE, &tx, 0);
        assert_ne!(all, none);
        assert_ne!(all, single);
        assert_ne!(none, single);
    }

    #[test]
    fn digest_is_deterministic() {
        let tx = two_in_two_out();
        let a = calc_signature_hash(&subscript(), SIG_HASH_ALL, &tx, 0);
        let b = calc_signature_hash(&subscript(), SIG_HASH_ALL, &tx, 0);
        assert_eq!(a, b);
    }
}
