//! The signature verifier adapter.
//!
//! Bridges the engine to the `secp256k1` ECDSA implementation: split the
//! hash-type byte off the signature, parse the DER body and the SEC1 public
//! key, compute the digest via [`crate::sighash`], and verify.
//!
//! Malformed keys and signatures appear on-chain; they must produce a false
//! verification result, never abort evaluation.

use log::debug;
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1};

use crate::opcode::ParsedOpcode;
use crate::sighash::calc_signature_hash;
use crate::tx::Transaction;

/// Verify `full_sig` (DER body plus trailing hash-type byte) over input
/// `idx` of `tx` against `pubkey_bytes`, committing to `subscript`.
///
/// Returns `false` — never an error — for empty or undecodable signatures
/// and keys.
pub fn verify_signature(
    pubkey_bytes: &[u8],
    full_sig: &[u8],
    tx: &Transaction,
    idx: usize,
    subscript: &[ParsedOpcode],
) -> bool {
    let Some((&hash_type, der)) = full_sig.split_last() else {
        return false;
    };

    let signature = match Signature::from_der(der) {
        Ok(sig) => sig,
        Err(err) => {
            debug!("rejecting signature ({} bytes): {err}", full_sig.len());
            return false;
        }
    };

    let pubkey = match PublicKey::from_slice(pubkey_bytes) {
        Ok(key) => key,
        Err(err) => {
            debug!("rejecting public key ({} bytes): {err}", pubkey_bytes.len());
            return false;
        }
    };

    let digest = calc_signature_hash(subscript, hash_type, tx, idx);
    let message = Message::from_digest(digest);

    let secp = Secp256k1::verification_only();
    secp.verify_ecdsa(&message, &signature, &pubkey).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use crate::sighash::SIG_HASH_ALL;
    use crate::tx::{OutPoint, TxIn, TxOut};
    use secp256k1::SecretKey;

    fn spend_tx() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TxIn {
                previous_outpoint: OutPoint { hash: [0x42; 32], index: 0 },
                signature_script: Vec::new(),
                sequence: 0xffffffff,
            }],
            outputs: vec![TxOut { value: 900, pk_script: vec![0x51] }],
            lock_time: 0,
        }
    }

    fn subscript() -> Vec<ParsedOpcode> {
        parse_script(&[0x76, 0xa9, 0x88, 0xac]).unwrap()
    }

    fn keypair() -> (SecretKey, PublicKey) {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&[0x0b; 32]).expect("valid key bytes");
        let pk = PublicKey::from_secret_key(&secp, &sk);
        (sk, pk)
    }

    fn sign(sk: &SecretKey, tx: &Transaction, subscript: &[ParsedOpcode]) -> Vec<u8> {
        let secp = Secp256k1::new();
        let digest = calc_signature_hash(subscript, SIG_HASH_ALL, tx, 0);
        let sig = secp.sign_ecdsa(&Message::from_digest(digest), sk);
        let mut full = sig.serialize_der().to_vec();
        full.push(SIG_HASH_ALL);
        full
    }

    #[test]
    fn valid_signature_verifies() {
        let (sk, pk) = keypair();
        let tx = spend_tx();
        let full_sig = sign(&sk, &tx, &subscript());
        assert!(verify_signature(&pk.serialize(), &full_sig, &tx, 0, &subscript()));
    }

    #[test]
    fn uncompressed_key_verifies() {
        let (sk, pk) = keypair();
        let tx = spend_tx();
        let full_sig = sign(&sk, &tx, &subscript());
        assert!(verify_signature(
            &pk.serialize_uncompressed(),
            &full_sig,
            &tx,
            0,
            &subscript()
        ));
    }

    #[test]
    fn wrong_subscript_fails() {
        let (sk, pk) = keypair();
        let tx = spend_tx();
        let full_sig = sign(&sk, &tx, &subscript());
        let other = parse_script(&[0xac]).unwrap();
        assert!(!verify_signature(&pk.serialize(), &full_sig, &tx, 0, &other));
    }

    #[test]
    fn wrong_hash_type_fails() {
        let (sk, pk) = keypair();
        let tx = spend_tx();
        let mut full_sig = sign(&sk, &tx, &subscript());
        *full_sig.last_mut().unwrap() = 0x02;
        assert!(!verify_signature(&pk.serialize(), &full_sig, &tx, 0, &subscript()));
    }

    #[test]
    fn garbage_inputs_return_false_not_error() {
        let tx = spend_tx();
        let ops = subscript();
        assert!(!verify_signature(&[], &[], &tx, 0, &ops));
        assert!(!verify_signature(&[0x02; 33], &[0x01], &tx, 0, &ops));
        assert!(!verify_signature(&[0x00; 33], &[0x30, 0x00, 0x01], &tx, 0, &ops));
        let (sk, _) = keypair();
        let full_sig = sign(&sk, &tx, &ops);
        assert!(!verify_signature(&[0xab; 12], &full_sig, &tx, 0, &ops));
    }
}
