use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// SHA-256 of the input, the base hash primitive of the ledger.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-1 of the input. Only reachable through OP_SHA1.
pub fn sha1(data: &[u8]) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// RIPEMD-160 of the input, the second step of [`hash160`].
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// HASH160: `ripemd160(sha256(data))`, the address-derivation hash used by
/// pay-to-pubkey-hash and pay-to-script-hash outputs.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// HASH256: `sha256(sha256(data))`, the transaction and signature-hash digest.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sha256_empty() {
        assert_eq!(
            sha256(b""),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn sha1_empty() {
        assert_eq!(sha1(b""), hex!("da39a3ee5e6b4b0d3255bfef95601890afd80709"));
    }

    #[test]
    fn sha1_abc() {
        assert_eq!(sha1(b"abc"), hex!("a9993e364706816aba3e25717850c26c9cd0d89d"));
    }

    #[test]
    fn ripemd160_empty() {
        assert_eq!(ripemd160(b""), hex!("9c1185a5c5e9fc54612808977ee8f548b2258d31"));
    }

    #[test]
    fn hash160_empty() {
        assert_eq!(hash160(b""), hex!("b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"));
    }

    #[test]
    fn hash256_empty() {
        assert_eq!(
            hash256(b""),
            hex!("5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456")
        );
    }

    #[test]
    fn hash160_composition() {
        let data = b"composition check";
        assert_eq!(hash160(data), ripemd160(&sha256(data)));
    }

    #[test]
    fn hash256_composition() {
        let data = b"composition check";
        assert_eq!(hash256(data), sha256(&sha256(data)));
    }
}
