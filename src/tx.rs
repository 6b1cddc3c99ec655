//! Transaction data model and reference wire serialization.
//!
//! The engine only needs transactions for one purpose: building the
//! signature-hash preimage. Serialization therefore follows the reference
//! wire format exactly — little-endian integers and varint-prefixed
//! collections — because the resulting bytes feed straight into the digest
//! a signature commits to.

/// Reference to the output being spent by an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutPoint {
    /// Transaction id of the funding transaction, as it appears on the wire.
    pub hash: [u8; 32],
    /// Output index within that transaction.
    pub index: u32,
}

/// One transaction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub previous_outpoint: OutPoint,
    /// The unlocking script supplied by the spender.
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

/// One transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    /// Amount in base units. May be -1 inside sighash preimages, where
    /// "blanked" outputs serialize the all-ones value.
    pub value: i64,
    /// The locking script.
    pub pk_script: Vec<u8>,
}

/// A transaction, sufficient for script evaluation and sighash construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Serialize into the reference wire format.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.version.to_le_bytes());

        write_varint(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(&input.previous_outpoint.hash);
            buf.extend_from_slice(&input.previous_outpoint.index.to_le_bytes());
            write_varint(&mut buf, input.signature_script.len() as u64);
            buf.extend_from_slice(&input.signature_script);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_varint(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_varint(&mut buf, output.pk_script.len() as u64);
            buf.extend_from_slice(&output.pk_script);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }
}

/// Append a wire-format variable-length integer.
pub fn write_varint(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}
