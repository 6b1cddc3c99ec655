//! A stack-based transaction script engine for Bitcoin-like ledgers.
//!
//! Scripts are the byte-encoded programs that lock transaction outputs and
//! unlock them when spent. This crate implements the full legacy instruction
//! set and the execution model used to validate a spend: given the spender's
//! signature script, the output's public-key script, the spending
//! transaction and the input index, the [`engine::Engine`] decides whether
//! the spend is authorized — or fails with a precise
//! [`error::ScriptError`].
//!
//! # What this crate implements
//!
//! - **Opcode table**: all 256 byte values with their published names,
//!   length shapes, and disabled/reserved/unassigned classification.
//! - **Parser and disassembler**: all four push-data encodings, with
//!   byte-identical re-serialization of parsed scripts.
//! - **Execution engine**: dual data/alt stacks, nested conditionals,
//!   arithmetic on canonical script numbers, hashing opcodes, signature
//!   checks, and pay-to-script-hash redeem-script promotion.
//! - **Signature hashing**: the legacy sighash preimage for every hash type,
//!   including its historical warts, which are preserved bit-for-bit.
//! - **ECDSA verification**: DER signatures and SEC1 public keys over
//!   secp256k1.
//!
//! # What is NOT implemented
//!
//! - Script construction, signing, or template building
//! - SegWit, Taproot, or any witness-based script types
//! - Locktime enforcement (the upgradable NOPs execute as NOPs)
//!
//! # Execution model
//!
//! The signature script runs first, the public-key script second, on a
//! shared stack. A spend is authorized when every opcode executes without
//! error and the final stack top is true. Failed signature checks are not
//! errors: they push false and the script decides what that means.
//!
//! # Quick example
//!
//! ```rust
//! use txscript::engine::Engine;
//! use txscript::tx::{OutPoint, Transaction, TxIn, TxOut};
//!
//! let tx = Transaction {
//!     version: 1,
//!     inputs: vec![TxIn {
//!         previous_outpoint: OutPoint { hash: [0; 32], index: 0 },
//!         signature_script: vec![],
//!         sequence: 0xffffffff,
//!     }],
//!     outputs: vec![TxOut { value: 1000, pk_script: vec![] }],
//!     lock_time: 0,
//! };
//!
//! // Signature script pushes 4; public-key script checks 2 + 2 == 4.
//! let mut engine = Engine::new(&[0x54], &[0x52, 0x52, 0x93, 0x87], 0, tx, 1000, true).unwrap();
//! assert!(engine.execute().is_ok());
//! ```

pub mod checksig;
pub mod cond;
pub mod engine;
pub mod error;
pub mod hash;
pub mod hex;
pub mod num;
pub mod opcode;
pub mod script;
pub mod sighash;
pub mod stack;
pub mod tx;

pub use engine::Engine;
pub use error::ScriptError;
pub use script::disasm;
