//! Demonstrates script parsing and disassembly.
//!
//! Run with: `cargo run --example inspect`

use txscript::script::{disasm, parse_script_hex};

fn main() {
    // A standard P2PKH scriptPubKey in hex:
    // OP_DUP OP_HASH160 <20-byte pubkey hash> OP_EQUALVERIFY OP_CHECKSIG
    let hex = "76a91489abcdefabbaabbaabbaabbaabbaabbaabbaabba88ac";

    println!("Raw hex: {hex}");
    println!();

    let ops = parse_script_hex(hex).expect("valid hex script");

    println!("Parsed opcodes:");
    for (i, op) in ops.iter().enumerate() {
        println!("  [{i}] {}", op.disasm());
    }

    println!();
    let bytes: Vec<u8> = ops.iter().fold(Vec::new(), |mut buf, op| {
        op.serialize_into(&mut buf);
        buf
    });
    println!("One line: {}", disasm(&bytes).expect("parses"));
}
