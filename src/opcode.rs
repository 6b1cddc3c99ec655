//! The opcode table and the parsed-opcode representation.
//!
//! Every byte value 0..=255 has a table entry giving its printable name, its
//! length shape, and whether it is executable, disabled, reserved, or
//! unassigned. The name strings and the table order are part of the public
//! contract: the disassembler renders from them.

use crate::hex::encode_hex;

/// Raw opcode byte values, named per the published assignments.
pub mod codes {
    pub const OP_0: u8 = 0x00;
    pub const OP_DATA_1: u8 = 0x01;
    pub const OP_DATA_20: u8 = 0x14;
    pub const OP_DATA_32: u8 = 0x20;
    pub const OP_DATA_33: u8 = 0x21;
    pub const OP_DATA_65: u8 = 0x41;
    pub const OP_DATA_75: u8 = 0x4b;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_1NEGATE: u8 = 0x4f;
    pub const OP_RESERVED: u8 = 0x50;
    pub const OP_1: u8 = 0x51;
    pub const OP_2: u8 = 0x52;
    pub const OP_3: u8 = 0x53;
    pub const OP_4: u8 = 0x54;
    pub const OP_5: u8 = 0x55;
    pub const OP_6: u8 = 0x56;
    pub const OP_7: u8 = 0x57;
    pub const OP_8: u8 = 0x58;
    pub const OP_9: u8 = 0x59;
    pub const OP_10: u8 = 0x5a;
    pub const OP_11: u8 = 0x5b;
    pub const OP_12: u8 = 0x5c;
    pub const OP_13: u8 = 0x5d;
    pub const OP_14: u8 = 0x5e;
    pub const OP_15: u8 = 0x5f;
    pub const OP_16: u8 = 0x60;
    pub const OP_NOP: u8 = 0x61;
    pub const OP_VER: u8 = 0x62;
    pub const OP_IF: u8 = 0x63;
    pub const OP_NOTIF: u8 = 0x64;
    pub const OP_VERIF: u8 = 0x65;
    pub const OP_VERNOTIF: u8 = 0x66;
    pub const OP_ELSE: u8 = 0x67;
    pub const OP_ENDIF: u8 = 0x68;
    pub const OP_VERIFY: u8 = 0x69;
    pub const OP_RETURN: u8 = 0x6a;
    pub const OP_TOALTSTACK: u8 = 0x6b;
    pub const OP_FROMALTSTACK: u8 = 0x6c;
    pub const OP_2DROP: u8 = 0x6d;
    pub const OP_2DUP: u8 = 0x6e;
    pub const OP_3DUP: u8 = 0x6f;
    pub const OP_2OVER: u8 = 0x70;
    pub const OP_2ROT: u8 = 0x71;
    pub const OP_2SWAP: u8 = 0x72;
    pub const OP_IFDUP: u8 = 0x73;
    pub const OP_DEPTH: u8 = 0x74;
    pub const OP_DROP: u8 = 0x75;
    pub const OP_DUP: u8 = 0x76;
    pub const OP_NIP: u8 = 0x77;
    pub const OP_OVER: u8 = 0x78;
    pub const OP_PICK: u8 = 0x79;
    pub const OP_ROLL: u8 = 0x7a;
    pub const OP_ROT: u8 = 0x7b;
    pub const OP_SWAP: u8 = 0x7c;
    pub const OP_TUCK: u8 = 0x7d;
    pub const OP_CAT: u8 = 0x7e;
    pub const OP_SUBSTR: u8 = 0x7f;
    pub const OP_LEFT: u8 = 0x80;
    pub const OP_RIGHT: u8 = 0x81;
    pub const OP_SIZE: u8 = 0x82;
    pub const OP_INVERT: u8 = 0x83;
    pub const OP_AND: u8 = 0x84;
    pub const OP_OR: u8 = 0x85;
    pub const OP_XOR: u8 = 0x86;
    pub const OP_EQUAL: u8 = 0x87;
    pub const OP_EQUALVERIFY: u8 = 0x88;
    pub const OP_RESERVED1: u8 = 0x89;
    pub const OP_RESERVED2: u8 = 0x8a;
    pub const OP_1ADD: u8 = 0x8b;
    pub const OP_1SUB: u8 = 0x8c;
    pub const OP_2MUL: u8 = 0x8d;
    pub const OP_2DIV: u8 = 0x8e;
    pub const OP_NEGATE: u8 = 0x8f;
    pub const OP_ABS: u8 = 0x90;
    pub const OP_NOT: u8 = 0x91;
    pub const OP_0NOTEQUAL: u8 = 0x92;
    pub const OP_ADD: u8 = 0x93;
    pub const OP_SUB: u8 = 0x94;
    pub const OP_MUL: u8 = 0x95;
    pub const OP_DIV: u8 = 0x96;
    pub const OP_MOD: u8 = 0x97;
    pub const OP_LSHIFT: u8 = 0x98;
    pub const OP_RSHIFT: u8 = 0x99;
    pub const OP_BOOLAND: u8 = 0x9a;
    pub const OP_BOOLOR: u8 = 0x9b;
    pub const OP_NUMEQUAL: u8 = 0x9c;
    pub const OP_NUMEQUALVERIFY: u8 = 0x9d;
    pub const OP_NUMNOTEQUAL: u8 = 0x9e;
    pub const OP_LESSTHAN: u8 = 0x9f;
    pub const OP_GREATERTHAN: u8 = 0xa0;
    pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
    pub const OP_GREATERTHANOREQUAL: u8 = 0xa2;
    pub const OP_MIN: u8 = 0xa3;
    pub const OP_MAX: u8 = 0xa4;
    pub const OP_WITHIN: u8 = 0xa5;
    pub const OP_RIPEMD160: u8 = 0xa6;
    pub const OP_SHA1: u8 = 0xa7;
    pub const OP_SHA256: u8 = 0xa8;
    pub const OP_HASH160: u8 = 0xa9;
    pub const OP_HASH256: u8 = 0xaa;
    pub const OP_CODESEPARATOR: u8 = 0xab;
    pub const OP_CHECKSIG: u8 = 0xac;
    pub const OP_CHECKSIGVERIFY: u8 = 0xad;
    pub const OP_CHECKMULTISIG: u8 = 0xae;
    pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;
    pub const OP_NOP1: u8 = 0xb0;
    pub const OP_CHECKLOCKTIMEVERIFY: u8 = 0xb1;
    pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;
    pub const OP_NOP4: u8 = 0xb3;
    pub const OP_NOP5: u8 = 0xb4;
    pub const OP_NOP6: u8 = 0xb5;
    pub const OP_NOP7: u8 = 0xb6;
    pub const OP_NOP8: u8 = 0xb7;
    pub const OP_NOP9: u8 = 0xb8;
    pub const OP_NOP10: u8 = 0xb9;
    pub const OP_SMALLINTEGER: u8 = 0xfa;
    pub const OP_PUBKEYS: u8 = 0xfb;
    pub const OP_PUBKEYHASH: u8 = 0xfd;
    pub const OP_PUBKEY: u8 = 0xfe;
    pub const OP_INVALIDOPCODE: u8 = 0xff;
}

/// How the engine must treat an opcode byte before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeKind {
    /// Has an executable handler.
    Normal,
    /// Fails the whole script when encountered, even inside a skipped branch.
    Disabled,
    /// Fails when executed, inert inside a skipped branch.
    Reserved,
    /// Unassigned byte value; fails when executed.
    Invalid,
}

/// Static metadata for one opcode byte.
///
/// `length` encodes the instruction shape: `1` for a plain opcode, `N > 1`
/// for a push of exactly `N - 1` immediate bytes, and `-1`/`-2`/`-4` for a
/// push whose 1/2/4-byte little-endian length prefix follows the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub value: u8,
    pub name: &'static str,
    pub length: i32,
    pub kind: OpcodeKind,
}

macro_rules! op {
    ($value:expr, $name:expr, $len:expr, $kind:ident) => {
        OpcodeInfo { value: $value, name: $name, length: $len, kind: OpcodeKind::$kind }
    };
}

/// The full table, indexed by opcode byte.
pub const OPCODE_TABLE: [OpcodeInfo; 256] = [
    op!(0x00, "OP_0", 1, Normal),
    op!(0x01, "OP_DATA_1", 2, Normal),
    op!(0x02, "OP_DATA_2", 3, Normal),
    op!(0x03, "OP_DATA_3", 4, Normal),
    op!(0x04, "OP_DATA_4", 5, Normal),
    op!(0x05, "OP_DATA_5", 6, Normal),
    op!(0x06, "OP_DATA_6", 7, Normal),
    op!(0x07, "OP_DATA_7", 8, Normal),
    op!(0x08, "OP_DATA_8", 9, Normal),
    op!(0x09, "OP_DATA_9", 10, Normal),
    op!(0x0a, "OP_DATA_10", 11, Normal),
    op!(0x0b, "OP_DATA_11", 12, Normal),
    op!(0x0c, "OP_DATA_12", 13, Normal),
    op!(0x0d, "OP_DATA_13", 14, Normal),
    op!(0x0e, "OP_DATA_14", 15, Normal),
    op!(0x0f, "OP_DATA_15", 16, Normal),
    op!(0x10, "OP_DATA_16", 17, Normal),
    op!(0x11, "OP_DATA_17", 18, Normal),
    op!(0x12, "OP_DATA_18", 19, Normal),
    op!(0x13, "OP_DATA_19", 20, Normal),
    op!(0x14, "OP_DATA_20", 21, Normal),
    op!(0x15, "OP_DATA_21", 22, Normal),
    op!(0x16, "OP_DATA_22", 23, Normal),
    op!(0x17, "OP_DATA_23", 24, Normal),
    op!(0x18, "OP_DATA_24", 25, Normal),
    op!(0x19, "OP_DATA_25", 26, Normal),
    op!(0x1a, "OP_DATA_26", 27, Normal),
    op!(0x1b, "OP_DATA_27", 28, Normal),
    op!(0x1c, "OP_DATA_28", 29, Normal),
    op!(0x1d, "OP_DATA_29", 30, Normal),
    op!(0x1e, "OP_DATA_30", 31, Normal),
    op!(0x1f, "OP_DATA_31", 32, Normal),
    op!(0x20, "OP_DATA_32", 33, Normal),
    op!(0x21, "OP_DATA_33", 34, Normal),
    op!(0x22, "OP_DATA_34", 35, Normal),
    op!(0x23, "OP_DATA_35", 36, Normal),
    op!(0x24, "OP_DATA_36", 37, Normal),
    op!(0x25, "OP_DATA_37", 38, Normal),
    op!(0x26, "OP_DATA_38", 39, Normal),
    op!(0x27, "OP_DATA_39", 40, Normal),
    op!(0x28, "OP_DATA_40", 41, Normal),
    op!(0x29, "OP_DATA_41", 42, Normal),
    op!(0x2a, "OP_DATA_42", 43, Normal),
    op!(0x2b, "OP_DATA_43", 44, Normal),
    op!(0x2c, "OP_DATA_44", 45, Normal),
    op!(0x2d, "OP_DATA_45", 46, Normal),
    op!(0x2e, "OP_DATA_46", 47, Normal),
    op!(0x2f, "OP_DATA_47", 48, Normal),
    op!(0x30, "OP_DATA_48", 49, Normal),
    op!(0x31, "OP_DATA_49", 50, Normal),
    op!(0x32, "OP_DATA_50", 51, Normal),
    op!(0x33, "OP_DATA_51", 52, Normal),
    op!(0x34, "OP_DATA_52", 53, Normal),
    op!(0x35, "OP_DATA_53", 54, Normal),
    op!(0x36, "OP_DATA_54", 55, Normal),
    op!(0x37, "OP_DATA_55", 56, Normal),
    op!(0x38, "OP_DATA_56", 57, Normal),
    op!(0x39, "OP_DATA_57", 58, Normal),
    op!(0x3a, "OP_DATA_58", 59, Normal),
    op!(0x3b, "OP_DATA_59", 60, Normal),
    op!(0x3c, "OP_DATA_60", 61, Normal),
    op!(0x3d, "OP_DATA_61", 62, Normal),
    op!(0x3e, "OP_DATA_62", 63, Normal),
    op!(0x3f, "OP_DATA_63", 64, Normal),
    op!(0x40, "OP_DATA_64", 65, Normal),
    op!(0x41, "OP_DATA_65", 66, Normal),
    op!(0x42, "OP_DATA_66", 67, Normal),
    op!(0x43, "OP_DATA_67", 68, Normal),
    op!(0x44, "OP_DATA_68", 69, Normal),
    op!(0x45, "OP_DATA_69", 70, Normal),
    op!(0x46, "OP_DATA_70", 71, Normal),
    op!(0x47, "OP_DATA_71", 72, Normal),
    op!(0x48, "OP_DATA_72", 73, Normal),
    op!(0x49, "OP_DATA_73", 74, Normal),
    op!(0x4a, "OP_DATA_74", 75, Normal),
    op!(0x4b, "OP_DATA_75", 76, Normal),
    op!(0x4c, "OP_PUSHDATA1", -1, Normal),
    op!(0x4d, "OP_PUSHDATA2", -2, Normal),
    op!(0x4e, "OP_PUSHDATA4", -4, Normal),
    op!(0x4f, "OP_1NEGATE", 1, Normal),
    op!(0x50, "OP_RESERVED", 1, Reserved),
    op!(0x51, "OP_1", 1, Normal),
    op!(0x52, "OP_2", 1, Normal),
    op!(0x53, "OP_3", 1, Normal),
    op!(0x54, "OP_4", 1, Normal),
    op!(0x55, "OP_5", 1, Normal),
    op!(0x56, "OP_6", 1, Normal),
    op!(0x57, "OP_7", 1, Normal),
    op!(0x58, "OP_8", 1, Normal),
    op!(0x59, "OP_9", 1, Normal),
    op!(0x5a, "OP_10", 1, Normal),
    op!(0x5b, "OP_11", 1, Normal),
    op!(0x5c, "OP_12", 1, Normal),
    op!(0x5d, "OP_13", 1, Normal),
    op!(0x5e, "OP_14", 1, Normal),
    op!(0x5f, "OP_15", 1, Normal),
    op!(0x60, "OP_16", 1, Normal),
    op!(0x61, "OP_NOP", 1, Normal),
    op!(0x62, "OP_VER", 1, Reserved),
    op!(0x63, "OP_IF", 1, Normal),
    op!(0x64, "OP_NOTIF", 1, Normal),
    op!(0x65, "OP_VERIF", 1, Reserved),
    op!(0x66, "OP_VERNOTIF", 1, Reserved),
    op!(0x67, "OP_ELSE", 1, Normal),
    op!(0x68, "OP_ENDIF", 1, Normal),
    op!(0x69, "OP_VERIFY", 1, Normal),
    op!(0x6a, "OP_RETURN", 1, Normal),
    op!(0x6b, "OP_TOALTSTACK", 1, Normal),
    op!(0x6c, "OP_FROMALTSTACK", 1, Normal),
    op!(0x6d, "OP_2DROP", 1, Normal),
    op!(0x6e, "OP_2DUP", 1, Normal),
    op!(0x6f, "OP_3DUP", 1, Normal),
    op!(0x70, "OP_2OVER", 1, Normal),
    op!(0x71, "OP_2ROT", 1, Normal),
    op!(0x72, "OP_2SWAP", 1, Normal),
    op!(0x73, "OP_IFDUP", 1, Normal),
    op!(0x74, "OP_DEPTH", 1, Normal),
    op!(0x75, "OP_DROP", 1, Normal),
    op!(0x76, "OP_DUP", 1, Normal),
    op!(0x77, "OP_NIP", 1, Normal),
    op!(0x78, "OP_OVER", 1, Normal),
    op!(0x79, "OP_PICK", 1, Normal),
    op!(0x7a, "OP_ROLL", 1, Normal),
    op!(0x7b, "OP_ROT", 1, Normal),
    op!(0x7c, "OP_SWAP", 1, Normal),
    op!(0x7d, "OP_TUCK", 1, Normal),
    op!(0x7e, "OP_CAT", 1, Disabled),
    op!(0x7f, "OP_SUBSTR", 1, Disabled),
    op!(0x80, "OP_LEFT", 1, Disabled),
    op!(0x81, "OP_RIGHT", 1, Disabled),
    op!(0x82, "OP_SIZE", 1, Normal),
    op!(0x83, "OP_INVERT", 1, Disabled),
    op!(0x84, "OP_AND", 1, Disabled),
    op!(0x85, "OP_OR", 1, Disabled),
    op!(0x86, "OP_XOR", 1, Disabled),
    op!(0x87, "OP_EQUAL", 1, Normal),
    op!(0x88, "OP_EQUALVERIFY", 1, Normal),
    op!(0x89, "OP_RESERVED1", 1, Reserved),
    op!(0x8a, "OP_RESERVED2", 1, Reserved),
    op!(0x8b, "OP_1ADD", 1, Normal),
    op!(0x8c, "OP_1SUB", 1, Normal),
    op!(0x8d, "OP_2MUL", 1, Disabled),
    op!(0x8e, "OP_2DIV", 1, Disabled),
    op!(0x8f, "OP_NEGATE", 1, Normal),
    op!(0x90, "OP_ABS", 1, Normal),
    op!(0x91, "OP_NOT", 1, Normal),
    op!(0x92, "OP_0NOTEQUAL", 1, Normal),
    op!(0x93, "OP_ADD", 1, Normal),
    op!(0x94, "OP_SUB", 1, Normal),
    op!(0x95, "OP_MUL", 1, Disabled),
    op!(0x96, "OP_DIV", 1, Disabled),
    op!(0x97, "OP_MOD", 1, Disabled),
    op!(0x98, "OP_LSHIFT", 1, Disabled),
    op!(0x99, "OP_RSHIFT", 1, Disabled),
    op!(0x9a, "OP_BOOLAND", 1, Normal),
    op!(0x9b, "OP_BOOLOR", 1, Normal),
    op!(0x9c, "OP_NUMEQUAL", 1, Normal),
    op!(0x9d, "OP_NUMEQUALVERIFY", 1, Normal),
    op!(0x9e, "OP_NUMNOTEQUAL", 1, Normal),
    op!(0x9f, "OP_LESSTHAN", 1, Normal),
    op!(0xa0, "OP_GREATERTHAN", 1, Normal),
    op!(0xa1, "OP_LESSTHANOREQUAL", 1, Normal),
    op!(0xa2, "OP_GREATERTHANOREQUAL", 1, Normal),
    op!(0xa3, "OP_MIN", 1, Normal),
    op!(0xa4, "OP_MAX", 1, Normal),
    op!(0xa5, "OP_WITHIN", 1, Normal),
    op!(0xa6, "OP_RIPEMD160", 1, Normal),
    op!(0xa7, "OP_SHA1", 1, Normal),
    op!(0xa8, "OP_SHA256", 1, Normal),
    op!(0xa9, "OP_HASH160", 1, Normal),
    op!(0xaa, "OP_HASH256", 1, Normal),
    op!(0xab, "OP_CODESEPARATOR", 1, Normal),
    op!(0xac, "OP_CHECKSIG", 1, Normal),
    op!(0xad, "OP_CHECKSIGVERIFY", 1, Normal),
    op!(0xae, "OP_CHECKMULTISIG", 1, Normal),
    op!(0xaf, "OP_CHECKMULTISIGVERIFY", 1, Normal),
    op!(0xb0, "OP_NOP1", 1, Normal),
    op!(0xb1, "OP_CHECKLOCKTIMEVERIFY", 1, Normal),
    op!(0xb2, "OP_CHECKSEQUENCEVERIFY", 1, Normal),
    op!(0xb3, "OP_NOP4", 1, Normal),
    op!(0xb4, "OP_NOP5", 1, Normal),
    op!(0xb5, "OP_NOP6", 1, Normal),
    op!(0xb6, "OP_NOP7", 1, Normal),
    op!(0xb7, "OP_NOP8", 1, Normal),
    op!(0xb8, "OP_NOP9", 1, Normal),
    op!(0xb9, "OP_NOP10", 1, Normal),
    op!(0xba, "OP_UNKNOWN186", 1, Invalid),
    op!(0xbb, "OP_UNKNOWN187", 1, Invalid),
    op!(0xbc, "OP_UNKNOWN188", 1, Invalid),
    op!(0xbd, "OP_UNKNOWN189", 1, Invalid),
    op!(0xbe, "OP_UNKNOWN190", 1, Invalid),
    op!(0xbf, "OP_UNKNOWN191", 1, Invalid),
    op!(0xc0, "OP_UNKNOWN192", 1, Invalid),
    op!(0xc1, "OP_UNKNOWN193", 1, Invalid),
    op!(0xc2, "OP_UNKNOWN194", 1, Invalid),
    op!(0xc3, "OP_UNKNOWN195", 1, Invalid),
    op!(0xc4, "OP_UNKNOWN196", 1, Invalid),
    op!(0xc5, "OP_UNKNOWN197", 1, Invalid),
    op!(0xc6, "OP_UNKNOWN198", 1, Invalid),
    op!(0xc7, "OP_UNKNOWN199", 1, Invalid),
    op!(0xc8, "OP_UNKNOWN200", 1, Invalid),
    op!(0xc9, "OP_UNKNOWN201", 1, Invalid),
    op!(0xca, "OP_UNKNOWN202", 1, Invalid),
    op!(0xcb, "OP_UNKNOWN203", 1, Invalid),
    op!(0xcc, "OP_UNKNOWN204", 1, Invalid),
    op!(0xcd, "OP_UNKNOWN205", 1, Invalid),
    op!(0xce, "OP_UNKNOWN206", 1, Invalid),
    op!(0xcf, "OP_UNKNOWN207", 1, Invalid),
    op!(0xd0, "OP_UNKNOWN208", 1, Invalid),
    op!(0xd1, "OP_UNKNOWN209", 1, Invalid),
    op!(0xd2, "OP_UNKNOWN210", 1, Invalid),
    op!(0xd3, "OP_UNKNOWN211", 1, Invalid),
    op!(0xd4, "OP_UNKNOWN212", 1, Invalid),
    op!(0xd5, "OP_UNKNOWN213", 1, Invalid),
    op!(0xd6, "OP_UNKNOWN214", 1, Invalid),
    op!(0xd7, "OP_UNKNOWN215", 1, Invalid),
    op!(0xd8, "OP_UNKNOWN216", 1, Invalid),
    op!(0xd9, "OP_UNKNOWN217", 1, Invalid),
    op!(0xda, "OP_UNKNOWN218", 1, Invalid),
    op!(0xdb, "OP_UNKNOWN219", 1, Invalid),
    op!(0xdc, "OP_UNKNOWN220", 1, Invalid),
    op!(0xdd, "OP_UNKNOWN221", 1, Invalid),
    op!(0xde, "OP_UNKNOWN222", 1, Invalid),
    op!(0xdf, "OP_UNKNOWN223", 1, Invalid),
    op!(0xe0, "OP_UNKNOWN224", 1, Invalid),
    op!(0xe1, "OP_UNKNOWN225", 1, Invalid),
    op!(0xe2, "OP_UNKNOWN226", 1, Invalid),
    op!(0xe3, "OP_UNKNOWN227", 1, Invalid),
    op!(0xe4, "OP_UNKNOWN228", 1, Invalid),
    op!(0xe5, "OP_UNKNOWN229", 1, Invalid),
    op!(0xe6, "OP_UNKNOWN230", 1, Invalid),
    op!(0xe7, "OP_UNKNOWN231", 1, Invalid),
    op!(0xe8, "OP_UNKNOWN232", 1, Invalid),
    op!(0xe9, "OP_UNKNOWN233", 1, Invalid),
    op!(0xea, "OP_UNKNOWN234", 1, Invalid),
    op!(0xeb, "OP_UNKNOWN235", 1, Invalid),
    op!(0xec, "OP_UNKNOWN236", 1, Invalid),
    op!(0xed, "OP_UNKNOWN237", 1, Invalid),
    op!(0xee, "OP_UNKNOWN238", 1, Invalid),
    op!(0xef, "OP_UNKNOWN239", 1, Invalid),
    op!(0xf0, "OP_UNKNOWN240", 1, Invalid),
    op!(0xf1, "OP_UNKNOWN241", 1, Invalid),
    op!(0xf2, "OP_UNKNOWN242", 1, Invalid),
    op!(0xf3, "OP_UNKNOWN243", 1, Invalid),
    op!(0xf4, "OP_UNKNOWN244", 1, Invalid),
    op!(0xf5, "OP_UNKNOWN245", 1, Invalid),
    op!(0xf6, "OP_UNKNOWN246", 1, Invalid),
    op!(0xf7, "OP_UNKNOWN247", 1, Invalid),
    op!(0xf8, "OP_UNKNOWN248", 1, Invalid),
    op!(0xf9, "OP_UNKNOWN249", 1, Invalid),
    op!(0xfa, "OP_SMALLINTEGER", 1, Invalid),
    op!(0xfb, "OP_PUBKEYS", 1, Invalid),
    op!(0xfc, "OP_UNKNOWN252", 1, Invalid),
    op!(0xfd, "OP_PUBKEYHASH", 1, Invalid),
    op!(0xfe, "OP_PUBKEY", 1, Invalid),
    op!(0xff, "OP_INVALIDOPCODE", 1, Invalid),
];

/// Look up the table entry for an opcode byte.
#[inline]
pub fn info(byte: u8) -> &'static OpcodeInfo {
    &OPCODE_TABLE[byte as usize]
}

/// An opcode together with its immediate data payload, as produced by the
/// parser. Retains the original opcode byte so that re-serialization is
/// byte-identical to the source script even for non-minimal push encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOpcode {
    /// The opcode byte value.
    pub code: u8,
    /// Immediate data; empty for non-push opcodes.
    pub data: Vec<u8>,
}

impl ParsedOpcode {
    /// Construct a plain (data-free) opcode.
    pub fn op(code: u8) -> Self {
        Self { code, data: Vec::new() }
    }

    /// The table entry for this opcode.
    #[inline]
    pub fn info(&self) -> &'static OpcodeInfo {
        info(self.code)
    }

    /// The printable name from the table.
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn is_disabled(&self) -> bool {
        self.info().kind == OpcodeKind::Disabled
    }

    pub fn is_reserved(&self) -> bool {
        self.info().kind == OpcodeKind::Reserved
    }

    pub fn is_invalid(&self) -> bool {
        self.info().kind == OpcodeKind::Invalid
    }

    /// Whether this opcode participates in conditional flow and therefore
    /// runs even inside a skipped branch.
    pub fn is_conditional(&self) -> bool {
        matches!(
            self.code,
            codes::OP_IF | codes::OP_NOTIF | codes::OP_ELSE | codes::OP_ENDIF
        )
    }

    /// Whether this opcode is exempt from the per-script operation budget.
    /// Everything at or below OP_16 counts as a push.
    pub fn is_push(&self) -> bool {
        self.code <= codes::OP_16
    }

    /// Append the wire encoding of this opcode to `out`, reproducing the
    /// exact bytes it was parsed from.
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        out.push(self.code);
        match self.info().length {
            1 => {}
            -1 => {
                out.push(self.data.len() as u8);
                out.extend_from_slice(&self.data);
            }
            -2 => {
                out.extend_from_slice(&(self.data.len() as u16).to_le_bytes());
                out.extend_from_slice(&self.data);
            }
            -4 => {
                out.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
                out.extend_from_slice(&self.data);
            }
            _ => out.extend_from_slice(&self.data),
        }
    }

    /// Render this opcode for disassembly: data pushes become the bare
    /// lowercase hex of their payload, everything else its table name.
    pub fn disasm(&self) -> String {
        if self.info().length == 1 {
            self.name().to_string()
        } else {
            encode_hex(&self.data)
        }
    }
}
