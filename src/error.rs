/// All error conditions that can arise during script parsing or execution.
///
/// Every failure the engine surfaces is one of these kinds. Evaluation is
/// total: the same scripts, transaction and input index always produce the
/// same outcome. A failed cryptographic check is *not* an error — it leaves
/// a false value on the stack and may surface later as [`ScriptError::EvalFalse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Script byte stream ended in the middle of a push instruction.
    ShortScript,

    /// An opcode marked as unassigned was executed.
    InvalidOpcode(u8),

    /// A disabled opcode was encountered, even inside a skipped branch.
    OpDisabled(u8),

    /// A reserved opcode was executed.
    ReservedOpcode(u8),

    /// Stack had fewer elements than the operation required.
    Underflow,

    /// A stack manipulator was called with a non-positive count.
    InvalidArgs,

    /// Integer decode exceeded the permitted byte length.
    NumberTooBig,

    /// CHECKMULTISIG public-key count outside 1..=20.
    TooManyPubkeys,

    /// OP_VERIFY or one of its fused forms consumed a false value.
    VerifyFailed,

    /// Execution completed but the stack is empty or the top element is false.
    EvalFalse,

    /// OP_ELSE or OP_ENDIF without a matching OP_IF / OP_NOTIF.
    NoIf,

    /// OP_IF / OP_NOTIF without a matching OP_ENDIF at end of script.
    MissingEndif,

    /// OP_RETURN was executed. The script is provably unspendable.
    EarlyReturn,

    /// Script exceeds the 10000-byte limit.
    ScriptTooLarge(usize),

    /// Combined data and alt stack depth exceeded 1000 entries.
    StackOverflow(usize),

    /// A pushed element exceeds the 520-byte limit.
    ItemTooLarge(usize),

    /// More than 201 non-push opcodes executed in a single script.
    TooManyOps,

    /// A hex string could not be decoded (odd length or invalid character).
    InvalidHex,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::ShortScript => {
                write!(f, "unexpected end of script inside a push instruction")
            }
            ScriptError::InvalidOpcode(b) => {
                write!(f, "invalid opcode executed: 0x{b:02x}")
            }
            ScriptError::OpDisabled(b) => {
                write!(f, "disabled opcode encountered: 0x{b:02x}")
            }
            ScriptError::ReservedOpcode(b) => {
                write!(f, "reserved opcode executed: 0x{b:02x}")
            }
            ScriptError::Underflow => {
                write!(f, "stack underflow: not enough elements on the stack")
            }
            ScriptError::InvalidArgs => {
                write!(f, "stack operation called with an invalid count")
            }
            ScriptError::NumberTooBig => {
                write!(f, "numeric value exceeds the permitted encoding length")
            }
            ScriptError::TooManyPubkeys => {
                write!(f, "multisig public-key count outside 1..=20")
            }
            ScriptError::VerifyFailed => {
                write!(f, "verify failed: top stack element is false")
            }
            ScriptError::EvalFalse => {
                write!(f, "script failed: final stack state is false")
            }
            ScriptError::NoIf => {
                write!(f, "OP_ELSE or OP_ENDIF without a preceding OP_IF")
            }
            ScriptError::MissingEndif => {
                write!(f, "end of script with an unterminated OP_IF")
            }
            ScriptError::EarlyReturn => {
                write!(f, "OP_RETURN executed: script is unspendable")
            }
            ScriptError::ScriptTooLarge(n) => {
                write!(f, "script of {n} bytes exceeds the 10000-byte limit")
            }
            ScriptError::StackOverflow(n) => {
                write!(f, "combined stack depth {n} exceeds the 1000-entry limit")
            }
            ScriptError::ItemTooLarge(n) => {
                write!(f, "element of {n} bytes exceeds the 520-byte limit")
            }
            ScriptError::TooManyOps => {
                write!(f, "more than 201 operations in one script")
            }
            ScriptError::InvalidHex => {
                write!(f, "invalid hex string")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_offending_byte() {
        assert_eq!(
            format!("{}", ScriptError::OpDisabled(0x7e)),
            "disabled opcode encountered: 0x7e"
        );
        assert_eq!(
            format!("{}", ScriptError::InvalidOpcode(0xba)),
            "invalid opcode executed: 0xba"
        );
    }

    #[test]
    fn display_carries_sizes() {
        assert_eq!(
            format!("{}", ScriptError::ItemTooLarge(521)),
            "element of 521 bytes exceeds the 520-byte limit"
        );
        assert_eq!(
            format!("{}", ScriptError::ScriptTooLarge(10001)),
            "script of 10001 bytes exceeds the 10000-byte limit"
        );
    }
}
