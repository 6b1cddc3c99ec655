//! The script execution engine.
//!
//! An [`Engine`] evaluates a signature script and a public-key script in
//! sequence over a shared data stack, with optional pay-to-script-hash
//! promotion of a spender-supplied redeem script. Execution is
//! single-threaded and non-suspending; every opcode either completes or
//! aborts the engine with a [`ScriptError`].

use crate::checksig::verify_signature;
use crate::cond::{CondStack, CondValue};
use crate::error::ScriptError;
use crate::hash;
use crate::opcode::{codes, OpcodeKind, ParsedOpcode};
use crate::script::{
    is_pay_to_script_hash, parse_script, remove_data_push, MAX_SCRIPT_SIZE,
};
use crate::stack::Stack;
use crate::tx::Transaction;

/// Combined data plus alt stack depth ceiling.
pub const MAX_STACK_SIZE: usize = 1000;
/// Largest entry a push may place on the stack.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;
/// Non-push opcode budget per script.
pub const MAX_OPS_PER_SCRIPT: usize = 201;
/// CHECKMULTISIG public-key ceiling.
pub const MAX_PUBKEYS_PER_MULTISIG: i64 = 20;

/// The virtual machine that evaluates a spend.
///
/// Script slot 0 holds the signature script, slot 1 the public-key script;
/// a third slot is appended at runtime when pay-to-script-hash rules
/// promote the redeem script.
#[derive(Debug)]
pub struct Engine {
    scripts: Vec<Vec<ParsedOpcode>>,
    script_idx: usize,
    script_off: usize,
    dstack: Stack,
    astack: Stack,
    cond_stack: CondStack,
    last_code_sep: usize,
    tx: Transaction,
    input_idx: usize,
    tx_out_value: i64,
    p2sh: bool,
    saved_first_stack: Option<Vec<Vec<u8>>>,
    num_ops: usize,
    sig_ops: usize,
}

impl Engine {
    /// Build an engine for one input of `tx`.
    ///
    /// Both scripts are parsed up front. `p2sh_enabled` opts into redeem
    /// script promotion when the public-key script matches the
    /// pay-to-script-hash pattern.
    ///
    /// # Errors
    ///
    /// [`ScriptError::InvalidArgs`] for an out-of-range input index,
    /// [`ScriptError::ScriptTooLarge`] for a script over 10000 bytes, and
    /// any parse failure from either script.
    pub fn new(
        sig_script: &[u8],
        pk_script: &[u8],
        input_idx: u32,
        tx: Transaction,
        tx_out_value: i64,
        p2sh_enabled: bool,
    ) -> Result<Self, ScriptError> {
        let input_idx = input_idx as usize;
        if input_idx >= tx.inputs.len() {
            return Err(ScriptError::InvalidArgs);
        }
        for script in [sig_script, pk_script] {
            if script.len() > MAX_SCRIPT_SIZE {
                return Err(ScriptError::ScriptTooLarge(script.len()));
            }
        }

        let scripts = vec![parse_script(sig_script)?, parse_script(pk_script)?];
        let p2sh = p2sh_enabled && is_pay_to_script_hash(&scripts[1]);

        let mut engine = Self {
            scripts,
            script_idx: 0,
            script_off: 0,
            dstack: Stack::new(),
            astack: Stack::new(),
            cond_stack: CondStack::new(),
            last_code_sep: 0,
            tx,
            input_idx,
            tx_out_value,
            p2sh,
            saved_first_stack: None,
            num_ops: 0,
            sig_ops: 0,
        };
        // Zero-length scripts occur in the wild; settle the cursor on the
        // first real opcode (or past the end) before the first step.
        engine.skip_finished_scripts()?;
        Ok(engine)
    }

    /// Execute the opcode at the cursor. Returns `true` once no opcodes
    /// remain in any slot.
    pub fn step(&mut self) -> Result<bool, ScriptError> {
        if self.script_idx >= self.scripts.len() {
            return Ok(true);
        }
        let opcode = self.scripts[self.script_idx][self.script_off].clone();
        self.script_off += 1;
        self.execute_opcode(&opcode)?;

        let combined = self.dstack.depth() + self.astack.depth();
        if combined > MAX_STACK_SIZE {
            return Err(ScriptError::StackOverflow(combined));
        }

        self.skip_finished_scripts()?;
        Ok(self.script_idx >= self.scripts.len())
    }

    /// Run to completion and apply final validation: the data stack must
    /// end non-empty with a true top element.
    pub fn execute(&mut self) -> Result<(), ScriptError> {
        let mut done = self.script_idx >= self.scripts.len();
        while !done {
            done = self.step()?;
        }
        self.check_final_stack()
    }

    /// Signature-check operations performed so far. CHECKSIG variants count
    /// one, CHECKMULTISIG variants count their declared key total.
    pub fn sig_ops(&self) -> usize {
        self.sig_ops
    }

    /// The value of the output being spent, as supplied at construction.
    pub fn tx_out_value(&self) -> i64 {
        self.tx_out_value
    }

    /// Contents of the data stack, bottom first.
    pub fn data_stack(&self) -> Vec<Vec<u8>> {
        self.dstack.items().to_vec()
    }

    /// Replace the data stack. Intended for detailed tests.
    pub fn set_data_stack(&mut self, items: Vec<Vec<u8>>) {
        self.dstack.set_items(items);
    }

    /// Contents of the alt stack, bottom first.
    pub fn alt_stack(&self) -> Vec<Vec<u8>> {
        self.astack.items().to_vec()
    }

    /// Replace the alt stack. Intended for detailed tests.
    pub fn set_alt_stack(&mut self, items: Vec<Vec<u8>>) {
        self.astack.set_items(items);
    }

    /// Disassemble the opcode at the cursor as `"SS:OOOO: <op>"`.
    pub fn disasm_pc(&self) -> Result<String, ScriptError> {
        if self.script_idx >= self.scripts.len() {
            return Err(ScriptError::InvalidArgs);
        }
        let op = &self.scripts[self.script_idx][self.script_off];
        Ok(format!(
            "{:02x}:{:04x}: {}",
            self.script_idx,
            self.script_off,
            op.disasm()
        ))
    }

    /// Disassemble an entire script slot, one opcode per line.
    pub fn disasm_script(&self, idx: usize) -> Result<String, ScriptError> {
        let script = self.scripts.get(idx).ok_or(ScriptError::InvalidArgs)?;
        let mut out = String::new();
        for (off, op) in script.iter().enumerate() {
            out.push_str(&format!("{:02x}:{:04x}: {}\n", idx, off, op.disasm()));
        }
        Ok(out)
    }

    // ── Cursor management ────────────────────────────────────────────────

    /// Move the cursor past any exhausted script slots, applying the
    /// between-scripts rules, including redeem-script promotion.
    fn skip_finished_scripts(&mut self) -> Result<(), ScriptError> {
        while self.script_idx < self.scripts.len()
            && self.script_off >= self.scripts[self.script_idx].len()
        {
            // An IF block cannot straddle two scripts.
            if !self.cond_stack.is_empty() {
                return Err(ScriptError::MissingEndif);
            }
            // The alt stack and the op budget do not persist across scripts.
            self.astack.clear();
            self.num_ops = 0;
            self.last_code_sep = 0;

            if self.script_idx == 0 && self.p2sh {
                self.saved_first_stack = Some(self.dstack.items().to_vec());
                self.script_idx += 1;
            } else if self.script_idx == 1 && self.p2sh {
                // The hash comparison itself must have left true before the
                // redeem script is promoted.
                self.check_final_stack()?;
                let mut saved = self.saved_first_stack.take().ok_or(ScriptError::Underflow)?;
                let redeem = saved.pop().ok_or(ScriptError::Underflow)?;
                let redeem_ops = parse_script(&redeem)?;
                self.scripts.push(redeem_ops);
                self.dstack.set_items(saved);
                self.script_idx += 1;
            } else {
                self.script_idx += 1;
            }
            self.script_off = 0;
        }
        Ok(())
    }

    /// Shared by `execute` and the pay-to-script-hash transition: pop the
    /// result and demand it be true.
    fn check_final_stack(&mut self) -> Result<(), ScriptError> {
        if self.dstack.is_empty() {
            return Err(ScriptError::EvalFalse);
        }
        if !self.dstack.pop_bool()? {
            return Err(ScriptError::EvalFalse);
        }
        Ok(())
    }

    // ── Opcode dispatch ──────────────────────────────────────────────────

    fn execute_opcode(&mut self, pop: &ParsedOpcode) -> Result<(), ScriptError> {
        // Disabled opcodes poison the script wherever they appear, executed
        // or not.
        if pop.is_disabled() {
            return Err(ScriptError::OpDisabled(pop.code));
        }

        if !pop.is_push() {
            self.num_ops += 1;
            if self.num_ops > MAX_OPS_PER_SCRIPT {
                return Err(ScriptError::TooManyOps);
            }
        } else if pop.data.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(ScriptError::ItemTooLarge(pop.data.len()));
        }

        let executing = self.cond_stack.executing();
        if !executing && !pop.is_conditional() {
            return Ok(());
        }

        match pop.info().kind {
            OpcodeKind::Reserved => return Err(ScriptError::ReservedOpcode(pop.code)),
            OpcodeKind::Invalid => return Err(ScriptError::InvalidOpcode(pop.code)),
            _ => {}
        }

        match pop.code {
            // ── Constants ────────────────────────────────────────────
            codes::OP_0 => self.dstack.push_bytes(Vec::new()),
            0x01..=0x4e => self.dstack.push_bytes(pop.data.clone()),
            codes::OP_1NEGATE => self.dstack.push_int(-1),
            codes::OP_1..=codes::OP_16 => {
                self.dstack.push_int((pop.code - codes::OP_1 + 1) as i64);
            }

            // ── Flow control ─────────────────────────────────────────
            codes::OP_NOP | codes::OP_NOP1..=codes::OP_NOP10 => {}
            codes::OP_IF => {
                if executing {
                    let val = self.dstack.pop_bool()?;
                    self.cond_stack.push(if val { CondValue::True } else { CondValue::False });
                } else {
                    self.cond_stack.push(CondValue::Skip);
                }
            }
            codes::OP_NOTIF => {
                if executing {
                    let val = self.dstack.pop_bool()?;
                    self.cond_stack.push(if val { CondValue::False } else { CondValue::True });
                } else {
                    self.cond_stack.push(CondValue::Skip);
                }
            }
            codes::OP_ELSE => self.cond_stack.toggle()?,
            codes::OP_ENDIF => self.cond_stack.pop()?,
            codes::OP_VERIFY => {
                if !self.dstack.pop_bool()? {
                    return Err(ScriptError::VerifyFailed);
                }
            }
            codes::OP_RETURN => return Err(ScriptError::EarlyReturn),

            // ── Stack manipulation ───────────────────────────────────
            codes::OP_TOALTSTACK => {
                let item = self.dstack.pop_bytes()?;
                self.astack.push_bytes(item);
            }
            codes::OP_FROMALTSTACK => {
                let item = self.astack.pop_bytes()?;
                self.dstack.push_bytes(item);
            }
            codes::OP_2DROP => self.dstack.drop_n(2)?,
            codes::OP_2DUP => self.dstack.dup_n(2)?,
            codes::OP_3DUP => self.dstack.dup_n(3)?,
            codes::OP_2OVER => self.dstack.over_n(2)?,
            codes::OP_2ROT => self.dstack.rot_n(2)?,
            codes::OP_2SWAP => self.dstack.swap_n(2)?,
            codes::OP_IFDUP => {
                if self.dstack.peek_bool(0)? {
                    let copy = self.dstack.peek_bytes(0)?.to_vec();
                    self.dstack.push_bytes(copy);
                }
            }
            codes::OP_DEPTH => {
                let depth = self.dstack.depth() as i64;
                self.dstack.push_int(depth);
            }
            codes::OP_DROP => self.dstack.drop_n(1)?,
            codes::OP_DUP => self.dstack.dup_n(1)?,
            codes::OP_NIP => {
                self.dstack.nip_n(1)?;
            }
            codes::OP_OVER => self.dstack.over_n(1)?,
            codes::OP_PICK => {
                let idx = self.dstack.pop_int(4)? as i32;
                self.dstack.pick_n(idx)?;
            }
            codes::OP_ROLL => {
                let idx = self.dstack.pop_int(4)? as i32;
                self.dstack.roll_n(idx)?;
            }
            codes::OP_ROT => self.dstack.rot_n(1)?,
            codes::OP_SWAP => self.dstack.swap_n(1)?,
            codes::OP_TUCK => self.dstack.tuck()?,

            // ── Splice ───────────────────────────────────────────────
            codes::OP_SIZE => {
                let size = self.dstack.peek_bytes(0)?.len() as i64;
                self.dstack.push_int(size);
            }

            // ── Comparison ───────────────────────────────────────────
            codes::OP_EQUAL => {
                let b = self.dstack.pop_bytes()?;
                let a = self.dstack.pop_bytes()?;
                self.dstack.push_bool(a == b);
            }
            codes::OP_EQUALVERIFY => {
                let b = self.dstack.pop_bytes()?;
                let a = self.dstack.pop_bytes()?;
                if a != b {
                    return Err(ScriptError::VerifyFailed);
                }
            }

            // ── Arithmetic ───────────────────────────────────────────
            codes::OP_1ADD => {
                let v = self.dstack.pop_int(4)?;
                self.dstack.push_int(v + 1);
            }
            codes::OP_1SUB => {
                let v = self.dstack.pop_int(4)?;
                self.dstack.push_int(v - 1);
            }
            codes::OP_NEGATE => {
                let v = self.dstack.pop_int(4)?;
                self.dstack.push_int(-v);
            }
            codes::OP_ABS => {
                let v = self.dstack.pop_int(4)?;
                self.dstack.push_int(v.abs());
            }
            codes::OP_NOT => {
                let v = self.dstack.pop_int(4)?;
                self.dstack.push_int((v == 0) as i64);
            }
            codes::OP_0NOTEQUAL => {
                let v = self.dstack.pop_int(4)?;
                self.dstack.push_int((v != 0) as i64);
            }
            codes::OP_ADD => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int(v0 + v1);
            }
            codes::OP_SUB => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int(v0 - v1);
            }
            codes::OP_BOOLAND => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 != 0 && v1 != 0) as i64);
            }
            codes::OP_BOOLOR => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 != 0 || v1 != 0) as i64);
            }
            codes::OP_NUMEQUAL => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 == v1) as i64);
            }
            codes::OP_NUMEQUALVERIFY => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                if v0 != v1 {
                    return Err(ScriptError::VerifyFailed);
                }
            }
            codes::OP_NUMNOTEQUAL => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 != v1) as i64);
            }
            codes::OP_LESSTHAN => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 < v1) as i64);
            }
            codes::OP_GREATERTHAN => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 > v1) as i64);
            }
            codes::OP_LESSTHANOREQUAL => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 <= v1) as i64);
            }
            codes::OP_GREATERTHANOREQUAL => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int((v0 >= v1) as i64);
            }
            codes::OP_MIN => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int(v0.min(v1));
            }
            codes::OP_MAX => {
                let v1 = self.dstack.pop_int(4)?;
                let v0 = self.dstack.pop_int(4)?;
                self.dstack.push_int(v0.max(v1));
            }
            codes::OP_WITHIN => {
                let max = self.dstack.pop_int(4)?;
                let min = self.dstack.pop_int(4)?;
                let x = self.dstack.pop_int(4)?;
                self.dstack.push_int((min <= x && x < max) as i64);
            }

            // ── Crypto ───────────────────────────────────────────────
            codes::OP_RIPEMD160 => {
                let data = self.dstack.pop_bytes()?;
                self.dstack.push_bytes(hash::ripemd160(&data).to_vec());
            }
            codes::OP_SHA1 => {
                let data = self.dstack.pop_bytes()?;
                self.dstack.push_bytes(hash::sha1(&data).to_vec());
            }
            codes::OP_SHA256 => {
                let data = self.dstack.pop_bytes()?;
                self.dstack.push_bytes(hash::sha256(&data).to_vec());
            }
            codes::OP_HASH160 => {
                let data = self.dstack.pop_bytes()?;
                self.dstack.push_bytes(hash::hash160(&data).to_vec());
            }
            codes::OP_HASH256 => {
                let data = self.dstack.pop_bytes()?;
                self.dstack.push_bytes(hash::hash256(&data).to_vec());
            }
            codes::OP_CODESEPARATOR => {
                // The subscript starts just past the separator.
                self.last_code_sep = self.script_off;
            }
            codes::OP_CHECKSIG => {
                let valid = self.op_checksig()?;
                self.dstack.push_bool(valid);
            }
            codes::OP_CHECKSIGVERIFY => {
                if !self.op_checksig()? {
                    return Err(ScriptError::VerifyFailed);
                }
            }
            codes::OP_CHECKMULTISIG => {
                let valid = self.op_checkmultisig()?;
                self.dstack.push_bool(valid);
            }
            codes::OP_CHECKMULTISIGVERIFY => {
                if !self.op_checkmultisig()? {
                    return Err(ScriptError::VerifyFailed);
                }
            }

            // Every byte value is covered above by its table kind or an
            // explicit handler.
            other => return Err(ScriptError::InvalidOpcode(other)),
        }

        Ok(())
    }

    // ── Signature opcodes ────────────────────────────────────────────────

    /// The parsed tail of the executing script from the last separator.
    fn subscript(&self) -> Vec<ParsedOpcode> {
        self.scripts[self.script_idx][self.last_code_sep..].to_vec()
    }

    fn op_checksig(&mut self) -> Result<bool, ScriptError> {
        let pubkey = self.dstack.pop_bytes()?;
        let sig = self.dstack.pop_bytes()?;
        self.sig_ops += 1;

        // A signature cannot commit to itself, so pushes of it are stripped
        // from the subscript before hashing.
        let subscript = remove_data_push(&self.subscript(), &sig);
        Ok(verify_signature(&pubkey, &sig, &self.tx, self.input_idx, &subscript))
    }

    fn op_checkmultisig(&mut self) -> Result<bool, ScriptError> {
        let num_keys = self.dstack.pop_int(4)?;
        if !(1..=MAX_PUBKEYS_PER_MULTISIG).contains(&num_keys) {
            return Err(ScriptError::TooManyPubkeys);
        }
        let num_keys = num_keys as usize;

        // Declared keys count toward the per-script op budget.
        self.num_ops += num_keys;
        if self.num_ops > MAX_OPS_PER_SCRIPT {
            return Err(ScriptError::TooManyOps);
        }

        let mut pubkeys = Vec::with_capacity(num_keys);
        for _ in 0..num_keys {
            pubkeys.push(self.dstack.pop_bytes()?);
        }
        pubkeys.reverse();

        let num_sigs = self.dstack.pop_int(4)?;
        if num_sigs < 0 || num_sigs > num_keys as i64 {
            return Err(ScriptError::InvalidArgs);
        }
        let num_sigs = num_sigs as usize;

        let mut sigs = Vec::with_capacity(num_sigs);
        for _ in 0..num_sigs {
            sigs.push(self.dstack.pop_bytes()?);
        }
        sigs.reverse();

        // The historical extra element. Its content is ignored.
        self.dstack.pop_bytes()?;

        self.sig_ops += num_keys;

        let mut subscript = self.subscript();
        for sig in &sigs {
            subscript = remove_data_push(&subscript, sig);
        }

        // Signatures must match pubkeys as an in-order subsequence. Bail
        // once fewer keys remain than signatures still unmatched.
        let mut sig_idx = 0;
        let mut key_idx = 0;
        while sig_idx < sigs.len() && key_idx < pubkeys.len() {
            if verify_signature(
                &pubkeys[key_idx],
                &sigs[sig_idx],
                &self.tx,
                self.input_idx,
                &subscript,
            ) {
                sig_idx += 1;
            }
            key_idx += 1;
            if pubkeys.len() - key_idx < sigs.len() - sig_idx {
                break;
            }
        }

        Ok(sig_idx == sigs.len())
    }
}
