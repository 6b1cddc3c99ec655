//! Conditional-execution state for nested OP_IF / OP_NOTIF blocks.

use crate::error::ScriptError;

/// One level of conditional nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondValue {
    /// The branch condition held; opcodes run.
    True,
    /// The branch condition failed; opcodes are skipped until OP_ELSE or
    /// OP_ENDIF.
    False,
    /// A branch opened inside an already-skipped branch. OP_ELSE must not
    /// revive it, so it is distinct from `False`.
    Skip,
}

/// The stack of nesting levels. Execution is live only when every level is
/// [`CondValue::True`]; its depth always equals the number of unclosed
/// OP_IF / OP_NOTIF opcodes before the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CondStack {
    levels: Vec<CondValue>,
}

impl CondStack {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether opcodes at the current cursor position execute.
    pub fn executing(&self) -> bool {
        self.levels.iter().all(|v| *v == CondValue::True)
    }

    /// Open a nesting level (OP_IF / OP_NOTIF).
    pub fn push(&mut self, value: CondValue) {
        self.levels.push(value);
    }

    /// Flip the innermost branch (OP_ELSE). `Skip` levels stay skipped.
    pub fn toggle(&mut self) -> Result<(), ScriptError> {
        let top = self.levels.last_mut().ok_or(ScriptError::NoIf)?;
        *top = match *top {
            CondValue::True => CondValue::False,
            CondValue::False => CondValue::True,
            CondValue::Skip => CondValue::Skip,
        };
        Ok(())
    }

    /// Close the innermost level (OP_ENDIF).
    pub fn pop(&mut self) -> Result<(), ScriptError> {
        self.levels.pop().map(|_| ()).ok_or(ScriptError::NoIf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_executes() {
        assert!(CondStack::new().executing());
    }

    #[test]
    fn any_false_level_suspends_execution() {
        let mut cond = CondStack::new();
        cond.push(CondValue::True);
        assert!(cond.executing());
        cond.push(CondValue::False);
        assert!(!cond.executing());
        cond.push(CondValue::True);
        assert!(!cond.executing());
    }

    #[test]
    fn toggle_flips_true_and_false() {
        let mut cond = CondStack::new();
        cond.push(CondValue::False);
        cond.toggle().unwrap();
        assert!(cond.executing());
        cond.toggle().unwrap();
        assert!(!cond.executing());
    }

    #[test]
    fn toggle_leaves_skip_alone() {
        let mut cond = CondStack::new();
        cond.push(CondValue::Skip);
        cond.toggle().unwrap();
        assert!(!cond.executing());
        cond.toggle().unwrap();
        assert!(!cond.executing());
    }

    #[test]
    fn toggle_without_if_fails() {
        assert_eq!(CondStack::new().toggle(), Err(ScriptError::NoIf));
    }

    #[test]
    fn pop_without_if_fails() {
        assert_eq!(CondStack::new().pop(), Err(ScriptError::NoIf));
    }

    #[test]
    fn depth_tracks_nesting() {
        let mut cond = CondStack::new();
        cond.push(CondValue::True);
        cond.push(CondValue::False);
        assert_eq!(cond.depth(), 2);
        cond.pop().unwrap();
        assert_eq!(cond.depth(), 1);
        cond.pop().unwrap();
        assert!(cond.is_empty());
    }
}
