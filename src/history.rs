//! Bounded, newest-first record of decoded instructions.

use std::collections::VecDeque;

use crate::disassembler::InstructionDescriptor;

/// Number of rows kept by default.
pub const HISTORY_CAPACITY: usize = 20;

/// The most recently executed instructions, newest first.
///
/// When full, pushing drops the oldest entry. A capacity of zero keeps
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionHistory {
    entries: VecDeque<InstructionDescriptor>,
    capacity: usize,
}

impl InstructionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `instr` as the newest entry.
    pub fn push(&mut self, instr: InstructionDescriptor) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(instr);
    }

    /// The newest entry, if any.
    pub fn latest(&self) -> Option<&InstructionDescriptor> {
        self.entries.front()
    }

    /// Iterates from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionDescriptor> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for InstructionHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
