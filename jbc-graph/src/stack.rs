//! Operand-stack simulator used during decoding.

use crate::error::{DecodeError, Result};
use crate::Pc;

/// Tracks, per live stack slot, the PC of the instruction that produced the
/// value occupying it.
///
/// Capacity is the method's declared maximum stack depth; category-2 values
/// occupy one slot (the simulator models values, not JVM slot pairs).
/// Owned by a single decode pass and threaded through successive
/// instruction decodes; never shared across methods.
#[derive(Debug)]
pub struct StackSim {
    slots: Vec<Pc>,
    max_stack: u16,
}

impl StackSim {
    pub fn new(max_stack: u16) -> Self {
        Self {
            slots: Vec::with_capacity(max_stack as usize),
            max_stack,
        }
    }

    /// Number of live slots.
    pub fn depth(&self) -> u16 {
        self.slots.len() as u16
    }

    /// Push one slot produced by the instruction at `producer`.
    ///
    /// `at` is the PC of the instruction being decoded, used for error
    /// context; it equals `producer` for every real push.
    pub fn push(&mut self, producer: Pc, at: Pc) -> Result<()> {
        if self.depth() == self.max_stack {
            return Err(DecodeError::StackOverflow {
                pc: at,
                max_stack: self.max_stack,
            });
        }
        self.slots.push(producer);
        Ok(())
    }

    /// Pop the topmost slot, returning its producer PC.
    pub fn pop(&mut self, at: Pc) -> Result<Pc> {
        self.slots
            .pop()
            .ok_or(DecodeError::StackUnderflow { pc: at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_returns_most_recent_push() {
        let mut sim = StackSim::new(4);
        sim.push(0, 0).unwrap();
        sim.push(3, 3).unwrap();
        assert_eq!(sim.depth(), 2);
        assert_eq!(sim.pop(5), Ok(3));
        assert_eq!(sim.pop(5), Ok(0));
        assert_eq!(sim.depth(), 0);
    }

    #[test]
    fn underflow_and_overflow_are_errors() {
        let mut sim = StackSim::new(1);
        assert_eq!(sim.pop(7), Err(DecodeError::StackUnderflow { pc: 7 }));
        sim.push(0, 0).unwrap();
        assert_eq!(
            sim.push(1, 1),
            Err(DecodeError::StackOverflow { pc: 1, max_stack: 1 })
        );
    }
}
