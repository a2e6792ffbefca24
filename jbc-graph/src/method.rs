//! Whole-method decoding and the PC-indexed instruction lookup.

use crate::cpool::ConstantPool;
use crate::cursor::CodeCursor;
use crate::error::{DecodeError, Result};
use crate::instruction::Instruction;
use crate::stack::StackSim;
use crate::Pc;

/// A fully decoded method body: the ordered instruction sequence plus a
/// sparse PC-indexed lookup.
///
/// The producer PCs embedded in each instruction, resolved through
/// [`MethodGraph::at`], form the data-dependency graph of the method.
#[derive(Debug)]
pub struct MethodGraph {
    instructions: Vec<Instruction>,
    // Indexed by byte offset; most offsets fall inside an instruction and
    // hold None.
    by_pc: Vec<Option<u32>>,
}

impl MethodGraph {
    /// Instructions in PC order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Instruction whose opcode starts at `pc`, if any.
    ///
    /// `None` for offsets inside an instruction or out of range; callers
    /// following producer links should treat that as an invariant violation,
    /// not skip it.
    pub fn at(&self, pc: Pc) -> Option<&Instruction> {
        let slot = *self.by_pc.get(pc as usize)?;
        slot.map(|i| &self.instructions[i as usize])
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Decode a method's full code range into a [`MethodGraph`].
///
/// Runs one linear pass from offset 0 to the end of `code`, threading the
/// operand-stack simulator and the previous-PC link across instructions.
/// Any decode error aborts the whole method; no partial graph is returned.
pub fn decode_method(code: &[u8], cpool: &ConstantPool, max_stack: u16) -> Result<MethodGraph> {
    let mut cursor = CodeCursor::new(code);
    let mut stack = StackSim::new(max_stack);
    let mut instructions: Vec<Instruction> = Vec::new();
    let mut by_pc: Vec<Option<u32>> = vec![None; code.len()];
    let mut prev_pc: Option<Pc> = None;

    while !cursor.is_at_end() {
        let pc = cursor.offset();
        let insn = Instruction::decode(cpool, &mut cursor, &mut stack, prev_pc).map_err(|e| {
            match e {
                // Report truncation against the instruction being decoded,
                // not the offset of the failed read.
                DecodeError::Truncated { .. } => DecodeError::Truncated { pc },
                other => other,
            }
        })?;
        by_pc[pc as usize] = Some(instructions.len() as u32);
        prev_pc = Some(pc);
        instructions.push(insn);
    }

    Ok(MethodGraph {
        instructions,
        by_pc,
    })
}
