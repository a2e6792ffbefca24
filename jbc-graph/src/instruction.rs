//! One decoded instruction and the decode algorithm itself.

use jbc_isa::{ImmShape, OpInfo, PopShape, PushShape};

use crate::cpool::{ConstantPool, MethodArity, PoolError};
use crate::cursor::CodeCursor;
use crate::error::{DecodeError, Result};
use crate::stack::StackSim;
use crate::Pc;

/// Decoded immediate operand, tagged by the opcode's [`ImmShape`].
///
/// Branch targets are stored as absolute PCs; the cursor-relative offset is
/// resolved against the instruction's own PC at decode time so later passes
/// never need to know the offset width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Immediate {
    None,
    /// Local-variable slot index.
    Local(u8),
    /// Constant-pool index (`ldc` family, `new`, `anewarray`, ...).
    Pool(u16),
    /// Signed byte literal (`bipush`, `newarray` element tag).
    Byte(i8),
    /// Signed short literal (`sipush`).
    Short(i16),
    /// Absolute branch target PC.
    Branch(Pc),
    /// Field-reference pool index.
    Field(u16),
    /// Method-reference pool index.
    Method(u16),
    /// Interface-method pool index plus the encoded argument-slot count.
    InterfaceMethod { method: u16, count: u8 },
    /// Local index and signed increment (`iinc`).
    LocalValue { local: u8, value: i8 },
    /// Class pool index and dimension count (`multianewarray`).
    PoolDims { class: u16, dims: u8 },
    Unknown,
}

/// Producer PCs of the operands an instruction consumed, tagged by its
/// [`PopShape`]. Fields are named by role; within a variant, earlier fields
/// are deeper stack slots (pushed earlier).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Popped {
    None,
    One { value: Pc },
    Two { first: Pc, second: Pc },
    Three { first: Pc, second: Pc, third: Pc },
    Four { first: Pc, second: Pc, third: Pc, fourth: Pc },
    ArrayLoad { array: Pc, index: Pc },
    ArrayStore { array: Pc, index: Pc, value: Pc },
    StaticFieldStore { value: Pc },
    FieldStore { object: Pc, value: Pc },
    /// Arguments of a static call, left-to-right.
    StaticCall { args: Vec<Pc> },
    /// Receiver then arguments of an instance call, left-to-right.
    InstanceCall { receiver: Pc, args: Vec<Pc> },
    /// Per-dimension counts of `multianewarray`, outermost first.
    DimCounts { counts: Vec<Pc> },
    Unknown,
}

impl Popped {
    /// Producer PCs in declared field order (deepest slot first).
    pub fn producers(&self) -> Vec<Pc> {
        match self {
            Popped::None | Popped::Unknown => Vec::new(),
            Popped::One { value } => vec![*value],
            Popped::Two { first, second } => vec![*first, *second],
            Popped::Three {
                first,
                second,
                third,
            } => vec![*first, *second, *third],
            Popped::Four {
                first,
                second,
                third,
                fourth,
            } => vec![*first, *second, *third, *fourth],
            Popped::ArrayLoad { array, index } => vec![*array, *index],
            Popped::ArrayStore {
                array,
                index,
                value,
            } => vec![*array, *index, *value],
            Popped::StaticFieldStore { value } => vec![*value],
            Popped::FieldStore { object, value } => vec![*object, *value],
            Popped::StaticCall { args } => args.clone(),
            Popped::InstanceCall { receiver, args } => {
                let mut out = Vec::with_capacity(args.len() + 1);
                out.push(*receiver);
                out.extend_from_slice(args);
                out
            }
            Popped::DimCounts { counts } => counts.clone(),
        }
    }
}

/// One decoded instruction with embedded producer links.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Byte offset of the opcode; unique key within the method.
    pub pc: Pc,
    /// Bytes consumed, opcode included.
    pub length: u32,
    /// PC of the linearly preceding instruction (`None` at pc 0).
    pub prev_pc: Option<Pc>,
    /// Operand-stack depth immediately before this instruction executed.
    pub stack_base: u16,
    /// Raw opcode byte.
    pub opcode: u8,
    /// Descriptor from the opcode table.
    pub info: &'static OpInfo,
    /// Decoded immediate operand.
    pub imm: Immediate,
    /// Producer PCs of the consumed operands.
    pub popped: Popped,
}

impl Instruction {
    /// PC of the linear successor.
    pub fn next_pc(&self) -> Pc {
        self.pc + self.length
    }

    /// Decode exactly one instruction at the cursor's current position.
    ///
    /// The step order is a correctness requirement: the immediate is read
    /// before pops (call arity comes from the pool reference it names), pops
    /// precede pushes, and every pushed slot carries this instruction's own
    /// PC as producer. The caller threads `stack` and the returned
    /// instruction's PC across successive calls for one method.
    pub fn decode(
        cpool: &ConstantPool,
        cursor: &mut CodeCursor,
        stack: &mut StackSim,
        prev_pc: Option<Pc>,
    ) -> Result<Instruction> {
        let pc = cursor.offset();
        let stack_base = stack.depth();

        let opcode = cursor.u1()?;
        let info = jbc_isa::lookup(opcode);
        if info.is_unknown() {
            // Non-fatal by design, but worth surfacing: if the byte was a
            // real variable-length instruction the cursor is now desynced.
            log::warn!(
                "undecodable opcode {opcode:#04x} ({}) at pc {pc}",
                info.mnemonic()
            );
        }

        let imm = read_immediate(info.imm(), pc, cursor)?;
        let length = cursor.offset() - pc;

        // Call arity straddles the pop and push dispatch below.
        let call_arity = match info.pop() {
            PopShape::StaticCall | PopShape::InstanceCall => {
                Some(resolve_call_arity(cpool, &imm, pc)?)
            }
            _ => None,
        };

        let popped = pop_operands(info.pop(), call_arity, &imm, stack, pc)?;

        let push_slots = match info.push() {
            PushShape::Call => call_arity.map_or(0, |a| a.ret_slots),
            shape => shape.fixed_arity().unwrap_or(0),
        };
        for _ in 0..push_slots {
            stack.push(pc, pc)?;
        }

        Ok(Instruction {
            pc,
            length,
            prev_pc,
            stack_base,
            opcode,
            info,
            imm,
            popped,
        })
    }
}

fn read_immediate(shape: ImmShape, pc: Pc, cursor: &mut CodeCursor) -> Result<Immediate> {
    Ok(match shape {
        ImmShape::None
        | ImmShape::ImplicitNull
        | ImmShape::ImplicitConst(_)
        | ImmShape::ImplicitSlot(_) => Immediate::None,
        ImmShape::LocalIndex => Immediate::Local(cursor.u1()?),
        ImmShape::PoolIndexByte => Immediate::Pool(cursor.u1()? as u16),
        ImmShape::PoolIndexShort => Immediate::Pool(cursor.u2()?),
        ImmShape::ByteValue => Immediate::Byte(cursor.u1()? as i8),
        ImmShape::ShortValue => Immediate::Short(cursor.s2()?),
        ImmShape::BranchShort => {
            let offset = cursor.s2()?;
            Immediate::Branch(pc.wrapping_add_signed(offset as i32))
        }
        ImmShape::BranchWide => {
            let offset = cursor.s4()?;
            Immediate::Branch(pc.wrapping_add_signed(offset))
        }
        ImmShape::FieldIndex => Immediate::Field(cursor.u2()?),
        ImmShape::MethodIndex => Immediate::Method(cursor.u2()?),
        ImmShape::MethodIndexExtra => {
            let method = cursor.u2()?;
            let count = cursor.u1()?;
            let _reserved = cursor.u1()?;
            Immediate::InterfaceMethod { method, count }
        }
        ImmShape::LocalIndexValue => Immediate::LocalValue {
            local: cursor.u1()?,
            value: cursor.u1()? as i8,
        },
        ImmShape::PoolIndexDims => Immediate::PoolDims {
            class: cursor.u2()?,
            dims: cursor.u1()?,
        },
        ImmShape::Unknown => Immediate::Unknown,
    })
}

fn resolve_call_arity(cpool: &ConstantPool, imm: &Immediate, pc: Pc) -> Result<MethodArity> {
    let index = match imm {
        Immediate::Method(index) => *index,
        Immediate::InterfaceMethod { method, .. } => *method,
        // Unreachable for a consistent opcode table; kept as an error so a
        // table bug cannot silently corrupt the stack simulation.
        _ => {
            return Err(DecodeError::Pool {
                pc,
                source: PoolError::WrongKind {
                    index: 0,
                    expected: "method reference",
                },
            });
        }
    };
    cpool
        .method_arity(index)
        .map_err(|source| DecodeError::Pool { pc, source })
}

/// Pop the operands dictated by `shape`, assigning producer PCs to role
/// fields in reverse arity order: the topmost slot is the last-declared
/// operand, because JVM push order is left-to-right.
fn pop_operands(
    shape: PopShape,
    call_arity: Option<MethodArity>,
    imm: &Immediate,
    stack: &mut StackSim,
    pc: Pc,
) -> Result<Popped> {
    Ok(match shape {
        PopShape::None => Popped::None,
        PopShape::Unknown => Popped::Unknown,
        PopShape::One(_) => Popped::One {
            value: stack.pop(pc)?,
        },
        PopShape::Two(..) => {
            let second = stack.pop(pc)?;
            let first = stack.pop(pc)?;
            Popped::Two { first, second }
        }
        PopShape::Three(..) => {
            let third = stack.pop(pc)?;
            let second = stack.pop(pc)?;
            let first = stack.pop(pc)?;
            Popped::Three {
                first,
                second,
                third,
            }
        }
        PopShape::Four(..) => {
            let fourth = stack.pop(pc)?;
            let third = stack.pop(pc)?;
            let second = stack.pop(pc)?;
            let first = stack.pop(pc)?;
            Popped::Four {
                first,
                second,
                third,
                fourth,
            }
        }
        PopShape::ArrayLoad => {
            let index = stack.pop(pc)?;
            let array = stack.pop(pc)?;
            Popped::ArrayLoad { array, index }
        }
        PopShape::ArrayStore(_) => {
            let value = stack.pop(pc)?;
            let index = stack.pop(pc)?;
            let array = stack.pop(pc)?;
            Popped::ArrayStore {
                array,
                index,
                value,
            }
        }
        PopShape::StaticFieldStore => Popped::StaticFieldStore {
            value: stack.pop(pc)?,
        },
        PopShape::FieldStore => {
            let value = stack.pop(pc)?;
            let object = stack.pop(pc)?;
            Popped::FieldStore { object, value }
        }
        PopShape::StaticCall => Popped::StaticCall {
            args: pop_reversed(stack, call_arity.map_or(0, |a| a.args), pc)?,
        },
        PopShape::InstanceCall => {
            let args = pop_reversed(stack, call_arity.map_or(0, |a| a.args), pc)?;
            // The receiver sits below the arguments.
            let receiver = stack.pop(pc)?;
            Popped::InstanceCall { receiver, args }
        }
        PopShape::DimCounts => {
            let dims = match imm {
                Immediate::PoolDims { dims, .. } => *dims as u16,
                _ => 0,
            };
            Popped::DimCounts {
                counts: pop_reversed(stack, dims, pc)?,
            }
        }
    })
}

/// Pop `count` slots, returning producers in push (left-to-right) order.
fn pop_reversed(stack: &mut StackSim, count: u16, pc: Pc) -> Result<Vec<Pc>> {
    let mut out = vec![0 as Pc; count as usize];
    for slot in out.iter_mut().rev() {
        *slot = stack.pop(pc)?;
    }
    Ok(out)
}
