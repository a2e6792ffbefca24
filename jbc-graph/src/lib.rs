//! Decoder turning a JVM method body into an instruction graph.
//!
//! JVM bytecode is stack-based: operands are implicit. While decoding, this
//! crate runs an abstract interpretation of the operand stack that tracks,
//! per slot, the PC of the instruction that last wrote it. Every decoded
//! [`instruction::Instruction`] therefore carries the producer PCs of its
//! operands, turning the flat instruction stream into an explicit
//! producer/consumer graph that downstream code generation can walk as an
//! expression tree.
//!
//! The decode pass is linear and single-shot per method; it does not merge
//! stack shapes across control-flow joins. Callers hand it straight-line (or
//! already-reducible) method bodies, a resolved constant pool and the
//! declared maximum stack depth.

pub mod cpool;
pub mod cursor;
mod error;
pub mod instruction;
pub mod method;
pub mod render;
pub mod stack;

pub use error::{DecodeError, Result};
pub use method::{MethodGraph, decode_method};

/// Byte offset of an instruction's opcode within its method body.
///
/// Unique per instruction within one method; used as the instruction's key
/// and as the producer reference stored in operand-stack slots.
pub type Pc = u32;
