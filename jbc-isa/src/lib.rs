//! JVM instruction-set definitions.
//!
//! This crate provides the static opcode descriptor table: for every opcode
//! byte, its mnemonic, immediate-operand shape, operand-pop shape and
//! result-push shape. The table is total over all 256 byte values; bytes the
//! decoder cannot handle map to a sentinel descriptor with [`ImmShape::Unknown`]
//! shapes so decoding stays deterministic.

mod shapes;
mod table;

pub use shapes::{ImmShape, PopShape, PushShape, SlotKind};
pub use table::{OpInfo, lookup, opcode_count, opcode_table};
