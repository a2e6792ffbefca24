use crate::cpool::PoolError;

/// Errors aborting the decode of a method.
///
/// Decode errors are never downgraded to placeholder instructions; doing so
/// would leave the PC-indexed lookup silently misrepresenting the method.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The code range ends inside an instruction.
    #[error("truncated instruction at pc {pc}")]
    Truncated { pc: u32 },

    /// An instruction popped more operands than the stack held.
    #[error("operand stack underflow at pc {pc}")]
    StackUnderflow { pc: u32 },

    /// A push exceeded the method's declared maximum stack depth.
    #[error("operand stack overflow at pc {pc} (max stack {max_stack})")]
    StackOverflow { pc: u32, max_stack: u16 },

    /// A constant-pool reference needed for decoding did not resolve.
    #[error("unresolvable constant pool reference at pc {pc}: {source}")]
    Pool { pc: u32, source: PoolError },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
