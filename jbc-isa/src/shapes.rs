//! Shape taxonomy for opcode descriptors.
//!
//! Each opcode is described by three orthogonal shapes: which immediate bytes
//! follow it in the code stream ([`ImmShape`]), which operand-stack slots it
//! consumes ([`PopShape`]) and which it produces ([`PushShape`]).

/// The kind of value occupying one operand-stack slot.
///
/// Category-2 values (long, double) occupy a single simulator slot; the
/// simulator tracks values, not JVM slot pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Int,
    Long,
    Float,
    Double,
    Object,
    Array,
    /// Return address pushed by `jsr`/`jsr_w`.
    RetAddr,
    /// Untyped slot moved by the `pop`/`dup`/`swap` family.
    Raw,
}

impl SlotKind {
    /// Lowercase label used by the diagnostic renderers.
    pub const fn label(self) -> &'static str {
        match self {
            SlotKind::Int => "int",
            SlotKind::Long => "long",
            SlotKind::Float => "float",
            SlotKind::Double => "double",
            SlotKind::Object => "object",
            SlotKind::Array => "array",
            SlotKind::RetAddr => "retaddr",
            SlotKind::Raw => "value",
        }
    }
}

/// Which immediate bytes follow an opcode, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmShape {
    /// No immediate bytes.
    None,
    /// No bytes; the opcode itself encodes a null constant.
    ImplicitNull,
    /// No bytes; the opcode itself encodes this integer constant.
    ImplicitConst(i8),
    /// No bytes; the opcode itself encodes this local-variable slot.
    ImplicitSlot(u8),
    /// One-byte local-variable index.
    LocalIndex,
    /// One-byte constant-pool index (`ldc`).
    PoolIndexByte,
    /// Two-byte constant-pool index.
    PoolIndexShort,
    /// One-byte signed literal (`bipush`, `newarray` tag).
    ByteValue,
    /// Two-byte signed literal (`sipush`).
    ShortValue,
    /// Two-byte signed branch offset, stored as an absolute target PC.
    BranchShort,
    /// Four-byte signed branch offset, stored as an absolute target PC.
    BranchWide,
    /// Two-byte field-reference pool index.
    FieldIndex,
    /// Two-byte method-reference pool index.
    MethodIndex,
    /// Two-byte method-reference pool index plus count and zero bytes
    /// (`invokeinterface`).
    MethodIndexExtra,
    /// One-byte local index plus one-byte signed increment (`iinc`).
    LocalIndexValue,
    /// Two-byte class pool index plus one-byte dimension count
    /// (`multianewarray`).
    PoolIndexDims,
    /// Sentinel for bytes the decoder does not handle.
    Unknown,
}

impl ImmShape {
    /// Number of immediate bytes following the opcode byte.
    pub const fn byte_count(self) -> u32 {
        match self {
            ImmShape::None
            | ImmShape::ImplicitNull
            | ImmShape::ImplicitConst(_)
            | ImmShape::ImplicitSlot(_)
            | ImmShape::Unknown => 0,
            ImmShape::LocalIndex | ImmShape::PoolIndexByte | ImmShape::ByteValue => 1,
            ImmShape::PoolIndexShort
            | ImmShape::ShortValue
            | ImmShape::BranchShort
            | ImmShape::FieldIndex
            | ImmShape::MethodIndex
            | ImmShape::LocalIndexValue => 2,
            ImmShape::PoolIndexDims => 3,
            ImmShape::MethodIndexExtra | ImmShape::BranchWide => 4,
        }
    }
}

/// Which operand-stack slots an opcode consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopShape {
    None,
    /// One slot of the given kind.
    One(SlotKind),
    /// Two slots; the first field is the deeper slot.
    Two(SlotKind, SlotKind),
    Three(SlotKind, SlotKind, SlotKind),
    Four(SlotKind, SlotKind, SlotKind, SlotKind),
    /// Array reference and index (`*aload` family).
    ArrayLoad,
    /// Array reference, index and a value of the given kind (`*astore`).
    ArrayStore(SlotKind),
    /// One value, typed by the field descriptor (`putstatic`).
    StaticFieldStore,
    /// Object reference and value (`putfield`).
    FieldStore,
    /// Arguments only; arity resolved from the method descriptor
    /// (`invokestatic`).
    StaticCall,
    /// Receiver object plus descriptor-resolved arguments
    /// (`invokevirtual`/`invokespecial`/`invokeinterface`).
    InstanceCall,
    /// One int count per array dimension; the count of counts comes from
    /// the immediate (`multianewarray`).
    DimCounts,
    /// Sentinel: consumes nothing, shape not modeled.
    Unknown,
}

impl PopShape {
    /// Pop arity when it is statically known from the opcode alone.
    pub const fn fixed_arity(self) -> Option<u16> {
        match self {
            PopShape::None | PopShape::Unknown => Some(0),
            PopShape::One(_) => Some(1),
            PopShape::Two(..) | PopShape::ArrayLoad | PopShape::FieldStore => Some(2),
            PopShape::Three(..) | PopShape::ArrayStore(_) => Some(3),
            PopShape::Four(..) => Some(4),
            PopShape::StaticFieldStore => Some(1),
            PopShape::StaticCall | PopShape::InstanceCall | PopShape::DimCounts => None,
        }
    }
}

/// Which operand-stack slots an opcode produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushShape {
    None,
    /// One slot of the given kind.
    One(SlotKind),
    /// Fixed number of untyped slots (`dup`/`swap` family).
    Slots(u8),
    /// One slot: int, float or string constant (`ldc`, `ldc_w`).
    Const,
    /// One slot: long or double constant (`ldc2_w`).
    WideConst,
    /// One slot, typed by the field descriptor (`getfield`/`getstatic`).
    FieldLoad,
    /// Zero or one slot depending on the method's return descriptor.
    Call,
    /// Sentinel: produces nothing, shape not modeled.
    Unknown,
}

impl PushShape {
    /// Push arity when it is statically known from the opcode alone.
    pub const fn fixed_arity(self) -> Option<u16> {
        match self {
            PushShape::None | PushShape::Unknown => Some(0),
            PushShape::One(_) | PushShape::Const | PushShape::WideConst | PushShape::FieldLoad => {
                Some(1)
            }
            PushShape::Slots(n) => Some(n as u16),
            PushShape::Call => None,
        }
    }
}
