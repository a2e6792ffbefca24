//! The opcode descriptor table.
//!
//! One entry per opcode byte value. Bytes without a decodable descriptor
//! (reserved opcodes, plus `wide`, the switch family and `invokedynamic`,
//! which this decoder does not model) carry [`ImmShape::Unknown`] shapes and
//! consume zero immediate bytes.

use crate::shapes::{ImmShape, PopShape, PushShape, SlotKind};

/// Descriptor for one opcode: mnemonic plus its three shapes.
#[derive(Clone, Copy, Debug)]
pub struct OpInfo {
    mnemonic: &'static str,
    imm: ImmShape,
    pop: PopShape,
    push: PushShape,
}

impl OpInfo {
    pub const fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    pub const fn imm(&self) -> ImmShape {
        self.imm
    }

    pub const fn pop(&self) -> PopShape {
        self.pop
    }

    pub const fn push(&self) -> PushShape {
        self.push
    }

    /// True for bytes the decoder treats as an opaque single-byte sentinel.
    pub const fn is_unknown(&self) -> bool {
        matches!(self.imm, ImmShape::Unknown)
    }
}

/// Total lookup over all 256 opcode byte values.
pub const fn lookup(opcode: u8) -> &'static OpInfo {
    &TABLE[opcode as usize]
}

/// The full 256-entry descriptor table, indexed by opcode byte.
pub const fn opcode_table() -> &'static [OpInfo; 256] {
    &TABLE
}

/// Number of opcode bytes with a decodable (non-sentinel) descriptor.
pub fn opcode_count() -> usize {
    TABLE.iter().filter(|info| !info.is_unknown()).count()
}

const fn op(mnemonic: &'static str, imm: ImmShape, pop: PopShape, push: PushShape) -> OpInfo {
    OpInfo {
        mnemonic,
        imm,
        pop,
        push,
    }
}

const fn reserved(mnemonic: &'static str) -> OpInfo {
    op(mnemonic, ImmShape::Unknown, PopShape::Unknown, PushShape::Unknown)
}

static TABLE: [OpInfo; 256] = build_table();

#[rustfmt::skip]
const fn build_table() -> [OpInfo; 256] {
    use ImmShape as Im;
    use PopShape as Po;
    use PushShape as Pu;
    use SlotKind::*;

    let mut t = [reserved("unknown"); 256];

    // Constants
    t[0x00] = op("nop",          Im::None,             Po::None,                  Pu::None);
    t[0x01] = op("aconst_null",  Im::ImplicitNull,     Po::None,                  Pu::One(Object));
    t[0x02] = op("iconst_m1",    Im::ImplicitConst(-1), Po::None,                 Pu::One(Int));
    t[0x03] = op("iconst_0",     Im::ImplicitConst(0), Po::None,                  Pu::One(Int));
    t[0x04] = op("iconst_1",     Im::ImplicitConst(1), Po::None,                  Pu::One(Int));
    t[0x05] = op("iconst_2",     Im::ImplicitConst(2), Po::None,                  Pu::One(Int));
    t[0x06] = op("iconst_3",     Im::ImplicitConst(3), Po::None,                  Pu::One(Int));
    t[0x07] = op("iconst_4",     Im::ImplicitConst(4), Po::None,                  Pu::One(Int));
    t[0x08] = op("iconst_5",     Im::ImplicitConst(5), Po::None,                  Pu::One(Int));
    t[0x09] = op("lconst_0",     Im::ImplicitConst(0), Po::None,                  Pu::One(Long));
    t[0x0A] = op("lconst_1",     Im::ImplicitConst(1), Po::None,                  Pu::One(Long));
    t[0x0B] = op("fconst_0",     Im::ImplicitConst(0), Po::None,                  Pu::One(Float));
    t[0x0C] = op("fconst_1",     Im::ImplicitConst(1), Po::None,                  Pu::One(Float));
    t[0x0D] = op("fconst_2",     Im::ImplicitConst(2), Po::None,                  Pu::One(Float));
    t[0x0E] = op("dconst_0",     Im::ImplicitConst(0), Po::None,                  Pu::One(Double));
    t[0x0F] = op("dconst_1",     Im::ImplicitConst(1), Po::None,                  Pu::One(Double));
    t[0x10] = op("bipush",       Im::ByteValue,        Po::None,                  Pu::One(Int));
    t[0x11] = op("sipush",       Im::ShortValue,       Po::None,                  Pu::One(Int));
    t[0x12] = op("ldc",          Im::PoolIndexByte,    Po::None,                  Pu::Const);
    t[0x13] = op("ldc_w",        Im::PoolIndexShort,   Po::None,                  Pu::Const);
    t[0x14] = op("ldc2_w",       Im::PoolIndexShort,   Po::None,                  Pu::WideConst);

    // Loads
    t[0x15] = op("iload",        Im::LocalIndex,       Po::None,                  Pu::One(Int));
    t[0x16] = op("lload",        Im::LocalIndex,       Po::None,                  Pu::One(Long));
    t[0x17] = op("fload",        Im::LocalIndex,       Po::None,                  Pu::One(Float));
    t[0x18] = op("dload",        Im::LocalIndex,       Po::None,                  Pu::One(Double));
    t[0x19] = op("aload",        Im::LocalIndex,       Po::None,                  Pu::One(Object));
    t[0x1A] = op("iload_0",      Im::ImplicitSlot(0),  Po::None,                  Pu::One(Int));
    t[0x1B] = op("iload_1",      Im::ImplicitSlot(1),  Po::None,                  Pu::One(Int));
    t[0x1C] = op("iload_2",      Im::ImplicitSlot(2),  Po::None,                  Pu::One(Int));
    t[0x1D] = op("iload_3",      Im::ImplicitSlot(3),  Po::None,                  Pu::One(Int));
    t[0x1E] = op("lload_0",      Im::ImplicitSlot(0),  Po::None,                  Pu::One(Long));
    t[0x1F] = op("lload_1",      Im::ImplicitSlot(1),  Po::None,                  Pu::One(Long));
    t[0x20] = op("lload_2",      Im::ImplicitSlot(2),  Po::None,                  Pu::One(Long));
    t[0x21] = op("lload_3",      Im::ImplicitSlot(3),  Po::None,                  Pu::One(Long));
    t[0x22] = op("fload_0",      Im::ImplicitSlot(0),  Po::None,                  Pu::One(Float));
    t[0x23] = op("fload_1",      Im::ImplicitSlot(1),  Po::None,                  Pu::One(Float));
    t[0x24] = op("fload_2",      Im::ImplicitSlot(2),  Po::None,                  Pu::One(Float));
    t[0x25] = op("fload_3",      Im::ImplicitSlot(3),  Po::None,                  Pu::One(Float));
    t[0x26] = op("dload_0",      Im::ImplicitSlot(0),  Po::None,                  Pu::One(Double));
    t[0x27] = op("dload_1",      Im::ImplicitSlot(1),  Po::None,                  Pu::One(Double));
    t[0x28] = op("dload_2",      Im::ImplicitSlot(2),  Po::None,                  Pu::One(Double));
    t[0x29] = op("dload_3",      Im::ImplicitSlot(3),  Po::None,                  Pu::One(Double));
    t[0x2A] = op("aload_0",      Im::ImplicitSlot(0),  Po::None,                  Pu::One(Object));
    t[0x2B] = op("aload_1",      Im::ImplicitSlot(1),  Po::None,                  Pu::One(Object));
    t[0x2C] = op("aload_2",      Im::ImplicitSlot(2),  Po::None,                  Pu::One(Object));
    t[0x2D] = op("aload_3",      Im::ImplicitSlot(3),  Po::None,                  Pu::One(Object));
    t[0x2E] = op("iaload",       Im::None,             Po::ArrayLoad,             Pu::One(Int));
    t[0x2F] = op("laload",       Im::None,             Po::ArrayLoad,             Pu::One(Long));
    t[0x30] = op("faload",       Im::None,             Po::ArrayLoad,             Pu::One(Float));
    t[0x31] = op("daload",       Im::None,             Po::ArrayLoad,             Pu::One(Double));
    t[0x32] = op("aaload",       Im::None,             Po::ArrayLoad,             Pu::One(Object));
    t[0x33] = op("baload",       Im::None,             Po::ArrayLoad,             Pu::One(Int));
    t[0x34] = op("caload",       Im::None,             Po::ArrayLoad,             Pu::One(Int));
    t[0x35] = op("saload",       Im::None,             Po::ArrayLoad,             Pu::One(Int));

    // Stores
    t[0x36] = op("istore",       Im::LocalIndex,       Po::One(Int),              Pu::None);
    t[0x37] = op("lstore",       Im::LocalIndex,       Po::One(Long),             Pu::None);
    t[0x38] = op("fstore",       Im::LocalIndex,       Po::One(Float),            Pu::None);
    t[0x39] = op("dstore",       Im::LocalIndex,       Po::One(Double),           Pu::None);
    t[0x3A] = op("astore",       Im::LocalIndex,       Po::One(Object),           Pu::None);
    t[0x3B] = op("istore_0",     Im::ImplicitSlot(0),  Po::One(Int),              Pu::None);
    t[0x3C] = op("istore_1",     Im::ImplicitSlot(1),  Po::One(Int),              Pu::None);
    t[0x3D] = op("istore_2",     Im::ImplicitSlot(2),  Po::One(Int),              Pu::None);
    t[0x3E] = op("istore_3",     Im::ImplicitSlot(3),  Po::One(Int),              Pu::None);
    t[0x3F] = op("lstore_0",     Im::ImplicitSlot(0),  Po::One(Long),             Pu::None);
    t[0x40] = op("lstore_1",     Im::ImplicitSlot(1),  Po::One(Long),             Pu::None);
    t[0x41] = op("lstore_2",     Im::ImplicitSlot(2),  Po::One(Long),             Pu::None);
    t[0x42] = op("lstore_3",     Im::ImplicitSlot(3),  Po::One(Long),             Pu::None);
    t[0x43] = op("fstore_0",     Im::ImplicitSlot(0),  Po::One(Float),            Pu::None);
    t[0x44] = op("fstore_1",     Im::ImplicitSlot(1),  Po::One(Float),            Pu::None);
    t[0x45] = op("fstore_2",     Im::ImplicitSlot(2),  Po::One(Float),            Pu::None);
    t[0x46] = op("fstore_3",     Im::ImplicitSlot(3),  Po::One(Float),            Pu::None);
    t[0x47] = op("dstore_0",     Im::ImplicitSlot(0),  Po::One(Double),           Pu::None);
    t[0x48] = op("dstore_1",     Im::ImplicitSlot(1),  Po::One(Double),           Pu::None);
    t[0x49] = op("dstore_2",     Im::ImplicitSlot(2),  Po::One(Double),           Pu::None);
    t[0x4A] = op("dstore_3",     Im::ImplicitSlot(3),  Po::One(Double),           Pu::None);
    t[0x4B] = op("astore_0",     Im::ImplicitSlot(0),  Po::One(Object),           Pu::None);
    t[0x4C] = op("astore_1",     Im::ImplicitSlot(1),  Po::One(Object),           Pu::None);
    t[0x4D] = op("astore_2",     Im::ImplicitSlot(2),  Po::One(Object),           Pu::None);
    t[0x4E] = op("astore_3",     Im::ImplicitSlot(3),  Po::One(Object),           Pu::None);
    t[0x4F] = op("iastore",      Im::None,             Po::ArrayStore(Int),       Pu::None);
    t[0x50] = op("lastore",      Im::None,             Po::ArrayStore(Long),      Pu::None);
    t[0x51] = op("fastore",      Im::None,             Po::ArrayStore(Float),     Pu::None);
    t[0x52] = op("dastore",      Im::None,             Po::ArrayStore(Double),    Pu::None);
    t[0x53] = op("aastore",      Im::None,             Po::ArrayStore(Object),    Pu::None);
    t[0x54] = op("bastore",      Im::None,             Po::ArrayStore(Int),       Pu::None);
    t[0x55] = op("castore",      Im::None,             Po::ArrayStore(Int),       Pu::None);
    t[0x56] = op("sastore",      Im::None,             Po::ArrayStore(Int),       Pu::None);

    // Stack
    t[0x57] = op("pop",          Im::None,             Po::One(Raw),              Pu::None);
    t[0x58] = op("pop2",         Im::None,             Po::Two(Raw, Raw),         Pu::None);
    t[0x59] = op("dup",          Im::None,             Po::One(Raw),              Pu::Slots(2));
    t[0x5A] = op("dup_x1",       Im::None,             Po::Two(Raw, Raw),         Pu::Slots(3));
    t[0x5B] = op("dup_x2",       Im::None,             Po::Three(Raw, Raw, Raw),  Pu::Slots(4));
    t[0x5C] = op("dup2",         Im::None,             Po::Two(Raw, Raw),         Pu::Slots(4));
    t[0x5D] = op("dup2_x1",      Im::None,             Po::Three(Raw, Raw, Raw),  Pu::Slots(5));
    t[0x5E] = op("dup2_x2",      Im::None,             Po::Four(Raw, Raw, Raw, Raw), Pu::Slots(6));
    t[0x5F] = op("swap",         Im::None,             Po::Two(Raw, Raw),         Pu::Slots(2));

    // Arithmetic
    t[0x60] = op("iadd",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x61] = op("ladd",         Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x62] = op("fadd",         Im::None,             Po::Two(Float, Float),     Pu::One(Float));
    t[0x63] = op("dadd",         Im::None,             Po::Two(Double, Double),   Pu::One(Double));
    t[0x64] = op("isub",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x65] = op("lsub",         Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x66] = op("fsub",         Im::None,             Po::Two(Float, Float),     Pu::One(Float));
    t[0x67] = op("dsub",         Im::None,             Po::Two(Double, Double),   Pu::One(Double));
    t[0x68] = op("imul",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x69] = op("lmul",         Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x6A] = op("fmul",         Im::None,             Po::Two(Float, Float),     Pu::One(Float));
    t[0x6B] = op("dmul",         Im::None,             Po::Two(Double, Double),   Pu::One(Double));
    t[0x6C] = op("idiv",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x6D] = op("ldiv",         Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x6E] = op("fdiv",         Im::None,             Po::Two(Float, Float),     Pu::One(Float));
    t[0x6F] = op("ddiv",         Im::None,             Po::Two(Double, Double),   Pu::One(Double));
    t[0x70] = op("irem",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x71] = op("lrem",         Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x72] = op("frem",         Im::None,             Po::Two(Float, Float),     Pu::One(Float));
    t[0x73] = op("drem",         Im::None,             Po::Two(Double, Double),   Pu::One(Double));
    t[0x74] = op("ineg",         Im::None,             Po::One(Int),              Pu::One(Int));
    t[0x75] = op("lneg",         Im::None,             Po::One(Long),             Pu::One(Long));
    t[0x76] = op("fneg",         Im::None,             Po::One(Float),            Pu::One(Float));
    t[0x77] = op("dneg",         Im::None,             Po::One(Double),           Pu::One(Double));
    t[0x78] = op("ishl",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x79] = op("lshl",         Im::None,             Po::Two(Long, Int),        Pu::One(Long));
    t[0x7A] = op("ishr",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x7B] = op("lshr",         Im::None,             Po::Two(Long, Int),        Pu::One(Long));
    t[0x7C] = op("iushr",        Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x7D] = op("lushr",        Im::None,             Po::Two(Long, Int),        Pu::One(Long));
    t[0x7E] = op("iand",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x7F] = op("land",         Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x80] = op("ior",          Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x81] = op("lor",          Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x82] = op("ixor",         Im::None,             Po::Two(Int, Int),         Pu::One(Int));
    t[0x83] = op("lxor",         Im::None,             Po::Two(Long, Long),       Pu::One(Long));
    t[0x84] = op("iinc",         Im::LocalIndexValue,  Po::None,                  Pu::None);

    // Conversions
    t[0x85] = op("i2l",          Im::None,             Po::One(Int),              Pu::One(Long));
    t[0x86] = op("i2f",          Im::None,             Po::One(Int),              Pu::One(Float));
    t[0x87] = op("i2d",          Im::None,             Po::One(Int),              Pu::One(Double));
    t[0x88] = op("l2i",          Im::None,             Po::One(Long),             Pu::One(Int));
    t[0x89] = op("l2f",          Im::None,             Po::One(Long),             Pu::One(Float));
    t[0x8A] = op("l2d",          Im::None,             Po::One(Long),             Pu::One(Double));
    t[0x8B] = op("f2i",          Im::None,             Po::One(Float),            Pu::One(Int));
    t[0x8C] = op("f2l",          Im::None,             Po::One(Float),            Pu::One(Long));
    t[0x8D] = op("f2d",          Im::None,             Po::One(Float),            Pu::One(Double));
    t[0x8E] = op("d2i",          Im::None,             Po::One(Double),           Pu::One(Int));
    t[0x8F] = op("d2l",          Im::None,             Po::One(Double),           Pu::One(Long));
    t[0x90] = op("d2f",          Im::None,             Po::One(Double),           Pu::One(Float));
    t[0x91] = op("i2b",          Im::None,             Po::One(Int),              Pu::One(Int));
    t[0x92] = op("i2c",          Im::None,             Po::One(Int),              Pu::One(Int));
    t[0x93] = op("i2s",          Im::None,             Po::One(Int),              Pu::One(Int));

    // Comparisons
    t[0x94] = op("lcmp",         Im::None,             Po::Two(Long, Long),       Pu::One(Int));
    t[0x95] = op("fcmpl",        Im::None,             Po::Two(Float, Float),     Pu::One(Int));
    t[0x96] = op("fcmpg",        Im::None,             Po::Two(Float, Float),     Pu::One(Int));
    t[0x97] = op("dcmpl",        Im::None,             Po::Two(Double, Double),   Pu::One(Int));
    t[0x98] = op("dcmpg",        Im::None,             Po::Two(Double, Double),   Pu::One(Int));
    t[0x99] = op("ifeq",         Im::BranchShort,      Po::One(Int),              Pu::None);
    t[0x9A] = op("ifne",         Im::BranchShort,      Po::One(Int),              Pu::None);
    t[0x9B] = op("iflt",         Im::BranchShort,      Po::One(Int),              Pu::None);
    t[0x9C] = op("ifge",         Im::BranchShort,      Po::One(Int),              Pu::None);
    t[0x9D] = op("ifgt",         Im::BranchShort,      Po::One(Int),              Pu::None);
    t[0x9E] = op("ifle",         Im::BranchShort,      Po::One(Int),              Pu::None);
    t[0x9F] = op("if_icmpeq",    Im::BranchShort,      Po::Two(Int, Int),         Pu::None);
    t[0xA0] = op("if_icmpne",    Im::BranchShort,      Po::Two(Int, Int),         Pu::None);
    t[0xA1] = op("if_icmplt",    Im::BranchShort,      Po::Two(Int, Int),         Pu::None);
    t[0xA2] = op("if_icmpge",    Im::BranchShort,      Po::Two(Int, Int),         Pu::None);
    t[0xA3] = op("if_icmpgt",    Im::BranchShort,      Po::Two(Int, Int),         Pu::None);
    t[0xA4] = op("if_icmple",    Im::BranchShort,      Po::Two(Int, Int),         Pu::None);
    t[0xA5] = op("if_acmpeq",    Im::BranchShort,      Po::Two(Object, Object),   Pu::None);
    t[0xA6] = op("if_acmpne",    Im::BranchShort,      Po::Two(Object, Object),   Pu::None);

    // Control
    t[0xA7] = op("goto",         Im::BranchShort,      Po::None,                  Pu::None);
    t[0xA8] = op("jsr",          Im::BranchShort,      Po::None,                  Pu::One(RetAddr));
    t[0xA9] = op("ret",          Im::LocalIndex,       Po::None,                  Pu::None);
    t[0xAA] = reserved("tableswitch");
    t[0xAB] = reserved("lookupswitch");
    t[0xAC] = op("ireturn",      Im::None,             Po::One(Int),              Pu::None);
    t[0xAD] = op("lreturn",      Im::None,             Po::One(Long),             Pu::None);
    t[0xAE] = op("freturn",      Im::None,             Po::One(Float),            Pu::None);
    t[0xAF] = op("dreturn",      Im::None,             Po::One(Double),           Pu::None);
    t[0xB0] = op("areturn",      Im::None,             Po::One(Object),           Pu::None);
    t[0xB1] = op("return",       Im::None,             Po::None,                  Pu::None);

    // References
    t[0xB2] = op("getstatic",    Im::FieldIndex,       Po::None,                  Pu::FieldLoad);
    t[0xB3] = op("putstatic",    Im::FieldIndex,       Po::StaticFieldStore,      Pu::None);
    t[0xB4] = op("getfield",     Im::FieldIndex,       Po::One(Object),           Pu::FieldLoad);
    t[0xB5] = op("putfield",     Im::FieldIndex,       Po::FieldStore,            Pu::None);
    t[0xB6] = op("invokevirtual",   Im::MethodIndex,      Po::InstanceCall,       Pu::Call);
    t[0xB7] = op("invokespecial",   Im::MethodIndex,      Po::InstanceCall,       Pu::Call);
    t[0xB8] = op("invokestatic",    Im::MethodIndex,      Po::StaticCall,         Pu::Call);
    t[0xB9] = op("invokeinterface", Im::MethodIndexExtra, Po::InstanceCall,       Pu::Call);
    t[0xBA] = reserved("invokedynamic");
    t[0xBB] = op("new",          Im::PoolIndexShort,   Po::None,                  Pu::One(Object));
    t[0xBC] = op("newarray",     Im::ByteValue,        Po::One(Int),              Pu::One(Array));
    t[0xBD] = op("anewarray",    Im::PoolIndexShort,   Po::One(Int),              Pu::One(Array));
    t[0xBE] = op("arraylength",  Im::None,             Po::One(Array),            Pu::One(Int));
    t[0xBF] = op("athrow",       Im::None,             Po::One(Object),           Pu::None);
    t[0xC0] = op("checkcast",    Im::PoolIndexShort,   Po::One(Object),           Pu::One(Object));
    t[0xC1] = op("instanceof",   Im::PoolIndexShort,   Po::One(Object),           Pu::One(Int));
    t[0xC2] = op("monitorenter", Im::None,             Po::One(Object),           Pu::None);
    t[0xC3] = op("monitorexit",  Im::None,             Po::One(Object),           Pu::None);

    // Extended
    t[0xC4] = reserved("wide");
    t[0xC5] = op("multianewarray", Im::PoolIndexDims,  Po::DimCounts,             Pu::One(Array));
    t[0xC6] = op("ifnull",       Im::BranchShort,      Po::One(Object),           Pu::None);
    t[0xC7] = op("ifnonnull",    Im::BranchShort,      Po::One(Object),           Pu::None);
    t[0xC8] = op("goto_w",       Im::BranchWide,       Po::None,                  Pu::None);
    t[0xC9] = op("jsr_w",        Im::BranchWide,       Po::None,                  Pu::One(RetAddr));

    // Reserved
    t[0xCA] = reserved("breakpoint");
    t[0xFE] = reserved("impdep1");
    t[0xFF] = reserved("impdep2");

    t
}
