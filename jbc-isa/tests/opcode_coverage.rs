//! Systematic opcode_table() coverage tests.
//!
//! Validates shape consistency for every opcode byte value.

use jbc_isa::{ImmShape, PopShape, PushShape, lookup, opcode_count, opcode_table};

#[test]
fn decodable_opcode_count_is_stable() {
    // 0x00..=0xc9 minus tableswitch, lookupswitch, invokedynamic and wide.
    assert_eq!(opcode_count(), 198);
}

#[test]
fn table_is_total_over_all_byte_values() {
    assert_eq!(opcode_table().len(), 256);
    for (byte, info) in opcode_table().iter().enumerate() {
        assert!(
            std::ptr::eq(lookup(byte as u8), info),
            "lookup({byte:#04x}) does not return the table entry"
        );
    }
}

#[test]
fn all_entries_have_wellformed_mnemonics() {
    for (byte, info) in opcode_table().iter().enumerate() {
        let m = info.mnemonic();
        assert!(!m.is_empty(), "opcode {byte:#04x} has empty mnemonic");
        assert!(
            m.bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_'),
            "mnemonic '{m}' contains unexpected characters"
        );
    }
}

#[test]
fn sentinel_entries_are_fully_opaque() {
    for (byte, info) in opcode_table().iter().enumerate() {
        if info.is_unknown() {
            assert_eq!(
                info.pop(),
                PopShape::Unknown,
                "sentinel {byte:#04x} has a modeled pop shape"
            );
            assert_eq!(
                info.push(),
                PushShape::Unknown,
                "sentinel {byte:#04x} has a modeled push shape"
            );
            assert_eq!(
                info.imm().byte_count(),
                0,
                "sentinel {byte:#04x} claims immediate bytes"
            );
        }
    }
}

#[test]
fn no_duplicate_mnemonics_among_decodable_entries() {
    let mut seen = std::collections::HashMap::new();
    for (byte, info) in opcode_table().iter().enumerate() {
        if info.is_unknown() {
            continue;
        }
        if let Some(prev) = seen.insert(info.mnemonic(), byte) {
            panic!(
                "mnemonic '{}' used by both {prev:#04x} and {byte:#04x}",
                info.mnemonic()
            );
        }
    }
}

#[test]
fn call_push_shape_pairs_with_call_pop_shape() {
    // The decoder resolves both sides of a call from the same descriptor;
    // a table entry pairing Call with a non-call pop would desync them.
    for (byte, info) in opcode_table().iter().enumerate() {
        if info.push() == PushShape::Call {
            assert!(
                matches!(info.pop(), PopShape::StaticCall | PopShape::InstanceCall),
                "{byte:#04x} '{}' pushes Call but pops {:?}",
                info.mnemonic(),
                info.pop()
            );
        }
        if matches!(info.pop(), PopShape::StaticCall | PopShape::InstanceCall) {
            assert_eq!(
                info.push(),
                PushShape::Call,
                "{byte:#04x} '{}' pops a call but pushes {:?}",
                info.mnemonic(),
                info.push()
            );
        }
    }
}

#[test]
fn dynamic_arity_shapes_have_no_fixed_count() {
    for info in opcode_table() {
        match info.pop() {
            PopShape::StaticCall | PopShape::InstanceCall | PopShape::DimCounts => {
                assert_eq!(
                    info.pop().fixed_arity(),
                    None,
                    "'{}' pop arity should come from the pool or immediate",
                    info.mnemonic()
                );
            }
            other => {
                assert!(
                    other.fixed_arity().is_some(),
                    "'{}' pop shape {other:?} has no static arity",
                    info.mnemonic()
                );
            }
        }
    }
}

#[test]
fn immediate_byte_counts_match_known_encodings() {
    let expect = [
        ("nop", 0u32),
        ("iconst_0", 0),
        ("bipush", 1),
        ("sipush", 2),
        ("ldc", 1),
        ("ldc_w", 2),
        ("iinc", 2),
        ("goto", 2),
        ("goto_w", 4),
        ("getfield", 2),
        ("invokevirtual", 2),
        ("invokeinterface", 4),
        ("multianewarray", 3),
    ];
    for (mnemonic, bytes) in expect {
        let info = opcode_table()
            .iter()
            .find(|i| i.mnemonic() == mnemonic)
            .unwrap_or_else(|| panic!("no entry for '{mnemonic}'"));
        assert_eq!(
            info.imm().byte_count(),
            bytes,
            "'{mnemonic}' immediate width"
        );
    }
}

#[test]
fn branch_mnemonics_carry_branch_immediates() {
    for info in opcode_table() {
        let m = info.mnemonic();
        if m.starts_with("if") || m.starts_with("goto") || m.starts_with("jsr") {
            assert!(
                matches!(info.imm(), ImmShape::BranchShort | ImmShape::BranchWide),
                "'{m}' should carry a branch offset, has {:?}",
                info.imm()
            );
        }
    }
}

#[test]
fn dup_family_net_stack_effect() {
    let expect = [
        ("dup", 1u16, 2u16),
        ("dup_x1", 2, 3),
        ("dup_x2", 3, 4),
        ("dup2", 2, 4),
        ("dup2_x1", 3, 5),
        ("dup2_x2", 4, 6),
        ("swap", 2, 2),
        ("pop", 1, 0),
        ("pop2", 2, 0),
    ];
    for (mnemonic, pops, pushes) in expect {
        let info = opcode_table()
            .iter()
            .find(|i| i.mnemonic() == mnemonic)
            .unwrap_or_else(|| panic!("no entry for '{mnemonic}'"));
        assert_eq!(info.pop().fixed_arity(), Some(pops), "'{mnemonic}' pops");
        assert_eq!(info.push().fixed_arity(), Some(pushes), "'{mnemonic}' pushes");
    }
}

#[test]
fn specific_entries_spot_check() {
    let iadd = lookup(0x60);
    assert_eq!(iadd.mnemonic(), "iadd");
    assert_eq!(iadd.pop().fixed_arity(), Some(2));
    assert_eq!(iadd.push().fixed_arity(), Some(1));

    let athrow = lookup(0xbf);
    assert_eq!(athrow.mnemonic(), "athrow");
    assert_eq!(athrow.push(), PushShape::None);

    assert!(lookup(0xaa).is_unknown(), "tableswitch is not decodable");
    assert!(lookup(0xc4).is_unknown(), "wide is not decodable");
    assert!(lookup(0xba).is_unknown(), "invokedynamic is not decodable");
    assert!(lookup(0xcb).is_unknown(), "0xcb is reserved");
}
