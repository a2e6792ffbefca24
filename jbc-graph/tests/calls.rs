//! Call decoding: arity resolved from the constant pool at decode time.

use jbc_graph::cpool::{ConstantPool, PoolEntry, PoolError};
use jbc_graph::instruction::{Immediate, Popped};
use jbc_graph::{DecodeError, decode_method};

/// Pool holding one method reference with the given name and descriptor.
fn pool_with_method(name: &str, descriptor: &str, interface: bool) -> (ConstantPool, u16) {
    let mut pool = ConstantPool::new();
    let class_name = pool.push(PoolEntry::Utf8("Widget".to_string()));
    let class = pool.push(PoolEntry::Class { name: class_name });
    let method_name = pool.push(PoolEntry::Utf8(name.to_string()));
    let desc = pool.push(PoolEntry::Utf8(descriptor.to_string()));
    let nat = pool.push(PoolEntry::NameAndType {
        name: method_name,
        descriptor: desc,
    });
    let entry = if interface {
        PoolEntry::InterfaceMethodRef {
            class,
            name_and_type: nat,
        }
    } else {
        PoolEntry::MethodRef {
            class,
            name_and_type: nat,
        }
    };
    let index = pool.push(entry);
    (pool, index)
}

#[test]
fn instance_call_pops_receiver_and_args() {
    let (pool, index) = pool_with_method("resize", "(II)V", false);

    // aload_0; iconst_0; iconst_1; invokevirtual #resize
    let code = [0x2a, 0x03, 0x04, 0xb6, 0x00, index as u8];
    let graph = decode_method(&code, &pool, 3).unwrap();
    assert_eq!(graph.len(), 4);

    let call = &graph.instructions()[3];
    assert_eq!(call.info.mnemonic(), "invokevirtual");
    assert_eq!(call.imm, Immediate::Method(index));
    assert_eq!(
        call.popped,
        Popped::InstanceCall {
            receiver: 0,
            args: vec![1, 2]
        },
        "receiver sits below the arguments, args stay left-to-right"
    );
}

#[test]
fn void_call_pushes_nothing() {
    let (pool, index) = pool_with_method("run", "()V", false);

    // aload_0; invokevirtual #run; aload_0; invokevirtual #run
    let code = [0x2a, 0xb6, 0x00, index as u8, 0x2a, 0xb6, 0x00, index as u8];
    let graph = decode_method(&code, &pool, 1).unwrap();
    // A leaked return slot would overflow the depth-1 simulation at pc 4.
    assert_eq!(graph.instructions()[2].stack_base, 0);
}

#[test]
fn static_call_result_is_produced_by_the_call() {
    let (pool, index) = pool_with_method("abs", "(I)I", false);

    // iconst_0; invokestatic #abs; ireturn
    let code = [0x03, 0xb8, 0x00, index as u8, 0xac];
    let graph = decode_method(&code, &pool, 1).unwrap();

    let call = &graph.instructions()[1];
    assert_eq!(call.popped, Popped::StaticCall { args: vec![0] });

    let ireturn = &graph.instructions()[2];
    assert_eq!(
        ireturn.popped,
        Popped::One { value: 1 },
        "the returned value should link to the call instruction"
    );
}

#[test]
fn interface_call_decodes_count_and_zero_bytes() {
    let (pool, index) = pool_with_method("accept", "(I)V", true);

    // aload_0; iconst_0; invokeinterface #accept, 2, 0
    let code = [0x2a, 0x03, 0xb9, 0x00, index as u8, 0x02, 0x00];
    let graph = decode_method(&code, &pool, 2).unwrap();

    let call = &graph.instructions()[2];
    assert_eq!(call.length, 5);
    assert_eq!(
        call.imm,
        Immediate::InterfaceMethod {
            method: index,
            count: 2
        }
    );
    assert_eq!(
        call.popped,
        Popped::InstanceCall {
            receiver: 0,
            args: vec![1]
        },
        "arity comes from the descriptor, not the encoded count"
    );
}

#[test]
fn call_through_missing_pool_entry_fails() {
    // aload_0; invokevirtual #9 against an empty pool.
    let code = [0x2a, 0xb6, 0x00, 0x09];
    let err = decode_method(&code, &ConstantPool::new(), 1).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Pool {
            pc: 1,
            source: PoolError::BadIndex(9)
        }
    );
}

#[test]
fn call_through_non_method_entry_fails() {
    let mut pool = ConstantPool::new();
    let index = pool.push(PoolEntry::Integer(42));

    let code = [0x2a, 0xb6, 0x00, index as u8];
    let err = decode_method(&code, &pool, 1).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Pool {
            pc: 1,
            source: PoolError::WrongKind {
                index,
                expected: "method reference",
            }
        }
    );
}

#[test]
fn call_with_malformed_descriptor_fails() {
    let (pool, index) = pool_with_method("broken", "(Q)V", false);

    let code = [0x2a, 0xb6, 0x00, index as u8];
    let err = decode_method(&code, &pool, 1).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Pool {
            pc: 1,
            source: PoolError::BadDescriptor("(Q)V".to_string())
        }
    );
}
