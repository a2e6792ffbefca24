//! Diagnostic renderers over a decoded method.
//!
//! Two read-only views: a linear per-instruction listing, and a recursive
//! tree walk that follows producer links to print the nested-expression
//! form of a computation. Neither mutates the graph; the producer links
//! *are* the tree, traversed lazily.

use std::fmt::{self, Write};

use jbc_isa::{ImmShape, PopShape};

use crate::cpool::{ConstantPool, PoolEntry};
use crate::instruction::{Immediate, Instruction, Popped};
use crate::method::MethodGraph;
use crate::Pc;

/// Optional collaborator resolving local-variable names for diagnostics.
///
/// `pc` is the first PC at which the slot's scope is live (the instruction's
/// successor for loads/stores). Lookups that fail simply omit the name.
pub trait LocalNames {
    fn local_name(&self, pc: Pc, slot: u16) -> Option<&str>;
}

/// Errors from the tree renderer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A producer link points at a PC with no decoded instruction. This is
    /// an invariant violation in the graph, reported rather than swallowed.
    #[error("no instruction decoded at pc {pc}")]
    DanglingProducer { pc: u32 },

    #[error(transparent)]
    Fmt(#[from] fmt::Error),
}

/// Write the linear listing: one line per instruction in PC order.
pub fn write_listing<W: Write>(
    out: &mut W,
    graph: &MethodGraph,
    cpool: &ConstantPool,
    locals: Option<&dyn LocalNames>,
) -> fmt::Result {
    for insn in graph.instructions() {
        write!(out, "{:4} {:<14}", insn.pc, insn.info.mnemonic())?;
        write_immediate(out, insn, cpool, locals, ImmStyle::Listing)?;
        write_pops(out, insn)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Convenience wrapper returning the listing as a `String`.
pub fn listing_string(
    graph: &MethodGraph,
    cpool: &ConstantPool,
    locals: Option<&dyn LocalNames>,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_listing(&mut out, graph, cpool, locals);
    out
}

/// Write the nested-expression tree rooted at the instruction at `pc`:
/// the instruction, then each operand's producer one level deeper,
/// depth-first in declared operand order.
pub fn write_tree<W: Write>(
    out: &mut W,
    graph: &MethodGraph,
    pc: Pc,
    cpool: &ConstantPool,
    locals: Option<&dyn LocalNames>,
) -> Result<(), RenderError> {
    write_tree_node(out, graph, pc, 0, cpool, locals)
}

/// Convenience wrapper returning the tree as a `String`.
pub fn tree_string(
    graph: &MethodGraph,
    pc: Pc,
    cpool: &ConstantPool,
    locals: Option<&dyn LocalNames>,
) -> Result<String, RenderError> {
    let mut out = String::new();
    write_tree(&mut out, graph, pc, cpool, locals)?;
    Ok(out)
}

fn write_tree_node<W: Write>(
    out: &mut W,
    graph: &MethodGraph,
    pc: Pc,
    depth: usize,
    cpool: &ConstantPool,
    locals: Option<&dyn LocalNames>,
) -> Result<(), RenderError> {
    let insn = graph.at(pc).ok_or(RenderError::DanglingProducer { pc })?;
    for _ in 0..depth {
        out.write_str("   ")?;
    }
    write!(out, "{:4} {}", insn.pc, insn.info.mnemonic())?;
    write_immediate(out, insn, cpool, locals, ImmStyle::Tree)?;
    writeln!(out)?;
    for producer in insn.popped.producers() {
        write_tree_node(out, graph, producer, depth + 1, cpool, locals)?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ImmStyle {
    /// Kind-prefixed values, e.g. ` INTEGER 42`, ` byte 7`.
    Listing,
    /// Bare values for the nested-expression view.
    Tree,
}

fn write_immediate<W: Write>(
    out: &mut W,
    insn: &Instruction,
    cpool: &ConstantPool,
    locals: Option<&dyn LocalNames>,
    style: ImmStyle,
) -> fmt::Result {
    // Implicit forms carry no decoded immediate; render from the shape.
    match insn.info.imm() {
        ImmShape::ImplicitNull => return write!(out, " null"),
        ImmShape::ImplicitConst(c) => return write!(out, " {c}"),
        ImmShape::ImplicitSlot(slot) => {
            if let Some(name) = lookup_local(locals, insn, slot as u16) {
                write!(out, " {name}")?;
            }
            return Ok(());
        }
        _ => {}
    }

    match insn.imm {
        Immediate::None | Immediate::Unknown => Ok(()),
        Immediate::Local(index) => {
            write!(out, " {index}")?;
            if let Some(name) = lookup_local(locals, insn, index as u16) {
                write!(out, " [{name}]")?;
            }
            Ok(())
        }
        Immediate::Pool(index) => write_pool_constant(out, cpool, index, style),
        Immediate::Byte(value) => match style {
            ImmStyle::Listing => write!(out, " byte {value}"),
            ImmStyle::Tree => write!(out, " {value}"),
        },
        Immediate::Short(value) => match style {
            ImmStyle::Listing => write!(out, " short {value}"),
            ImmStyle::Tree => write!(out, " {value}"),
        },
        Immediate::Branch(target) => write!(out, " {target}"),
        Immediate::Field(index)
        | Immediate::Method(index)
        | Immediate::InterfaceMethod { method: index, .. } => {
            match cpool.member_name(index) {
                Ok(name) => write!(out, " {name}"),
                Err(_) => write!(out, " #{index}"),
            }
        }
        Immediate::LocalValue { local, value } => write!(out, " {local} {value:+}"),
        Immediate::PoolDims { class, dims } => write!(out, " #{class} dims {dims}"),
    }
}

fn write_pool_constant<W: Write>(
    out: &mut W,
    cpool: &ConstantPool,
    index: u16,
    style: ImmStyle,
) -> fmt::Result {
    let prefixed = style == ImmStyle::Listing;
    match cpool.entry(index) {
        Ok(PoolEntry::Integer(v)) if prefixed => write!(out, " INTEGER {v}"),
        Ok(PoolEntry::Float(v)) if prefixed => write!(out, " FLOAT {v}"),
        Ok(PoolEntry::Long(v)) if prefixed => write!(out, " LONG {v}"),
        Ok(PoolEntry::Double(v)) if prefixed => write!(out, " DOUBLE {v}"),
        Ok(PoolEntry::Integer(v)) => write!(out, " {v}"),
        Ok(PoolEntry::Float(v)) => write!(out, " {v}"),
        Ok(PoolEntry::Long(v)) => write!(out, " {v}"),
        Ok(PoolEntry::Double(v)) => write!(out, " {v}"),
        // Renderers never fail on pool contents; fall back to the index.
        _ => write!(out, " constant pool #{index}"),
    }
}

fn lookup_local<'a>(
    locals: Option<&'a dyn LocalNames>,
    insn: &Instruction,
    slot: u16,
) -> Option<&'a str> {
    // Scope starts at the successor: a store's variable is live after it.
    locals?.local_name(insn.next_pc(), slot)
}

fn write_pops<W: Write>(out: &mut W, insn: &Instruction) -> fmt::Result {
    let labeled = labeled_producers(insn);
    if labeled.is_empty() {
        return Ok(());
    }
    out.write_str("  <-- (")?;
    for (i, (label, pc)) in labeled.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "({label}){pc}")?;
    }
    out.write_str(")")
}

/// Pair each popped producer PC with a role or kind label for the listing.
fn labeled_producers(insn: &Instruction) -> Vec<(&'static str, Pc)> {
    match (&insn.popped, insn.info.pop()) {
        (Popped::None | Popped::Unknown, _) => Vec::new(),
        (Popped::One { value }, PopShape::One(k)) => vec![(k.label(), *value)],
        (Popped::Two { first, second }, PopShape::Two(k1, k2)) => {
            vec![(k1.label(), *first), (k2.label(), *second)]
        }
        (
            Popped::Three {
                first,
                second,
                third,
            },
            PopShape::Three(k1, k2, k3),
        ) => vec![(k1.label(), *first), (k2.label(), *second), (k3.label(), *third)],
        (
            Popped::Four {
                first,
                second,
                third,
                fourth,
            },
            PopShape::Four(k1, k2, k3, k4),
        ) => vec![
            (k1.label(), *first),
            (k2.label(), *second),
            (k3.label(), *third),
            (k4.label(), *fourth),
        ],
        (Popped::ArrayLoad { array, index }, _) => {
            vec![("array", *array), ("index", *index)]
        }
        (
            Popped::ArrayStore {
                array,
                index,
                value,
            },
            shape,
        ) => {
            let value_label = match shape {
                PopShape::ArrayStore(k) => k.label(),
                _ => "value",
            };
            vec![("array", *array), ("index", *index), (value_label, *value)]
        }
        (Popped::StaticFieldStore { value }, _) => vec![("value", *value)],
        (Popped::FieldStore { object, value }, _) => {
            vec![("object", *object), ("value", *value)]
        }
        (Popped::StaticCall { args }, _) => {
            args.iter().map(|pc| ("arg", *pc)).collect()
        }
        (Popped::InstanceCall { receiver, args }, _) => {
            let mut out = vec![("object", *receiver)];
            out.extend(args.iter().map(|pc| ("arg", *pc)));
            out
        }
        (Popped::DimCounts { counts }, _) => {
            counts.iter().map(|pc| ("dim", *pc)).collect()
        }
        // Shape/record mismatch cannot be produced by the decoder; degrade
        // to untyped labels rather than panic.
        (popped, _) => popped.producers().into_iter().map(|pc| ("value", pc)).collect(),
    }
}
