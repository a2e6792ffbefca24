//! On-disk method dump: a YAML file holding one method's code bytes,
//! resolved constant pool and optional local-variable names.
//!
//! The dump stands in for a class-file reader: it carries exactly the
//! inputs the decoder needs and nothing else.

use std::path::Path;

use serde::Deserialize;

use jbc_graph::Pc;
use jbc_graph::cpool::{ConstantPool, PoolEntry};
use jbc_graph::render::LocalNames;

#[derive(Debug, Deserialize)]
pub struct MethodDump {
    /// Declared maximum operand-stack depth.
    pub max_stack: u16,
    /// Code bytes as hex digits; whitespace between bytes is ignored.
    pub code: String,
    /// Pool entries in order; entry numbering starts at 1 and long/double
    /// entries take two indices, as in a class file.
    #[serde(default)]
    pub pool: Vec<DumpEntry>,
    #[serde(default)]
    pub locals: Vec<LocalEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpEntry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name: u16 },
    String { utf8: u16 },
    FieldRef { class: u16, name_and_type: u16 },
    MethodRef { class: u16, name_and_type: u16 },
    InterfaceMethodRef { class: u16, name_and_type: u16 },
    NameAndType { name: u16, descriptor: u16 },
}

#[derive(Debug, Deserialize)]
pub struct LocalEntry {
    pub slot: u16,
    pub name: String,
    /// First PC at which the name is in scope.
    #[serde(default)]
    pub start_pc: u32,
    /// Scope length in bytes; defaults to the rest of the method.
    #[serde(default = "whole_method")]
    pub length: u32,
}

fn whole_method() -> u32 {
    u32::MAX
}

/// Scoped slot-name lookup over the dump's local entries.
pub struct LocalTable {
    entries: Vec<LocalEntry>,
}

impl LocalNames for LocalTable {
    fn local_name(&self, pc: Pc, slot: u16) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.slot == slot && pc >= e.start_pc && pc - e.start_pc < e.length)
            .map(|e| e.name.as_str())
    }
}

impl MethodDump {
    pub fn load(path: &Path) -> Result<MethodDump, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("reading {}: {e}", path.display()))?;
        serde_yaml::from_str(&text).map_err(|e| format!("parsing {}: {e}", path.display()))
    }

    pub fn code_bytes(&self) -> Result<Vec<u8>, String> {
        let mut out = Vec::new();
        let mut pending: Option<u8> = None;
        for (i, c) in self.code.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let digit = c
                .to_digit(16)
                .ok_or_else(|| format!("bad hex digit {c:?} at position {i} in code"))?
                as u8;
            match pending.take() {
                Some(hi) => out.push(hi << 4 | digit),
                None => pending = Some(digit),
            }
        }
        if pending.is_some() {
            return Err("odd number of hex digits in code".to_string());
        }
        Ok(out)
    }

    pub fn build_pool(&self) -> ConstantPool {
        let mut pool = ConstantPool::new();
        for entry in &self.pool {
            pool.push(match entry {
                DumpEntry::Utf8(s) => PoolEntry::Utf8(s.clone()),
                DumpEntry::Integer(v) => PoolEntry::Integer(*v),
                DumpEntry::Float(v) => PoolEntry::Float(*v),
                DumpEntry::Long(v) => PoolEntry::Long(*v),
                DumpEntry::Double(v) => PoolEntry::Double(*v),
                DumpEntry::Class { name } => PoolEntry::Class { name: *name },
                DumpEntry::String { utf8 } => PoolEntry::String { utf8: *utf8 },
                DumpEntry::FieldRef {
                    class,
                    name_and_type,
                } => PoolEntry::FieldRef {
                    class: *class,
                    name_and_type: *name_and_type,
                },
                DumpEntry::MethodRef {
                    class,
                    name_and_type,
                } => PoolEntry::MethodRef {
                    class: *class,
                    name_and_type: *name_and_type,
                },
                DumpEntry::InterfaceMethodRef {
                    class,
                    name_and_type,
                } => PoolEntry::InterfaceMethodRef {
                    class: *class,
                    name_and_type: *name_and_type,
                },
                DumpEntry::NameAndType { name, descriptor } => PoolEntry::NameAndType {
                    name: *name,
                    descriptor: *descriptor,
                },
            });
        }
        pool
    }

    pub fn local_table(&self) -> Option<LocalTable> {
        if self.locals.is_empty() {
            return None;
        }
        Some(LocalTable {
            entries: self
                .locals
                .iter()
                .map(|e| LocalEntry {
                    slot: e.slot,
                    name: e.name.clone(),
                    start_pc: e.start_pc,
                    length: e.length,
                })
                .collect(),
        })
    }
}
