//! Read-only view over a method's resolved constant pool.
//!
//! The decoder only reads already-resolved entries; pool construction from a
//! class file happens upstream. The one piece of parsing done here is
//! method-descriptor strings, which is where call arity comes from at decode
//! time.

/// Errors resolving a constant-pool reference.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PoolError {
    #[error("index {0} out of range")]
    BadIndex(u16),
    #[error("entry {index} is not a {expected}")]
    WrongKind {
        index: u16,
        expected: &'static str,
    },
    #[error("malformed method descriptor {0:?}")]
    BadDescriptor(String),
}

/// One resolved constant-pool entry.
#[derive(Clone, Debug, PartialEq)]
pub enum PoolEntry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    /// Class reference; `name` indexes a Utf8 entry.
    Class { name: u16 },
    /// String literal; `utf8` indexes a Utf8 entry.
    String { utf8: u16 },
    FieldRef { class: u16, name_and_type: u16 },
    MethodRef { class: u16, name_and_type: u16 },
    InterfaceMethodRef { class: u16, name_and_type: u16 },
    NameAndType { name: u16, descriptor: u16 },
}

/// Argument and return arity of a method reference, resolved from its
/// descriptor string.
///
/// Counts simulator slots: each parameter is one slot regardless of
/// category, and the return contributes 0 (`void`) or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodArity {
    pub args: u16,
    pub ret_slots: u16,
}

/// Indexed, read-only constant pool.
///
/// Entry 0 is unused, matching class-file numbering; `Long` and `Double`
/// entries occupy two consecutive indices.
#[derive(Debug)]
pub struct ConstantPool {
    entries: Vec<Option<PoolEntry>>,
}

impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantPool {
    pub fn new() -> Self {
        Self {
            entries: vec![None],
        }
    }

    /// Append an entry, returning its index.
    pub fn push(&mut self, entry: PoolEntry) -> u16 {
        let index = self.entries.len() as u16;
        let two_slots = matches!(entry, PoolEntry::Long(_) | PoolEntry::Double(_));
        self.entries.push(Some(entry));
        if two_slots {
            self.entries.push(None);
        }
        index
    }

    pub fn entry(&self, index: u16) -> Result<&PoolEntry, PoolError> {
        self.entries
            .get(index as usize)
            .and_then(Option::as_ref)
            .ok_or(PoolError::BadIndex(index))
    }

    pub fn utf8(&self, index: u16) -> Result<&str, PoolError> {
        match self.entry(index)? {
            PoolEntry::Utf8(s) => Ok(s),
            _ => Err(PoolError::WrongKind {
                index,
                expected: "Utf8",
            }),
        }
    }

    fn name_and_type(&self, index: u16) -> Result<(u16, u16), PoolError> {
        match self.entry(index)? {
            PoolEntry::NameAndType { name, descriptor } => Ok((*name, *descriptor)),
            _ => Err(PoolError::WrongKind {
                index,
                expected: "NameAndType",
            }),
        }
    }

    fn member_name_and_type(&self, index: u16) -> Result<(u16, u16), PoolError> {
        match self.entry(index)? {
            PoolEntry::FieldRef { name_and_type, .. }
            | PoolEntry::MethodRef { name_and_type, .. }
            | PoolEntry::InterfaceMethodRef { name_and_type, .. } => {
                self.name_and_type(*name_and_type)
            }
            _ => Err(PoolError::WrongKind {
                index,
                expected: "field or method reference",
            }),
        }
    }

    /// Name of the field or method behind a reference entry.
    pub fn member_name(&self, index: u16) -> Result<&str, PoolError> {
        let (name, _) = self.member_name_and_type(index)?;
        self.utf8(name)
    }

    /// Descriptor string of the field or method behind a reference entry.
    pub fn member_descriptor(&self, index: u16) -> Result<&str, PoolError> {
        let (_, descriptor) = self.member_name_and_type(index)?;
        self.utf8(descriptor)
    }

    /// Argument count and return-slot count of a method reference.
    pub fn method_arity(&self, index: u16) -> Result<MethodArity, PoolError> {
        match self.entry(index)? {
            PoolEntry::MethodRef { .. } | PoolEntry::InterfaceMethodRef { .. } => {}
            _ => {
                return Err(PoolError::WrongKind {
                    index,
                    expected: "method reference",
                });
            }
        }
        let descriptor = self.member_descriptor(index)?;
        parse_method_descriptor(descriptor)
            .ok_or_else(|| PoolError::BadDescriptor(descriptor.to_owned()))
    }
}

/// Parse a method descriptor like `(I[DLjava/lang/String;)V` into its arity.
fn parse_method_descriptor(descriptor: &str) -> Option<MethodArity> {
    let bytes = descriptor.as_bytes();
    if bytes.first() != Some(&b'(') {
        return None;
    }
    let mut i = 1;
    let mut args: u16 = 0;
    loop {
        match *bytes.get(i)? {
            b')' => {
                i += 1;
                break;
            }
            b'[' => {
                // Array dimensions prefix the element type; count once below.
                i += 1;
            }
            b'L' => {
                let end = descriptor[i..].find(';')?;
                i += end + 1;
                args = args.checked_add(1)?;
            }
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => {
                i += 1;
                args = args.checked_add(1)?;
            }
            _ => return None,
        }
    }
    let ret_slots = match *bytes.get(i)? {
        b'V' => 0,
        b'[' | b'L' | b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => 1,
        _ => return None,
    };
    Some(MethodArity { args, ret_slots })
}
