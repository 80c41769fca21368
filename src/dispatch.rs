use std::fmt::{Display, Formatter};

use crate::flags::FlagSet;
use crate::table::Space;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Access {
    Read,
    /// Read-modify-write target; the handler receives the setter.
    Write,
}

/// How a reference is resolved by the generated code.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Scope {
    /// Register, memory or immediate accessor on the CPU.
    State,
    /// Condition flag accessor on the CPU.
    Selector,
    /// Bit index, passed as a plain number.
    Literal,
    /// Restart vector, passed as a hex address.
    Vector,
}

impl Scope {
    /// Whether the reference names a method on the CPU rather than a value.
    pub fn is_scoped(self) -> bool {
        matches!(self, Scope::State | Scope::Selector)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct OperandRef {
    pub name: String,
    pub access: Access,
    pub scope: Scope,
}

impl OperandRef {
    pub fn read(name: impl Into<String>, scope: Scope) -> OperandRef {
        OperandRef {
            name: name.into(),
            access: Access::Read,
            scope,
        }
    }

    pub fn write(name: impl Into<String>, scope: Scope) -> OperandRef {
        OperandRef {
            name: name.into(),
            access: Access::Write,
            scope,
        }
    }

    pub fn to_write(&self) -> OperandRef {
        OperandRef {
            access: Access::Write,
            ..self.clone()
        }
    }

    pub fn to_read(&self) -> OperandRef {
        OperandRef {
            access: Access::Read,
            ..self.clone()
        }
    }

    pub fn is_write(&self) -> bool {
        self.access == Access::Write
    }
}

impl Display for OperandRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.access {
            Access::Read => write!(f, "read({})", self.name),
            Access::Write => write!(f, "write({})", self.name),
        }
    }
}

/// Everything the emitter needs for one opcode.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DispatchEntry {
    pub space: Space,
    pub opcode: u8,
    pub mnemonic: String,
    pub handler: String,
    pub operands: Vec<OperandRef>,
    /// Assembly text, e.g. `LD (HL+),A`.
    pub asm: String,
    pub flags: FlagSet,
}

impl Display for DispatchEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let operands: Vec<String> = self.operands.iter().map(|op| op.to_string()).collect();
        write!(
            f,
            "{} {:#04X} {} [{}]",
            self.space,
            self.opcode,
            self.handler,
            operands.join(", ")
        )
    }
}
