//! Typed operands and their canonical names.
//!
//! Raw descriptors from the opcode table only carry a name and a few
//! addressing bits. [`Operand::classify`] gives each one an explicit role up
//! front, so the overloaded `C` (register or carry flag) is settled once, by
//! family, and the canonicalizer never has to look at strings again. `H` is
//! always the register.

use std::fmt::{Display, Formatter};

use crate::dispatch::Scope;
use crate::error::OperandError;
use crate::family::Family;
use crate::table::OperandDescriptor;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    F,
    H,
    L,
}

impl Reg8 {
    fn name(self) -> &'static str {
        match self {
            Reg8::A => "A",
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::F => "F",
            Reg8::H => "H",
            Reg8::L => "L",
        }
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

impl Reg16 {
    fn name(self) -> &'static str {
        match self {
            Reg16::AF => "AF",
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => "HL",
            Reg16::SP => "SP",
        }
    }
}

/// Operand bytes following the opcode.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum DataClass {
    /// n8
    N8,
    /// n16
    N16,
    /// e8, signed offset
    E8,
    /// a8, address
    A8,
    /// a16, address
    A16,
}

impl DataClass {
    fn name(self) -> &'static str {
        match self {
            DataClass::N8 => "n8",
            DataClass::N16 => "n16",
            DataClass::E8 => "e8",
            DataClass::A8 => "a8",
            DataClass::A16 => "a16",
        }
    }

    fn width(self) -> &'static str {
        &self.name()[1..]
    }

    /// `n` classes address the zero page when dereferenced, the rest are absolute.
    fn region(self) -> &'static str {
        match self {
            DataClass::N8 | DataClass::N16 => "zero",
            DataClass::E8 | DataClass::A8 | DataClass::A16 => "abs",
        }
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Condition {
    Z,
    NZ,
    N,
    C,
    NC,
    NH,
}

impl Condition {
    fn name(self) -> &'static str {
        match self {
            Condition::Z => "Z",
            Condition::NZ => "NZ",
            Condition::N => "N",
            Condition::C => "C",
            Condition::NC => "NC",
            Condition::NH => "NH",
        }
    }

    fn canonical(self) -> &'static str {
        match self {
            Condition::Z => "z",
            Condition::NZ => "nz",
            Condition::N => "n",
            Condition::C => "carry",
            Condition::NC => "ncarry",
            Condition::NH => "nhcarry",
        }
    }
}

/// Pointer adjustment performed as part of the access.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum Step {
    #[default]
    None,
    Increment,
    Decrement,
}

impl Step {
    fn suffix(self) -> &'static str {
        match self {
            Step::None => "",
            Step::Increment => "_inc",
            Step::Decrement => "_dec",
        }
    }

    fn sign(self) -> &'static str {
        match self {
            Step::None => "",
            Step::Increment => "+",
            Step::Decrement => "-",
        }
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum OperandKind {
    Reg8(Reg8),
    Reg16(Reg16),
    Data(DataClass),
    Condition(Condition),
    BitIndex(u8),
    /// Restart vector (`$38`).
    Vector(u8),
}

impl OperandKind {
    /// Gives a raw operand name its role within `family`, or `None` if the
    /// name fits no role.
    pub fn classify(family: Family, name: &str) -> Option<OperandKind> {
        let kind = match name {
            "A" => OperandKind::Reg8(Reg8::A),
            "B" => OperandKind::Reg8(Reg8::B),
            "C" if family.takes_conditions() => OperandKind::Condition(Condition::C),
            "C" => OperandKind::Reg8(Reg8::C),
            "D" => OperandKind::Reg8(Reg8::D),
            "E" => OperandKind::Reg8(Reg8::E),
            "F" => OperandKind::Reg8(Reg8::F),
            "H" => OperandKind::Reg8(Reg8::H),
            "L" => OperandKind::Reg8(Reg8::L),
            "AF" => OperandKind::Reg16(Reg16::AF),
            "BC" => OperandKind::Reg16(Reg16::BC),
            "DE" => OperandKind::Reg16(Reg16::DE),
            "HL" => OperandKind::Reg16(Reg16::HL),
            "SP" => OperandKind::Reg16(Reg16::SP),
            "n8" => OperandKind::Data(DataClass::N8),
            "n16" => OperandKind::Data(DataClass::N16),
            "e8" => OperandKind::Data(DataClass::E8),
            "a8" => OperandKind::Data(DataClass::A8),
            "a16" => OperandKind::Data(DataClass::A16),
            "Z" => OperandKind::Condition(Condition::Z),
            "NZ" => OperandKind::Condition(Condition::NZ),
            "N" => OperandKind::Condition(Condition::N),
            "NC" => OperandKind::Condition(Condition::NC),
            "NH" => OperandKind::Condition(Condition::NH),
            _ => {
                if let Some(vector) = name.strip_prefix('$') {
                    OperandKind::Vector(u8::from_str_radix(vector, 16).ok()?)
                } else {
                    OperandKind::BitIndex(name.parse::<u8>().ok().filter(|bit| *bit < 8)?)
                }
            }
        };
        Some(kind)
    }
}

/// An operand with an explicit role and addressing mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Operand {
    pub kind: OperandKind,
    /// `false` means the operand is dereferenced.
    pub immediate: bool,
    pub step: Step,
}

impl Operand {
    pub fn classify(family: Family, desc: &OperandDescriptor) -> Result<Operand, OperandError> {
        let kind = OperandKind::classify(family, &desc.name)
            .ok_or_else(|| OperandError::Unclassifiable(desc.name.clone()))?;
        let step = match (desc.increment, desc.decrement) {
            (false, false) => Step::None,
            (true, false) => Step::Increment,
            (false, true) => Step::Decrement,
            (true, true) => return Err(OperandError::ConflictingStep(desc.name.clone())),
        };
        // only pointer registers and operand bytes can be stepped
        if step != Step::None && !matches!(kind, OperandKind::Reg16(_) | OperandKind::Data(_)) {
            return Err(OperandError::UnsteppableOperand(desc.name.clone()));
        }
        Ok(Operand {
            kind,
            immediate: desc.immediate,
            step,
        })
    }

    /// The lowercase accessor name a handler uses for this operand.
    pub fn canonical_name(&self) -> String {
        let name = match self.kind {
            OperandKind::Reg8(Reg8::C) if !self.immediate => "c_indirect".to_owned(),
            OperandKind::Reg8(r) => r.name().to_owned(),
            OperandKind::Reg16(r) => {
                let mut name = r.name().to_owned() + self.step.suffix();
                if !self.immediate {
                    name += "_indirect";
                }
                name
            }
            OperandKind::Data(class) => {
                let base = if self.immediate {
                    format!("immediate{}", class.width())
                } else {
                    format!("indirect_{}{}", class.region(), class.width())
                };
                base + self.step.suffix()
            }
            OperandKind::Condition(c) => c.canonical().to_owned(),
            OperandKind::BitIndex(bit) => bit.to_string(),
            OperandKind::Vector(v) => format!("{:02x}", v),
        };
        name.to_lowercase()
    }

    pub fn scope(&self) -> Scope {
        match self.kind {
            OperandKind::Reg8(_) | OperandKind::Reg16(_) | OperandKind::Data(_) => Scope::State,
            OperandKind::Condition(_) => Scope::Selector,
            OperandKind::BitIndex(_) => Scope::Literal,
            OperandKind::Vector(_) => Scope::Vector,
        }
    }
}

/// Assembly syntax, e.g. `(HL+)`, `$38`, `SP+`.
impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self.kind {
            OperandKind::Reg8(r) => r.name().to_owned(),
            OperandKind::Reg16(r) => r.name().to_owned(),
            OperandKind::Data(class) => class.name().to_owned(),
            OperandKind::Condition(c) => c.name().to_owned(),
            OperandKind::BitIndex(bit) => bit.to_string(),
            OperandKind::Vector(v) => format!("${:02X}", v),
        };
        if self.immediate {
            write!(f, "{}{}", text, self.step.sign())
        } else {
            write!(f, "({}{})", text, self.step.sign())
        }
    }
}

/// Canonical name of one raw descriptor as used by `mnemonic`.
pub fn canonicalize(mnemonic: &str, desc: &OperandDescriptor) -> Result<String, OperandError> {
    Operand::classify(Family::of(mnemonic), desc).map(|op| op.canonical_name())
}
