//! Loading the opcode table.
//!
//! The table is the community SM83 JSON: two objects, `unprefixed` and
//! `cbprefixed`, keyed by `"0xNN"`. Operands are classified while loading, so
//! a table that names an operand nothing understands never gets past here.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use crate::error::{GenError, OperandError, Result};
use crate::family::Family;
use crate::flags::FlagSet;
use crate::operand::Operand;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Space {
    Unprefixed,
    /// Opcodes following the 0xCB prefix byte.
    Prefixed,
}

impl Space {
    pub const ALL: [Space; 2] = [Space::Unprefixed, Space::Prefixed];
}

impl Display for Space {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Space::Unprefixed => "unprefixed",
                Space::Prefixed => "cbprefixed",
            }
        )
    }
}

/// One operand exactly as the table describes it.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct OperandDescriptor {
    pub name: String,
    pub immediate: bool,
    #[serde(default)]
    pub increment: bool,
    #[serde(default)]
    pub decrement: bool,
}

impl OperandDescriptor {
    pub fn new(name: &str, immediate: bool) -> Self {
        Self {
            name: name.to_owned(),
            immediate,
            increment: false,
            decrement: false,
        }
    }
}

#[derive(Deserialize, Debug)]
struct RawInstruction {
    mnemonic: String,
    #[serde(default)]
    operands: Vec<OperandDescriptor>,
    #[serde(default)]
    flags: IndexMap<String, String>,
}

#[derive(Deserialize, Debug)]
struct RawTable {
    unprefixed: IndexMap<String, RawInstruction>,
    cbprefixed: IndexMap<String, RawInstruction>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Instruction {
    pub mnemonic: String,
    pub family: Family,
    pub operands: Vec<Operand>,
    pub flags: FlagSet,
}

impl Instruction {
    /// Classifies `descriptors` for `mnemonic`. On failure, returns the index
    /// of the offending operand with the reason.
    pub fn new(
        mnemonic: &str,
        descriptors: &[OperandDescriptor],
    ) -> std::result::Result<Self, (usize, OperandError)> {
        let family = Family::of(mnemonic);
        let operands = descriptors
            .iter()
            .enumerate()
            .map(|(i, desc)| Operand::classify(family, desc).map_err(|e| (i, e)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            mnemonic: mnemonic.to_owned(),
            family,
            operands,
            flags: FlagSet::empty(),
        })
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for (i, op) in self.operands.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { " " } else { "," }, op)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct OpcodeTable {
    unprefixed: IndexMap<u8, Instruction>,
    prefixed: IndexMap<u8, Instruction>,
}

impl OpcodeTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json)?;
        let table = Self {
            unprefixed: load_space(Space::Unprefixed, raw.unprefixed)?,
            prefixed: load_space(Space::Prefixed, raw.cbprefixed)?,
        };
        info!(
            "loaded {} unprefixed and {} prefixed opcodes",
            table.unprefixed.len(),
            table.prefixed.len()
        );
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading opcode table {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Instructions of one space in opcode order.
    pub fn space(&self, space: Space) -> &IndexMap<u8, Instruction> {
        match space {
            Space::Unprefixed => &self.unprefixed,
            Space::Prefixed => &self.prefixed,
        }
    }

    pub fn get(&self, space: Space, opcode: u8) -> Option<&Instruction> {
        self.space(space).get(&opcode)
    }

    pub fn len(&self) -> usize {
        self.unprefixed.len() + self.prefixed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_opcode(space: Space, key: &str) -> Result<u8> {
    key.strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        .ok_or_else(|| GenError::InvalidOpcode {
            space,
            key: key.to_owned(),
        })
}

fn load_space(
    space: Space,
    raw: IndexMap<String, RawInstruction>,
) -> Result<IndexMap<u8, Instruction>> {
    let mut instructions = IndexMap::with_capacity(raw.len());
    for (key, instr) in raw {
        let opcode = parse_opcode(space, &key)?;
        let mut loaded = Instruction::new(&instr.mnemonic, &instr.operands).map_err(
            |(index, source)| GenError::UnclassifiableOperand {
                space,
                opcode,
                mnemonic: instr.mnemonic.clone(),
                index,
                source,
            },
        )?;
        loaded.flags = FlagSet::from_effects(
            instr.flags.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        instructions.insert(opcode, loaded);
    }
    instructions.sort_keys();
    Ok(instructions)
}
