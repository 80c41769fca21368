use thiserror::Error;

use crate::table::Space;

/// Why a single operand descriptor could not be turned into a typed operand.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum OperandError {
    #[error("operand `{0}` matches no operand class")]
    Unclassifiable(String),
    #[error("operand `{0}` is marked both increment and decrement")]
    ConflictingStep(String),
    #[error("operand `{0}` cannot take an increment or decrement")]
    UnsteppableOperand(String),
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("filesystem error: {0}")]
    FsError(#[from] std::io::Error),
    #[error("malformed opcode table: {0}")]
    TableError(#[from] serde_json::Error),
    #[error("malformed config: {0}")]
    ConfigError(#[from] toml::de::Error),
    #[error("{space} opcode key {key:?} is not a 0x-prefixed byte")]
    InvalidOpcode { space: Space, key: String },
    #[error("{space} opcode {opcode:#04X} ({mnemonic}), operand {index}: {source}")]
    UnclassifiableOperand {
        space: Space,
        opcode: u8,
        mnemonic: String,
        index: usize,
        #[source]
        source: OperandError,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;
