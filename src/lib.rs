//! Build-time generator of SM83 (Game Boy CPU) instruction dispatch code.
//!
//! An opcode table is loaded into typed instructions, every opcode is turned
//! into a [`DispatchEntry`] (handler name plus operand references), and the
//! entries are rendered as two Rust `match` functions, one per opcode space.

pub mod config;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod family;
pub mod flags;
pub mod operand;
pub mod resolve;
pub mod rewrite;
pub mod table;

use std::path::Path;

use log::info;

pub use config::EmitConfig;
pub use dispatch::{Access, DispatchEntry, OperandRef, Scope};
pub use error::{GenError, OperandError, Result};
pub use table::{OpcodeTable, OperandDescriptor, Space};

/// Dispatch entries for both spaces, unprefixed first, each in opcode order.
pub fn entries(table: &OpcodeTable) -> Vec<DispatchEntry> {
    Space::ALL
        .iter()
        .flat_map(|space| rewrite::dispatch_entries(table, *space))
        .collect()
}

/// Rust source for both dispatch functions.
pub fn render(table: &OpcodeTable, config: &EmitConfig) -> String {
    let mut emitter = emit::Emitter::new(config);
    for space in Space::ALL {
        emitter.space(space, &rewrite::dispatch_entries(table, space));
    }
    let code = emitter.finish();
    info!("generated {} lines of dispatch code", code.lines().count());
    code
}

/// Loads the table at `path` and renders it.
pub fn generate(path: impl AsRef<Path>, config: &EmitConfig) -> Result<String> {
    let table = OpcodeTable::load(path)?;
    Ok(render(&table, config))
}
