use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::Result;

/// Shape of the generated dispatch code. Every key is optional in TOML.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Name of the function dispatching the primary opcode space.
    pub unprefixed_fn: String,
    /// Name of the function dispatching opcodes after the 0xCB prefix.
    pub prefixed_fn: String,
    /// Prepended to references resolved against the CPU (`Self::`).
    pub scope_marker: String,
    /// Prepended to the accessor name of a write reference.
    pub write_prefix: String,
    /// Mnemonic prefixes that get no match arm.
    pub skip: Vec<String>,
    pub comments: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            unprefixed_fn: "execute_unprefixed".to_owned(),
            prefixed_fn: "execute_prefixed".to_owned(),
            scope_marker: "Self::".to_owned(),
            write_prefix: "set_".to_owned(),
            skip: vec!["ILLEGAL_".to_owned(), "PREFIX".to_owned()],
            comments: true,
        }
    }
}

impl EmitConfig {
    pub fn from_toml(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading emitter config {}", path.display());
        Self::from_toml(&fs::read_to_string(path)?)
    }

    pub fn skips(&self, mnemonic: &str) -> bool {
        self.skip.iter().any(|prefix| mnemonic.starts_with(prefix.as_str()))
    }
}
