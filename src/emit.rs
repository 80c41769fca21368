//! Rust source for the dispatch functions.
//!
//! Output is a pair of methods meant to be pasted (or macro-expanded) into an
//! `impl` block of the CPU type:
//!
//! ```text
//! fn execute_unprefixed(&mut self, opcode: u8) {
//!     match opcode {
//!         /* INC B (0x04) flags: Z N H */
//!         0x04 => self.inc(Self::set_b, Self::b),
//!         ...
//!     }
//! }
//! ```

use log::debug;

use crate::config::EmitConfig;
use crate::dispatch::{DispatchEntry, OperandRef, Scope};
use crate::table::Space;

const OPCODES: usize = 256;

fn l(code: &mut String, line: String) {
    code.push_str(&line);
    code.push('\n');
}

pub struct Emitter<'c> {
    config: &'c EmitConfig,
    code: String,
}

impl<'c> Emitter<'c> {
    pub fn new(config: &'c EmitConfig) -> Self {
        Self {
            config,
            code: String::new(),
        }
    }

    pub fn operand(&self, op: &OperandRef) -> String {
        if op.scope.is_scoped() {
            let prefix = if op.is_write() {
                self.config.write_prefix.as_str()
            } else {
                ""
            };
            return format!("{}{}{}", self.config.scope_marker, prefix, op.name);
        }
        match op.scope {
            Scope::Vector => format!("0x{}", op.name.to_uppercase()),
            _ => op.name.clone(),
        }
    }

    /// One match arm, e.g. `0x04 => self.inc(Self::set_b, Self::b),`.
    pub fn arm(&self, entry: &DispatchEntry) -> String {
        let args: Vec<String> = entry.operands.iter().map(|op| self.operand(op)).collect();
        format!(
            "{:#04X} => self.{}({}),",
            entry.opcode,
            entry.handler,
            args.join(", ")
        )
    }

    fn comment(&self, entry: &DispatchEntry) -> String {
        format!(
            "/* {} ({:#04X}) flags: {} */",
            entry.asm, entry.opcode, entry.flags
        )
    }

    /// Appends the dispatch function for `space`.
    pub fn space(&mut self, space: Space, entries: &[DispatchEntry]) {
        let name = match space {
            Space::Unprefixed => &self.config.unprefixed_fn,
            Space::Prefixed => &self.config.prefixed_fn,
        };
        let mut body = String::new();
        let mut arms = 0;
        for entry in entries.iter().filter(|e| e.space == space) {
            if self.config.skips(&entry.mnemonic) {
                debug!("no arm for {} {:#04X} {}", space, entry.opcode, entry.mnemonic);
                continue;
            }
            if self.config.comments {
                l(&mut body, format!("            {}", self.comment(entry)));
            }
            l(&mut body, format!("            {}", self.arm(entry)));
            arms += 1;
        }
        if arms < OPCODES {
            l(
                &mut body,
                "            _ => panic!(\"illegal opcode {:#04X}\", opcode),".to_owned(),
            );
        }

        l(&mut self.code, format!("    fn {}(&mut self, opcode: u8) {{", name));
        l(&mut self.code, "        match opcode {".to_owned());
        self.code.push_str(&body);
        l(&mut self.code, "        }".to_owned());
        l(&mut self.code, "    }".to_owned());
    }

    pub fn finish(self) -> String {
        self.code
    }
}

/// Plain listing of entries, one per line.
pub fn listing(entries: &[DispatchEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        l(&mut out, entry.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FlagSet;
    use test_log::test;

    fn entry(opcode: u8, mnemonic: &str, operands: Vec<OperandRef>) -> DispatchEntry {
        DispatchEntry {
            space: Space::Unprefixed,
            opcode,
            mnemonic: mnemonic.to_owned(),
            handler: mnemonic.to_lowercase(),
            operands,
            asm: mnemonic.to_owned(),
            flags: FlagSet::empty(),
        }
    }

    #[test]
    fn operand_forms() {
        let cfg = EmitConfig::default();
        let e = Emitter::new(&cfg);
        assert_eq!(e.operand(&OperandRef::read("b", Scope::State)), "Self::b");
        assert_eq!(
            e.operand(&OperandRef::write("hl_indirect", Scope::State)),
            "Self::set_hl_indirect"
        );
        assert_eq!(e.operand(&OperandRef::read("nz", Scope::Selector)), "Self::nz");
        assert_eq!(e.operand(&OperandRef::read("3", Scope::Literal)), "3");
        assert_eq!(e.operand(&OperandRef::read("38", Scope::Vector)), "0x38");
    }

    #[test]
    fn arm_text() {
        let cfg = EmitConfig::default();
        let e = Emitter::new(&cfg);
        let inc = entry(
            0x04,
            "INC",
            vec![
                OperandRef::write("b", Scope::State),
                OperandRef::read("b", Scope::State),
            ],
        );
        assert_eq!(e.arm(&inc), "0x04 => self.inc(Self::set_b, Self::b),");
        assert_eq!(e.arm(&entry(0x00, "NOP", vec![])), "0x00 => self.nop(),");
    }

    #[test]
    fn custom_markers() {
        let cfg = EmitConfig {
            scope_marker: "Cpu::".to_owned(),
            write_prefix: "put_".to_owned(),
            ..EmitConfig::default()
        };
        let e = Emitter::new(&cfg);
        assert_eq!(
            e.operand(&OperandRef::write("a", Scope::State)),
            "Cpu::put_a"
        );
    }

    #[test]
    fn partial_space_gets_wildcard() {
        let cfg = EmitConfig {
            comments: false,
            ..EmitConfig::default()
        };
        let mut e = Emitter::new(&cfg);
        e.space(
            Space::Unprefixed,
            &[entry(0x00, "NOP", vec![]), entry(0xD3, "ILLEGAL_D3", vec![])],
        );
        let code = e.finish();
        assert!(code.contains("fn execute_unprefixed(&mut self, opcode: u8) {"));
        assert!(code.contains("0x00 => self.nop(),"));
        assert!(!code.contains("illegal_d3"));
        assert!(code.contains("_ => panic!"));
        assert!(!code.contains("/*"));
    }

    #[test]
    fn full_space_has_no_wildcard() {
        let cfg = EmitConfig::default();
        let entries: Vec<DispatchEntry> = (0..=255u8).map(|op| entry(op, "NOP", vec![])).collect();
        let mut e = Emitter::new(&cfg);
        e.space(Space::Unprefixed, &entries);
        let code = e.finish();
        assert!(!code.contains("_ =>"));
        assert!(code.contains("/* NOP (0xFF) flags: - */"));
    }

    #[test]
    fn listing_lines() {
        let text = listing(&[entry(0x00, "NOP", vec![])]);
        assert_eq!(text, "unprefixed 0x00 nop []\n");
    }
}
