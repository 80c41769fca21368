//! Per-family operand rewriting: turns an instruction's typed operands into
//! the references its handler is called with.

use log::debug;

use crate::dispatch::{DispatchEntry, OperandRef};
use crate::family::Family;
use crate::operand::Operand;
use crate::resolve::write_target;
use crate::table::{Instruction, OpcodeTable, Space};

/// Operand references for one instruction.
///
/// The accumulator is dropped for ALU ops, the write target is turned into a
/// write reference, and for read-modify-write families the write target is
/// followed by a read of the same location.
pub fn operand_refs(family: Family, operands: &[Operand]) -> Vec<OperandRef> {
    let operands = if family.elides_accumulator() {
        operands.get(1..).unwrap_or(&[])
    } else {
        operands
    };
    let reads: Vec<OperandRef> = operands
        .iter()
        .map(|op| OperandRef::read(op.canonical_name(), op.scope()))
        .collect();

    let Some(target) = write_target(family, reads.len()) else {
        return reads;
    };
    let mut refs = Vec::with_capacity(reads.len() + 1);
    for (i, r) in reads.iter().enumerate() {
        if i != target {
            refs.push(r.clone());
            continue;
        }
        refs.push(r.to_write());
        if family.duplicates_target() {
            refs.push(r.to_read());
        }
    }
    refs
}

pub fn dispatch_entry(space: Space, opcode: u8, instr: &Instruction) -> DispatchEntry {
    let entry = DispatchEntry {
        space,
        opcode,
        mnemonic: instr.mnemonic.clone(),
        handler: instr.mnemonic.to_lowercase(),
        operands: operand_refs(instr.family, &instr.operands),
        asm: instr.to_string(),
        flags: instr.flags,
    };
    debug!("{} ({})", entry, instr);
    entry
}

/// Entries for one space, in opcode order.
pub fn dispatch_entries(table: &OpcodeTable, space: Space) -> Vec<DispatchEntry> {
    table
        .space(space)
        .iter()
        .map(|(opcode, instr)| dispatch_entry(space, *opcode, instr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Access, Scope};
    use crate::table::OperandDescriptor;
    use test_log::test;

    fn refs(mnemonic: &str, ops: &[(&str, bool)]) -> Vec<OperandRef> {
        let descs: Vec<OperandDescriptor> = ops
            .iter()
            .map(|(name, imm)| OperandDescriptor::new(name, *imm))
            .collect();
        let instr = Instruction::new(mnemonic, &descs).unwrap();
        operand_refs(instr.family, &instr.operands)
    }

    fn w(name: &str) -> OperandRef {
        OperandRef::write(name, Scope::State)
    }

    fn r(name: &str) -> OperandRef {
        OperandRef::read(name, Scope::State)
    }

    #[test]
    fn inc_dec_duplicate() {
        assert_eq!(refs("INC", &[("B", true)]), [w("b"), r("b")]);
        assert_eq!(
            refs("DEC", &[("HL", false)]),
            [w("hl_indirect"), r("hl_indirect")]
        );
        assert_eq!(refs("INC", &[("SP", true)]), [w("sp"), r("sp")]);
    }

    #[test]
    fn shifts_duplicate() {
        for m in ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SRL", "SWAP"] {
            assert_eq!(refs(m, &[("E", true)]), [w("e"), r("e")], "{}", m);
        }
    }

    #[test]
    fn accumulator_elided() {
        assert_eq!(refs("ADD", &[("A", true), ("B", true)]), [r("b")]);
        assert_eq!(refs("XOR", &[("A", true), ("n8", true)]), [r("immediate8")]);
        assert_eq!(refs("CP", &[("A", true), ("HL", false)]), [r("hl_indirect")]);
        assert_eq!(refs("ADD", &[("HL", true), ("SP", true)]), [r("sp")]);
        assert_eq!(refs("ADD", &[("SP", true), ("e8", true)]), [r("immediate8")]);
        assert!(refs("AND", &[("B", true)]).is_empty());
        assert!(refs("OR", &[]).is_empty());
    }

    #[test]
    fn loads_write_first() {
        assert_eq!(
            refs("LD", &[("HL", false), ("A", true)]),
            [w("hl_indirect"), r("a")]
        );
        assert_eq!(
            refs("LDH", &[("C", false), ("A", true)]),
            [w("c_indirect"), r("a")]
        );
        assert_eq!(
            refs("LD", &[("a16", false), ("SP", true)]),
            [w("indirect_abs16"), r("sp")]
        );
    }

    #[test]
    fn bit_test_reads_only() {
        assert_eq!(
            refs("BIT", &[("3", true), ("HL", false)]),
            [
                OperandRef::read("3", Scope::Literal),
                r("hl_indirect")
            ]
        );
    }

    #[test]
    fn res_set_three_refs() {
        for m in ["RES", "SET"] {
            assert_eq!(
                refs(m, &[("0", true), ("B", true)]),
                [OperandRef::read("0", Scope::Literal), w("b"), r("b")]
            );
        }
    }

    #[test]
    fn jumps_never_write() {
        let jp = refs("JP", &[("C", true), ("a16", true)]);
        assert_eq!(
            jp,
            [
                OperandRef::read("carry", Scope::Selector),
                r("immediate16")
            ]
        );
        for m in ["JR", "CALL"] {
            let out = refs(m, &[("NZ", true), ("e8", true)]);
            assert!(out.iter().all(|op| op.access == Access::Read), "{}", m);
        }
    }

    #[test]
    fn single_operand_default_reads() {
        assert_eq!(refs("PUSH", &[("BC", true)]), [r("bc")]);
        assert_eq!(refs("POP", &[("AF", true)]), [r("af")]);
        assert_eq!(
            refs("RST", &[("$38", true)]),
            [OperandRef::read("38", Scope::Vector)]
        );
        assert_eq!(
            refs("RET", &[("C", true)]),
            [OperandRef::read("carry", Scope::Selector)]
        );
        assert!(refs("NOP", &[]).is_empty());
    }
}
