use std::fmt::{Display, Formatter};

/// Instruction families that get their own operand treatment.
///
/// Every mnemonic maps to exactly one family; anything not named here is
/// [`Family::Other`] and gets the default write-back rule.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Family {
    /// ADD, ADC, SUB, SBC, CP: accumulator destination is implicit, result is
    /// written to A or only to flags.
    Arithmetic,
    /// AND, OR, XOR: accumulator destination is implicit.
    Logic,
    /// INC, DEC
    IncDec,
    /// RLC, RRC, RL, RR, SLA, SRA, SRL, SWAP
    Shift,
    /// BIT
    BitTest,
    /// RES, SET
    BitModify,
    /// JP, JR, CALL
    Jump,
    /// RET
    Return,
    Other,
}

impl Family {
    pub fn of(mnemonic: &str) -> Family {
        match mnemonic.to_ascii_uppercase().as_str() {
            "ADD" | "ADC" | "SUB" | "SBC" | "CP" => Family::Arithmetic,
            "AND" | "OR" | "XOR" => Family::Logic,
            "INC" | "DEC" => Family::IncDec,
            "RLC" | "RRC" | "RL" | "RR" | "SLA" | "SRA" | "SRL" | "SWAP" => Family::Shift,
            "BIT" => Family::BitTest,
            "RES" | "SET" => Family::BitModify,
            "JP" | "JR" | "CALL" => Family::Jump,
            "RET" => Family::Return,
            _ => Family::Other,
        }
    }

    /// Control transfers read `C` as the carry condition, not the register.
    pub fn takes_conditions(self) -> bool {
        matches!(self, Family::Jump | Family::Return)
    }

    /// Multi-operand forms of these never write through an operand reference.
    pub fn no_write_back(self) -> bool {
        matches!(self, Family::Arithmetic | Family::BitTest | Family::Jump)
    }

    /// The first operand is the implicit accumulator and is not passed to the handler.
    pub fn elides_accumulator(self) -> bool {
        matches!(self, Family::Arithmetic | Family::Logic)
    }

    /// The write target is passed twice: once to write, once to read.
    pub fn duplicates_target(self) -> bool {
        matches!(self, Family::IncDec | Family::Shift | Family::BitModify)
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Family::Arithmetic => "arithmetic",
                Family::Logic => "logic",
                Family::IncDec => "inc/dec",
                Family::Shift => "rotate/shift",
                Family::BitTest => "bit test",
                Family::BitModify => "bit modify",
                Family::Jump => "jump",
                Family::Return => "return",
                Family::Other => "other",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Family;
    use test_log::test;

    #[test]
    fn membership() {
        for m in ["ADD", "ADC", "SUB", "SBC", "CP"] {
            assert_eq!(Family::of(m), Family::Arithmetic, "{}", m);
        }
        for m in ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SRL", "SWAP"] {
            assert_eq!(Family::of(m), Family::Shift, "{}", m);
        }
        assert_eq!(Family::of("xor"), Family::Logic);
        assert_eq!(Family::of("RLCA"), Family::Other);
        assert_eq!(Family::of("LDH"), Family::Other);
        assert_eq!(Family::of("RETI"), Family::Other);
    }

    #[test]
    fn no_write_back_set() {
        let set: Vec<&str> = [
            "ADD", "ADC", "SUB", "SBC", "CP", "BIT", "JP", "JR", "CALL", "AND", "OR", "XOR",
            "INC", "DEC", "LD", "RES", "SET", "RET",
        ]
        .into_iter()
        .filter(|m| Family::of(m).no_write_back())
        .collect();
        assert_eq!(set, ["ADD", "ADC", "SUB", "SBC", "CP", "BIT", "JP", "JR", "CALL"]);
    }

    #[test]
    fn condition_context() {
        assert!(Family::of("JP").takes_conditions());
        assert!(Family::of("RET").takes_conditions());
        assert!(!Family::of("LD").takes_conditions());
        assert!(!Family::of("RETI").takes_conditions());
    }
}
