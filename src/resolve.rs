use crate::family::Family;

/// Position of the operand that receives the result, given the family and
/// the number of operands left after accumulator elision.
///
/// Position 0 is written when there is more than one operand and the family
/// writes back at all. INC/DEC and the rotate/shift family always modify
/// their sole operand. RES/SET write their second operand; the first is the
/// bit index.
pub fn write_target(family: Family, arity: usize) -> Option<usize> {
    match family {
        Family::IncDec | Family::Shift => (arity > 0).then_some(0),
        Family::BitModify => (arity > 1).then_some(1),
        Family::Arithmetic | Family::BitTest | Family::Jump => None,
        Family::Logic | Family::Return | Family::Other => (arity > 1).then_some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::write_target;
    use crate::family::Family;
    use test_log::test;

    #[test]
    fn default_rule() {
        assert_eq!(write_target(Family::of("LD"), 2), Some(0));
        assert_eq!(write_target(Family::of("LD"), 3), Some(0));
        assert_eq!(write_target(Family::of("LDH"), 2), Some(0));
        assert_eq!(write_target(Family::of("PUSH"), 1), None);
        assert_eq!(write_target(Family::of("NOP"), 0), None);
    }

    #[test]
    fn no_write_back() {
        for m in ["ADD", "ADC", "SUB", "SBC", "CP", "BIT", "JP", "JR", "CALL"] {
            for arity in 0..4 {
                assert_eq!(write_target(Family::of(m), arity), None, "{} {}", m, arity);
            }
        }
    }

    #[test]
    fn single_operand_modifiers() {
        assert_eq!(write_target(Family::of("INC"), 1), Some(0));
        assert_eq!(write_target(Family::of("DEC"), 1), Some(0));
        assert_eq!(write_target(Family::of("SWAP"), 1), Some(0));
        assert_eq!(write_target(Family::of("INC"), 0), None);
    }

    #[test]
    fn bit_modify_targets_second() {
        assert_eq!(write_target(Family::of("RES"), 2), Some(1));
        assert_eq!(write_target(Family::of("SET"), 2), Some(1));
        assert_eq!(write_target(Family::of("SET"), 1), None);
    }
}
