use bitflags::bitflags;
use std::fmt::{Display, Formatter};

bitflags! {
    /// CPU flags an instruction may change, laid out like the F register.
    #[derive(Default)]
    pub struct FlagSet: u8 {
        const Z = 0b1000_0000;
        const N = 0b0100_0000;
        const H = 0b0010_0000;
        const C = 0b0001_0000;
    }
}

const ORDER: [(FlagSet, &str); 4] = [
    (FlagSet::Z, "Z"),
    (FlagSet::N, "N"),
    (FlagSet::H, "H"),
    (FlagSet::C, "C"),
];

impl FlagSet {
    /// Builds the set of affected flags from `(flag, effect)` pairs as found in
    /// the opcode table. An effect of `-` leaves the flag untouched; anything
    /// else (`Z`, `0`, `1`, ...) means the instruction writes it.
    pub fn from_effects<'a, I>(effects: I) -> FlagSet
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = FlagSet::empty();
        for (flag, effect) in effects {
            if effect == "-" {
                continue;
            }
            if let Some((f, _)) = ORDER.iter().find(|(_, n)| n.eq_ignore_ascii_case(flag)) {
                set.insert(*f);
            }
        }
        set
    }
}

impl Display for FlagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let names: Vec<&str> = ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join(" "))
    }
}
