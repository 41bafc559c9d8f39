use phf::{Map, phf_map};
use std::collections::HashMap;

static ATOMIC_NUMBERS: Map<&'static str, u32> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6,
    "N" => 7, "O" => 8, "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12,
    "Al" => 13, "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18,
    "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24,
    "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30,
    "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42,
    "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48,
    "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54,
    "Cs" => 55, "Ba" => 56, "La" => 57, "Ce" => 58, "Pr" => 59, "Nd" => 60,
    "Pm" => 61, "Sm" => 62, "Eu" => 63, "Gd" => 64, "Tb" => 65, "Dy" => 66,
    "Ho" => 67, "Er" => 68, "Tm" => 69, "Yb" => 70, "Lu" => 71, "Hf" => 72,
    "Ta" => 73, "W" => 74, "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78,
    "Au" => 79, "Hg" => 80, "Tl" => 81, "Pb" => 82, "Bi" => 83, "Po" => 84,
    "At" => 85, "Rn" => 86, "Fr" => 87, "Ra" => 88, "Ac" => 89, "Th" => 90,
    "Pa" => 91, "U" => 92, "Np" => 93, "Pu" => 94, "Am" => 95, "Cm" => 96,
    "Bk" => 97, "Cf" => 98, "Es" => 99, "Fm" => 100, "Md" => 101, "No" => 102,
    "Lr" => 103, "Rf" => 104, "Db" => 105, "Sg" => 106, "Bh" => 107,
    "Hs" => 108, "Mt" => 109, "Ds" => 110, "Rg" => 111, "Cn" => 112,
    "Nh" => 113, "Fl" => 114, "Mc" => 115, "Lv" => 116, "Ts" => 117,
    "Og" => 118,
};

/// Immutable lookup table mapping element symbols to atomic numbers.
///
/// Representation builders receive this table at construction time rather
/// than consulting ambient global state, which keeps them deterministic and
/// testable in isolation. The [`standard`](ElementTable::standard) table
/// covers the 118 known elements; custom tables can be supplied for tests or
/// for non-standard naming schemes.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    custom: Option<HashMap<String, u32>>,
}

impl ElementTable {
    /// Returns the standard periodic-table lookup.
    pub fn standard() -> Self {
        Self { custom: None }
    }

    /// Builds a table from explicit (symbol, atomic number) entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            custom: Some(
                entries
                    .into_iter()
                    .map(|(symbol, z)| (symbol.into(), z))
                    .collect(),
            ),
        }
    }

    /// Looks up the atomic number for an element symbol.
    pub fn atomic_number(&self, symbol: &str) -> Option<u32> {
        match &self.custom {
            Some(map) => map.get(symbol).copied(),
            None => ATOMIC_NUMBERS.get(symbol).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_resolves_common_elements() {
        let table = ElementTable::standard();
        assert_eq!(table.atomic_number("H"), Some(1));
        assert_eq!(table.atomic_number("Na"), Some(11));
        assert_eq!(table.atomic_number("Fe"), Some(26));
        assert_eq!(table.atomic_number("Og"), Some(118));
    }

    #[test]
    fn standard_table_rejects_unknown_symbols() {
        let table = ElementTable::standard();
        assert_eq!(table.atomic_number("Xx"), None);
        assert_eq!(table.atomic_number("na"), None);
        assert_eq!(table.atomic_number(""), None);
    }

    #[test]
    fn custom_table_shadows_the_standard_one() {
        let table = ElementTable::from_entries([("Aa", 1u32), ("Bb", 2u32)]);
        assert_eq!(table.atomic_number("Aa"), Some(1));
        assert_eq!(table.atomic_number("Bb"), Some(2));
        assert_eq!(table.atomic_number("Na"), None);
    }
}
