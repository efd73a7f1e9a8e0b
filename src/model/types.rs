use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

/// One-letter code assigned to residues whose three-letter name is not in the
/// standard amino-acid table (modified residues, ligands, cofactors).
pub const FALLBACK_ONE_LETTER: char = 'A';

/// Chemical elements commonly observed in docked macromolecular coordinate
/// files: the organic set, halogens, and the ions that survive docking runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    H,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    P,
    S,
    Cl,
    K,
    Ca,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Se,
    Br,
    I,
    Unknown,
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::I => "I",
            Element::Unknown => "X",
        }
    }
}

impl FromStr for Element {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut normalized = String::with_capacity(2);
        for (i, c) in s.trim().chars().enumerate() {
            if i == 0 {
                normalized.extend(c.to_uppercase());
            } else {
                normalized.extend(c.to_lowercase());
            }
        }

        match normalized.as_str() {
            "H" => Ok(Element::H),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "Na" => Ok(Element::Na),
            "Mg" => Ok(Element::Mg),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "Cl" => Ok(Element::Cl),
            "K" => Ok(Element::K),
            "Ca" => Ok(Element::Ca),
            "Mn" => Ok(Element::Mn),
            "Fe" => Ok(Element::Fe),
            "Co" => Ok(Element::Co),
            "Ni" => Ok(Element::Ni),
            "Cu" => Ok(Element::Cu),
            "Zn" => Ok(Element::Zn),
            "Se" => Ok(Element::Se),
            "Br" => Ok(Element::Br),
            "I" => Ok(Element::I),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The twenty standard amino acids, keyed by their three-letter residue names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    ALA,
    ARG,
    ASN,
    ASP,
    CYS,
    GLN,
    GLU,
    GLY,
    HIS,
    ILE,
    LEU,
    LYS,
    MET,
    PHE,
    PRO,
    SER,
    THR,
    TRP,
    TYR,
    VAL,
}

impl AminoAcid {
    /// Resolves a three-letter residue name. Names outside the standard table
    /// yield `None`; callers fall back to [`FALLBACK_ONE_LETTER`].
    pub fn from_three_letter(name: &str) -> Option<Self> {
        match name.trim() {
            "ALA" => Some(AminoAcid::ALA),
            "ARG" => Some(AminoAcid::ARG),
            "ASN" => Some(AminoAcid::ASN),
            "ASP" => Some(AminoAcid::ASP),
            "CYS" => Some(AminoAcid::CYS),
            "GLN" => Some(AminoAcid::GLN),
            "GLU" => Some(AminoAcid::GLU),
            "GLY" => Some(AminoAcid::GLY),
            "HIS" => Some(AminoAcid::HIS),
            "ILE" => Some(AminoAcid::ILE),
            "LEU" => Some(AminoAcid::LEU),
            "LYS" => Some(AminoAcid::LYS),
            "MET" => Some(AminoAcid::MET),
            "PHE" => Some(AminoAcid::PHE),
            "PRO" => Some(AminoAcid::PRO),
            "SER" => Some(AminoAcid::SER),
            "THR" => Some(AminoAcid::THR),
            "TRP" => Some(AminoAcid::TRP),
            "TYR" => Some(AminoAcid::TYR),
            "VAL" => Some(AminoAcid::VAL),
            _ => None,
        }
    }

    pub fn one_letter(&self) -> char {
        match self {
            AminoAcid::ALA => 'A',
            AminoAcid::ARG => 'R',
            AminoAcid::ASN => 'N',
            AminoAcid::ASP => 'D',
            AminoAcid::CYS => 'C',
            AminoAcid::GLN => 'Q',
            AminoAcid::GLU => 'E',
            AminoAcid::GLY => 'G',
            AminoAcid::HIS => 'H',
            AminoAcid::ILE => 'I',
            AminoAcid::LEU => 'L',
            AminoAcid::LYS => 'K',
            AminoAcid::MET => 'M',
            AminoAcid::PHE => 'F',
            AminoAcid::PRO => 'P',
            AminoAcid::SER => 'S',
            AminoAcid::THR => 'T',
            AminoAcid::TRP => 'W',
            AminoAcid::TYR => 'Y',
            AminoAcid::VAL => 'V',
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_from_str_parses_known_symbols() {
        assert_eq!(Element::from_str("C"), Ok(Element::C));
        assert_eq!(Element::from_str(" Zn "), Ok(Element::Zn));
        assert_eq!(Element::from_str("CL"), Ok(Element::Cl));
    }

    #[test]
    fn element_from_str_rejects_unknown_symbols() {
        assert!(Element::from_str("Xx").is_err());
        assert!(Element::from_str("").is_err());
    }

    #[test]
    fn amino_acid_three_letter_round_trip() {
        let aa = AminoAcid::from_three_letter("TRP");
        assert_eq!(aa, Some(AminoAcid::TRP));
        assert_eq!(aa.map(|a| a.one_letter()), Some('W'));
    }

    #[test]
    fn amino_acid_unknown_name_is_none() {
        assert_eq!(AminoAcid::from_three_letter("HEM"), None);
        assert_eq!(AminoAcid::from_three_letter("WAT"), None);
    }
}
