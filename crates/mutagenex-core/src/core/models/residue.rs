use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The 20 standard amino acids accepted as mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA
    Glycine,    // GLY
    Isoleucine, // ILE
    Leucine,    // LEU
    Proline,    // PRO
    Valine,     // VAL

    // --- Aromatic ---
    Phenylalanine, // PHE
    Tryptophan,    // TRP
    Tyrosine,      // TYR

    // --- Polar, Uncharged ---
    Asparagine, // ASN
    Cysteine,   // CYS
    Glutamine,  // GLN
    Methionine, // MET
    Serine,     // SER
    Threonine,  // THR

    // --- Positively Charged (Basic) ---
    Arginine,  // ARG
    Histidine, // HIS
    Lysine,    // LYS

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // ASP
    GlutamicAcid, // GLU
}

static CODE_TO_ACID: phf::Map<&'static str, AminoAcid> = phf::phf_map! {
    "ALA" => AminoAcid::Alanine,
    "ARG" => AminoAcid::Arginine,
    "ASN" => AminoAcid::Asparagine,
    "ASP" => AminoAcid::AsparticAcid,
    "CYS" => AminoAcid::Cysteine,
    "GLN" => AminoAcid::Glutamine,
    "GLU" => AminoAcid::GlutamicAcid,
    "GLY" => AminoAcid::Glycine,
    "HIS" => AminoAcid::Histidine,
    "ILE" => AminoAcid::Isoleucine,
    "LEU" => AminoAcid::Leucine,
    "LYS" => AminoAcid::Lysine,
    "MET" => AminoAcid::Methionine,
    "PHE" => AminoAcid::Phenylalanine,
    "PRO" => AminoAcid::Proline,
    "SER" => AminoAcid::Serine,
    "THR" => AminoAcid::Threonine,
    "TRP" => AminoAcid::Tryptophan,
    "TYR" => AminoAcid::Tyrosine,
    "VAL" => AminoAcid::Valine,
};

/// Why a residue token was rejected.
///
/// A malformed code (wrong length, not uppercase) is reported separately from
/// a well-formed code that is simply not in the catalog, so diagnostics can
/// tell a typo from an unsupported residue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AminoAcidError {
    #[error("Invalid amino acid code '{0}'. Should be a 3-letter uppercase code.")]
    Malformed(String),

    #[error("'{0}' is not a valid amino acid code.")]
    Unknown(String),
}

impl AminoAcid {
    /// The three-letter uppercase code for this residue type.
    pub fn three_letter(&self) -> &'static str {
        match self {
            AminoAcid::Alanine => "ALA",
            AminoAcid::Arginine => "ARG",
            AminoAcid::Asparagine => "ASN",
            AminoAcid::AsparticAcid => "ASP",
            AminoAcid::Cysteine => "CYS",
            AminoAcid::Glutamine => "GLN",
            AminoAcid::GlutamicAcid => "GLU",
            AminoAcid::Glycine => "GLY",
            AminoAcid::Histidine => "HIS",
            AminoAcid::Isoleucine => "ILE",
            AminoAcid::Leucine => "LEU",
            AminoAcid::Lysine => "LYS",
            AminoAcid::Methionine => "MET",
            AminoAcid::Phenylalanine => "PHE",
            AminoAcid::Proline => "PRO",
            AminoAcid::Serine => "SER",
            AminoAcid::Threonine => "THR",
            AminoAcid::Tryptophan => "TRP",
            AminoAcid::Tyrosine => "TYR",
            AminoAcid::Valine => "VAL",
        }
    }
}

impl FromStr for AminoAcid {
    type Err = AminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(AminoAcidError::Malformed(s.to_string()));
        }
        CODE_TO_ACID
            .get(s)
            .copied()
            .ok_or_else(|| AminoAcidError::Unknown(s.to_string()))
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_catalog_codes_round_trip() {
        for code in CODE_TO_ACID.keys() {
            let acid: AminoAcid = code.parse().unwrap();
            assert_eq!(acid.three_letter(), *code);
        }
        assert_eq!(CODE_TO_ACID.len(), 20);
    }

    #[test]
    fn parse_recognizes_standard_codes() {
        assert_eq!("PRO".parse::<AminoAcid>().unwrap(), AminoAcid::Proline);
        assert_eq!("ALA".parse::<AminoAcid>().unwrap(), AminoAcid::Alanine);
        assert_eq!("LYS".parse::<AminoAcid>().unwrap(), AminoAcid::Lysine);
    }

    #[test]
    fn parse_rejects_lowercase_as_malformed() {
        assert_eq!(
            "pro".parse::<AminoAcid>(),
            Err(AminoAcidError::Malformed("pro".to_string()))
        );
    }

    #[test]
    fn parse_rejects_wrong_length_as_malformed() {
        assert_eq!(
            "ALAN".parse::<AminoAcid>(),
            Err(AminoAcidError::Malformed("ALAN".to_string()))
        );
        assert_eq!(
            "AL".parse::<AminoAcid>(),
            Err(AminoAcidError::Malformed("AL".to_string()))
        );
    }

    #[test]
    fn parse_rejects_well_formed_unknown_code() {
        assert_eq!(
            "XXX".parse::<AminoAcid>(),
            Err(AminoAcidError::Unknown("XXX".to_string()))
        );
    }

    #[test]
    fn display_matches_three_letter_code() {
        assert_eq!(AminoAcid::Tryptophan.to_string(), "TRP");
    }
}
