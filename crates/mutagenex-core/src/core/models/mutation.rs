use super::residue::{AminoAcid, AminoAcidError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A location within a chain: a residue number with an optional
/// single-letter insertion code (e.g. `110A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResiduePosition {
    pub number: u32,
    pub insertion_code: Option<char>,
}

impl ResiduePosition {
    /// Parses `\d+[A-Z]?`, the position part of a mutation token.
    pub fn parse(s: &str) -> Option<Self> {
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, suffix) = s.split_at(split);
        if digits.is_empty() {
            return None;
        }
        let number: u32 = digits.parse().ok()?;
        let insertion_code = match suffix.len() {
            0 => None,
            1 => {
                let c = suffix.chars().next()?;
                if !c.is_ascii_uppercase() {
                    return None;
                }
                Some(c)
            }
            _ => return None,
        };
        Some(Self {
            number,
            insertion_code,
        })
    }
}

impl fmt::Display for ResiduePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

/// One instruction to change the residue at a chain position to a new type.
///
/// Parsed from a `_`-delimited token in the form `resno_chain_newresidue`
/// (e.g. `110A_H_ALA`). Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRecord {
    pub position: ResiduePosition,
    pub chain_id: char,
    pub target: AminoAcid,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationParseError {
    #[error("Invalid mutation format '{0}', expected 'resno_chain_newresidue'.")]
    Format(String),

    #[error(
        "Invalid residue position '{position}' in mutation '{token}'. Should be a number with an optional insertion-code letter."
    )]
    Position { token: String, position: String },

    #[error("Invalid chain '{chain}' in mutation '{token}'. Should be a single uppercase letter.")]
    Chain { token: String, chain: String },

    #[error("{source} (in mutation '{token}')")]
    Residue {
        token: String,
        #[source]
        source: AminoAcidError,
    },
}

impl MutationRecord {
    /// The engine selection expression addressing this record's residue,
    /// in `chain/position/` slash-macro form.
    pub fn selection(&self) -> String {
        format!("{}/{}/", self.chain_id, self.position)
    }
}

impl FromStr for MutationRecord {
    type Err = MutationParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut parts = token.split('_');
        let (Some(position), Some(chain), Some(residue), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(MutationParseError::Format(token.to_string()));
        };

        let chain_id = {
            let mut chars = chain.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => c,
                _ => {
                    return Err(MutationParseError::Chain {
                        token: token.to_string(),
                        chain: chain.to_string(),
                    });
                }
            }
        };

        let target: AminoAcid = residue
            .parse()
            .map_err(|source| MutationParseError::Residue {
                token: token.to_string(),
                source,
            })?;

        let position =
            ResiduePosition::parse(position).ok_or_else(|| MutationParseError::Position {
                token: token.to_string(),
                position: position.to_string(),
            })?;

        Ok(Self {
            position,
            chain_id,
            target,
        })
    }
}

impl fmt::Display for MutationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.position, self.chain_id, self.target)
    }
}
