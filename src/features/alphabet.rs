//!
//! Mapping between characters and base symbol ids
//!
use super::Symbol;
use crate::error::{Error, Result};

///
/// Array of valid DNA bases
///
pub const VALID_BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

///
/// Array of the 20 standard amino acids
///
pub const AMINO_ACIDS: [u8; 20] = [
    b'A', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'K', b'L', b'M', b'N', b'P', b'Q', b'R',
    b'S', b'T', b'V', b'W', b'Y',
];

///
/// Ordered set of characters; the position of a character is its symbol id.
///
/// Lookup is case-insensitive.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<u8>,
}

impl Alphabet {
    ///
    /// Alphabet of the given characters.
    /// Empty or duplicated characters are rejected.
    ///
    pub fn new(chars: &[u8]) -> Result<Self> {
        if chars.is_empty() {
            return Err(Error::InvalidFeatures("empty alphabet".to_string()));
        }
        let chars: Vec<u8> = chars.iter().map(|c| c.to_ascii_uppercase()).collect();
        for (i, c) in chars.iter().enumerate() {
            if chars[..i].contains(c) {
                return Err(Error::InvalidFeatures(format!(
                    "duplicated character `{}` in alphabet",
                    *c as char
                )));
            }
        }
        Ok(Alphabet { chars })
    }
    /// ACGT
    pub fn dna() -> Self {
        Alphabet {
            chars: VALID_BASES.to_vec(),
        }
    }
    pub fn protein() -> Self {
        Alphabet {
            chars: AMINO_ACIDS.to_vec(),
        }
    }
    pub fn len(&self) -> usize {
        self.chars.len()
    }
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
    ///
    /// symbol id of the character
    ///
    pub fn encode(&self, c: u8) -> Option<Symbol> {
        let c = c.to_ascii_uppercase();
        self.chars
            .iter()
            .position(|&x| x == c)
            .map(|i| i as Symbol)
    }
    ///
    /// character of the symbol id
    ///
    pub fn decode(&self, symbol: Symbol) -> Option<u8> {
        self.chars.get(symbol as usize).copied()
    }
    ///
    /// Encode a whole sequence. Unknown characters are an error.
    ///
    pub fn encode_seq(&self, seq: &[u8]) -> Result<Vec<Symbol>> {
        seq.iter()
            .enumerate()
            .map(|(i, &c)| {
                self.encode(c).ok_or_else(|| {
                    Error::InvalidFeatures(format!(
                        "informal character `{}` in seq[{}]",
                        c as char, i
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn alphabet_dna() {
        let a = Alphabet::dna();
        assert_eq!(a.len(), 4);
        assert_eq!(a.encode(b'A'), Some(0));
        assert_eq!(a.encode(b'g'), Some(2));
        assert_eq!(a.encode(b'N'), None);
        assert_eq!(a.decode(3), Some(b'T'));
        assert_eq!(a.decode(4), None);
        assert_eq!(a.encode_seq(b"ACgt").unwrap(), vec![0, 1, 2, 3]);
        assert!(a.encode_seq(b"ACNT").is_err());
    }
    #[test]
    fn alphabet_custom() {
        let a = Alphabet::new(b"xy").unwrap();
        assert_eq!(a.encode(b'Y'), Some(1));
        assert!(Alphabet::new(b"").is_err());
        assert!(Alphabet::new(b"aA").is_err());
        assert_eq!(Alphabet::protein().len(), 20);
    }
}
