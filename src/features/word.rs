//!
//! In-memory symbol sequences with optional higher-order word encoding
//!
//! ## Word encoding
//!
//! With a base alphabet of `n` symbols, each base symbol takes
//! `num_bits = ceil(log2 n)` bits. An order-`k` word packs `k` consecutive
//! base symbols into one id, the last symbol in the lowest bits:
//!
//! ```text
//! ACG (order 3, DNA) = (0 << 4) | (1 << 2) | 2 = 6
//! ```
//!
//! Masking the lowest slot maps a word onto the first word sharing its
//! prefix, so `LinearHMM` can normalize counts per prefix and learn
//! `P(last symbol | previous k-1 symbols)` at each position.
//!
use super::{Alphabet, FeatureClass, FeatureType, Features, Symbol, SymbolFeatures};
use crate::error::{check_index, Error, Result};
use log::debug;
use std::borrow::Cow;

#[derive(Clone, Debug)]
pub struct WordFeatures {
    vectors: Vec<Vec<Symbol>>,
    num_features: usize,
    num_symbols: usize,
    original_num_symbols: usize,
    num_bits: usize,
    order: usize,
}

///
/// bits required to store one of `n` base symbols
///
pub(crate) fn bits_for(n: usize) -> usize {
    let mut bits = 1;
    while (1usize << bits) < n {
        bits += 1;
    }
    bits
}

impl WordFeatures {
    ///
    /// Order-1 features from already encoded base symbols `< original_num_symbols`.
    ///
    pub fn from_symbols(vectors: Vec<Vec<Symbol>>, original_num_symbols: usize) -> Result<Self> {
        Self::from_base_symbols(vectors, original_num_symbols, 1)
    }
    ///
    /// Features from byte strings over the alphabet, encoded into words of `order`.
    ///
    pub fn from_sequences<I, S>(seqs: I, alphabet: &Alphabet, order: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let vectors = seqs
            .into_iter()
            .map(|seq| alphabet.encode_seq(seq.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_base_symbols(vectors, alphabet.len(), order)
    }
    ///
    /// Encode base symbol vectors into words of `order`.
    ///
    /// All vectors must share the same length `>= order`.
    ///
    pub fn from_base_symbols(
        vectors: Vec<Vec<Symbol>>,
        original_num_symbols: usize,
        order: usize,
    ) -> Result<Self> {
        if original_num_symbols == 0 {
            return Err(Error::InvalidFeatures("empty alphabet".to_string()));
        }
        if order == 0 {
            return Err(Error::InvalidFeatures("order must be >= 1".to_string()));
        }
        let num_bits = bits_for(original_num_symbols);
        if num_bits * order > Symbol::BITS as usize {
            return Err(Error::InvalidFeatures(format!(
                "order {} words of {} symbols do not fit in {} bits",
                order,
                original_num_symbols,
                Symbol::BITS
            )));
        }

        let length = vectors.first().map_or(order, |v| v.len());
        if length < order {
            return Err(Error::InvalidFeatures(format!(
                "sequences of length {} are shorter than order {}",
                length, order
            )));
        }
        for (i, v) in vectors.iter().enumerate() {
            if v.len() != length {
                return Err(Error::InvalidFeatures(format!(
                    "vector #{} has length {} but #0 has {}",
                    i,
                    v.len(),
                    length
                )));
            }
            if let Some(&s) = v.iter().find(|&&s| s as usize >= original_num_symbols) {
                return Err(Error::SymbolOutOfRange {
                    symbol: s as usize,
                    num_symbols: original_num_symbols,
                });
            }
        }

        // the largest word has (n-1) in every slot
        let max_word = (0..order).fold(0usize, |acc, _| {
            (acc << num_bits) | (original_num_symbols - 1)
        });
        let words: Vec<Vec<Symbol>> = if order == 1 {
            vectors
        } else {
            vectors
                .iter()
                .map(|v| {
                    v.windows(order)
                        .map(|w| w.iter().fold(0, |acc: Symbol, &s| (acc << num_bits) | s))
                        .collect()
                })
                .collect()
        };
        let num_features = if words.is_empty() {
            0
        } else {
            length - order + 1
        };
        debug!(
            "word features: n_vectors={} num_features={} num_symbols={} order={}",
            words.len(),
            num_features,
            max_word + 1,
            order
        );

        Ok(WordFeatures {
            vectors: words,
            num_features,
            num_symbols: max_word + 1,
            original_num_symbols,
            num_bits,
            order,
        })
    }
    pub fn order(&self) -> usize {
        self.order
    }
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }
    pub fn iter(&self) -> impl Iterator<Item = &[Symbol]> + '_ {
        self.vectors.iter().map(|v| v.as_slice())
    }
}

impl Features for WordFeatures {
    fn get_num_vectors(&self) -> usize {
        self.vectors.len()
    }
    fn get_feature_type(&self) -> FeatureType {
        FeatureType::Word
    }
    fn get_feature_class(&self) -> FeatureClass {
        FeatureClass::Simple
    }
}

impl SymbolFeatures for WordFeatures {
    fn get_num_features(&self) -> usize {
        self.num_features
    }
    fn get_num_symbols(&self) -> usize {
        self.num_symbols
    }
    fn get_original_num_symbols(&self) -> usize {
        self.original_num_symbols
    }
    fn get_feature_vector(&self, index: usize) -> Result<Cow<'_, [Symbol]>> {
        check_index(index, self.vectors.len())?;
        Ok(Cow::Borrowed(&self.vectors[index]))
    }
    fn get_masked_symbols(&self, symbol: Symbol, mask: u16) -> Symbol {
        let slot: Symbol = ((1u32 << self.num_bits) - 1) as Symbol;
        (0..self.order)
            .filter(|&t| mask & (1u16 << t) != 0)
            .fold(0, |acc: Symbol, t| acc | (symbol & (slot << (t * self.num_bits))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn word_features_order1() {
        let f = WordFeatures::from_symbols(vec![vec![0, 1, 2], vec![2, 2, 0]], 3).unwrap();
        assert_eq!(f.get_num_vectors(), 2);
        assert_eq!(f.get_num_features(), 3);
        assert_eq!(f.get_num_symbols(), 3);
        assert_eq!(f.get_original_num_symbols(), 3);
        assert_eq!(f.get_feature_vector(1).unwrap().as_ref(), &[2, 2, 0]);
        assert!(f.get_feature_vector(2).is_err());
        // order 1: the span is the whole alphabet
        for s in 0..3 {
            assert_eq!(f.alphabet_span(s), (0, 3));
        }
        assert_eq!(f.get_feature_type(), FeatureType::Word);
        assert_eq!(f.get_feature_class(), FeatureClass::Simple);
    }
    #[test]
    fn word_features_order2_dna() {
        let f = WordFeatures::from_sequences(&["ACGT", "TTGA"], &Alphabet::dna(), 2).unwrap();
        assert_eq!(f.num_bits(), 2);
        assert_eq!(f.order(), 2);
        assert_eq!(f.get_num_features(), 3);
        assert_eq!(f.get_num_symbols(), 16);
        // AC=0b0001 CG=0b0110 GT=0b1011
        assert_eq!(f.get_feature_vector(0).unwrap().as_ref(), &[1, 6, 11]);
        // TT=0b1111 TG=0b1110 GA=0b1000
        assert_eq!(f.get_feature_vector(1).unwrap().as_ref(), &[15, 14, 8]);
        // span of a word is the 4 words sharing its first base
        assert_eq!(f.alphabet_span(6), (4, 4));
        assert_eq!(f.alphabet_span(15), (12, 4));
        assert_eq!(f.get_masked_symbols(6, 0b01), 2);
        assert_eq!(f.get_masked_symbols(6, 0b11), 6);
        assert_eq!(f.get_masked_symbols(6, 0), 0);
    }
    #[test]
    fn word_features_non_power_of_two() {
        let f = WordFeatures::from_base_symbols(vec![vec![2, 2, 1]], 3, 2).unwrap();
        // max word = (2 << 2) | 2 = 10
        assert_eq!(f.get_num_symbols(), 11);
        assert_eq!(f.get_feature_vector(0).unwrap().as_ref(), &[10, 9]);
        assert_eq!(f.alphabet_span(9), (8, 3));
    }
    #[test]
    fn word_features_invalid() {
        assert!(WordFeatures::from_symbols(vec![vec![0, 1], vec![0]], 2).is_err());
        assert!(WordFeatures::from_symbols(vec![vec![0, 2]], 2).is_err());
        assert!(WordFeatures::from_base_symbols(vec![vec![0]], 2, 2).is_err());
        assert!(WordFeatures::from_base_symbols(vec![vec![0; 10]], 4, 9).is_err());
        assert!(WordFeatures::from_symbols(vec![], 0).is_err());
        assert!(WordFeatures::from_sequences(&["ACNT"], &Alphabet::dna(), 1).is_err());
    }
    #[test]
    fn word_features_empty() {
        let f = WordFeatures::from_base_symbols(vec![], 4, 3).unwrap();
        assert_eq!(f.get_num_vectors(), 0);
        assert_eq!(f.get_num_features(), 0);
        assert_eq!(f.get_num_symbols(), 64);
    }
}
