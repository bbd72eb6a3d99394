//!
//! Histogram counter of symbols per sequence position
//!
use itertools::Itertools;

///
/// Dense occurrence table of `(position, symbol)` pairs
///
/// * new
/// * add_sequence
/// * get
/// * span_sum
/// * iter
///
/// The count of `symbol` at `position` lives in
/// `counts[position * num_symbols + symbol]`.
///
#[derive(Clone, Debug)]
pub struct PositionHist {
    num_symbols: usize,
    counts: Vec<usize>,
}

impl PositionHist {
    ///
    /// Create an empty counter for `sequence_length` positions
    ///
    pub fn new(sequence_length: usize, num_symbols: usize) -> Self {
        PositionHist {
            num_symbols,
            counts: vec![0; sequence_length * num_symbols],
        }
    }
    ///
    /// Count every symbol of the sequence at its position
    ///
    /// Symbols are expected to be validated by the caller.
    pub fn add_sequence(&mut self, symbols: &[u16]) {
        for (position, &symbol) in symbols.iter().enumerate() {
            self.counts[position * self.num_symbols + symbol as usize] += 1;
        }
    }
    ///
    /// Get count of the symbol at the position
    ///
    pub fn get(&self, position: usize, symbol: usize) -> usize {
        self.counts[position * self.num_symbols + symbol]
    }
    ///
    /// Sum of counts of symbols `start..start+count` at the position
    ///
    pub fn span_sum(&self, position: usize, start: usize, count: usize) -> usize {
        let offset = position * self.num_symbols + start;
        self.counts[offset..offset + count].iter().sum()
    }
    ///
    /// Iterate over (position, symbol, count) of non-zero entries
    ///
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let n = self.num_symbols;
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(move |(i, &c)| (i / n, i % n, c))
    }
    ///
    /// Total number of counted symbols
    ///
    pub fn len(&self) -> usize {
        self.counts.iter().sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for PositionHist {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = self
            .iter()
            .map(|(pos, sym, c)| format!("{}/{}:{}", pos, sym, c))
            .join(",");
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn position_hist() {
        let mut h = PositionHist::new(3, 4);
        assert!(h.is_empty());
        h.add_sequence(&[0, 1, 3]);
        h.add_sequence(&[0, 2, 3]);
        h.add_sequence(&[1, 2, 3]);
        println!("{}", h);
        assert_eq!(h.get(0, 0), 2);
        assert_eq!(h.get(0, 1), 1);
        assert_eq!(h.get(1, 2), 2);
        assert_eq!(h.get(2, 3), 3);
        assert_eq!(h.get(2, 0), 0);
        assert_eq!(h.len(), 9);
        assert_eq!(h.span_sum(0, 0, 4), 3);
        assert_eq!(h.span_sum(1, 1, 2), 3);
        assert_eq!(h.to_string(), "0/0:2,0/1:1,1/1:1,1/2:2,2/3:3");
    }
    #[test]
    fn position_hist_short_sequence() {
        // shorter sequences leave the tail positions untouched
        let mut h = PositionHist::new(3, 2);
        h.add_sequence(&[1]);
        assert_eq!(h.get(0, 1), 1);
        assert_eq!(h.span_sum(1, 0, 2), 0);
    }
}
