//!
//! Sampling sequences from a trained `LinearHMM`
//!
use super::linear::LinearHMM;
use crate::error::{Error, Result};
use crate::features::{word::bits_for, Symbol};
use crate::prob::{lp, Prob};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// pick randomly from the choices with its own probability.
///
fn pick_with_prob<R: Rng>(rng: &mut R, choices: &[(Symbol, Prob)]) -> Option<Symbol> {
    choices
        .choose_weighted(rng, |item| item.1.to_value())
        .ok()
        .map(|item| item.0)
}

impl<'a> LinearHMM<'a> {
    ///
    /// Draw one symbol per position from the row of the position.
    ///
    /// Every position is drawn independently, which only makes sense for
    /// order-1 symbols; see `sample_bases_with_rng` for words.
    ///
    pub fn sample_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Vec<Symbol>> {
        let log_hist = self.log_hist().ok_or(Error::NotTrained)?;
        let m = self.num_symbols();
        (0..self.sequence_length())
            .map(|position| {
                let choices: Vec<(Symbol, Prob)> = log_hist[position * m..(position + 1) * m]
                    .iter()
                    .enumerate()
                    .map(|(symbol, &l)| (symbol as Symbol, lp(l)))
                    .collect();
                pick_with_prob(rng, &choices).ok_or(Error::EmptyDistribution(position))
            })
            .collect()
    }
    ///
    /// Draw a sequence of base symbols from a model over words of `order`
    /// base symbols (`original_num_symbols` of them).
    ///
    /// The first word is drawn from the whole row of position 0. Every
    /// later word must overlap the previous one, so it is drawn from the
    /// `original_num_symbols` words that start with the previous word's
    /// suffix, i.e. from `P(last symbol | previous order-1 symbols)`.
    /// The result has `sequence_length + order - 1` base symbols.
    ///
    pub fn sample_bases_with_rng<R: Rng>(
        &self,
        rng: &mut R,
        order: usize,
        original_num_symbols: usize,
    ) -> Result<Vec<Symbol>> {
        let log_hist = self.log_hist().ok_or(Error::NotTrained)?;
        let m = self.num_symbols();
        let n = original_num_symbols;
        let num_bits = bits_for(n);
        if n == 0 || order == 0 || num_bits * order > Symbol::BITS as usize {
            return Err(Error::DimensionMismatch(format!(
                "order {} words over {} symbols cannot be stored as symbols",
                order, n
            )));
        }
        let max_word = (0..order).fold(0usize, |acc, _| (acc << num_bits) | (n - 1));
        if max_word + 1 != m {
            return Err(Error::DimensionMismatch(format!(
                "order {} words over {} symbols have {} ids but the model has num_symbols={}",
                order,
                n,
                max_word + 1,
                m
            )));
        }
        let slot = (1usize << num_bits) - 1;
        let word_mask = (1usize << (num_bits * order)) - 1;

        let mut bases = Vec::with_capacity(self.sequence_length() + order - 1);
        let mut prev: Option<usize> = None;
        for position in 0..self.sequence_length() {
            let row = &log_hist[position * m..(position + 1) * m];
            let choices: Vec<(Symbol, Prob)> = match prev {
                // ids with an unused slot value (n not a power of two) are skipped
                None => row
                    .iter()
                    .enumerate()
                    .filter(|&(word, _)| (0..order).all(|t| ((word >> (t * num_bits)) & slot) < n))
                    .map(|(word, &l)| (word as Symbol, lp(l)))
                    .collect(),
                Some(prev) => {
                    let start = (prev << num_bits) & word_mask;
                    (start..start + n)
                        .map(|word| (word as Symbol, lp(row[word])))
                        .collect()
                }
            };
            let word =
                pick_with_prob(rng, &choices).ok_or(Error::EmptyDistribution(position))? as usize;
            match prev {
                None => bases.extend(
                    (0..order)
                        .rev()
                        .map(|t| ((word >> (t * num_bits)) & slot) as Symbol),
                ),
                Some(_) => bases.push((word & slot) as Symbol),
            }
            prev = Some(word);
        }
        Ok(bases)
    }
    ///
    /// `sample_bases_with_rng` with a seeded `Xoshiro256PlusPlus`
    ///
    pub fn sample_bases(
        &self,
        order: usize,
        original_num_symbols: usize,
        seed: u64,
    ) -> Result<Vec<Symbol>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self.sample_bases_with_rng(&mut rng, order, original_num_symbols)
    }
    ///
    /// `sample_bases_with_rng` for `n` sequences from one seeded generator
    ///
    pub fn sample_many_bases(
        &self,
        n: usize,
        order: usize,
        original_num_symbols: usize,
        seed: u64,
    ) -> Result<Vec<Vec<Symbol>>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        (0..n)
            .map(|_| self.sample_bases_with_rng(&mut rng, order, original_num_symbols))
            .collect()
    }
    ///
    /// `sample_with_rng` with a seeded `Xoshiro256PlusPlus`
    ///
    pub fn sample(&self, seed: u64) -> Result<Vec<Symbol>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self.sample_with_rng(&mut rng)
    }
    ///
    /// `n` sequences from one seeded generator
    ///
    pub fn sample_many(&self, n: usize, seed: u64) -> Result<Vec<Vec<Symbol>>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        (0..n).map(|_| self.sample_with_rng(&mut rng)).collect()
    }
}
