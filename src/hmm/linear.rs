//!
//! `LinearHMM`
//!
//! Each position of a fixed-length sequence has its own symbol distribution
//! and positions are independent (no transitions).
//!
//! ```text
//! P(x) = prod_pos hist[pos * num_symbols + x[pos]]
//! ```
//!
use super::params::LinearHMMParams;
use crate::error::{check_index, check_len, Error, Result};
use crate::features::{Symbol, SymbolFeatures};
use crate::hist::PositionHist;
use crate::prob::Prob;
use log::{debug, info, warn};

///
/// probability table and its log, always replaced together
///
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HistTable {
    pub hist: Vec<f64>,
    pub log_hist: Vec<f64>,
}

impl HistTable {
    fn from_hist(hist: Vec<f64>) -> Self {
        let log_hist = hist.iter().map(|p| p.ln()).collect();
        HistTable { hist, log_hist }
    }
    fn from_log_hist(log_hist: Vec<f64>) -> Self {
        let hist = log_hist.iter().map(|lp| lp.exp()).collect();
        HistTable { hist, log_hist }
    }
}

///
/// Linear (position-wise) HMM of symbol sequences
///
/// The feature source is borrowed for `'a`, the model never owns it.
///
pub struct LinearHMM<'a> {
    sequence_length: usize,
    num_symbols: usize,
    num_params: usize,
    pseudo_count: f64,
    table: Option<HistTable>,
    features: Option<&'a dyn SymbolFeatures>,
}

impl<'a> LinearHMM<'a> {
    ///
    /// Untrained model without a feature source.
    ///
    /// Tables can be installed by `set_hist`/`set_log_hist`, or a source
    /// can be attached later by `set_features`.
    ///
    pub fn new(sequence_length: usize, num_symbols: usize) -> Self {
        LinearHMM {
            sequence_length,
            num_symbols,
            num_params: sequence_length * num_symbols,
            pseudo_count: LinearHMMParams::default().pseudo_count,
            table: None,
            features: None,
        }
    }
    ///
    /// Untrained model whose dimensions are taken from the feature source.
    ///
    pub fn from_features(features: &'a dyn SymbolFeatures) -> Self {
        let mut hmm = Self::new(features.get_num_features(), features.get_num_symbols());
        hmm.features = Some(features);
        hmm
    }
    ///
    /// Attach a feature source of the same dimensions.
    ///
    pub fn set_features(&mut self, features: &'a dyn SymbolFeatures) -> Result<()> {
        if features.get_num_features() != self.sequence_length
            || features.get_num_symbols() != self.num_symbols
        {
            return Err(Error::DimensionMismatch(format!(
                "model is {}x{} but features are {}x{}",
                self.sequence_length,
                self.num_symbols,
                features.get_num_features(),
                features.get_num_symbols()
            )));
        }
        self.features = Some(features);
        Ok(())
    }
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }
    pub fn num_symbols(&self) -> usize {
        self.num_symbols
    }
    pub fn num_params(&self) -> usize {
        self.num_params
    }
    ///
    /// pseudo count of the last training
    ///
    pub fn pseudo_count(&self) -> f64 {
        self.pseudo_count
    }
    pub fn set_pseudo_count(&mut self, pseudo_count: f64) {
        self.pseudo_count = pseudo_count;
    }
    pub fn is_trained(&self) -> bool {
        self.table.is_some()
    }
    pub fn hist(&self) -> Option<&[f64]> {
        self.table.as_ref().map(|t| t.hist.as_slice())
    }
    pub fn log_hist(&self) -> Option<&[f64]> {
        self.table.as_ref().map(|t| t.log_hist.as_slice())
    }
    ///
    /// probabilities of every symbol at the position
    ///
    pub fn positional_probs(&self, position: usize) -> Result<&[f64]> {
        let table = self.table()?;
        check_index(position, self.sequence_length)?;
        let start = position * self.num_symbols;
        Ok(&table.hist[start..start + self.num_symbols])
    }
    fn table(&self) -> Result<&HistTable> {
        self.table.as_ref().ok_or(Error::NotTrained)
    }
    fn features(&self) -> Result<&'a dyn SymbolFeatures> {
        self.features.ok_or(Error::NoFeatures)
    }
    ///
    /// check the length and the symbols of a sequence
    ///
    fn check_vector(&self, vector: &[Symbol]) -> Result<()> {
        check_len(self.sequence_length, vector.len())?;
        match vector.iter().find(|&&s| s as usize >= self.num_symbols) {
            Some(&s) => Err(Error::SymbolOutOfRange {
                symbol: s as usize,
                num_symbols: self.num_symbols,
            }),
            None => Ok(()),
        }
    }
}

//
// training
//
impl<'a> LinearHMM<'a> {
    ///
    /// Train on every vector of the feature source.
    ///
    pub fn train(&mut self, pseudo_count: f64) -> Result<()> {
        let n = self.features()?.get_num_vectors();
        self.train_indices(0..n, pseudo_count)
    }
    ///
    /// Train on the vectors of the given indices.
    ///
    /// An index out of `[0, num_vectors)` is an error and leaves the
    /// model untouched.
    ///
    pub fn train_on(&mut self, indices: &[usize], pseudo_count: f64) -> Result<()> {
        let n = self.features()?.get_num_vectors();
        for &index in indices {
            check_index(index, n)?;
        }
        self.train_indices(indices.iter().copied(), pseudo_count)
    }
    ///
    /// `train`/`train_on` with a parameter struct
    ///
    pub fn train_with(
        &mut self,
        params: &LinearHMMParams,
        indices: Option<&[usize]>,
    ) -> Result<()> {
        match indices {
            Some(indices) => self.train_on(indices, params.pseudo_count),
            None => self.train(params.pseudo_count),
        }
    }
    ///
    /// Build new tables from the counts and swap them in only when
    /// everything succeeded.
    ///
    fn train_indices<I>(&mut self, indices: I, pseudo_count: f64) -> Result<()>
    where
        I: Iterator<Item = usize>,
    {
        LinearHMMParams::new(pseudo_count).validate()?;
        let features = self.features()?;

        let mut counts = PositionHist::new(self.sequence_length, self.num_symbols);
        let mut n_vectors = 0;
        for index in indices {
            let vector = features.get_feature_vector(index)?;
            self.check_vector(&vector)?;
            counts.add_sequence(&vector);
            n_vectors += 1;
        }
        debug!("counts: {}", counts);
        if counts.is_empty() {
            warn!("no symbols counted; the table is built from the pseudo count only");
        }

        let table = self.normalize(features, &counts, pseudo_count)?;
        self.table = Some(table);
        self.pseudo_count = pseudo_count;
        info!(
            "trained linear hmm on {} vectors, {} symbols (L={} M={} pseudo_count={})",
            n_vectors,
            counts.len(),
            self.sequence_length,
            self.num_symbols,
            pseudo_count
        );
        Ok(())
    }
    ///
    /// ```text
    /// hist[pos, sym] = (count[pos, sym] + pc) / (sum_{s in span(sym)} count[pos, s] + n * pc)
    /// ```
    /// where `n` is the size of the original alphabet.
    ///
    /// With zero denominator (`pc == 0` and an unobserved span) the
    /// probability is 0 and its log is `-inf`.
    ///
    fn normalize(
        &self,
        features: &dyn SymbolFeatures,
        counts: &PositionHist,
        pseudo_count: f64,
    ) -> Result<HistTable> {
        let n_original = features.get_original_num_symbols() as f64;
        let spans = (0..self.num_symbols)
            .map(|symbol| {
                let (start, count) = features.alphabet_span(symbol as Symbol);
                if start + count > self.num_symbols {
                    Err(Error::DimensionMismatch(format!(
                        "span {}..{} of symbol {} exceeds num_symbols={}",
                        start,
                        start + count,
                        symbol,
                        self.num_symbols
                    )))
                } else {
                    Ok((start, count))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let mut hist = Vec::with_capacity(self.num_params);
        for position in 0..self.sequence_length {
            for (symbol, &(start, count)) in spans.iter().enumerate() {
                let sum = counts.span_sum(position, start, count) as f64;
                let denominator = sum + n_original * pseudo_count;
                let p = if denominator > 0.0 {
                    (counts.get(position, symbol) as f64 + pseudo_count) / denominator
                } else {
                    0.0
                };
                hist.push(p);
            }
        }
        Ok(HistTable::from_hist(hist))
    }
}

//
// installing tables directly
//
impl<'a> LinearHMM<'a> {
    ///
    /// Install a probability table of length `num_params`; its log is derived.
    ///
    pub fn set_hist(&mut self, hist: &[f64]) -> Result<()> {
        check_len(self.num_params, hist.len())?;
        self.table = Some(HistTable::from_hist(hist.to_vec()));
        Ok(())
    }
    ///
    /// Install a log probability table of length `num_params`; the
    /// probabilities are derived.
    ///
    pub fn set_log_hist(&mut self, log_hist: &[f64]) -> Result<()> {
        check_len(self.num_params, log_hist.len())?;
        self.table = Some(HistTable::from_log_hist(log_hist.to_vec()));
        Ok(())
    }
}

//
// likelihood queries
//
impl<'a> LinearHMM<'a> {
    ///
    /// `log P(vector) = sum_pos log_hist[pos * num_symbols + vector[pos]]`
    ///
    /// Unseen symbols without smoothing give `-inf`.
    ///
    pub fn log_likelihood(&self, vector: &[Symbol]) -> Result<f64> {
        let table = self.table()?;
        self.check_vector(vector)?;
        let p: Prob = vector
            .iter()
            .enumerate()
            .map(|(position, &symbol)| {
                Prob::from_log_prob(table.log_hist[position * self.num_symbols + symbol as usize])
            })
            .product();
        Ok(p.to_log_value())
    }
    ///
    /// log likelihood of the `index`-th vector of the feature source
    ///
    pub fn log_likelihood_example(&self, index: usize) -> Result<f64> {
        let vector = self.features()?.get_feature_vector(index)?;
        self.log_likelihood(&vector)
    }
    ///
    /// log likelihood of every vector of the feature source
    ///
    pub fn log_likelihoods(&self) -> Result<Vec<f64>> {
        let n = self.features()?.get_num_vectors();
        (0..n).map(|i| self.log_likelihood_example(i)).collect()
    }
    ///
    /// `P(vector)` in the plain (non-log) product form
    ///
    pub fn likelihood(&self, vector: &[Symbol]) -> Result<f64> {
        let table = self.table()?;
        self.check_vector(vector)?;
        Ok(vector
            .iter()
            .enumerate()
            .map(|(position, &symbol)| table.hist[position * self.num_symbols + symbol as usize])
            .product())
    }
    pub fn likelihood_example(&self, index: usize) -> Result<f64> {
        let vector = self.features()?.get_feature_vector(index)?;
        self.likelihood(&vector)
    }
    ///
    /// Derivative of `log P(example)` with respect to the parameter
    /// `hist[param]`.
    ///
    /// The parameter encodes `position = param / num_symbols` and
    /// `symbol = param % num_symbols`; the derivative is `1 / hist[param]`
    /// if the example has `symbol` at `position`, and 0 otherwise.
    ///
    pub fn log_derivative(&self, param: usize, example: usize) -> Result<f64> {
        let table = self.table()?;
        check_index(param, self.num_params)?;
        let vector = self.features()?.get_feature_vector(example)?;
        self.check_vector(&vector)?;

        let position = param / self.num_symbols;
        let symbol = param % self.num_symbols;
        if vector[position] as usize == symbol {
            Ok(1.0 / table.hist[param])
        } else {
            Ok(0.0)
        }
    }
}
