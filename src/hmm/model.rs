//!
//! Persisted form of a trained `LinearHMM`
//!
//! ```text
//! {
//!   "sequence_length": 3,
//!   "num_symbols": 4,
//!   "pseudo_count": 0.001,
//!   "order": 1,
//!   "hist": [0.25, ...]
//! }
//! ```
//!
//! The probabilities are stored instead of their logs because json has no
//! representation of `-inf`; the log table is re-derived on load.
//!
use super::linear::LinearHMM;
use crate::error::{check_len, Error, Result};
use log::info;
use serde::{Deserialize, Serialize};

fn default_order() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearHMMModel {
    pub sequence_length: usize,
    pub num_symbols: usize,
    pub pseudo_count: f64,
    ///
    /// word order of the features the model was trained on
    #[serde(default = "default_order")]
    pub order: usize,
    pub hist: Vec<f64>,
}

impl LinearHMMModel {
    pub fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
    pub fn to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.to_writer(std::io::BufWriter::new(file))?;
        info!("model written to {}", path.as_ref().display());
        Ok(())
    }
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let model: LinearHMMModel = serde_json::from_reader(reader)?;
        check_len(model.sequence_length * model.num_symbols, model.hist.len())?;
        Ok(model)
    }
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl<'a> LinearHMM<'a> {
    ///
    /// Snapshot of the trained tables
    ///
    pub fn to_model(&self) -> Result<LinearHMMModel> {
        let hist = self.hist().ok_or(Error::NotTrained)?;
        Ok(LinearHMMModel {
            sequence_length: self.sequence_length(),
            num_symbols: self.num_symbols(),
            pseudo_count: self.pseudo_count(),
            order: default_order(),
            hist: hist.to_vec(),
        })
    }
    ///
    /// Model with the persisted tables and without a feature source
    ///
    pub fn from_model(model: &LinearHMMModel) -> Result<Self> {
        let mut hmm = LinearHMM::new(model.sequence_length, model.num_symbols);
        hmm.set_hist(&model.hist)?;
        hmm.set_pseudo_count(model.pseudo_count);
        Ok(hmm)
    }
}
