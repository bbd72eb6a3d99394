//!
//! Feature sources consumed by the models and kernels
//!
//! * `Features`: anything that holds a number of feature vectors
//! * `SymbolFeatures`: fixed-length symbol sequences, consumed by `LinearHMM`
//!
pub mod alphabet;
pub mod word;

pub use alphabet::Alphabet;
pub use word::WordFeatures;

use crate::error::Result;
use std::borrow::Cow;

///
/// Symbol id in a (possibly extended) alphabet
///
pub type Symbol = u16;

///
/// Mask for `get_masked_symbols` that clears the lowest symbol slot
/// and keeps every other slot.
///
pub const SPAN_MASK: u16 = !1;

///
/// Type of the elements of the feature vectors
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureType {
    /// accepts features of any type
    Any,
    /// 16bit symbol ids
    Word,
}

///
/// Class (storage layout) of the features
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureClass {
    /// accepts features of any class
    Any,
    /// dense fixed-length vectors
    Simple,
    /// opaque latent data items
    Latent,
}

///
/// Collection of feature vectors
///
pub trait Features {
    fn get_num_vectors(&self) -> usize;
    fn get_feature_type(&self) -> FeatureType;
    fn get_feature_class(&self) -> FeatureClass;
}

///
/// Collection of fixed-length symbol sequences
///
pub trait SymbolFeatures: Features {
    ///
    /// length of each sequence (the number of positions)
    ///
    fn get_num_features(&self) -> usize;
    ///
    /// size of the extended alphabet that symbol ids index into
    ///
    fn get_num_symbols(&self) -> usize;
    ///
    /// size of the base alphabet the extended one is built from
    ///
    fn get_original_num_symbols(&self) -> usize;
    ///
    /// Fetch the sequence of the `index`-th vector.
    ///
    /// The returned `Cow` either borrows the stored sequence or owns a
    /// scratch buffer; either way it is released when dropped.
    ///
    fn get_feature_vector(&self, index: usize) -> Result<Cow<'_, [Symbol]>>;
    ///
    /// Apply the slot mask to an extended symbol.
    /// A cleared bit `t` of `mask` clears the `t`-th symbol slot.
    ///
    fn get_masked_symbols(&self, symbol: Symbol, mask: u16) -> Symbol;
    ///
    /// The span of extended symbols `(start, count)` that shares every slot
    /// with `symbol` except the lowest one.
    ///
    /// Normalization of `LinearHMM` sums counts over this span.
    ///
    fn alphabet_span(&self, symbol: Symbol) -> (usize, usize) {
        (
            self.get_masked_symbols(symbol, SPAN_MASK) as usize,
            self.get_original_num_symbols(),
        )
    }
}
