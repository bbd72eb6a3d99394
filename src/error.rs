//!
//! Error type shared by the models, kernels and feature containers
//!
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// the model needs a feature source but none is attached
    #[error("no feature source is attached")]
    NoFeatures,

    /// probability tables are queried before `train` or `set_hist`
    #[error("model is not trained")]
    NotTrained,

    #[error("index {index} is out of range (len={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("length mismatch: expected {expected} but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("symbol {symbol} is out of the alphabet (num_symbols={num_symbols})")]
    SymbolOutOfRange { symbol: usize, num_symbols: usize },

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("pseudo count must be finite and non-negative, got {0}")]
    InvalidPseudoCount(f64),

    /// square kernel matrix with `m[row][col] != m[col][row]`
    #[error("matrix is not symmetric at ({row}, {col})")]
    NotSymmetric { row: usize, col: usize },

    /// no symbol has positive probability at the position
    #[error("position {0} has no probability mass")]
    EmptyDistribution(usize),

    #[error("invalid features: {0}")]
    InvalidFeatures(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

///
/// check `index < len` or return `Error::IndexOutOfRange`
///
pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { index, len })
    }
}

///
/// check `actual == expected` or return `Error::LengthMismatch`
///
pub fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn error_messages() {
        let e = check_index(5, 3).unwrap_err();
        assert_eq!(e.to_string(), "index 5 is out of range (len=3)");
        assert!(check_index(2, 3).is_ok());

        let e = check_len(6, 4).unwrap_err();
        assert_eq!(e.to_string(), "length mismatch: expected 6 but got 4");
        assert!(check_len(4, 4).is_ok());

        let e = Error::NotSymmetric { row: 0, col: 2 };
        assert_eq!(e.to_string(), "matrix is not symmetric at (0, 2)");
    }
}
