//!
//! LinearHMMParams for training
//!
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

///
/// Parameters of `LinearHMM::train_with`
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearHMMParams {
    ///
    /// additive smoothing constant for every `(position, symbol)` count
    pub pseudo_count: f64,
}

impl LinearHMMParams {
    pub fn new(pseudo_count: f64) -> LinearHMMParams {
        LinearHMMParams { pseudo_count }
    }
    ///
    /// pseudo count should be finite and non-negative
    ///
    pub fn validate(&self) -> Result<()> {
        if self.pseudo_count.is_finite() && self.pseudo_count >= 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidPseudoCount(self.pseudo_count))
        }
    }
}

impl Default for LinearHMMParams {
    fn default() -> Self {
        LinearHMMParams::new(1e-3)
    }
}

impl std::fmt::Display for LinearHMMParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "pseudo_count: {}", self.pseudo_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn params_validate() {
        assert!(LinearHMMParams::default().validate().is_ok());
        assert!(LinearHMMParams::new(0.0).validate().is_ok());
        assert!(LinearHMMParams::new(-1.0).validate().is_err());
        assert!(LinearHMMParams::new(f64::NAN).validate().is_err());
        assert!(LinearHMMParams::new(f64::INFINITY).validate().is_err());
        assert_eq!(LinearHMMParams::default().to_string(), "pseudo_count: 0.001");
    }
}
