///
/// probability calculation in log space
///
/// Likelihoods of long sequences underflow `f64` quickly, so the
/// per-position probabilities are accumulated as `Prob`.
///

///
/// Wrapper of f64 that represents probability `0 <= p <= 1`
/// by storing `log p`.
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Prob(f64);

///
/// short-hand of `Prob::from_log_prob`
///
pub fn lp(lp: f64) -> Prob {
    Prob::from_log_prob(lp)
}

impl Prob {
    pub fn from_log_prob(log_value: f64) -> Prob {
        Prob(log_value)
    }
    ///
    /// Get the probability (in `[0, 1]`)
    pub fn to_value(self) -> f64 {
        self.0.exp()
    }
    ///
    /// Get the log probability
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// prob=1.0
    ///
    pub fn one() -> Prob {
        Prob(0.0)
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
impl std::ops::Mul for Prob {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Prob(self.0 + other.0)
    }
}

impl std::iter::Product for Prob {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prob_mul() {
        assert_abs_diff_eq!((lp(0.3f64.ln()) * lp(0.3f64.ln())).to_value(), 0.09, epsilon = 1e-12);
        assert_abs_diff_eq!(
            (lp(0.5f64.ln()) * lp(0.00001f64.ln())).to_log_value(),
            0.000005f64.ln(),
            epsilon = 1e-12
        );
    }
    #[test]
    fn prob_product() {
        // product of zero element vec
        let xs: Vec<Prob> = vec![];
        let product: Prob = xs.iter().copied().product();
        assert_eq!(product, Prob::one());

        let xs = vec![lp(0.1f64.ln()); 3];
        let product: Prob = xs.iter().copied().product();
        assert_relative_eq!(product.to_value(), 0.001);
    }
    #[test]
    fn prob_zero_is_absorbing() {
        let xs = vec![lp(-1.5), lp(f64::NEG_INFINITY), lp(-0.5)];
        let product: Prob = xs.into_iter().product();
        assert_eq!(product.to_log_value(), f64::NEG_INFINITY);
        assert_eq!(product.to_value(), 0.0);
    }
}
