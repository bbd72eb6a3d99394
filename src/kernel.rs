//!
//! Kernels: similarity between two feature vectors addressed by index
//!
//! * `Kernel`: the interface learning algorithms (e.g. SVMs) query
//! * `custom`: `CustomKernel`, a precomputed symmetric kernel matrix
//!
pub mod custom;

pub use custom::CustomKernel;

use crate::error::Result;
use crate::features::{FeatureClass, FeatureType, Features};

///
/// Kind of the kernel
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelType {
    /// kernel values are given, not computed from features
    Custom,
}

pub trait Kernel {
    ///
    /// Bind the kernel to the left-hand and right-hand side features.
    ///
    fn init(&mut self, lhs: &dyn Features, rhs: &dyn Features, do_init: bool) -> Result<()>;
    ///
    /// Release what `init` set up.
    ///
    fn cleanup(&mut self);
    ///
    /// kernel value between the `idx_a`-th lhs and the `idx_b`-th rhs vectors
    ///
    fn compute(&self, idx_a: usize, idx_b: usize) -> Result<f64>;
    fn get_kernel_type(&self) -> KernelType;
    fn get_feature_type(&self) -> FeatureType;
    fn get_feature_class(&self) -> FeatureClass;
    fn get_name(&self) -> &str;
    ///
    /// Restore the initialization data from a byte stream written by
    /// `save_init`.
    ///
    fn load_init(&mut self, src: &mut dyn std::io::Read) -> Result<()>;
    fn save_init(&self, dest: &mut dyn std::io::Write) -> Result<()>;
    ///
    /// number of lhs vectors bound by `init`
    ///
    fn get_num_vec_lhs(&self) -> usize;
    ///
    /// number of rhs vectors bound by `init`
    ///
    fn get_num_vec_rhs(&self) -> usize;
    ///
    /// Dense `n_lhs x n_rhs` matrix of every kernel value
    ///
    fn kernel_matrix(&self) -> Result<Vec<Vec<f64>>> {
        (0..self.get_num_vec_lhs())
            .map(|i| {
                (0..self.get_num_vec_rhs())
                    .map(|j| self.compute(i, j))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect()
    }
}
