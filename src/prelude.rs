//!
//! globally-available parts
//!
pub use crate::error::{Error, Result};
pub use crate::features::{
    Alphabet, FeatureClass, FeatureType, Features, Symbol, SymbolFeatures, WordFeatures,
};
pub use crate::hmm::{LinearHMM, LinearHMMModel, LinearHMMParams};
pub use crate::kernel::{CustomKernel, Kernel, KernelType};
pub use crate::latent::{LatentData, LatentFeatures};
pub use crate::prob::Prob;
