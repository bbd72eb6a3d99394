//!
//! Linear HMM: position-wise multinomial model of fixed-length symbol sequences
//!
//! * `linear`: `LinearHMM` training and likelihood queries
//! * `params`: training parameters
//! * `model`: persisted form of a trained model (json)
//! * `sampler`: drawing sequences from a trained model
//!
pub mod linear;
pub mod model;
pub mod params;
pub mod sampler;

pub use linear::LinearHMM;
pub use model::LinearHMMModel;
pub use params::LinearHMMParams;
