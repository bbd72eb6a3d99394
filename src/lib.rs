pub mod error;
pub mod features;
pub mod hist;
pub mod hmm;
pub mod io;
pub mod kernel;
pub mod latent;
pub mod prelude;
pub mod prob;

#[macro_use]
extern crate approx;
