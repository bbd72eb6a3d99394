//!
//! Input parsers used by the command line front end
//!
pub mod fasta;
pub mod matrix;
