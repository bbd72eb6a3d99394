//!
//! Custom kernel: a precomputed symmetric kernel matrix
//!
//! ## Packed storage
//!
//! Only the upper triangle (including the diagonal) of the `n x n` matrix
//! is stored, row by row. Row `i` holds the columns `i..n`:
//!
//! ```text
//! n=3      packed
//! a b c    [a b c d e f]
//! . d e     0 1 2 3 4 5
//! . . f
//! ```
//!
//! Row `i` starts after `n + (n-1) + ... + (n-i+1) = i(2n-i+1)/2` elements,
//! so for `i <= j`
//!
//! ```text
//! index(i, j) = i(2n-i+1)/2 + (j-i)
//! ```
//!
//! and `(i, j)` with `i > j` is looked up as `(j, i)`.
//!
use super::{Kernel, KernelType};
use crate::error::{check_index, check_len, Error, Result};
use crate::features::{FeatureClass, FeatureType, Features};
use log::{debug, info};
use std::io::{Read, Write};

///
/// Magic bytes of the binary matrix blob of `save_init`
///
const MAGIC: &[u8; 4] = b"SLKM";

///
/// number of packed elements of a `n x n` symmetric matrix
///
pub fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

///
/// `packed_len` that is `None` when `n * (n + 1)` overflows
///
fn checked_packed_len(n: usize) -> Option<usize> {
    n.checked_add(1)?.checked_mul(n).map(|x| x / 2)
}

///
/// `expected` is `usize::MAX` when the required length is not representable
///
fn check_required_len(required: Option<usize>, actual: usize) -> Result<()> {
    match required {
        Some(expected) => check_len(expected, actual),
        None => Err(Error::LengthMismatch {
            expected: usize::MAX,
            actual,
        }),
    }
}

///
/// upper bound of the up-front reservation of `load_init`; the header is
/// not trusted for more
///
const MAX_RESERVE: usize = 1 << 16;

///
/// position of `(i, j)` (`i <= j < n`) in the packed upper triangle
///
pub fn packed_index(i: usize, j: usize, n: usize) -> usize {
    debug_assert!(i <= j && j < n);
    i * (2 * n + 1 - i) / 2 + (j - i)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomKernel {
    kmatrix: Vec<f32>,
    num_cols: usize,
    num_lhs: usize,
    num_rhs: usize,
}

impl CustomKernel {
    ///
    /// kernel with an empty (0x0) matrix
    ///
    pub fn new() -> Self {
        CustomKernel::default()
    }
    ///
    /// Set the matrix from the concatenated rows of its upper triangle
    /// (`num*(num+1)/2` elements, see the module docs).
    ///
    pub fn set_matrix_from_triangle(&mut self, m: &[f64], num: usize) -> Result<()> {
        check_required_len(checked_packed_len(num), m.len())?;
        self.kmatrix = m.iter().map(|&x| x as f32).collect();
        self.num_cols = num;
        debug!("custom kernel: set {}x{} matrix from triangle", num, num);
        Ok(())
    }
    ///
    /// Set the matrix from a row-major `num x num` matrix.
    ///
    /// The matrix must be exactly symmetric; only the upper triangle is kept.
    ///
    pub fn set_matrix_from_square(&mut self, m: &[f64], num: usize) -> Result<()> {
        check_required_len(num.checked_mul(num), m.len())?;
        for row in 0..num {
            for col in row + 1..num {
                if m[row * num + col] != m[col * num + row] {
                    return Err(Error::NotSymmetric { row, col });
                }
            }
        }
        let mut kmatrix = Vec::with_capacity(packed_len(num));
        for row in 0..num {
            kmatrix.extend(m[row * num + row..(row + 1) * num].iter().map(|&x| x as f32));
        }
        self.kmatrix = kmatrix;
        self.num_cols = num;
        debug!("custom kernel: set {}x{} matrix from square", num, num);
        Ok(())
    }
    ///
    /// matrix dimension `n`
    ///
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }
    ///
    /// the packed upper triangle
    ///
    pub fn packed(&self) -> &[f32] {
        &self.kmatrix
    }
}

impl Kernel for CustomKernel {
    ///
    /// Only records the number of vectors on both sides; the values come
    /// from the matrix.
    ///
    fn init(&mut self, lhs: &dyn Features, rhs: &dyn Features, _do_init: bool) -> Result<()> {
        let (n_lhs, n_rhs) = (lhs.get_num_vectors(), rhs.get_num_vectors());
        if n_lhs > self.num_cols || n_rhs > self.num_cols {
            return Err(Error::DimensionMismatch(format!(
                "features {}x{} do not fit in the {}x{} kernel matrix",
                n_lhs, n_rhs, self.num_cols, self.num_cols
            )));
        }
        self.num_lhs = n_lhs;
        self.num_rhs = n_rhs;
        Ok(())
    }
    fn cleanup(&mut self) {
        self.num_lhs = 0;
        self.num_rhs = 0;
    }
    fn compute(&self, idx_a: usize, idx_b: usize) -> Result<f64> {
        check_index(idx_a, self.num_cols)?;
        check_index(idx_b, self.num_cols)?;
        let index = if idx_a <= idx_b {
            packed_index(idx_a, idx_b, self.num_cols)
        } else {
            packed_index(idx_b, idx_a, self.num_cols)
        };
        Ok(self.kmatrix[index] as f64)
    }
    fn get_kernel_type(&self) -> KernelType {
        KernelType::Custom
    }
    fn get_feature_type(&self) -> FeatureType {
        FeatureType::Any
    }
    fn get_feature_class(&self) -> FeatureClass {
        FeatureClass::Any
    }
    fn get_name(&self) -> &str {
        "Custom"
    }
    ///
    /// ```text
    /// "SLKM" | num_cols: u32 le | packed values: f32 le x num_cols(num_cols+1)/2
    /// ```
    ///
    fn load_init(&mut self, src: &mut dyn Read) -> Result<()> {
        let mut magic = [0u8; 4];
        src.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::InvalidFormat(format!(
                "unknown magic {:?} of kernel matrix",
                magic
            )));
        }
        let mut buf = [0u8; 4];
        src.read_exact(&mut buf)?;
        let num = u32::from_le_bytes(buf) as usize;
        let len = checked_packed_len(num).ok_or_else(|| {
            Error::InvalidFormat(format!("kernel matrix dimension {} is too large", num))
        })?;

        let mut kmatrix = Vec::with_capacity(len.min(MAX_RESERVE));
        for _ in 0..len {
            src.read_exact(&mut buf)?;
            kmatrix.push(f32::from_le_bytes(buf));
        }
        self.kmatrix = kmatrix;
        self.num_cols = num;
        info!("loaded {}x{} custom kernel matrix", num, num);
        Ok(())
    }
    fn save_init(&self, dest: &mut dyn Write) -> Result<()> {
        if self.num_cols > u32::MAX as usize {
            return Err(Error::InvalidFormat(format!(
                "matrix dimension {} does not fit in u32",
                self.num_cols
            )));
        }
        dest.write_all(MAGIC)?;
        dest.write_all(&(self.num_cols as u32).to_le_bytes())?;
        for x in self.kmatrix.iter() {
            dest.write_all(&x.to_le_bytes())?;
        }
        dest.flush()?;
        Ok(())
    }
    fn get_num_vec_lhs(&self) -> usize {
        self.num_lhs
    }
    fn get_num_vec_rhs(&self) -> usize {
        self.num_rhs
    }
}
