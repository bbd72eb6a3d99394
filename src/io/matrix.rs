//!
//! Whitespace separated text matrices
//!
//! ```text
//! 1.0 0.5 0.1
//! 0.5 1.0 0.2
//! 0.1 0.2 1.0
//! ```
//!
use crate::error::{Error, Result};
use std::io::BufRead;

///
/// Parse a square matrix into (row-major values, n).
/// Blank lines and lines starting with `#` are skipped.
///
pub fn parse_square<R: BufRead>(reader: R) -> Result<(Vec<f64>, usize)> {
    let mut values = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = None;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|x| {
                x.parse::<f64>().map_err(|e| {
                    Error::InvalidFormat(format!("line {}: `{}` {}", i + 1, x, e))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        match n_cols {
            None => n_cols = Some(row.len()),
            Some(n) if n != row.len() => {
                return Err(Error::InvalidFormat(format!(
                    "line {}: {} columns but expected {}",
                    i + 1,
                    row.len(),
                    n
                )))
            }
            _ => {}
        }
        values.extend(row);
        n_rows += 1;
    }
    if n_cols.unwrap_or(0) != n_rows {
        return Err(Error::InvalidFormat(format!(
            "matrix of {} rows and {} columns is not square",
            n_rows,
            n_cols.unwrap_or(0)
        )));
    }
    Ok((values, n_rows))
}

pub fn parse_square_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<(Vec<f64>, usize)> {
    let file = std::fs::File::open(path)?;
    parse_square(std::io::BufReader::new(file))
}
