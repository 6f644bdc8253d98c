//! Plain-text sample input for the command line tool
//!
//! Samples are whitespace or comma separated numbers; everything after a `#`
//! on a line is ignored.

use crate::errors::{ImgStatError, Result};
use ndarray::{ArrayD, IxDyn};
use std::io::BufRead;
use std::str::FromStr;

/// Parse every sample from `reader`.
///
/// # Errors
///
/// Returns [`ImgStatError::ParseError`] with the 1-based line number of the
/// first token that is not a valid `T`, or an I/O error from the reader.
pub fn read_samples<T, R>(reader: R) -> Result<Vec<T>>
where
    T: FromStr,
    R: BufRead,
{
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default();
        for token in content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let sample = token.parse::<T>().map_err(|_| ImgStatError::ParseError {
                line: idx + 1,
                token: token.to_string(),
            })?;
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Parse a shape such as `4,3,2` or `4x3x2`.
///
/// # Errors
///
/// Returns [`ImgStatError::InvalidShape`] if the shape is blank or any
/// dimension is empty or not a non-negative integer.
pub fn parse_shape(s: &str) -> Result<Vec<usize>> {
    let invalid = |message: String| ImgStatError::InvalidShape {
        shape: s.to_string(),
        message,
    };
    if s.trim().is_empty() {
        return Err(invalid("no dimensions given".to_string()));
    }
    s.split([',', 'x'])
        .map(str::trim)
        .enumerate()
        .map(|(idx, t)| {
            if t.is_empty() {
                return Err(invalid(format!("dimension {} is empty", idx + 1)));
            }
            t.parse::<usize>()
                .map_err(|_| invalid(format!("'{}' is not a dimension length", t)))
        })
        .collect()
}

/// Arrange samples into an array; no shape means a flat 1-D array.
///
/// # Errors
///
/// Returns [`ImgStatError::ArrayError`] if the shape does not match the sample count.
pub fn to_array<T>(samples: Vec<T>, shape: Option<&[usize]>) -> Result<ArrayD<T>> {
    let shape = match shape {
        Some(shape) => shape.to_vec(),
        None => vec![samples.len()],
    };
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), samples)?)
}
