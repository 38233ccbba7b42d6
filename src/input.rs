//! Reader for the generated input files.
//!
//! The format is a single whitespace-delimited stream: a positive element
//! count first, then exactly that many decimal 32-bit integers. Spaces and
//! newlines are interchangeable and trailing whitespace is tolerated, which
//! covers both the line-per-value and space-separated layouts the
//! generators emit.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Parses an input stream into its values.
///
/// Fails if the stream does not begin with a positive count, if any token
/// is not a decimal `i32`, or if the stream ends before the promised number
/// of values (short input is an argument error, not a truncation).
///
/// # Examples
///
/// ```
/// use hypersort::input::parse_input;
///
/// let values = parse_input("4\n7 -3\n12 0\n".as_bytes()).unwrap();
/// assert_eq!(values, vec![7, -3, 12, 0]);
/// ```
pub fn parse_input<R: Read>(mut reader: R) -> Result<Vec<i32>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut tokens = text.split_ascii_whitespace();

    // The count is itself a 32-bit quantity in this format.
    let count = tokens.next().ok_or(Error::MissingCount)?;
    let n: i32 = count.parse().map_err(|_| Error::MissingCount)?;
    if n <= 0 {
        return Err(Error::MissingCount);
    }
    let n = n as usize;

    let mut values = Vec::with_capacity(n);
    for token in tokens.by_ref().take(n) {
        let value = token.parse::<i32>().map_err(|_| Error::InvalidToken {
            token: token.to_string(),
        })?;
        values.push(value);
    }
    if values.len() < n {
        return Err(Error::ShortInput {
            expected: n,
            found: values.len(),
        });
    }
    Ok(values)
}

/// Loads and parses an input file.
pub fn load_input(path: &Path) -> Result<Vec<i32>> {
    let file = File::open(path)?;
    parse_input(BufReader::new(file))
}
