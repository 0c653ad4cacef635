use std::fs;
use std::path::Path;

use crate::error::{ChatError, Result};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Lines are returned untouched; blank ones are filtered by `corpus::build_corpus`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let contents = fs::read_to_string(path).map_err(|e| ChatError::io(e, path))?;
	Ok(contents.lines().map(str::to_owned).collect())
}
