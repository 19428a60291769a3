//! Raw byte file I/O.
//!
//! Input and output files are raw byte sequences: one byte per element, no
//! header, no framing. The element count is simply the file size.

use std::fs;
use std::path::Path;

use crate::errors::{PipesortError, Result};

/// Read a whole input file as elements.
///
/// A zero-length file is rejected: there is nothing to sort and the topology
/// arithmetic requires at least one element.
pub fn read_elements<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let elements = fs::read(path)?;
    if elements.is_empty() {
        return Err(PipesortError::EmptyInput { path: path.display().to_string() });
    }
    Ok(elements)
}

/// Write elements as a raw byte file.
pub fn write_elements<P: AsRef<Path>>(path: P, elements: &[u8]) -> Result<()> {
    fs::write(path, elements)?;
    Ok(())
}

/// Render elements as space-separated decimals, one line.
#[must_use]
pub fn format_elements(elements: &[u8]) -> String {
    let mut rendered = String::with_capacity(elements.len() * 4);
    for (i, value) in elements.iter().enumerate() {
        if i > 0 {
            rendered.push(' ');
        }
        rendered.push_str(&value.to_string());
    }
    rendered
}
