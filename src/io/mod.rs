//! Reading and writing forest text files.
//!
//! - [ForestReader] / [read_forest_file] - parse forest files into a [Forest]
//! - [ForestWriter] / [write_forest_file] - write a [Forest] back out
//! - [derive_output_path] - name output files after their input
//!
//! See [ForestReader] for the file format.

pub mod byte_parser;
mod defs;
pub mod parsing_error;
mod paths;
mod reader;
mod writer;

pub use defs::ForestKind;
pub use parsing_error::{ParsingError, ParsingErrorType};
pub use paths::derive_output_path;
pub use reader::ForestReader;
pub use writer::ForestWriter;

use crate::error::TreeError;
use crate::model::Forest;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Reads a forest file.
///
/// # Errors
/// [TreeError::Io] if the file cannot be read, [TreeError::Parsing] if its
/// contents are malformed.
pub fn read_forest_file<P: AsRef<Path>>(path: P) -> Result<Forest, TreeError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading forest");
    let forest = ForestReader::from_file(path)?.read_forest()?;
    info!(path = %path.display(), num_trees = forest.num_trees(), "loaded forest");

    Ok(forest)
}

/// Reads a forest from an in-memory string.
pub fn read_forest_str(input: &str) -> Result<Forest, ParsingError> {
    ForestReader::from_str(input).read_forest()
}

/// Writes a forest to the given sink.
pub fn write_forest<W: Write>(out: W, forest: &Forest) -> std::io::Result<()> {
    ForestWriter::new(out).write_forest(forest)
}

/// Writes a forest file, replacing any existing file.
///
/// # Errors
/// [TreeError::Io] if the file cannot be created or written.
pub fn write_forest_file<P: AsRef<Path>>(path: P, forest: &Forest) -> Result<(), TreeError> {
    let path = path.as_ref();
    write_forest(File::create(path)?, forest)?;
    info!(path = %path.display(), num_trees = forest.num_trees(), "saved forest");

    Ok(())
}
