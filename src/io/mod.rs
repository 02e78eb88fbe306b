// src/io/mod.rs
pub mod cif;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::CifError;
use crate::model::Crystal;
use cif::DataBlockSet;

/// Loads a crystal from a CIF file on disk.
///
/// The file handle lives only for the duration of this call.
pub fn load_crystal(path: impl AsRef<Path>) -> Result<Crystal, CifError> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let file = File::open(path)?;
    read_crystal(BufReader::new(file))
}

/// Parses CIF text from any buffered reader and assembles its first block.
pub fn read_crystal<R: BufRead>(reader: R) -> Result<Crystal, CifError> {
    let set = DataBlockSet::parse(reader)?;
    cif::assemble(&set)
}
