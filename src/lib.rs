//! Reads crystal structures from CIF (Crystallographic Information File) text.
//!
//! The [`io::cif`] stages turn raw text into data blocks, and the assembler
//! expands the first block's atoms through its symmetry operators into a
//! [`Crystal`] of unique sites.

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod utils;

pub use error::CifError;
pub use io::{load_crystal, read_crystal};
pub use model::Crystal;
