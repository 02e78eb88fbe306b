//! CIF/STAR reader.
//!
//! Raw text flows through three stages:
//! - [`lines`]: folds `;` text fields into single logical lines;
//! - [`token`]: splits logical lines into tokens with one token of lookahead;
//! - [`block`]: builds named data blocks of scalar fields and loop columns.
//!
//! [`assemble`] then validates the first block and expands it into a
//! [`Crystal`](crate::model::Crystal).
//!
//! ```ignore
//! let set = DataBlockSet::parse(reader)?;
//! let crystal = assemble(&set)?;
//! ```

pub mod assemble;
pub mod block;
pub mod lines;
pub mod token;

pub use assemble::assemble;
pub use block::{DataBlock, DataBlockSet, Diagnostic, FieldValue, Value};
pub use lines::LineAssembler;
pub use token::{Control, Token, TokenKind, Tokenizer};
