// src/error.rs

use std::io;

use crate::model::symmetry::ExpressionError;

/// Everything that can abort a crystal load.
///
/// Tokenizer and record-builder anomalies never show up here; those are
/// recovered locally and reported as diagnostics on the parsed block set.
#[derive(Debug, thiserror::Error)]
pub enum CifError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("input contains no data block")]
    NoDataBlock,

    #[error("block {block}: missing required field {field}")]
    MissingField { block: String, field: String },

    #[error("block {block}: column {field} has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        block: String,
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("block {block}: malformed symmetry operation '{entry}' ({parts} comma-separated parts, expected 3)")]
    MalformedSymmetryExpression {
        block: String,
        entry: String,
        parts: usize,
    },

    #[error("block {block}: field {field}: {source}")]
    Expression {
        block: String,
        field: String,
        #[source]
        source: ExpressionError,
    },

    #[error("block {block}: unknown element in atom label '{label}'")]
    UnknownElement { block: String, label: String },

    #[error("block {block}: unknown space group index {index}")]
    UnknownSpaceGroup { block: String, index: i64 },

    #[error("block {block}: field {field} has invalid value '{value}'")]
    InvalidValue {
        block: String,
        field: String,
        value: String,
    },

    #[error("block {block}: invalid unit cell: {reason}")]
    InvalidUnitCell { block: String, reason: String },

    #[error("no built-in crystal named '{0}'")]
    UnknownCrystal(String),
}
