// src/io/cif/block.rs

//! Data blocks and the record builder that fills them.
//!
//! The builder is permissive: misplaced tokens, fields without values and
//! truncated loop rows are skipped and recorded as [`Diagnostic`]s. Only I/O
//! failures stop a parse.

use std::fmt;
use std::io::{self, BufRead};

use serde::Serialize;

use super::token::{Control, Token, Tokenizer};

/// A single CIF value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Text(String),
    /// Bare `.`
    Inapplicable,
    /// Bare `?`
    Unknown,
}

impl Value {
    /// String content, `None` for `.` and `?`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parses the value as a number, dropping a trailing standard
    /// uncertainty such as the `(2)` in `4.756(2)`.
    pub fn as_f64(&self) -> Option<f64> {
        self.numeric_text()?.parse().ok()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.numeric_text()?.parse().ok()
    }

    fn numeric_text(&self) -> Option<&str> {
        let s = self.as_str()?.trim();
        Some(match s.find('(') {
            Some(idx) => &s[..idx],
            None => s,
        })
    }

    pub fn is_null(&self) -> bool {
        !matches!(self, Value::Text(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Inapplicable => f.write_str("."),
            Value::Unknown => f.write_str("?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldValue {
    Scalar(Value),
    /// One loop column, in row order.
    Column(Vec<Value>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            FieldValue::Column(_) => None,
        }
    }

    /// Column values; a scalar reads as a one-row column.
    pub fn values(&self) -> &[Value] {
        match self {
            FieldValue::Scalar(v) => std::slice::from_ref(v),
            FieldValue::Column(col) => col,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataBlock {
    name: String,
    fields: Vec<(String, FieldValue)>,
}

impl DataBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The `data_NAME` / `global_` token this block was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field lookup, ASCII case-insensitive.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    }

    pub fn scalar(&self, field: &str) -> Option<&Value> {
        self.get(field)?.as_scalar()
    }

    pub fn column(&self, field: &str) -> Option<&[Value]> {
        self.get(field).map(FieldValue::values)
    }

    /// Fields in input order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stores a field, replacing any earlier field of the same name.
    /// Returns `true` when an earlier value was replaced.
    pub fn insert(&mut self, field: String, value: FieldValue) -> bool {
        match self
            .fields
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&field))
        {
            Some(slot) => {
                slot.1 = value;
                true
            }
            None => {
                self.fields.push((field, value));
                false
            }
        }
    }
}

/// A locally recovered parse anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// All data blocks of one input, in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataBlockSet {
    blocks: Vec<DataBlock>,
    diagnostics: Vec<Diagnostic>,
}

impl DataBlockSet {
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Self> {
        BlockBuilder::new(reader).run()
    }

    pub fn parse_str(input: &str) -> Self {
        // Reading from a byte slice cannot fail.
        Self::parse(input.as_bytes()).unwrap_or_default()
    }

    pub fn blocks(&self) -> &[DataBlock] {
        &self.blocks
    }

    pub fn first(&self) -> Option<&DataBlock> {
        self.blocks.first()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

struct BlockBuilder<R> {
    tokens: Tokenizer<R>,
    set: DataBlockSet,
}

impl<R: BufRead> BlockBuilder<R> {
    fn new(reader: R) -> Self {
        Self {
            tokens: Tokenizer::new(reader),
            set: DataBlockSet::default(),
        }
    }

    fn run(mut self) -> io::Result<DataBlockSet> {
        while let Some(token) = self.tokens.next_token()? {
            self.absorb_notes();
            match token.control() {
                Some(Control::Data) | Some(Control::Global) => {
                    self.set.blocks.push(DataBlock::new(token.text));
                }
                Some(Control::Loop) => self.read_loop(&token)?,
                Some(Control::Stop) => self.note(token.line, "stop_ outside of a loop, ignored"),
                None if token.is_field_name() => self.read_field(token)?,
                None => self.note(
                    token.line,
                    format!("unexpected value '{}' where a field name was expected", token.text),
                ),
            }
        }
        self.absorb_notes();
        Ok(self.set)
    }

    fn absorb_notes(&mut self) {
        for diagnostic in self.tokens.take_notes() {
            self.note(diagnostic.line, diagnostic.message);
        }
    }

    fn read_field(&mut self, name: Token) -> io::Result<()> {
        match self.tokens.peek()? {
            Some(next) if next.is_value() => {
                self.tokens.commit();
                self.store(name.line, name.text, FieldValue::Scalar(next.into_value()));
            }
            Some(next) => self.note(
                next.line,
                format!("field {} has no value before '{}'", name.text, next.text),
            ),
            None => self.note(
                self.tokens.line_number(),
                format!("input ended before the value of field {}", name.text),
            ),
        }
        Ok(())
    }

    fn read_loop(&mut self, start: &Token) -> io::Result<()> {
        let mut names = Vec::new();
        while let Some(next) = self.tokens.peek()? {
            if !next.is_field_name() {
                break;
            }
            self.tokens.commit();
            names.push(next.text);
        }

        if names.is_empty() {
            self.note(start.line, "loop_ declares no columns");
            return Ok(());
        }

        let width = names.len();
        let mut columns: Vec<Vec<Value>> = vec![Vec::new(); width];
        let mut row = Vec::with_capacity(width);

        loop {
            let next = match self.tokens.peek()? {
                Some(next) if next.is_value() => next,
                Some(next) => {
                    if next.control() == Some(Control::Stop) {
                        self.tokens.commit();
                    }
                    break;
                }
                None => break,
            };
            self.tokens.commit();
            row.push(next.into_value());

            if row.len() == width {
                for (column, value) in columns.iter_mut().zip(row.drain(..)) {
                    column.push(value);
                }
            }
        }

        if !row.is_empty() {
            self.note(
                self.tokens.line_number(),
                format!(
                    "loop starting with {} ends with a partial row of {} of {} values, discarded",
                    names[0],
                    row.len(),
                    width
                ),
            );
        }

        for (name, column) in names.into_iter().zip(columns) {
            self.store(start.line, name, FieldValue::Column(column));
        }
        Ok(())
    }

    fn store(&mut self, line: usize, field: String, value: FieldValue) {
        let Some(block) = self.set.blocks.last_mut() else {
            self.note(line, format!("field {field} appears before any data block, ignored"));
            return;
        };
        let replaced_note = format!("field {field} is defined twice, keeping the last value");
        if block.insert(field, value) {
            self.note(line, replaced_note);
        }
    }

    fn note(&mut self, line: usize, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line,
            message: message.into(),
        };
        log::warn!("{}", diagnostic);
        self.set.diagnostics.push(diagnostic);
    }
}
