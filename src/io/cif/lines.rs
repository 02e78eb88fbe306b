// src/io/cif/lines.rs

//! Physical lines in, logical lines out.
//!
//! A physical line starting with `;` opens a semicolon text field. Everything
//! up to the next line that starts with `;` is folded into one logical line,
//! wrapped in [`TEXT_FIELD_MARK`] so the tokenizer reads it as a single
//! pre-quoted value. Whatever follows the closing `;` is handed out as the
//! next logical line.
//!
//! A lone `\r` ends a physical line just like `\n`. Bytes that are not valid
//! UTF-8 are replaced and noted rather than failing the read.

use std::collections::VecDeque;
use std::io::{self, BufRead};

use super::block::Diagnostic;

/// Delimits a folded text field inside a logical line. Never appears in CIF text.
pub const TEXT_FIELD_MARK: char = '\u{1e}';

pub struct LineAssembler<R> {
    reader: R,
    pending: Option<String>,
    // physical lines split out of one `\n`-terminated read
    queued: VecDeque<String>,
    line_no: usize,
    notes: Vec<Diagnostic>,
}

impl<R: BufRead> LineAssembler<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            queued: VecDeque::new(),
            line_no: 0,
            notes: Vec::new(),
        }
    }

    /// Anomalies recovered since the last call.
    pub fn take_notes(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.notes)
    }

    /// Number of the last physical line read (1-based, 0 before the first read).
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Next logical line, or `None` once the input is exhausted.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(rest) = self.pending.take() {
            return Ok(Some(rest));
        }

        let line = match self.read_physical()? {
            Some(line) => line,
            None => return Ok(None),
        };

        match line.strip_prefix(';') {
            Some(first) => self.fold_text_field(first).map(Some),
            None => Ok(Some(line)),
        }
    }

    fn fold_text_field(&mut self, first: &str) -> io::Result<String> {
        let opened_at = self.line_no;
        let mut text = String::from(first);
        text.push('\n');

        loop {
            match self.read_physical()? {
                Some(line) => {
                    if let Some(rest) = line.strip_prefix(';') {
                        if !rest.trim().is_empty() {
                            self.pending = Some(rest.to_string());
                        }
                        break;
                    }
                    text.push_str(&line);
                    text.push('\n');
                }
                None => {
                    self.notes.push(Diagnostic {
                        line: opened_at,
                        message: "text field is never closed, keeping it up to end of input".to_string(),
                    });
                    break;
                }
            }
        }

        Ok(format!("{TEXT_FIELD_MARK}{text}{TEXT_FIELD_MARK}"))
    }

    fn read_physical(&mut self) -> io::Result<Option<String>> {
        if self.queued.is_empty() {
            let mut buf = Vec::new();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
            let text = match String::from_utf8(buf) {
                Ok(text) => text,
                Err(e) => {
                    self.notes.push(Diagnostic {
                        line: self.line_no + 1,
                        message: "line is not valid UTF-8, undecodable bytes replaced".to_string(),
                    });
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            self.queued.extend(text.split('\r').map(str::to_string));
        }
        self.line_no += 1;
        Ok(self.queued.pop_front())
    }
}
