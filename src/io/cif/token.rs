// src/io/cif/token.rs

//! Lexer over logical lines.
//!
//! The tokenizer holds a [`Cursor`] into the current logical line and at most
//! one scanned-but-uncommitted token. [`Tokenizer::peek`] scans without moving
//! the cursor; [`Tokenizer::commit`] moves it past the peeked token. Peeking
//! twice without a commit yields the same token.

use std::io::{self, BufRead};

use super::block::{Diagnostic, Value};
use super::lines::{LineAssembler, TEXT_FIELD_MARK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unquoted run of non-blank characters.
    Word,
    /// Single- or double-quoted value.
    QuotedText,
    /// Semicolon-delimited text field.
    MultilineText,
    /// Bare `.` or `?`.
    Null,
    /// Unquoted reserved word: `data_`, `global_`, `loop_`, `stop_`.
    ControlWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Data,
    Global,
    Loop,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Physical line the token was read from.
    pub line: usize,
}

impl Token {
    pub fn control(&self) -> Option<Control> {
        if self.kind != TokenKind::ControlWord {
            return None;
        }
        let lower = self.text.to_ascii_lowercase();
        if lower.starts_with("data_") {
            Some(Control::Data)
        } else if lower.starts_with("global_") {
            Some(Control::Global)
        } else if lower.starts_with("loop_") {
            Some(Control::Loop)
        } else {
            Some(Control::Stop)
        }
    }

    /// An unquoted word starting with `_`.
    pub fn is_field_name(&self) -> bool {
        self.kind == TokenKind::Word && self.text.starts_with('_')
    }

    /// Anything that may stand in a value position.
    pub fn is_value(&self) -> bool {
        self.kind != TokenKind::ControlWord && !self.is_field_name()
    }

    pub fn into_value(self) -> Value {
        match (self.kind, self.text.as_str()) {
            (TokenKind::Null, ".") => Value::Inapplicable,
            (TokenKind::Null, _) => Value::Unknown,
            _ => Value::Text(self.text),
        }
    }
}

const CONTROL_PREFIXES: [&str; 4] = ["data_", "global_", "loop_", "stop_"];

/// A scanned token, the byte offset just past it, and any anomaly met on the way.
type Scanned = (Token, usize, Option<String>);

/// Position inside one logical line.
#[derive(Debug, Clone, Default)]
struct Cursor {
    line: String,
    pos: usize,
    line_no: usize,
}

impl Cursor {
    fn new(line: String, line_no: usize) -> Self {
        Self {
            line,
            pos: 0,
            line_no,
        }
    }

    /// Scans the token under the cursor, or `None` when the rest of the line
    /// is blank or a comment. Separators are exactly the chars that end a word,
    /// so every token found is non-empty.
    fn scan(&self) -> Option<Scanned> {
        let rest = &self.line[self.pos..];
        let start = self.pos + (rest.len() - rest.trim_start_matches(char::is_whitespace).len());
        let rest = &self.line[start..];

        let first = rest.chars().next()?;
        if first == '#' {
            return None;
        }

        if first == '\'' || first == '"' || first == TEXT_FIELD_MARK {
            return Some(self.scan_quoted(start, first));
        }

        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let text = &rest[..len];
        let lower = text.to_ascii_lowercase();
        let kind = if text == "." || text == "?" {
            TokenKind::Null
        } else if CONTROL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            TokenKind::ControlWord
        } else {
            TokenKind::Word
        };

        Some((self.token(kind, text), start + len, None))
    }

    // A quote only closes when followed by whitespace or end of line, so
    // primes inside atom labels (O1', C2'') are kept as data.
    fn scan_quoted(&self, start: usize, quote: char) -> Scanned {
        let body_start = start + quote.len_utf8();
        let body = &self.line[body_start..];
        let kind = if quote == TEXT_FIELD_MARK {
            TokenKind::MultilineText
        } else {
            TokenKind::QuotedText
        };

        let mut chars = body.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != quote {
                continue;
            }
            let closes = match chars.peek() {
                None => true,
                Some(&(_, next)) => next.is_whitespace(),
            };
            if closes {
                let end = body_start + i + quote.len_utf8();
                return (self.token(kind, &body[..i]), end, None);
            }
        }

        (
            self.token(kind, body),
            self.line.len(),
            Some("unterminated quoted value, taking the rest of the line".to_string()),
        )
    }

    fn token(&self, kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            text: text.to_string(),
            line: self.line_no,
        }
    }
}

pub struct Tokenizer<R> {
    lines: LineAssembler<R>,
    cursor: Cursor,
    peeked: Option<(Token, usize)>,
    notes: Vec<Diagnostic>,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineAssembler::new(reader),
            cursor: Cursor::default(),
            peeked: None,
            notes: Vec::new(),
        }
    }

    /// Anomalies recovered since the last call, from this stage and the line stage.
    pub fn take_notes(&mut self) -> Vec<Diagnostic> {
        let mut notes = self.lines.take_notes();
        notes.append(&mut self.notes);
        notes.sort_by_key(|n| n.line);
        notes
    }

    /// Line number of the most recently read physical line.
    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Looks at the next token without consuming it. `None` means end of input.
    pub fn peek(&mut self) -> io::Result<Option<Token>> {
        loop {
            if let Some((token, _)) = &self.peeked {
                return Ok(Some(token.clone()));
            }
            if let Some((token, end, note)) = self.cursor.scan() {
                if let Some(message) = note {
                    self.notes.push(Diagnostic {
                        line: token.line,
                        message,
                    });
                }
                self.peeked = Some((token, end));
                continue;
            }
            match self.lines.next_line()? {
                Some(line) => self.cursor = Cursor::new(line, self.lines.line_number()),
                None => return Ok(None),
            }
        }
    }

    /// Consumes the token returned by the last [`peek`](Self::peek).
    pub fn commit(&mut self) {
        if let Some((_, end)) = self.peeked.take() {
            self.cursor.pos = end;
        }
    }

    pub fn next_token(&mut self) -> io::Result<Option<Token>> {
        let token = self.peek()?;
        self.commit();
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new(input.as_bytes());
        let mut out = Vec::new();
        while let Some(t) = tokenizer.next_token().unwrap() {
            out.push(t);
        }
        out
    }

    fn kinds_and_text(input: &str) -> Vec<(TokenKind, String)> {
        tokens(input).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn words_and_control_words() {
        let toks = kinds_and_text("data_quartz\nloop_ _a  b\tstop_\n");
        assert_eq!(
            toks,
            vec![
                (TokenKind::ControlWord, "data_quartz".to_string()),
                (TokenKind::ControlWord, "loop_".to_string()),
                (TokenKind::Word, "_a".to_string()),
                (TokenKind::Word, "b".to_string()),
                (TokenKind::ControlWord, "stop_".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_reserved_word_is_data() {
        let toks = tokens("\"loop_\" 'data_x'");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].kind, TokenKind::QuotedText);
        assert_eq!(toks[0].text, "loop_");
        assert_eq!(toks[0].control(), None);
        assert_eq!(toks[1].text, "data_x");
        assert!(toks[1].is_value());
    }

    #[test]
    fn embedded_quotes_do_not_close() {
        let toks = tokens("'it''s' next");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].kind, TokenKind::QuotedText);
        assert_eq!(toks[0].text, "it''s");
        assert_eq!(toks[1].text, "next");

        let toks = tokens("'O1' C2'");
        assert_eq!(toks[0].text, "O1");
        assert_eq!(toks[1].kind, TokenKind::Word);
        assert_eq!(toks[1].text, "C2'");
    }

    #[test]
    fn unterminated_quote_takes_rest_of_line() {
        let toks = kinds_and_text("'no end here\nafter");
        assert_eq!(
            toks,
            vec![
                (TokenKind::QuotedText, "no end here".to_string()),
                (TokenKind::Word, "after".to_string()),
            ]
        );
    }

    #[test]
    fn null_token_differs_from_quoted_dot() {
        let toks = tokens(". ? '.' \"?\" .5");
        assert_eq!(toks[0].kind, TokenKind::Null);
        assert_eq!(toks[1].kind, TokenKind::Null);
        assert_eq!(toks[2].kind, TokenKind::QuotedText);
        assert_eq!(toks[3].kind, TokenKind::QuotedText);
        assert_eq!(toks[4].kind, TokenKind::Word);

        let values: Vec<Value> = toks.into_iter().map(Token::into_value).collect();
        assert_eq!(values[0], Value::Inapplicable);
        assert_eq!(values[1], Value::Unknown);
        assert_eq!(values[2], Value::Text(".".into()));
        assert_eq!(values[3], Value::Text("?".into()));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let toks = kinds_and_text("# header\n\n   \n_a 1 # trailing\n#_b 2\n_c");
        let texts: Vec<_> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["_a", "1", "_c"]);
    }

    #[test]
    fn text_field_is_one_token() {
        let toks = tokens("_note\n;Mg2SiO4 'olivine'\n  # not a comment\n;\n_x 1\n");
        assert_eq!(toks.len(), 4);
        assert_eq!(toks[1].kind, TokenKind::MultilineText);
        assert_eq!(toks[1].text, "Mg2SiO4 'olivine'\n  # not a comment\n");
        assert_eq!(toks[2].text, "_x");
    }

    #[test]
    fn peek_is_stable_until_commit() {
        let mut tokenizer = Tokenizer::new("_a 1".as_bytes());
        let first = tokenizer.peek().unwrap().unwrap();
        let again = tokenizer.peek().unwrap().unwrap();
        assert_eq!(first, again);
        tokenizer.commit();
        assert_eq!(tokenizer.peek().unwrap().unwrap().text, "1");
        tokenizer.commit();
        assert!(tokenizer.peek().unwrap().is_none());
    }

    #[test]
    fn tokens_remember_their_line() {
        let toks = tokens("data_a\n\n_b\n  c");
        let lines: Vec<_> = toks.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn any_whitespace_separates_tokens() {
        let texts = |input: &str| -> Vec<String> { tokens(input).into_iter().map(|t| t.text).collect() };
        assert_eq!(texts("_a\x0c1\n"), vec!["_a", "1"]);
        assert_eq!(texts("_a\u{a0}\u{a0}1 \x0b_b 2"), vec!["_a", "1", "_b", "2"]);
        assert_eq!(texts("data_x\r_a 1\r"), vec!["data_x", "_a", "1"]);
        assert_eq!(texts(" \x0c \n\x0c"), Vec::<String>::new());
    }

    #[test]
    fn unterminated_quote_is_noted() {
        let mut tokenizer = Tokenizer::new("_a 1\n_b 'open\n".as_bytes());
        while tokenizer.next_token().unwrap().is_some() {}
        let notes = tokenizer.take_notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].line, 2);
        assert!(tokenizer.take_notes().is_empty());
    }

    #[test]
    fn reserved_words_are_case_insensitive() {
        let toks = tokens("LOOP_ Data_X");
        assert_eq!(toks[0].control(), Some(Control::Loop));
        assert_eq!(toks[1].control(), Some(Control::Data));
    }
}
