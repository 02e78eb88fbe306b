// src/model/symmetry.rs

//! Symmetry-equivalent position operators such as `-x+1/2, y, z+1/2`.
//!
//! Each coordinate expression is evaluated by substituting the atom's
//! fractional coordinates for `x`, `y` and `z` and then evaluating the
//! resulting arithmetic text with the usual precedence rules.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot evaluate symmetry expression '{expression}': {message}")]
pub struct ExpressionError {
    pub expression: String,
    pub message: String,
}

/// Evaluates one coordinate expression for the given fractional position.
pub fn evaluate(expression: &str, x: f64, y: f64, z: f64) -> Result<f64, ExpressionError> {
    let mut text = String::with_capacity(expression.len() + 16);
    for c in expression.chars() {
        match c.to_ascii_lowercase() {
            'x' => text.push_str(&format!("({})", x)),
            'y' => text.push_str(&format!("({})", y)),
            'z' => text.push_str(&format!("({})", z)),
            other => text.push(other),
        }
    }

    Arithmetic::new(&text)
        .parse()
        .map_err(|message| ExpressionError {
            expression: expression.to_string(),
            message,
        })
}

/// Recursive-descent evaluator over `+ - * /`, parentheses and decimal numbers.
struct Arithmetic<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Arithmetic<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<f64, String> {
        let value = self.sum()?;
        self.skip_blanks();
        match self.bytes.get(self.pos) {
            None => Ok(value),
            Some(&b) => Err(format!("unexpected '{}' at offset {}", b as char, self.pos)),
        }
    }

    fn skip_blanks(&mut self) {
        while self.bytes.get(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_blanks();
        self.bytes.get(self.pos).copied()
    }

    fn sum(&mut self) -> Result<f64, String> {
        let mut value = self.product()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value += self.product()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value -= self.product()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn product(&mut self) -> Result<f64, String> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                // `2x` arrives here as `2(0.25)`
                Some(b'(') => value *= self.unary()?,
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(b'+') => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let value = self.sum()?;
                if self.peek() != Some(b')') {
                    return Err(format!("missing ')' at offset {}", self.pos));
                }
                self.pos += 1;
                Ok(value)
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            Some(b) => Err(format!("unexpected '{}' at offset {}", b as char, self.pos)),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit() || *b == b'.')
        {
            self.pos += 1;
        }
        let digits = std::str::from_utf8(&self.bytes[start..self.pos]).map_err(|e| e.to_string())?;
        digits
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{}'", digits))
    }
}

/// A symmetry-equivalent position operator: one expression per axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymmetryOperation {
    exprs: [String; 3],
}

impl SymmetryOperation {
    pub fn identity() -> Self {
        Self {
            exprs: ["x".to_string(), "y".to_string(), "z".to_string()],
        }
    }

    /// Splits an `xyz` entry on commas. Returns the part count on failure.
    pub fn parse(entry: &str) -> Result<Self, usize> {
        let parts: Vec<&str> = entry.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [x, y, z] => Ok(Self {
                exprs: [x.to_string(), y.to_string(), z.to_string()],
            }),
            _ => Err(parts.len()),
        }
    }

    pub fn expressions(&self) -> &[String; 3] {
        &self.exprs
    }

    /// Evaluates all three expressions once at the origin. Whether an
    /// expression is well formed does not depend on the position.
    pub fn validate(&self) -> Result<(), ExpressionError> {
        self.apply([0.0; 3]).map(|_| ())
    }

    /// Maps a fractional position through this operator. The result is not wrapped.
    pub fn apply(&self, p: [f64; 3]) -> Result<[f64; 3], ExpressionError> {
        Ok([
            evaluate(&self.exprs[0], p[0], p[1], p[2])?,
            evaluate(&self.exprs[1], p[0], p[1], p[2])?,
            evaluate(&self.exprs[2], p[0], p[1], p[2])?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn evaluates_typical_operators() {
        assert!(close(evaluate("x", 0.25, 0.0, 0.0).unwrap(), 0.25));
        assert!(close(evaluate("-x+1/2", 0.25, 0.0, 0.0).unwrap(), 0.25));
        assert!(close(evaluate("1/2+y", 0.0, 0.1, 0.0).unwrap(), 0.6));
        assert!(close(evaluate("x-y", 0.5, 0.125, 0.0).unwrap(), 0.375));
        assert!(close(evaluate(" -Z + 3/4 ", 0.0, 0.0, 0.5).unwrap(), 0.25));
    }

    #[test]
    fn negative_substitutions() {
        assert!(close(evaluate("-x", -0.25, 0.0, 0.0).unwrap(), 0.25));
        assert!(close(evaluate("x-y", -0.5, -0.5, 0.0).unwrap(), 0.0));
    }

    #[test]
    fn precedence_and_parentheses() {
        assert!(close(evaluate("1+2*3", 0.0, 0.0, 0.0).unwrap(), 7.0));
        assert!(close(evaluate("(1+2)*3", 0.0, 0.0, 0.0).unwrap(), 9.0));
        assert!(close(evaluate("1-1/4-1/4", 0.0, 0.0, 0.0).unwrap(), 0.5));
        assert!(close(evaluate("2x", 0.2, 0.0, 0.0).unwrap(), 0.4));
    }

    #[test]
    fn malformed_expressions_fail() {
        for bad in ["", "x+", "x*/2", "(x", "x)", "q", "1..2"] {
            let err = evaluate(bad, 0.1, 0.2, 0.3).unwrap_err();
            assert_eq!(err.expression, bad);
        }
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        assert!(evaluate("1/0", 0.0, 0.0, 0.0).unwrap().is_infinite());
    }

    #[test]
    fn parse_and_apply() {
        let op = SymmetryOperation::parse("-x, y+1/2, -z+1/2").unwrap();
        let p = op.apply([0.1, 0.2, 0.3]).unwrap();
        assert!(close(p[0], -0.1));
        assert!(close(p[1], 0.7));
        assert!(close(p[2], 0.2));
        assert_eq!(op.expressions()[1], "y+1/2");
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert_eq!(SymmetryOperation::parse("x,y"), Err(2));
        assert_eq!(SymmetryOperation::parse("x,y,z,1"), Err(4));
    }

    #[test]
    fn validate_without_a_position() {
        assert!(SymmetryOperation::parse("-y+1/2, x-y, z+1/6").unwrap().validate().is_ok());
        assert!(SymmetryOperation::parse("1/x, y, z").unwrap().validate().is_ok());
        let err = SymmetryOperation::parse("x, y, w").unwrap().validate().unwrap_err();
        assert_eq!(err.expression, "w");
    }

    #[test]
    fn identity_keeps_position() {
        let p = SymmetryOperation::identity().apply([0.3, 0.6, 0.9]).unwrap();
        assert_eq!(p, [0.3, 0.6, 0.9]);
    }
}
