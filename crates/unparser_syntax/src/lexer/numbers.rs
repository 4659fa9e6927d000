//! Numeric literal scanning.

use super::Lexer;
use super::tokens::TokenKind;
use unparser_core::strings::is_ident_continue;

impl<'a> Lexer<'a> {
    /// Scan an integer or float literal whose first character (a digit or `-`) has been consumed.
    ///
    /// ## Notes
    /// - Integers support `0x`, `0b`, `0o`/leading `0` and `0d` prefixes and `_` separators, and must fit `i64`.
    /// - Floats need a digit after `.`, so `1.abs` lexes as an integer followed by a method call.
    pub(super) fn scan_number(&mut self, start: usize) {
        let negative = self.source[start..].starts_with('-');
        self.pos = if negative { start + 1 } else { start };

        let (radix, prefixed) = match (self.peek(), self.peek_nth(1)) {
            (Some('0'), Some('x' | 'X')) => (16, true),
            (Some('0'), Some('b' | 'B')) => (2, true),
            (Some('0'), Some('o' | 'O')) => (8, true),
            (Some('0'), Some('d' | 'D')) => (10, true),
            (Some('0'), Some(c)) if c.is_ascii_digit() || c == '_' => (8, false),
            _ => (10, false),
        };
        if prefixed {
            self.pos += 2;
        }

        let digits_start = self.pos;
        self.skip_digits(radix);

        let mut is_float = false;
        if radix == 10 && !prefixed {
            if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.advance();
                self.skip_digits(10);
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let signed = matches!(self.peek_nth(1), Some('+' | '-'));
                let digit_at = if signed { 2 } else { 1 };
                if self.peek_nth(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                    is_float = true;
                    self.pos += digit_at;
                    self.skip_digits(10);
                }
            }
        }

        if self.peek().is_some_and(is_ident_continue) {
            self.scan_ident_chars();
            self.error("unsupported numeric literal", start);
            return;
        }

        let digits: String = self.source[digits_start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        if digits.is_empty() {
            self.error("numeric literal without digits", start);
            return;
        }

        if is_float {
            let text = if negative { format!("-{digits}") } else { digits };
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => self.add_token(TokenKind::Float(value), start),
                _ => self.error("float literal out of range", start),
            }
        } else {
            let value = i128::from_str_radix(&digits, radix)
                .ok()
                .map(|v| if negative { -v } else { v })
                .and_then(|v| i64::try_from(v).ok());
            match value {
                Some(value) => self.add_token(TokenKind::Int(value), start),
                None => self.error("integer literal out of range", start),
            }
        }
    }

    fn skip_digits(&mut self, radix: u32) {
        while self.peek().is_some_and(|c| c.is_digit(radix) || c == '_') {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn single(source: &str) -> TokenKind {
        let mut tokens = lex(source).unwrap();
        assert_eq!(tokens.len(), 2, "expected one token for {source:?}");
        tokens.remove(0).kind
    }

    #[test]
    fn test_integers() {
        assert_eq!(single("42"), TokenKind::Int(42));
        assert_eq!(single("1_000"), TokenKind::Int(1000));
        assert_eq!(single("0x1F"), TokenKind::Int(31));
        assert_eq!(single("0b101"), TokenKind::Int(5));
        assert_eq!(single("017"), TokenKind::Int(15));
        assert_eq!(single("0o17"), TokenKind::Int(15));
        assert_eq!(single("-7"), TokenKind::Int(-7));
        assert_eq!(single("-9223372036854775808"), TokenKind::Int(i64::MIN));
    }

    #[test]
    fn test_floats() {
        assert_eq!(single("1.5"), TokenKind::Float(1.5));
        assert_eq!(single("1e20"), TokenKind::Float(1e20));
        assert_eq!(single("-2.5E-3"), TokenKind::Float(-2.5e-3));
        assert_eq!(single("0.1"), TokenKind::Float(0.1));
    }

    #[test]
    fn test_integer_then_method_call() {
        let kinds: Vec<_> = lex("1.abs").unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::Int(1));
        assert_eq!(kinds[2], TokenKind::MethodName("abs".to_string()));
    }

    #[test]
    fn test_out_of_range() {
        let errors = lex("9223372036854775808").unwrap_err();
        assert!(errors[0].message.contains("out of range"));
        assert!(lex("1e400").is_err());
        assert!(lex("12abc").is_err());
    }
}
