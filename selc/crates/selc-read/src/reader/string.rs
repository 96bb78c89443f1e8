//! String, character and regex literals.

use regex::Regex;
use selc_val::Value;

use crate::error::{ReadError, ReadResult};
use crate::reader::{is_macro_terminating, is_whitespace, ReadOutcome, Reader};

impl Reader<'_> {
    /// `"..."` with escape processing. The opening quote is already
    /// consumed.
    pub(crate) fn read_string_literal(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let mut buf = String::new();
        loop {
            match self.src.read_char() {
                None => return Err(ReadError::Eof),
                Some('"') => return Ok(ReadOutcome::Produced(Value::string(buf))),
                Some('\\') => buf.push(self.read_escape()?),
                Some(ch) => buf.push(ch),
            }
        }
    }

    /// One escape sequence, backslash already consumed.
    fn read_escape(&mut self) -> ReadResult<char> {
        match self.src.read_char() {
            None => Err(ReadError::Eof),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('n') => Ok('\n'),
            Some('\\') => Ok('\\'),
            Some('"') => Ok('"'),
            Some('b') => Ok('\u{8}'),
            Some('f') => Ok('\u{c}'),
            Some('x') => {
                let digits = self.read_escape_digits(2)?;
                unicode_char('x', &digits, 2)
            }
            Some('u') => {
                let digits = self.read_escape_digits(4)?;
                unicode_char('u', &digits, 4)
            }
            // Legacy form: a decimal digit denotes its own numeric value
            // as a code point.
            Some(d) if d.is_ascii_digit() => Ok(char::from(d as u8 - b'0')),
            Some(ch) => Err(ReadError::InvalidEscape(ch)),
        }
    }

    fn read_escape_digits(&mut self, count: usize) -> ReadResult<String> {
        let mut digits = String::new();
        for _ in 0..count {
            match self.src.read_char() {
                None => return Err(ReadError::Eof),
                Some(ch) => digits.push(ch),
            }
        }
        Ok(digits)
    }

    /// `\c`, `\newline`, `\uHHHH`, ... The backslash is already consumed.
    pub(crate) fn read_char_literal(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let first = self.src.read_char().ok_or(ReadError::EofCharacter)?;
        let token = if is_whitespace(first) || is_macro_terminating(first) {
            first.to_string()
        } else {
            self.read_token(first)
        };
        char_from_token(&token).map(|c| ReadOutcome::Produced(Value::Char(c)))
    }

    /// `#"..."`: the body is collected verbatim; a backslash passes both
    /// itself and the following character through, so an escaped quote
    /// does not terminate the literal.
    pub(crate) fn read_regex_literal(&mut self) -> ReadResult<ReadOutcome> {
        let mut pattern = String::new();
        loop {
            match self.src.read_char() {
                None => return Err(ReadError::EofRegex),
                Some('"') => break,
                Some('\\') => {
                    pattern.push('\\');
                    let next = self.src.read_char().ok_or(ReadError::EofRegex)?;
                    pattern.push(next);
                }
                Some(ch) => pattern.push(ch),
            }
        }
        let compiled =
            Regex::new(&pattern).map_err(|e| ReadError::InvalidRegex(e.to_string()))?;
        Ok(ReadOutcome::Produced(Value::regex(compiled)))
    }
}

fn char_from_token(token: &str) -> ReadResult<char> {
    match token {
        "newline" => return Ok('\n'),
        "space" => return Ok(' '),
        "tab" => return Ok('\t'),
        "backspace" => return Ok('\u{8}'),
        "formfeed" => return Ok('\u{c}'),
        "return" => return Ok('\r'),
        _ => {}
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (Some('u'), Some(_)) if token.len() == 5 => unicode_char('u', &token[1..], 4),
        (Some('x'), Some(_)) if token.len() == 3 => unicode_char('x', &token[1..], 2),
        _ => Err(ReadError::UnknownCharLiteral(token.to_string())),
    }
}

/// Decodes `digits` as a hex code point for a `\x`/`\u` escape.
fn unicode_char(kind: char, digits: &str, expected: usize) -> ReadResult<char> {
    let invalid = || ReadError::InvalidUnicodeEscape {
        kind,
        digits: digits.to_string(),
    };
    if digits.chars().count() != expected || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let code = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    char::from_u32(code).ok_or_else(invalid)
}
