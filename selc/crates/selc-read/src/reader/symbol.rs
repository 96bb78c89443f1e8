//! Symbol and keyword tokens.
//!
//! A scanned token becomes `nil`, `true`, `false`, or a symbol split on
//! its first `/`. Keywords consume their leading `:` as a macro character
//! and additionally support `::name` auto-namespacing against the
//! resolver's current namespace.

use selc_val::{Keyword, Symbol, Value};

use crate::error::{ReadError, ReadResult};
use crate::reader::number::parse_number;
use crate::reader::{is_macro_terminating, is_whitespace, ReadOutcome, Reader};

impl Reader<'_> {
    /// Scans the token starting at `initial` and applies the symbol
    /// policy.
    pub(crate) fn read_symbol_value(&mut self, initial: char) -> ReadResult<Value> {
        let token = self.read_token(initial);
        // A sign followed by a signed digit sequence is a botched number,
        // not a symbol: "+-1" must report an invalid number.
        if malformed_signed_number(&token) {
            return parse_number(&token);
        }
        symbol_from_token(&token)
    }

    /// `:token` or `::token`; the leading `:` is already consumed.
    pub(crate) fn read_keyword(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let token = match self.src.read_char() {
            Some(c) if !is_whitespace(c) && !is_macro_terminating(c) => self.read_token(c),
            _ => return Err(ReadError::InvalidToken(":".to_string())),
        };
        let invalid = || ReadError::InvalidToken(format!(":{}", token));

        let (auto, rest) = match token.strip_prefix(':') {
            Some(rest) => (true, rest),
            None => (false, token.as_str()),
        };
        if rest.is_empty() || rest.contains("::") || rest.starts_with(':') {
            return Err(invalid());
        }

        let keyword = match rest.split_once('/') {
            None => {
                if rest.ends_with(':') {
                    return Err(invalid());
                }
                if auto {
                    Keyword::qualified(self.resolver.current_ns(), rest)
                } else {
                    Keyword::intern(rest)
                }
            }
            Some((ns, name)) => {
                // A single current namespace is available; aliases are
                // not, so `::ns/name` cannot be resolved.
                if auto || ns.is_empty() || ns.ends_with(':') {
                    return Err(invalid());
                }
                if name.is_empty() || name.ends_with(':') || name.ends_with('/') {
                    return Err(invalid());
                }
                Keyword::qualified(ns, name)
            }
        };
        Ok(ReadOutcome::Produced(Value::Keyword(keyword)))
    }
}

/// True for tokens like `+-1`: a sign, another sign, then a digit.
fn malformed_signed_number(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some('+' | '-'))
        && matches!(chars.next(), Some('+' | '-'))
        && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Applies the token-to-value policy for symbols.
pub(crate) fn symbol_from_token(token: &str) -> ReadResult<Value> {
    match token {
        "nil" => return Ok(Value::Nil),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        // The division symbol.
        "/" => return Ok(Value::symbol("/")),
        _ => {}
    }
    match token.split_once('/') {
        Some((ns, name)) => {
            if ns.is_empty() || ns.ends_with(':') || name.is_empty() {
                return Err(ReadError::InvalidToken(token.to_string()));
            }
            if name.ends_with('/') || name.ends_with(':') {
                return Err(ReadError::InvalidToken(token.to_string()));
            }
            Ok(Value::Sym(Symbol::qualified(ns, name)))
        }
        None => {
            if token.ends_with(':') {
                return Err(ReadError::InvalidToken(token.to_string()));
            }
            Ok(Value::Sym(Symbol::intern(token)))
        }
    }
}
