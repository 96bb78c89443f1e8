//! The reader core.
//!
//! This module holds the `Reader` itself: character classification, the
//! token scanner, the reader-macro table, and the top-level driver that
//! turns a character stream into values. The individual macro parsers
//! live in the submodules and re-enter the driver for nested forms.

mod collection;
mod dispatch;
mod fn_literal;
mod number;
mod quote;
mod string;
mod symbol;
mod syntax_quote;

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use selc_val::{Symbol, Value};

use crate::error::{ReadError, ReadResult};
use crate::pushback::PushbackReader;
use crate::resolver::Resolver;
use crate::tags::TagRegistry;

/// What one dispatch step produced.
///
/// Some parsers consume input without producing a form (comments, `#_`
/// discards); they return [`ReadOutcome::Skipped`] and the driver keeps
/// going.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// A form was produced.
    Produced(Value),
    /// Input was consumed but no form was produced.
    Skipped,
}

/// A parser bound to a reader-macro character. Receives the reader and
/// the character that selected it (already consumed).
pub(crate) type MacroFn<'a> = fn(&mut Reader<'a>, char) -> ReadResult<ReadOutcome>;

/// True for characters the reader treats as whitespace: any Unicode
/// whitespace plus the comma.
pub(crate) fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch == ','
}

/// True for characters bound in the reader-macro table.
pub(crate) fn is_macro(ch: char) -> bool {
    matches!(
        ch,
        '"' | ':'
            | ';'
            | '\''
            | '@'
            | '^'
            | '`'
            | '~'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '\\'
            | '%'
            | '#'
    )
}

/// True for macro characters that terminate a token. `#`, `'` and `:`
/// are macro characters but may appear inside tokens.
pub(crate) fn is_macro_terminating(ch: char) -> bool {
    !matches!(ch, '#' | '\'' | ':') && is_macro(ch)
}

/// Looks up the parser bound to a macro character.
fn macro_parser<'a>(ch: char) -> Option<MacroFn<'a>> {
    match ch {
        '"' => Some(Reader::read_string_literal),
        ':' => Some(Reader::read_keyword),
        ';' => Some(Reader::read_comment),
        '\'' => Some(Reader::read_quote),
        '@' => Some(Reader::read_deref),
        '^' => Some(Reader::read_meta),
        '`' => Some(Reader::read_syntax_quote),
        '~' => Some(Reader::read_unquote),
        '(' => Some(Reader::read_list),
        '[' => Some(Reader::read_vector),
        '{' => Some(Reader::read_map),
        ')' | ']' | '}' => Some(Reader::read_unmatched_delimiter),
        '\\' => Some(Reader::read_char_literal),
        '%' => Some(Reader::read_arg),
        '#' => Some(Reader::read_dispatch),
        _ => None,
    }
}

/// The Sel reader.
///
/// A reader is created over a source string, a symbol [`Resolver`]
/// (consulted by syntax-quote and `::keyword` auto-namespacing), and a
/// [`TagRegistry`] for `#tag` data literals. [`Reader::read`] yields one
/// form per call until the input is exhausted.
///
/// # Example
///
/// ```
/// use selc_read::{default_registry, NsResolver, Reader};
/// use selc_val::Value;
///
/// let resolver = NsResolver::default();
/// let mut reader = Reader::new("1 2", &resolver, default_registry());
/// assert_eq!(reader.read().unwrap(), Some(Value::Int(1)));
/// assert_eq!(reader.read().unwrap(), Some(Value::Int(2)));
/// assert_eq!(reader.read().unwrap(), None);
/// ```
pub struct Reader<'a> {
    src: PushbackReader<'a>,
    resolver: &'a dyn Resolver,
    tags: &'a TagRegistry,
    /// Auto-gensym environment; `Some` only inside a syntax-quote.
    gensym_env: Option<FxHashMap<Symbol, Symbol>>,
    /// `%` argument environment; `Some` only inside a `#(...)` literal.
    arg_env: Option<BTreeMap<i32, Symbol>>,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `source`.
    pub fn new(source: &'a str, resolver: &'a dyn Resolver, tags: &'a TagRegistry) -> Self {
        Self {
            src: PushbackReader::new(source),
            resolver,
            tags,
            gensym_env: None,
            arg_env: None,
        }
    }

    /// Reads the next top-level form. Returns `Ok(None)` when the input
    /// is exhausted.
    pub fn read(&mut self) -> ReadResult<Option<Value>> {
        loop {
            match self.read_outcome()? {
                None => return Ok(None),
                Some(ReadOutcome::Produced(v)) => return Ok(Some(v)),
                Some(ReadOutcome::Skipped) => continue,
            }
        }
    }

    /// Reads one form from inside another parser. End of input here is
    /// always an error: some enclosing construct is unfinished.
    pub(crate) fn read_form(&mut self) -> ReadResult<Value> {
        loop {
            match self.read_outcome()? {
                None => return Err(ReadError::Eof),
                Some(ReadOutcome::Produced(v)) => return Ok(v),
                Some(ReadOutcome::Skipped) => continue,
            }
        }
    }

    /// One dispatch step: skip whitespace, then let the macro table, the
    /// number-start rule, or the symbol reader handle the next character.
    fn read_outcome(&mut self) -> ReadResult<Option<ReadOutcome>> {
        let ch = match self.next_nonwhitespace() {
            None => return Ok(None),
            Some(ch) => ch,
        };
        if let Some(parser) = macro_parser(ch) {
            return parser(self, ch).map(Some);
        }
        if self.at_number_start(ch) {
            return self
                .read_number(ch)
                .map(|v| Some(ReadOutcome::Produced(v)));
        }
        self.read_symbol_value(ch)
            .map(|v| Some(ReadOutcome::Produced(v)))
    }

    /// Consumes whitespace (including commas) and returns the first
    /// significant character.
    pub(crate) fn next_nonwhitespace(&mut self) -> Option<char> {
        loop {
            match self.src.read_char() {
                None => return None,
                Some(ch) if is_whitespace(ch) => continue,
                Some(ch) => return Some(ch),
            }
        }
    }

    /// Scans a maximal token starting with `initial`. The terminating
    /// whitespace or macro character is pushed back.
    pub(crate) fn read_token(&mut self, initial: char) -> String {
        let mut token = String::new();
        token.push(initial);
        while let Some(ch) = self.src.read_char() {
            if is_whitespace(ch) || is_macro_terminating(ch) {
                self.src.unread(ch);
                break;
            }
            token.push(ch);
        }
        token
    }

    /// A number starts at a digit, or at `+`/`-` immediately followed by
    /// a digit.
    fn at_number_start(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() {
            return true;
        }
        if ch == '+' || ch == '-' {
            if let Some(next) = self.src.peek_char() {
                return next.is_ascii_digit();
            }
        }
        false
    }

    /// `;` comment: consumed through end of line, produces nothing.
    fn read_comment(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        self.skip_line()
    }

    /// Consumes through the next newline (or end of input).
    pub(crate) fn skip_line(&mut self) -> ReadResult<ReadOutcome> {
        while let Some(ch) = self.src.read_char() {
            if ch == '\n' {
                break;
            }
        }
        Ok(ReadOutcome::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_string;

    #[test]
    fn test_whitespace_and_commas_are_equivalent() {
        let a = read_string("(1 2 3)").unwrap();
        let b = read_string("(1,,2 ,\t3)").unwrap();
        let c = read_string("  ( 1\n2,3 )  ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_macro_char_terminates_token() {
        // `)` must not become part of the symbol.
        let v = read_string("(abc)").unwrap();
        assert_eq!(v, Value::list(vec![Value::symbol("abc")]));
    }

    #[test]
    fn test_hash_quote_colon_do_not_terminate() {
        assert_eq!(read_string("a#b").unwrap(), Value::symbol("a#b"));
        assert_eq!(read_string("a'b").unwrap(), Value::symbol("a'b"));
        assert_eq!(read_string("a:b").unwrap(), Value::symbol("a:b"));
    }

    #[test]
    fn test_comment_skipped() {
        let v = read_string("; a comment\n42").unwrap();
        assert_eq!(v, Value::Int(42));
    }

    #[test]
    fn test_streaming_read() {
        let resolver = crate::NsResolver::default();
        let mut reader = Reader::new("a ; note\n b", &resolver, crate::default_registry());
        assert_eq!(reader.read().unwrap(), Some(Value::symbol("a")));
        assert_eq!(reader.read().unwrap(), Some(Value::symbol("b")));
        assert_eq!(reader.read().unwrap(), None);
    }

    #[test]
    fn test_empty_input() {
        let resolver = crate::NsResolver::default();
        let mut reader = Reader::new("  , \n ", &resolver, crate::default_registry());
        assert_eq!(reader.read().unwrap(), None);
    }

    #[test]
    fn test_plus_minus_are_symbols_without_digit() {
        assert_eq!(read_string("+").unwrap(), Value::symbol("+"));
        assert_eq!(read_string("-foo").unwrap(), Value::symbol("-foo"));
    }

    #[test]
    fn test_signed_numbers_dispatch_to_number_reader() {
        assert_eq!(read_string("+1").unwrap(), Value::Int(1));
        assert_eq!(read_string("-1").unwrap(), Value::Int(-1));
    }
}
