//! Collection literals: list, vector, map, set.
//!
//! All four share one delimited-list driver. The driver invokes macro
//! parsers directly so that non-producing parsers (comments, `#_`)
//! contribute nothing, and falls back to a recursive read for ordinary
//! forms.

use indexmap::IndexMap;
use selc_val::Value;

use crate::error::{ReadError, ReadResult};
use crate::reader::{is_whitespace, macro_parser, ReadOutcome, Reader};

impl Reader<'_> {
    /// Accumulates forms until the closing delimiter `close`.
    pub(crate) fn read_delimited(&mut self, close: char) -> ReadResult<Vec<Value>> {
        let mut forms = Vec::new();
        loop {
            let ch = loop {
                match self.src.read_char() {
                    None => return Err(ReadError::Eof),
                    Some(c) if is_whitespace(c) => continue,
                    Some(c) => break c,
                }
            };
            if ch == close {
                return Ok(forms);
            }
            if let Some(parser) = macro_parser(ch) {
                match parser(self, ch)? {
                    ReadOutcome::Produced(v) => forms.push(v),
                    ReadOutcome::Skipped => {}
                }
            } else {
                self.src.unread(ch);
                forms.push(self.read_form()?);
            }
        }
    }

    /// `(...)`
    pub(crate) fn read_list(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let items = self.read_delimited(')')?;
        Ok(ReadOutcome::Produced(Value::list(items)))
    }

    /// `[...]`
    pub(crate) fn read_vector(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let items = self.read_delimited(']')?;
        Ok(ReadOutcome::Produced(Value::vector(items)))
    }

    /// `{...}`; requires an even number of forms.
    pub(crate) fn read_map(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let items = self.read_delimited('}')?;
        if items.len() % 2 != 0 {
            return Err(ReadError::OddMapForms);
        }
        let mut entries = IndexMap::with_capacity(items.len() / 2);
        let mut it = items.into_iter();
        while let (Some(k), Some(v)) = (it.next(), it.next()) {
            entries.insert(k, v);
        }
        Ok(ReadOutcome::Produced(Value::map(entries)))
    }

    /// `#{...}`; duplicates keep their first occurrence.
    pub(crate) fn read_set(&mut self) -> ReadResult<ReadOutcome> {
        let items = self.read_delimited('}')?;
        Ok(ReadOutcome::Produced(Value::set_from(items)))
    }

    /// A closing delimiter with no opener in sight.
    pub(crate) fn read_unmatched_delimiter(&mut self, ch: char) -> ReadResult<ReadOutcome> {
        Err(ReadError::UnmatchedDelimiter(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_string;

    #[test]
    fn test_list_of_ints() {
        assert_eq!(
            read_string("(1 2 3)").unwrap(),
            Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(read_string("()").unwrap(), Value::list(vec![]));
        assert_eq!(read_string("[]").unwrap(), Value::vector(vec![]));
        assert_eq!(read_string("{}").unwrap(), Value::map_from(vec![]));
        assert_eq!(read_string("#{}").unwrap(), Value::set_from(vec![]));
    }

    #[test]
    fn test_vector_with_commas() {
        assert_eq!(
            read_string("[ 1, 2 ,,, 3 ]").unwrap(),
            Value::vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_map_literal() {
        let m = read_string("{:a 1 :b 2}").unwrap();
        match m {
            Value::Map(m) => {
                assert_eq!(m.len(), 2);
                assert_eq!(m.get(&Value::keyword("a")), Some(&Value::Int(1)));
                assert_eq!(m.get(&Value::keyword("b")), Some(&Value::Int(2)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_odd_map_is_an_error() {
        assert_eq!(read_string("{:a}"), Err(ReadError::OddMapForms));
        assert_eq!(read_string("{:a 1 :b}"), Err(ReadError::OddMapForms));
    }

    #[test]
    fn test_set_literal() {
        let s = read_string("#{1 2 3}").unwrap();
        match s {
            Value::Set(s) => {
                assert_eq!(s.len(), 3);
                assert!(s.contains(&Value::Int(2)));
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_collections() {
        let v = read_string("[(1) {:k [2]} #{3}]").unwrap();
        assert_eq!(
            v,
            Value::vector(vec![
                Value::list(vec![Value::Int(1)]),
                Value::map_from(vec![(
                    Value::keyword("k"),
                    Value::vector(vec![Value::Int(2)])
                )]),
                Value::set_from(vec![Value::Int(3)]),
            ])
        );
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(read_string(")"), Err(ReadError::UnmatchedDelimiter(')')));
        assert_eq!(read_string("]"), Err(ReadError::UnmatchedDelimiter(']')));
        assert_eq!(read_string("}"), Err(ReadError::UnmatchedDelimiter('}')));
    }

    #[test]
    fn test_mismatched_close_inside_list() {
        assert_eq!(read_string("(1]"), Err(ReadError::UnmatchedDelimiter(']')));
    }

    #[test]
    fn test_eof_inside_collection() {
        assert_eq!(read_string("(1 2"), Err(ReadError::Eof));
        assert_eq!(read_string("[1"), Err(ReadError::Eof));
        assert_eq!(read_string("{:a 1"), Err(ReadError::Eof));
    }

    #[test]
    fn test_discard_inside_list() {
        assert_eq!(
            read_string("(1 #_2 3)").unwrap(),
            Value::list(vec![Value::Int(1), Value::Int(3)])
        );
    }

    #[test]
    fn test_comment_inside_list() {
        assert_eq!(
            read_string("(1 ; two\n 3)").unwrap(),
            Value::list(vec![Value::Int(1), Value::Int(3)])
        );
    }
}
