//! Quote, deref, metadata and unquote shorthands.

use selc_val::Value;

use crate::error::{ReadError, ReadResult};
use crate::reader::{ReadOutcome, Reader};

impl Reader<'_> {
    /// `'form` → `(quote form)`
    pub(crate) fn read_quote(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        self.read_wrapped("quote")
    }

    /// `@form` → `(deref form)`
    pub(crate) fn read_deref(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        self.read_wrapped("deref")
    }

    /// `~form` → `(unquote form)`; `~@form` → `(unquote-splicing form)`
    pub(crate) fn read_unquote(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        match self.src.read_char() {
            None => Err(ReadError::Eof),
            Some('@') => self.read_wrapped("unquote-splicing"),
            Some(ch) => {
                self.src.unread(ch);
                self.read_wrapped("unquote")
            }
        }
    }

    fn read_wrapped(&mut self, head: &str) -> ReadResult<ReadOutcome> {
        let form = self.read_form()?;
        Ok(ReadOutcome::Produced(Value::list(vec![
            Value::symbol(head),
            form,
        ])))
    }

    /// `^meta form`: desugars the metadata form to a map, reads the
    /// target, and attaches the merged metadata.
    pub(crate) fn read_meta(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let meta_form = self.read_form()?;
        let meta = match meta_form {
            Value::Sym(_) | Value::Str(_) => {
                Value::map_from(vec![(Value::keyword("tag"), meta_form)])
            }
            Value::Keyword(_) => Value::map_from(vec![(meta_form, Value::Bool(true))]),
            Value::Map(_) => meta_form,
            _ => return Err(ReadError::InvalidMetadata),
        };
        let meta_map = match meta {
            Value::Map(m) => m,
            _ => return Err(ReadError::InvalidMetadata),
        };
        let target = self.read_form()?;
        target
            .merge_meta(&meta_map)
            .map(ReadOutcome::Produced)
            .ok_or(ReadError::MetadataNotSupported)
    }
}
