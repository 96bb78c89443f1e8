//! `#` dispatch forms.
//!
//! The character after `#` selects a parser: sets, fn literals, regex
//! literals, line comments and form discards. Any other token-starting
//! character begins a tagged literal resolved through the tag registry.

use selc_val::Value;

use crate::error::{ReadError, ReadResult};
use crate::reader::{is_macro, ReadOutcome, Reader};

impl Reader<'_> {
    pub(crate) fn read_dispatch(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        let ch = self.src.read_char().ok_or(ReadError::EofCharacter)?;
        match ch {
            '{' => self.read_set(),
            '(' => self.read_fn_literal(),
            '"' => self.read_regex_literal(),
            '<' => Err(ReadError::UnreadableForm),
            // Shebang-style comment.
            '!' => self.skip_line(),
            '_' => {
                self.read_form()?;
                Ok(ReadOutcome::Skipped)
            }
            ch if is_macro(ch) => Err(ReadError::UnknownDispatch(ch)),
            ch => self.read_tagged(ch),
        }
    }

    /// `#tag form`: reads the tag symbol, looks up its handler, reads the
    /// argument form and applies the handler.
    fn read_tagged(&mut self, initial: char) -> ReadResult<ReadOutcome> {
        self.src.unread(initial);
        let tag = match self.read_form()? {
            Value::Sym(s) => s,
            _ => return Err(ReadError::InvalidTag),
        };
        let name = tag.to_string();
        let handler = self.tags.get(&name).ok_or_else(|| ReadError::UnknownTag {
            tag: name.clone(),
            registered: self.tags.names().join(", "),
        })?;
        let arg = self.read_form()?;
        handler(arg).map(ReadOutcome::Produced)
    }
}
