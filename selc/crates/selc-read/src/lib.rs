//! selc-read - The Sel reader.
//!
//! Turns a stream of characters into Sel values: atoms, collections,
//! regex/instant/UUID/queue literals, and the expansion of the reader
//! shorthands (quote, deref, metadata, syntax-quote, unquote, anonymous
//! function literals, tagged literals).
//!
//! The two entry points are [`read_string`], which reads exactly one
//! form, and [`Reader::read`], which streams forms one at a time.
//!
//! # Example
//!
//! ```
//! use selc_read::read_string;
//! use selc_val::Value;
//!
//! let v = read_string("{:name \"sel\" :version 1}").unwrap();
//! match v {
//!     Value::Map(m) => assert_eq!(m.len(), 2),
//!     _ => unreachable!(),
//! }
//! ```

pub mod error;
pub mod pushback;
pub mod reader;
pub mod resolver;
pub mod tags;

#[cfg(test)]
mod edge_cases;

pub use error::{ReadError, ReadResult};
pub use pushback::PushbackReader;
pub use reader::{ReadOutcome, Reader};
pub use resolver::{NsResolver, Resolver};
pub use tags::{default_registry, TagHandler, TagRegistry};

use selc_val::Value;

/// Reads exactly one form from `text`. Input past the first form is
/// ignored; an input with no form at all is an error.
///
/// Uses the default `user` namespace resolver and the process-wide tag
/// registry. Build a [`Reader`] directly to supply your own.
pub fn read_string(text: &str) -> ReadResult<Value> {
    let resolver = NsResolver::default();
    let mut reader = Reader::new(text, &resolver, default_registry());
    reader.read()?.ok_or(ReadError::Eof)
}

/// Reads every form in `text`.
pub fn read_all(text: &str) -> ReadResult<Vec<Value>> {
    let resolver = NsResolver::default();
    let mut reader = Reader::new(text, &resolver, default_registry());
    let mut forms = Vec::new();
    while let Some(form) = reader.read()? {
        forms.push(form);
    }
    Ok(forms)
}
