//! selc-val - The Sel value model.
//!
//! This crate defines the in-memory values the Sel reader produces:
//! atoms, collections, and the literal value types (regex patterns,
//! instants, UUIDs, queues). It also provides the canonical printer and
//! the process-wide gensym generator.
//!
//! The reader lives in `selc-read`; this crate knows nothing about text.
//!
//! # Example
//!
//! ```
//! use selc_val::{Symbol, Value};
//!
//! let form = Value::list(vec![
//!     Value::Sym(Symbol::intern("+")),
//!     Value::Int(1),
//!     Value::Int(2),
//! ]);
//! assert_eq!(form.to_string(), "(+ 1 2)");
//! ```

pub mod print;
pub mod ratio;
pub mod symbol;
pub mod value;

pub use ratio::Ratio;
pub use symbol::{gensym, next_id, Keyword, Symbol};
pub use value::{List, Map, Queue, Set, Value, Vector};
