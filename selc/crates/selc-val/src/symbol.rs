//! Symbols, keywords and gensym generation.
//!
//! Symbols and keywords both carry an optional namespace and a required
//! name. Symbols may additionally be decorated with metadata; keywords
//! never carry metadata. Both are cheap to clone: the string payloads are
//! reference counted.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Value;

/// Counter backing [`gensym`] and [`next_id`]. Process-wide so generated
/// names stay unique across independent reader instances.
static GENSYM_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Returns the next process-wide unique id.
pub fn next_id() -> u64 {
    GENSYM_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Generates a fresh symbol by appending a unique id to `prefix`.
///
/// # Example
///
/// ```
/// use selc_val::gensym;
///
/// let a = gensym("tmp__");
/// let b = gensym("tmp__");
/// assert_ne!(a, b);
/// assert!(a.name().starts_with("tmp__"));
/// ```
pub fn gensym(prefix: &str) -> Symbol {
    Symbol::intern(&format!("{}{}", prefix, next_id()))
}

/// A symbol: an optional namespace, a name, and optional metadata.
///
/// Equality and hashing ignore metadata.
///
/// # Example
///
/// ```
/// use selc_val::Symbol;
///
/// let plain = Symbol::intern("map");
/// assert_eq!(plain.name(), "map");
/// assert_eq!(plain.namespace(), None);
///
/// let qualified = Symbol::qualified("core", "map");
/// assert_eq!(qualified.namespace(), Some("core"));
/// assert_eq!(qualified.to_string(), "core/map");
/// ```
#[derive(Clone, Debug)]
pub struct Symbol {
    ns: Option<Rc<str>>,
    name: Rc<str>,
    meta: Option<Rc<Value>>,
}

impl Symbol {
    /// Creates a symbol with no namespace.
    pub fn intern(name: &str) -> Self {
        Self {
            ns: None,
            name: Rc::from(name),
            meta: None,
        }
    }

    /// Creates a namespace-qualified symbol.
    pub fn qualified(ns: &str, name: &str) -> Self {
        Self {
            ns: Some(Rc::from(ns)),
            name: Rc::from(name),
            meta: None,
        }
    }

    /// The name part.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace part, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    /// The metadata map attached to this symbol, if any.
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_deref()
    }

    /// Returns this symbol with its metadata replaced.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(Rc::new(meta));
        self
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.ns == other.ns && self.name == other.name
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ns.as_deref().hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A keyword: an optional namespace and a name.
///
/// # Example
///
/// ```
/// use selc_val::Keyword;
///
/// assert_eq!(Keyword::intern("a").to_string(), ":a");
/// assert_eq!(Keyword::qualified("user", "a").to_string(), ":user/a");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Keyword {
    ns: Option<Rc<str>>,
    name: Rc<str>,
}

impl Keyword {
    /// Creates a keyword with no namespace.
    pub fn intern(name: &str) -> Self {
        Self {
            ns: None,
            name: Rc::from(name),
        }
    }

    /// Creates a namespace-qualified keyword.
    pub fn qualified(ns: &str, name: &str) -> Self {
        Self {
            ns: Some(Rc::from(ns)),
            name: Rc::from(name),
        }
    }

    /// The name part.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace part, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns {
            Some(ns) => write!(f, ":{}/{}", ns, self.name),
            None => write!(f, ":{}", self.name),
        }
    }
}
