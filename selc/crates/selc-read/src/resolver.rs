//! Symbol resolution.
//!
//! Syntax-quote rewrites plain symbols into fully-qualified ones, and
//! `::keyword` auto-namespacing needs a current namespace. Both go
//! through the [`Resolver`] trait so an embedding analyzer can supply its
//! own notion of namespaces; [`NsResolver`] is the plain implementation
//! used by `read_string` and the CLI.

use rustc_hash::FxHashSet;
use selc_val::Symbol;

/// Names that evaluate as themselves and are never qualified.
const SPECIAL_FORMS: &[&str] = &[
    "def", "if", "do", "let*", "quote", "var", "fn*", "loop*", "recur", "throw", "try", "catch",
    "finally", "new", "set!", ".", "&",
];

/// Resolves symbols during syntax-quote and supplies the current default
/// namespace.
pub trait Resolver {
    /// The namespace used for `::name` keywords and plain-symbol
    /// resolution.
    fn current_ns(&self) -> &str;

    /// True for special form names, which resolve to themselves.
    fn is_special(&self, name: &str) -> bool;

    /// Returns the fully-qualified form of `sym`.
    fn resolve(&self, sym: &Symbol) -> Symbol;
}

/// A resolver with a fixed current namespace and the standard special
/// forms. Unqualified symbols resolve into the current namespace;
/// qualified symbols are kept as written.
///
/// # Example
///
/// ```
/// use selc_read::{NsResolver, Resolver};
/// use selc_val::Symbol;
///
/// let resolver = NsResolver::new("app.core");
/// let resolved = resolver.resolve(&Symbol::intern("handler"));
/// assert_eq!(resolved.to_string(), "app.core/handler");
/// ```
pub struct NsResolver {
    ns: String,
    specials: FxHashSet<&'static str>,
}

impl NsResolver {
    /// Creates a resolver for the given namespace.
    pub fn new(ns: impl Into<String>) -> Self {
        Self {
            ns: ns.into(),
            specials: SPECIAL_FORMS.iter().copied().collect(),
        }
    }
}

impl Default for NsResolver {
    fn default() -> Self {
        Self::new("user")
    }
}

impl Resolver for NsResolver {
    fn current_ns(&self) -> &str {
        &self.ns
    }

    fn is_special(&self, name: &str) -> bool {
        self.specials.contains(name)
    }

    fn resolve(&self, sym: &Symbol) -> Symbol {
        match sym.namespace() {
            Some(_) => sym.clone(),
            None => Symbol::qualified(&self.ns, sym.name()),
        }
    }
}
