//! Tagged-literal parsers.
//!
//! `#tag form` hands the read form to the handler registered under the
//! tag's name. The registry is read-mostly: lookups take a read lock and
//! clone the handler out, registrations take the write lock. Handlers
//! for `inst`, `uuid` and `queue` are installed at construction.

mod instant;

use std::sync::Arc;
use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use selc_val::Value;
use uuid::Uuid;

use crate::error::{ReadError, ReadResult};

/// A tag handler: receives the single read argument and produces the
/// tagged value.
pub type TagHandler = Arc<dyn Fn(Value) -> ReadResult<Value> + Send + Sync>;

/// A mutable mapping from tag names to handlers.
///
/// Safe for concurrent readers with single-writer registration.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use selc_read::TagRegistry;
/// use selc_val::Value;
///
/// let registry = TagRegistry::with_builtins();
/// let previous = registry.register("answer", Arc::new(|_| Ok(Value::Int(42))));
/// assert!(previous.is_none());
/// assert!(registry.deregister("answer").is_some());
/// ```
pub struct TagRegistry {
    handlers: RwLock<FxHashMap<String, TagHandler>>,
}

impl TagRegistry {
    /// A registry holding the built-in `inst`, `uuid` and `queue`
    /// handlers.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        registry.register("inst", Arc::new(read_instant));
        registry.register("uuid", Arc::new(read_uuid));
        registry.register("queue", Arc::new(read_queue));
        registry
    }

    /// A registry with no handlers at all.
    pub fn empty() -> Self {
        Self {
            handlers: RwLock::new(FxHashMap::default()),
        }
    }

    /// Registers `handler` under `tag`, returning the handler it
    /// replaced, if any.
    pub fn register(&self, tag: &str, handler: TagHandler) -> Option<TagHandler> {
        self.handlers.write().insert(tag.to_string(), handler)
    }

    /// Removes the handler for `tag`, returning it if one was present.
    pub fn deregister(&self, tag: &str) -> Option<TagHandler> {
        self.handlers.write().remove(tag)
    }

    /// Looks up the handler for `tag`.
    pub fn get(&self, tag: &str) -> Option<TagHandler> {
        self.handlers.read().get(tag).cloned()
    }

    /// The registered tag names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// The process-wide registry used by `read_string`.
pub fn default_registry() -> &'static TagRegistry {
    static REGISTRY: OnceLock<TagRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TagRegistry::with_builtins)
}

/// `#inst "timestamp"`
fn read_instant(value: Value) -> ReadResult<Value> {
    let Value::Str(s) = value else {
        return Err(ReadError::Tag("Instance literal expects a string".to_string()));
    };
    instant::parse_timestamp(&s).map(Value::Inst)
}

/// `#uuid "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"`
fn read_uuid(value: Value) -> ReadResult<Value> {
    let Value::Str(s) = value else {
        return Err(ReadError::Tag("UUID literal expects a string".to_string()));
    };
    Uuid::parse_str(&s)
        .map(Value::Uuid)
        .map_err(|e| ReadError::Tag(format!("Invalid UUID string: {}", e)))
}

/// `#queue [...]`
fn read_queue(value: Value) -> ReadResult<Value> {
    let Value::Vector(v) = value else {
        return Err(ReadError::Tag("Queue literal expects a vector".to_string()));
    };
    Ok(Value::queue(v.items().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_string;

    #[test]
    fn test_builtins_present() {
        let names = TagRegistry::with_builtins().names();
        assert_eq!(names, vec!["inst", "queue", "uuid"]);
    }

    #[test]
    fn test_register_returns_previous() {
        let registry = TagRegistry::with_builtins();
        let first: TagHandler = Arc::new(|_| Ok(Value::Int(1)));
        let second: TagHandler = Arc::new(|_| Ok(Value::Int(2)));
        assert!(registry.register("t", first).is_none());
        let previous = registry.register("t", second).expect("previous handler");
        assert_eq!(previous(Value::Nil).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_deregister_returns_previous() {
        let registry = TagRegistry::with_builtins();
        assert!(registry.deregister("missing").is_none());
        registry.register("t", Arc::new(|_| Ok(Value::Nil)));
        assert!(registry.deregister("t").is_some());
        assert!(registry.get("t").is_none());
    }

    #[test]
    fn test_uuid_literal() {
        let v = read_string("#uuid \"f81d4fae-7dec-11d0-a765-00a0c91e6bf6\"").unwrap();
        match v {
            Value::Uuid(u) => {
                assert_eq!(u.to_string(), "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
            }
            other => panic!("expected uuid, got {:?}", other),
        }
    }

    #[test]
    fn test_uuid_requires_string() {
        assert_eq!(
            read_string("#uuid 7"),
            Err(ReadError::Tag("UUID literal expects a string".to_string()))
        );
    }

    #[test]
    fn test_uuid_malformed() {
        assert!(matches!(
            read_string("#uuid \"not-a-uuid\""),
            Err(ReadError::Tag(_))
        ));
    }

    #[test]
    fn test_queue_literal() {
        let v = read_string("#queue [1 2 3]").unwrap();
        match v {
            Value::Queue(q) => {
                assert_eq!(q.items(), &[Value::Int(1), Value::Int(2), Value::Int(3)]);
            }
            other => panic!("expected queue, got {:?}", other),
        }
    }

    #[test]
    fn test_queue_requires_vector() {
        assert_eq!(
            read_string("#queue (1 2)"),
            Err(ReadError::Tag("Queue literal expects a vector".to_string()))
        );
    }

    #[test]
    fn test_inst_requires_string() {
        assert_eq!(
            read_string("#inst 42"),
            Err(ReadError::Tag("Instance literal expects a string".to_string()))
        );
    }

    #[test]
    fn test_custom_tag_end_to_end() {
        let registry = TagRegistry::with_builtins();
        registry.register(
            "celsius",
            Arc::new(|v| match v {
                Value::Int(n) => Ok(Value::Float(n as f64 + 273.15)),
                _ => Err(ReadError::Tag("celsius expects an integer".to_string())),
            }),
        );
        let resolver = crate::NsResolver::default();
        let mut reader = crate::Reader::new("#celsius 10", &resolver, &registry);
        assert_eq!(reader.read().unwrap(), Some(Value::Float(283.15)));
    }
}
