//! The Sel value model.
//!
//! A [`Value`] is what the reader produces: atoms (nil, booleans, numbers,
//! strings, characters, symbols, keywords), collections (lists, vectors,
//! maps, sets, queues) and the literal value types (regex patterns,
//! instants, UUIDs).
//!
//! # Equality
//!
//! Equality follows value semantics, not representation:
//!
//! - metadata never participates in equality or hashing;
//! - lists, vectors and queues are mutually equal when their elements are
//!   equal (sequential equality);
//! - `42` and `42N` are equal, as are `1.5` and `1.5M`;
//! - floats compare by bit pattern, so values are usable as map keys and
//!   `NaN` keys do not poison a map;
//! - regex values compare by pattern text.
//!
//! `Hash` is consistent with this equality, so any value can serve as a
//! map key or set element.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use rustc_hash::FxHasher;
use uuid::Uuid;

use crate::{Keyword, Ratio, Symbol};

/// An in-memory Sel value.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    /// An integer read with the `N` marker. Same numeric value space as
    /// [`Value::Int`]; kept apart so printing round-trips the marker.
    BigInt(i64),
    Float(f64),
    /// A float read with the `M` marker.
    BigDec(f64),
    Ratio(Ratio),
    Char(char),
    Str(Rc<str>),
    Sym(Symbol),
    Keyword(Keyword),
    List(List),
    Vector(Vector),
    Map(Map),
    Set(Set),
    Queue(Queue),
    Regex(Rc<Regex>),
    Inst(DateTime<Utc>),
    Uuid(Uuid),
}

/// An ordered sequence with list semantics.
#[derive(Clone, Debug, Default)]
pub struct List {
    items: Rc<Vec<Value>>,
    meta: Option<Rc<Value>>,
}

/// An ordered sequence with random-access semantics.
#[derive(Clone, Debug, Default)]
pub struct Vector {
    items: Rc<Vec<Value>>,
    meta: Option<Rc<Value>>,
}

/// An association of keys to values, insertion-ordered.
#[derive(Clone, Debug, Default)]
pub struct Map {
    entries: Rc<IndexMap<Value, Value>>,
    meta: Option<Rc<Value>>,
}

/// A collection of unique values, insertion-ordered.
#[derive(Clone, Debug, Default)]
pub struct Set {
    items: Rc<IndexSet<Value>>,
    meta: Option<Rc<Value>>,
}

/// A FIFO queue, as produced by the `#queue` tag.
#[derive(Clone, Debug, Default)]
pub struct Queue {
    items: Rc<Vec<Value>>,
}

impl List {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Rc::new(items),
            meta: None,
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn second(&self) -> Option<&Value> {
        self.items.get(1)
    }
}

impl Vector {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Rc::new(items),
            meta: None,
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Map {
    pub fn new(entries: IndexMap<Value, Value>) -> Self {
        Self {
            entries: Rc::new(entries),
            meta: None,
        }
    }

    pub fn entries(&self) -> &IndexMap<Value, Value> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl Set {
    pub fn new(items: IndexSet<Value>) -> Self {
        Self {
            items: Rc::new(items),
            meta: None,
        }
    }

    pub fn items(&self) -> &IndexSet<Value> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }
}

impl Queue {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Rc::new(items),
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Value {
    /// A list from a vector of items.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(List::new(items))
    }

    /// A vector from a vector of items.
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Vector::new(items))
    }

    /// A map from an entry map.
    pub fn map(entries: IndexMap<Value, Value>) -> Self {
        Value::Map(Map::new(entries))
    }

    /// A map from key/value pairs. Later duplicates win.
    pub fn map_from(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(Map::new(pairs.into_iter().collect()))
    }

    /// A set from items; later duplicates are dropped.
    pub fn set_from(items: Vec<Value>) -> Self {
        Value::Set(Set::new(items.into_iter().collect()))
    }

    /// A queue from a vector of items.
    pub fn queue(items: Vec<Value>) -> Self {
        Value::Queue(Queue::new(items))
    }

    /// A string value.
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// A plain (unqualified) symbol value.
    pub fn symbol(name: &str) -> Self {
        Value::Sym(Symbol::intern(name))
    }

    /// A plain (unqualified) keyword value.
    pub fn keyword(name: &str) -> Self {
        Value::Keyword(Keyword::intern(name))
    }

    /// A compiled regex value.
    pub fn regex(pattern: Regex) -> Self {
        Value::Regex(Rc::new(pattern))
    }

    /// The elements, when this value is sequential (list, vector, queue).
    pub fn seq_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l.items()),
            Value::Vector(v) => Some(v.items()),
            Value::Queue(q) => Some(q.items()),
            _ => None,
        }
    }

    /// The elements, when this value is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l.items()),
            _ => None,
        }
    }

    /// The elements, when this value is a vector.
    pub fn as_vector(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(v) => Some(v.items()),
            _ => None,
        }
    }

    /// The symbol, when this value is one.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Sym(s) => Some(s),
            _ => None,
        }
    }

    /// The string slice, when this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, when this value is one (with or without the `N` marker).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) | Value::BigInt(n) => Some(*n),
            _ => None,
        }
    }

    /// True for the value kinds that accept metadata: symbols, lists,
    /// vectors, maps and sets.
    pub fn supports_meta(&self) -> bool {
        matches!(
            self,
            Value::Sym(_) | Value::List(_) | Value::Vector(_) | Value::Map(_) | Value::Set(_)
        )
    }

    /// The metadata attached to this value, if any.
    pub fn meta(&self) -> Option<&Value> {
        match self {
            Value::Sym(s) => s.meta(),
            Value::List(l) => l.meta.as_deref(),
            Value::Vector(v) => v.meta.as_deref(),
            Value::Map(m) => m.meta.as_deref(),
            Value::Set(s) => s.meta.as_deref(),
            _ => None,
        }
    }

    /// Returns this value with `new_meta` merged over any existing
    /// metadata. `new_meta` must be a map value; on key conflicts the new
    /// entries win. Returns `None` when this value does not accept
    /// metadata.
    pub fn merge_meta(self, new_meta: &Map) -> Option<Value> {
        if !self.supports_meta() {
            return None;
        }
        let merged = match self.meta() {
            Some(Value::Map(existing)) => {
                let mut entries = (*existing.entries).clone();
                for (k, v) in new_meta.entries() {
                    entries.insert(k.clone(), v.clone());
                }
                Value::Map(Map::new(entries))
            }
            _ => Value::Map(new_meta.clone()),
        };
        Some(match self {
            Value::Sym(s) => Value::Sym(s.with_meta(merged)),
            Value::List(mut l) => {
                l.meta = Some(Rc::new(merged));
                Value::List(l)
            }
            Value::Vector(mut v) => {
                v.meta = Some(Rc::new(merged));
                Value::Vector(v)
            }
            Value::Map(mut m) => {
                m.meta = Some(Rc::new(merged));
                Value::Map(m)
            }
            Value::Set(mut s) => {
                s.meta = Some(Rc::new(merged));
                Value::Set(s)
            }
            other => other,
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.seq_items(), other.seq_items()) {
            return a == b;
        }
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a) | Value::BigInt(a), Value::Int(b) | Value::BigInt(b)) => a == b,
            (Value::Float(a) | Value::BigDec(a), Value::Float(b) | Value::BigDec(b)) => {
                a.to_bits() == b.to_bits()
            }
            (Value::Ratio(a), Value::Ratio(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a.entries == b.entries,
            (Value::Set(a), Value::Set(b)) => a.items == b.items,
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            (Value::Inst(a), Value::Inst(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(items) = self.seq_items() {
            // Shared discriminant so sequential equality stays consistent
            // with hashing across list/vector/queue.
            state.write_u8(10);
            for item in items {
                item.hash(state);
            }
            state.write_usize(items.len());
            return;
        }
        match self {
            Value::Nil => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Int(n) | Value::BigInt(n) => {
                state.write_u8(2);
                n.hash(state);
            }
            Value::Float(x) | Value::BigDec(x) => {
                state.write_u8(3);
                x.to_bits().hash(state);
            }
            Value::Ratio(r) => {
                state.write_u8(4);
                r.hash(state);
            }
            Value::Char(c) => {
                state.write_u8(5);
                c.hash(state);
            }
            Value::Str(s) => {
                state.write_u8(6);
                s.hash(state);
            }
            Value::Sym(s) => {
                state.write_u8(7);
                s.hash(state);
            }
            Value::Keyword(k) => {
                state.write_u8(8);
                k.hash(state);
            }
            Value::Map(m) => {
                state.write_u8(11);
                state.write_u64(unordered_hash(
                    m.entries.iter().map(|(k, v)| entry_hash(k, Some(v))),
                ));
                state.write_usize(m.len());
            }
            Value::Set(s) => {
                state.write_u8(12);
                state.write_u64(unordered_hash(s.items.iter().map(|v| entry_hash(v, None))));
                state.write_usize(s.len());
            }
            Value::Regex(r) => {
                state.write_u8(13);
                r.as_str().hash(state);
            }
            Value::Inst(t) => {
                state.write_u8(14);
                t.hash(state);
            }
            Value::Uuid(u) => {
                state.write_u8(15);
                u.hash(state);
            }
            // Sequential variants are handled above.
            Value::List(_) | Value::Vector(_) | Value::Queue(_) => {}
        }
    }
}

/// Order-independent combination of per-entry hashes, so map/set hashing
/// agrees with their order-independent equality.
fn unordered_hash(entry_hashes: impl Iterator<Item = u64>) -> u64 {
    entry_hashes.fold(0u64, |acc, h| acc.wrapping_add(h))
}

fn entry_hash(key: &Value, value: Option<&Value>) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    if let Some(v) = value {
        v.hash(&mut hasher);
    }
    hasher.finish()
}
