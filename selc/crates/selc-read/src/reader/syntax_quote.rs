//! The syntax-quote transform.
//!
//! `` `form `` rewrites a data tree into a constructor expression that,
//! when evaluated later, rebuilds an equivalent tree. Unquoted subforms
//! are passed through for evaluation, unquote-splicing contributes its
//! elements, symbols are resolved to fully-qualified names, and
//! `name#` auto-gensyms map to generated symbols that are stable within
//! one syntax-quote.

use rustc_hash::FxHashMap;
use selc_val::{gensym, Symbol, Value};

use crate::error::{ReadError, ReadResult};
use crate::reader::{ReadOutcome, Reader};

impl Reader<'_> {
    /// `` `form ``: reads one form and applies the transform.
    pub(crate) fn read_syntax_quote(&mut self, _ch: char) -> ReadResult<ReadOutcome> {
        // Nested syntax-quotes share the innermost environment; only the
        // outermost entry installs it, and clears it on every exit path.
        let installed = self.gensym_env.is_none();
        if installed {
            self.gensym_env = Some(FxHashMap::default());
        }
        let result = self.read_form().and_then(|form| self.syntax_quote(&form));
        if installed {
            self.gensym_env = None;
        }
        result.map(ReadOutcome::Produced)
    }

    /// The tree rewrite itself. Pure except for the gensym environment.
    pub(crate) fn syntax_quote(&mut self, form: &Value) -> ReadResult<Value> {
        match form {
            Value::Sym(sym) => self.syntax_quote_symbol(sym),
            Value::List(list) => {
                if let Some(arg) = unquote_arg(form) {
                    return Ok(arg);
                }
                if unquote_splicing_arg(form).is_some() {
                    return Err(ReadError::SpliceNotInList);
                }
                if list.is_empty() {
                    Ok(Value::list(vec![Value::symbol("list")]))
                } else {
                    let expanded = self.expand_items(list.items())?;
                    Ok(seq_concat(expanded))
                }
            }
            Value::Vector(v) => {
                let expanded = self.expand_items(v.items())?;
                Ok(apply_constructor("vector", expanded))
            }
            Value::Set(s) => {
                let items: Vec<Value> = s.items().iter().cloned().collect();
                let expanded = self.expand_items(&items)?;
                Ok(apply_constructor("hash-set", expanded))
            }
            Value::Map(m) => {
                let mut flat = Vec::with_capacity(m.len() * 2);
                for (k, v) in m.entries() {
                    flat.push(k.clone());
                    flat.push(v.clone());
                }
                let expanded = self.expand_items(&flat)?;
                Ok(apply_constructor("hash-map", expanded))
            }
            Value::Nil => Ok(quote_form(Value::Nil)),
            Value::Keyword(_)
            | Value::Int(_)
            | Value::BigInt(_)
            | Value::Float(_)
            | Value::BigDec(_)
            | Value::Ratio(_)
            | Value::Char(_)
            | Value::Str(_) => Ok(form.clone()),
            other => Ok(quote_form(other.clone())),
        }
    }

    fn syntax_quote_symbol(&mut self, sym: &Symbol) -> ReadResult<Value> {
        let plain = sym.namespace().is_none();
        let resolved = if plain && self.resolver.is_special(sym.name()) {
            sym.clone()
        } else if plain && sym.name().ends_with('#') {
            self.auto_gensym(sym)?
        } else if plain && sym.name().ends_with('.') {
            // Constructor sugar: resolve the stripped name, then put the
            // dot back on the resolved name.
            let stripped = &sym.name()[..sym.name().len() - 1];
            let resolved = self.resolver.resolve(&Symbol::intern(stripped));
            let dotted = format!("{}.", resolved.name());
            match resolved.namespace() {
                Some(ns) => Symbol::qualified(ns, &dotted),
                None => Symbol::intern(&dotted),
            }
        } else if plain && sym.name().starts_with('.') {
            // Member-access sugar reads as written.
            sym.clone()
        } else {
            self.resolver.resolve(sym)
        };
        Ok(quote_form(Value::Sym(resolved)))
    }

    /// Looks up (or generates) the gensym for a `name#` symbol.
    fn auto_gensym(&mut self, sym: &Symbol) -> ReadResult<Symbol> {
        let env = self
            .gensym_env
            .as_mut()
            .ok_or(ReadError::GensymOutsideSyntaxQuote)?;
        if let Some(existing) = env.get(sym) {
            return Ok(existing.clone());
        }
        let stripped = &sym.name()[..sym.name().len() - 1];
        let generated = gensym(&format!("{}__auto__", stripped));
        env.insert(sym.clone(), generated.clone());
        Ok(generated)
    }

    /// Expands collection items: unquotes become single-element lists,
    /// splices contribute their value directly, everything else recurses.
    fn expand_items(&mut self, items: &[Value]) -> ReadResult<Vec<Value>> {
        items
            .iter()
            .map(|item| {
                if let Some(arg) = unquote_arg(item) {
                    Ok(Value::list(vec![Value::symbol("list"), arg]))
                } else if let Some(arg) = unquote_splicing_arg(item) {
                    Ok(arg)
                } else {
                    let quoted = self.syntax_quote(item)?;
                    Ok(Value::list(vec![Value::symbol("list"), quoted]))
                }
            })
            .collect()
    }
}

fn quote_form(v: Value) -> Value {
    Value::list(vec![Value::symbol("quote"), v])
}

/// `(seq (concat e1 e2 ...))`
fn seq_concat(expanded: Vec<Value>) -> Value {
    let mut concat = Vec::with_capacity(expanded.len() + 1);
    concat.push(Value::symbol("concat"));
    concat.extend(expanded);
    Value::list(vec![Value::symbol("seq"), Value::list(concat)])
}

/// `(apply ctor (seq (concat e1 e2 ...)))`
fn apply_constructor(ctor: &str, expanded: Vec<Value>) -> Value {
    Value::list(vec![
        Value::symbol("apply"),
        Value::symbol(ctor),
        seq_concat(expanded),
    ])
}

fn head_is(form: &Value, name: &str) -> bool {
    form.as_list()
        .and_then(|items| items.first())
        .and_then(Value::as_symbol)
        .is_some_and(|s| s.namespace().is_none() && s.name() == name)
}

/// The argument of an `(unquote x)` form, if `form` is one.
fn unquote_arg(form: &Value) -> Option<Value> {
    if head_is(form, "unquote") {
        Some(second_or_nil(form))
    } else {
        None
    }
}

/// The argument of an `(unquote-splicing x)` form, if `form` is one.
fn unquote_splicing_arg(form: &Value) -> Option<Value> {
    if head_is(form, "unquote-splicing") {
        Some(second_or_nil(form))
    } else {
        None
    }
}

fn second_or_nil(form: &Value) -> Value {
    form.as_list()
        .and_then(|items| items.get(1))
        .cloned()
        .unwrap_or(Value::Nil)
}
