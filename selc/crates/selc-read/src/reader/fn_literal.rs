//! Anonymous function literals: `#(...)` and `%` arguments.
//!
//! Reading `#(...)` installs an argument environment, pushes the `(`
//! back, and reads the body as an ordinary list; `%` occurrences inside
//! register positional (or rest) parameters in that environment. The
//! parameter vector is synthesized afterwards from the highest index
//! seen.

use std::collections::BTreeMap;

use selc_val::{next_id, Symbol, Value};

use crate::error::{ReadError, ReadResult};
use crate::reader::{is_macro_terminating, is_whitespace, ReadOutcome, Reader};

impl Reader<'_> {
    /// `#(...)`; the `(` is already consumed and gets pushed back.
    pub(crate) fn read_fn_literal(&mut self) -> ReadResult<ReadOutcome> {
        if self.arg_env.is_some() {
            return Err(ReadError::NestedFnLiteral);
        }
        self.arg_env = Some(BTreeMap::new());
        self.src.unread('(');
        let result = self.read_form();
        // The environment comes off on every exit path, error included.
        let env = self.arg_env.take().unwrap_or_default();
        let body = result?;

        let highest = env.keys().copied().filter(|k| *k > 0).max().unwrap_or(0);
        let mut params = Vec::new();
        for i in 1..=highest {
            let param = env.get(&i).cloned().unwrap_or_else(|| arg_symbol(i));
            params.push(Value::Sym(param));
        }
        if let Some(rest) = env.get(&-1) {
            params.push(Value::symbol("&"));
            params.push(Value::Sym(rest.clone()));
        }
        Ok(ReadOutcome::Produced(Value::list(vec![
            Value::symbol("fn*"),
            Value::vector(params),
            body,
        ])))
    }

    /// `%`, `%N`, `%&`. Outside `#(...)` a `%`-led token is an ordinary
    /// symbol.
    pub(crate) fn read_arg(&mut self, ch: char) -> ReadResult<ReadOutcome> {
        if self.arg_env.is_none() {
            return self.read_symbol_value(ch).map(ReadOutcome::Produced);
        }
        match self.src.read_char() {
            None => self.register_arg(1).map(ReadOutcome::Produced),
            Some(next) if is_whitespace(next) || is_macro_terminating(next) => {
                self.src.unread(next);
                self.register_arg(1).map(ReadOutcome::Produced)
            }
            Some(next) => {
                self.src.unread(next);
                let form = self.read_form()?;
                match form {
                    Value::Sym(ref s) if s.namespace().is_none() && s.name() == "&" => {
                        self.register_arg(-1).map(ReadOutcome::Produced)
                    }
                    Value::Int(n) if n >= 0 => {
                        let n = i32::try_from(n).map_err(|_| ReadError::InvalidArgLiteral)?;
                        self.register_arg(n).map(ReadOutcome::Produced)
                    }
                    _ => Err(ReadError::InvalidArgLiteral),
                }
            }
        }
    }

    /// Returns the symbol bound to argument `n`, allocating one on first
    /// sight.
    fn register_arg(&mut self, n: i32) -> ReadResult<Value> {
        let env = self
            .arg_env
            .as_mut()
            .ok_or(ReadError::ArgLiteralOutsideFn)?;
        if let Some(existing) = env.get(&n) {
            return Ok(Value::Sym(existing.clone()));
        }
        let sym = arg_symbol(n);
        env.insert(n, sym.clone());
        Ok(Value::Sym(sym))
    }
}

/// `p<N>__<id>#` for positionals, `rest__<id>#` for the rest argument.
fn arg_symbol(n: i32) -> Symbol {
    if n == -1 {
        Symbol::intern(&format!("rest__{}#", next_id()))
    } else {
        Symbol::intern(&format!("p{}__{}#", n, next_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_string;

    /// Splits a read `(fn* [params...] body)` into params and body.
    fn fn_parts(source: &str) -> (Vec<Value>, Value) {
        let form = read_string(source).unwrap();
        let items = form.as_list().expect("fn* form").to_vec();
        assert_eq!(items[0], Value::symbol("fn*"));
        let params = items[1].as_vector().expect("param vector").to_vec();
        (params, items[2].clone())
    }

    #[test]
    fn test_single_implicit_arg() {
        let (params, body) = fn_parts("#(inc %)");
        assert_eq!(params.len(), 1);
        let body_items = body.as_list().unwrap();
        assert_eq!(body_items[0], Value::symbol("inc"));
        assert_eq!(body_items[1], params[0]);
    }

    #[test]
    fn test_two_positional_args() {
        let (params, body) = fn_parts("#(+ % %2)");
        assert_eq!(params.len(), 2);
        let body_items = body.as_list().unwrap();
        assert_eq!(body_items[1], params[0]);
        assert_eq!(body_items[2], params[1]);
        // %1 and % name the same parameter.
        let (params2, body2) = fn_parts("#(+ %1 %)");
        assert_eq!(params2.len(), 1);
        let body2_items = body2.as_list().unwrap();
        assert_eq!(body2_items[1], body2_items[2]);
    }

    #[test]
    fn test_gap_filled_with_fresh_params() {
        // %3 alone still yields three positional parameters.
        let (params, body) = fn_parts("#(f %3)");
        assert_eq!(params.len(), 3);
        let body_items = body.as_list().unwrap();
        assert_eq!(body_items[1], params[2]);
        assert_ne!(params[0], params[1]);
    }

    #[test]
    fn test_rest_arg() {
        let (params, body) = fn_parts("#(apply f % %&)");
        assert_eq!(params.len(), 3);
        assert_eq!(params[1], Value::symbol("&"));
        let body_items = body.as_list().unwrap();
        assert_eq!(body_items[2], params[0]);
        assert_eq!(body_items[3], params[2]);
    }

    #[test]
    fn test_rest_only() {
        let (params, _body) = fn_parts("#(count %&)");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], Value::symbol("&"));
    }

    #[test]
    fn test_param_names_look_gensymmed() {
        let (params, _body) = fn_parts("#(+ % %2)");
        let first = params[0].as_symbol().unwrap();
        assert!(first.name().starts_with("p1__"));
        assert!(first.name().ends_with('#'));
    }

    #[test]
    fn test_nested_fn_literal_rejected() {
        assert_eq!(read_string("#( #(%) )"), Err(ReadError::NestedFnLiteral));
    }

    #[test]
    fn test_env_cleared_after_error() {
        // A failed #() must not leave the environment behind; a later
        // #() in the same reader works.
        let resolver = crate::NsResolver::default();
        let mut reader =
            crate::Reader::new("#(f ] ) #(inc %)", &resolver, crate::default_registry());
        assert_eq!(reader.read(), Err(ReadError::UnmatchedDelimiter(']')));
        // The orphaned closer is still in the stream.
        assert_eq!(reader.read(), Err(ReadError::UnmatchedDelimiter(')')));
        let next = reader.read().unwrap().expect("second form");
        assert_eq!(next.as_list().unwrap()[0], Value::symbol("fn*"));
    }

    #[test]
    fn test_percent_outside_fn_is_a_symbol() {
        assert_eq!(read_string("%").unwrap(), Value::symbol("%"));
        assert_eq!(read_string("%foo").unwrap(), Value::symbol("%foo"));
    }

    #[test]
    fn test_bad_arg_literal() {
        assert_eq!(read_string("#(f %x)"), Err(ReadError::InvalidArgLiteral));
        assert_eq!(read_string("#(f %-1)"), Err(ReadError::InvalidArgLiteral));
    }

    #[test]
    fn test_arg_zero_registers_but_adds_no_param() {
        let (params, _body) = fn_parts("#(f %0)");
        assert!(params.is_empty());
    }
}
