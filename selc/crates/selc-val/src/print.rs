//! The canonical printer.
//!
//! `Display` for [`Value`] produces the textual form the reader accepts,
//! so printing and re-reading a value yields an equal value. Metadata is
//! not printed.

use std::fmt;

use crate::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}N", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::BigDec(x) => write!(f, "{:?}M", x),
            Value::Ratio(r) => write!(f, "{}", r),
            Value::Char(c) => write_char(f, *c),
            Value::Str(s) => write_string(f, s),
            Value::Sym(s) => write!(f, "{}", s),
            Value::Keyword(k) => write!(f, "{}", k),
            Value::List(l) => write_seq(f, "(", l.items(), ")"),
            Value::Vector(v) => write_seq(f, "[", v.items(), "]"),
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Set(s) => {
                f.write_str("#{")?;
                for (i, item) in s.items().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("}")
            }
            Value::Queue(q) => write_seq(f, "#queue [", q.items(), "]"),
            Value::Regex(r) => write!(f, "#\"{}\"", r.as_str()),
            Value::Inst(t) => write!(f, "#inst \"{}\"", t.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            Value::Uuid(u) => write!(f, "#uuid \"{}\"", u),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

fn write_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\n' => f.write_str("\\newline"),
        ' ' => f.write_str("\\space"),
        '\t' => f.write_str("\\tab"),
        '\u{8}' => f.write_str("\\backspace"),
        '\u{c}' => f.write_str("\\formfeed"),
        '\r' => f.write_str("\\return"),
        c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32),
        c => write!(f, "\\{}", c),
    }
}
