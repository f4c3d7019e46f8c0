//! Canonical source rendering.
//!
//! `Display` on a value prints the source text that would rebuild it. Error
//! messages embed this text, and the debug summary of an assignment uses it
//! for the "X is now Y" lines.

use std::fmt::{self, Write};

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::ensure_sufficient_stack(|| match self {
            Value::Number(n) => write_number(f, *n),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write_quoted(f, s),
            Value::Array(items) => write_call(f, "a", items.iter()),
            Value::Dataset(items) => write_call(f, "ds", items.iter()),
            Value::Datamap(map) => {
                f.write_str("(dm:")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    write_quoted(f, key)?;
                    write!(f, ", {value}")?;
                }
                f.write_char(')')
            }
            Value::Datatype(d) => write!(f, "{d}"),
            Value::TypedVar(tv) => write!(f, "{tv}"),
            Value::StringPattern(p) => write!(f, "{p}"),
            Value::Changer(c) => write!(f, "{c}"),
            Value::Colour(c) => write!(f, "{c}"),
            Value::Gradient(g) => write!(f, "{g}"),
            Value::Lambda(l) => write!(f, "{l}"),
            Value::Macro(m) => write!(f, "{m}"),
            Value::CodeHook(h) => write!(f, "{h}"),
            Value::Command(c) => write!(f, "{c}"),
            Value::Spreader(inner) => write!(f, "...{inner}"),
            Value::Determined(d) => write!(f, "{} {}", d.determiner.phrase(), d.sequence),
            Value::Error(err) => write!(f, "(error: {})", quote(&err.message)),
        })
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    // -0 renders as 0
    if n == 0.0 {
        f.write_char('0')
    } else {
        write!(f, "{n}")
    }
}

/// Render `(name: a, b, c)` or `(name:)` when there are no arguments.
pub(crate) fn write_call<'a, T: fmt::Display + 'a>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    args: impl Iterator<Item = &'a T>,
) -> fmt::Result {
    write!(f, "({name}:")?;
    for (i, arg) in args.enumerate() {
        f.write_str(if i == 0 { " " } else { ", " })?;
        write!(f, "{arg}")?;
    }
    f.write_char(')')
}

pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Double-quoted, escaped string literal.
pub(crate) fn quote(s: &str) -> String {
    struct Quoted<'a>(&'a str);
    impl fmt::Display for Quoted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_quoted(f, self.0)
        }
    }
    Quoted(s).to_string()
}
