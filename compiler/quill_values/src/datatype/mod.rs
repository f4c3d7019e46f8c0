//! Datatypes: named predicates over values.
//!
//! Every datatype name maps to exactly one predicate. Synonyms ("number",
//! "string", "color", …) are folded to a canonical [`DatatypeName`] when the
//! datatype is created, so equality and lookup never see the long forms.
//!
//! The predicate table is a static `match`; it is never extended at runtime.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::value::Value;

/// Canonical datatype names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DatatypeName {
    // Collections
    Array,
    Dm,
    Ds,
    // Domain objects
    Datatype,
    Changer,
    Colour,
    Gradient,
    Lambda,
    Macro,
    CodeHook,
    Command,
    // Primitives
    Str,
    Num,
    Bool,
    // Numeric refinements
    Even,
    Odd,
    Int,
    // Sizes
    Empty,
    // Single characters
    Uppercase,
    Lowercase,
    Anycase,
    Whitespace,
    Digit,
    Alnum,
    Linebreak,
    // Universal
    Any,
    Const,
}

/// Canonical names, in declaration order.
const NAMES: &[(DatatypeName, &str)] = &[
    (DatatypeName::Array, "array"),
    (DatatypeName::Dm, "dm"),
    (DatatypeName::Ds, "ds"),
    (DatatypeName::Datatype, "datatype"),
    (DatatypeName::Changer, "changer"),
    (DatatypeName::Colour, "colour"),
    (DatatypeName::Gradient, "gradient"),
    (DatatypeName::Lambda, "lambda"),
    (DatatypeName::Macro, "macro"),
    (DatatypeName::CodeHook, "codehook"),
    (DatatypeName::Command, "command"),
    (DatatypeName::Str, "str"),
    (DatatypeName::Num, "num"),
    (DatatypeName::Bool, "bool"),
    (DatatypeName::Even, "even"),
    (DatatypeName::Odd, "odd"),
    (DatatypeName::Int, "int"),
    (DatatypeName::Empty, "empty"),
    (DatatypeName::Uppercase, "uppercase"),
    (DatatypeName::Lowercase, "lowercase"),
    (DatatypeName::Anycase, "anycase"),
    (DatatypeName::Whitespace, "whitespace"),
    (DatatypeName::Digit, "digit"),
    (DatatypeName::Alnum, "alnum"),
    (DatatypeName::Linebreak, "linebreak"),
    (DatatypeName::Any, "any"),
    (DatatypeName::Const, "const"),
];

/// Long-form names and their canonical short forms.
const SYNONYMS: &[(&str, DatatypeName)] = &[
    ("datamap", DatatypeName::Dm),
    ("dataset", DatatypeName::Ds),
    ("number", DatatypeName::Num),
    ("string", DatatypeName::Str),
    ("color", DatatypeName::Colour),
    ("boolean", DatatypeName::Bool),
    ("integer", DatatypeName::Int),
    ("newline", DatatypeName::Linebreak),
    ("alphanumeric", DatatypeName::Alnum),
];

impl DatatypeName {
    /// All canonical names.
    pub fn all() -> impl Iterator<Item = DatatypeName> {
        NAMES.iter().map(|(name, _)| *name)
    }

    /// Canonical source name.
    pub fn as_str(self) -> &'static str {
        NAMES
            .iter()
            .find(|(name, _)| *name == self)
            .map_or("any", |(_, s)| s)
    }

    /// Look up a name or synonym, case-insensitively.
    pub fn from_name(name: &str) -> Option<DatatypeName> {
        let lower = name.to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(_, s)| *s == lower)
            .map(|(name, _)| *name)
            .or_else(|| {
                SYNONYMS
                    .iter()
                    .find(|(s, _)| *s == lower)
                    .map(|(_, name)| *name)
            })
    }

    /// Datatypes that classify single characters of a string. These are the
    /// only ones that can repeat inside a string pattern.
    pub fn is_character_class(self) -> bool {
        matches!(
            self,
            DatatypeName::Uppercase
                | DatatypeName::Lowercase
                | DatatypeName::Anycase
                | DatatypeName::Whitespace
                | DatatypeName::Digit
                | DatatypeName::Alnum
                | DatatypeName::Linebreak
        )
    }

    /// The predicate this name stands for.
    pub fn predicate(self) -> fn(&Value) -> bool {
        match self {
            DatatypeName::Array => |v| matches!(v, Value::Array(_)),
            DatatypeName::Dm => |v| matches!(v, Value::Datamap(_)),
            DatatypeName::Ds => |v| matches!(v, Value::Dataset(_)),
            DatatypeName::Datatype => |v| matches!(v, Value::Datatype(_)),
            DatatypeName::Changer => |v| matches!(v, Value::Changer(_)),
            DatatypeName::Colour => |v| matches!(v, Value::Colour(_)),
            DatatypeName::Gradient => |v| matches!(v, Value::Gradient(_)),
            DatatypeName::Lambda => |v| matches!(v, Value::Lambda(_)),
            DatatypeName::Macro => |v| matches!(v, Value::Macro(_)),
            DatatypeName::CodeHook => |v| matches!(v, Value::CodeHook(_)),
            DatatypeName::Command => |v| matches!(v, Value::Command(_)),
            DatatypeName::Str => |v| matches!(v, Value::Str(_)),
            DatatypeName::Num => |v| matches!(v, Value::Number(_)),
            DatatypeName::Bool => |v| matches!(v, Value::Bool(_)),
            DatatypeName::Even => |v| v.as_number().is_some_and(|n| n.abs().floor() % 2.0 == 0.0),
            DatatypeName::Odd => |v| v.as_number().is_some_and(|n| n.abs().floor() % 2.0 == 1.0),
            DatatypeName::Int => |v| v.as_number().is_some_and(|n| n.fract() == 0.0),
            DatatypeName::Empty => |v| v.length() == Some(0),
            DatatypeName::Uppercase => |v| single_char(v).is_some_and(is_uppercase),
            DatatypeName::Lowercase => |v| single_char(v).is_some_and(is_lowercase),
            DatatypeName::Anycase => {
                |v| single_char(v).is_some_and(|c| is_uppercase(c) || is_lowercase(c))
            }
            DatatypeName::Whitespace => {
                |v| single_char(v).is_some_and(|c| c.is_whitespace() && !is_linebreak(c))
            }
            DatatypeName::Digit => |v| single_char(v).is_some_and(|c| c.is_ascii_digit()),
            DatatypeName::Alnum => |v| single_char(v).is_some_and(char::is_alphanumeric),
            DatatypeName::Linebreak => {
                |v| matches!(v.as_str(), Some("\n" | "\r" | "\r\n" | "\u{2028}" | "\u{2029}"))
            }
            DatatypeName::Any | DatatypeName::Const => |_| true,
        }
    }
}

fn single_char(value: &Value) -> Option<char> {
    let mut chars = value.as_str()?.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// Lowercasing changes it.
fn is_uppercase(c: char) -> bool {
    c.to_lowercase().ne(std::iter::once(c))
}

/// Uppercasing changes it.
fn is_lowercase(c: char) -> bool {
    c.to_uppercase().ne(std::iter::once(c))
}

fn is_linebreak(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl fmt::Display for DatatypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A datatype value. `rest` marks the spread form (`...num`), which matches
/// a run of zero or more elements instead of exactly one.
#[derive(Copy, Clone, Debug)]
pub struct Datatype {
    pub name: DatatypeName,
    pub rest: bool,
}

impl Datatype {
    /// Create a datatype from a source name, folding synonyms.
    pub fn create(name: &str, rest: bool) -> Option<Datatype> {
        DatatypeName::from_name(name).map(|name| Datatype { name, rest })
    }

    pub fn new(name: DatatypeName, rest: bool) -> Datatype {
        Datatype { name, rest }
    }

    /// The plain, single-element form.
    pub fn single(name: DatatypeName) -> Datatype {
        Datatype { name, rest: false }
    }

    /// The spread form.
    pub fn spread(name: DatatypeName) -> Datatype {
        Datatype { name, rest: true }
    }

    /// Copy of this datatype with the rest flag set.
    #[must_use]
    pub fn as_rest(self) -> Datatype {
        Datatype { rest: true, ..self }
    }

    /// Copy of this datatype with the rest flag cleared.
    #[must_use]
    pub fn as_single(self) -> Datatype {
        Datatype { rest: false, ..self }
    }

    /// Run the predicate. The rest flag plays no part here; sequences
    /// handle it.
    pub fn is_type_of(self, value: &Value) -> bool {
        (self.name.predicate())(value)
    }
}

impl PartialEq for Datatype {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Datatype {}

impl Hash for Datatype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest {
            f.write_str("...")?;
        }
        f.write_str(self.name.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
