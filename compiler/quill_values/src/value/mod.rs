//! Runtime values for the Quill story language.
//!
//! # Heap Enforcement
//!
//! Every boxed payload goes through a factory method on `Value`. The
//! `Heap<T>` wrapper has a private constructor, so outside code cannot build
//! heap values directly:
//!
//! ```text
//! let s = Value::string("hello");                      // OK
//! let list = Value::array(vec![Value::Number(1.0)]);   // OK
//! let s = Value::Str(Heap::new(...));                  // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Equality
//!
//! `PartialEq` is the language's structural `is`: arrays compare
//! element-wise, datamaps and datasets ignore ordering, datatypes compare by
//! canonical name only, and domain objects compare by content.

mod determined;
mod domain;
mod heap;
mod source;

use std::collections::BTreeMap;

pub use determined::{Determined, Determiner};
pub use domain::{ChangerCall, Changer, CodeHook, Colour, Command, CustomMacro, Gradient, GradientStop, Lambda};
pub use heap::Heap;

use crate::datatype::Datatype;
use crate::errors::EvalError;
use crate::string_pattern::StringPattern;
use crate::typed_var::TypedVar;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    // Primitives
    /// Number (always finite).
    Number(f64),
    /// Boolean.
    Bool(bool),
    /// String.
    Str(Heap<String>),

    // Collections
    /// Ordered sequence.
    Array(Heap<Vec<Value>>),
    /// Key-unique map. Kept sorted so rendering is canonical.
    Datamap(Heap<BTreeMap<String, Value>>),
    /// Unique-element set, in insertion order.
    Dataset(Heap<Vec<Value>>),

    // Patterns
    /// Named type predicate.
    Datatype(Datatype),
    /// Pattern bound to a variable.
    TypedVar(Heap<TypedVar>),
    /// Substring pattern over strings.
    StringPattern(Heap<StringPattern>),

    // Domain objects
    /// Hook-styling changer (or a composed chain of them).
    Changer(Heap<Changer>),
    /// RGBA colour.
    Colour(Colour),
    /// Linear gradient.
    Gradient(Heap<Gradient>),
    /// Lambda, kept as its source.
    Lambda(Heap<Lambda>),
    /// Custom macro.
    Macro(Heap<CustomMacro>),
    /// Code hook.
    CodeHook(Heap<CodeHook>),
    /// Command (carries the command tag).
    Command(Heap<Command>),

    // Unstorable wrappers
    /// Sequence awaiting spread-expansion.
    Spreader(Heap<Value>),
    /// Sequence tagged with a determiner (`some of`, `start of`, …).
    Determined(Heap<Determined>),

    /// Error carried as data.
    Error(Heap<EvalError>),
}

/// Primitive kind of a value, as seen by strictly-typed operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Number,
    String,
    Boolean,
    Object,
}

impl PrimitiveKind {
    /// Plural noun used in messages ("numbers", "booleans").
    pub fn plural(self) -> &'static str {
        match self {
            PrimitiveKind::Number => "numbers",
            PrimitiveKind::String => "strings",
            PrimitiveKind::Boolean => "booleans",
            PrimitiveKind::Object => "objects",
        }
    }
}

/// Collection kind of a value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CollectionKind {
    Array,
    Datamap,
    Dataset,
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Create a datamap value.
    #[inline]
    pub fn datamap(entries: BTreeMap<String, Value>) -> Self {
        Value::Datamap(Heap::new(entries))
    }

    /// Create a datamap from name/value pairs; later pairs win.
    pub fn datamap_from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Value::datamap(pairs.into_iter().collect())
    }

    /// Create a dataset, dropping structurally-equal duplicates.
    pub fn dataset(items: Vec<Value>) -> Self {
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Dataset(Heap::new(unique))
    }

    /// Wrap a typed variable.
    #[inline]
    pub fn typed_var(tv: TypedVar) -> Self {
        Value::TypedVar(Heap::new(tv))
    }

    /// Wrap a string pattern.
    #[inline]
    pub fn string_pattern(pattern: StringPattern) -> Self {
        Value::StringPattern(Heap::new(pattern))
    }

    /// Wrap a changer.
    #[inline]
    pub fn changer(changer: Changer) -> Self {
        Value::Changer(Heap::new(changer))
    }

    /// Wrap a gradient.
    #[inline]
    pub fn gradient(gradient: Gradient) -> Self {
        Value::Gradient(Heap::new(gradient))
    }

    /// Wrap a lambda.
    #[inline]
    pub fn lambda(lambda: Lambda) -> Self {
        Value::Lambda(Heap::new(lambda))
    }

    /// Wrap a custom macro.
    #[inline]
    pub fn custom_macro(mac: CustomMacro) -> Self {
        Value::Macro(Heap::new(mac))
    }

    /// Wrap a code hook.
    #[inline]
    pub fn code_hook(hook: CodeHook) -> Self {
        Value::CodeHook(Heap::new(hook))
    }

    /// Wrap a command.
    #[inline]
    pub fn command(command: Command) -> Self {
        Value::Command(Heap::new(command))
    }

    /// Wrap a sequence for spread-expansion.
    #[inline]
    pub fn spreader(inner: Value) -> Self {
        Value::Spreader(Heap::new(inner))
    }

    /// Wrap a determined sequence.
    #[inline]
    pub fn determined(determined: Determined) -> Self {
        Value::Determined(Heap::new(determined))
    }

    /// Carry an error as data.
    #[inline]
    pub fn error(err: EvalError) -> Self {
        Value::Error(Heap::new(err))
    }
}

// Accessors

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_datamap(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Datamap(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_datatype(&self) -> Option<Datatype> {
        match self {
            Value::Datatype(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_typed_var(&self) -> Option<&TypedVar> {
        match self {
            Value::TypedVar(tv) => Some(tv),
            _ => None,
        }
    }

    pub fn as_determined(&self) -> Option<&Determined> {
        match self {
            Value::Determined(d) => Some(d),
            _ => None,
        }
    }

    /// Size of a string (in characters), array, datamap or dataset.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Array(items) | Value::Dataset(items) => Some(items.len()),
            Value::Datamap(map) => Some(map.len()),
            _ => None,
        }
    }

    /// The values a sequence holds: array items, dataset items, or the
    /// characters of a string. `None` for anything else.
    pub fn sequence_items(&self) -> Option<Vec<Value>> {
        match self {
            Value::Array(items) | Value::Dataset(items) => Some(items.to_vec()),
            Value::Str(s) => Some(s.chars().map(|c| Value::string(c)).collect()),
            _ => None,
        }
    }
}

// Classification

impl Value {
    /// Short type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Datamap(_) => "datamap",
            Value::Dataset(_) => "dataset",
            Value::Datatype(_) => "datatype",
            Value::TypedVar(_) => "typed variable",
            Value::StringPattern(_) => "string pattern",
            Value::Changer(_) => "changer",
            Value::Colour(_) => "colour",
            Value::Gradient(_) => "gradient",
            Value::Lambda(_) => "lambda",
            Value::Macro(_) => "custom macro",
            Value::CodeHook(_) => "code hook",
            Value::Command(_) => "command",
            Value::Spreader(_) => "spreader",
            Value::Determined(_) => "determined value",
            Value::Error(_) => "error",
        }
    }

    /// Primitive kind; everything that isn't a number, string or boolean is
    /// an object.
    pub fn primitive_kind(&self) -> PrimitiveKind {
        match self {
            Value::Number(_) => PrimitiveKind::Number,
            Value::Str(_) => PrimitiveKind::String,
            Value::Bool(_) => PrimitiveKind::Boolean,
            _ => PrimitiveKind::Object,
        }
    }

    pub fn collection_kind(&self) -> Option<CollectionKind> {
        match self {
            Value::Array(_) => Some(CollectionKind::Array),
            Value::Datamap(_) => Some(CollectionKind::Datamap),
            Value::Dataset(_) => Some(CollectionKind::Dataset),
            _ => None,
        }
    }

    /// Declared type name of a domain object; `None` for primitives and
    /// plain collections.
    pub fn domain_type_name(&self) -> Option<&'static str> {
        match self {
            Value::Number(_)
            | Value::Bool(_)
            | Value::Str(_)
            | Value::Array(_)
            | Value::Datamap(_)
            | Value::Dataset(_) => None,
            _ => Some(self.type_name()),
        }
    }

    /// Descriptive phrase used in error messages.
    pub fn object_name(&self) -> String {
        match self {
            Value::Number(_) => format!("the number {self}"),
            Value::Bool(b) => format!("the boolean value {b}"),
            Value::Str(s) if s.chars().count() > 48 => {
                format!("a string of {} characters", s.chars().count())
            }
            Value::Str(_) => format!("the string {self}"),
            Value::Array(items) => with_count("an array", "an empty array", items.len(), "item"),
            Value::Datamap(map) => with_count("a datamap", "an empty datamap", map.len(), "name"),
            Value::Dataset(items) => {
                with_count("a dataset", "an empty dataset", items.len(), "item")
            }
            Value::Datatype(d) => format!("the {d} datatype"),
            Value::TypedVar(tv) => format!("the typed variable name {tv}"),
            Value::StringPattern(_) => "a string pattern".to_string(),
            Value::Changer(c) => format!("a {} changer", c.describe()),
            Value::Colour(_) => "a colour".to_string(),
            Value::Gradient(_) => "a gradient".to_string(),
            Value::Lambda(_) => "a lambda".to_string(),
            Value::Macro(_) => "a custom macro".to_string(),
            Value::CodeHook(_) => "a code hook".to_string(),
            Value::Command(c) => format!("a ({}:) command", c.name),
            Value::Spreader(inner) => {
                let count = inner.length().unwrap_or(0);
                if count == 1 {
                    "1 spread value".to_string()
                } else {
                    format!("{count} spread values")
                }
            }
            Value::Determined(d) => format!("{} {}", d.determiner.phrase(), d.sequence.object_name()),
            Value::Error(_) => "an error".to_string(),
        }
    }

    /// First part of this value that can't be stored, if any. Spreaders,
    /// determined values, typed variables and errors are unstorable, and so
    /// is any collection or string pattern holding one.
    pub fn first_unstorable(&self) -> Option<&Value> {
        crate::ensure_sufficient_stack(|| match self {
            Value::Spreader(_) | Value::Determined(_) | Value::TypedVar(_) | Value::Error(_) => {
                Some(self)
            }
            Value::Array(items) | Value::Dataset(items) => {
                items.iter().find_map(Value::first_unstorable)
            }
            Value::Datamap(map) => map.values().find_map(Value::first_unstorable),
            Value::StringPattern(p) => p.parts().iter().find_map(Value::first_unstorable),
            _ => None,
        })
    }

    pub fn is_unstorable(&self) -> bool {
        self.first_unstorable().is_some()
    }
}

fn with_count(article: &str, empty: &str, count: usize, noun: &str) -> String {
    match count {
        0 => empty.to_string(),
        1 => format!("{article} (with 1 {noun})"),
        n => format!("{article} (with {n} {noun}s)"),
    }
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::ensure_sufficient_stack(|| match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Datamap(a), Value::Datamap(b)) => a == b,
            (Value::Dataset(a), Value::Dataset(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::Datatype(a), Value::Datatype(b)) => a == b,
            (Value::TypedVar(a), Value::TypedVar(b)) => a == b,
            (Value::StringPattern(a), Value::StringPattern(b)) => a == b,
            (Value::Changer(a), Value::Changer(b)) => a == b,
            (Value::Colour(a), Value::Colour(b)) => a == b,
            (Value::Gradient(a), Value::Gradient(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => a == b,
            (Value::Macro(a), Value::Macro(b)) => a == b,
            (Value::CodeHook(a), Value::CodeHook(b)) => a == b,
            (Value::Command(a), Value::Command(b)) => a == b,
            (Value::Spreader(a), Value::Spreader(b)) => a == b,
            (Value::Determined(a), Value::Determined(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a.kind == b.kind && a.message == b.message,
            _ => false,
        })
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Datatype> for Value {
    fn from(d: Datatype) -> Self {
        Value::Datatype(d)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
