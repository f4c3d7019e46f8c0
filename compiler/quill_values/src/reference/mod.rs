//! References: handles to storage locations.
//!
//! A [`VarRef`] names a variable and, optionally, a chain of accessors into
//! the value it holds (`$a's 2nd`, `$map's "key"`, `$a's 2ndto4th`). Reads
//! and writes go through a [`Storage`]; values are immutable, so a write to
//! a nested location rebuilds the variable's value along the chain and
//! stores the new root.

mod property;

use std::fmt;

use crate::datatype::DatatypeName;
use crate::errors::{cannot_store, contains_error, EvalError, EvalResult};
use crate::pattern::matches;
use crate::value::Value;

pub(crate) use property::get_property;

/// Which variable namespace a reference points into.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarScope {
    /// `$name`: lives for the whole story; unset variables read as 0.
    Story,
    /// `_name`: lives for the enclosing hook; unset variables are an error.
    Temp,
}

impl VarScope {
    pub fn sigil(self) -> char {
        match self {
            VarScope::Story => '$',
            VarScope::Temp => '_',
        }
    }
}

/// One step into a nested value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Accessor {
    /// One-based position; negative positions count from the end.
    Index(i64),
    /// Datamap name, or the read-only `length` of a string or array.
    Key(String),
    /// One-based positions `start..end`, end exclusive.
    Slice { start: usize, end: usize },
}

/// Handle to a variable or a location inside one.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct VarRef {
    pub scope: VarScope,
    pub name: String,
    pub chain: Vec<Accessor>,
}

/// Operations storage must provide. `quill_eval::VariableStore` is the
/// concrete implementation; tests use small in-memory ones.
pub trait Storage {
    /// Current value of a variable, if it has one.
    fn lookup(&self, scope: VarScope, name: &str) -> Option<Value>;

    /// Store a value. Validation has already happened.
    fn assign(&mut self, scope: VarScope, name: &str, value: Value);

    /// Forget a variable's value.
    fn remove(&mut self, scope: VarScope, name: &str);

    /// Standing type constraint of a variable, if one was defined.
    fn constraint(&self, scope: VarScope, name: &str) -> Option<Value>;

    /// Install a standing type constraint.
    fn define_constraint(&mut self, scope: VarScope, name: &str, pattern: Value) -> EvalResult<()>;

    /// Give a variable a fresh, empty slot in the innermost scope, shadowing
    /// any outer variable of the same name.
    fn declare(&mut self, scope: VarScope, name: &str);
}

impl VarRef {
    pub fn story(name: impl Into<String>) -> Self {
        VarRef {
            scope: VarScope::Story,
            name: name.into(),
            chain: Vec::new(),
        }
    }

    pub fn temp(name: impl Into<String>) -> Self {
        VarRef {
            scope: VarScope::Temp,
            name: name.into(),
            chain: Vec::new(),
        }
    }

    /// Address one more level down.
    #[must_use]
    pub fn deepen(&self, accessor: Accessor) -> VarRef {
        let mut deeper = self.clone();
        deeper.chain.push(accessor);
        deeper
    }

    /// Whether this names a whole variable rather than a location inside one.
    pub fn is_variable(&self) -> bool {
        self.chain.is_empty()
    }

    /// The whole variable this reference lives in.
    pub fn root(&self) -> VarRef {
        VarRef {
            scope: self.scope,
            name: self.name.clone(),
            chain: Vec::new(),
        }
    }

    /// Current value at this location.
    pub fn get(&self, store: &dyn Storage) -> EvalResult {
        let root = self.root_value(store)?;
        self.chain
            .iter()
            .try_fold(root, |value, accessor| get_property(&value, accessor))
    }

    fn root_value(&self, store: &dyn Storage) -> EvalResult {
        match (store.lookup(self.scope, &self.name), self.scope) {
            (Some(value), _) => Ok(value),
            (None, VarScope::Story) => Ok(Value::Number(0.0)),
            (None, VarScope::Temp) => Err(EvalError::property(format!(
                "There isn't a temp variable named _{} in this place.",
                self.name
            ))
            .with_explanation(
                "Temp variables only exist inside the same passage and hook in which they're created.",
            )),
        }
    }

    /// Store `value` at this location.
    ///
    /// The variable's new value is checked against its standing type
    /// constraint before anything is written, so a failed set leaves
    /// storage as it was.
    pub fn set(&self, store: &mut dyn Storage, value: Value) -> EvalResult<()> {
        contains_error(&[&value])?;
        if let Some(unstorable) = value.first_unstorable() {
            return Err(cannot_store(unstorable));
        }

        let new_root = if self.chain.is_empty() {
            value.clone()
        } else {
            let root = self.root_value(store)?;
            property::set_path(&root, &self.chain, value.clone())?
        };

        if let Some(constraint) = store.constraint(self.scope, &self.name) {
            let is_const = matches!(&constraint, Value::Datatype(d) if d.name == DatatypeName::Const);
            if is_const && store.lookup(self.scope, &self.name).is_some() {
                return Err(EvalError::operation(format!(
                    "I can't set {self} to {} because {} is a constant, and already has a value.",
                    value.object_name(),
                    self.root()
                )));
            }
            if !matches(&new_root, &constraint) {
                let mut err = EvalError::operation(format!(
                    "I can't set {self} to {} because {} is restricted to {constraint}-type data.",
                    value.object_name(),
                    self.root()
                ));
                if !self.chain.is_empty() {
                    err = err.with_detail(format!("{} would become {new_root}", self.root()));
                }
                return Err(err);
            }
        }

        tracing::trace!(reference = %self, "storing value");
        store.assign(self.scope, &self.name, new_root);
        Ok(())
    }

    /// Remove the value at this location. Standing constraints are not
    /// consulted.
    pub fn delete(&self, store: &mut dyn Storage) -> EvalResult<()> {
        if self.chain.is_empty() {
            store.remove(self.scope, &self.name);
            return Ok(());
        }
        let root = self.root_value(store)?;
        let new_root = property::delete_path(&root, &self.chain)?;
        store.assign(self.scope, &self.name, new_root);
        Ok(())
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.scope.sigil(), self.name)?;
        for accessor in &self.chain {
            f.write_str("'s ")?;
            match accessor {
                Accessor::Index(i) => f.write_str(&ordinal(*i))?,
                Accessor::Key(key) if is_plain_name(key) => f.write_str(key)?,
                Accessor::Key(key) => write!(f, "{}", Value::string(key.as_str()))?,
                Accessor::Slice { start, end } => {
                    let first = i64::try_from(*start).unwrap_or(i64::MAX);
                    let last = i64::try_from(*end).unwrap_or(i64::MAX) - 1;
                    write!(f, "{}to{}", ordinal(first), ordinal(last))?;
                }
            }
        }
        Ok(())
    }
}

fn is_plain_name(key: &str) -> bool {
    !key.is_empty()
        && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        && !key.starts_with(|c: char| c.is_ascii_digit())
}

/// English ordinal for a one-based position: `1st`, `12th`, `last`,
/// `2ndlast`.
pub fn ordinal(n: i64) -> String {
    if n == -1 {
        return "last".to_string();
    }
    if n < -1 {
        return format!("{}last", ordinal(-n));
    }
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// An operand that may still be a reference.
///
/// Destructuring needs the reference itself, not just its value, so that
/// it can address parts of the source and later delete them.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Value(Value),
    Ref(VarRef),
}

impl Operand {
    /// Fetch the current value.
    pub fn resolve(&self, store: &dyn Storage) -> EvalResult {
        match self {
            Operand::Value(value) => Ok(value.clone()),
            Operand::Ref(var_ref) => var_ref.get(store),
        }
    }

    pub fn as_var_ref(&self) -> Option<&VarRef> {
        match self {
            Operand::Ref(var_ref) => Some(var_ref),
            Operand::Value(_) => None,
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<VarRef> for Operand {
    fn from(var_ref: VarRef) -> Self {
        Operand::Ref(var_ref)
    }
}
