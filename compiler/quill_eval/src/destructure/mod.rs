//! Destructuring: unify a pattern with a source value.
//!
//! The pattern side of an assignment is a [`Target`]: a reference, a
//! pattern value (datatype, typed variable, string pattern or literal), or
//! an array/datamap of targets. [`destructure`] walks it against the
//! source and produces one [`Binding`] per reference or typed variable, in
//! left-to-right pattern order.
//!
//! When the source is a reference, every binding records the deepened
//! reference its value came from (`$a's 2nd`, `$a's 3rdto4th`), so a
//! `move` can delete it from the original container afterwards.
//!
//! Rest elements are greedy and never backtrack, matching `matches`.

use std::fmt;

use quill_values::{
    capitalize, is_composite_pattern, matches, rest_inner, Accessor, EvalError, EvalResult,
    Operand, Storage, TypedVar, Value, VarRef,
};

/// The destination side of an assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    /// A bare reference: always binds.
    Ref(VarRef),
    /// A pattern value: typed variable, datatype, string pattern or literal.
    Value(Value),
    /// Positional targets.
    Array(Vec<Target>),
    /// Targets by data name.
    Datamap(Vec<(String, Target)>),
}

impl Target {
    /// Array and datamap pattern values walk like their target forms.
    fn elements(&self) -> Option<Vec<Target>> {
        match self {
            Target::Array(items) => Some(items.clone()),
            Target::Value(Value::Array(items)) => {
                Some(items.iter().cloned().map(Target::Value).collect())
            }
            _ => None,
        }
    }

    fn entries(&self) -> Option<Vec<(String, Target)>> {
        match self {
            Target::Datamap(entries) => Some(entries.clone()),
            Target::Value(Value::Datamap(map)) => Some(
                map.iter()
                    .map(|(k, v)| (k.clone(), Target::Value(v.clone())))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Error carried anywhere inside the target.
    pub fn find_error(&self) -> EvalResult<()> {
        match self {
            Target::Ref(_) => Ok(()),
            Target::Value(value) => quill_values::contains_error(&[value]),
            Target::Array(items) => items.iter().try_for_each(Target::find_error),
            Target::Datamap(entries) => entries.iter().try_for_each(|(_, t)| t.find_error()),
        }
    }
}

impl From<VarRef> for Target {
    fn from(var_ref: VarRef) -> Self {
        Target::Ref(var_ref)
    }
}

impl From<Value> for Target {
    fn from(value: Value) -> Self {
        Target::Value(value)
    }
}

impl From<TypedVar> for Target {
    fn from(tv: TypedVar) -> Self {
        Target::Value(Value::typed_var(tv))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Ref(r) => write!(f, "{r}"),
            Target::Value(v) => write!(f, "{v}"),
            Target::Array(items) => {
                f.write_str("(a:")?;
                for (i, item) in items.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Target::Datamap(entries) => {
                f.write_str("(dm:")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    write!(f, "{}, {item}", Value::string(key.as_str()))?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Where a binding's value goes.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingTarget {
    Ref(VarRef),
    Typed(TypedVar),
}

impl BindingTarget {
    /// The reference that gets set.
    pub fn var_ref(&self) -> &VarRef {
        match self {
            BindingTarget::Ref(r) => r,
            BindingTarget::Typed(tv) => &tv.var_ref,
        }
    }
}

/// One resolved destination, its value, and where the value came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub dest: BindingTarget,
    pub value: Value,
    /// Location in the source the value was read from, when the source was
    /// a reference.
    pub src: Option<VarRef>,
}

/// Unify `target` with `source`.
///
/// Returns the bindings in left-to-right order, or `Ok(None)` when the
/// pattern doesn't fit and `required` is false. When `required` is true a
/// misfit is an `operation` error instead. Failing to read the source is
/// always an error.
pub fn destructure(
    target: &Target,
    source: &Operand,
    required: bool,
    store: &dyn Storage,
) -> EvalResult<Option<Vec<Binding>>> {
    let value = source.resolve(store)?;
    let mut walker = Walker {
        required,
        bindings: Vec::new(),
    };
    let fits = walker.walk(target, &value, source.as_var_ref())?;
    tracing::debug!(
        %target,
        fits,
        bindings = walker.bindings.len(),
        "destructured"
    );
    Ok(fits.then_some(walker.bindings))
}

struct Walker {
    required: bool,
    bindings: Vec<Binding>,
}

impl Walker {
    /// A structural misfit: an error when required, else `false`.
    fn misfit(&self, message: String) -> EvalResult<bool> {
        if self.required {
            Err(EvalError::operation(message))
        } else {
            Ok(false)
        }
    }

    fn bind(&mut self, dest: BindingTarget, value: &Value, src: Option<&VarRef>) {
        self.bindings.push(Binding {
            dest,
            value: value.clone(),
            src: src.cloned(),
        });
    }

    fn walk(&mut self, target: &Target, value: &Value, src: Option<&VarRef>) -> EvalResult<bool> {
        quill_values::ensure_sufficient_stack(|| {
            if let Target::Ref(var_ref) = target {
                self.bind(BindingTarget::Ref(var_ref.clone()), value, src);
                return Ok(true);
            }
            if let Some(targets) = target.elements() {
                return self.walk_array(target, &targets, value, src);
            }
            if let Some(entries) = target.entries() {
                return self.walk_map(target, &entries, value, src);
            }
            match target {
                Target::Value(pattern) => self.walk_pattern(pattern, value, src),
                _ => Ok(false),
            }
        })
    }

    fn walk_array(
        &mut self,
        target: &Target,
        targets: &[Target],
        value: &Value,
        src: Option<&VarRef>,
    ) -> EvalResult<bool> {
        let Value::Array(items) = value else {
            return self.misfit(format!(
                "I can't put {} into {target}, because it isn't an array.",
                value.object_name()
            ));
        };

        let mut v = 0;
        for (p, element) in targets.iter().enumerate() {
            let rest = match element {
                Target::Value(pattern) => rest_inner(pattern).map(|inner| (pattern, inner)),
                _ => None,
            };
            if let Some((pattern, inner)) = rest {
                let start = v;
                while v < items.len() && matches(&items[v], &inner) {
                    v += 1;
                }
                let run = Value::array(items[start..v].to_vec());
                let run_src = src.map(|r| {
                    r.deepen(Accessor::Slice {
                        start: start + 1,
                        end: v + 1,
                    })
                });
                if let Value::TypedVar(_) = pattern {
                    if !self.walk_pattern(pattern, &run, run_src.as_ref())? {
                        return Ok(false);
                    }
                }
                continue;
            }

            let Some(item) = items.get(v) else {
                let needed = targets[p..]
                    .iter()
                    .filter(|t| !matches!(t, Target::Value(pattern) if rest_inner(pattern).is_some()))
                    .count();
                return self.misfit(format!(
                    "I can't put {} into {target}, because it needs {needed} more value{}.",
                    value.object_name(),
                    if needed == 1 { "" } else { "s" }
                ));
            };
            let item_src = src.map(|r| r.deepen(Accessor::Index(position(v))));
            if !self.walk(element, item, item_src.as_ref())? {
                return Ok(false);
            }
            v += 1;
        }
        Ok(true)
    }

    fn walk_map(
        &mut self,
        target: &Target,
        entries: &[(String, Target)],
        value: &Value,
        src: Option<&VarRef>,
    ) -> EvalResult<bool> {
        let Value::Datamap(map) = value else {
            return self.misfit(format!(
                "I can't put {} into {target}, because it isn't a datamap.",
                value.object_name()
            ));
        };
        for (key, element) in entries {
            let Some(item) = map.get(key) else {
                return self.misfit(format!(
                    "I can't put {} into {target}, because it needs a {} data name.",
                    value.object_name(),
                    Value::string(key.as_str())
                ));
            };
            let item_src = src.map(|r| r.deepen(Accessor::Key(key.clone())));
            if !self.walk(element, item, item_src.as_ref())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn walk_pattern(&mut self, pattern: &Value, value: &Value, src: Option<&VarRef>) -> EvalResult<bool> {
        match pattern {
            Value::TypedVar(tv) => {
                let constraint = tv.constraint();
                let composite = is_composite_pattern(&tv.datatype) || tv.rest;
                if (composite || !self.required) && !matches(value, &constraint) {
                    return self.misfit(format!(
                        "{} doesn't match the pattern of {}.",
                        capitalize(&value.object_name()),
                        &**tv
                    ));
                }
                self.bind(BindingTarget::Typed((**tv).clone()), value, src);
                if !tv.rest && is_composite_pattern(&tv.datatype) {
                    return self.walk(&Target::Value(tv.datatype.clone()), value, src);
                }
                Ok(true)
            }
            _ => {
                if let Some(capable) = pattern.as_destructurable() {
                    let Some(captures) = capable.captures(value) else {
                        return self.misfit(format!(
                            "{} doesn't match the pattern {pattern}.",
                            capitalize(&value.object_name())
                        ));
                    };
                    for capture in captures {
                        self.bind(BindingTarget::Typed(capture.target), &capture.value, None);
                    }
                    return Ok(true);
                }
                if matches(value, pattern) {
                    Ok(true)
                } else {
                    self.misfit(format!(
                        "{} doesn't match the pattern {pattern}.",
                        capitalize(&value.object_name())
                    ))
                }
            }
        }
    }
}

/// One-based position of a zero-based index.
pub(crate) fn position(index: usize) -> i64 {
    i64::try_from(index).map_or(i64::MAX, |i| i + 1)
}
