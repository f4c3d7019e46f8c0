//! Reading and rebuilding values one accessor at a time.

use std::collections::BTreeMap;

use super::{ordinal, Accessor};
use crate::errors::{capitalize, EvalError, EvalResult};
use crate::value::Value;

/// Zero-based position for a one-based (or negative, from-the-end) index.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let zero_based = if index > 0 { index - 1 } else { len + index };
    if index == 0 || zero_based < 0 || zero_based >= len {
        None
    } else {
        usize::try_from(zero_based).ok()
    }
}

fn slice_bounds(start: usize, end: usize, len: usize) -> (usize, usize) {
    let from = start.saturating_sub(1).min(len);
    let to = end.saturating_sub(1).clamp(from, len);
    (from, to)
}

#[cold]
fn too_few(value: &Value, index: i64) -> EvalError {
    EvalError::property(format!(
        "I can't get the {} of {} because it doesn't have that many.",
        ordinal(index),
        value.object_name()
    ))
}

#[cold]
fn no_data_name(value: &Value, key: &str) -> EvalError {
    EvalError::property(format!(
        "I can't find a {} data name in {}.",
        Value::string(key),
        value.object_name()
    ))
}

#[cold]
fn no_properties(value: &Value, accessor: &Accessor) -> EvalError {
    let what = match accessor {
        Accessor::Index(i) => ordinal(*i),
        Accessor::Key(key) => format!("{}", Value::string(key.as_str())),
        Accessor::Slice { .. } => "a range of positions".to_string(),
    };
    EvalError::property(format!(
        "{} doesn't have a {what} to get or change.",
        capitalize(&value.object_name())
    ))
}

/// Read one level down.
pub(crate) fn get_property(value: &Value, accessor: &Accessor) -> EvalResult {
    match (value, accessor) {
        (Value::Array(items), Accessor::Index(i)) => resolve_index(*i, items.len())
            .map(|pos| items[pos].clone())
            .ok_or_else(|| too_few(value, *i)),
        (Value::Str(s), Accessor::Index(i)) => {
            let chars: Vec<char> = s.chars().collect();
            resolve_index(*i, chars.len())
                .map(|pos| Value::string(chars[pos]))
                .ok_or_else(|| too_few(value, *i))
        }
        (Value::Array(_) | Value::Str(_), Accessor::Key(key)) if key == "length" => {
            let len = value.length().unwrap_or(0);
            Ok(Value::Number(len as f64))
        }
        (Value::Datamap(map), Accessor::Key(key)) => map
            .get(key)
            .cloned()
            .ok_or_else(|| no_data_name(value, key)),
        (Value::Array(items), Accessor::Slice { start, end }) => {
            let (from, to) = slice_bounds(*start, *end, items.len());
            Ok(Value::array(items[from..to].to_vec()))
        }
        (Value::Str(s), Accessor::Slice { start, end }) => {
            let chars: Vec<char> = s.chars().collect();
            let (from, to) = slice_bounds(*start, *end, chars.len());
            Ok(Value::string(chars[from..to].iter().collect::<String>()))
        }
        _ => Err(no_properties(value, accessor)),
    }
}

/// Copy of `container` with `new` stored at `accessor`.
fn set_property(container: &Value, accessor: &Accessor, new: Value) -> EvalResult {
    match (container, accessor) {
        (Value::Array(_) | Value::Str(_), Accessor::Key(key)) if key == "length" => {
            Err(EvalError::operation(format!(
                "I can't change the length of {}.",
                container.object_name()
            )))
        }
        (Value::Array(items), Accessor::Index(i)) => {
            let mut items = items.to_vec();
            if *i > 0 && usize::try_from(*i - 1).ok() == Some(items.len()) {
                items.push(new);
            } else {
                let pos = resolve_index(*i, items.len()).ok_or_else(|| too_few(container, *i))?;
                items[pos] = new;
            }
            Ok(Value::array(items))
        }
        (Value::Array(items), Accessor::Slice { start, end }) => {
            let Value::Array(replacement) = &new else {
                return Err(EvalError::operation(format!(
                    "I can only put an array into a range of an array, not {}.",
                    new.object_name()
                )));
            };
            let mut items = items.to_vec();
            let (from, to) = slice_bounds(*start, *end, items.len());
            items.splice(from..to, replacement.iter().cloned());
            Ok(Value::array(items))
        }
        (Value::Datamap(map), Accessor::Key(key)) => {
            let mut map: BTreeMap<String, Value> = (**map).clone();
            map.insert(key.clone(), new);
            Ok(Value::datamap(map))
        }
        (Value::Str(_), _) => Err(EvalError::operation(format!(
            "I can't change the characters of {} directly; make a new string instead.",
            container.object_name()
        ))),
        _ => Err(no_properties(container, accessor)),
    }
}

/// Copy of `container` without whatever is at `accessor`.
fn delete_property(container: &Value, accessor: &Accessor) -> EvalResult {
    match (container, accessor) {
        (Value::Array(items), Accessor::Index(i)) => {
            let pos = resolve_index(*i, items.len()).ok_or_else(|| too_few(container, *i))?;
            let mut items = items.to_vec();
            items.remove(pos);
            Ok(Value::array(items))
        }
        (Value::Array(items), Accessor::Slice { start, end }) => {
            let mut items = items.to_vec();
            let (from, to) = slice_bounds(*start, *end, items.len());
            items.drain(from..to);
            Ok(Value::array(items))
        }
        (Value::Str(s), Accessor::Index(i)) => {
            let mut chars: Vec<char> = s.chars().collect();
            let pos = resolve_index(*i, chars.len()).ok_or_else(|| too_few(container, *i))?;
            chars.remove(pos);
            Ok(Value::string(chars.into_iter().collect::<String>()))
        }
        (Value::Str(s), Accessor::Slice { start, end }) => {
            let mut chars: Vec<char> = s.chars().collect();
            let (from, to) = slice_bounds(*start, *end, chars.len());
            chars.drain(from..to);
            Ok(Value::string(chars.into_iter().collect::<String>()))
        }
        (Value::Datamap(map), Accessor::Key(key)) => {
            if !map.contains_key(key) {
                return Err(no_data_name(container, key));
            }
            let mut map: BTreeMap<String, Value> = (**map).clone();
            map.remove(key);
            Ok(Value::datamap(map))
        }
        _ => Err(no_properties(container, accessor)),
    }
}

/// Rebuild `root` with `new` stored at the end of `chain`.
pub(super) fn set_path(root: &Value, chain: &[Accessor], new: Value) -> EvalResult {
    match chain {
        [] => Ok(new),
        [last] => set_property(root, last, new),
        [first, rest @ ..] => {
            let child = get_property(root, first)?;
            let new_child = crate::ensure_sufficient_stack(|| set_path(&child, rest, new))?;
            set_property(root, first, new_child)
        }
    }
}

/// Rebuild `root` without whatever is at the end of `chain`.
pub(super) fn delete_path(root: &Value, chain: &[Accessor]) -> EvalResult {
    match chain {
        [] => Ok(root.clone()),
        [last] => delete_property(root, last),
        [first, rest @ ..] => {
            let child = get_property(root, first)?;
            let new_child = crate::ensure_sufficient_stack(|| delete_path(&child, rest))?;
            set_property(root, first, new_child)
        }
    }
}
