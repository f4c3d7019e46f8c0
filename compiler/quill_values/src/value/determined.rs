//! Determined sequences: `some of X`, `all of X`, `start of X`, `end of X`.

use std::fmt;

use super::Value;
use crate::errors::{EvalError, EvalResult};

/// Quantifier attached to a sequence by a determiner expression.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Determiner {
    /// `some of`: holds for at least one element.
    Any,
    /// `all of`: holds for every element.
    All,
    /// `start of`: holds for some prefix.
    Start,
    /// `end of`: holds for some suffix.
    End,
}

impl Determiner {
    pub fn as_str(self) -> &'static str {
        match self {
            Determiner::Any => "any",
            Determiner::All => "all",
            Determiner::Start => "start",
            Determiner::End => "end",
        }
    }

    /// The phrase that builds this determiner in source.
    pub fn phrase(self) -> &'static str {
        match self {
            Determiner::Any => "some of",
            Determiner::All => "all of",
            Determiner::Start => "start of",
            Determiner::End => "end of",
        }
    }

    /// `any` or `all`.
    pub fn is_quantifier(self) -> bool {
        matches!(self, Determiner::Any | Determiner::All)
    }

    /// `start` or `end`.
    pub fn is_progressive(self) -> bool {
        matches!(self, Determiner::Start | Determiner::End)
    }
}

impl fmt::Display for Determiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sequence tagged with a determiner.
#[derive(Clone, Debug, PartialEq)]
pub struct Determined {
    pub determiner: Determiner,
    /// Array or string (or, for `any`/`all`, a dataset).
    pub sequence: Value,
}

impl Determined {
    /// Tag `sequence` with `determiner`.
    ///
    /// `start`/`end` need an ordered sequence; `any`/`all` also accept
    /// datasets.
    pub fn new(determiner: Determiner, sequence: Value) -> EvalResult<Determined> {
        let accepted = match &sequence {
            Value::Array(_) | Value::Str(_) => true,
            Value::Dataset(_) => determiner.is_quantifier(),
            _ => false,
        };
        if !accepted {
            let wanted = if determiner.is_quantifier() {
                "an array, a string or a dataset"
            } else {
                "an array or a string"
            };
            return Err(EvalError::operation(format!(
                "'{}' needs {wanted}, not {}.",
                determiner.phrase(),
                sequence.object_name()
            )));
        }
        Ok(Determined {
            determiner,
            sequence,
        })
    }

    /// Individual elements: items, or characters of a string.
    pub fn elements(&self) -> Vec<Value> {
        self.sequence.sequence_items().unwrap_or_default()
    }

    /// Every prefix (`start`) or suffix (`end`), shortest first, from the
    /// empty one up to the whole sequence.
    pub fn progressive_parts(&self) -> Vec<Value> {
        match &self.sequence {
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                (0..=chars.len())
                    .map(|n| Value::string(self.window(&chars, n).iter().collect::<String>()))
                    .collect()
            }
            Value::Array(items) => (0..=items.len())
                .map(|n| Value::array(self.window(items, n).to_vec()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn window<'a, T>(&self, items: &'a [T], n: usize) -> &'a [T] {
        if self.determiner == Determiner::End {
            &items[items.len() - n..]
        } else {
            &items[..n]
        }
    }
}
