//! Variable storage.
//!
//! Story variables (`$x`) live in one scope for the whole story. Temp
//! variables (`_x`) live in a stack of scopes, one per hook or custom-macro
//! call; lookup searches from the innermost scope outwards.
//!
//! Each slot holds an optional value and an optional standing type
//! constraint. A constraint outlives the value: moving a variable's value
//! out leaves the slot typed.

use rustc_hash::FxHashMap;

use quill_values::{EvalError, EvalResult, Storage, Value, VarScope};

/// One variable.
#[derive(Clone, Debug, Default)]
struct Slot {
    value: Option<Value>,
    constraint: Option<Value>,
}

/// A single scope of variable slots.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    slots: FxHashMap<String, Slot>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    fn get(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    fn slot_mut(&mut self, name: &str) -> &mut Slot {
        self.slots.entry(name.to_string()).or_default()
    }

    /// Names of variables that currently hold values, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.value.is_some())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

/// Story variables plus a stack of temp scopes.
#[derive(Clone, Debug)]
pub struct VariableStore {
    story: Scope,
    /// Temp scopes, innermost last. Never empty.
    temps: Vec<Scope>,
}

impl VariableStore {
    pub fn new() -> Self {
        VariableStore {
            story: Scope::new(),
            temps: vec![Scope::new()],
        }
    }

    /// Current temp scope depth.
    pub fn depth(&self) -> usize {
        self.temps.len()
    }

    /// Enter a new temp scope.
    pub fn push_scope(&mut self) {
        self.temps.push(Scope::new());
    }

    /// Leave the innermost temp scope. The outermost one is never popped.
    pub fn pop_scope(&mut self) {
        if self.temps.len() > 1 {
            self.temps.pop();
        }
    }

    /// The story scope.
    pub fn story(&self) -> &Scope {
        &self.story
    }

    fn find(&self, scope: VarScope, name: &str) -> Option<&Slot> {
        match scope {
            VarScope::Story => self.story.get(name),
            VarScope::Temp => self.temps.iter().rev().find_map(|s| s.get(name)),
        }
    }

    /// The slot a write should go to: an existing temp slot in the nearest
    /// scope that has one, else a new slot in the innermost scope.
    fn find_mut(&mut self, scope: VarScope, name: &str) -> &mut Slot {
        match scope {
            VarScope::Story => self.story.slot_mut(name),
            VarScope::Temp => {
                let index = self
                    .temps
                    .iter()
                    .rposition(|s| s.get(name).is_some())
                    .unwrap_or(self.temps.len() - 1);
                self.temps[index].slot_mut(name)
            }
        }
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for VariableStore {
    fn lookup(&self, scope: VarScope, name: &str) -> Option<Value> {
        self.find(scope, name).and_then(|slot| slot.value.clone())
    }

    fn assign(&mut self, scope: VarScope, name: &str, value: Value) {
        self.find_mut(scope, name).value = Some(value);
    }

    fn remove(&mut self, scope: VarScope, name: &str) {
        if self.find(scope, name).is_some() {
            self.find_mut(scope, name).value = None;
        }
    }

    fn constraint(&self, scope: VarScope, name: &str) -> Option<Value> {
        self.find(scope, name).and_then(|slot| slot.constraint.clone())
    }

    /// Redefining a variable's type to the same pattern is allowed and does
    /// nothing; changing it is an error.
    fn define_constraint(&mut self, scope: VarScope, name: &str, pattern: Value) -> EvalResult<()> {
        let slot = self.find_mut(scope, name);
        match &slot.constraint {
            Some(existing) if *existing == pattern => Ok(()),
            Some(existing) => Err(EvalError::operation(format!(
                "I can't redefine the type of {}{name} to {pattern}, because it was already restricted to {existing}.",
                scope.sigil()
            ))),
            None => {
                slot.constraint = Some(pattern);
                Ok(())
            }
        }
    }

    /// Story variables have one scope, so declaring one is a no-op.
    fn declare(&mut self, scope: VarScope, name: &str) {
        if scope == VarScope::Temp {
            if let Some(innermost) = self.temps.last_mut() {
                innermost.slots.insert(name.to_string(), Slot::default());
            }
        }
    }
}
