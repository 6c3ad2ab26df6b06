//Assignment store: a dense, 1-indexed mapping from variable to value.
use crate::cnf::Variable;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VarValue {
    True,
    False,
    Unassigned,
}

impl VarValue {
    pub fn negate(self) -> VarValue {
        match self {
            VarValue::True => VarValue::False,
            VarValue::False => VarValue::True,
            VarValue::Unassigned => VarValue::Unassigned,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Assignment {
    // index 0 is unused; variables are 1..=num_vars
    values: Vec<VarValue>,
}

impl Assignment {
    pub fn new(num_vars: usize) -> Self {
        Assignment {
            values: vec![VarValue::Unassigned; num_vars + 1],
        }
    }

    pub fn num_vars(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    pub fn get(&self, v: Variable) -> VarValue {
        self.values[v]
    }

    pub fn set(&mut self, v: Variable, value: VarValue) {
        self.values[v] = value;
    }

    /// A deep value copy, never an alias, as the snapshot the engine restores
    /// to on backtrack.
    pub fn snapshot(&self) -> Assignment {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: Assignment) {
        *self = snapshot;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, VarValue)> + '_ {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .map(|(v, &value)| (v, value))
    }
}
