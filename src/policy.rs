use std::fmt;

use crate::error::{ExportError, Result};

/// Chosen action for every state of an MDP.
///
/// Index `s` holds the action taken in state `s`. Built once from the
/// output of the planner and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyVector {
    actions: ndarray::Array1<usize>,
}

impl PolicyVector {
    pub fn new(actions: Vec<usize>) -> PolicyVector {
        PolicyVector { actions: ndarray::Array1::from(actions) }
    }

    /// Action chosen for `state`.
    pub fn action_for(&self, state: usize) -> Result<usize> {
        self.actions
            .get(state)
            .copied()
            .ok_or(ExportError::IndexOutOfRange { index: state, len: self.len() })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions in state order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.actions.iter().copied()
    }
}

impl From<Vec<usize>> for PolicyVector {
    fn from(actions: Vec<usize>) -> Self {
        PolicyVector::new(actions)
    }
}

impl fmt::Display for PolicyVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (s, a) in self.iter().enumerate() {
            writeln!(f, "State no.: {} Maximizing action: {}", s, a)?;
        }
        Ok(())
    }
}
