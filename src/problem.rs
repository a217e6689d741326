use std::path::Path;

use config_file::FromConfigFile;
use log::debug;
use serde::Deserialize;

use crate::error::{ExportError, Result};
use crate::mdp::TabularMdp;
use crate::policy::PolicyVector;

/// Problem file contents: a tabular MDP plus the policy computed for it.
///
/// ```toml
/// states = 2
/// actions = 1
/// initial = [1.0, 0.0]
/// policy = [0, 0]
///
/// [[transitions]]
/// state = 0
/// action = 0
/// successors = [0.3, 0.7]
/// ```
///
/// (state, action) pairs without a `transitions` entry have all-zero rows.
#[derive(Deserialize, Debug)]
pub struct ProblemConfig {
    pub states: usize,
    pub actions: usize,
    pub initial: Vec<f64>,
    pub policy: Vec<usize>,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
}

/// Successor distribution for one (state, action) pair.
#[derive(Deserialize, Debug)]
pub struct TransitionConfig {
    pub state: usize,
    pub action: usize,
    pub successors: Vec<f64>,
}

/// Model and policy ready for export.
#[derive(Debug)]
pub struct Problem {
    pub model: TabularMdp,
    pub policy: PolicyVector,
}

impl ProblemConfig {
    pub fn into_problem(self) -> Result<Problem> {
        let mut model = TabularMdp::zeros(self.states, self.actions);
        for t in &self.transitions {
            model.set_row(t.state, t.action, &t.successors)?;
        }
        model.set_initial(&self.initial)?;
        Ok(Problem { model, policy: PolicyVector::new(self.policy) })
    }
}

/// Read a problem file; the format follows the file extension.
pub fn load_problem(path: &Path) -> Result<Problem> {
    debug!("Reading problem file: {}", path.display());
    let config = ProblemConfig::from_config_file(path).map_err(|e| {
        ExportError::InvalidModel(format!("Unable to read '{}': {}", path.display(), e))
    })?;
    debug!("{} states, {} actions, {} transition rows",
           config.states, config.actions, config.transitions.len());
    config.into_problem()
}
