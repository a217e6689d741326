use crate::error::{ExportError, Result};

/// Read-only view of a finite MDP as the encoder needs it.
///
/// States are `0..state_count()`, actions are `0..action_count()`.
pub trait MdpModel {
    fn state_count(&self) -> usize;
    fn action_count(&self) -> usize;
    /// Probability of reaching `successor` from `state` when taking `action`.
    fn transition_probability(&self, state: usize, action: usize, successor: usize) -> f64;
    /// Probability that the process starts in `state`.
    fn initial_state_probability(&self, state: usize) -> f64;
}

/// MDP held in dense probability tables.
///
/// `transitions` is indexed [state, action, successor], `initial` by state.
/// Both tables always agree on the number of states.
#[derive(Debug, Clone)]
pub struct TabularMdp {
    transitions: ndarray::Array3<f64>,
    initial: ndarray::Array1<f64>,
}

impl TabularMdp {
    pub fn new(
        transitions: ndarray::Array3<f64>, initial: ndarray::Array1<f64>
    ) -> Result<TabularMdp> {
        let (n, _, n_succ) = transitions.dim();
        if n != n_succ {
            return Err(ExportError::InvalidModel(format!(
                "Transition table has {} source states but {} successor states", n, n_succ)));
        }
        if initial.len() != n {
            return Err(ExportError::InvalidModel(format!(
                "Initial distribution has {} entries for {} states", initial.len(), n)));
        }
        Ok(TabularMdp { transitions, initial })
    }

    /// All-zero model with the given dimensions.
    pub fn zeros(states: usize, actions: usize) -> TabularMdp {
        TabularMdp {
            transitions: ndarray::Array3::<f64>::zeros((states, actions, states)),
            initial: ndarray::Array1::<f64>::zeros(states),
        }
    }

    /// Replace the successor distribution of one (state, action) pair.
    pub fn set_row(&mut self, state: usize, action: usize, successors: &[f64]) -> Result<()> {
        let (n, m, _) = self.transitions.dim();
        if state >= n || action >= m {
            return Err(ExportError::InvalidModel(format!(
                "Transition ({}, {}) outside model of {} states and {} actions",
                state, action, n, m)));
        }
        if successors.len() != n {
            return Err(ExportError::InvalidModel(format!(
                "Transition ({}, {}) has {} successor probabilities for {} states",
                state, action, successors.len(), n)));
        }
        let mut row = self.transitions.slice_mut(ndarray::s![state, action, ..]);
        row.assign(&ndarray::ArrayView1::from(successors));
        Ok(())
    }

    /// Replace the whole initial distribution.
    pub fn set_initial(&mut self, initial: &[f64]) -> Result<()> {
        if initial.len() != self.initial.len() {
            return Err(ExportError::InvalidModel(format!(
                "Initial distribution has {} entries for {} states",
                initial.len(), self.initial.len())));
        }
        self.initial.assign(&ndarray::ArrayView1::from(initial));
        Ok(())
    }

    /// Set the initial probability of one state.
    pub fn set_initial_probability(&mut self, state: usize, p: f64) -> Result<()> {
        let n = self.initial.len();
        let entry = self.initial.get_mut(state).ok_or_else(|| ExportError::InvalidModel(
            format!("Initial state {} outside model of {} states", state, n)))?;
        *entry = p;
        Ok(())
    }

    pub fn transitions(&self) -> &ndarray::Array3<f64> {
        &self.transitions
    }

    pub fn initial(&self) -> &ndarray::Array1<f64> {
        &self.initial
    }
}

impl MdpModel for TabularMdp {
    fn state_count(&self) -> usize {
        self.transitions.dim().0
    }

    fn action_count(&self) -> usize {
        self.transitions.dim().1
    }

    fn transition_probability(&self, state: usize, action: usize, successor: usize) -> f64 {
        self.transitions[[state, action, successor]]
    }

    fn initial_state_probability(&self, state: usize) -> f64 {
        self.initial[state]
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn build_zero_model() {
        // Act
        let mdp = TabularMdp::zeros(3, 2);
        // Assert
        assert_eq!(mdp.state_count(), 3);
        assert_eq!(mdp.action_count(), 2);
        assert_eq!(mdp.transition_probability(2, 1, 0), 0.0);
        assert_eq!(mdp.initial_state_probability(1), 0.0);
    }

    #[test]
    fn set_row_fills_successors() {
        // Arrange
        let mut mdp = TabularMdp::zeros(2, 2);
        // Act
        mdp.set_row(1, 1, &[0.25, 0.75]).unwrap();
        // Assert
        assert_abs_diff_eq!(mdp.transition_probability(1, 1, 0), 0.25);
        assert_abs_diff_eq!(mdp.transition_probability(1, 1, 1), 0.75);
        assert_eq!(mdp.transition_probability(1, 0, 1), 0.0);
        let row_sum: f64 = mdp.transitions().slice(ndarray::s![1, 1, ..]).sum();
        assert_abs_diff_eq!(row_sum, 1.0, epsilon = f64::EPSILON);
    }

    #[test]
    fn set_row_rejects_bad_dimensions() {
        let mut mdp = TabularMdp::zeros(2, 1);
        assert!(matches!(mdp.set_row(2, 0, &[1.0, 0.0]), Err(ExportError::InvalidModel(_))));
        assert!(matches!(mdp.set_row(0, 1, &[1.0, 0.0]), Err(ExportError::InvalidModel(_))));
        assert!(matches!(mdp.set_row(0, 0, &[1.0]), Err(ExportError::InvalidModel(_))));
    }

    #[test]
    fn new_checks_table_shapes() {
        let square = ndarray::Array3::<f64>::zeros((2, 1, 2));
        let ragged = ndarray::Array3::<f64>::zeros((2, 1, 3));
        assert!(TabularMdp::new(square.clone(), ndarray::arr1(&[1.0, 0.0])).is_ok());
        assert!(matches!(TabularMdp::new(ragged, ndarray::arr1(&[1.0, 0.0])),
                         Err(ExportError::InvalidModel(_))));
        assert!(matches!(TabularMdp::new(square, ndarray::arr1(&[1.0])),
                         Err(ExportError::InvalidModel(_))));
    }

    #[test]
    fn set_initial_checks_length() {
        // Arrange
        let mut mdp = TabularMdp::zeros(2, 1);
        // Act
        let short = mdp.set_initial(&[1.0]);
        let long = mdp.set_initial(&[1.0, 0.0, 0.0]);
        // Assert
        assert!(matches!(short, Err(ExportError::InvalidModel(_))));
        assert!(matches!(long, Err(ExportError::InvalidModel(_))));
        assert_eq!(mdp.initial().len(), 2);
        assert_eq!(mdp.initial_state_probability(1), 0.0);
    }

    #[test]
    fn set_initial_replaces_distribution() {
        let mut mdp = TabularMdp::zeros(3, 1);
        mdp.set_initial(&[0.2, 0.0, 0.8]).unwrap();
        assert_eq!(mdp.initial().to_vec(), vec![0.2, 0.0, 0.8]);
    }

    #[test]
    fn set_initial_probability_checks_state() {
        let mut mdp = TabularMdp::zeros(2, 1);
        assert!(mdp.set_initial_probability(1, 1.0).is_ok());
        assert_eq!(mdp.initial_state_probability(1), 1.0);
        assert!(matches!(mdp.set_initial_probability(2, 1.0),
                         Err(ExportError::InvalidModel(_))));
    }
}
