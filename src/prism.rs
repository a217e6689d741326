//! PRISM model file output.
//!
//! A policy fixes one action per state, which turns the MDP into a chain
//! with a single command per state:
//!
//! ```text
//! mdp
//!
//! module NAME
//!
//! state:[0..N-1];
//!
//! [] state = 0 -> P_0:(state' = 0) + ... + P_N-1:(state' = N-1);
//! ...
//!
//! endmodule
//!
//! init state=I | state=J endinit
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::{debug, warn};

use crate::error::{ExportError, Result};
use crate::mdp::MdpModel;
use crate::policy::PolicyVector;

/// Allowed deviation of a successor distribution's sum from 1.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

fn check_probability(p: f64, what: impl FnOnce() -> String) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ExportError::EncodingError(format!("{} has invalid probability {}", what(), p)))
    }
}

/// Command for `state` under the policy's action.
///
/// Every successor is listed, including those with probability zero.
fn transition_line<M: MdpModel + ?Sized>(
    state: usize, model: &M, policy: &PolicyVector
) -> Result<String> {
    let action = policy.action_for(state)?;
    if action >= model.action_count() {
        return Err(ExportError::EncodingError(format!(
            "Policy chooses action {} in state {} but the model has {} actions",
            action, state, model.action_count())));
    }
    let n = model.state_count();
    let mut terms = Vec::with_capacity(n);
    let mut total = 0.0;
    for successor in 0..n {
        let p = model.transition_probability(state, action, successor);
        check_probability(p, || format!(
            "Transition ({}, {}, {})", state, action, successor))?;
        total += p;
        terms.push(format!("{}:(state' = {})", p, successor));
    }
    if !approx::abs_diff_eq!(total, 1.0, epsilon = ROW_SUM_TOLERANCE) {
        return Err(ExportError::EncodingError(format!(
            "Successor probabilities of state {} under action {} sum to {}",
            state, action, total)));
    }
    Ok(format!("[] state = {} -> {};\n", state, terms.join(" + ")))
}

/// States with positive initial probability as `state=s | state=t`.
///
/// Empty when no state qualifies.
fn initial_states_clause<M: MdpModel + ?Sized>(model: &M) -> Result<String> {
    let mut states = Vec::new();
    for s in 0..model.state_count() {
        let p = model.initial_state_probability(s);
        check_probability(p, || format!("Initial state {}", s))?;
        if p > 0.0 {
            states.push(format!("state={}", s));
        }
    }
    Ok(states.join(" | "))
}

/// Render `model` under `policy` as a PRISM MDP module called `module_name`.
pub fn encode<M: MdpModel + ?Sized>(
    model: &M, policy: &PolicyVector, module_name: &str
) -> Result<String> {
    let n = model.state_count();
    if n == 0 {
        return Err(ExportError::EncodingError(String::from("Model has no states")));
    }
    if policy.len() != n {
        return Err(ExportError::EncodingError(format!(
            "Policy has {} entries but the model has {} states", policy.len(), n)));
    }

    let mut text = String::new();
    text.push_str("mdp\n\n");
    text.push_str(&format!("module {}\n\n", module_name));
    text.push_str(&format!("state:[0..{}];\n\n", n - 1));
    for state in 0..n {
        text.push_str(&transition_line(state, model, policy)?);
    }
    text.push_str("\nendmodule\n\n");
    text.push_str(&format!("init {} endinit", initial_states_clause(model)?));
    Ok(text)
}

/// Module name for a model file: its file name without extension.
pub fn module_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ExportError::PathError(format!(
            "No file name in model path '{}'", path.display())))
}

/// Write `data` to `path` through a temporary file in the same directory.
///
/// Either all of `data` ends up at `path` or `path` is left untouched.
pub fn save_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| ExportError::PathError(format!(
        "No file name in output path '{}'", path.display())))?;
    let temp_path = parent.join(format!(
        ".tmp_{}_{}", std::process::id(), file_name.to_string_lossy()));

    let written = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()
    })();
    if let Err(e) = written {
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }
        return Err(ExportError::io(path, e));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        warn!("Could not move {} into place", temp_path.display());
        let _ = fs::remove_file(&temp_path);
        return Err(ExportError::io(path, e));
    }
    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Store encoded model text at `path`, see [`save_atomic`].
pub fn save_model_text(path: &Path, text: &str) -> Result<()> {
    save_atomic(path, text.as_bytes())
}

/// Encode `model` under `policy` and store it at `path`.
///
/// The module is named after the file, e.g. `tiger_d95_h10` for
/// `results/tiger_d95_h10.nm`.
pub fn write_model_file<M: MdpModel + ?Sized>(
    path: &Path, model: &M, policy: &PolicyVector
) -> Result<()> {
    let text = encode(model, policy, &module_name(path)?)?;
    save_model_text(path, &text)
}
