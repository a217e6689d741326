use std::path::Path;

use log::warn;

use crate::error::{ExportError, Result};
use crate::naming::{derive_paths, OutputPaths};
use crate::probe::{output_exists, probe};

fn not_stored(target: &str) {
    warn!("Could not open {}", target);
    warn!("Results will not be stored to disk.");
}

/// Decide where the results of a run go. `None` means nothing is stored.
///
/// A dry run skips path derivation, so no results directory is created.
/// When the output paths cannot be derived or the results directory is not
/// writable, `fallback_dry_run` turns the run into a dry run; otherwise the
/// failure is returned.
pub fn setup_output_files(
    problem_file: &Path, discount: f64, horizon: f64,
    dry_run: bool, fallback_dry_run: bool,
) -> Result<Option<OutputPaths>> {
    if dry_run {
        return Ok(None);
    }
    let paths = match derive_paths(problem_file, discount, horizon) {
        Ok(paths) => paths,
        Err(ExportError::PathError(msg)) if fallback_dry_run => {
            warn!("{}", msg);
            not_stored(&problem_file.display().to_string());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    if output_exists(&paths.model) {
        warn!("{} exists and will be overwritten", paths.model.display());
    }
    if !probe(&paths.model) {
        if fallback_dry_run {
            not_stored(&paths.model.display().to_string());
            return Ok(None);
        }
        return Err(ExportError::PathError(format!(
            "Cannot write to {}", paths.model.display())));
    }
    Ok(Some(paths))
}
