use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{ExportError, Result};
use crate::numeric::fractional_digits;

/// Directory created next to the problem file to hold exported models.
pub const RESULTS_DIR: &str = "results";
/// Extension of PRISM model files.
pub const MODEL_EXTENSION: &str = "nm";
/// Suffix that replaces the model file's extension for the timings file.
pub const TIMINGS_SUFFIX: &str = "_Timings";
/// Number of discount digits embedded in file names.
pub const DISCOUNT_DIGITS: u32 = 2;

/// Where the results of one export run go.
///
/// Returned from [`derive_paths`] and passed on explicitly to the writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// PRISM model file
    pub model: PathBuf,
    /// Companion timings file
    pub timings: PathBuf,
}

/// Compose the model file name from a base name and the run parameters.
///
/// Discounts that agree to two decimal places produce the same name, e.g.
/// 0.951 and 0.949 both become `_d95`.
pub fn model_file_name(base: &str, discount: f64, horizon: f64) -> String {
    format!(
        "{}_d{}_h{}.{}",
        base,
        fractional_digits(discount, DISCOUNT_DIGITS),
        horizon,
        MODEL_EXTENSION
    )
}

/// File name of the problem file without directory and extension.
pub fn base_name(problem_file: &Path) -> Result<String> {
    problem_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ExportError::PathError(format!(
            "No file name in problem path '{}'", problem_file.display())))
}

/// Directory that contains the problem file. A bare file name lives in `.`.
pub fn problem_dir(problem_file: &Path) -> Result<PathBuf> {
    if problem_file.as_os_str().is_empty() {
        return Err(ExportError::PathError(String::from("Problem path is empty")));
    }
    match problem_file.parent() {
        Some(dir) if dir.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(ExportError::PathError(format!(
            "Cannot determine directory of '{}'", problem_file.display()))),
    }
}

/// Resolve the results directory for a problem file, creating it if needed.
pub fn results_dir(problem_file: &Path) -> Result<PathBuf> {
    let dir = problem_dir(problem_file)?.join(RESULTS_DIR);
    DirBuilder::new()
        .recursive(true)
        .mode(0o775)
        .create(&dir)
        .map_err(|e| ExportError::PathError(format!(
            "Unable to create results directory '{}': {}", dir.display(), e)))?;
    Ok(dir)
}

/// Full path of the PRISM model file for a problem and its run parameters.
///
/// Creates the results directory as a side effect; calling it again with
/// the same arguments returns the same path.
pub fn derive_path(problem_file: &Path, discount: f64, horizon: f64) -> Result<PathBuf> {
    if !discount.is_finite() || !horizon.is_finite() {
        return Err(ExportError::PathError(format!(
            "Discount ({}) and horizon ({}) must be finite", discount, horizon)));
    }
    let base = base_name(problem_file)?;
    let path = results_dir(problem_file)?
        .join(model_file_name(&base, discount, horizon));
    debug!("Model file path: {}", path.display());
    Ok(path)
}

/// Timings file for a model file: extension replaced by `_Timings`.
pub fn timings_path(model: &Path) -> PathBuf {
    let stem = model.file_stem().unwrap_or_default().to_string_lossy();
    model.with_file_name(format!("{}{}", stem, TIMINGS_SUFFIX))
}

/// Model and timings paths for one run.
pub fn derive_paths(problem_file: &Path, discount: f64, horizon: f64) -> Result<OutputPaths> {
    let model = derive_path(problem_file, discount, horizon)?;
    let timings = timings_path(&model);
    Ok(OutputPaths { model, timings })
}
