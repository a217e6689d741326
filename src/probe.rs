use std::fs;
use std::path::Path;

use log::debug;
use nix::unistd::{access, AccessFlags};

/// Directory a file at `path` would be created in.
fn target_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Whether a file could be written at `path`.
///
/// True exactly when the containing directory exists and the process may
/// create entries in it. Nothing is created or truncated at `path`.
pub fn probe(path: &Path) -> bool {
    let dir = target_dir(path);
    if !dir.is_dir() {
        debug!("Probe: {} is not a directory", dir.display());
        return false;
    }
    match access(dir, AccessFlags::W_OK | AccessFlags::X_OK) {
        Ok(()) => true,
        Err(e) => {
            debug!("Probe: {} is not writable: {}", dir.display(), e);
            false
        }
    }
}

/// Whether something already exists at `path`. Only reads metadata.
pub fn output_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
