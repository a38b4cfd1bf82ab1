//! Atomic file replacement.

use crate::error::{PersistenceErrorKind, Result, TrackerError};
use std::fs;
use std::path::Path;

/// Write `content` to `target` through a sibling temp file and a rename.
///
/// The previous content of `target` stays intact until the rename succeeds.
/// Missing parent directories are created.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| TrackerError::io(parent, e))?;
        }
    }

    let temp_path = target.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(TrackerError::persistence(
            &temp_path,
            "writing temp file",
            PersistenceErrorKind::Io(e),
        ));
    }

    fs::rename(&temp_path, target).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::persistence(target, "replacing snapshot", PersistenceErrorKind::Io(e))
    })
}
