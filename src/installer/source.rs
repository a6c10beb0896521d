//! Locating a package's real core directory.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Nested core directory of a source-distribution layout.
pub const SOURCE_LAYOUT_DIR: &str = "web/concrete";

/// Nested core directory of a dist layout.
pub const DIST_LAYOUT_DIR: &str = "concrete";

/// Find the directory holding the package's actual core content.
///
/// The download layout varies: source distributions nest the core under
/// `web/concrete`, dist archives under `concrete`. The chosen candidate is
/// canonicalized, which fails when neither layout is present.
pub fn locate_core_source<R: Runtime>(runtime: &R, install_path: &Path) -> Result<PathBuf> {
    let source_candidate = install_path.join(SOURCE_LAYOUT_DIR);
    let candidate = if runtime.exists(&source_candidate) {
        debug!("Found source layout at {:?}", source_candidate);
        source_candidate
    } else {
        install_path.join(DIST_LAYOUT_DIR)
    };

    runtime.canonicalize(&candidate).with_context(|| {
        format!(
            "No core directory found under {:?} (expected {} or {})",
            install_path, SOURCE_LAYOUT_DIR, DIST_LAYOUT_DIR
        )
    })
}
