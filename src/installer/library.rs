//! Generic copy-based content installer.
//!
//! Places a package's raw content before link reconciliation and removes it
//! after link teardown. Content comes from a staged download directory when
//! one exists; otherwise placement is assumed to have happened out of band.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::package::PackageDescriptor;
use crate::runtime::Runtime;

/// Directory under the project root where downloaded packages are staged.
pub const DOWNLOADS_DIR: &str = "downloads";

pub struct LibraryInstaller<'a, R: Runtime> {
    runtime: &'a R,
    downloads_root: PathBuf,
}

impl<'a, R: Runtime> LibraryInstaller<'a, R> {
    pub fn new(runtime: &'a R, downloads_root: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            downloads_root: downloads_root.into(),
        }
    }

    /// The staged download directory for a package, if any.
    fn staged_dir(&self, package: &PackageDescriptor) -> PathBuf {
        let mut path = self.downloads_root.clone();
        for segment in package.name.split('/') {
            path.push(segment);
        }
        path
    }

    /// Place the package's content at its install path.
    #[tracing::instrument(skip(self, package))]
    pub fn install(&self, package: &PackageDescriptor) -> Result<()> {
        let staged = self.staged_dir(package);
        if self.runtime.is_dir(&staged) {
            debug!(
                "Copying staged content {:?} -> {:?}",
                staged, package.install_path
            );
            self.copy_tree(&staged, &package.install_path)?;
        } else if !self.runtime.exists(&package.install_path) {
            self.runtime
                .create_dir_all(&package.install_path)
                .with_context(|| {
                    format!("Failed to create install path {:?}", package.install_path)
                })?;
        }
        Ok(())
    }

    /// Replace the previous package's content with the new one.
    #[tracing::instrument(skip(self, initial, target))]
    pub fn update(&self, initial: &PackageDescriptor, target: &PackageDescriptor) -> Result<()> {
        if initial.install_path != target.install_path
            && self.runtime.exists(&initial.install_path)
        {
            self.runtime.remove_dir_all(&initial.install_path)?;
        }
        self.install(target)
    }

    /// Remove the package's content tree.
    #[tracing::instrument(skip(self, package))]
    pub fn uninstall(&self, package: &PackageDescriptor) -> Result<()> {
        if self.runtime.exists(&package.install_path) {
            debug!("Removing install path {:?}", package.install_path);
            self.runtime.remove_dir_all(&package.install_path)?;
        }
        Ok(())
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> Result<()> {
        self.runtime.create_dir_all(to)?;
        for entry in self.runtime.read_dir(from)? {
            let file_name = entry
                .file_name()
                .with_context(|| format!("Invalid directory entry {:?}", entry))?;
            let dest = to.join(file_name);
            if self.runtime.is_dir(&entry) {
                self.copy_tree(&entry, &dest)?;
            } else {
                self.runtime.copy(&entry, &dest)?;
            }
        }
        Ok(())
    }
}
