//! Package installers and their lifecycle.
//!
//! The host package manager drives installers through the [`Installer`]
//! lifecycle. [`CoreInstaller`] activates for core content packages only and
//! publishes the package's real core directory at the configured project path
//! via a relative symlink.

mod library;
mod link;
mod manager;
mod paths;
mod source;

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::package::PackageDescriptor;
use crate::runtime::Runtime;

pub use library::{DOWNLOADS_DIR, LibraryInstaller};
pub use link::{LinkManager, LinkState};
pub use manager::InstallationManager;
pub use paths::{DEFAULT_TARGET_PATH, resolve_target_path};
pub use source::{DIST_LAYOUT_DIR, SOURCE_LAYOUT_DIR, locate_core_source};

/// Package type this installer activates for.
pub const CORE_PACKAGE_TYPE: &str = "concrete5-core";

/// Lifecycle hooks invoked by the host package manager.
pub trait Installer {
    /// Whether this installer handles the given package type.
    fn supports(&self, package_type: &str) -> bool;

    fn install(&self, package: &PackageDescriptor) -> Result<()>;

    fn update(&self, initial: &PackageDescriptor, target: &PackageDescriptor) -> Result<()>;

    fn uninstall(&self, package: &PackageDescriptor) -> Result<()>;
}

/// Publishes a core package's content directory at the configured project path.
///
/// Composes the generic copy-based content stage with source location, target
/// path resolution and symlink reconciliation.
pub struct CoreInstaller<'a, R: Runtime> {
    runtime: &'a R,
    project_root: PathBuf,
    config: ProjectConfig,
    library: LibraryInstaller<'a, R>,
    links: LinkManager<'a, R>,
}

impl<'a, R: Runtime> CoreInstaller<'a, R> {
    /// Create an installer rooted at the project directory.
    ///
    /// `project_root` must be absolute; resolved target paths are interpreted
    /// relative to it. Downloaded packages are staged under its
    /// [`DOWNLOADS_DIR`].
    pub fn new(runtime: &'a R, project_root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        let project_root = project_root.into();
        Self {
            runtime,
            library: LibraryInstaller::new(runtime, project_root.join(DOWNLOADS_DIR)),
            links: LinkManager::new(runtime, "core"),
            project_root,
            config,
        }
    }

    /// The absolute path where the package's symlink must live.
    fn target_path(&self, package: &PackageDescriptor) -> Result<PathBuf> {
        let raw = resolve_target_path(package, &self.config)?;
        Ok(self.project_root.join(raw.trim_end_matches('/')))
    }

    /// Reconcile the published symlink for an installed or updated package.
    fn install_core(&self, package: &PackageDescriptor) -> Result<()> {
        let source_dir = locate_core_source(self.runtime, &package.install_path)?;
        let target_path = self.target_path(package)?;
        debug!(
            "Publishing {} core {:?} at {:?}",
            package.name, source_dir, target_path
        );
        self.links.ensure_link(&source_dir, &target_path)
    }
}

impl<'a, R: Runtime> Installer for CoreInstaller<'a, R> {
    fn supports(&self, package_type: &str) -> bool {
        package_type == CORE_PACKAGE_TYPE
    }

    #[tracing::instrument(skip(self, package), fields(package = %package.name))]
    fn install(&self, package: &PackageDescriptor) -> Result<()> {
        self.library.install(package)?;
        self.install_core(package)
    }

    #[tracing::instrument(skip(self, initial, target), fields(package = %target.name))]
    fn update(&self, initial: &PackageDescriptor, target: &PackageDescriptor) -> Result<()> {
        self.library.update(initial, target)?;
        self.install_core(target)
    }

    #[tracing::instrument(skip(self, package), fields(package = %package.name))]
    fn uninstall(&self, package: &PackageDescriptor) -> Result<()> {
        self.library.uninstall(package)?;
        let target_path = self.target_path(package)?;
        self.links.remove_link(&target_path)
    }
}
