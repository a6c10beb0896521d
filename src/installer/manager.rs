//! Dispatching lifecycle events to registered installers.

use anyhow::{Result, anyhow};

use super::Installer;
use crate::package::PackageDescriptor;

/// Registry of installers, consulted per package type.
///
/// The host's plugin activation registers installers here; each lifecycle
/// event goes to the first registered installer that supports the package's
/// type.
#[derive(Default)]
pub struct InstallationManager<'a> {
    installers: Vec<Box<dyn Installer + 'a>>,
}

impl<'a> InstallationManager<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_installer(&mut self, installer: Box<dyn Installer + 'a>) {
        self.installers.push(installer);
    }

    fn installer_for(&self, package_type: &str) -> Result<&dyn Installer> {
        self.installers
            .iter()
            .map(|installer| installer.as_ref())
            .find(|installer| installer.supports(package_type))
            .ok_or_else(|| anyhow!("No installer supports package type '{package_type}'"))
    }

    pub fn install(&self, package: &PackageDescriptor) -> Result<()> {
        self.installer_for(&package.package_type)?.install(package)
    }

    pub fn update(&self, initial: &PackageDescriptor, target: &PackageDescriptor) -> Result<()> {
        self.installer_for(&target.package_type)?
            .update(initial, target)
    }

    pub fn uninstall(&self, package: &PackageDescriptor) -> Result<()> {
        self.installer_for(&package.package_type)?
            .uninstall(package)
    }
}
