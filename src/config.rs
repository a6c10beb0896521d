//! Project-level configuration consumed by the installers.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::runtime::Runtime;

/// Project-wide installer settings, read from the consuming project's manifest.
///
/// The `installer-paths` table maps a path template (may contain `{$name}`,
/// `{$vendor}`, `{$type}` placeholders) to a list of selectors. A selector is
/// either a literal package name or a `type:<type>` tag. Entries are matched in
/// declaration order.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProjectConfig {
    #[serde(default, rename = "installer-paths")]
    installer_paths: Map<String, Value>,
}

impl ProjectConfig {
    /// Load the configuration from a JSON manifest file.
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let config: ProjectConfig = serde_json::from_str(&content)
            .with_context(|| format!("Malformed project configuration in {:?}", path))?;
        Ok(config)
    }

    /// Find the custom install path template for a package, if any.
    ///
    /// Returns the template of the first `installer-paths` entry, in declaration
    /// order, whose selector list contains the package's full pretty name or its
    /// `type:<type>` tag. Selector lists within an entry are unordered.
    pub fn custom_install_path(
        &self,
        pretty_name: &str,
        package_type: &str,
    ) -> Result<Option<String>> {
        let type_selector = format!("type:{package_type}");
        for (template, selectors) in &self.installer_paths {
            let selectors: Vec<String> = serde_json::from_value(selectors.clone())
                .with_context(|| {
                    format!("Malformed installer-paths selectors for '{template}': expected a list of package names or type:<type> tags")
                })?;
            if selectors
                .iter()
                .any(|selector| selector == pretty_name || *selector == type_selector)
            {
                return Ok(Some(template.clone()));
            }
        }
        Ok(None)
    }

    #[cfg(test)]
    pub(crate) fn with_installer_paths(installer_paths: Map<String, Value>) -> Self {
        Self { installer_paths }
    }
}
