//! Target path resolution for published core directories.
//!
//! Pure computation: no filesystem access. The resolved path is returned as
//! written in the template; the installer converts it to absolute form.

use anyhow::{Result, bail};
use std::collections::HashMap;

use crate::config::ProjectConfig;
use crate::package::PackageDescriptor;

/// Default target directory when no `installer-paths` entry matches.
pub const DEFAULT_TARGET_PATH: &str = "concrete";

/// Compute the target path for a package under the given project configuration.
///
/// The template comes from the first matching `installer-paths` entry, or
/// [`DEFAULT_TARGET_PATH`] when none matches. `{$name}`, `{$vendor}` and
/// `{$type}` placeholders are substituted from the package identity, with
/// `extra.installer-name` overriding the derived name.
pub fn resolve_target_path(package: &PackageDescriptor, config: &ProjectConfig) -> Result<String> {
    let vars = template_vars(package);

    let template = config
        .custom_install_path(&package.name, &package.package_type)?
        .unwrap_or_else(|| DEFAULT_TARGET_PATH.to_string());

    template_path(&template, &vars)
}

/// Build the variable set available to path templates.
fn template_vars(package: &PackageDescriptor) -> HashMap<String, String> {
    let (vendor, name) = package.vendor_and_name();
    let name = package.installer_name().unwrap_or(name);

    let mut vars = HashMap::new();
    vars.insert("name".to_string(), name.to_string());
    vars.insert("vendor".to_string(), vendor.to_string());
    vars.insert("type".to_string(), package.package_type.clone());
    vars
}

/// Substitute `{$var}` placeholders in a path template.
///
/// A placeholder is `{$` followed by `[A-Za-z0-9_]*` and `}`. A placeholder
/// naming a variable that is not defined is a configuration error. Brace text
/// not forming a placeholder passes through untouched.
fn template_path(path: &str, vars: &HashMap<String, String>) -> Result<String> {
    if !path.contains('{') {
        return Ok(path.to_string());
    }

    let mut result = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(start) = rest.find("{$") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if after[..end].bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') => {
                let var = &after[..end];
                match vars.get(var) {
                    Some(value) => result.push_str(value),
                    None => bail!(
                        "Undefined variable '{var}' in installer path template '{path}'"
                    ),
                }
                rest = &after[end + 1..];
            }
            _ => {
                // Not a placeholder; keep the braces and continue scanning
                result.push_str("{$");
                rest = after;
            }
        }
    }
    result.push_str(rest);
    Ok(result)
}
