//! Identity of an installable unit.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Metadata bundle identifying an installable unit.
///
/// Populated by the host package manager before a lifecycle call and
/// immutable for the duration of the operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    /// Pretty name, possibly `vendor/name`
    pub name: String,
    /// Category tag, e.g. `concrete5-core`
    #[serde(rename = "type")]
    pub package_type: String,
    /// Package-supplied configuration
    #[serde(default)]
    pub extra: Map<String, Value>,
    /// Directory where the package's raw content was placed
    #[serde(rename = "install-path")]
    pub install_path: PathBuf,
}

impl PackageDescriptor {
    pub fn new(
        name: impl Into<String>,
        package_type: impl Into<String>,
        install_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            package_type: package_type.into(),
            extra: Map::new(),
            install_path: install_path.into(),
        }
    }

    /// Split the pretty name into `(vendor, name)`.
    ///
    /// A name without a separator has an empty vendor. Segments beyond the
    /// second are ignored.
    pub fn vendor_and_name(&self) -> (&str, &str) {
        match self.name.split_once('/') {
            Some((vendor, rest)) => {
                let name = rest.split('/').next().unwrap_or(rest);
                (vendor, name)
            }
            None => ("", self.name.as_str()),
        }
    }

    /// The `installer-name` override from `extra`, if present and non-empty.
    pub fn installer_name(&self) -> Option<&str> {
        self.extra
            .get("installer-name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vendor_and_name_with_separator() {
        let package = PackageDescriptor::new("acme/widget", "concrete5-core", "/tmp/pkg");
        assert_eq!(package.vendor_and_name(), ("acme", "widget"));
    }

    #[test]
    fn test_vendor_and_name_without_separator() {
        let package = PackageDescriptor::new("widget", "concrete5-core", "/tmp/pkg");
        assert_eq!(package.vendor_and_name(), ("", "widget"));
    }

    #[test]
    fn test_vendor_and_name_extra_segments_ignored() {
        let package = PackageDescriptor::new("acme/widget/extra", "concrete5-core", "/tmp/pkg");
        assert_eq!(package.vendor_and_name(), ("acme", "widget"));
    }

    #[test]
    fn test_vendor_and_name_empty() {
        let package = PackageDescriptor::new("", "concrete5-core", "/tmp/pkg");
        assert_eq!(package.vendor_and_name(), ("", ""));
    }

    #[test]
    fn test_installer_name_override() {
        let mut package = PackageDescriptor::new("acme/core", "concrete5-core", "/tmp/pkg");
        package
            .extra
            .insert("installer-name".to_string(), json!("custom-core"));
        assert_eq!(package.installer_name(), Some("custom-core"));
    }

    #[test]
    fn test_installer_name_empty_is_ignored() {
        let mut package = PackageDescriptor::new("acme/core", "concrete5-core", "/tmp/pkg");
        package
            .extra
            .insert("installer-name".to_string(), json!(""));
        assert_eq!(package.installer_name(), None);
    }

    #[test]
    fn test_installer_name_non_string_is_ignored() {
        let mut package = PackageDescriptor::new("acme/core", "concrete5-core", "/tmp/pkg");
        package
            .extra
            .insert("installer-name".to_string(), json!(42));
        assert_eq!(package.installer_name(), None);
    }

    #[test]
    fn test_descriptor_deserialize() {
        let json = r#"{
            "name": "acme/core",
            "type": "concrete5-core",
            "extra": {"installer-name": "core"},
            "install-path": "/srv/site/vendor/acme/core"
        }"#;
        let package: PackageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(package.name, "acme/core");
        assert_eq!(package.package_type, "concrete5-core");
        assert_eq!(package.installer_name(), Some("core"));
        assert_eq!(
            package.install_path,
            PathBuf::from("/srv/site/vendor/acme/core")
        );
    }

    #[test]
    fn test_descriptor_deserialize_without_extra() {
        let json = r#"{
            "name": "acme/core",
            "type": "concrete5-core",
            "install-path": "/srv/site/vendor/acme/core"
        }"#;
        let package: PackageDescriptor = serde_json::from_str(json).unwrap();
        assert!(package.extra.is_empty());
        assert_eq!(package.installer_name(), None);
    }
}
