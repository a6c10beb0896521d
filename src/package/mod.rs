//! Package model
//!
//! This module provides the descriptor identifying an installable unit,
//! as handed to the installers by the host package manager.

mod descriptor;

pub use descriptor::PackageDescriptor;
