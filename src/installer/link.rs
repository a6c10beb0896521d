//! Symlink reconciliation for published core directories.

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::path::Path;

use crate::runtime::{Runtime, relative_symlink_path};

/// Observed state of the managed link location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the target path
    NoLink,
    /// A symlink exists and resolves to the expected source
    CorrectLink,
    /// A symlink exists but resolves elsewhere
    IncorrectLink,
    /// A non-symlink object occupies the target path
    Obstructed,
}

impl LinkState {
    /// Human-readable description of this state.
    pub fn reason(&self) -> &'static str {
        match self {
            LinkState::NoLink => "does not exist",
            LinkState::CorrectLink => "already points to the source",
            LinkState::IncorrectLink => "points to a different location",
            LinkState::Obstructed => "exists and is not a symlink",
        }
    }
}

/// Manages the lifecycle of one published symlink per package.
///
/// All paths handed to the manager are expected to be absolute; the created
/// link target is expressed relative to the link's parent directory whenever a
/// relative path exists.
pub struct LinkManager<'a, R: Runtime> {
    runtime: &'a R,
    label: String,
}

impl<'a, R: Runtime> LinkManager<'a, R> {
    pub fn new(runtime: &'a R, label: impl Into<String>) -> Self {
        Self {
            runtime,
            label: label.into(),
        }
    }

    /// Classify what currently occupies `target_path` with respect to the
    /// expected canonical `source_dir`.
    pub fn check(&self, target_path: &Path, source_dir: &Path) -> LinkState {
        if self.runtime.is_symlink(target_path) {
            let resolved = self
                .runtime
                .resolve_link(target_path)
                .and_then(|path| self.runtime.canonicalize(&path));
            match resolved {
                Ok(resolved) if resolved == source_dir => LinkState::CorrectLink,
                // Unreadable or dangling links are repointed like incorrect ones
                _ => LinkState::IncorrectLink,
            }
        } else if self.runtime.exists(target_path) {
            LinkState::Obstructed
        } else {
            LinkState::NoLink
        }
    }

    /// Reconcile the filesystem so that `target_path` is a symlink to
    /// `source_dir`.
    ///
    /// Repeated calls with an unchanged source are no-ops. A non-symlink
    /// object at the target is never touched and aborts with an error. The
    /// outcome of the link creation itself is reported but non-fatal.
    #[tracing::instrument(skip(self, source_dir, target_path))]
    pub fn ensure_link(&self, source_dir: &Path, target_path: &Path) -> Result<()> {
        let source_dir = self
            .runtime
            .canonicalize(source_dir)
            .with_context(|| format!("Cannot link to missing source directory {:?}", source_dir))?;

        if let Some(parent) = target_path.parent()
            && !self.runtime.exists(parent)
        {
            self.runtime.create_dir_all(parent)?;
        }

        let state = self.check(target_path, &source_dir);
        debug!(
            "{} symlink {:?} {}",
            self.label,
            target_path,
            state.reason()
        );

        match state {
            LinkState::CorrectLink => return Ok(()),
            LinkState::Obstructed => bail!(
                "Can't create {} symlink as {} already exists and is not a symlink. Please remove it manually.",
                self.label,
                target_path.display()
            ),
            LinkState::IncorrectLink => {
                // The create below reports the overall outcome; a failed
                // removal surfaces there as "not created".
                if let Err(e) = self.runtime.remove_symlink(target_path) {
                    warn!(
                        "Failed to remove existing {} symlink {:?}: {:#}",
                        self.label, target_path, e
                    );
                }
            }
            LinkState::NoLink => {}
        }

        let link_target = match relative_symlink_path(target_path, &source_dir) {
            Some(relative) => relative,
            None => source_dir.clone(),
        };

        let created = self.runtime.symlink(&link_target, target_path);
        println!(
            "    Creating {} symlink {} - {}",
            self.label,
            target_path.display(),
            if created.is_ok() { "created" } else { "not created" }
        );
        if let Err(e) = created {
            warn!(
                "Failed to create {} symlink {:?} -> {:?}: {:#}",
                self.label, target_path, link_target, e
            );
        }

        Ok(())
    }

    /// Remove the managed symlink at `target_path` if one exists.
    ///
    /// Anything that is not a symlink is left untouched. The outcome of the
    /// removal is reported but non-fatal.
    #[tracing::instrument(skip(self, target_path))]
    pub fn remove_link(&self, target_path: &Path) -> Result<()> {
        if !self.runtime.is_symlink(target_path) {
            debug!(
                "No {} symlink at {:?}, nothing to remove",
                self.label, target_path
            );
            return Ok(());
        }

        let removed = self.runtime.remove_symlink(target_path);
        println!(
            "    Removing {} symlink {} - {}",
            self.label,
            target_path.display(),
            if removed.is_ok() { "removed" } else { "not removed" }
        );
        if let Err(e) = removed {
            warn!(
                "Failed to remove {} symlink {:?}: {:#}",
                self.label, target_path, e
            );
        }

        Ok(())
    }
}
