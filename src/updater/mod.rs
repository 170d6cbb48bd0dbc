//! File updaters for the supported configuration dialects.
//!
//! This module provides the [`FileUpdater`] trait, one implementation per
//! dialect, and the [`Updater`] batch driver that walks an entrypoint and
//! dispatches files by name.
//!
//! # Available Updaters
//!
//! | Updater | Dialect | Extensions |
//! |---------|---------|------------|
//! | [`YamlUpdater`] | YAML | `.yaml`, `.yml` |
//! | [`HclUpdater`] | HCL | `.hcl`, `.tf`, `.tfvars` |
//! | [`DotenvUpdater`] | Dotenv | `.env`, `.env.*` |
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use depup::model::Package;
//! use depup::updater::Updater;
//!
//! fn main() -> depup::error::Result<()> {
//!     let updater = Updater::new().with_dry_run(true).with_recursive(true);
//!     let reports = updater.run(Path::new("deploy"), &[Package::new("my-app", "2.0.0")])?;
//!     for report in reports {
//!         println!("{}: changed={}", report.path.display(), report.changed);
//!     }
//!     Ok(())
//! }
//! ```

pub(crate) mod annotation;
mod dotenv;
mod hcl;
pub(crate) mod rewrite;
pub(crate) mod version;
mod yaml;

pub use dotenv::DotenvUpdater;
pub use hcl::HclUpdater;
pub use yaml::YamlUpdater;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::glob_match;
use crate::error::{Error, Result};
use crate::model::{Dialect, Package};

/// Options passed through to a file update.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// When true, changes are computed and returned but never written.
    pub dry_run: bool,
}

/// The outcome of updating one file: the full reconstructed content and
/// whether any line changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpdate {
    pub content: String,
    pub changed: bool,
}

/// A per-file result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    /// The reconstructed file content; what the file now contains, or, in
    /// dry-run mode, would contain.
    #[serde(skip)]
    pub content: String,
}

/// Trait for updating version pins in one configuration dialect.
///
/// # Example
///
/// ```
/// use depup::model::Dialect;
/// use depup::updater::{updater_for, FileUpdater};
///
/// let updater = updater_for(Dialect::Hcl);
/// assert!(updater.supports("main.tf"));
/// assert!(!updater.supports("deploy.yaml"));
/// ```
pub trait FileUpdater: Send + Sync {
    /// Returns the human-readable name of this updater.
    fn name(&self) -> &'static str;

    /// Returns the dialect this updater handles.
    fn dialect(&self) -> Dialect;

    /// Returns the accepted file extensions, as dot-prefixed suffixes or
    /// glob patterns such as `.env.*`.
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Returns true if this updater accepts the given file name.
    fn supports(&self, file_name: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|pattern| matches_extension(file_name, pattern))
    }

    /// Rewrites the version pins in the file for the requested packages.
    ///
    /// Returns the reconstructed content and whether anything changed. The
    /// file is only written when a change occurred and dry-run is off.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or written back.
    fn update_file(
        &self,
        path: &Path,
        packages: &[Package],
        options: &UpdateOptions,
    ) -> Result<FileUpdate>;
}

/// Returns a list of all available updaters.
///
/// # Example
///
/// ```
/// use depup::updater::all_updaters;
///
/// assert_eq!(all_updaters().len(), 3);
/// ```
pub fn all_updaters() -> Vec<Box<dyn FileUpdater>> {
    vec![
        Box::new(YamlUpdater),
        Box::new(HclUpdater),
        Box::new(DotenvUpdater),
    ]
}

/// Returns the updater for a specific dialect.
pub fn updater_for(dialect: Dialect) -> Box<dyn FileUpdater> {
    match dialect {
        Dialect::Yaml => Box::new(YamlUpdater),
        Dialect::Hcl => Box::new(HclUpdater),
        Dialect::Dotenv => Box::new(DotenvUpdater),
    }
}

/// Matches a file name against an extension pattern: glob patterns match
/// the whole name, plain patterns are dot-suffix matches.
fn matches_extension(file_name: &str, pattern: &str) -> bool {
    if pattern.contains('*') {
        glob_match(pattern, file_name)
    } else {
        file_name.ends_with(pattern)
    }
}

/// Batch driver: validates the requested packages, then processes a file
/// or directory entrypoint, dispatching each selected file to the updater
/// that supports it.
///
/// Holds no per-file state; every file is an independent unit of work.
pub struct Updater {
    updaters: Vec<Box<dyn FileUpdater>>,
    dry_run: bool,
    recursive: bool,
    extensions: Vec<String>,
    ignored_paths: Vec<String>,
}

impl Updater {
    pub fn new() -> Self {
        Self {
            updaters: all_updaters(),
            dry_run: false,
            recursive: false,
            extensions: Vec::new(),
            ignored_paths: Vec::new(),
        }
    }

    /// Compute and report changes without writing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Walk directory entrypoints recursively.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Restrict processing to the given extension patterns. An empty list
    /// selects every supported extension.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Skip files whose path matches one of the given glob patterns.
    pub fn with_ignored_paths(mut self, patterns: Vec<String>) -> Self {
        self.ignored_paths = patterns;
        self
    }

    /// Processes the entrypoint and returns one report per handled file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPackages`] before touching any file when a
    /// requested package fails validation; I/O and dispatch errors abort
    /// the batch at the offending file.
    pub fn run(&self, entrypoint: &Path, packages: &[Package]) -> Result<Vec<FileReport>> {
        validate_packages(packages)?;

        let metadata = fs::metadata(entrypoint).map_err(|source| Error::Access {
            path: entrypoint.to_path_buf(),
            source,
        })?;

        if metadata.is_file() {
            return Ok(self.process_file(entrypoint, packages)?.into_iter().collect());
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut reports = Vec::new();
        for entry in WalkDir::new(entrypoint)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(report) = self.process_file(entry.path(), packages)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    fn process_file(&self, path: &Path, packages: &[Package]) -> Result<Option<FileReport>> {
        let file_name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name,
            None => return Ok(None),
        };

        if !self.selected(file_name) {
            return Ok(None);
        }
        if self.ignored(path) {
            debug!(path = %path.display(), "skipping ignored path");
            return Ok(None);
        }

        let Some(updater) = self.updaters.iter().find(|u| u.supports(file_name)) else {
            return Err(Error::NoUpdater {
                path: path.to_path_buf(),
            });
        };

        let options = UpdateOptions {
            dry_run: self.dry_run,
        };
        let update = updater.update_file(path, packages, &options)?;
        debug!(
            path = %path.display(),
            dialect = updater.dialect().as_str(),
            changed = update.changed,
            "processed file"
        );

        Ok(Some(FileReport {
            path: path.to_path_buf(),
            changed: update.changed,
            content: update.content,
        }))
    }

    fn selected(&self, file_name: &str) -> bool {
        if self.extensions.is_empty() {
            return self.updaters.iter().any(|u| u.supports(file_name));
        }
        self.extensions
            .iter()
            .any(|pattern| matches_extension(file_name, pattern))
    }

    fn ignored(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.ignored_paths.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, &path)
            } else {
                pattern.as_str() == path.as_ref()
            }
        })
    }
}

impl Default for Updater {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_packages(packages: &[Package]) -> Result<()> {
    let problems: Vec<Error> = packages
        .iter()
        .filter_map(|package| package.validate().err())
        .collect();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidPackages(problems))
    }
}
