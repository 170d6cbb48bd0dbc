use std::path::Path;

use crate::error::Result;
use crate::model::{Dialect, Package};
use crate::updater::annotation::CommentSyntax;
use crate::updater::rewrite::{rewrite_file, DialectRules};
use crate::updater::{FileUpdate, FileUpdater, UpdateOptions};

/// Line-oriented markup files (`.yaml`, `.yml`) with `#` comments.
pub struct YamlUpdater;

const RULES: DialectRules = DialectRules {
    syntaxes: &[CommentSyntax::Hash],
    env_values: false,
};

impl FileUpdater for YamlUpdater {
    fn name(&self) -> &'static str {
        "YAML documents"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Yaml
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &[".yaml", ".yml"]
    }

    fn update_file(
        &self,
        path: &Path,
        packages: &[Package],
        options: &UpdateOptions,
    ) -> Result<FileUpdate> {
        rewrite_file(path, packages, options, &RULES)
    }
}
