use std::path::Path;

use crate::error::Result;
use crate::model::{Dialect, Package};
use crate::updater::annotation::CommentSyntax;
use crate::updater::rewrite::{rewrite_file, DialectRules};
use crate::updater::{FileUpdate, FileUpdater, UpdateOptions};

/// Brace-syntax files (`.hcl`, `.tf`, `.tfvars`) accepting both `#` and
/// `//` comments.
pub struct HclUpdater;

const RULES: DialectRules = DialectRules {
    syntaxes: &[CommentSyntax::Hash, CommentSyntax::Slash],
    env_values: false,
};

impl FileUpdater for HclUpdater {
    fn name(&self) -> &'static str {
        "HCL and Terraform files"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Hcl
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &[".hcl", ".tf", ".tfvars"]
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
