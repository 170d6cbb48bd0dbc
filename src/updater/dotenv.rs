use std::path::Path;

use crate::error::Result;
use crate::model::{Dialect, Package};
use crate::updater::annotation::CommentSyntax;
use crate::updater::rewrite::{rewrite_file, DialectRules};
use crate::updater::{FileUpdate, FileUpdater, UpdateOptions};

/// `KEY=VALUE` environment files (`.env` plus `.env.*` variants) with `#`
/// comments. The version token is searched only in the value portion of a
/// line, since values are not always quoted and may be followed by an
/// inline comment.
pub struct DotenvUpdater;

const RULES: DialectRules = DialectRules {
    syntaxes: &[CommentSyntax::Hash],
    env_values: true,
};

impl FileUpdater for DotenvUpdater {
    fn name(&self) -> &'static str {
        "Dotenv files"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Dotenv
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &[".env", ".env.*"]
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updater::FileUpdater;
    use std::fs;

    fn update(content: &str, packages: &[Package]) -> (String, bool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, content).unwrap();

        let update = DotenvUpdater
            .update_file(&path, packages, &UpdateOptions { dry_run: false })
            .unwrap();
        (update.content, update.changed)
    }

    #[test]
    fn test_previous_line_comment() {
        let (content, changed) = update(
            "# depup package=test-pkg\nVERSION=1.0.0\n",
            &[Package::new("test-pkg", "2.0.0")],
        );
        assert!(changed);
        assert_eq!(content, "# depup package=test-pkg\nVERSION=2.0.0\n");
    }

    #[test]
    fn test_inline_comment() {
        let (content, changed) = update(
            "VERSION=1.0.0 # depup package=test-pkg\n",
            &[Package::new("test-pkg", "2.0.0")],
        );
        assert!(changed);
        assert_eq!(content, "VERSION=2.0.0 # depup package=test-pkg\n");
    }

    #[test]
    fn test_quoted_values() {
        let (content, changed) = update(
            "# depup package=test-pkg\nVERSION=\"1.0.0\"\n",
            &[Package::new("test-pkg", "2.0.0")],
        );
        assert!(changed);
        assert_eq!(content, "# depup package=test-pkg\nVERSION=\"2.0.0\"\n");

        let (content, changed) = update(
            "VERSION='1.0.0' # depup package=test-pkg\n",
            &[Package::new("test-pkg", "2.0.0")],
        );
        assert!(changed);
        assert_eq!(content, "VERSION='2.0.0' # depup package=test-pkg\n");
    }

    #[test]
    fn test_no_depup_comments() {
        let original = "VERSION=1.0.0\nNAME=service\n";
        let (content, changed) = update(original, &[Package::new("test-pkg", "2.0.0")]);
        assert!(!changed);
        assert_eq!(content, original);
    }

    #[test]
    fn test_no_matching_package() {
        let original = "# depup package=test-pkg\nVERSION=1.0.0\n";
        let (content, changed) = update(original, &[Package::new("other-pkg", "2.0.0")]);
        assert!(!changed);
        assert_eq!(content, original);
    }

    #[test]
    fn test_no_version_change_needed() {
        let original = "VERSION=1.0.0 # depup package=test-pkg\n";
        let (content, changed) = update(original, &[Package::new("test-pkg", "1.0.0")]);
        assert!(!changed);
        assert_eq!(content, original);
    }

    #[test]
    fn test_empty_file() {
        let (content, changed) = update("", &[Package::new("test-pkg", "2.0.0")]);
        assert!(!changed);
        assert_eq!(content, "");
    }

    #[test]
    fn test_prerelease_and_build_metadata() {
        let (content, changed) = update(
            "VERSION=\"1.0.0\" # depup package=test-pkg\n",
            &[Package::new("test-pkg", "1.0.0+build.123")],
        );
        assert!(changed);
        assert_eq!(content, "VERSION=\"1.0.0+build.123\" # depup package=test-pkg\n");

        let (content, changed) = update(
            "# depup package=test-pkg\nVERSION='1.0.0'\n",
            &[Package::new("test-pkg", "1.0.0-alpha.1+build.123")],
        );
        assert!(changed);
        assert_eq!(
            content,
            "# depup package=test-pkg\nVERSION='1.0.0-alpha.1+build.123'\n"
        );
    }

    #[test]
    fn test_mixed_comment_styles_and_values() {
        let content = "# Regular comment\n\
                       APP_VERSION=1.0.0 # depup package=my-app\n\
                       # depup package=database\n\
                       DB_VERSION=\"2.1.0\"\n\
                       CACHE_VERSION='1.5.0' # depup package=cache\n";
        let (updated, changed) = update(
            content,
            &[
                Package::new("my-app", "1.1.0"),
                Package::new("database", "2.2.0"),
                Package::new("cache", "1.6.0"),
            ],
        );
        assert!(changed);
        assert_eq!(
            updated,
            "# Regular comment\n\
             APP_VERSION=1.1.0 # depup package=my-app\n\
             # depup package=database\n\
             DB_VERSION=\"2.2.0\"\n\
             CACHE_VERSION='1.6.0' # depup package=cache\n"
        );
    }

    #[test]
    fn test_spaces_around_separator() {
        let content = "# depup package=app\n\
                       APP_VERSION = 1.0.0\n\
                       OTHER_VAR = some value # depup package=other\n";
        let (updated, changed) = update(
            content,
            &[
                Package::new("app", "2.0.0"),
                Package::new("other", "3.0.0"),
            ],
        );
        assert!(changed);
        assert_eq!(
            updated,
            "# depup package=app\n\
             APP_VERSION = 2.0.0\n\
             OTHER_VAR = some value # depup package=other\n"
        );
    }

    #[test]
    fn test_orphaned_annotation_between_comments() {
        let content = "# Regular comment\n\
                       # depup package=orphaned\n\
                       # Another comment\n\
                       VERSION=1.0.0 # Not a depup comment\n";
        let (updated, changed) = update(content, &[Package::new("orphaned", "9.9.9")]);
        assert!(!changed);
        assert_eq!(updated, content);
    }

    #[test]
    fn test_line_without_separator_is_ignored() {
        let content = "# depup package=test-pkg\nset 1.0.0 as the pin\n";
        let (updated, changed) = update(content, &[Package::new("test-pkg", "2.0.0")]);
        assert!(!changed);
        assert_eq!(updated, content);
    }

    #[test]
    fn test_env_variant_file_names_supported() {
        let updater = DotenvUpdater;
        assert!(updater.supports(".env"));
        assert!(updater.supports(".env.local"));
        assert!(updater.supports(".env.production"));
        assert!(updater.supports("service.env"));
        assert!(!updater.supports("env.txt"));
        assert!(!updater.supports("environment"));
    }
}
