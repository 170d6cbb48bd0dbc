//! Locating and replacing semantic-version tokens inside a line of text.

use crate::model::Package;
use regex::Regex;
use std::sync::LazyLock;

/// Matches an optionally quoted semantic version. Numeric components must
/// not carry a leading zero; prerelease and build suffixes follow the
/// semver grammar. Quote characters are captured separately so a
/// replacement can reuse them.
static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?P<open>["']?)"#,
        r"(?P<version>(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)",
        r"(?:-(?:0|[1-9]\d*|\d*[A-Za-z-][0-9A-Za-z-]*)(?:\.(?:0|[1-9]\d*|\d*[A-Za-z-][0-9A-Za-z-]*))*)?",
        r"(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)",
        r#"(?P<close>["']?)"#,
    ))
    .expect("version token pattern")
});

/// A version token located in a text span.
///
/// `start..end` covers the full match including any captured quote
/// characters; `version` is the bare semantic version between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VersionMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub version: &'a str,
    pub open_quote: &'a str,
    pub close_quote: &'a str,
}

/// Returns the first version token in `text`, or `None`.
///
/// A candidate is rejected when an unquoted side of the version core
/// touches an alphanumeric or `.` character: `01.2.3`, `v1.2.3` and the
/// components of `10.0.0.0/16` are not versions. A quote on a side lifts
/// that side's check.
pub(crate) fn find_version(text: &str) -> Option<VersionMatch<'_>> {
    let mut at = 0;
    while at <= text.len() {
        let caps = VERSION_TOKEN.captures_at(text, at)?;
        let full = caps.get(0).expect("whole match");
        let open = caps.name("open").expect("open group");
        let version = caps.name("version").expect("version group");
        let close = caps.name("close").expect("close group");

        let clear_before = !open.as_str().is_empty()
            || text[..version.start()]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '.');
        let clear_after = !close.as_str().is_empty()
            || text[version.end()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '.');

        if clear_before && clear_after {
            return Some(VersionMatch {
                start: full.start(),
                end: full.end(),
                version: version.as_str(),
                open_quote: open.as_str(),
                close_quote: close.as_str(),
            });
        }

        at = full.start() + 1;
    }
    None
}

/// Strips a leading comparison-range operator (`>=`, `~`, `^`, ...) and
/// surrounding whitespace, leaving the bare version for comparison.
pub(crate) fn normalize_constraint(version: &str) -> &str {
    version
        .trim_start_matches(['>', '=', '<', '~', '^'])
        .trim()
}

/// Substitutes the matched token in `segment` when `annotated` names a
/// requested package whose version differs from the current one.
///
/// The replacement reuses the original quote characters and touches only
/// the matched span; equal versions (after constraint stripping) yield
/// `None` so a second run over the same content is a no-op.
pub(crate) fn replace_version(
    segment: &str,
    annotated: &str,
    packages: &[Package],
    m: &VersionMatch<'_>,
) -> Option<String> {
    let package = packages.iter().find(|p| p.name == annotated)?;

    if normalize_constraint(m.version) == package.version {
        return None;
    }

    let mut updated = String::with_capacity(segment.len() + package.version.len());
    updated.push_str(&segment[..m.start]);
    updated.push_str(m.open_quote);
    updated.push_str(&package.version);
    updated.push_str(m.close_quote);
    updated.push_str(&segment[m.end..]);
    Some(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_of(text: &str) -> Option<&str> {
        find_version(text).map(|m| m.version)
    }

    #[test]
    fn test_find_bare_version() {
        let m = find_version("version: 1.0.0").unwrap();
        assert_eq!(m.version, "1.0.0");
        assert_eq!(m.open_quote, "");
        assert_eq!(m.close_quote, "");
    }

    #[test]
    fn test_find_double_quoted_version() {
        let m = find_version("version = \"3.14.0\"").unwrap();
        assert_eq!(m.version, "3.14.0");
        assert_eq!(m.open_quote, "\"");
        assert_eq!(m.close_quote, "\"");
    }

    #[test]
    fn test_find_single_quoted_version() {
        let m = find_version("version: '1.0.0'").unwrap();
        assert_eq!((m.open_quote, m.close_quote), ("'", "'"));
    }

    #[test]
    fn test_find_prerelease_and_build() {
        assert_eq!(
            version_of("version: 1.0.0-alpha.1+build.2"),
            Some("1.0.0-alpha.1+build.2")
        );
        assert_eq!(version_of("tag: 2.0.0-beta.1"), Some("2.0.0-beta.1"));
    }

    #[test]
    fn test_find_version_after_constraint_operator() {
        // the operator stays outside the match, so it survives replacement
        let m = find_version("version = \">= 4.0.0\"").unwrap();
        assert_eq!(m.version, "4.0.0");
        assert_eq!(m.open_quote, "");
        assert_eq!(m.close_quote, "\"");

        let m = find_version("version = \">=4.0.0\"").unwrap();
        assert_eq!(m.version, "4.0.0");
    }

    #[test]
    fn test_find_version_in_image_reference() {
        assert_eq!(version_of("- image: company/my-app:1.0.0"), Some("1.0.0"));
    }

    #[test]
    fn test_leading_zero_component_never_matches() {
        assert_eq!(version_of("version: 01.2.3"), None);
        assert_eq!(version_of("version: 1.02.3"), None);
        assert_eq!(version_of("version: 1.2.03"), None);
    }

    #[test]
    fn test_word_prefixed_token_never_matches() {
        assert_eq!(version_of("tag: v1.2.3"), None);
        assert_eq!(version_of("release2.3.4"), None);
    }

    #[test]
    fn test_dotted_quad_never_matches() {
        assert_eq!(version_of("cidr = 10.0.0.0/16"), None);
        assert_eq!(version_of("host: 192.168.0.1"), None);
    }

    #[test]
    fn test_later_valid_token_is_found() {
        // the first candidate is part of a dotted quad; the second is clean
        assert_eq!(version_of("10.0.0.0 then 1.2.3"), Some("1.2.3"));
    }

    #[test]
    fn test_normalize_constraint() {
        assert_eq!(normalize_constraint("1.0.0"), "1.0.0");
        assert_eq!(normalize_constraint(">=1.0.0"), "1.0.0");
        assert_eq!(normalize_constraint(">= 1.0.0"), "1.0.0");
        assert_eq!(normalize_constraint("~2.3.4"), "2.3.4");
        assert_eq!(normalize_constraint("^2.3.4 "), "2.3.4");
    }

    #[test]
    fn test_replace_preserves_quotes_and_surroundings() {
        let segment = "  version = \"1.0.0\"  # pinned";
        let m = find_version(segment).unwrap();
        let packages = [Package::new("test-pkg", "2.0.0")];
        let updated = replace_version(segment, "test-pkg", &packages, &m).unwrap();
        assert_eq!(updated, "  version = \"2.0.0\"  # pinned");
    }

    #[test]
    fn test_replace_skips_equal_version() {
        let segment = "version = \">=2.0.0\"";
        let m = find_version(segment).unwrap();
        let packages = [Package::new("test-pkg", "2.0.0")];
        assert_eq!(replace_version(segment, "test-pkg", &packages, &m), None);
    }

    #[test]
    fn test_replace_skips_unknown_package() {
        let segment = "version = 1.0.0";
        let m = find_version(segment).unwrap();
        let packages = [Package::new("other-pkg", "2.0.0")];
        assert_eq!(replace_version(segment, "test-pkg", &packages, &m), None);
    }

    #[test]
    fn test_replace_targets_matched_span_only() {
        // an identical earlier run of digits is rejected by the boundary
        // check; the replacement must still land on the accepted span
        let segment = "v1.2.3 and 1.2.3";
        let m = find_version(segment).unwrap();
        let packages = [Package::new("test-pkg", "9.9.9")];
        let updated = replace_version(segment, "test-pkg", &packages, &m).unwrap();
        assert_eq!(updated, "v1.2.3 and 9.9.9");
    }
}
