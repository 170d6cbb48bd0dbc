//! Recognizing `depup package=<name>` annotation comments.
//!
//! An annotation lives inside a comment and names the package whose
//! version pin it governs: `# depup package=redis`, or
//! `// depup package=aws-provider` in HCL. Whitespace between the comment
//! marker, the keyword and the key is free.

use regex::Regex;
use std::sync::LazyLock;

static HASH_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*depup\s+package=(\S+)").expect("hash annotation pattern"));

static SLASH_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*depup\s+package=(\S+)").expect("slash annotation pattern"));

/// A comment syntax a dialect accepts. Listed per dialect in a fixed
/// order; recognizers try them in that order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommentSyntax {
    Hash,
    Slash,
}

impl CommentSyntax {
    pub(crate) fn token(self) -> &'static str {
        match self {
            CommentSyntax::Hash => "#",
            CommentSyntax::Slash => "//",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            CommentSyntax::Hash => &HASH_ANNOTATION,
            CommentSyntax::Slash => &SLASH_ANNOTATION,
        }
    }
}

/// Returns the package name of the first annotation found in `text`.
pub(crate) fn find_annotation<'a>(text: &'a str, syntaxes: &[CommentSyntax]) -> Option<&'a str> {
    syntaxes.iter().find_map(|syntax| {
        syntax
            .pattern()
            .captures(text)
            .map(|caps| caps.get(1).expect("package name group").as_str())
    })
}

/// Splits `line` at the first occurrence of the comment token, attaching
/// any whitespace before the token to the comment part so that
/// `content + comment` reassembles the line byte-for-byte.
pub(crate) fn split_inline_comment(line: &str, syntax: CommentSyntax) -> Option<(&str, &str)> {
    let index = line.find(syntax.token())?;
    let content_end = line[..index].trim_end().len();
    Some((&line[..content_end], &line[content_end..]))
}

/// True when the first non-whitespace characters of `line` begin a comment.
pub(crate) fn is_comment_line(line: &str, syntaxes: &[CommentSyntax]) -> bool {
    let trimmed = line.trim_start();
    syntaxes
        .iter()
        .any(|syntax| trimmed.starts_with(syntax.token()))
}
