//! Shared line-rewriting driver used by every dialect updater.
//!
//! A file is read whole, split into lines, and rewritten in a single
//! forward pass with one line of lookback. Each line is resolved
//! independently: a trailing annotation on the line itself governs it
//! (inline case); otherwise an annotation on the immediately preceding
//! line does. Lines without a governing annotation pass through
//! byte-for-byte, and the write only happens when something changed.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Package;
use crate::updater::annotation::{
    find_annotation, is_comment_line, split_inline_comment, CommentSyntax,
};
use crate::updater::version::{find_version, replace_version};
use crate::updater::{FileUpdate, UpdateOptions};

/// Per-dialect knobs for the shared driver.
pub(crate) struct DialectRules {
    /// Comment syntaxes in recognition order; the first match wins.
    pub syntaxes: &'static [CommentSyntax],
    /// Isolate the value of a `KEY=VALUE` line before searching for a
    /// version token (dotenv), instead of searching the whole pre-comment
    /// content.
    pub env_values: bool,
}

static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^=]+=").expect("key value pattern"));

pub(crate) fn rewrite_file(
    path: &Path,
    packages: &[Package],
    options: &UpdateOptions,
    rules: &DialectRules,
) -> Result<FileUpdate> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (lines, trailing_newline) = split_lines(&raw);
    let (content, changed) = process_lines(&lines, packages, trailing_newline, rules);

    if changed && !options.dry_run {
        fs::write(path, &content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(FileUpdate { content, changed })
}

/// Splits on `\n` only, reporting whether the content ended with a
/// newline. A `\r` from CRLF input stays part of the line text so that
/// reassembly reproduces the original bytes.
fn split_lines(content: &str) -> (Vec<&str>, bool) {
    if content.is_empty() {
        return (Vec::new(), false);
    }
    let trailing_newline = content.ends_with('\n');
    let mut lines: Vec<&str> = content.split('\n').collect();
    if trailing_newline {
        lines.pop();
    }
    (lines, trailing_newline)
}

pub(crate) fn process_lines(
    lines: &[&str],
    packages: &[Package],
    trailing_newline: bool,
    rules: &DialectRules,
) -> (String, bool) {
    let mut output = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    let mut changed = false;

    for (index, line) in lines.iter().enumerate() {
        let previous = if index > 0 { Some(lines[index - 1]) } else { None };
        match rewrite_line(line, previous, packages, rules) {
            Some(updated) => {
                output.push_str(&updated);
                changed = true;
            }
            None => output.push_str(line),
        }
        if index + 1 < lines.len() || trailing_newline {
            output.push('\n');
        }
    }

    (output, changed)
}

/// Rewrites one line, or returns `None` when it passes through unchanged.
fn rewrite_line(
    line: &str,
    previous: Option<&str>,
    packages: &[Package],
    rules: &DialectRules,
) -> Option<String> {
    // blank lines and whole-line comments never carry a value
    if line.trim().is_empty() || is_comment_line(line, rules.syntaxes) {
        return None;
    }

    // inline case: a trailing annotation plus a version token on the same
    // line. Once both are present the inline annotation alone governs the
    // line; the preceding line is not consulted.
    for &syntax in rules.syntaxes {
        let Some((content, comment)) = split_inline_comment(line, syntax) else {
            continue;
        };
        let Some(annotated) = find_annotation(comment, rules.syntaxes) else {
            continue;
        };
        let (prefix, target) = version_target(content, rules)?;
        let token = match find_version(target) {
            Some(token) => token,
            None => continue,
        };
        let updated = replace_version(target, annotated, packages, &token)?;
        return Some(format!("{prefix}{updated}{comment}"));
    }

    // preceding-comment case
    let annotated = find_annotation(previous?, rules.syntaxes)?;
    let (content, comment) = rules
        .syntaxes
        .iter()
        .find_map(|&syntax| split_inline_comment(line, syntax))
        .unwrap_or((line, ""));
    let (prefix, target) = version_target(content, rules)?;
    let token = find_version(target)?;
    let updated = replace_version(target, annotated, packages, &token)?;
    Some(format!("{prefix}{updated}{comment}"))
}

/// Narrows the searchable span of a pre-comment content slice: the whole
/// slice for markup and brace syntaxes, the value portion of a
/// `KEY=VALUE` line for dotenv.
fn version_target<'a>(content: &'a str, rules: &DialectRules) -> Option<(&'a str, &'a str)> {
    if rules.env_values {
        let key = KEY_VALUE.find(content)?;
        Some((&content[..key.end()], &content[key.end()..]))
    } else {
        Some(("", content))
    }
}
