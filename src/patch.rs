use crate::input::read_file;
use anyhow::{bail, Context, Result};
use regex::Regex;
use once_cell::sync::Lazy;
use std::path::Path;

/// 1-based, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    /// Copy lines from the reference file unless they only differ in whitespace and semicolons.
    AddBack,
    /// Empty the lines.
    Remove,
    /// Make the first line of each range print a message and exit, so reaching code that
    /// depends on the removed lines is detected at run time.
    InsertExit,
}

pub const EXIT_STATUS: i32 = 6;

static RE_LINE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").unwrap());

pub fn parse_line_range(entry: &str) -> Result<LineRange> {
    let Some(captures) = RE_LINE_RANGE.captures(entry) else {
        bail!("Invalid line range: {entry}");
    };
    let start: usize = captures[1].parse().with_context(|| format!("Invalid line range: {entry}"))?;
    let end: usize = captures[2].parse().with_context(|| format!("Invalid line range: {entry}"))?;
    if start == 0 || start > end {
        bail!("Invalid line range: {entry}");
    }
    Ok(LineRange { start, end })
}

/// Parses a list like `1-2,5-6`. Malformed entries are reported and skipped.
pub fn parse_line_ranges(list: &str) -> Vec<LineRange> {
    let mut result = vec![];
    for entry in list.split(',') {
        if entry.trim().is_empty() {
            continue;
        }
        match parse_line_range(entry) {
            Ok(range) => result.push(range),
            Err(error) => tracing::warn!("{error:#}"),
        }
    }
    result
}

/// Whitespace and trailing semicolons don't count as a difference, so indentation of the
/// patched file is preserved.
fn same_statement(a: &str, b: &str) -> bool {
    fn trim(line: &str) -> &str {
        line.trim_matches([' ', '\t', '\n', '\r']).trim_end_matches(';')
    }
    trim(a) == trim(b)
}

fn line_terminator(line: &str) -> &str {
    let content = line.trim_end_matches(['\n', '\r']);
    &line[content.len()..]
}

/// Replaces the content of `line`, keeping its terminator.
fn replace_content(line: &mut String, content: &str) {
    let replaced = format!("{}{}", content.trim_end_matches(['\n', '\r']), line_terminator(line));
    *line = replaced;
}

fn leading_indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
}

fn exit_line(line: &str, reference: &str, line_number: usize) -> String {
    let statement = line.trim_start_matches([' ', '\t']).trim_end();
    format!(
        "{}{statement} printf(\"<This branch (L{line_number}) is removed by Cov debloating tool>\\n\"); exit({EXIT_STATUS});",
        leading_indentation(reference),
    )
}

/// Applies `mode` to every range of `lines`. Lines keep their terminators. Ranges that don't fit
/// in both files are reported and skipped; for `InsertExit` only the first line has to fit.
/// Returns the number of lines that changed.
pub fn apply_patch(lines: &mut [String], reference: &[String], ranges: &[LineRange], mode: PatchMode) -> usize {
    let mut changed = 0;
    for range in ranges {
        let last_line = std::cmp::min(lines.len(), reference.len());
        let last_edited = match mode {
            PatchMode::InsertExit => range.start,
            PatchMode::AddBack | PatchMode::Remove => range.end,
        };
        if last_edited > last_line {
            tracing::warn!(
                "Line range {}-{} is past the end of the file ({last_line} lines)",
                range.start,
                range.end
            );
            continue;
        }
        let rows = range.start - 1..range.end;
        match mode {
            PatchMode::AddBack => {
                for row in rows {
                    if !same_statement(&lines[row], &reference[row]) {
                        replace_content(&mut lines[row], &reference[row]);
                        changed += 1;
                    }
                }
            }
            PatchMode::Remove => {
                for line in &mut lines[rows] {
                    if line.len() != line_terminator(line).len() {
                        replace_content(line, "");
                        changed += 1;
                    }
                }
            }
            PatchMode::InsertExit => {
                let row = range.start - 1;
                let replaced = exit_line(&lines[row], &reference[row], range.start);
                replace_content(&mut lines[row], &replaced);
                changed += 1;
            }
        }
    }
    changed
}

/// Patches the file at `path` in place, using the file at `reference_path`.
pub fn patch_file(path: &Path, reference_path: &Path, ranges: &[LineRange], mode: PatchMode) -> Result<usize> {
    let content = read_file(path)?;
    let reference = read_file(reference_path)?;
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_owned).collect();
    let reference: Vec<String> = reference.split_inclusive('\n').map(str::to_owned).collect();

    let changed = apply_patch(&mut lines, &reference, ranges, mode);
    tracing::info!(path = %path.display(), ?mode, changed, "patched");

    std::fs::write(path, lines.concat()).with_context(|| format!("writing '{}'", path.display()))?;
    Ok(changed)
}
