use string_interner::{DefaultSymbol, StringInterner};

/// How a line is rewritten before it is compared with lines of the other file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizeMode {
    Identity,
    /// Ignore indentation, semicolons and a pair of wrapping braces.
    StripCode,
}

/// Which lines are not allowed to start or extend a matching block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JunkPolicy {
    /// Only non-indented lines longer than one character can match.
    TopLevel,
    /// Lines of at most one character (lone braces) can't match.
    ShortLine,
    /// Everything except empty lines can match.
    EmptyLine,
}

impl JunkPolicy {
    pub fn is_junk(self, line: &str) -> bool {
        match self {
            JunkPolicy::TopLevel => is_short(line) || line.starts_with(['\t', ' ']),
            JunkPolicy::ShortLine => is_short(line),
            JunkPolicy::EmptyLine => line.is_empty(),
        }
    }
}

fn is_short(line: &str) -> bool {
    line.chars().nth(1).is_none()
}

/// Comparison form of a code line.
///
/// Reformatting and debloating may drop the braces around a single statement or move it
/// to a different indentation level, so `{ foo(); }` and `foo();` are considered equal.
pub fn strip_code_line(line: &str) -> &str {
    let line = line.trim_matches([' ', '\t', ';']);
    if line.starts_with('{') && line.ends_with('}') {
        line.trim_start_matches([' ', '\t', '{'])
            .trim_end_matches([' ', '\t', '}', ';'])
    } else {
        line
    }
}

pub fn normalize_line(line: &str, mode: NormalizeMode) -> &str {
    match mode {
        NormalizeMode::Identity => line,
        NormalizeMode::StripCode => strip_code_line(line),
    }
}

/// Normalized lines of both sides, interned into a shared symbol table, plus their junk flags.
pub(super) struct InternedSides {
    pub symbols: [Vec<DefaultSymbol>; 2],
    pub junk: [Vec<bool>; 2],
}

pub(super) fn internalize_lines<S: AsRef<str>>(
    sides: [&[S]; 2],
    mode: NormalizeMode,
    policy: JunkPolicy,
) -> InternedSides {
    let mut interner = StringInterner::default();
    let mut symbols = [vec![], vec![]];
    let mut junk = [vec![], vec![]];
    for side in 0..2 {
        for line in sides[side] {
            let normalized = normalize_line(line.as_ref(), mode);
            symbols[side].push(interner.get_or_intern(normalized));
            junk[side].push(policy.is_junk(normalized));
        }
    }
    InternedSides { symbols, junk }
}
