mod matching_blocks;
mod merge;
mod postprocess;
pub mod preprocess;

pub use self::merge::align_two_sequences;
use self::{
    postprocess::collapse_blank_rows,
    preprocess::{JunkPolicy, NormalizeMode},
};

/// `size` lines starting at `starts[0]` on the first side correspond to `size` lines starting
/// at `starts[1]` on the second side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlignedRange {
    pub starts: [usize; 2],
    pub size: usize,
}

impl AlignedRange {
    pub fn ends(&self) -> [usize; 2] {
        self.starts.map(|start| start + self.size)
    }
}

/// Two sequences of lines together with the ranges in which they are already aligned.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AlignedSequences {
    pub lines: [Vec<String>; 2],
    pub ranges: Vec<AlignedRange>,
}

/// Normalization and junk rule of each pass, coarsest first.
///
/// The first pass only anchors top-level lines such as function headers, the second one adds
/// statements regardless of indentation and wrapping braces, the third one adds lone braces.
pub const PASSES: [(NormalizeMode, JunkPolicy); 3] = [
    (NormalizeMode::Identity, JunkPolicy::TopLevel),
    (NormalizeMode::StripCode, JunkPolicy::ShortLine),
    (NormalizeMode::StripCode, JunkPolicy::EmptyLine),
];

#[derive(Debug, PartialEq)]
pub struct Alignment {
    /// Aligned lines, debloated side first. Both sides have the same length.
    pub lines: [Vec<String>; 2],
    /// Aligned ranges, as positions in `lines`.
    pub ranges: Vec<AlignedRange>,
    /// 1-based numbers of debloated lines which are not part of any aligned range.
    pub unaligned_lines: Vec<usize>,
    /// Index of the input that was treated as the debloated one.
    pub debloated_input: usize,
}

/// Aligns the debloated and the original version of a source file.
///
/// The shorter input is assumed to be the debloated one (the first one on ties). Its lines are
/// matched onto the original, so short runs that are in the same order win over long runs that
/// were moved around.
pub fn align_sources(inputs: [Vec<String>; 2]) -> Alignment {
    let debloated_input = if inputs[0].len() <= inputs[1].len() { 0 } else { 1 };
    let [first, second] = inputs;
    let lines = if debloated_input == 0 {
        [first, second]
    } else {
        [second, first]
    };

    let start = AlignedSequences { lines, ranges: vec![] };
    let aligned = PASSES
        .iter()
        .enumerate()
        .fold(start, |sequences, (pass, &(mode, policy))| {
            let result = align_two_sequences(sequences, mode, policy);
            tracing::debug!(
                pass = pass + 1,
                ?policy,
                rows = result.lines[0].len(),
                ranges = result.ranges.len(),
                aligned_lines = result.ranges.iter().map(|range| range.size).sum::<usize>(),
                "alignment pass finished"
            );
            result
        });

    let (lines, ranges, unaligned_lines) = collapse_blank_rows(aligned);
    Alignment {
        lines,
        ranges,
        unaligned_lines,
        debloated_input,
    }
}
