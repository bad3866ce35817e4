use std::collections::HashMap;

use string_interner::DefaultSymbol;

use super::{preprocess::InternedSides, AlignedRange};

/// Finds the longest common blocks of two interned line sequences, ignoring junk lines.
pub(super) struct BlockMatcher<'a> {
    lines: &'a InternedSides,
    /// Positions of every non-junk line of the second side, ascending.
    positions_in_second: HashMap<DefaultSymbol, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    pub fn new(lines: &'a InternedSides) -> Self {
        let mut positions_in_second: HashMap<DefaultSymbol, Vec<usize>> = HashMap::new();
        for (j, &symbol) in lines.symbols[1].iter().enumerate() {
            if !lines.junk[1][j] {
                positions_in_second.entry(symbol).or_default().push(j);
            }
        }
        BlockMatcher {
            lines,
            positions_in_second,
        }
    }

    /// Longest run of equal non-junk lines with `starts` in `lo..hi` on both sides.
    ///
    /// Among equally long runs the one starting first on the first side wins, then the one
    /// starting first on the second side. Returns a block of size 0 if nothing matches.
    pub fn find_longest_match(&self, lo: [usize; 2], hi: [usize; 2]) -> AlignedRange {
        let mut best = AlignedRange { starts: lo, size: 0 };
        // Length of the run ending at (i - 1, j), keyed by j.
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for i in lo[0]..hi[0] {
            let mut new_run_lengths = HashMap::new();
            if !self.lines.junk[0][i] {
                if let Some(positions) = self.positions_in_second.get(&self.lines.symbols[0][i]) {
                    let first = positions.partition_point(|&j| j < lo[1]);
                    for &j in &positions[first..] {
                        if j >= hi[1] {
                            break;
                        }
                        let previous = j.checked_sub(1).and_then(|prev| run_lengths.get(&prev));
                        let k = previous.copied().unwrap_or(0) + 1;
                        new_run_lengths.insert(j, k);
                        if k > best.size {
                            best = AlignedRange {
                                starts: [i + 1 - k, j + 1 - k],
                                size: k,
                            };
                        }
                    }
                }
            }
            run_lengths = new_run_lengths;
        }
        best
    }

    /// All maximal matching blocks within `lo..hi`, ordered, followed by a size 0 block at `hi`.
    pub fn matching_blocks(&self, lo: [usize; 2], hi: [usize; 2]) -> Vec<AlignedRange> {
        let mut blocks = vec![];
        let mut queue = vec![(lo, hi)];
        while let Some((lo, hi)) = queue.pop() {
            let block = self.find_longest_match(lo, hi);
            if block.size == 0 {
                continue;
            }
            tracing::trace!(?lo, ?hi, ?block, "longest match");
            let end = block.ends();
            if lo[0] < block.starts[0] && lo[1] < block.starts[1] {
                queue.push((lo, block.starts));
            }
            if end[0] < hi[0] && end[1] < hi[1] {
                queue.push((end, hi));
            }
            blocks.push(block);
        }
        blocks.sort();

        let mut result: Vec<AlignedRange> = vec![];
        for block in blocks {
            match result.last_mut() {
                Some(last) if last.ends() == block.starts => last.size += block.size,
                _ => result.push(block),
            }
        }
        result.push(AlignedRange { starts: hi, size: 0 });
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::preprocess::{internalize_lines, JunkPolicy, NormalizeMode};

    fn blocks(old: &[&str], new: &[&str], policy: JunkPolicy) -> Vec<(usize, usize, usize)> {
        let interned = internalize_lines([old, new], NormalizeMode::StripCode, policy);
        BlockMatcher::new(&interned)
            .matching_blocks([0, 0], [old.len(), new.len()])
            .iter()
            .map(|block| (block.starts[0], block.starts[1], block.size))
            .collect()
    }

    #[test]
    fn identical_sequences() {
        let lines = ["int a;", "int b;", "int c;"];
        assert_eq!(blocks(&lines, &lines, JunkPolicy::EmptyLine), vec![(0, 0, 3), (3, 3, 0)]);
    }

    #[test]
    fn empty_sequences() {
        assert_eq!(blocks(&[], &["x++"], JunkPolicy::EmptyLine), vec![(0, 1, 0)]);
        assert_eq!(blocks(&[], &[], JunkPolicy::EmptyLine), vec![(0, 0, 0)]);
    }

    #[test]
    fn deleted_line_splits_block() {
        let old = ["aa", "cc"];
        let new = ["aa", "bb", "cc"];
        assert_eq!(blocks(&old, &new, JunkPolicy::EmptyLine), vec![(0, 0, 1), (1, 2, 1), (2, 3, 0)]);
    }

    #[test]
    fn junk_lines_never_match() {
        let old = ["foo();", "}", "bar();"];
        let new = ["foo();", "}", "bar();"];
        assert_eq!(
            blocks(&old, &new, JunkPolicy::ShortLine),
            vec![(0, 0, 1), (2, 2, 1), (3, 3, 0)]
        );
        assert_eq!(blocks(&old, &new, JunkPolicy::EmptyLine), vec![(0, 0, 3), (3, 3, 0)]);
    }

    #[test]
    fn only_junk_gives_no_blocks() {
        let lines = ["}", "{", ""];
        assert_eq!(blocks(&lines, &lines, JunkPolicy::ShortLine), vec![(3, 3, 0)]);
    }

    #[test]
    fn ties_prefer_earliest_start() {
        // "xx" matches at two places on the second side; the first one is used.
        let old = ["xx"];
        let new = ["yy", "xx", "zz", "xx"];
        assert_eq!(blocks(&old, &new, JunkPolicy::EmptyLine), vec![(0, 1, 1), (1, 4, 0)]);

        let old = ["aa", "bb"];
        let new = ["bb", "aa"];
        assert_eq!(blocks(&old, &new, JunkPolicy::EmptyLine), vec![(0, 1, 1), (2, 2, 0)]);
    }

    #[test]
    fn longest_block_wins_over_order() {
        let old = ["aa", "bb", "cc", "dd"];
        let new = ["bb", "cc", "dd", "aa"];
        assert_eq!(blocks(&old, &new, JunkPolicy::EmptyLine), vec![(1, 0, 3), (4, 4, 0)]);
    }

    #[test]
    fn find_longest_match_respects_bounds() {
        let old = ["aa", "bb", "cc"];
        let new = ["aa", "bb", "cc"];
        let interned = internalize_lines(
            [&old[..], &new[..]],
            NormalizeMode::Identity,
            JunkPolicy::EmptyLine,
        );
        let matcher = BlockMatcher::new(&interned);
        assert_eq!(
            matcher.find_longest_match([1, 0], [3, 2]),
            AlignedRange { starts: [1, 1], size: 1 }
        );
        assert_eq!(matcher.find_longest_match([2, 0], [3, 2]).size, 0);
    }

    #[test]
    fn matching_blocks_in_gap() {
        let old = ["aa", "bb", "cc", "dd"];
        let new = ["aa", "xx", "cc", "dd"];
        let interned = internalize_lines(
            [&old[..], &new[..]],
            NormalizeMode::Identity,
            JunkPolicy::EmptyLine,
        );
        let matcher = BlockMatcher::new(&interned);
        assert_eq!(
            matcher.matching_blocks([1, 1], [4, 3]),
            vec![
                AlignedRange { starts: [2, 2], size: 1 },
                AlignedRange { starts: [4, 3], size: 0 },
            ]
        );
    }
}
