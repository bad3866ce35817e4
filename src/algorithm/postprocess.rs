use super::{preprocess::strip_code_line, AlignedRange, AlignedSequences};

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Drops rows that are blank on both sides, which only exist because of padding.
///
/// Returns the remaining rows, the aligned ranges moved to the remaining rows, and the 1-based
/// numbers of remaining rows whose debloated line has code but is not in any aligned range.
pub(super) fn collapse_blank_rows(aligned: AlignedSequences) -> ([Vec<String>; 2], Vec<AlignedRange>, Vec<usize>) {
    let AlignedSequences { lines, ranges } = aligned;
    let [debloated, original] = lines;
    debug_assert_eq!(debloated.len(), original.len());

    let mut covered = vec![false; debloated.len()];
    for range in &ranges {
        debug_assert_eq!(range.starts[0], range.starts[1]);
        covered[range.starts[0]..range.ends()[0]].fill(true);
    }

    let mut output: [Vec<String>; 2] = Default::default();
    let mut new_positions = Vec::with_capacity(debloated.len());
    let mut unaligned_lines = vec![];
    for (row, (debloated_line, original_line)) in debloated.into_iter().zip(original).enumerate() {
        if is_blank(&debloated_line) && is_blank(&original_line) {
            new_positions.push(None);
            continue;
        }
        let position = output[0].len();
        if !covered[row] && !strip_code_line(&debloated_line).is_empty() {
            unaligned_lines.push(position + 1);
        }
        new_positions.push(Some(position));
        output[0].push(debloated_line);
        output[1].push(original_line);
    }

    let ranges = ranges
        .iter()
        .filter_map(|range| {
            let mut kept = new_positions[range.starts[0]..range.ends()[0]].iter().flatten();
            let &start = kept.next()?;
            Some(AlignedRange {
                starts: [start; 2],
                size: 1 + kept.count(),
            })
        })
        .collect();

    (output, ranges, unaligned_lines)
}

#[cfg(test)]
mod test {
    use super::*;

    fn aligned(debloated: &[&str], original: &[&str], ranges: &[(usize, usize)]) -> AlignedSequences {
        AlignedSequences {
            lines: [debloated, original].map(|side| side.iter().map(|line| line.to_string()).collect()),
            ranges: ranges
                .iter()
                .map(|&(start, size)| AlignedRange { starts: [start; 2], size })
                .collect(),
        }
    }

    #[test]
    fn blank_rows_are_dropped() {
        let input = aligned(&["aa", "", " ", "bb"], &["aa", "", "\t", "bb"], &[(0, 1), (3, 1)]);
        let (lines, ranges, unaligned) = collapse_blank_rows(input);
        assert_eq!(lines, [vec!["aa", "bb"], vec!["aa", "bb"]]);
        assert_eq!(
            ranges,
            vec![
                AlignedRange { starts: [0, 0], size: 1 },
                AlignedRange { starts: [1, 1], size: 1 },
            ]
        );
        assert!(unaligned.is_empty());
    }

    #[test]
    fn unaligned_lines_are_renumbered() {
        let input = aligned(
            &["", "aa", "", "xx", "", "yy;", "}"],
            &["", "aa", "", "", "zz", "", ""],
            &[(1, 1)],
        );
        let (lines, _, unaligned) = collapse_blank_rows(input);
        assert_eq!(lines[0], vec!["aa", "xx", "", "yy;", "}"]);
        assert_eq!(unaligned, vec![2, 4, 5]);
    }

    #[test]
    fn lines_without_code_are_not_unaligned() {
        let input = aligned(&[";", "{ }"], &["aa", "bb"], &[]);
        let (_, _, unaligned) = collapse_blank_rows(input);
        assert!(unaligned.is_empty());
    }

    #[test]
    fn trailing_unaligned_lines_are_reported() {
        let input = aligned(&["aa", "bb"], &["aa", ""], &[(0, 1)]);
        let (_, _, unaligned) = collapse_blank_rows(input);
        assert_eq!(unaligned, vec![2]);
    }
}
