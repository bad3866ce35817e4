use super::{
    matching_blocks::BlockMatcher,
    preprocess::{internalize_lines, JunkPolicy, NormalizeMode},
    AlignedRange, AlignedSequences,
};

fn copy_lines(output: &mut [Vec<String>; 2], sources: &mut [impl Iterator<Item = String>; 2], counts: [usize; 2]) {
    for side in 0..2 {
        output[side].extend(sources[side].by_ref().take(counts[side]));
    }
}

fn pad_to_equal_length(output: &mut [Vec<String>; 2]) {
    let len = std::cmp::max(output[0].len(), output[1].len());
    for side in output.iter_mut() {
        side.resize(len, String::new());
    }
}

/// One alignment pass.
///
/// The ranges of `previous` stay aligned. Each gap before, between and after them is matched
/// under `mode` and `policy`, and unmatched lines are padded with empty lines so that both
/// sides of the result have the same length. Returned ranges are positions in the result.
pub fn align_two_sequences(
    previous: AlignedSequences,
    mode: NormalizeMode,
    policy: JunkPolicy,
) -> AlignedSequences {
    let AlignedSequences { lines, ranges: mut anchors } = previous;
    let lens = [0, 1].map(|side| lines[side].len());
    if anchors.last().map_or(true, |last| last.size != 0) {
        anchors.push(AlignedRange { starts: lens, size: 0 });
    }

    let interned = internalize_lines([&lines[0][..], &lines[1][..]], mode, policy);
    let matcher = BlockMatcher::new(&interned);

    let mut output: [Vec<String>; 2] = Default::default();
    let mut ranges = vec![];
    // Every input line is copied exactly once, in order, so the inputs can be consumed.
    let mut sources = lines.map(Vec::into_iter);
    let mut next = [0, 0];

    for anchor in &anchors {
        for block in matcher.matching_blocks(next, anchor.starts) {
            copy_lines(&mut output, &mut sources, [0, 1].map(|side| block.starts[side] - next[side]));
            pad_to_equal_length(&mut output);
            if block.size > 0 {
                ranges.push(AlignedRange {
                    starts: [output[0].len(), output[1].len()],
                    size: block.size,
                });
                copy_lines(&mut output, &mut sources, [block.size; 2]);
            }
            next = block.ends();
        }

        if anchor.size > 0 {
            ranges.push(AlignedRange {
                starts: [output[0].len(), output[1].len()],
                size: anchor.size,
            });
            copy_lines(&mut output, &mut sources, [anchor.size; 2]);
            next = anchor.ends();
        }
    }

    debug_assert_eq!(output[0].len(), output[1].len());
    AlignedSequences { lines: output, ranges }
}
