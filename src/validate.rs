use super::algorithm::{preprocess::strip_code_line, Alignment};

/// Checks the invariants of an alignment of `inputs`, given in the order passed to
/// `align_sources`. Returns a description of every violation.
pub fn validate(alignment: &Alignment, inputs: [&[String]; 2]) -> Vec<String> {
    let mut errors = vec![];
    let lines = &alignment.lines;
    let side_inputs = [
        inputs[alignment.debloated_input],
        inputs[1 - alignment.debloated_input],
    ];

    fn side_str(side: usize) -> &'static str {
        ["Debloated side", "Original side"][side]
    }

    // Both sides should have the same number of rows.
    if lines[0].len() != lines[1].len() {
        errors.push(format!(
            "Sides have different lengths: {} and {}",
            lines[0].len(),
            lines[1].len()
        ));
        return errors;
    }
    let rows = lines[0].len();

    // Each row should have a non-blank line on at least one side.
    for row in 0..rows {
        if lines[0][row].trim().is_empty() && lines[1][row].trim().is_empty() {
            errors.push(format!("Row {row} is blank on both sides"));
        }
    }

    // Apart from padding, each side should contain exactly the lines of its input.
    for side in 0..2 {
        let kept = lines[side].iter().filter(|line| !line.trim().is_empty());
        let expected = side_inputs[side].iter().filter(|line| !line.trim().is_empty());
        if !kept.eq(expected) {
            errors.push(format!("{} does not contain the lines of its input in order", side_str(side)));
        }
    }

    // Ranges should be non-empty, in bounds, increasing and non-overlapping.
    let errors_before_ranges = errors.len();
    let mut last_end = [0, 0];
    for (range_id, range) in alignment.ranges.iter().enumerate() {
        if range.size == 0 {
            errors.push(format!("Range {range_id} is empty"));
        }
        for side in 0..2 {
            if range.starts[side] < last_end[side] {
                errors.push(format!(
                    "Range {range_id} starts at {} on the {} which overlaps the previous range ending at {}",
                    range.starts[side],
                    side_str(side).to_lowercase(),
                    last_end[side]
                ));
            }
            if range.ends()[side] > rows {
                errors.push(format!(
                    "Range {range_id} ends at {} on the {}, past the last row {rows}",
                    range.ends()[side],
                    side_str(side).to_lowercase()
                ));
            }
        }
        last_end = range.ends();
    }
    if errors.len() > errors_before_ranges {
        return errors;
    }

    // Lines in a range should be equal up to indentation, semicolons and wrapping braces.
    for (range_id, range) in alignment.ranges.iter().enumerate() {
        for offset in 0..range.size {
            let debloated = &lines[0][range.starts[0] + offset];
            let original = &lines[1][range.starts[1] + offset];
            if strip_code_line(debloated) != strip_code_line(original) {
                errors.push(format!(
                    "Range {range_id} aligns '{debloated}' with different line '{original}'"
                ));
            }
        }
    }

    // Unaligned lines should be increasing, outside of ranges, and contain code.
    let mut covered = vec![false; rows];
    for range in &alignment.ranges {
        covered[range.starts[0]..range.ends()[0]].fill(true);
    }
    let mut last = 0;
    for &line_number in &alignment.unaligned_lines {
        if line_number <= last || line_number > rows {
            errors.push(format!("Unaligned line {line_number} is out of order or out of bounds"));
            continue;
        }
        last = line_number;
        if covered[line_number - 1] {
            errors.push(format!("Unaligned line {line_number} is inside an aligned range"));
        }
        if strip_code_line(&lines[0][line_number - 1]).is_empty() {
            errors.push(format!("Unaligned line {line_number} contains no code"));
        }
    }

    errors
}

pub fn print_errors(errors: &[String]) {
    if !errors.is_empty() {
        tracing::error!("alignment validation failed");
        for error in errors {
            tracing::error!("  {error}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::{align_sources, AlignedRange};

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn alignment_of_real_code_is_valid() {
        let debloated = owned(&["int main()", "{", "  return 0;", "}"]);
        let original = owned(&["int x;", "", "int main()", "{", "  if (x)", "    x++;", "  return 0;", "}"]);
        let alignment = align_sources([debloated.clone(), original.clone()]);
        assert_eq!(validate(&alignment, [&debloated, &original]), Vec::<String>::new());
    }

    #[test]
    fn detects_broken_alignment() {
        let inputs = [owned(&["aa", "bb"]), owned(&["aa", "cc"])];
        let alignment = Alignment {
            lines: [owned(&["aa", "bb", ""]), owned(&["aa", "cc", ""])],
            ranges: vec![AlignedRange { starts: [0, 0], size: 2 }],
            unaligned_lines: vec![1],
            debloated_input: 0,
        };
        let errors = validate(&alignment, [&inputs[0], &inputs[1]]);
        assert!(errors.contains(&"Row 2 is blank on both sides".to_owned()));
        assert!(errors.contains(&"Range 0 aligns 'bb' with different line 'cc'".to_owned()));
        assert!(errors.contains(&"Unaligned line 1 is inside an aligned range".to_owned()));
    }

    #[test]
    fn detects_overlapping_ranges() {
        let inputs = [owned(&["aa", "bb"]), owned(&["aa", "bb"])];
        let alignment = Alignment {
            lines: inputs.clone(),
            ranges: vec![
                AlignedRange { starts: [0, 0], size: 2 },
                AlignedRange { starts: [1, 1], size: 1 },
            ],
            unaligned_lines: vec![],
            debloated_input: 0,
        };
        let errors = validate(&alignment, [&inputs[0], &inputs[1]]);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Range 1 starts at 1 on the debloated side"));
    }
}
