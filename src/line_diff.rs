/// Comparison form of a line of an aligned file, ignoring whitespace and trailing semicolons.
fn trim_statement(line: &str) -> &str {
    line.trim().trim_end_matches(';')
}

/// 1-based numbers of the rows of two aligned files whose lines differ, i.e. the lines that
/// were debloated. Rows missing from `original` count as empty.
pub fn debloated_lines<S: AsRef<str>>(debloated: &[S], original: &[S]) -> Vec<usize> {
    let mut result = vec![];
    for (row, line) in debloated.iter().enumerate() {
        let original_line: &str = original.get(row).map_or("", |line| line.as_ref());
        if trim_statement(line.as_ref()) != trim_statement(original_line) {
            result.push(row + 1);
        }
    }
    result
}

/// Space separated, after a leading space.
pub fn format_line_list(lines: &[usize]) -> String {
    let numbers: Vec<String> = lines.iter().map(usize::to_string).collect();
    format!(" {}", numbers.join(" "))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn differing_rows() {
        let debloated = ["int x;", "", "  foo()", "}", "{ b; }"];
        let original = ["int x", "  if (a)", "foo();", "}", "if (a) { a; } else { b; }"];
        assert_eq!(debloated_lines(&debloated, &original), vec![2, 5]);
    }

    #[test]
    fn lone_semicolon_differs() {
        assert_eq!(debloated_lines(&[";"], &["x++;"]), vec![1]);
        assert_eq!(debloated_lines(&[";"], &[""]), Vec::<usize>::new());
    }

    #[test]
    fn shorter_original() {
        assert_eq!(debloated_lines(&["a", "b", ""], &["a"]), vec![2]);
    }

    #[test]
    fn list_format() {
        assert_eq!(format_line_list(&[1, 5, 12]), " 1 5 12");
        assert_eq!(format_line_list(&[]), " ");
    }
}
