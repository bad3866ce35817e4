use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// `<output_dir>/<stem>.aligned.<extension>` for an input at `input`.
pub fn aligned_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut name = stem.to_owned();
    name.push(".aligned");
    if let Some(extension) = input.extension() {
        name.push(".");
        name.push(extension);
    }
    output_dir.join(name)
}

pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    std::fs::write(path, lines.join("\n")).with_context(|| format!("writing '{}'", path.display()))
}

pub fn unaligned_report(unaligned_lines: &[usize]) -> String {
    let numbers: Vec<String> = unaligned_lines.iter().map(usize::to_string).collect();
    format!(
        "Lines in debloated program that failed to align: {} ({} lines in total)",
        numbers.join(", "),
        unaligned_lines.len()
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn output_paths() {
        assert_eq!(
            aligned_output_path(Path::new("/tmp/rm/rm-debloated.c"), Path::new(".")),
            PathBuf::from("./rm-debloated.aligned.c")
        );
        assert_eq!(
            aligned_output_path(Path::new("date.orig.c"), Path::new("out")),
            PathBuf::from("out/date.orig.aligned.c")
        );
        assert_eq!(
            aligned_output_path(Path::new("Makefile"), Path::new("out")),
            PathBuf::from("out/Makefile.aligned")
        );
    }

    #[test]
    fn report() {
        assert_eq!(
            unaligned_report(&[3, 17, 18]),
            "Lines in debloated program that failed to align: 3, 17, 18 (3 lines in total)"
        );
        assert_eq!(
            unaligned_report(&[]),
            "Lines in debloated program that failed to align:  (0 lines in total)"
        );
    }

    #[test]
    fn lines_are_joined_without_final_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.aligned.c");
        write_lines(&path, &["int x;".to_owned(), String::new(), "}".to_owned()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "int x;\n\n}");
    }
}
