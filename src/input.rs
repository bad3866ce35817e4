use anyhow::{bail, Context, Result};
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

/// Splits text into lines without their line terminators. A final line terminator doesn't
/// start another line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = vec![];
    let mut start = 0;
    for end in memchr::memchr_iter(b'\n', text.as_bytes()) {
        lines.push(text[start..end].trim_end_matches('\r').to_owned());
        start = end + 1;
    }
    if start < text.len() {
        lines.push(text[start..].trim_end_matches('\r').to_owned());
    }
    lines
}

pub fn read_file(path: &Path) -> Result<String> {
    let content = std::fs::read(path).with_context(|| format!("reading '{}'", path.display()))?;
    Ok(String::from_utf8_lossy(&content).into_owned())
}

/// Rewrites the lines of a source file before alignment, e.g. to unify brace placement.
pub trait Reformatter {
    /// `path` is where the lines were read from, in case the language depends on it.
    fn reformat(&self, path: &Path, lines: Vec<String>) -> Result<Vec<String>>;
}

pub struct NoReformat;

impl Reformatter for NoReformat {
    fn reformat(&self, _path: &Path, lines: Vec<String>) -> Result<Vec<String>> {
        Ok(lines)
    }
}

/// Pipes the source through an external formatter such as clang-format.
pub struct ExternalReformatter {
    /// Program and leading arguments.
    pub command: Vec<String>,
    /// Passed as `-style=<style>`. Nothing is passed if empty.
    pub style: String,
}

impl ExternalReformatter {
    pub fn from_command_line(command: &str, style: &str) -> Result<Self> {
        let command = shell_words::split(command).with_context(|| format!("parsing reformat command '{command}'"))?;
        if command.is_empty() {
            bail!("the reformat command is empty");
        }
        Ok(ExternalReformatter {
            command,
            style: style.to_owned(),
        })
    }

    fn args(&self, path: &Path) -> Vec<String> {
        let mut args = self.command[1..].to_vec();
        if !self.style.is_empty() {
            args.push(format!("-style={}", self.style));
        }
        args.push(format!("-assume-filename={}", path.display()));
        args
    }
}

impl Reformatter for ExternalReformatter {
    fn reformat(&self, path: &Path, lines: Vec<String>) -> Result<Vec<String>> {
        let program = &self.command[0];
        let args = self.args(path);
        tracing::debug!(program = %program, ?args, "running reformatter");

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("running {}", shell_words::join(&self.command)))?;

        let mut input = lines.join("\n");
        input.push('\n');
        // Written from another thread, a formatter blocked on a full stdout pipe stops reading.
        let mut stdin = child.stdin.take().context("reformatter stdin is not piped")?;
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(result) => result.context("writing to reformatter")?,
            Err(_) => bail!("the thread writing to the reformatter panicked"),
        }
        // TODO: std::process::ExitStatus::exit_ok() is unstable
        if !output.status.success() {
            bail!("reformatting '{}' failed: {}", path.display(), output.status);
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_lines(&text))
    }
}

/// Reads a source file as lines, reformatted with `reformatter`.
pub fn read_source(path: &Path, reformatter: &dyn Reformatter) -> Result<Vec<String>> {
    let lines = split_lines(&read_file(path)?);
    reformatter.reformat(path, lines)
}
