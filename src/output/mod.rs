pub mod dashboard;
pub mod progress;
pub mod report;
pub mod terminal;

/// Print one line to stdout without tearing an active spinner.
pub fn emit(line: &str) {
    tracing_indicatif::indicatif_println!("{}", line);
}

/// Print a block of lines.
pub fn emit_all<I, S>(lines: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        emit(line.as_ref());
    }
}
