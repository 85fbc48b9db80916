//! Console status lines for a conversion run

use colored::*;
use std::io::Write;
use std::path::Path;

/// Writes the user-facing status messages
///
/// Failures to write status text are ignored: the conversion result does not
/// depend on the console.
pub struct StatusReporter<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> StatusReporter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }

    pub fn source_found(&mut self, path: &Path) {
        self.line(format!(
            "{} {}",
            "CSV file found at".bright_green(),
            path.display().to_string().bright_white()
        ));
    }

    pub fn source_missing(&mut self, path: &Path) {
        self.line(format!(
            "{} {}",
            "CSV file not found at".bright_yellow(),
            path.display().to_string().bright_white()
        ));
    }

    pub fn parsed(&mut self, rows: usize, columns: usize) {
        self.line(format!(
            "{} {} {} {} {}",
            "Successfully read CSV with".bright_green(),
            rows.to_string().bright_white().bold(),
            "rows and".bright_green(),
            columns.to_string().bright_white().bold(),
            "columns".bright_green()
        ));
    }

    pub fn written(&mut self, path: &Path) {
        self.line(format!(
            "{} {}",
            "Successfully converted CSV to Excel:".bright_green().bold(),
            path.display().to_string().bright_white()
        ));
    }

    pub fn error(&mut self, error: &dyn std::error::Error) {
        self.line(format!("{} {}", "Error:".bright_red().bold(), error));
    }

    fn line(&mut self, text: String) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut StatusReporter<'_, Vec<u8>>)) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        f(&mut StatusReporter::new(&mut buffer));
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_message_texts() {
        let path = Path::new("data/in.csv");
        assert_eq!(
            render(|r| r.source_found(path)),
            "CSV file found at data/in.csv\n"
        );
        assert_eq!(
            render(|r| r.source_missing(path)),
            "CSV file not found at data/in.csv\n"
        );
        assert_eq!(
            render(|r| r.parsed(2, 3)),
            "Successfully read CSV with 2 rows and 3 columns\n"
        );
        assert_eq!(
            render(|r| r.written(Path::new("out.xlsx"))),
            "Successfully converted CSV to Excel: out.xlsx\n"
        );
        assert_eq!(
            render(|r| r.error(&std::io::Error::other("boom"))),
            "Error: boom\n"
        );
    }
}
