//! Terminal output for the topodoc commands.
//!
//! Everything goes to stderr so a build can be piped without mixing status
//! lines into its output.

use std::path::Path;

use console::{Style, Term};
use topodoc_page::BuildReport;

/// Width of the label column in [`Output::field`] lines.
const LABEL_WIDTH: usize = 14;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    label: Style,
    count: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            count: Style::new().bold(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    /// Print an aligned `label  value` line.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let label = format!("{label:<LABEL_WIDTH$}");
        self.line(&format!("{}{value}", self.label.apply_to(label)));
    }

    /// Print the closing summary of a static build.
    pub(crate) fn build_summary(&self, report: &BuildReport, output_dir: &Path) {
        let pages = self.count.apply_to(report.pages);
        let assets = self.count.apply_to(report.assets);
        self.line(&format!(
            "{} {pages} {}, {assets} {} -> {}",
            self.done.apply_to("Built"),
            plural(report.pages, "page", "pages"),
            plural(report.assets, "asset", "assets"),
            output_dir.display()
        ));
        if report.warnings > 0 {
            self.line(
                &self
                    .warn
                    .apply_to(warning_note(report.warnings))
                    .to_string(),
            );
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.fail.apply_to(msg).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

/// Hint shown when pages rendered with soft warnings.
fn warning_note(warnings: usize) -> String {
    format!(
        "  {warnings} {} while rendering, rerun with --verbose to list them",
        plural(warnings, "warning", "warnings")
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "page", "pages"), "page");
        assert_eq!(plural(0, "page", "pages"), "pages");
        assert_eq!(plural(7, "page", "pages"), "pages");
    }

    #[test]
    fn test_warning_note() {
        assert_eq!(
            warning_note(1),
            "  1 warning while rendering, rerun with --verbose to list them"
        );
        assert!(warning_note(3).contains("3 warnings"));
    }
}
