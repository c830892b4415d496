//! Markdown documents rendered to the terminal

use async_trait::async_trait;
use colored::Colorize;
use openflux_application::ports::host::{DocumentPort, HostError};
use std::io::{self, Write};

/// Prints markdown documents to stdout with light highlighting.
pub struct ConsoleDocumentViewer;

impl ConsoleDocumentViewer {
    /// Highlight headings and fences; everything else is printed as is.
    pub fn render(markdown: &str) -> String {
        let mut out = String::with_capacity(markdown.len());
        let mut in_code = false;
        for line in markdown.lines() {
            let rendered = if line.starts_with("```") {
                in_code = !in_code;
                line.dimmed().to_string()
            } else if in_code {
                line.to_string()
            } else if let Some(title) = line.strip_prefix("# ") {
                title.cyan().bold().to_string()
            } else if let Some(title) = line.strip_prefix("## ") {
                title.yellow().bold().to_string()
            } else if line == "---" {
                "─".repeat(40).dimmed().to_string()
            } else {
                line.to_string()
            };
            out.push_str(&rendered);
            out.push('\n');
        }
        out
    }
}

fn write_stdout(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

#[async_trait]
impl DocumentPort for ConsoleDocumentViewer {
    async fn open_markdown(&self, content: &str) -> Result<(), HostError> {
        write_stdout(&Self::render(content)).map_err(|e| HostError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_strips_heading_markers_outside_code() {
        colored::control::set_override(false);
        let rendered = ConsoleDocumentViewer::render("# Search Results\n## a.ts\n```ts\n# not a heading\n```\n");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Search Results");
        assert_eq!(lines[1], "a.ts");
        assert_eq!(lines[3], "# not a heading");
    }
}
