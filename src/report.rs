//! Output formatting for overviews and diffs.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::Result;
use crate::model::{Change, Diff, Overview};

/// Trait for rendering reports.
pub trait ReportFormatter {
    /// Render a full coverage overview.
    fn overview(&self, overview: &Overview) -> Result<String>;

    /// Render a comparison between two overviews.
    fn diff(&self, diff: &Diff) -> Result<String>;
}

/// Plain text formatter with column-aligned tables.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn overview(&self, overview: &Overview) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "Total: {:3.0}%", overview.coverage).unwrap();

        for file in &overview.files {
            out.push('\n');
            let mut rows = vec![(file.name.clone(), format!("{:3.0}%", file.coverage))];
            rows.extend(
                file.functions
                    .iter()
                    .map(|f| (format!("    {}", f.name), format!("{:3.0}%", f.coverage))),
            );
            write_aligned(&mut out, &rows);
        }

        Ok(out)
    }

    fn diff(&self, diff: &Diff) -> Result<String> {
        if diff.is_empty() {
            return Ok("No coverage changes.\n".to_string());
        }

        let mut out = String::new();
        if let Some(total) = &diff.total {
            writeln!(
                out,
                "Total {:.0}% → {:.0}% ({:+.2}%)",
                total.baseline,
                total.current,
                total.delta()
            )
            .unwrap();
        }

        for file in &diff.files {
            out.push('\n');
            let mut rows = vec![(file.name.clone(), format_change(&file.change))];
            rows.extend(
                file.entries
                    .iter()
                    .map(|e| (format!("    {}", e.name), format_change(&e.change))),
            );
            write_aligned(&mut out, &rows);
        }

        Ok(out)
    }
}

/// `old% → new% (+delta%)`
fn format_change(change: &Change) -> String {
    format!(
        "{:3.0}% → {:3.0}% ({:+.2}%)",
        change.baseline,
        change.current,
        change.delta()
    )
}

/// Write label/value rows with the values lined up in one column.
fn write_aligned(out: &mut String, rows: &[(String, String)]) {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in rows {
        writeln!(out, "{label:<width$} {value}").unwrap();
    }
}

/// Where file names link to in HTML output.
///
/// `{path}` is replaced by the file's path relative to the source root.
/// `github:owner/repo` is shorthand for that repository's default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate(String);

impl LinkTemplate {
    pub fn parse(template: &str) -> Self {
        match template.strip_prefix("github:") {
            Some(repo) => Self(format!(
                "https://github.com/{}/blob/master/{{path}}",
                repo.trim_matches('/')
            )),
            None => Self(template.to_string()),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        self.0.replace("{path}", path)
    }
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta http-equiv="Content-Type" content="text/html; charset=utf-8">
	<meta name="viewport" content="width=device-width, initial-scale=1">
	<title>Coverage</title>
	<style>
		table   { border-collapse: collapse; margin-bottom: 1em; }
		caption { white-space: nowrap; font-weight: bold; text-align: left; }
		td      { padding: .2em; border: 1px solid #666; }
		.up     { color: #080; }
		.down   { color: #b00; }
	</style>
</head>

<body>
"#;

const HTML_TAIL: &str = "</body>\n</html>\n";

/// Static HTML page, one table per file.
#[derive(Default)]
pub struct HtmlFormatter {
    pub link: Option<LinkTemplate>,
}

impl HtmlFormatter {
    pub fn new(link: Option<LinkTemplate>) -> Self {
        Self { link }
    }

    fn file_label(&self, name: &str, path: &str) -> String {
        match &self.link {
            Some(link) => format!(
                "<a href=\"{}\">{}</a>",
                encode_double_quoted_attribute(&link.url(path)),
                encode_text(name)
            ),
            None => encode_text(name).into_owned(),
        }
    }
}

impl ReportFormatter for HtmlFormatter {
    fn overview(&self, overview: &Overview) -> Result<String> {
        let mut html = String::from(HTML_HEAD);
        writeln!(html, "\t<p>Total: {:.0}%</p>\n", overview.coverage).unwrap();

        for file in &overview.files {
            html.push_str("\t<table>\n");
            writeln!(
                html,
                "\t\t<caption>{} <span>{:.0}%</span></caption>",
                self.file_label(&file.name, &file.path),
                file.coverage
            )
            .unwrap();
            for func in &file.functions {
                writeln!(
                    html,
                    "\t\t<tr><td>{}</td><td>{:.0}%</td></tr>",
                    encode_text(&func.name),
                    func.coverage
                )
                .unwrap();
            }
            html.push_str("\t</table>\n");
        }

        html.push_str(HTML_TAIL);
        Ok(html)
    }

    fn diff(&self, diff: &Diff) -> Result<String> {
        let mut html = String::from(HTML_HEAD);

        if diff.is_empty() {
            html.push_str("\t<p>No coverage changes.</p>\n");
        }
        if let Some(total) = &diff.total {
            writeln!(html, "\t<p>Total: {}</p>\n", html_change(total)).unwrap();
        }

        for file in &diff.files {
            html.push_str("\t<table>\n");
            let added = if file.added { " <em>(new)</em>" } else { "" };
            writeln!(
                html,
                "\t\t<caption>{}{added} {}</caption>",
                self.file_label(&file.name, &file.path),
                html_change(&file.change)
            )
            .unwrap();
            for entry in &file.entries {
                writeln!(
                    html,
                    "\t\t<tr><td>{}</td><td>{}</td></tr>",
                    encode_text(&entry.name),
                    html_change(&entry.change)
                )
                .unwrap();
            }
            html.push_str("\t</table>\n");
        }

        html.push_str(HTML_TAIL);
        Ok(html)
    }
}

fn html_change(change: &Change) -> String {
    let class = if change.delta() < 0.0 { "down" } else { "up" };
    format!(
        "{:.0}% → {:.0}% <span class=\"{class}\">({:+.2}%)</span>",
        change.baseline,
        change.current,
        change.delta()
    )
}

/// Pretty-printed JSON of the report model.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn overview(&self, overview: &Overview) -> Result<String> {
        let mut json = serde_json::to_string_pretty(overview)?;
        json.push('\n');
        Ok(json)
    }

    fn diff(&self, diff: &Diff) -> Result<String> {
        let mut json = serde_json::to_string_pretty(diff)?;
        json.push('\n');
        Ok(json)
    }
}
