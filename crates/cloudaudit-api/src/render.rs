//! Server-rendered pages for the browser upload workflow.

use cloudaudit_core::AnalysisReport;

/// Upload form served at `GET /`. The field name `config_file` is part of
/// the upload contract and must match what the POST handler reads.
pub fn upload_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>CloudAudit</title>
<style>{css}</style>
</head>
<body>
<main>
<h1>Cloud Configuration Security Analyzer</h1>
<p>Upload a cloud configuration file in JSON format to scan it for security issues.</p>
<form method="post" action="/" enctype="multipart/form-data">
<input type="file" name="config_file" accept=".json,application/json" required>
<button type="submit">Analyze</button>
</form>
</main>
</body>
</html>
"#,
        css = PAGE_CSS
    )
}

/// Analysis report page returned after a successful upload.
pub fn report_page(file_name: &str, report: &AnalysisReport) -> String {
    let mut issues_html = String::new();
    for issue in &report.issues {
        issues_html.push_str(&format!(
            r#"<article class="issue {class}">
<h3>{title} <span class="severity">{severity}</span></h3>
<p>{description}</p>
<p class="fix">{recommendation}</p>
</article>
"#,
            class = severity_class(&issue.severity),
            title = escape_html(&issue.title),
            severity = escape_html(&issue.severity),
            description = escape_html(&issue.description),
            recommendation = escape_html(&issue.recommendation),
        ));
    }

    let mut recommendations_html = String::new();
    for recommendation in &report.recommendations {
        recommendations_html.push_str(&format!("<li>{}</li>\n", escape_html(recommendation)));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>CloudAudit Report</title>
<style>{css}</style>
</head>
<body>
<main>
<h1>Security Analysis Report</h1>
<p class="meta">Analyzed file: <strong>{file_name}</strong></p>
<h2>Summary</h2>
<p>{summary}</p>
<h2>Issues</h2>
{issues}
<h2>Recommendations</h2>
<ul>
{recommendations}</ul>
<p><a href="/">Analyze another configuration</a></p>
</main>
</body>
</html>
"#,
        css = PAGE_CSS,
        file_name = escape_html(file_name),
        summary = escape_html(&report.summary),
        issues = issues_html,
        recommendations = recommendations_html,
    )
}

fn severity_class(severity: &str) -> &'static str {
    match severity {
        "HIGH" => "high",
        "LOW" => "low",
        _ => "medium",
    }
}

/// Escapes text for safe interpolation into HTML element content.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_CSS: &str = "\
body { font-family: sans-serif; margin: 0; background: #f5f6f8; color: #1c2330; }
main { max-width: 52rem; margin: 2rem auto; padding: 2rem; background: #fff; border-radius: 8px; }
h1 { font-size: 1.5rem; }
.meta { color: #5a6472; }
.issue { border-left: 4px solid #c0c6cf; padding: 0.25rem 1rem; margin: 1rem 0; background: #fafbfc; }
.issue.high { border-left-color: #d33; }
.issue.medium { border-left-color: #e6a700; }
.issue.low { border-left-color: #3a7; }
.severity { font-size: 0.8rem; color: #5a6472; }
.fix { font-style: italic; }
";
