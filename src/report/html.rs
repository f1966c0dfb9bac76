use std::fmt::Write;

use super::models::{ComparisonReport, ComparisonTable};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 24px; }
table { border-collapse: collapse; width: 100%; margin-bottom: 24px; }
th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: left; vertical-align: top; }
th { background: #f0f0f0; }
pre { margin: 0; white-space: pre-wrap; }
tr.equal { background: #e9f9ec; }
tr.yellow { background: #fdf6dd; }
tr.red { background: #fde3e3; }
tr.blue { background: #e3f2fb; }
.legend { display: flex; gap: 12px; }
.dot-equal { color: #3cc257; }
.dot-yellow { color: #d4b022; }
.dot-red { color: #f15353; }
.dot-blue { color: #1ab3e6; }
"#;

/// Escape a free-text value before embedding it in markup. Ampersand
/// first, so already-escaped entities are not double-unescaped.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '>' => escaped.push_str("&gt;"),
            '<' => escaped.push_str("&lt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render the whole report as one self-contained HTML document.
pub fn render_html(report: &ComparisonReport) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<h2>Environment Comparison Report</h2>\n\
         <p><strong>Generated:</strong> {}</p>\n\
         <p><strong>Comparing ENVs:</strong> {} &amp; {}</p>\n",
        escape_html(&report.generated_at),
        escape_html(&report.env_left.to_uppercase()),
        escape_html(&report.env_right.to_uppercase()),
    );

    if let Some(context) = &report.context {
        if let Some(branch) = &context.branch {
            let _ = write!(body, "<p><strong>Branch:</strong> {}</p>\n", escape_html(branch));
        }
        if let Some(commit) = &context.commit {
            let message = context.message.as_deref().unwrap_or("");
            let _ = write!(
                body,
                "<p><strong>Latest Commit:</strong> {} - {}</p>\n",
                escape_html(commit),
                escape_html(message)
            );
        }
    }

    for table in &report.tables {
        render_table(&mut body, report, table);
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Environment Comparison Report</title>\n<style>{}</style>\n\
         </head>\n<body>\n{}</body>\n</html>\n",
        STYLE, body
    )
}

fn render_table(body: &mut String, report: &ComparisonReport, table: &ComparisonTable) {
    let _ = write!(
        body,
        "<hr>\n<h3>Comparison Report - {}</h3>\n\
         <p><strong>Comparing Files:</strong> {} &amp; {}</p>\n",
        escape_html(&table.name),
        escape_html(&table.left_source),
        escape_html(&table.right_source),
    );

    if let Some(env) = &table.missing_in {
        let _ = write!(
            body,
            "<p style=\"color:red;\">File <strong>{}</strong> is missing in {}</p>\n",
            escape_html(&table.name),
            escape_html(&env.to_uppercase())
        );
        return;
    }

    let _ = write!(
        body,
        "<div class=\"legend\">\n\
         <p><strong><span class=\"dot-equal\">&#9679;</span> Equal:</strong> {}</p>\n\
         <p><strong><span class=\"dot-yellow\">&#9679;</span> Undefined:</strong> {}</p>\n\
         <p><strong><span class=\"dot-red\">&#9679;</span> Unexpected (Check Required):</strong> {}</p>\n\
         <p><strong><span class=\"dot-blue\">&#9679;</span> Environment Specific:</strong> {}</p>\n\
         </div>\n",
        table.summary.equal,
        table.summary.undefined,
        table.summary.unexpected,
        table.summary.expected,
    );

    let _ = write!(
        body,
        "<table>\n<tr><th>Key</th><th>{}</th><th>{}</th><th>Comparison</th><th>Status</th></tr>\n",
        escape_html(&report.env_left.to_uppercase()),
        escape_html(&report.env_right.to_uppercase()),
    );

    for row in &table.rows {
        let left_cell = row
            .left_value
            .as_ref()
            .map(|v| v.to_json_pretty())
            .unwrap_or_else(|| "undefined".to_string());
        let right_cell = row
            .right_value
            .as_ref()
            .map(|v| v.to_json_pretty())
            .unwrap_or_else(|| "undefined".to_string());

        let _ = write!(
            body,
            "<tr class=\"{}\">\
             <td>{}</td>\
             <td><pre>{}</pre></td>\
             <td><pre>{}</pre></td>\
             <td><pre>{}</pre></td>\
             <td>{}</td>\
             </tr>\n",
            row.classification.css_class(),
            escape_html(&row.key),
            escape_html(&left_cell),
            escape_html(&right_cell),
            escape_html(&row.diff_text),
            escape_html(&row.status_text),
        );
    }

    body.push_str("</table>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::EnvPair;
    use crate::compare::{Summary, compare_documents};
    use crate::parse;
    use crate::report::models::RunContext;

    fn sample_report() -> ComparisonReport {
        let envs = EnvPair::new("dev", "prod", Vec::new());
        let left = parse::json_str(r#"{"note": "<b>&'\"", "count": 1}"#, "test").unwrap();
        let right = parse::json_str(r#"{"note": "plain", "count": 1}"#, "test").unwrap();
        let (rows, summary) = compare_documents(&left, &right, &envs);
        let mut totals = Summary::default();
        totals.merge(&summary);
        ComparisonReport {
            generated_at: "2026-01-01T00:00:00Z".to_string(),
            env_left: "dev".to_string(),
            env_right: "prod".to_string(),
            context: Some(RunContext {
                branch: Some("main".to_string()),
                commit: Some("abc1234".to_string()),
                message: Some("tune <limits>".to_string()),
            }),
            tables: vec![ComparisonTable {
                name: "app.properties".to_string(),
                left_source: "dev/app.properties".to_string(),
                right_source: "prod/app.properties".to_string(),
                missing_in: None,
                rows,
                summary,
            }],
            totals,
        }
    }

    #[test]
    fn test_escape_html_all_five() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_escapes_values_and_context() {
        let html = render_html(&sample_report());
        assert!(html.contains("&lt;b&gt;&amp;&#x27;"));
        assert!(html.contains("tune &lt;limits&gt;"));
        assert!(!html.contains("<b>&'"));
    }

    #[test]
    fn test_render_row_classes_and_legend() {
        let html = render_html(&sample_report());
        assert!(html.contains("tr class=\"equal\""));
        assert!(html.contains("tr class=\"red\""));
        assert!(html.contains("Unexpected (Check Required):</strong> 1"));
    }

    #[test]
    fn test_missing_table_renders_notice() {
        let mut report = sample_report();
        report.tables[0].missing_in = Some("prod".to_string());
        report.tables[0].rows.clear();
        let html = render_html(&report);
        assert!(html.contains("is missing in PROD"));
        assert!(!html.contains("<table>"));
    }
}
