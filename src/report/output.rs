use anyhow::Result;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::html;
use super::models::ComparisonReport;
use crate::compare::Classification;

// ===== JSON Output =====

pub fn output_json(report: &ComparisonReport, output_file: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(path) = output_file {
        std::fs::write(path, &json)?;
        println!("Wrote comparison report to {}", path);
    } else {
        println!("{}", json);
    }
    Ok(())
}

// ===== HTML Output =====

pub fn output_html(report: &ComparisonReport, output_file: Option<&str>) -> Result<()> {
    let document = html::render_html(report);
    if let Some(path) = output_file {
        std::fs::write(path, &document)?;
        println!("Wrote comparison report to {}", path);
    } else {
        println!("{}", document);
    }
    Ok(())
}

// ===== Terminal Output =====

pub fn output_terminal(report: &ComparisonReport) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    writeln!(&mut stdout)?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(&mut stdout, "Environment Comparison Report")?;
    writeln!(&mut stdout, "=============================")?;
    stdout.reset()?;
    writeln!(&mut stdout, "Generated: {}", report.generated_at)?;
    writeln!(
        &mut stdout,
        "Environments: {} vs {}",
        report.env_left.to_uppercase(),
        report.env_right.to_uppercase()
    )?;
    if let Some(context) = &report.context {
        if let Some(branch) = &context.branch {
            writeln!(&mut stdout, "Branch: {}", branch)?;
        }
        if let Some(commit) = &context.commit {
            let message = context.message.as_deref().unwrap_or("");
            writeln!(&mut stdout, "Commit: {} {}", commit, message)?;
        }
    }

    for table in &report.tables {
        writeln!(&mut stdout)?;
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(&mut stdout, "{}", table.name)?;
        stdout.reset()?;

        if let Some(env) = &table.missing_in {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(
                &mut stdout,
                "  File is missing in {}",
                env.to_uppercase()
            )?;
            stdout.reset()?;
            continue;
        }

        for row in &table.rows {
            write!(&mut stdout, "  ")?;
            stdout.set_color(ColorSpec::new().set_fg(Some(row_color(&row.classification))))?;
            write!(&mut stdout, "{:<12}", row_tag(&row.classification))?;
            stdout.reset()?;
            writeln!(&mut stdout, "{}", row.key)?;
            for line in row.diff_text.lines() {
                writeln!(&mut stdout, "              {}", line)?;
            }
        }

        writeln!(
            &mut stdout,
            "  {} equal, {} undefined, {} unexpected, {} expected",
            table.summary.equal,
            table.summary.undefined,
            table.summary.unexpected,
            table.summary.expected
        )?;
    }

    writeln!(&mut stdout)?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(&mut stdout, "Totals: ")?;
    stdout.reset()?;
    writeln!(
        &mut stdout,
        "{} equal, {} undefined, {} unexpected, {} expected",
        report.totals.equal,
        report.totals.undefined,
        report.totals.unexpected,
        report.totals.expected
    )?;

    Ok(())
}

fn row_color(classification: &Classification) -> Color {
    match classification {
        Classification::Equal => Color::Green,
        Classification::Unexpected => Color::Red,
        Classification::ExpectedForEnv => Color::Cyan,
        Classification::UndefinedLeft | Classification::UndefinedRight => Color::Yellow,
    }
}

fn row_tag(classification: &Classification) -> &'static str {
    match classification {
        Classification::Equal => "EQUAL",
        Classification::Unexpected => "UNEXPECTED",
        Classification::ExpectedForEnv => "EXPECTED",
        Classification::UndefinedLeft | Classification::UndefinedRight => "UNDEFINED",
    }
}
