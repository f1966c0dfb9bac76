mod html;
pub(crate) mod models;
mod output;

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

use crate::classify::EnvPair;
use crate::compare::{Summary, compare_documents};
use crate::error::Error;
use crate::parse;
use crate::value::ConfigDocument;
use models::{ComparisonReport, ComparisonTable, RunContext};

/// Compare every `.properties` file between `<dir>/<env1>` and
/// `<dir>/<env2>`, render, and return whether unexpected differences
/// were found (for exit code 1).
pub fn run_properties(
    dir: &str,
    envs: &EnvPair,
    context: Option<RunContext>,
    format: &str,
    output_file: Option<&str>,
) -> Result<bool> {
    let report = collect_properties(dir, envs, context)?;
    render(&report, format, output_file)?;
    Ok(report.has_unexpected())
}

/// Compare `<dir>/workspace_vars.<env>.tfvars` for the two environments.
pub fn run_tfvars(
    dir: &str,
    envs: &EnvPair,
    context: Option<RunContext>,
    format: &str,
    output_file: Option<&str>,
) -> Result<bool> {
    let report = collect_tfvars(dir, envs, context)?;
    render(&report, format, output_file)?;
    Ok(report.has_unexpected())
}

/// Compare two JSON snapshots section by section.
pub fn run_json(
    left_path: &str,
    right_path: &str,
    envs: &EnvPair,
    context: Option<RunContext>,
    format: &str,
    output_file: Option<&str>,
) -> Result<bool> {
    let report = collect_json(left_path, right_path, envs, context)?;
    render(&report, format, output_file)?;
    Ok(report.has_unexpected())
}

fn render(report: &ComparisonReport, format: &str, output_file: Option<&str>) -> Result<()> {
    match format {
        "json" => output::output_json(report, output_file)?,
        "html" => output::output_html(report, output_file)?,
        _ => output::output_terminal(report)?,
    }
    Ok(())
}

fn new_report(envs: &EnvPair, context: Option<RunContext>) -> ComparisonReport {
    ComparisonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        env_left: envs.left.clone(),
        env_right: envs.right.clone(),
        context: context.filter(|c| !c.is_empty()),
        tables: Vec::new(),
        totals: Summary::default(),
    }
}

fn push_table(report: &mut ComparisonReport, table: ComparisonTable) {
    report.totals.merge(&table.summary);
    report.tables.push(table);
}

fn collect_properties(
    dir: &str,
    envs: &EnvPair,
    context: Option<RunContext>,
) -> Result<ComparisonReport> {
    let left_root = Path::new(dir).join(&envs.left);
    let right_root = Path::new(dir).join(&envs.right);
    for root in [&left_root, &right_root] {
        if !root.is_dir() {
            return Err(Error::not_found(
                root.display().to_string(),
                "no such directory",
            )
            .into());
        }
    }

    let left_files = list_properties_files(&left_root);
    let right_files = list_properties_files(&right_root);
    let all_files: BTreeSet<&String> = left_files.union(&right_files).collect();

    let mut report = new_report(envs, context);
    for relative in all_files {
        let left_path = left_root.join(relative);
        let right_path = right_root.join(relative);

        let missing_in = if !left_files.contains(relative) {
            Some(envs.left.clone())
        } else if !right_files.contains(relative) {
            Some(envs.right.clone())
        } else {
            None
        };

        let table = if let Some(env) = missing_in {
            eprintln!("Warning: {} missing in {}", relative, env);
            ComparisonTable {
                name: relative.clone(),
                left_source: left_path.display().to_string(),
                right_source: right_path.display().to_string(),
                missing_in: Some(env),
                rows: Vec::new(),
                summary: Summary::default(),
            }
        } else {
            let left_doc = parse::load_properties(&left_path)?;
            let right_doc = parse::load_properties(&right_path)?;
            let (rows, summary) = compare_documents(&left_doc, &right_doc, envs);
            ComparisonTable {
                name: relative.clone(),
                left_source: left_path.display().to_string(),
                right_source: right_path.display().to_string(),
                missing_in: None,
                rows,
                summary,
            }
        };
        push_table(&mut report, table);
    }
    Ok(report)
}

/// Relative paths of `.properties` files under an environment root.
fn list_properties_files(root: &Path) -> BTreeSet<String> {
    let mut files = BTreeSet::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_file()
            && path.extension().and_then(|s| s.to_str()) == Some("properties")
            && let Ok(relative) = path.strip_prefix(root)
        {
            files.insert(relative.display().to_string());
        }
    }
    files
}

fn collect_tfvars(
    dir: &str,
    envs: &EnvPair,
    context: Option<RunContext>,
) -> Result<ComparisonReport> {
    let left_path =
        Path::new(dir).join(format!("workspace_vars.{}.tfvars", envs.left.to_lowercase()));
    let right_path = Path::new(dir).join(format!(
        "workspace_vars.{}.tfvars",
        envs.right.to_lowercase()
    ));

    let left_doc = parse::load_tfvars(&left_path)?;
    let right_doc = parse::load_tfvars(&right_path)?;
    let (rows, summary) = compare_documents(&left_doc, &right_doc, envs);

    let mut report = new_report(envs, context);
    push_table(
        &mut report,
        ComparisonTable {
            name: "tfvars".to_string(),
            left_source: left_path.display().to_string(),
            right_source: right_path.display().to_string(),
            missing_in: None,
            rows,
            summary,
        },
    );
    Ok(report)
}

fn collect_json(
    left_path: &str,
    right_path: &str,
    envs: &EnvPair,
    context: Option<RunContext>,
) -> Result<ComparisonReport> {
    let left_doc = parse::load_json(Path::new(left_path))?;
    let right_doc = parse::load_json(Path::new(right_path))?;

    let all_sections: BTreeSet<&String> = left_doc.keys().chain(right_doc.keys()).collect();
    let mut sections: Vec<&String> = all_sections.into_iter().collect();
    sections.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let empty = ConfigDocument::new();
    let mut report = new_report(envs, context);

    for section in sections {
        let left_section = mapping_entry(&left_doc, section, section, &empty)?;
        let right_section = mapping_entry(&right_doc, section, section, &empty)?;

        // A section present on the left whose values are all mappings
        // (vacuously true when empty) is compared per sub-key, so
        // grouped service configs get their own tables.
        let grouped = left_doc.contains_key(section)
            && left_section.values().all(|v| v.as_mapping().is_some());

        if grouped {
            let sub_keys: BTreeSet<&String> =
                left_section.keys().chain(right_section.keys()).collect();
            for sub in sub_keys {
                let label = format!("{}.{}", section, sub);
                let left_sub = mapping_entry(left_section, sub, &label, &empty)?;
                let right_sub = mapping_entry(right_section, sub, &label, &empty)?;
                let (rows, summary) = compare_documents(left_sub, right_sub, envs);
                push_table(
                    &mut report,
                    ComparisonTable {
                        name: format!("{} / {}", section, sub),
                        left_source: left_path.to_string(),
                        right_source: right_path.to_string(),
                        missing_in: None,
                        rows,
                        summary,
                    },
                );
            }
        } else {
            let (rows, summary) = compare_documents(left_section, right_section, envs);
            push_table(
                &mut report,
                ComparisonTable {
                    name: section.clone(),
                    left_source: left_path.to_string(),
                    right_source: right_path.to_string(),
                    missing_in: None,
                    rows,
                    summary,
                },
            );
        }
    }
    Ok(report)
}

/// A JSON section, or a sub-entry of a grouped section, must be a
/// mapping; an absent entry compares as empty. A present non-mapping
/// value fails the run rather than vanishing from the report.
fn mapping_entry<'a>(
    doc: &'a ConfigDocument,
    key: &str,
    label: &str,
    empty: &'a ConfigDocument,
) -> Result<&'a ConfigDocument, Error> {
    match doc.get(key) {
        None => Ok(empty),
        Some(value) => value.as_mapping().ok_or_else(|| {
            Error::comparison(format!(
                "{} is not an object and cannot be compared",
                label
            ))
        }),
    }
}
