pub(crate) mod models;

use std::collections::BTreeSet;

use crate::classify::EnvPair;
use crate::diff::{DiffEntry, structural_diff};
use crate::value::ConfigDocument;
pub use models::{Classification, ComparisonRow, Summary};

/// Compare two documents key by key. Every top-level key in either
/// document produces exactly one row; rows come back sorted
/// case-insensitively by key (ties broken case-sensitively).
pub fn compare_documents(
    left: &ConfigDocument,
    right: &ConfigDocument,
    envs: &EnvPair,
) -> (Vec<ComparisonRow>, Summary) {
    let all_keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
    let mut sorted_keys: Vec<&String> = all_keys.into_iter().collect();
    sorted_keys.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let mut rows = Vec::with_capacity(sorted_keys.len());
    let mut summary = Summary::default();

    for key in sorted_keys {
        let row = match (left.get(key), right.get(key)) {
            (Some(lv), Some(rv)) => {
                let entries = structural_diff(lv, rv);
                let (classification, status_text, diff_text) = if entries.is_empty() {
                    (Classification::Equal, "Equal".to_string(), String::new())
                } else if envs.is_environment_specific(key) {
                    (
                        Classification::ExpectedForEnv,
                        "Values differ as expected for environments".to_string(),
                        join_entries(&entries),
                    )
                } else {
                    (
                        Classification::Unexpected,
                        "Unexpected difference, please review".to_string(),
                        join_entries(&entries),
                    )
                };
                ComparisonRow {
                    key: key.clone(),
                    left_value: Some(lv.clone()),
                    right_value: Some(rv.clone()),
                    diff_text,
                    classification,
                    status_text,
                }
            }
            (None, Some(rv)) => undefined_row(key, None, Some(rv.clone()), &envs.left),
            (Some(lv), None) => undefined_row(key, Some(lv.clone()), None, &envs.right),
            (None, None) => unreachable!("key came from the union of both documents"),
        };
        summary.record(&row.classification);
        rows.push(row);
    }

    (rows, summary)
}

fn join_entries(entries: &[DiffEntry]) -> String {
    entries
        .iter()
        .map(DiffEntry::render)
        .collect::<Vec<_>>()
        .join("\n")
}

fn undefined_row(
    key: &str,
    left_value: Option<crate::value::ConfigValue>,
    right_value: Option<crate::value::ConfigValue>,
    missing_env: &str,
) -> ComparisonRow {
    let classification = if left_value.is_none() {
        Classification::UndefinedLeft
    } else {
        Classification::UndefinedRight
    };
    ComparisonRow {
        key: key.to_string(),
        left_value,
        right_value,
        diff_text: format!("{} is not defined in {}", key, missing_env.to_uppercase()),
        classification,
        status_text: format!("Not defined in {}", missing_env.to_uppercase()),
    }
}
