use serde::Serialize;

use crate::compare::{ComparisonRow, Summary};

/// Source-control context shown in the report header, when the caller
/// provides it (CI pipelines pass branch and commit of the config
/// repo).
#[derive(Debug, Serialize)]
pub struct RunContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RunContext {
    pub fn is_empty(&self) -> bool {
        self.branch.is_none() && self.commit.is_none() && self.message.is_none()
    }
}

/// One comparison table: a properties file, a tfvars pair, or a JSON
/// section. `missing_in` names the environment the source is absent
/// from, in which case there are no rows.
#[derive(Debug, Serialize)]
pub struct ComparisonTable {
    pub name: String,
    pub left_source: String,
    pub right_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_in: Option<String>,
    pub rows: Vec<ComparisonRow>,
    pub summary: Summary,
}

/// The full result of one comparison run.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub generated_at: String,
    pub env_left: String,
    pub env_right: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<RunContext>,
    pub tables: Vec<ComparisonTable>,
    pub totals: Summary,
}

impl ComparisonReport {
    pub fn has_unexpected(&self) -> bool {
        self.totals.unexpected > 0
    }
}
