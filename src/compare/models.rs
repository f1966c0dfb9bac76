use serde::Serialize;

use crate::value::ConfigValue;

/// Category assigned to one top-level key after comparison.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Equal,
    Unexpected,
    ExpectedForEnv,
    UndefinedLeft,
    UndefinedRight,
}

impl Classification {
    /// Row class used by the HTML renderer.
    pub fn css_class(&self) -> &'static str {
        match self {
            Classification::Equal => "equal",
            Classification::Unexpected => "red",
            Classification::ExpectedForEnv => "blue",
            Classification::UndefinedLeft | Classification::UndefinedRight => "yellow",
        }
    }
}

/// One row of a comparison: a top-level key, its value on each side,
/// and the classified difference. Absent sides are None.
#[derive(Debug, Serialize)]
pub struct ComparisonRow {
    pub key: String,
    pub left_value: Option<ConfigValue>,
    pub right_value: Option<ConfigValue>,
    pub diff_text: String,
    pub classification: Classification,
    pub status_text: String,
}

/// Per-category tallies over one comparison pass.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub equal: usize,
    pub undefined: usize,
    pub unexpected: usize,
    pub expected: usize,
}

impl Summary {
    pub fn record(&mut self, classification: &Classification) {
        match classification {
            Classification::Equal => self.equal += 1,
            Classification::Unexpected => self.unexpected += 1,
            Classification::ExpectedForEnv => self.expected += 1,
            Classification::UndefinedLeft | Classification::UndefinedRight => self.undefined += 1,
        }
    }

    pub fn merge(&mut self, other: &Summary) {
        self.equal += other.equal;
        self.undefined += other.undefined;
        self.unexpected += other.unexpected;
        self.expected += other.expected;
    }
}
