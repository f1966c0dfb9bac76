use std::fmt;

use crate::value::ConfigValue;

/// One step into a nested value: a mapping field or a sequence index.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// Location of a nested value, rendered in dotted notation with
/// bracketed indices: `a.b[2].c`. The root path renders empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyPath(Vec<Segment>);

impl KeyPath {
    pub fn root() -> Self {
        KeyPath::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn field(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Field(name.to_string()));
        KeyPath(segments)
    }

    fn index(&self, i: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(i));
        KeyPath(segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if pos == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

/// One human-readable change produced by the structural diff.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    pub path: KeyPath,
    pub description: String,
}

impl DiffEntry {
    fn new(path: KeyPath, description: String) -> Self {
        DiffEntry { path, description }
    }

    /// `path: description`, or just the description at the root.
    pub fn render(&self) -> String {
        if self.path.is_root() {
            self.description.clone()
        } else {
            format!("{}: {}", self.path, self.description)
        }
    }
}

/// Deep structural comparison. Returns an empty list iff the two values
/// are deeply equal — order-insensitive for mapping keys,
/// order-sensitive for sequence elements.
pub fn structural_diff(left: &ConfigValue, right: &ConfigValue) -> Vec<DiffEntry> {
    let mut entries = Vec::new();
    diff_at(&KeyPath::root(), left, right, &mut entries);
    entries
}

fn diff_at(path: &KeyPath, left: &ConfigValue, right: &ConfigValue, out: &mut Vec<DiffEntry>) {
    if left == right {
        return;
    }
    match (left, right) {
        (ConfigValue::Mapping(l), ConfigValue::Mapping(r)) => {
            for (key, lv) in l {
                match r.get(key) {
                    Some(rv) if lv != rv => diff_at(&path.field(key), lv, rv, out),
                    Some(_) => {}
                    None => out.push(DiffEntry::new(
                        path.field(key),
                        format!("{} was removed", lv),
                    )),
                }
            }
            for (key, rv) in r {
                if !l.contains_key(key) {
                    out.push(DiffEntry::new(path.field(key), format!("{} was added", rv)));
                }
            }
        }
        (ConfigValue::Sequence(l), ConfigValue::Sequence(r)) => {
            for (i, (lv, rv)) in l.iter().zip(r).enumerate() {
                if lv != rv {
                    diff_at(&path.index(i), lv, rv, out);
                }
            }
            // Trailing elements of the longer side are reported
            // wholesale, indexed by position.
            if r.len() > l.len() {
                for (i, rv) in r.iter().enumerate().skip(l.len()) {
                    out.push(DiffEntry::new(path.index(i), format!("{} was added", rv)));
                }
            } else {
                for (i, lv) in l.iter().enumerate().skip(r.len()) {
                    out.push(DiffEntry::new(path.index(i), format!("{} was removed", lv)));
                }
            }
        }
        (ConfigValue::String(l), ConfigValue::String(r)) => diff_dotted(path, l, r, out),
        _ => out.push(DiffEntry::new(path.clone(), format!("{} => {}", left, right))),
    }
}

/// String pairs are compared segment-by-segment on `.` so that a bump
/// in a dotted version-like value (image tags, semvers) highlights only
/// the segment that moved. Every entry keeps the string's own path;
/// segments are not sub-indexed. Undotted strings degenerate to a
/// single whole-value entry.
fn diff_dotted(path: &KeyPath, left: &str, right: &str, out: &mut Vec<DiffEntry>) {
    let left_parts: Vec<&str> = left.split('.').collect();
    let right_parts: Vec<&str> = right.split('.').collect();

    for (l, r) in left_parts.iter().zip(&right_parts) {
        if l != r {
            out.push(DiffEntry::new(path.clone(), format!("{} => {}", l, r)));
        }
    }
    if left_parts.len() > right_parts.len() {
        for part in &left_parts[right_parts.len()..] {
            out.push(DiffEntry::new(
                path.clone(),
                format!("segment \"{}\" was removed", part),
            ));
        }
    } else if right_parts.len() > left_parts.len() {
        for part in &right_parts[left_parts.len()..] {
            out.push(DiffEntry::new(
                path.clone(),
                format!("segment \"{}\" was added", part),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> ConfigValue {
        ConfigValue::from(serde_json::from_str::<serde_json::Value>(text).unwrap())
    }

    fn rendered(left: &str, right: &str) -> Vec<String> {
        structural_diff(&v(left), &v(right))
            .iter()
            .map(DiffEntry::render)
            .collect()
    }

    #[test]
    fn test_identical_values_produce_no_entries() {
        let doc = r#"{"a": {"b": [1, "x"], "c": null}}"#;
        assert!(structural_diff(&v(doc), &v(doc)).is_empty());
    }

    #[test]
    fn test_mapping_key_order_is_irrelevant() {
        assert!(structural_diff(&v(r#"{"a": 1, "b": 2}"#), &v(r#"{"b": 2, "a": 1}"#)).is_empty());
    }

    #[test]
    fn test_removed_key_single_entry() {
        let entries = structural_diff(&v(r#"{"a": 1, "b": 2}"#), &v(r#"{"a": 1}"#));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].render(), "b: 2 was removed");
    }

    #[test]
    fn test_added_key_single_entry() {
        let entries = structural_diff(&v(r#"{"a": 1}"#), &v(r#"{"a": 1, "b": 2}"#));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].render(), "b: 2 was added");
    }

    #[test]
    fn test_nested_mapping_path() {
        assert_eq!(
            rendered(r#"{"db": {"port": 5432}}"#, r#"{"db": {"port": 5433}}"#),
            vec!["db.port: 5432 => 5433"]
        );
    }

    #[test]
    fn test_sequence_index_in_path() {
        assert_eq!(
            rendered(r#"{"hosts": ["a", "b"]}"#, r#"{"hosts": ["a", "c"]}"#),
            vec!["hosts[1]: b => c"]
        );
    }

    #[test]
    fn test_sequence_trailing_extras() {
        assert_eq!(
            rendered(r#"[1, 2]"#, r#"[1, 2, 3, 4]"#),
            vec!["[2]: 3 was added", "[3]: 4 was added"]
        );
        assert_eq!(rendered(r#"[1, 2]"#, r#"[1]"#), vec!["[1]: 2 was removed"]);
    }

    #[test]
    fn test_dotted_string_segment_diff() {
        // Only the middle segment moved.
        assert_eq!(rendered(r#""v1.2.3""#, r#""v1.3.3""#), vec!["2 => 3"]);
    }

    #[test]
    fn test_dotted_string_multiple_segments() {
        assert_eq!(
            rendered(r#""v1.2.3""#, r#""v2.2.4""#),
            vec!["v1 => v2", "3 => 4"]
        );
    }

    #[test]
    fn test_dotted_string_extra_segments_reported() {
        assert_eq!(
            rendered(r#""1.2""#, r#""1.2.7""#),
            vec!["segment \"7\" was added"]
        );
        assert_eq!(
            rendered(r#""1.2.7""#, r#""1.2""#),
            vec!["segment \"7\" was removed"]
        );
    }

    #[test]
    fn test_plain_string_change_is_one_entry() {
        assert_eq!(rendered(r#""alpha""#, r#""beta""#), vec!["alpha => beta"]);
    }

    #[test]
    fn test_type_mismatch_is_one_entry() {
        assert_eq!(
            rendered(r#"{"flag": true}"#, r#"{"flag": "true"}"#),
            vec!["flag: true => true"]
        );
        assert_eq!(
            rendered(r#"{"x": [1]}"#, r#"{"x": {"a": 1}}"#),
            vec![r#"x: [1] => {"a":1}"#]
        );
    }

    #[test]
    fn test_scalar_change_at_root() {
        assert_eq!(rendered("1", "2"), vec!["1 => 2"]);
    }

    #[test]
    fn test_path_rendering() {
        assert_eq!(
            rendered(
                r#"{"a": {"b": [{"c": 1}]}}"#,
                r#"{"a": {"b": [{"c": 2}]}}"#
            ),
            vec!["a.b[0].c: 1 => 2"]
        );
    }
}
