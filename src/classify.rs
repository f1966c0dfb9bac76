/// Key-path fragments that almost always differ legitimately between
/// deployment environments (endpoints, account wiring, timestamps).
/// Matching is substring-based, so false positives like "envelope"
/// matching "env" are accepted.
const ENVIRONMENT_SPECIFIC_TERMS: &[&str] = &[
    "account",
    "region",
    "profile",
    "environment",
    "env",
    "url",
    "endpoint",
    "database_name",
    "bucket_name",
    "s3",
    "arn",
    "uri",
    "time",
    "created",
    "life_cycle",
];

/// The pair of environment labels a comparison runs against, plus any
/// extra indicator tokens (short environment codes like `acpt`) the
/// caller wants recognized.
#[derive(Debug, Clone)]
pub struct EnvPair {
    pub left: String,
    pub right: String,
    pub extra_indicators: Vec<String>,
}

impl EnvPair {
    pub fn new(left: &str, right: &str, extra_indicators: Vec<String>) -> Self {
        EnvPair {
            left: left.to_string(),
            right: right.to_string(),
            extra_indicators,
        }
    }

    /// Heuristic: is a difference under this top-level key expected to
    /// vary across environments? True if the lowercased key contains
    /// either environment label, a well-known environment name, an
    /// extra indicator, or any environment-correlated infrastructure
    /// term.
    pub fn is_environment_specific(&self, key: &str) -> bool {
        let key = key.to_lowercase();

        let indicators = [
            self.left.to_lowercase(),
            self.right.to_lowercase(),
            "prod".to_string(),
            "staging".to_string(),
            "dev".to_string(),
        ];
        if indicators.iter().any(|ind| key.contains(ind.as_str())) {
            return true;
        }
        if self
            .extra_indicators
            .iter()
            .any(|ind| key.contains(&ind.to_lowercase()))
        {
            return true;
        }
        ENVIRONMENT_SPECIFIC_TERMS
            .iter()
            .any(|term| key.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envs() -> EnvPair {
        EnvPair::new("dev", "prod", Vec::new())
    }

    #[test]
    fn test_infrastructure_terms_match() {
        assert!(envs().is_environment_specific("s3_bucket_url"));
        assert!(envs().is_environment_specific("service_endpoint"));
        assert!(envs().is_environment_specific("created_at"));
    }

    #[test]
    fn test_plain_keys_do_not_match() {
        assert!(!envs().is_environment_specific("max_retries"));
        assert!(!envs().is_environment_specific("log_format"));
    }

    #[test]
    fn test_environment_labels_match_case_insensitively() {
        let envs = EnvPair::new("QA", "UAT", Vec::new());
        assert!(envs.is_environment_specific("qa_feature_flag"));
        assert!(envs.is_environment_specific("uat_toggle"));
    }

    #[test]
    fn test_substring_false_positive_is_accepted() {
        // "envelope" contains "env"; the heuristic is substring-based.
        assert!(envs().is_environment_specific("envelope_size"));
    }

    #[test]
    fn test_extra_indicators() {
        let envs = EnvPair::new("dev1", "acpt", vec!["acnt".to_string()]);
        assert!(envs.is_environment_specific("acnt_role"));
        assert!(!EnvPair::new("qa", "uat", Vec::new()).is_environment_specific("acnt_role"));
    }
}
