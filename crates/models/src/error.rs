/// Vocabulary identifies which side of a two-sided lookup table was searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// Values understood by the Instana Web REST API.
    InstanaApi,
    /// Values exposed to users of the Terraform provider.
    Terraform,
}

impl std::fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vocabulary::InstanaApi => f.write_str("the Instana Web REST API"),
            Vocabulary::Terraform => f.write_str("the Instana Terraform provider"),
        }
    }
}

#[must_use]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0} is missing")]
    Missing(&'static str),
    #[error("{0} is missing or not valid")]
    MissingOrInvalid(&'static str),
    #[error("type of rule is missing")]
    RuleTypeMissing,
    #[error("unsupported rule type {0}")]
    UnsupportedRuleType(String),
    #[error("either rollup or window and condition must be defined")]
    RollupOrWindowMissing,
    #[error("{value} is not a supported {what} of {vocabulary}")]
    Unsupported {
        what: &'static str,
        value: String,
        vocabulary: Vocabulary,
    },
    #[error("exactly one rule must be defined")]
    RuleCount(usize),
}
