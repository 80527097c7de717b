use super::{Error, Vocabulary};

// Fixed vocabularies of custom event specification rules.
// Aggregations and condition operators share a single representation
// between the Instana API and the Terraform provider, while matching
// operators are spelled differently on either side.

/// Aggregation applied over the window of a threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationType {
    Sum,
    Avg,
    Min,
    Max,
}

impl std::fmt::Display for AggregationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl AggregationType {
    pub fn name(&self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Avg => "avg",
            AggregationType::Min => "min",
            AggregationType::Max => "max",
        }
    }

    pub fn all() -> &'static [AggregationType] {
        &[
            AggregationType::Sum,
            AggregationType::Avg,
            AggregationType::Min,
            AggregationType::Max,
        ]
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(AggregationType::name).collect()
    }

    pub fn from_str(name: &str) -> Option<AggregationType> {
        Self::all().iter().find(|t| t.name() == name).copied()
    }
}

/// Returns true if `aggregation` names a supported AggregationType.
pub fn is_supported_aggregation_type(aggregation: &str) -> bool {
    AggregationType::from_str(aggregation).is_some()
}

/// Operator comparing a metric against the condition value of a threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionOperatorType {
    Equals,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl std::fmt::Display for ConditionOperatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ConditionOperatorType {
    pub fn name(&self) -> &'static str {
        match self {
            ConditionOperatorType::Equals => "==",
            ConditionOperatorType::NotEqual => "!=",
            ConditionOperatorType::LessThan => "<",
            ConditionOperatorType::LessThanOrEqual => "<=",
            ConditionOperatorType::GreaterThan => ">",
            ConditionOperatorType::GreaterThanOrEqual => ">=",
        }
    }

    pub fn all() -> &'static [ConditionOperatorType] {
        &[
            ConditionOperatorType::Equals,
            ConditionOperatorType::NotEqual,
            ConditionOperatorType::LessThan,
            ConditionOperatorType::LessThanOrEqual,
            ConditionOperatorType::GreaterThan,
            ConditionOperatorType::GreaterThanOrEqual,
        ]
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(ConditionOperatorType::name).collect()
    }

    pub fn from_str(name: &str) -> Option<ConditionOperatorType> {
        Self::all().iter().find(|t| t.name() == name).copied()
    }
}

/// Returns true if `operator` names a supported ConditionOperatorType.
pub fn is_supported_condition_operator_type(operator: &str) -> bool {
    ConditionOperatorType::from_str(operator).is_some()
}

/// Operator used by entity verification rules to match entity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchingOperatorType {
    Is,
    Contains,
    StartsWith,
    EndsWith,
}

impl MatchingOperatorType {
    pub fn instana_representation(&self) -> &'static str {
        match self {
            MatchingOperatorType::Is => "is",
            MatchingOperatorType::Contains => "contains",
            MatchingOperatorType::StartsWith => "startsWith",
            MatchingOperatorType::EndsWith => "endsWith",
        }
    }

    pub fn terraform_representation(&self) -> &'static str {
        match self {
            MatchingOperatorType::Is => "is",
            MatchingOperatorType::Contains => "contains",
            MatchingOperatorType::StartsWith => "starts_with",
            MatchingOperatorType::EndsWith => "ends_with",
        }
    }

    pub fn all() -> &'static [MatchingOperatorType] {
        &[
            MatchingOperatorType::Is,
            MatchingOperatorType::Contains,
            MatchingOperatorType::StartsWith,
            MatchingOperatorType::EndsWith,
        ]
    }

    pub fn instana_representations() -> Vec<&'static str> {
        Self::all()
            .iter()
            .map(MatchingOperatorType::instana_representation)
            .collect()
    }

    pub fn terraform_representations() -> Vec<&'static str> {
        Self::all()
            .iter()
            .map(MatchingOperatorType::terraform_representation)
            .collect()
    }

    pub fn for_instana_representation(value: &str) -> Result<MatchingOperatorType, Error> {
        Self::all()
            .iter()
            .find(|t| t.instana_representation() == value)
            .copied()
            .ok_or_else(|| Error::Unsupported {
                what: "matching operator type",
                value: value.to_string(),
                vocabulary: Vocabulary::InstanaApi,
            })
    }

    pub fn for_terraform_representation(value: &str) -> Result<MatchingOperatorType, Error> {
        Self::all()
            .iter()
            .find(|t| t.terraform_representation() == value)
            .copied()
            .ok_or_else(|| Error::Unsupported {
                what: "matching operator type",
                value: value.to_string(),
                vocabulary: Vocabulary::Terraform,
            })
    }
}
