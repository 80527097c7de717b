use super::{
    is_supported_aggregation_type, is_supported_condition_operator_type, AggregationType,
    ConditionOperatorType, Error, MatchingOperatorType,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const SYSTEM_RULE_ID: &str = "id of system rule";
const METRIC_NAME: &str = "metric name of threshold rule";
const AGGREGATION: &str = "aggregation type of threshold rule";
const CONDITION_OPERATOR: &str = "condition operator of threshold rule";
const MATCHING_ENTITY_LABEL: &str = "matching entity label of entity verification rule";
const MATCHING_ENTITY_TYPE: &str = "matching entity type of entity verification rule";
const MATCHING_OPERATOR: &str = "matching operator of entity verification rule";
const OFFLINE_DURATION: &str = "offline duration of entity verification rule";

/// RuleType discriminates the kinds of custom event specification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    System,
    Threshold,
    EntityVerification,
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl RuleType {
    pub fn name(&self) -> &'static str {
        match self {
            RuleType::System => "system",
            RuleType::Threshold => "threshold",
            RuleType::EntityVerification => "entity_verification",
        }
    }

    fn all() -> &'static [RuleType] {
        &[
            RuleType::System,
            RuleType::Threshold,
            RuleType::EntityVerification,
        ]
    }

    pub fn from_str(name: &str) -> Option<RuleType> {
        Self::all().iter().find(|t| t.name() == name).copied()
    }
}

/// RawRuleSpecification is the wire shape of a rule within the Instana API.
/// It's a single flat object carrying the fields of every rule kind, where
/// `ruleType` selects which of them apply.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawRuleSpecification {
    /// # Kind of the rule: system, threshold, or entity_verification.
    #[serde(default)]
    pub rule_type: String,
    /// # Severity of raised events (5 is warning, 10 is critical).
    #[serde(default)]
    pub severity: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_rule_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_entity_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_duration: Option<i64>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::is_empty).unwrap_or(true)
}

// Both absent, or both present and zero, leaves the rule without an interval.
fn lacks_interval(rollup: Option<i64>, window: Option<i64>) -> bool {
    matches!((rollup, window), (None, None) | (Some(0), Some(0)))
}

impl RawRuleSpecification {
    /// Validate the rule, returning the first violation found
    /// in the checks of its rule type.
    pub fn validate(&self) -> Result<(), Error> {
        if self.rule_type.is_empty() {
            return Err(Error::RuleTypeMissing);
        }
        match RuleType::from_str(&self.rule_type) {
            Some(RuleType::System) => self.validate_system_rule(),
            Some(RuleType::Threshold) => self.validate_threshold_rule(),
            Some(RuleType::EntityVerification) => self.validate_entity_verification_rule(),
            None => Err(Error::UnsupportedRuleType(self.rule_type.clone())),
        }
    }

    /// Resolve the matching operator of the rule from its Instana API
    /// representation. Rules without a matching operator resolve to None.
    pub fn matching_operator_type(&self) -> Result<Option<MatchingOperatorType>, Error> {
        self.matching_operator
            .as_deref()
            .map(MatchingOperatorType::for_instana_representation)
            .transpose()
    }

    fn validate_system_rule(&self) -> Result<(), Error> {
        if is_blank(&self.system_rule_id) {
            return Err(Error::Missing(SYSTEM_RULE_ID));
        }
        Ok(())
    }

    fn validate_threshold_rule(&self) -> Result<(), Error> {
        if is_blank(&self.metric_name) {
            return Err(Error::Missing(METRIC_NAME));
        }
        if lacks_interval(self.rollup, self.window) {
            return Err(Error::RollupOrWindowMissing);
        }
        if self.window.is_some()
            && !self
                .aggregation
                .as_deref()
                .map(is_supported_aggregation_type)
                .unwrap_or(false)
        {
            return Err(Error::MissingOrInvalid(AGGREGATION));
        }
        if !self
            .condition_operator
            .as_deref()
            .map(is_supported_condition_operator_type)
            .unwrap_or(false)
        {
            return Err(Error::MissingOrInvalid(CONDITION_OPERATOR));
        }
        Ok(())
    }

    fn validate_entity_verification_rule(&self) -> Result<(), Error> {
        if is_blank(&self.matching_entity_label) {
            return Err(Error::Missing(MATCHING_ENTITY_LABEL));
        }
        if is_blank(&self.matching_entity_type) {
            return Err(Error::Missing(MATCHING_ENTITY_TYPE));
        }
        if !matches!(self.matching_operator_type(), Ok(Some(_))) {
            return Err(Error::MissingOrInvalid(MATCHING_OPERATOR));
        }
        if self.offline_duration.is_none() {
            return Err(Error::Missing(OFFLINE_DURATION));
        }
        Ok(())
    }
}

/// SystemRule raises events for a built-in Instana system rule.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemRule {
    pub system_rule_id: String,
    pub severity: i32,
}

/// ThresholdRule raises events when a metric crosses a condition value.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRule {
    pub metric_name: String,
    /// Rollup of the metric, in milliseconds.
    pub rollup: Option<i64>,
    /// Window over which the metric is aggregated, in milliseconds.
    pub window: Option<i64>,
    /// Aggregation of the window. Required when a window is set.
    pub aggregation: Option<AggregationType>,
    pub condition_operator: ConditionOperatorType,
    pub condition_value: Option<f64>,
    pub severity: i32,
}

/// EntityVerificationRule raises events when matching entities go offline.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityVerificationRule {
    pub matching_entity_label: String,
    pub matching_entity_type: String,
    pub matching_operator: MatchingOperatorType,
    /// Duration after which an absent entity is considered offline, in milliseconds.
    pub offline_duration: i64,
    pub severity: i32,
}

/// RuleSpecification is the rule of a custom event specification.
/// On the wire it's exchanged as a RawRuleSpecification, and decoding
/// fails for rules which don't validate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawRuleSpecification", into = "RawRuleSpecification")]
pub enum RuleSpecification {
    System(SystemRule),
    Threshold(ThresholdRule),
    EntityVerification(EntityVerificationRule),
}

impl JsonSchema for RuleSpecification {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        RawRuleSpecification::schema_name()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        RawRuleSpecification::json_schema(generator)
    }
}

impl RuleSpecification {
    pub fn system(system_rule_id: impl Into<String>, severity: i32) -> Self {
        Self::System(SystemRule {
            system_rule_id: system_rule_id.into(),
            severity,
        })
    }

    pub fn threshold(
        metric_name: impl Into<String>,
        rollup: Option<i64>,
        window: Option<i64>,
        aggregation: Option<AggregationType>,
        condition_operator: ConditionOperatorType,
        condition_value: Option<f64>,
        severity: i32,
    ) -> Self {
        Self::Threshold(ThresholdRule {
            metric_name: metric_name.into(),
            rollup,
            window,
            aggregation,
            condition_operator,
            condition_value,
            severity,
        })
    }

    pub fn entity_verification(
        matching_entity_label: impl Into<String>,
        matching_entity_type: impl Into<String>,
        matching_operator: MatchingOperatorType,
        offline_duration: i64,
        severity: i32,
    ) -> Self {
        Self::EntityVerification(EntityVerificationRule {
            matching_entity_label: matching_entity_label.into(),
            matching_entity_type: matching_entity_type.into(),
            matching_operator,
            offline_duration,
            severity,
        })
    }

    pub fn example() -> Self {
        Self::threshold(
            "cpu.user",
            None,
            Some(60000),
            Some(AggregationType::Avg),
            ConditionOperatorType::GreaterThan,
            Some(90.0),
            10,
        )
    }

    pub fn rule_type(&self) -> RuleType {
        match self {
            Self::System(_) => RuleType::System,
            Self::Threshold(_) => RuleType::Threshold,
            Self::EntityVerification(_) => RuleType::EntityVerification,
        }
    }

    pub fn severity(&self) -> i32 {
        match self {
            Self::System(r) => r.severity,
            Self::Threshold(r) => r.severity,
            Self::EntityVerification(r) => r.severity,
        }
    }

    /// Validate the invariants of the rule which aren't already
    /// guaranteed by its types.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::System(SystemRule { system_rule_id, .. }) => {
                if system_rule_id.is_empty() {
                    return Err(Error::Missing(SYSTEM_RULE_ID));
                }
            }
            Self::Threshold(ThresholdRule {
                metric_name,
                rollup,
                window,
                aggregation,
                ..
            }) => {
                if metric_name.is_empty() {
                    return Err(Error::Missing(METRIC_NAME));
                }
                if lacks_interval(*rollup, *window) {
                    return Err(Error::RollupOrWindowMissing);
                }
                if window.is_some() && aggregation.is_none() {
                    return Err(Error::MissingOrInvalid(AGGREGATION));
                }
            }
            Self::EntityVerification(EntityVerificationRule {
                matching_entity_label,
                matching_entity_type,
                ..
            }) => {
                if matching_entity_label.is_empty() {
                    return Err(Error::Missing(MATCHING_ENTITY_LABEL));
                }
                if matching_entity_type.is_empty() {
                    return Err(Error::Missing(MATCHING_ENTITY_TYPE));
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<RawRuleSpecification> for RuleSpecification {
    type Error = Error;

    fn try_from(raw: RawRuleSpecification) -> Result<Self, Self::Error> {
        raw.validate()?;

        let RawRuleSpecification {
            rule_type,
            severity,
            system_rule_id,
            metric_name,
            rollup,
            window,
            aggregation,
            condition_operator,
            condition_value,
            matching_entity_type,
            matching_operator,
            matching_entity_label,
            offline_duration,
        } = raw;

        // Required fields were verified by validate(), but are resolved
        // again here so that no field is assumed to be present.
        let rule = match RuleType::from_str(&rule_type) {
            Some(RuleType::System) => Self::System(SystemRule {
                system_rule_id: system_rule_id.unwrap_or_default(),
                severity,
            }),
            Some(RuleType::Threshold) => Self::Threshold(ThresholdRule {
                metric_name: metric_name.unwrap_or_default(),
                rollup,
                window,
                // Only consulted with a window, where validate() required it to resolve.
                aggregation: aggregation.as_deref().and_then(AggregationType::from_str),
                condition_operator: condition_operator
                    .as_deref()
                    .and_then(ConditionOperatorType::from_str)
                    .ok_or(Error::MissingOrInvalid(CONDITION_OPERATOR))?,
                condition_value,
                severity,
            }),
            Some(RuleType::EntityVerification) => Self::EntityVerification(EntityVerificationRule {
                matching_entity_label: matching_entity_label.unwrap_or_default(),
                matching_entity_type: matching_entity_type.unwrap_or_default(),
                matching_operator: matching_operator
                    .as_deref()
                    .and_then(|op| MatchingOperatorType::for_instana_representation(op).ok())
                    .ok_or(Error::MissingOrInvalid(MATCHING_OPERATOR))?,
                offline_duration: offline_duration.ok_or(Error::Missing(OFFLINE_DURATION))?,
                severity,
            }),
            None => return Err(Error::UnsupportedRuleType(rule_type)),
        };
        Ok(rule)
    }
}

impl From<RuleSpecification> for RawRuleSpecification {
    fn from(rule: RuleSpecification) -> Self {
        let rule_type = rule.rule_type().name().to_string();

        match rule {
            RuleSpecification::System(SystemRule {
                system_rule_id,
                severity,
            }) => Self {
                rule_type,
                severity,
                system_rule_id: Some(system_rule_id),
                ..Default::default()
            },
            RuleSpecification::Threshold(ThresholdRule {
                metric_name,
                rollup,
                window,
                aggregation,
                condition_operator,
                condition_value,
                severity,
            }) => Self {
                rule_type,
                severity,
                metric_name: Some(metric_name),
                rollup,
                window,
                aggregation: aggregation.map(|a| a.name().to_string()),
                condition_operator: Some(condition_operator.name().to_string()),
                condition_value,
                ..Default::default()
            },
            RuleSpecification::EntityVerification(EntityVerificationRule {
                matching_entity_label,
                matching_entity_type,
                matching_operator,
                offline_duration,
                severity,
            }) => Self {
                rule_type,
                severity,
                matching_entity_type: Some(matching_entity_type),
                matching_operator: Some(matching_operator.instana_representation().to_string()),
                matching_entity_label: Some(matching_entity_label),
                offline_duration: Some(offline_duration),
                ..Default::default()
            },
        }
    }
}
