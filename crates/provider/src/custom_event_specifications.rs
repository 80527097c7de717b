use super::{
    FieldType, ResourceData, ResourceHandle, ResourceNameFormatter, Schema, SchemaField,
};
use anyhow::Context;
use models::{
    AggregationType, ConditionOperatorType, CustomEventSpecification, EntityVerificationRule,
    MatchingOperatorType, RuleSpecification, RuleType, Severity, SystemRule, ThresholdRule,
};
use restapi::{InstanaApi, RestResource};

pub const FIELD_NAME: &str = "name";
pub const FIELD_FULL_NAME: &str = "full_name";
pub const FIELD_ENTITY_TYPE: &str = "entity_type";
pub const FIELD_QUERY: &str = "query";
pub const FIELD_TRIGGERING: &str = "triggering";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_EXPIRATION_TIME: &str = "expiration_time";
pub const FIELD_ENABLED: &str = "enabled";
pub const FIELD_RULE_SEVERITY: &str = "rule_severity";

pub const FIELD_RULE_SYSTEM_RULE_ID: &str = "rule_system_rule_id";

pub const FIELD_RULE_METRIC_NAME: &str = "rule_metric_name";
pub const FIELD_RULE_ROLLUP: &str = "rule_rollup";
pub const FIELD_RULE_WINDOW: &str = "rule_window";
pub const FIELD_RULE_AGGREGATION: &str = "rule_aggregation";
pub const FIELD_RULE_CONDITION_OPERATOR: &str = "rule_condition_operator";
pub const FIELD_RULE_CONDITION_VALUE: &str = "rule_condition_value";

pub const FIELD_RULE_MATCHING_ENTITY_LABEL: &str = "rule_matching_entity_label";
pub const FIELD_RULE_MATCHING_ENTITY_TYPE: &str = "rule_matching_entity_type";
pub const FIELD_RULE_MATCHING_OPERATOR: &str = "rule_matching_operator";
pub const FIELD_RULE_OFFLINE_DURATION: &str = "rule_offline_duration";

/// CustomEventSpecificationHandle manages custom event specifications
/// having a rule of a single RuleType. The rule isn't exposed as a list:
/// its fields are flattened into the resource with a `rule_` prefix.
#[derive(Debug, Clone, Copy)]
pub struct CustomEventSpecificationHandle {
    rule_type: RuleType,
}

impl CustomEventSpecificationHandle {
    pub fn new(rule_type: RuleType) -> Self {
        Self { rule_type }
    }

    pub fn all() -> Vec<Self> {
        [
            RuleType::System,
            RuleType::Threshold,
            RuleType::EntityVerification,
        ]
        .into_iter()
        .map(Self::new)
        .collect()
    }

    fn common_schema() -> Schema {
        Schema::new()
            .field(
                FIELD_NAME,
                SchemaField::required(
                    FieldType::String,
                    "Configures the name of the custom event specification",
                ),
            )
            .field(
                FIELD_FULL_NAME,
                SchemaField::computed(
                    FieldType::String,
                    "The full name of the custom event specification, with the configured prefix and suffix",
                ),
            )
            .field(
                FIELD_ENTITY_TYPE,
                SchemaField::required(
                    FieldType::String,
                    "Configures the entity type of the custom event specification",
                ),
            )
            .field(
                FIELD_QUERY,
                SchemaField::optional(
                    FieldType::String,
                    "Configures the dynamic focus query of the custom event specification",
                ),
            )
            .field(
                FIELD_TRIGGERING,
                SchemaField::optional(
                    FieldType::Bool,
                    "Configures whether an incident is triggered for raised events",
                )
                .with_default(false),
            )
            .field(
                FIELD_DESCRIPTION,
                SchemaField::optional(
                    FieldType::String,
                    "Configures the description of raised events",
                ),
            )
            .field(
                FIELD_EXPIRATION_TIME,
                SchemaField::optional(
                    FieldType::Int,
                    "Configures the expiration time of raised events, in milliseconds",
                ),
            )
            .field(
                FIELD_ENABLED,
                SchemaField::optional(
                    FieldType::Bool,
                    "Configures whether the custom event specification is enabled",
                )
                .with_default(true),
            )
            .field(
                FIELD_RULE_SEVERITY,
                SchemaField::required(FieldType::String, "Configures the severity of the rule")
                    .with_allowed_values(Severity::terraform_representations()),
            )
    }

    fn rule_from_data(&self, data: &ResourceData) -> anyhow::Result<RuleSpecification> {
        let severity =
            Severity::for_terraform_representation(data.require_str(FIELD_RULE_SEVERITY)?)?
                .api_representation();

        let rule = match self.rule_type {
            RuleType::System => RuleSpecification::System(SystemRule {
                system_rule_id: data.require_str(FIELD_RULE_SYSTEM_RULE_ID)?.to_string(),
                severity,
            }),
            RuleType::Threshold => RuleSpecification::Threshold(ThresholdRule {
                metric_name: data.require_str(FIELD_RULE_METRIC_NAME)?.to_string(),
                rollup: data.get_i64(FIELD_RULE_ROLLUP),
                window: data.get_i64(FIELD_RULE_WINDOW),
                aggregation: data
                    .get_str(FIELD_RULE_AGGREGATION)
                    .map(|name| {
                        AggregationType::from_str(name)
                            .with_context(|| format!("{name} is not a supported aggregation"))
                    })
                    .transpose()?,
                condition_operator: {
                    let name = data.require_str(FIELD_RULE_CONDITION_OPERATOR)?;
                    ConditionOperatorType::from_str(name)
                        .with_context(|| format!("{name} is not a supported condition operator"))?
                },
                condition_value: data.get_f64(FIELD_RULE_CONDITION_VALUE),
                severity,
            }),
            RuleType::EntityVerification => {
                RuleSpecification::EntityVerification(EntityVerificationRule {
                    matching_entity_label: data
                        .require_str(FIELD_RULE_MATCHING_ENTITY_LABEL)?
                        .to_string(),
                    matching_entity_type: data
                        .require_str(FIELD_RULE_MATCHING_ENTITY_TYPE)?
                        .to_string(),
                    matching_operator: MatchingOperatorType::for_terraform_representation(
                        data.require_str(FIELD_RULE_MATCHING_OPERATOR)?,
                    )?,
                    offline_duration: data.require_i64(FIELD_RULE_OFFLINE_DURATION)?,
                    severity,
                })
            }
        };
        Ok(rule)
    }
}

impl ResourceHandle for CustomEventSpecificationHandle {
    type Object = CustomEventSpecification;

    fn resource_name(&self) -> &'static str {
        match self.rule_type {
            RuleType::System => "instana_custom_event_spec_system_rule",
            RuleType::Threshold => "instana_custom_event_spec_threshold_rule",
            RuleType::EntityVerification => "instana_custom_event_spec_entity_verification_rule",
        }
    }

    fn schema(&self) -> Schema {
        let schema = Self::common_schema();

        match self.rule_type {
            RuleType::System => schema.field(
                FIELD_RULE_SYSTEM_RULE_ID,
                SchemaField::required(FieldType::String, "Configures the system rule id"),
            ),
            RuleType::Threshold => schema
                .field(
                    FIELD_RULE_METRIC_NAME,
                    SchemaField::required(FieldType::String, "Configures the metric name"),
                )
                .field(
                    FIELD_RULE_ROLLUP,
                    SchemaField::optional(FieldType::Int, "Configures the rollup of the metric"),
                )
                .field(
                    FIELD_RULE_WINDOW,
                    SchemaField::optional(
                        FieldType::Int,
                        "Configures the metric aggregation window, in milliseconds",
                    ),
                )
                .field(
                    FIELD_RULE_AGGREGATION,
                    SchemaField::optional(
                        FieldType::String,
                        "Configures the aggregation of the window. Required when a window is set",
                    )
                    .with_allowed_values(AggregationType::names()),
                )
                .field(
                    FIELD_RULE_CONDITION_OPERATOR,
                    SchemaField::required(
                        FieldType::String,
                        "Configures the operator comparing the metric with the condition value",
                    )
                    .with_allowed_values(ConditionOperatorType::names()),
                )
                .field(
                    FIELD_RULE_CONDITION_VALUE,
                    SchemaField::optional(FieldType::Float, "Configures the condition value"),
                ),
            RuleType::EntityVerification => schema
                .field(
                    FIELD_RULE_MATCHING_ENTITY_LABEL,
                    SchemaField::required(
                        FieldType::String,
                        "Configures the label of the matched entities",
                    ),
                )
                .field(
                    FIELD_RULE_MATCHING_ENTITY_TYPE,
                    SchemaField::required(
                        FieldType::String,
                        "Configures the type of the matched entities",
                    ),
                )
                .field(
                    FIELD_RULE_MATCHING_OPERATOR,
                    SchemaField::required(
                        FieldType::String,
                        "Configures how the label of entities is matched",
                    )
                    .with_allowed_values(MatchingOperatorType::terraform_representations()),
                )
                .field(
                    FIELD_RULE_OFFLINE_DURATION,
                    SchemaField::required(
                        FieldType::Int,
                        "Configures the duration after which a missing entity is offline, in milliseconds",
                    ),
                ),
        }
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<CustomEventSpecification> {
        api.custom_event_specifications()
    }

    fn to_domain_object(
        &self,
        data: &ResourceData,
        formatter: &ResourceNameFormatter,
    ) -> anyhow::Result<CustomEventSpecification> {
        Ok(CustomEventSpecification {
            id: data.id().to_string(),
            name: formatter.format(data.require_str(FIELD_NAME)?),
            entity_type: data.require_str(FIELD_ENTITY_TYPE)?.to_string(),
            query: data.get_str(FIELD_QUERY).map(str::to_string),
            triggering: data.get_bool(FIELD_TRIGGERING).unwrap_or(false),
            description: data.get_str(FIELD_DESCRIPTION).map(str::to_string),
            expiration_time: data.get_i64(FIELD_EXPIRATION_TIME),
            enabled: data.get_bool(FIELD_ENABLED).unwrap_or(true),
            rules: vec![self.rule_from_data(data)?],
        })
    }

    fn from_domain_object(
        &self,
        spec: &CustomEventSpecification,
        formatter: &ResourceNameFormatter,
    ) -> anyhow::Result<ResourceData> {
        let rule = spec.rule().with_context(|| {
            format!(
                "custom event specification {} must have exactly one rule",
                spec.id
            )
        })?;
        if rule.rule_type() != self.rule_type {
            anyhow::bail!(
                "custom event specification {} has a {} rule, but {} expects a {} rule",
                spec.id,
                rule.rule_type(),
                self.resource_name(),
                self.rule_type,
            );
        }
        let severity = Severity::for_api_representation(rule.severity())?;

        let mut data = ResourceData::new(spec.id.as_str());
        data.set(FIELD_NAME, formatter.undo_formatting(&spec.name));
        data.set(FIELD_FULL_NAME, spec.name.as_str());
        data.set(FIELD_ENTITY_TYPE, spec.entity_type.as_str());
        data.set_opt(FIELD_QUERY, spec.query.as_deref());
        data.set(FIELD_TRIGGERING, spec.triggering);
        data.set_opt(FIELD_DESCRIPTION, spec.description.as_deref());
        data.set_opt(FIELD_EXPIRATION_TIME, spec.expiration_time);
        data.set(FIELD_ENABLED, spec.enabled);
        data.set(FIELD_RULE_SEVERITY, severity.terraform_representation());

        match rule {
            RuleSpecification::System(SystemRule { system_rule_id, .. }) => {
                data.set(FIELD_RULE_SYSTEM_RULE_ID, system_rule_id.as_str());
            }
            RuleSpecification::Threshold(ThresholdRule {
                metric_name,
                rollup,
                window,
                aggregation,
                condition_operator,
                condition_value,
                severity: _,
            }) => {
                data.set(FIELD_RULE_METRIC_NAME, metric_name.as_str());
                data.set_opt(FIELD_RULE_ROLLUP, *rollup);
                data.set_opt(FIELD_RULE_WINDOW, *window);
                data.set_opt(FIELD_RULE_AGGREGATION, aggregation.map(|a| a.name()));
                data.set(FIELD_RULE_CONDITION_OPERATOR, condition_operator.name());
                data.set_opt(FIELD_RULE_CONDITION_VALUE, *condition_value);
            }
            RuleSpecification::EntityVerification(EntityVerificationRule {
                matching_entity_label,
                matching_entity_type,
                matching_operator,
                offline_duration,
                severity: _,
            }) => {
                data.set(
                    FIELD_RULE_MATCHING_ENTITY_LABEL,
                    matching_entity_label.as_str(),
                );
                data.set(FIELD_RULE_MATCHING_ENTITY_TYPE, matching_entity_type.as_str());
                data.set(
                    FIELD_RULE_MATCHING_OPERATOR,
                    matching_operator.terraform_representation(),
                );
                data.set(FIELD_RULE_OFFLINE_DURATION, *offline_duration);
            }
        }
        Ok(data)
    }
}
