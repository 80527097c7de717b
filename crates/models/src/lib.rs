//! Domain models of Instana event settings, as exchanged with the
//! Instana Web REST API and validated before every write.

mod alerting_channels;
mod custom_event_specifications;
mod error;
mod operators;
mod rules;
mod severity;

pub use alerting_channels::{AlertingChannel, AlertingChannelType, ChannelDetails};
pub use custom_event_specifications::CustomEventSpecification;
pub use error::{Error, Vocabulary};
pub use operators::{
    is_supported_aggregation_type, is_supported_condition_operator_type, AggregationType,
    ConditionOperatorType, MatchingOperatorType,
};
pub use rules::{
    EntityVerificationRule, RawRuleSpecification, RuleSpecification, RuleType, SystemRule,
    ThresholdRule,
};
pub use severity::Severity;
