mod alerting_channels;
mod config;
mod custom_event_specifications;
mod formatter;
pub mod logging;
mod provider;
mod resource;
mod resource_data;
mod schema;

pub use alerting_channels::AlertingChannelHandle;
pub use config::{ProviderConfig, DEFAULT_NAME_SUFFIX};
pub use custom_event_specifications::CustomEventSpecificationHandle;
pub use formatter::ResourceNameFormatter;
pub use provider::Provider;
pub use resource::{Resource, ResourceHandle, ResourceOperations};
pub use resource_data::ResourceData;
pub use schema::{FieldType, Presence, Schema, SchemaError, SchemaField};

/// Field names of the custom event specification resources.
pub mod custom_event_specification_fields {
    pub use super::custom_event_specifications::{
        FIELD_DESCRIPTION, FIELD_ENABLED, FIELD_ENTITY_TYPE, FIELD_EXPIRATION_TIME,
        FIELD_FULL_NAME, FIELD_NAME, FIELD_QUERY, FIELD_RULE_AGGREGATION,
        FIELD_RULE_CONDITION_OPERATOR, FIELD_RULE_CONDITION_VALUE,
        FIELD_RULE_MATCHING_ENTITY_LABEL, FIELD_RULE_MATCHING_ENTITY_TYPE,
        FIELD_RULE_MATCHING_OPERATOR, FIELD_RULE_METRIC_NAME, FIELD_RULE_OFFLINE_DURATION,
        FIELD_RULE_ROLLUP, FIELD_RULE_SEVERITY, FIELD_RULE_SYSTEM_RULE_ID, FIELD_RULE_WINDOW,
        FIELD_TRIGGERING,
    };
}

/// Field names of the alerting channel resources.
pub mod alerting_channel_fields {
    pub use super::alerting_channels::{
        FIELD_API_KEY, FIELD_CHANNEL, FIELD_EMAILS, FIELD_FULL_NAME, FIELD_ICON_URL, FIELD_NAME,
        FIELD_ROUTING_KEY, FIELD_SERVICE_INTEGRATION_KEY, FIELD_WEBHOOK_URL, FIELD_WEBHOOK_URLS,
    };
}
