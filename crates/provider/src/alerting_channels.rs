use super::{
    FieldType, ResourceData, ResourceHandle, ResourceNameFormatter, Schema, SchemaField,
};
use models::{AlertingChannel, AlertingChannelType, ChannelDetails};
use restapi::{InstanaApi, RestResource};

pub const FIELD_NAME: &str = "name";
pub const FIELD_FULL_NAME: &str = "full_name";
pub const FIELD_EMAILS: &str = "emails";
pub const FIELD_WEBHOOK_URL: &str = "webhook_url";
pub const FIELD_ICON_URL: &str = "icon_url";
pub const FIELD_CHANNEL: &str = "channel";
pub const FIELD_SERVICE_INTEGRATION_KEY: &str = "service_integration_key";
pub const FIELD_API_KEY: &str = "api_key";
pub const FIELD_ROUTING_KEY: &str = "routing_key";
pub const FIELD_WEBHOOK_URLS: &str = "webhook_urls";

/// AlertingChannelHandle manages alerting channels of a single kind.
#[derive(Debug, Clone, Copy)]
pub struct AlertingChannelHandle {
    kind: AlertingChannelType,
}

impl AlertingChannelHandle {
    pub fn new(kind: AlertingChannelType) -> Self {
        Self { kind }
    }

    pub fn all() -> Vec<Self> {
        [
            AlertingChannelType::Email,
            AlertingChannelType::Slack,
            AlertingChannelType::PagerDuty,
            AlertingChannelType::VictorOps,
            AlertingChannelType::Webhook,
        ]
        .into_iter()
        .map(Self::new)
        .collect()
    }

    fn details_from_data(&self, data: &ResourceData) -> anyhow::Result<ChannelDetails> {
        let details = match self.kind {
            AlertingChannelType::Email => ChannelDetails::Email {
                emails: data.require_string_list(FIELD_EMAILS)?,
            },
            AlertingChannelType::Slack => ChannelDetails::Slack {
                webhook_url: data.require_str(FIELD_WEBHOOK_URL)?.to_string(),
                icon_url: data.get_str(FIELD_ICON_URL).map(str::to_string),
                channel: data.get_str(FIELD_CHANNEL).map(str::to_string),
            },
            AlertingChannelType::PagerDuty => ChannelDetails::PagerDuty {
                service_integration_key: data
                    .require_str(FIELD_SERVICE_INTEGRATION_KEY)?
                    .to_string(),
            },
            AlertingChannelType::VictorOps => ChannelDetails::VictorOps {
                api_key: data.require_str(FIELD_API_KEY)?.to_string(),
                routing_key: data.require_str(FIELD_ROUTING_KEY)?.to_string(),
            },
            AlertingChannelType::Webhook => ChannelDetails::Webhook {
                webhook_urls: data.require_string_list(FIELD_WEBHOOK_URLS)?,
            },
        };
        Ok(details)
    }
}

impl ResourceHandle for AlertingChannelHandle {
    type Object = AlertingChannel;

    fn resource_name(&self) -> &'static str {
        match self.kind {
            AlertingChannelType::Email => "instana_alerting_channel_email",
            AlertingChannelType::Slack => "instana_alerting_channel_slack",
            AlertingChannelType::PagerDuty => "instana_alerting_channel_pager_duty",
            AlertingChannelType::VictorOps => "instana_alerting_channel_victor_ops",
            AlertingChannelType::Webhook => "instana_alerting_channel_webhook",
        }
    }

    fn schema(&self) -> Schema {
        let schema = Schema::new()
            .field(
                FIELD_NAME,
                SchemaField::required(FieldType::String, "Configures the name of the alerting channel"),
            )
            .field(
                FIELD_FULL_NAME,
                SchemaField::computed(
                    FieldType::String,
                    "The full name of the alerting channel, with the configured prefix and suffix",
                ),
            );

        match self.kind {
            AlertingChannelType::Email => schema.field(
                FIELD_EMAILS,
                SchemaField::required(
                    FieldType::StringList,
                    "The list of email addresses to which alerts are sent",
                ),
            ),
            AlertingChannelType::Slack => schema
                .field(
                    FIELD_WEBHOOK_URL,
                    SchemaField::required(FieldType::String, "The webhook URL of the Slack app"),
                )
                .field(
                    FIELD_ICON_URL,
                    SchemaField::optional(FieldType::String, "The URL of the icon shown in Slack"),
                )
                .field(
                    FIELD_CHANNEL,
                    SchemaField::optional(FieldType::String, "The Slack channel to post to"),
                ),
            AlertingChannelType::PagerDuty => schema.field(
                FIELD_SERVICE_INTEGRATION_KEY,
                SchemaField::required(
                    FieldType::String,
                    "The integration key of the PagerDuty service",
                ),
            ),
            AlertingChannelType::VictorOps => schema
                .field(
                    FIELD_API_KEY,
                    SchemaField::required(FieldType::String, "The VictorOps API key"),
                )
                .field(
                    FIELD_ROUTING_KEY,
                    SchemaField::required(FieldType::String, "The VictorOps routing key"),
                ),
            AlertingChannelType::Webhook => schema.field(
                FIELD_WEBHOOK_URLS,
                SchemaField::required(
                    FieldType::StringList,
                    "The list of webhook URLs to which alerts are posted",
                ),
            ),
        }
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<AlertingChannel> {
        api.alerting_channels()
    }

    fn to_domain_object(
        &self,
        data: &ResourceData,
        formatter: &ResourceNameFormatter,
    ) -> anyhow::Result<AlertingChannel> {
        Ok(AlertingChannel {
            id: data.id().to_string(),
            name: formatter.format(data.require_str(FIELD_NAME)?),
            details: self.details_from_data(data)?,
        })
    }

    fn from_domain_object(
        &self,
        channel: &AlertingChannel,
        formatter: &ResourceNameFormatter,
    ) -> anyhow::Result<ResourceData> {
        if channel.details.kind() != self.kind {
            anyhow::bail!(
                "alerting channel {} is of kind {}, but {} expects kind {}",
                channel.id,
                channel.details.kind(),
                self.resource_name(),
                self.kind,
            );
        }

        let mut data = ResourceData::new(channel.id.as_str());
        data.set(FIELD_NAME, formatter.undo_formatting(&channel.name));
        data.set(FIELD_FULL_NAME, channel.name.as_str());

        match &channel.details {
            ChannelDetails::Email { emails } => {
                data.set(FIELD_EMAILS, emails.clone());
            }
            ChannelDetails::Slack {
                webhook_url,
                icon_url,
                channel,
            } => {
                data.set(FIELD_WEBHOOK_URL, webhook_url.as_str());
                data.set_opt(FIELD_ICON_URL, icon_url.as_deref());
                data.set_opt(FIELD_CHANNEL, channel.as_deref());
            }
            ChannelDetails::PagerDuty {
                service_integration_key,
            } => {
                data.set(
                    FIELD_SERVICE_INTEGRATION_KEY,
                    service_integration_key.as_str(),
                );
            }
            ChannelDetails::VictorOps {
                api_key,
                routing_key,
            } => {
                data.set(FIELD_API_KEY, api_key.as_str());
                data.set(FIELD_ROUTING_KEY, routing_key.as_str());
            }
            ChannelDetails::Webhook { webhook_urls } => {
                data.set(FIELD_WEBHOOK_URLS, webhook_urls.clone());
            }
        }
        Ok(data)
    }
}
