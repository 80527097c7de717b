use super::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An AlertingChannel is a target to which Instana sends alerts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[schemars(example = AlertingChannel::example())]
pub struct AlertingChannel {
    /// # Identifier of the alerting channel.
    pub id: String,
    /// # Name of the alerting channel.
    pub name: String,
    /// # Kind-specific configuration of the alerting channel.
    #[serde(flatten)]
    pub details: ChannelDetails,
}

/// Configuration of an AlertingChannel, tagged on the wire by its `kind`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelDetails {
    /// # Alerts are sent to email addresses.
    Email {
        #[serde(default)]
        emails: Vec<String>,
    },
    /// # Alerts are posted to a Slack incoming webhook.
    #[serde(rename_all = "camelCase")]
    Slack {
        #[serde(default)]
        webhook_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<String>,
    },
    /// # Alerts trigger PagerDuty incidents.
    #[serde(rename_all = "camelCase")]
    PagerDuty {
        #[serde(default)]
        service_integration_key: String,
    },
    /// # Alerts are routed through VictorOps.
    #[serde(rename_all = "camelCase")]
    VictorOps {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        routing_key: String,
    },
    /// # Alerts are posted to generic webhooks.
    #[serde(rename = "WEB_HOOK", rename_all = "camelCase")]
    Webhook {
        #[serde(default)]
        webhook_urls: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertingChannelType {
    Email,
    Slack,
    PagerDuty,
    VictorOps,
    Webhook,
}

impl std::fmt::Display for AlertingChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl AlertingChannelType {
    pub fn name(&self) -> &'static str {
        match self {
            AlertingChannelType::Email => "email",
            AlertingChannelType::Slack => "slack",
            AlertingChannelType::PagerDuty => "pager_duty",
            AlertingChannelType::VictorOps => "victor_ops",
            AlertingChannelType::Webhook => "webhook",
        }
    }
}

impl ChannelDetails {
    pub fn kind(&self) -> AlertingChannelType {
        match self {
            ChannelDetails::Email { .. } => AlertingChannelType::Email,
            ChannelDetails::Slack { .. } => AlertingChannelType::Slack,
            ChannelDetails::PagerDuty { .. } => AlertingChannelType::PagerDuty,
            ChannelDetails::VictorOps { .. } => AlertingChannelType::VictorOps,
            ChannelDetails::Webhook { .. } => AlertingChannelType::Webhook,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let missing = match self {
            ChannelDetails::Email { emails } if emails.is_empty() => {
                Some("emails of email alerting channel")
            }
            ChannelDetails::Slack { webhook_url, .. } if webhook_url.is_empty() => {
                Some("webhook url of slack alerting channel")
            }
            ChannelDetails::PagerDuty {
                service_integration_key,
            } if service_integration_key.is_empty() => {
                Some("service integration key of pager duty alerting channel")
            }
            ChannelDetails::VictorOps { api_key, .. } if api_key.is_empty() => {
                Some("api key of victor ops alerting channel")
            }
            ChannelDetails::VictorOps { routing_key, .. } if routing_key.is_empty() => {
                Some("routing key of victor ops alerting channel")
            }
            ChannelDetails::Webhook { webhook_urls } if webhook_urls.is_empty() => {
                Some("webhook urls of webhook alerting channel")
            }
            _ => None,
        };

        match missing {
            Some(field) => Err(Error::Missing(field)),
            None => Ok(()),
        }
    }
}

impl AlertingChannel {
    pub fn example() -> Self {
        Self {
            id: "alerting-channel-id".to_string(),
            name: "On-call rotation".to_string(),
            details: ChannelDetails::VictorOps {
                api_key: "api-key".to_string(),
                routing_key: "routing-key".to_string(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.id.is_empty() {
            return Err(Error::Missing("ID"));
        }
        if self.name.is_empty() {
            return Err(Error::Missing("name"));
        }
        self.details.validate()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_victor_ops_wire_format() {
        insta::assert_json_snapshot!(AlertingChannel::example(), @r###"
        {
          "id": "alerting-channel-id",
          "name": "On-call rotation",
          "kind": "VICTOR_OPS",
          "apiKey": "api-key",
          "routingKey": "routing-key"
        }
        "###);
    }

    #[test]
    fn test_kinds_decode_from_wire() {
        let fixtures = [
            (
                json!({"id": "1", "name": "n", "kind": "EMAIL", "emails": ["a@b.c"]}),
                AlertingChannelType::Email,
            ),
            (
                json!({"id": "1", "name": "n", "kind": "SLACK", "webhookUrl": "https://hooks", "channel": "#ops"}),
                AlertingChannelType::Slack,
            ),
            (
                json!({"id": "1", "name": "n", "kind": "PAGER_DUTY", "serviceIntegrationKey": "key"}),
                AlertingChannelType::PagerDuty,
            ),
            (
                json!({"id": "1", "name": "n", "kind": "VICTOR_OPS", "apiKey": "a", "routingKey": "r"}),
                AlertingChannelType::VictorOps,
            ),
            (
                json!({"id": "1", "name": "n", "kind": "WEB_HOOK", "webhookUrls": ["https://a"]}),
                AlertingChannelType::Webhook,
            ),
        ];

        for (fixture, kind) in fixtures {
            let channel: AlertingChannel = serde_json::from_value(fixture.clone()).unwrap();
            assert_eq!(channel.details.kind(), kind);
            assert_eq!(channel.validate(), Ok(()));
            assert_eq!(serde_json::to_value(&channel).unwrap(), fixture);
        }

        assert!(serde_json::from_value::<AlertingChannel>(
            json!({"id": "1", "name": "n", "kind": "CARRIER_PIGEON"})
        )
        .is_err());
    }

    #[test]
    fn test_validation() {
        let mut channel = AlertingChannel::example();
        channel.id = String::new();
        assert_eq!(channel.validate(), Err(Error::Missing("ID")));

        let mut channel = AlertingChannel::example();
        channel.name = String::new();
        assert_eq!(channel.validate(), Err(Error::Missing("name")));

        let channel = AlertingChannel {
            details: ChannelDetails::VictorOps {
                api_key: "key".to_string(),
                routing_key: String::new(),
            },
            ..AlertingChannel::example()
        };
        insta::assert_snapshot!(
            channel.validate().unwrap_err(),
            @"routing key of victor ops alerting channel is missing"
        );

        // Missing required wire fields decode as empty, and fail validation.
        let channel: AlertingChannel =
            serde_json::from_value(json!({"id": "1", "name": "n", "kind": "EMAIL"})).unwrap();
        insta::assert_snapshot!(
            channel.validate().unwrap_err(),
            @"emails of email alerting channel is missing"
        );
    }
}
