use provider::{
    alerting_channel_fields as ac, custom_event_specification_fields as ces, Provider,
    ResourceData, ResourceNameFormatter, DEFAULT_NAME_SUFFIX,
};
use restapi::{Client, InstanaApi};
use serde_json::json;
use test_support::{TestServer, API_TOKEN};

const THRESHOLD_RULE: &str = "instana_custom_event_spec_threshold_rule";
const SPEC_PATH: &str = "/api/events/settings/event-specifications/custom";
const CHANNEL_PATH: &str = "/api/events/settings/alertingChannels";

fn provider(server: &TestServer) -> Provider {
    let api = InstanaApi::new(Client::with_base_url(server.base_url(), API_TOKEN).unwrap());
    Provider::with_api(api, ResourceNameFormatter::new("", DEFAULT_NAME_SUFFIX))
}

fn threshold_rule_definition() -> ResourceData {
    ResourceData::default()
        .with(ces::FIELD_NAME, "High CPU usage")
        .with(ces::FIELD_ENTITY_TYPE, "host")
        .with(ces::FIELD_RULE_SEVERITY, "critical")
        .with(ces::FIELD_RULE_METRIC_NAME, "cpu.user")
        .with(ces::FIELD_RULE_WINDOW, 60000)
        .with(ces::FIELD_RULE_AGGREGATION, "avg")
        .with(ces::FIELD_RULE_CONDITION_OPERATOR, ">")
        .with(ces::FIELD_RULE_CONDITION_VALUE, 90.0)
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_custom_event_specification_life_cycle() {
    let server = TestServer::start().await;
    let provider = provider(&server);
    let resource = provider.resource(THRESHOLD_RULE).unwrap();

    let created = resource.create(threshold_rule_definition()).await.unwrap();
    let id = created.id().to_string();
    assert_eq!(id.len(), 36, "{id}");

    let mut expect = threshold_rule_definition()
        .with(ces::FIELD_FULL_NAME, "High CPU usage (TF managed)")
        .with(ces::FIELD_TRIGGERING, false)
        .with(ces::FIELD_ENABLED, true);
    expect.set_id(id.as_str());
    assert_eq!(created, expect);

    let path = format!("{SPEC_PATH}/{id}");
    assert_eq!(
        server.object(&path).unwrap(),
        json!({
            "id": id,
            "name": "High CPU usage (TF managed)",
            "entityType": "host",
            "triggering": false,
            "enabled": true,
            "rules": [{
                "ruleType": "threshold",
                "severity": 10,
                "metricName": "cpu.user",
                "window": 60000,
                "aggregation": "avg",
                "conditionOperator": ">",
                "conditionValue": 90.0,
            }],
        })
    );

    let read = resource.read(created.clone()).await.unwrap();
    assert_eq!(read, created);

    let changed = created
        .clone()
        .with(ces::FIELD_RULE_CONDITION_VALUE, 95.5)
        .with(ces::FIELD_DESCRIPTION, "CPU usage is high");
    let updated = resource.update(changed.clone()).await.unwrap();
    assert_eq!(updated, changed);
    assert_eq!(
        server.object(&path).unwrap()["rules"][0]["conditionValue"],
        json!(95.5)
    );

    resource.delete(updated.clone()).await.unwrap();
    assert!(server.object(&path).is_none());

    // Reading a resource which no longer exists clears its ID.
    let gone = resource.read(updated).await.unwrap();
    assert_eq!(gone.id(), "");

    assert_eq!(
        server.requests(),
        vec![
            format!("PUT {path}"),
            format!("GET {path}"),
            format!("PUT {path}"),
            format!("DELETE {path}"),
            format!("GET {path}"),
        ]
    );
}

#[tokio::test]
async fn test_invalid_definitions_are_never_sent() {
    let server = TestServer::start().await;
    let provider = provider(&server);
    let resource = provider.resource(THRESHOLD_RULE).unwrap();

    let cases = [
        (
            threshold_rule_definition().with(ces::FIELD_RULE_SEVERITY, "fatal"),
            r#"failed to create instana_custom_event_spec_threshold_rule: field rule_severity value "fatal" is not one of ["critical", "warning"]"#,
        ),
        (
            threshold_rule_definition().with(ces::FIELD_RULE_WINDOW, "60s"),
            "failed to create instana_custom_event_spec_threshold_rule: field rule_window must be of type integer",
        ),
        (
            threshold_rule_definition().with(ces::FIELD_RULE_CONDITION_VALUE, 90),
            "failed to create instana_custom_event_spec_threshold_rule: field rule_condition_value must be of type float",
        ),
        (
            threshold_rule_definition().with(ces::FIELD_NAME, ""),
            "failed to create instana_custom_event_spec_threshold_rule: field name must not be empty",
        ),
        (
            threshold_rule_definition().with(ces::FIELD_RULE_SYSTEM_RULE_ID, "id"),
            "failed to create instana_custom_event_spec_threshold_rule: field rule_system_rule_id is not defined by the schema",
        ),
        (
            {
                let mut data = threshold_rule_definition();
                data.set_opt::<String>(ces::FIELD_RULE_AGGREGATION, None);
                data
            },
            "failed to create instana_custom_event_spec_threshold_rule: aggregation type of threshold rule is missing or not valid",
        ),
        (
            {
                let mut data = threshold_rule_definition();
                data.set_opt::<i64>(ces::FIELD_RULE_WINDOW, None);
                data
            },
            "failed to create instana_custom_event_spec_threshold_rule: either rollup or window and condition must be defined",
        ),
    ];

    for (data, expect) in cases {
        let err = resource.create(data).await.unwrap_err();
        assert_eq!(format!("{err:#}"), expect);
    }
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_read_of_mismatched_rule_type() {
    let server = TestServer::start().await;
    let provider = provider(&server);

    server.insert(
        &format!("{SPEC_PATH}/spec-1"),
        json!({
            "id": "spec-1",
            "name": "Offline hosts (TF managed)",
            "entityType": "host",
            "enabled": true,
            "rules": [{
                "ruleType": "entity_verification",
                "severity": 5,
                "matchingEntityType": "host",
                "matchingOperator": "endsWith",
                "matchingEntityLabel": "-prod",
                "offlineDuration": 60000,
            }],
        }),
    );

    let read = provider
        .resource("instana_custom_event_spec_entity_verification_rule")
        .unwrap()
        .read(ResourceData::new("spec-1"))
        .await
        .unwrap();

    assert_eq!(
        read,
        ResourceData::new("spec-1")
            .with(ces::FIELD_NAME, "Offline hosts")
            .with(ces::FIELD_FULL_NAME, "Offline hosts (TF managed)")
            .with(ces::FIELD_ENTITY_TYPE, "host")
            .with(ces::FIELD_TRIGGERING, false)
            .with(ces::FIELD_ENABLED, true)
            .with(ces::FIELD_RULE_SEVERITY, "warning")
            .with(ces::FIELD_RULE_MATCHING_ENTITY_TYPE, "host")
            .with(ces::FIELD_RULE_MATCHING_OPERATOR, "ends_with")
            .with(ces::FIELD_RULE_MATCHING_ENTITY_LABEL, "-prod")
            .with(ces::FIELD_RULE_OFFLINE_DURATION, 60000)
    );

    let err = provider
        .resource("instana_custom_event_spec_system_rule")
        .unwrap()
        .read(ResourceData::new("spec-1"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "custom event specification spec-1 has a entity_verification rule, but instana_custom_event_spec_system_rule expects a system rule"
    );

    let err = provider
        .resource(THRESHOLD_RULE)
        .unwrap()
        .read(ResourceData::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "ID of instana_custom_event_spec_threshold_rule is missing"
    );
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_alerting_channel_life_cycle() {
    let server = TestServer::start().await;
    let provider = provider(&server);
    let resource = provider.resource("instana_alerting_channel_slack").unwrap();

    let definition = ResourceData::default()
        .with(ac::FIELD_NAME, "Ops")
        .with(ac::FIELD_WEBHOOK_URL, "https://hooks.slack.com/services/x")
        .with(ac::FIELD_CHANNEL, "#ops");

    let created = resource.create(definition.clone()).await.unwrap();
    let id = created.id().to_string();

    let mut expect = definition.with(ac::FIELD_FULL_NAME, "Ops (TF managed)");
    expect.set_id(id.as_str());
    assert_eq!(created, expect);

    let path = format!("{CHANNEL_PATH}/{id}");
    assert_eq!(
        server.object(&path).unwrap(),
        json!({
            "id": id,
            "name": "Ops (TF managed)",
            "kind": "SLACK",
            "webhookUrl": "https://hooks.slack.com/services/x",
            "channel": "#ops",
        })
    );

    assert_eq!(resource.read(created.clone()).await.unwrap(), created);

    resource.delete(created.clone()).await.unwrap();
    assert_eq!(resource.read(created).await.unwrap().id(), "");

    // Deleting a channel which is already gone fails.
    let err = resource.delete(expect).await.unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        format!("failed to delete instana_alerting_channel_slack {id}: entity not found")
    );
}

#[tokio::test]
async fn test_email_channel_requires_addresses() {
    let server = TestServer::start().await;
    let provider = provider(&server);
    let resource = provider.resource("instana_alerting_channel_email").unwrap();

    let err = resource
        .create(
            ResourceData::default()
                .with(ac::FIELD_NAME, "Team")
                .with(ac::FIELD_EMAILS, Vec::<String>::new()),
        )
        .await
        .unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        "failed to create instana_alerting_channel_email: emails of email alerting channel is missing"
    );
    assert!(server.requests().is_empty());
}
