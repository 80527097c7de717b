use super::{Error, RuleSpecification};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A CustomEventSpecification raises Instana events for entities of a
/// given type, as determined by its single rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(example = CustomEventSpecification::example())]
pub struct CustomEventSpecification {
    /// # Identifier of the specification.
    pub id: String,
    /// # Name of the specification.
    pub name: String,
    /// # Type of entities to which the specification applies.
    pub entity_type: String,
    /// # Dynamic focus query restricting the matched entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// # Whether an incident is triggered for raised events.
    #[serde(default)]
    pub triggering: bool,
    /// # Description of raised events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Time after which a raised event expires, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,
    /// # Whether the specification is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// # Rules of the specification.
    /// Exactly one rule must be present.
    pub rules: Vec<RuleSpecification>,
}

impl CustomEventSpecification {
    pub fn example() -> Self {
        Self {
            id: "custom-event-specification-id".to_string(),
            name: "High CPU usage".to_string(),
            entity_type: "host".to_string(),
            query: None,
            triggering: false,
            description: Some("CPU usage is above 90%".to_string()),
            expiration_time: Some(60000),
            enabled: true,
            rules: vec![RuleSpecification::example()],
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
        if self.entity_type.is_empty() {
            return Err(Error::Missing("entity type"));
        }
        match self.rules.as_slice() {
            [rule] => rule.validate(),
            rules => Err(Error::RuleCount(rules.len())),
        }
    }

    /// The single rule of the specification, if it's well-formed.
    pub fn rule(&self) -> Option<&RuleSpecification> {
        match self.rules.as_slice() {
            [rule] => Some(rule),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{AggregationType, ConditionOperatorType, ThresholdRule};
    use serde_json::json;

    fn spec() -> CustomEventSpecification {
        CustomEventSpecification {
            id: "id1".to_string(),
            name: "n".to_string(),
            entity_type: "e".to_string(),
            query: None,
            triggering: false,
            description: None,
            expiration_time: None,
            enabled: false,
            rules: vec![RuleSpecification::Threshold(ThresholdRule {
                metric_name: "cpu".to_string(),
                rollup: None,
                window: Some(60000),
                aggregation: Some(AggregationType::Avg),
                condition_operator: ConditionOperatorType::GreaterThan,
                condition_value: Some(90.0),
                severity: 10,
            })],
        }
    }

    #[test]
    fn test_valid_threshold_scenario() {
        assert_eq!(spec().validate(), Ok(()));
        assert_eq!(CustomEventSpecification::example().validate(), Ok(()));
    }

    #[test]
    fn test_threshold_scenario_without_aggregation() {
        let mut spec = spec();
        let RuleSpecification::Threshold(rule) = &mut spec.rules[0] else {
            unreachable!()
        };
        rule.aggregation = None;

        insta::assert_snapshot!(
            spec.validate().unwrap_err(),
            @"aggregation type of threshold rule is missing or not valid"
        );
    }

    #[test]
    fn test_required_fields_in_order() {
        let blank = CustomEventSpecification {
            id: String::new(),
            name: String::new(),
            entity_type: String::new(),
            rules: Vec::new(),
            ..spec()
        };
        assert_eq!(blank.validate().unwrap_err().to_string(), "ID is missing");

        let no_name = CustomEventSpecification {
            name: String::new(),
            entity_type: String::new(),
            ..spec()
        };
        assert_eq!(no_name.validate().unwrap_err().to_string(), "name is missing");

        let no_entity_type = CustomEventSpecification {
            entity_type: String::new(),
            ..spec()
        };
        assert_eq!(
            no_entity_type.validate().unwrap_err().to_string(),
            "entity type is missing"
        );
    }

    #[test]
    fn test_exactly_one_rule() {
        let valid_rule = spec().rules.remove(0);
        let invalid_rule = RuleSpecification::system("", 5);

        for rules in [
            vec![],
            vec![valid_rule.clone(), valid_rule.clone()],
            vec![invalid_rule.clone(), invalid_rule.clone(), invalid_rule.clone()],
        ] {
            let count = rules.len();
            let spec = CustomEventSpecification { rules, ..spec() };
            assert_eq!(spec.validate(), Err(Error::RuleCount(count)));
            assert_eq!(spec.rule(), None);
        }

        // A single invalid rule reports its own error.
        let spec = CustomEventSpecification {
            rules: vec![invalid_rule],
            ..spec()
        };
        assert_eq!(
            spec.validate().unwrap_err().to_string(),
            "id of system rule is missing"
        );
    }

    #[test]
    fn test_wire_format() {
        insta::assert_json_snapshot!(spec(), @r###"
        {
          "id": "id1",
          "name": "n",
          "entityType": "e",
          "triggering": false,
          "enabled": false,
          "rules": [
            {
              "ruleType": "threshold",
              "severity": 10,
              "metricName": "cpu",
              "window": 60000,
              "aggregation": "avg",
              "conditionOperator": ">",
              "conditionValue": 90.0
            }
          ]
        }
        "###);

        let decoded: CustomEventSpecification = serde_json::from_value(json!({
            "id": "id1",
            "name": "n",
            "entityType": "e",
            "query": null,
            "triggering": false,
            "enabled": false,
            "rules": [{
                "ruleType": "threshold",
                "severity": 10,
                "metricName": "cpu",
                "window": 60000,
                "aggregation": "avg",
                "conditionOperator": ">",
                "conditionValue": 90.0,
            }],
        }))
        .unwrap();
        assert_eq!(decoded, spec());
    }

    #[test]
    fn test_json_schema() {
        let schema = serde_json::to_value(schemars::schema_for!(CustomEventSpecification)).unwrap();
        let mut required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        required.sort();

        assert_eq!(required, vec!["entityType", "id", "name", "rules"]);
        assert!(schema["properties"]["rules"].is_object());
    }
}
