use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::v1beta1::{CatalogCondition, CONDITION_READY};

#[derive(CustomResource, Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[kube(
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    kind = "ServiceBroker",
    status = "ServiceBrokerStatus",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBrokerSpec {
    /// Address the broker's OSB API is reachable at.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relist_behavior: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBrokerStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<CatalogCondition>,
}

impl ServiceBroker {
    /// The `Ready` condition, when the broker has reported one.
    pub fn ready_condition(&self) -> Option<&CatalogCondition> {
        self.status
            .as_ref()?
            .conditions
            .iter()
            .find(|c| c.type_ == CONDITION_READY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1beta1::CONDITION_TRUE;

    fn make_broker(conditions: Vec<CatalogCondition>) -> ServiceBroker {
        let mut broker = ServiceBroker::new(
            "broker-a",
            ServiceBrokerSpec {
                url: "https://broker.example.com".into(),
                relist_behavior: None,
            },
        );
        broker.status = Some(ServiceBrokerStatus { conditions });
        broker
    }

    #[test]
    fn test_ready_condition_found() {
        let broker = make_broker(vec![CatalogCondition {
            type_: CONDITION_READY.into(),
            status: CONDITION_TRUE.into(),
            reason: Some("FetchedCatalog".into()),
            message: None,
        }]);
        let cond = broker.ready_condition().unwrap();
        assert!(cond.is(CONDITION_READY));
    }

    #[test]
    fn test_ready_condition_absent_without_status() {
        let mut broker = make_broker(vec![]);
        broker.status = None;
        assert!(broker.ready_condition().is_none());
    }
}
