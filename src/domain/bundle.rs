//! Patient bundle input
//!
//! The bundle is a FHIR `Bundle` carrying whatever resources the caller has
//! about the patient. Resources are kept as raw JSON: the pipeline only looks
//! at a few of them and must not reject a bundle because of the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a patient bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,
}

/// Structured patient data used to derive query filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientBundle {
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub bundle_type: Option<String>,

    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

impl PatientBundle {
    /// Creates a collection bundle from raw resources
    pub fn from_resources(resources: impl IntoIterator<Item = Value>) -> Self {
        Self {
            resource_type: default_resource_type(),
            bundle_type: Some("collection".to_string()),
            entry: resources
                .into_iter()
                .map(|resource| BundleEntry {
                    full_url: None,
                    resource: Some(resource),
                })
                .collect(),
        }
    }

    /// Iterates resources whose `resourceType` equals `resource_type`
    ///
    /// Entries without a resource are skipped.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.entry
            .iter()
            .filter_map(|entry| entry.resource.as_ref())
            .filter(move |resource| {
                resource.get("resourceType").and_then(Value::as_str) == Some(resource_type)
            })
    }
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}
