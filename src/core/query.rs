//! Query construction from patient bundles
//!
//! Filter values are read from FHIR `Parameters` resources in the bundle:
//!
//! | parameter name      | query field | wire key   |
//! |---------------------|-------------|------------|
//! | `zipCode`           | zip code    | `zip`      |
//! | `travelRadius`      | distance    | `distance` |
//! | `phase`             | phase       | `phase`    |
//! | `recruitmentStatus` | status      | `status`   |
//!
//! Missing values serialize as `null`; `conditions` is always an empty list.

use crate::domain::{PatientBundle, Result};
use serde::Serialize;
use serde_json::Value;

/// Query sent to the matching service
///
/// # Examples
///
/// ```
/// use trialmatch::core::query::TrialQuery;
/// use trialmatch::domain::PatientBundle;
/// use serde_json::json;
///
/// let bundle = PatientBundle::from_resources(vec![json!({
///     "resourceType": "Parameters",
///     "parameter": [
///         { "name": "zipCode", "valueString": "01886" },
///         { "name": "travelRadius", "valueString": "25" }
///     ]
/// })]);
///
/// let query = TrialQuery::from_bundle(&bundle);
/// assert_eq!(
///     query.to_json().unwrap(),
///     r#"{"zip":"01886","distance":25.0,"phase":null,"status":null,"conditions":[]}"#
/// );
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TrialQuery<'a> {
    #[serde(rename = "zip")]
    pub zip_code: Option<String>,

    #[serde(rename = "distance")]
    pub travel_radius: Option<f64>,

    pub phase: Option<String>,

    #[serde(rename = "status")]
    pub recruitment_status: Option<String>,

    pub conditions: Vec<String>,

    #[serde(skip)]
    bundle: &'a PatientBundle,
}

impl<'a> TrialQuery<'a> {
    /// Extracts query filters from `bundle`
    ///
    /// Never fails: unknown parameters, non-`Parameters` resources, and
    /// values of the wrong type are ignored. When a parameter appears more
    /// than once, the last occurrence wins.
    pub fn from_bundle(bundle: &'a PatientBundle) -> Self {
        let mut query = Self {
            zip_code: None,
            travel_radius: None,
            phase: None,
            recruitment_status: None,
            conditions: Vec::new(),
            bundle,
        };

        let parameters = bundle
            .resources_of_type("Parameters")
            .filter_map(|resource| resource.get("parameter").and_then(Value::as_array))
            .flatten();

        for parameter in parameters {
            let Some(name) = parameter.get("name").and_then(Value::as_str) else {
                continue;
            };

            match name {
                "zipCode" => query.zip_code = string_value(parameter),
                "travelRadius" => query.travel_radius = radius_value(parameter),
                "phase" => query.phase = string_value(parameter),
                "recruitmentStatus" => query.recruitment_status = string_value(parameter),
                other => {
                    tracing::trace!(parameter = other, "Ignoring unknown query parameter");
                }
            }
        }

        query
    }

    /// The bundle this query was built from
    pub fn bundle(&self) -> &'a PatientBundle {
        self.bundle
    }

    /// Serializes the query to compact JSON
    ///
    /// Keys are always `zip`, `distance`, `phase`, `status`, `conditions`,
    /// in that order.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds the query for `bundle`
pub fn build_query(bundle: &PatientBundle) -> TrialQuery<'_> {
    TrialQuery::from_bundle(bundle)
}

fn string_value(parameter: &Value) -> Option<String> {
    parameter
        .get("valueString")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn radius_value(parameter: &Value) -> Option<f64> {
    let radius = if let Some(text) = parameter.get("valueString").and_then(Value::as_str) {
        match text.trim().parse::<f64>() {
            Ok(radius) => Some(radius),
            Err(e) => {
                tracing::warn!(value = %text, error = %e, "Ignoring unparsable travel radius");
                None
            }
        }
    } else {
        parameter
            .get("valueDecimal")
            .or_else(|| parameter.get("valueInteger"))
            .and_then(Value::as_f64)
    };

    radius.filter(|radius| radius.is_finite())
}
