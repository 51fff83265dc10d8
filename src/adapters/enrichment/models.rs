//! ClinicalTrials.gov API v2 response models
//!
//! Only the modules used to enrich studies are modelled. Every field is
//! optional because registry records are frequently incomplete.

use crate::domain::StudyStatus;
use serde::Deserialize;

/// `GET /studies/{nctId}` response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtGovStudy {
    pub protocol_section: ProtocolSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolSection {
    pub identification_module: IdentificationModule,
    pub status_module: StatusModule,
    pub description_module: DescriptionModule,
    pub conditions_module: ConditionsModule,
    pub design_module: DesignModule,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentificationModule {
    pub nct_id: Option<String>,
    pub brief_title: Option<String>,
    pub official_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusModule {
    pub overall_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptionModule {
    pub brief_summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionsModule {
    pub conditions: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignModule {
    pub phases: Vec<String>,
}

/// Maps a registry `overallStatus` to a study status
///
/// Returns `None` for statuses with no counterpart (e.g. `UNKNOWN`), in
/// which case the existing status is kept.
pub fn map_overall_status(overall_status: &str) -> Option<StudyStatus> {
    match overall_status {
        "RECRUITING" | "ENROLLING_BY_INVITATION" => Some(StudyStatus::Active),
        "NOT_YET_RECRUITING" => Some(StudyStatus::Approved),
        "ACTIVE_NOT_RECRUITING" => Some(StudyStatus::ClosedToAccrual),
        "SUSPENDED" => Some(StudyStatus::TemporarilyClosedToAccrual),
        "TERMINATED" => Some(StudyStatus::AdministrativelyCompleted),
        "COMPLETED" => Some(StudyStatus::Completed),
        "WITHDRAWN" => Some(StudyStatus::Withdrawn),
        _ => None,
    }
}

/// Converts registry phases (`["PHASE1", "PHASE2"]`) to a phase code (`phase-1-phase-2`)
pub fn map_phases(phases: &[String]) -> Option<String> {
    let codes: Vec<String> = phases
        .iter()
        .filter_map(|phase| match phase.as_str() {
            "NA" => Some("n-a".to_string()),
            "EARLY_PHASE1" => Some("early-phase-1".to_string()),
            other => other
                .strip_prefix("PHASE")
                .filter(|number| !number.is_empty())
                .map(|number| format!("phase-{number}")),
        })
        .collect();

    if codes.is_empty() {
        None
    } else {
        Some(codes.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_partial_study() {
        let study: CtGovStudy = serde_json::from_value(json!({
            "protocolSection": {
                "identificationModule": {
                    "nctId": "NCT12345678",
                    "briefTitle": "A Study"
                },
                "statusModule": { "overallStatus": "RECRUITING" }
            },
            "hasResults": false
        }))
        .unwrap();

        let protocol = study.protocol_section;
        assert_eq!(
            protocol.identification_module.nct_id.as_deref(),
            Some("NCT12345678")
        );
        assert_eq!(protocol.description_module.brief_summary, None);
        assert!(protocol.design_module.phases.is_empty());
    }

    #[test]
    fn test_map_overall_status() {
        assert_eq!(map_overall_status("RECRUITING"), Some(StudyStatus::Active));
        assert_eq!(map_overall_status("COMPLETED"), Some(StudyStatus::Completed));
        assert_eq!(
            map_overall_status("ACTIVE_NOT_RECRUITING"),
            Some(StudyStatus::ClosedToAccrual)
        );
        assert_eq!(map_overall_status("UNKNOWN"), None);
    }

    #[test]
    fn test_map_phases() {
        assert_eq!(
            map_phases(&["PHASE1".to_string(), "PHASE2".to_string()]),
            Some("phase-1-phase-2".to_string())
        );
        assert_eq!(map_phases(&["PHASE3".to_string()]), Some("phase-3".to_string()));
        assert_eq!(map_phases(&["NA".to_string()]), Some("n-a".to_string()));
        assert_eq!(
            map_phases(&["EARLY_PHASE1".to_string()]),
            Some("early-phase-1".to_string())
        );
        assert_eq!(map_phases(&[]), None);
        assert_eq!(map_phases(&["PHASE".to_string()]), None);
    }
}
