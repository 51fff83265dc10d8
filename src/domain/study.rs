//! Normalized trial records
//!
//! A matched trial is represented as a FHIR-style `ResearchStudy` resource.
//! Only the fields the matching pipeline and its enrichment collaborators
//! touch are modelled here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coding system URL used for clinical trial registry identifiers
pub const CLINICAL_TRIAL_IDENTIFIER_CODING_SYSTEM_URL: &str = "http://clinicaltrials.gov/";

/// Purpose of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    /// Usual identifier
    Usual,
    /// Official identifier, e.g. the registry number
    Official,
    /// Temporary identifier
    Temp,
    /// Secondary identifier
    Secondary,
    /// Identifier that is no longer in use
    Old,
}

/// Identifier attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<IdentifierUse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Identifier {
    /// Creates an official clinical trial registry identifier
    pub fn clinical_trial(value: impl Into<String>) -> Self {
        Self {
            use_: Some(IdentifierUse::Official),
            system: Some(CLINICAL_TRIAL_IDENTIFIER_CODING_SYSTEM_URL.to_string()),
            value: Some(value.into()),
        }
    }

    /// Returns true if this identifier uses the clinical trial registry system
    pub fn is_clinical_trial(&self) -> bool {
        self.system.as_deref() == Some(CLINICAL_TRIAL_IDENTIFIER_CODING_SYSTEM_URL)
    }
}

/// Concept expressed as free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub text: String,
}

impl CodeableConcept {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Lifecycle status of a research study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StudyStatus {
    #[default]
    Active,
    AdministrativelyCompleted,
    Approved,
    ClosedToAccrual,
    ClosedToAccrualAndIntervention,
    Completed,
    Disapproved,
    InReview,
    TemporarilyClosedToAccrual,
    TemporarilyClosedToAccrualAndIntervention,
    Withdrawn,
}

impl StudyStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyStatus::Active => "active",
            StudyStatus::AdministrativelyCompleted => "administratively-completed",
            StudyStatus::Approved => "approved",
            StudyStatus::ClosedToAccrual => "closed-to-accrual",
            StudyStatus::ClosedToAccrualAndIntervention => "closed-to-accrual-and-intervention",
            StudyStatus::Completed => "completed",
            StudyStatus::Disapproved => "disapproved",
            StudyStatus::InReview => "in-review",
            StudyStatus::TemporarilyClosedToAccrual => "temporarily-closed-to-accrual",
            StudyStatus::TemporarilyClosedToAccrualAndIntervention => {
                "temporarily-closed-to-accrual-and-intervention"
            }
            StudyStatus::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for StudyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matched clinical trial
///
/// # Examples
///
/// ```
/// use trialmatch::domain::{Identifier, ResearchStudy, StudyStatus};
///
/// let mut study = ResearchStudy::new(0);
/// study.identifier.push(Identifier::clinical_trial("NCT12345678"));
///
/// assert_eq!(study.id, "0");
/// assert_eq!(study.status, StudyStatus::Active);
/// assert_eq!(study.trial_identifier(), Some("NCT12345678"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudy {
    pub resource_type: String,

    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub status: StudyStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub condition: Vec<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword: Vec<CodeableConcept>,
}

impl ResearchStudy {
    /// Creates an empty study with the given numeric id and status `active`
    pub fn new(id: usize) -> Self {
        Self {
            resource_type: "ResearchStudy".to_string(),
            id: id.to_string(),
            identifier: Vec::new(),
            status: StudyStatus::default(),
            title: None,
            description: None,
            phase: None,
            condition: Vec::new(),
            keyword: Vec::new(),
        }
    }

    /// Returns the first clinical trial registry identifier, if any
    pub fn trial_identifier(&self) -> Option<&str> {
        self.identifier
            .iter()
            .find(|identifier| identifier.is_clinical_trial())
            .and_then(|identifier| identifier.value.as_deref())
    }
}
