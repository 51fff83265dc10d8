//! Trial identifier to study mapping

use crate::domain::{Identifier, ResearchStudy};

/// Builds the normalized record for one matched trial
///
/// The study gets status `active` and a single official identifier in the
/// clinical trial registry coding system.
///
/// # Examples
///
/// ```
/// use trialmatch::core::mapper::map_identifier_to_study;
///
/// let study = map_identifier_to_study("NCT12345678", 0);
/// assert_eq!(study.id, "0");
/// assert_eq!(study.trial_identifier(), Some("NCT12345678"));
/// ```
pub fn map_identifier_to_study(identifier: &str, sequential_id: usize) -> ResearchStudy {
    let mut study = ResearchStudy::new(sequential_id);
    study.identifier = vec![Identifier::clinical_trial(identifier)];
    study
}
