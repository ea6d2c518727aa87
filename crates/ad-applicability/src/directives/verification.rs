use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AircraftConfiguration, EvaluationResult};

/// One evaluated verdict compared against its expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationKey {
    pub ad_id: String,
    pub is_affected: bool,
    pub expected: bool,
    pub pass_check: bool,
}

/// Report card for one aircraft: every AD with a known expected verdict,
/// checked against what the evaluator actually produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub aircraft: AircraftConfiguration,
    pub results: Vec<ValidationKey>,
}

impl VerificationResult {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|key| key.pass_check)
    }
}

/// Compare an evaluation against expected verdicts keyed by AD id. ADs the
/// expectation map does not mention are left out of the report.
pub fn verify_result(
    evaluation: &EvaluationResult,
    expected: &BTreeMap<String, bool>,
) -> VerificationResult {
    let results = evaluation
        .results
        .iter()
        .filter_map(|key| {
            expected.get(&key.ad_id).map(|expected| ValidationKey {
                ad_id: key.ad_id.clone(),
                is_affected: key.is_affected,
                expected: *expected,
                pass_check: key.is_affected == *expected,
            })
        })
        .collect();

    VerificationResult {
        aircraft: evaluation.aircraft.clone(),
        results,
    }
}

pub fn all_passed(reports: &[VerificationResult]) -> bool {
    reports.iter().all(VerificationResult::passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directives::domain::EvaluationKey;

    fn evaluation() -> EvaluationResult {
        EvaluationResult {
            aircraft: AircraftConfiguration::new("MD-11F", Some(48400)),
            results: vec![
                EvaluationKey {
                    ad_id: "FAA-2025-23-53".to_string(),
                    is_affected: true,
                    reason: "matched".to_string(),
                },
                EvaluationKey {
                    ad_id: "EASA-2025-0254R1".to_string(),
                    is_affected: false,
                    reason: "model mismatch".to_string(),
                },
            ],
        }
    }

    fn expectations(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
        entries
            .iter()
            .map(|(ad_id, expected)| (ad_id.to_string(), *expected))
            .collect()
    }

    #[test]
    fn matching_verdicts_pass() {
        let report = verify_result(
            &evaluation(),
            &expectations(&[("FAA-2025-23-53", true), ("EASA-2025-0254R1", false)]),
        );
        assert_eq!(report.results.len(), 2);
        assert!(report.passed());
        assert!(all_passed(&[report]));
    }

    #[test]
    fn mismatched_verdict_fails_the_report() {
        let report = verify_result(&evaluation(), &expectations(&[("FAA-2025-23-53", false)]));
        assert_eq!(report.results.len(), 1);
        assert!(!report.results[0].pass_check);
        assert!(!report.passed());
    }

    #[test]
    fn unknown_ads_are_skipped() {
        let report = verify_result(&evaluation(), &expectations(&[("CAA-1999-01-01", true)]));
        assert!(report.results.is_empty());
        assert!(report.passed());
    }
}
