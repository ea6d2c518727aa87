use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Serial-number filter attached to an AD: "only airframes in this range,
/// minus the excluded ones, or exactly the listed ones".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsnConstraint {
    /// Minimum MSN (inclusive); absent means unbounded below.
    #[serde(default)]
    pub min_msn: Option<u32>,
    /// Maximum MSN (inclusive); absent means unbounded above.
    #[serde(default)]
    pub max_msn: Option<u32>,
    /// MSNs excluded even when inside the range.
    #[serde(default)]
    pub exclude_msns: Option<Vec<u32>>,
    /// Exhaustive allow-list; when non-empty the range and exclusions are ignored.
    #[serde(default)]
    pub include_msns: Option<Vec<u32>>,
}

/// A modification or service bulletin that, if already embodied, exempts an
/// aircraft from the AD. Scope is limited to `applicable_models`; an empty
/// scope covers every model the AD names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExemptingModificationRepr")]
pub struct ExemptingModification {
    pub modification: String,
    pub applicable_models: Vec<String>,
}

impl ExemptingModification {
    pub fn universal(modification: impl Into<String>) -> Self {
        Self {
            modification: modification.into(),
            applicable_models: Vec::new(),
        }
    }

    pub fn scoped<I, S>(modification: impl Into<String>, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modification: modification.into(),
            applicable_models: models.into_iter().map(Into::into).collect(),
        }
    }
}

// Older extractions emit exemptions as bare strings with no model scope; those
// deserialize as universally scoped rules.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExemptingModificationRepr {
    Scoped {
        modification: String,
        #[serde(default)]
        applicable_models: Vec<String>,
    },
    Plain(String),
}

impl From<ExemptingModificationRepr> for ExemptingModification {
    fn from(value: ExemptingModificationRepr) -> Self {
        match value {
            ExemptingModificationRepr::Scoped {
                modification,
                applicable_models,
            } => Self {
                modification,
                applicable_models,
            },
            ExemptingModificationRepr::Plain(modification) => Self {
                modification,
                applicable_models: Vec::new(),
            },
        }
    }
}

/// The "who this applies to" section of an AD, in structured form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicabilityRules {
    /// Affected model identifiers, matched by variant-prefix semantics.
    #[serde(default)]
    pub aircraft_models: Vec<String>,
    #[serde(default)]
    pub msn_constraints: Option<MsnConstraint>,
    /// Modifications whose prior embodiment exempts an aircraft.
    #[serde(default)]
    pub excluded_if_modifications: Vec<ExemptingModification>,
    /// Fixes mandated for affected aircraft; informational, never evaluated.
    #[serde(default)]
    pub required_modifications: Vec<String>,
    /// Free-text conditions the extractor could not structure.
    #[serde(default)]
    pub additional_conditions: Option<String>,
}

/// A parsed Airworthiness Directive as produced by the extraction pipeline.
/// Read-only input to the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdDocument {
    /// Authority-prefixed identifier, e.g. "FAA-2025-23-53".
    pub ad_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    pub applicability_rules: ApplicabilityRules,
    /// Original applicability text kept for provenance.
    #[serde(default)]
    pub raw_applicability_text: Option<String>,
}

/// One concrete airframe to evaluate against a directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftConfiguration {
    pub aircraft_model: String,
    /// Manufacturer Serial Number; absence means "assume affected".
    #[serde(default)]
    pub msn: Option<u32>,
    /// Modifications and service bulletins already embodied.
    #[serde(default)]
    pub modifications_applied: Vec<String>,
}

impl AircraftConfiguration {
    pub fn new(aircraft_model: impl Into<String>, msn: Option<u32>) -> Self {
        Self {
            aircraft_model: aircraft_model.into(),
            msn,
            modifications_applied: Vec::new(),
        }
    }

    pub fn with_modifications<I, S>(mut self, modifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifications_applied = modifications.into_iter().map(Into::into).collect();
        self
    }
}

/// Verdict for one (aircraft, AD) pair. The reason always names the rule or
/// value that decided the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationKey {
    pub ad_id: String,
    pub is_affected: bool,
    pub reason: String,
}

/// All verdicts for one aircraft, ordered as the ADs were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub aircraft: AircraftConfiguration,
    pub results: Vec<EvaluationKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_exemption_deserializes_from_object() {
        let value: ExemptingModification = serde_json::from_str(
            r#"{"modification": "Airbus modification 24591", "applicable_models": ["A320-214"]}"#,
        )
        .expect("object form parses");
        assert_eq!(value.modification, "Airbus modification 24591");
        assert_eq!(value.applicable_models, vec!["A320-214".to_string()]);
    }

    #[test]
    fn plain_string_exemption_becomes_universal_scope() {
        let value: ExemptingModification =
            serde_json::from_str(r#""SB A320-57-1089""#).expect("string form parses");
        assert_eq!(value.modification, "SB A320-57-1089");
        assert!(value.applicable_models.is_empty());
    }

    #[test]
    fn ad_document_round_trips_with_optional_fields_absent() {
        let raw = r#"{
            "ad_id": "FAA-2025-23-53",
            "applicability_rules": {
                "aircraft_models": ["MD-11", "MD-11F"]
            }
        }"#;
        let doc: AdDocument = serde_json::from_str(raw).expect("minimal document parses");
        assert_eq!(doc.ad_id, "FAA-2025-23-53");
        assert!(doc.title.is_none());
        assert!(doc.applicability_rules.msn_constraints.is_none());
        assert!(doc.applicability_rules.excluded_if_modifications.is_empty());
    }

    #[test]
    fn effective_date_parses_as_iso_date() {
        let raw = r#"{
            "ad_id": "EASA-2025-0254R1",
            "effective_date": "2025-11-03",
            "applicability_rules": { "aircraft_models": ["A320"] }
        }"#;
        let doc: AdDocument = serde_json::from_str(raw).expect("dated document parses");
        assert_eq!(
            doc.effective_date,
            NaiveDate::from_ymd_opt(2025, 11, 3)
        );
    }
}
