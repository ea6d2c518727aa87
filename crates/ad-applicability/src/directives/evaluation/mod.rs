mod exemption;
mod model;
mod msn;
mod normalize;

pub use exemption::{check_exemption, ExemptionVerdict};
pub use model::{match_against_list, matches_model};
pub use msn::{check_msn, MsnVerdict};

use crate::directives::domain::{
    AdDocument, AircraftConfiguration, EvaluationKey, EvaluationResult,
};
use tracing::debug;

/// Stateless engine deciding whether an aircraft falls under an AD's
/// applicability rules. Every method is a pure function of its inputs, so one
/// instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicabilityEvaluator;

impl ApplicabilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one aircraft against one AD, producing a single verdict.
    ///
    /// Checks run in order and stop at the first disqualifier: affected-model
    /// match, then MSN constraints, then modification exemptions. Only an
    /// aircraft clearing all three is affected.
    pub fn evaluate(
        &self,
        aircraft: &AircraftConfiguration,
        ad: &AdDocument,
    ) -> EvaluationResult {
        let rules = &ad.applicability_rules;

        let Some(matched_model) =
            match_against_list(&aircraft.aircraft_model, &rules.aircraft_models)
        else {
            return self.verdict(
                aircraft,
                ad,
                false,
                format!(
                    "Aircraft model '{}' not in affected models: {:?}",
                    aircraft.aircraft_model, rules.aircraft_models
                ),
            );
        };

        let msn_verdict = check_msn(aircraft.msn, rules.msn_constraints.as_ref());
        if !msn_verdict.passes {
            return self.verdict(aircraft, ad, false, msn_verdict.reason);
        }

        let exemption_verdict = check_exemption(
            &aircraft.aircraft_model,
            &aircraft.modifications_applied,
            &rules.excluded_if_modifications,
        );
        if exemption_verdict.exempted {
            return self.verdict(aircraft, ad, false, exemption_verdict.reason);
        }

        self.verdict(
            aircraft,
            ad,
            true,
            format!("Aircraft matches affected model '{matched_model}' and meets all AD criteria"),
        )
    }

    /// Evaluate one aircraft against a list of ADs, one verdict per AD in
    /// input order. ADs are independent; no verdict influences another.
    pub fn evaluate_against_all(
        &self,
        aircraft: &AircraftConfiguration,
        ads: &[AdDocument],
    ) -> EvaluationResult {
        let results = ads
            .iter()
            .flat_map(|ad| self.evaluate(aircraft, ad).results)
            .collect();

        EvaluationResult {
            aircraft: aircraft.clone(),
            results,
        }
    }

    fn verdict(
        &self,
        aircraft: &AircraftConfiguration,
        ad: &AdDocument,
        is_affected: bool,
        reason: String,
    ) -> EvaluationResult {
        debug!(
            ad_id = %ad.ad_id,
            model = %aircraft.aircraft_model,
            is_affected,
            %reason,
            "applicability verdict"
        );

        EvaluationResult {
            aircraft: aircraft.clone(),
            results: vec![EvaluationKey {
                ad_id: ad.ad_id.clone(),
                is_affected,
                reason,
            }],
        }
    }
}
