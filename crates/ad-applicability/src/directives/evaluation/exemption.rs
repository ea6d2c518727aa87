use super::model::matches_model;
use super::normalize::{extract_identifiers, normalize_mod_name};
use crate::directives::domain::ExemptingModification;

/// Outcome of the exemption check; `reason` names both modification strings
/// when an exemption applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExemptionVerdict {
    pub exempted: bool,
    pub reason: String,
}

impl ExemptionVerdict {
    fn not_exempted(reason: impl Into<String>) -> Self {
        Self {
            exempted: false,
            reason: reason.into(),
        }
    }
}

/// Decide whether the aircraft's embodied modifications exempt it from an AD.
///
/// Exemption needs positive evidence: no applied modifications or no exemption
/// rules means not exempted. Each rule is gated by its model scope first (an
/// empty scope covers every model the AD names), then every applied
/// modification is fuzzily matched against the rule text. The first hit wins.
pub fn check_exemption(
    aircraft_model: &str,
    applied_mods: &[String],
    exemptions: &[ExemptingModification],
) -> ExemptionVerdict {
    if applied_mods.is_empty() {
        return ExemptionVerdict::not_exempted("No modifications applied");
    }

    if exemptions.is_empty() {
        return ExemptionVerdict::not_exempted("No exempting modifications defined");
    }

    for exemption in exemptions {
        if !applies_to_model(exemption, aircraft_model) {
            continue;
        }

        for applied in applied_mods {
            if fuzzy_mod_match(applied, &exemption.modification) {
                return ExemptionVerdict {
                    exempted: true,
                    reason: format!(
                        "Has exempting modification: '{applied}' matches '{}'",
                        exemption.modification
                    ),
                };
            }
        }
    }

    ExemptionVerdict::not_exempted("No applicable exempting modifications found")
}

// Scope gate: an exemption restricted to certain models only fires for
// aircraft matching at least one of them. Same AD can carry sibling-family
// exemptions ("mod 24591" for A320, "mod 24977" for A321) that must not leak
// across families.
fn applies_to_model(exemption: &ExemptingModification, aircraft_model: &str) -> bool {
    if exemption.applicable_models.is_empty() {
        return true;
    }

    exemption
        .applicable_models
        .iter()
        .any(|model| matches_model(aircraft_model, model))
}

// Record keeping and directive text rarely agree on exact modification names
// ("Airbus mod 24591" vs "mod 24591 (production)"), so equality is relaxed to
// normalized containment in either direction, or shared extracted identifiers.
fn fuzzy_mod_match(applied: &str, exempting: &str) -> bool {
    let applied_norm = normalize_mod_name(applied);
    let exempting_norm = normalize_mod_name(exempting);

    if applied_norm == exempting_norm
        || applied_norm.contains(&exempting_norm)
        || exempting_norm.contains(&applied_norm)
    {
        return true;
    }

    let applied_ids = extract_identifiers(&applied_norm);
    let exempting_ids = extract_identifiers(&exempting_norm);
    applied_ids.intersection(&exempting_ids).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(mods: &[&str]) -> Vec<String> {
        mods.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_applied_modifications_is_never_exempt() {
        let rules = vec![ExemptingModification::universal("mod 24591")];
        let verdict = check_exemption("A320-214", &[], &rules);
        assert!(!verdict.exempted);
        assert_eq!(verdict.reason, "No modifications applied");
    }

    #[test]
    fn no_rules_is_never_exempt() {
        let verdict = check_exemption("A320-214", &applied(&["mod 24591"]), &[]);
        assert!(!verdict.exempted);
        assert_eq!(verdict.reason, "No exempting modifications defined");
    }

    #[test]
    fn identifier_overlap_matches_differently_worded_names() {
        let rules = vec![ExemptingModification::scoped(
            "Airbus modification 24591",
            ["A320-214"],
        )];
        let verdict = check_exemption("A320-214", &applied(&["mod 24591 (production)"]), &rules);
        assert!(verdict.exempted);
        assert!(verdict.reason.contains("mod 24591 (production)"));
        assert!(verdict.reason.contains("Airbus modification 24591"));
    }

    #[test]
    fn scope_mismatch_blocks_an_otherwise_matching_modification() {
        let rules = vec![ExemptingModification::scoped(
            "Airbus modification 24591",
            ["A320-214"],
        )];
        let verdict = check_exemption("A321-111", &applied(&["mod 24591 (production)"]), &rules);
        assert!(!verdict.exempted);
        assert_eq!(
            verdict.reason,
            "No applicable exempting modifications found"
        );
    }

    #[test]
    fn empty_scope_applies_to_all_models() {
        let rules = vec![ExemptingModification::universal("SB A320-57-1089")];
        let verdict = check_exemption(
            "A321-112",
            &applied(&["SB A320-57-1089 Rev 04"]),
            &rules,
        );
        assert!(verdict.exempted);
    }

    #[test]
    fn first_matching_rule_wins_in_list_order() {
        let rules = vec![
            ExemptingModification::scoped("mod 24977", ["A321"]),
            ExemptingModification::universal("mod 24977"),
        ];
        let verdict = check_exemption("A321-112", &applied(&["mod 24977 (production)"]), &rules);
        assert!(verdict.exempted);
        assert!(verdict.reason.contains("'mod 24977'"));
    }

    #[test]
    fn unrelated_modifications_do_not_match() {
        let rules = vec![ExemptingModification::universal("Airbus modification 24591")];
        let verdict = check_exemption("A320-214", &applied(&["mod 31337"]), &rules);
        assert!(!verdict.exempted);
    }
}
