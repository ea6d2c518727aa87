/// Whether an aircraft model satisfies one affected-model entry.
///
/// Applicability sections routinely name a base model ("A320") that has to
/// cover every dash-suffixed variant ("A320-214"), and fleet records may name
/// a variant more specific than the rule entry, so after uppercasing and
/// dropping spaces and hyphens either string may be a prefix of the other.
pub fn matches_model(aircraft_model: &str, affected_model: &str) -> bool {
    let aircraft = canonical(aircraft_model);
    let affected = canonical(affected_model);
    aircraft.starts_with(&affected) || affected.starts_with(&aircraft)
}

/// First entry of `affected_models` the aircraft matches, scanning in list
/// order. An empty list never matches: an AD that names no models affects
/// nothing.
pub fn match_against_list<'a>(aircraft_model: &str, affected_models: &'a [String]) -> Option<&'a str> {
    affected_models
        .iter()
        .find(|affected| matches_model(aircraft_model, affected))
        .map(String::as_str)
}

fn canonical(model: &str) -> String {
    model
        .chars()
        .filter(|ch| *ch != ' ' && *ch != '-')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_model_covers_dash_suffixed_variant() {
        assert!(matches_model("A320-214", "A320"));
    }

    #[test]
    fn prefix_rule_is_symmetric() {
        assert_eq!(
            matches_model("A320", "A320-214"),
            matches_model("A320-214", "A320")
        );
        assert!(matches_model("A320", "A320-214"));
    }

    #[test]
    fn case_and_separators_are_ignored() {
        assert!(matches_model("md 11f", "MD-11F"));
        assert!(matches_model("MD-11", "md11f"));
    }

    #[test]
    fn sibling_variants_do_not_match() {
        assert!(!matches_model("A320-214", "A320-211"));
        assert!(!matches_model("A321-111", "A320-214"));
    }

    #[test]
    fn list_scan_returns_first_hit_in_order() {
        let affected = vec!["MD-11".to_string(), "MD-11F".to_string()];
        assert_eq!(match_against_list("MD-11F", &affected), Some("MD-11"));
    }

    #[test]
    fn empty_list_never_matches() {
        assert_eq!(match_against_list("A320-214", &[]), None);
    }
}
