use crate::directives::domain::MsnConstraint;

/// Outcome of a serial-number check, with the value comparison that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsnVerdict {
    pub passes: bool,
    pub reason: String,
}

impl MsnVerdict {
    fn pass(reason: impl Into<String>) -> Self {
        Self {
            passes: true,
            reason: reason.into(),
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            passes: false,
            reason: reason.into(),
        }
    }
}

/// Check an aircraft serial number against an AD's MSN constraints.
///
/// Precedence: no constraint passes everything; a missing MSN passes
/// (conservative toward flagging the aircraft); a non-empty include list is
/// exhaustive and overrides range and exclusions; explicit exclusions beat the
/// range; the inclusive range settles the rest.
pub fn check_msn(msn: Option<u32>, constraint: Option<&MsnConstraint>) -> MsnVerdict {
    let Some(constraint) = constraint else {
        return MsnVerdict::pass("No MSN constraints (all affected)");
    };

    let Some(msn) = msn else {
        return MsnVerdict::pass("No MSN provided, assuming affected");
    };

    if let Some(include) = constraint.include_msns.as_deref() {
        if !include.is_empty() {
            return if include.contains(&msn) {
                MsnVerdict::pass(format!("MSN {msn} in affected list"))
            } else {
                MsnVerdict::fail(format!("MSN {msn} not in specific affected list"))
            };
        }
    }

    if let Some(exclude) = constraint.exclude_msns.as_deref() {
        if exclude.contains(&msn) {
            return MsnVerdict::fail(format!("MSN {msn} explicitly excluded"));
        }
    }

    if constraint.min_msn.is_none() && constraint.max_msn.is_none() {
        return MsnVerdict::pass("No MSN range specified (all affected)");
    }

    if let Some(min) = constraint.min_msn {
        if msn < min {
            return MsnVerdict::fail(format!("MSN {msn} outside affected range (min: {min})"));
        }
    }

    if let Some(max) = constraint.max_msn {
        if msn > max {
            return MsnVerdict::fail(format!("MSN {msn} outside affected range (max: {max})"));
        }
    }

    MsnVerdict::pass(format!("MSN {msn} within affected range"))
}
