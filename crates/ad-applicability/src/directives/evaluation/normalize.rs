use std::collections::BTreeSet;

/// Canonicalize a modification name for comparison: uppercase, drop
/// parenthetical annotations such as "(production)", collapse whitespace.
/// Model names never go through here; they keep their own matching rules.
pub(crate) fn normalize_mod_name(name: &str) -> String {
    let upper = name.to_uppercase();
    let stripped = strip_parentheticals(&upper);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Replaces each "( ... )" group with a space so surrounding tokens stay
// separated. An unclosed "(" is left alone.
fn strip_parentheticals(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push(' ');
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Candidate identifiers hidden in a normalized modification name: every
/// maximal digit run, every letters-then-digits token (e.g. "SB1089"), and
/// the alphanumeric-only collapse of the whole string.
pub(crate) fn extract_identifiers(text: &str) -> BTreeSet<String> {
    let mut identifiers = BTreeSet::new();
    let chars: Vec<char> = text.chars().collect();

    let mut index = 0;
    while index < chars.len() {
        if chars[index].is_ascii_digit() {
            let start = index;
            while index < chars.len() && chars[index].is_ascii_digit() {
                index += 1;
            }
            identifiers.insert(chars[start..index].iter().collect());
        } else {
            index += 1;
        }
    }

    index = 0;
    while index < chars.len() {
        if chars[index].is_ascii_uppercase() {
            let start = index;
            while index < chars.len() && chars[index].is_ascii_uppercase() {
                index += 1;
            }
            if index < chars.len() && chars[index].is_ascii_digit() {
                while index < chars.len() && chars[index].is_ascii_digit() {
                    index += 1;
                }
                identifiers.insert(chars[start..index].iter().collect());
            }
        } else {
            index += 1;
        }
    }

    let alphanumeric: String = text.chars().filter(|ch| ch.is_ascii_alphanumeric()).collect();
    if !alphanumeric.is_empty() {
        identifiers.insert(alphanumeric);
    }

    identifiers
}
