//! Rule-key normalization for suppression values
//!
//! A raw annotation value matches a canonical rule key through exact
//! equality, a registered legacy alias, or either of those behind the
//! current (`repo:`) or historical (`squid:`) repository qualifier. Bare
//! rule identifiers without a qualifier are unsupported syntax and match
//! nothing. The alias table is fixed external data, not computed.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::bridge::REPOSITORY_KEY;

/// Historical repository qualifier still accepted on suppression values
pub const DEPRECATED_REPOSITORY_KEY: &str = "squid";

const SUPPRESS_ALL: &str = "all";

/// Legacy rule identifiers mapped onto their canonical keys (many-to-one):
/// older zero-padded numbering plus renamed class-style identifiers
static DEPRECATED_RULE_KEYS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("S00100", "S100"),
        ("S00101", "S101"),
        ("S00112", "S112"),
        ("S00115", "S115"),
        ("S00116", "S116"),
        ("S00117", "S117"),
        ("S00119", "S119"),
        ("S00120", "S120"),
        ("S00122", "S122"),
        ("ObjectFinalizeCheck", "S1111"),
        ("ObjectFinalizeOverridenCheck", "S1114"),
        ("ClassVariableVisibilityCheck", "S1104"),
    ])
});

/// Rules that keep firing under a wildcard suppression; the check flagging
/// suppression annotations themselves must not be silenced by one
static NON_SUPPRESSIBLE_RULES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["S1309"]));

/// Normalized form of one raw suppression value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressedKey {
    /// Wildcard: suppresses every rule outside the non-suppressible set
    All,
    /// Suppresses exactly this canonical rule
    Rule(String),
}

/// Normalize a raw annotation value; `None` means the value matches no
/// rule (unqualified keys are unsupported syntax)
pub fn normalize(raw: &str) -> Option<SuppressedKey> {
    if raw == SUPPRESS_ALL {
        return Some(SuppressedKey::All);
    }
    let (qualifier, rule) = raw.split_once(':')?;
    if qualifier != REPOSITORY_KEY && qualifier != DEPRECATED_REPOSITORY_KEY {
        return None;
    }
    if rule == SUPPRESS_ALL {
        return Some(SuppressedKey::All);
    }
    let canonical = DEPRECATED_RULE_KEYS.get(rule).copied().unwrap_or(rule);
    Some(SuppressedKey::Rule(canonical.to_string()))
}

pub fn is_suppressible(rule: &str) -> bool {
    !NON_SUPPRESSIBLE_RULES.contains(rule)
}

/// Whether a normalized suppression value silences the given canonical rule
pub fn suppresses(key: &SuppressedKey, rule: &str) -> bool {
    match key {
        SuppressedKey::All => is_suppressible(rule),
        SuppressedKey::Rule(k) => k == rule,
    }
}
