//! Canned specifications over customers

use super::customer::{BAD_VOTES_THRESHOLD, CustomerField, GOOD_VOTES_THRESHOLD};
use super::specification::{Operator, Specification};

/// Customers with at least [`GOOD_VOTES_THRESHOLD`] votes.
pub fn is_good() -> Specification {
    Specification::where_(CustomerField::Up, Operator::Ge, GOOD_VOTES_THRESHOLD)
}

/// Customers with at most [`BAD_VOTES_THRESHOLD`] votes.
pub fn is_bad() -> Specification {
    Specification::where_(CustomerField::Up, Operator::Le, BAD_VOTES_THRESHOLD)
}

pub fn username_starts_with(prefix: &str) -> Specification {
    Specification::where_(CustomerField::Username, Operator::StartsWith, prefix)
}
