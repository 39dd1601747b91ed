//! Data model for email verification verdicts.
//!
//! The validation service answers a batch of addresses with one
//! [`VerificationResult`] per address plus aggregate [`Stats`]; together they
//! form a [`ResultSet`]. Boolean flags on a verdict are tri-state: a flag the
//! service could not determine is absent rather than `false`.

pub mod display;
pub mod reachability;
pub mod result;

pub use display::{StatusTone, tri_state};
pub use reachability::{ParseReachabilityError, Reachability};
pub use result::{BooleanField, ResultSet, Stats, VerificationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_set_round_trips_through_json() {
        let set = ResultSet::from_items(vec![
            VerificationResult::new("a@example.com", Reachability::Safe),
            VerificationResult::new("b@example.com", Reachability::Risky),
        ]);
        let json = serde_json::to_string(&set).unwrap();
        let back: ResultSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
