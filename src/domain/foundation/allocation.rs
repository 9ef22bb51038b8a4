//! Role allocation totals.
//!
//! Roles carry a `percent` share of a staff member's (or project's) effort.
//! The total is a running sum rounded to two places after every addition,
//! so `[0.005, 0.005, 0.005]` totals `0.03` while rounding once at the end
//! would give `0.02`.

use thiserror::Error;

use super::{round_to, DomainError, ErrorCode, RecordKey};

/// Decimal places kept by the running total.
pub const TOTAL_PERCENT_PLACES: i32 = 2;

/// A record that carries a percentage allocation.
pub trait Allocation {
    /// Object identity, reported when the percent is unusable.
    fn allocation_key(&self) -> RecordKey;

    /// The allocated share, if one has been set.
    fn percent(&self) -> Option<f64>;
}

/// Errors produced while totalling allocations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("Role {role} has no numeric percent")]
    InvalidRole { role: RecordKey },
}

impl From<AggregationError> for DomainError {
    fn from(err: AggregationError) -> Self {
        match &err {
            AggregationError::InvalidRole { role } => {
                DomainError::new(ErrorCode::InvalidRole, err.to_string())
                    .with_detail("role", role.to_string())
            }
        }
    }
}

/// Sums the percents of `allocations` in iteration order, rounding the
/// running total to two places after each step. An empty sequence totals 0.
pub fn running_total<'a, A, I>(allocations: I) -> Result<f64, AggregationError>
where
    A: Allocation + 'a,
    I: IntoIterator<Item = &'a A>,
{
    allocations.into_iter().try_fold(0.0, |total, allocation| {
        match allocation.percent() {
            Some(percent) if percent.is_finite() => {
                Ok(round_to(total + percent, TOTAL_PERCENT_PLACES))
            }
            _ => Err(AggregationError::InvalidRole {
                role: allocation.allocation_key(),
            }),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Share {
        key: RecordKey,
        percent: Option<f64>,
    }

    impl Allocation for Share {
        fn allocation_key(&self) -> RecordKey {
            self.key
        }

        fn percent(&self) -> Option<f64> {
            self.percent
        }
    }

    fn shares(values: &[f64]) -> Vec<Share> {
        values
            .iter()
            .map(|v| Share {
                key: RecordKey::new(),
                percent: Some(*v),
            })
            .collect()
    }

    fn rounded_once(values: &[f64]) -> f64 {
        round_to(values.iter().sum(), TOTAL_PERCENT_PLACES)
    }

    #[test]
    fn empty_sequence_totals_zero() {
        let none: Vec<Share> = Vec::new();
        assert_eq!(running_total(&none).unwrap(), 0.0);
    }

    #[test]
    fn rounds_after_every_step() {
        let values = [33.333, 33.333, 33.334];
        let expected = round_to(
            round_to(round_to(0.0 + 33.333, 2) + 33.333, 2) + 33.334,
            2,
        );

        let total = running_total(&shares(&values)).unwrap();
        assert_eq!(total, expected);
        assert_eq!(total, 99.99);
        assert_eq!(rounded_once(&values), 100.0);
    }

    #[test]
    fn step_rounding_diverges_from_final_rounding() {
        let values = [0.005, 0.005, 0.005];
        assert_eq!(running_total(&shares(&values)).unwrap(), 0.03);
        assert_eq!(rounded_once(&values), 0.02);
    }

    #[test]
    fn drift_accumulates_over_many_small_shares() {
        let values = [0.005; 10];
        assert_eq!(running_total(&shares(&values)).unwrap(), 0.1);
        assert_eq!(rounded_once(&values), 0.05);
    }

    #[test]
    fn whole_percents_add_exactly() {
        assert_eq!(running_total(&shares(&[50.0, 25.0, 25.0])).unwrap(), 100.0);
    }

    #[test]
    fn missing_percent_is_an_invalid_role() {
        let key = RecordKey::new();
        let roles = vec![
            Share {
                key: RecordKey::new(),
                percent: Some(10.0),
            },
            Share { key, percent: None },
        ];

        assert_eq!(
            running_total(&roles),
            Err(AggregationError::InvalidRole { role: key })
        );
    }

    #[test]
    fn nan_percent_is_an_invalid_role() {
        let key = RecordKey::new();
        let roles = vec![Share {
            key,
            percent: Some(f64::NAN),
        }];
        let err: DomainError = running_total(&roles).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidRole);
        assert_eq!(err.details.get("role"), Some(&key.to_string()));
    }

    proptest! {
        #[test]
        fn hundredths_total_exactly(cents in proptest::collection::vec(0u32..=10_000, 0..20)) {
            let values: Vec<f64> = cents.iter().map(|c| f64::from(*c) / 100.0).collect();
            let sum: u32 = cents.iter().sum();

            prop_assert_eq!(running_total(&shares(&values)).unwrap(), f64::from(sum) / 100.0);
        }

        #[test]
        fn total_is_already_rounded(values in proptest::collection::vec(0.0f64..=100.0, 0..20)) {
            let total = running_total(&shares(&values)).unwrap();
            prop_assert_eq!(round_to(total, TOTAL_PERCENT_PLACES), total);
        }

        #[test]
        fn any_missing_percent_fails(
            values in proptest::collection::vec(0.0f64..=100.0, 0..10),
            missing in 0usize..10,
        ) {
            let mut roles = shares(&values);
            let key = RecordKey::new();
            let at = missing.min(roles.len());
            roles.insert(at, Share { key, percent: None });

            prop_assert_eq!(
                running_total(&roles),
                Err(AggregationError::InvalidRole { role: key })
            );
        }
    }
}
