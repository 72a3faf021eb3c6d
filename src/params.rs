//! Validation of new-tanda parameters before they are sent to the manager.
//!
//! Human inputs (decimal USDC, days, a head count) are checked against the
//! manager's accepted ranges and converted into ledger base units.

use crate::format::{parse_usdc, SECONDS_PER_DAY, USDC_UNIT};
use crate::models::{Amount, DurationSeconds};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_CONTRIBUTION_USDC: u64 = 10;
pub const MIN_INTERVAL_DAYS: u64 = 1;
pub const MAX_INTERVAL_DAYS: u64 = 30;
pub const MIN_PARTICIPANTS: u32 = 2;
pub const MAX_PARTICIPANTS: u32 = 50;
pub const MIN_GRACE_DAYS: u64 = 1;
pub const MAX_GRACE_DAYS: u64 = 7;

/// Errors for create-tanda inputs
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid {field}: {value}")]
    Invalid { field: &'static str, value: String },

    #[error("Minimum contribution is 10 USDC")]
    ContributionTooLow,

    #[error("Minimum interval is 1 day")]
    IntervalTooShort,

    #[error("Maximum interval is 30 days")]
    IntervalTooLong,

    #[error("Minimum 2 participants")]
    TooFewParticipants,

    #[error("Maximum 50 participants")]
    TooManyParticipants,

    #[error("Minimum grace period is 1 day")]
    GraceTooShort,

    #[error("Maximum grace period is 7 days")]
    GraceTooLong,
}

/// Raw form values, as typed by the creator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTandaInput {
    pub contribution_amount: String,
    pub payout_interval_days: String,
    pub participant_count: String,
    pub grace_period_days: String,
}

impl CreateTandaInput {
    /// Pre-filled values of a fresh form
    pub fn defaults() -> Self {
        Self {
            contribution_amount: "10".to_string(),
            payout_interval_days: "1".to_string(),
            participant_count: "2".to_string(),
            grace_period_days: "1".to_string(),
        }
    }
}

/// Arguments of `createTanda(contributionAmount, payoutInterval, participantCount, gracePeriod)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTandaParams {
    pub contribution_amount: Amount,
    pub payout_interval: DurationSeconds,
    pub participant_count: u32,
    pub grace_period: DurationSeconds,
}

impl CreateTandaParams {
    /// Check every field and convert to base units
    pub fn validate(input: &CreateTandaInput) -> Result<Self, ParamsError> {
        let contribution_amount = parse_contribution(&input.contribution_amount)?;

        let interval_days = parse_days("payout interval", &input.payout_interval_days)?;
        if interval_days < Decimal::from(MIN_INTERVAL_DAYS) {
            return Err(ParamsError::IntervalTooShort);
        }
        if interval_days > Decimal::from(MAX_INTERVAL_DAYS) {
            return Err(ParamsError::IntervalTooLong);
        }

        let participant_count = parse_count(&input.participant_count)?;
        if participant_count < MIN_PARTICIPANTS {
            return Err(ParamsError::TooFewParticipants);
        }
        if participant_count > MAX_PARTICIPANTS {
            return Err(ParamsError::TooManyParticipants);
        }

        let grace_days = parse_days("grace period", &input.grace_period_days)?;
        if grace_days < Decimal::from(MIN_GRACE_DAYS) {
            return Err(ParamsError::GraceTooShort);
        }
        if grace_days > Decimal::from(MAX_GRACE_DAYS) {
            return Err(ParamsError::GraceTooLong);
        }

        Ok(Self {
            contribution_amount,
            payout_interval: days_to_seconds(interval_days),
            participant_count,
            grace_period: days_to_seconds(grace_days),
        })
    }

    /// Amount each participant pays in over the whole tanda
    pub fn total_commitment(&self) -> Amount {
        self.contribution_amount
            .saturating_mul(Amount::from(self.participant_count))
    }
}

fn parse_contribution(input: &str) -> Result<Amount, ParamsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParamsError::Required("Contribution amount"));
    }
    let amount = parse_usdc(trimmed).ok_or_else(|| ParamsError::Invalid {
        field: "contribution amount",
        value: trimmed.to_string(),
    })?;
    if amount < Amount::from(MIN_CONTRIBUTION_USDC) * USDC_UNIT {
        return Err(ParamsError::ContributionTooLow);
    }
    Ok(amount)
}

fn parse_days(field: &'static str, input: &str) -> Result<Decimal, ParamsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParamsError::Required(field));
    }
    trimmed.parse::<Decimal>().map_err(|_| ParamsError::Invalid {
        field,
        value: trimmed.to_string(),
    })
}

fn parse_count(input: &str) -> Result<u32, ParamsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParamsError::Required("Participant count"));
    }
    trimmed.parse::<u32>().map_err(|_| ParamsError::Invalid {
        field: "participant count",
        value: trimmed.to_string(),
    })
}

/// Whole seconds in `days`, rounded to the nearest second
fn days_to_seconds(days: Decimal) -> DurationSeconds {
    (days * Decimal::from(SECONDS_PER_DAY)).round().to_u64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(contribution: &str, interval: &str, count: &str, grace: &str) -> CreateTandaInput {
        CreateTandaInput {
            contribution_amount: contribution.to_string(),
            payout_interval_days: interval.to_string(),
            participant_count: count.to_string(),
            grace_period_days: grace.to_string(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let params = CreateTandaParams::validate(&CreateTandaInput::defaults()).unwrap();
        assert_eq!(params.contribution_amount, 10_000_000);
        assert_eq!(params.payout_interval, 86_400);
        assert_eq!(params.participant_count, 2);
        assert_eq!(params.grace_period, 86_400);
        assert_eq!(params.total_commitment(), 20_000_000);
    }

    #[test]
    fn test_decimal_contribution_is_exact() {
        let params = CreateTandaParams::validate(&input("12.34", "7", "5", "2")).unwrap();
        assert_eq!(params.contribution_amount, 12_340_000);
        assert_eq!(params.payout_interval, 604_800);
        assert_eq!(params.grace_period, 172_800);
    }

    #[test]
    fn test_fractional_days() {
        let params = CreateTandaParams::validate(&input("10", "1.5", "3", "1.25")).unwrap();
        assert_eq!(params.payout_interval, 129_600);
        assert_eq!(params.grace_period, 108_000);
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(
            CreateTandaParams::validate(&input("9.99", "1", "2", "1")).unwrap_err(),
            ParamsError::ContributionTooLow
        );
        assert_eq!(
            CreateTandaParams::validate(&input("10", "0.5", "2", "1")).unwrap_err(),
            ParamsError::IntervalTooShort
        );
        assert_eq!(
            CreateTandaParams::validate(&input("10", "31", "2", "1")).unwrap_err(),
            ParamsError::IntervalTooLong
        );
        assert_eq!(
            CreateTandaParams::validate(&input("10", "1", "1", "1")).unwrap_err(),
            ParamsError::TooFewParticipants
        );
        assert_eq!(
            CreateTandaParams::validate(&input("10", "1", "51", "1")).unwrap_err(),
            ParamsError::TooManyParticipants
        );
        assert_eq!(
            CreateTandaParams::validate(&input("10", "1", "2", "8")).unwrap_err(),
            ParamsError::GraceTooLong
        );
    }

    #[test]
    fn test_required_and_invalid() {
        assert_eq!(
            CreateTandaParams::validate(&input("", "1", "2", "1")).unwrap_err(),
            ParamsError::Required("Contribution amount")
        );
        assert!(matches!(
            CreateTandaParams::validate(&input("10", "1", "two", "1")).unwrap_err(),
            ParamsError::Invalid { field: "participant count", .. }
        ));
        assert_eq!(
            ParamsError::ContributionTooLow.to_string(),
            "Minimum contribution is 10 USDC"
        );
    }
}
