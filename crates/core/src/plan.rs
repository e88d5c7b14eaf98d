//! Subscription plan tiers, pricing, and upgrade math.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Subscription tier gating feature availability for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Ignite,
    Professional,
    Executive,
    Prime,
}

/// All plan tiers, ordered cheapest first.
pub const ALL_PLANS: &[Plan] = &[
    Plan::Ignite,
    Plan::Professional,
    Plan::Executive,
    Plan::Prime,
];

impl Plan {
    /// The stored string form (matches the `clients.plan` column).
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Ignite => "ignite",
            Plan::Professional => "professional",
            Plan::Executive => "executive",
            Plan::Prime => "prime",
        }
    }

    /// Monthly price in cents.
    pub fn price_cents(self) -> i64 {
        match self {
            Plan::Ignite => 9_900,
            Plan::Professional => 19_900,
            Plan::Executive => 39_900,
            Plan::Prime => 59_900,
        }
    }

    /// Tier rank used to distinguish upgrades from downgrades.
    fn rank(self) -> u8 {
        match self {
            Plan::Ignite => 0,
            Plan::Professional => 1,
            Plan::Executive => 2,
            Plan::Prime => 3,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignite" => Ok(Plan::Ignite),
            "professional" => Ok(Plan::Professional),
            "executive" => Ok(Plan::Executive),
            "prime" => Ok(Plan::Prime),
            other => Err(CoreError::Validation(format!(
                "Invalid plan '{other}'. Must be one of: ignite, professional, executive, prime"
            ))),
        }
    }
}

/// Compute the amount owed for moving from `current` to `target`.
///
/// Returns the price difference in cents. Downgrades and no-op changes are
/// rejected; the source system only ever priced upgrades.
pub fn upgrade_delta_cents(current: Plan, target: Plan) -> Result<i64, CoreError> {
    if target.rank() <= current.rank() {
        return Err(CoreError::Validation(format!(
            "Cannot change plan from {current} to {target}: only upgrades are supported"
        )));
    }
    Ok(target.price_cents() - current.price_cents())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_round_trip_all_plans() {
        for plan in ALL_PLANS {
            let parsed: Plan = plan.as_str().parse().expect("stored form must parse");
            assert_eq!(parsed, *plan);
        }
    }

    #[test]
    fn test_unknown_plan_rejected() {
        let result = Plan::from_str("platinum");
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_upgrade_delta() {
        let delta = upgrade_delta_cents(Plan::Ignite, Plan::Executive).unwrap();
        assert_eq!(delta, 39_900 - 9_900);

        let delta = upgrade_delta_cents(Plan::Professional, Plan::Prime).unwrap();
        assert_eq!(delta, 59_900 - 19_900);
    }

    #[test]
    fn test_downgrade_rejected() {
        assert_matches!(
            upgrade_delta_cents(Plan::Prime, Plan::Ignite),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            upgrade_delta_cents(Plan::Executive, Plan::Executive),
            Err(CoreError::Validation(_))
        );
    }
}
