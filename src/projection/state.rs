//! Accumulator state threaded through a single asset's year recurrence

use crate::asset::{Asset, ContributionCap};
use super::snapshot::YearSnapshot;

/// Running totals for one asset, advanced year by year in order
///
/// Kept as an explicit value threaded through the projector's fold rather
/// than mutating the asset itself; the asset stays immutable input.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Market value including growth
    pub total: f64,

    /// Contributed capital: initial amount plus inflows minus withdrawals
    pub principal: f64,

    /// Sum of positive inflows counted against the cap; never decreases
    pub cumulative_contribution: f64,

    /// Whether the cap clamped an inflow in the current year
    pub capped_this_year: bool,
}

impl ProjectionState {
    /// Initialize state at year 0 from the asset's starting balance
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            total: asset.initial_amount,
            principal: asset.initial_amount,
            cumulative_contribution: 0.0,
            capped_this_year: false,
        }
    }

    /// Cap room left before this year's inflows; infinite when disabled
    pub fn remaining_cap_room(&self, cap: &ContributionCap) -> f64 {
        if cap.enabled {
            (cap.limit - self.cumulative_contribution).max(0.0)
        } else {
            f64::INFINITY
        }
    }

    /// Apply one year of growth at the given annual percentage rate
    pub fn apply_growth(&mut self, rate_percent: f64) {
        self.total *= 1.0 + rate_percent / 100.0;
    }

    /// Apply an already-clamped scheduled contribution
    pub fn apply_contribution(&mut self, amount: f64) {
        self.total += amount;
        self.principal += amount;
        self.cumulative_contribution += amount;
    }

    /// Apply the year's net event amount
    ///
    /// Positive events count against the cap and are clamped to the remaining
    /// room; withdrawals apply in full and never free up cap room.
    pub fn apply_event(&mut self, amount: f64, cap: &ContributionCap) {
        if amount >= 0.0 {
            let actual = amount.min(self.remaining_cap_room(cap));
            if actual < amount {
                self.capped_this_year = true;
            }
            self.total += actual;
            self.principal += actual;
            self.cumulative_contribution += actual;
        } else {
            self.total += amount;
            self.principal += amount;
        }
    }

    /// Emit the snapshot for the given year
    ///
    /// Rounds `total` and `profit` only; the accumulators themselves are
    /// never rounded between years.
    pub fn snapshot(&self, year: u32) -> YearSnapshot {
        YearSnapshot {
            year,
            total: self.total.round(),
            principal: self.principal,
            profit: (self.total - self.principal).round(),
            cumulative_contribution: self.cumulative_contribution,
            contribution_capped: self.capped_this_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let asset = Asset::new(1, "Cash", 2_000_000.0);
        let state = ProjectionState::from_asset(&asset);

        assert_eq!(state.total, 2_000_000.0);
        assert_eq!(state.principal, 2_000_000.0);
        assert_eq!(state.cumulative_contribution, 0.0);
    }

    #[test]
    fn test_withdrawal_leaves_cumulative_untouched() {
        let asset = Asset::new(1, "Cash", 1_000_000.0);
        let mut state = ProjectionState::from_asset(&asset);
        let cap = ContributionCap {
            enabled: true,
            limit: 100_000.0,
        };

        state.apply_event(-250_000.0, &cap);

        assert_eq!(state.total, 750_000.0);
        assert_eq!(state.principal, 750_000.0);
        assert_eq!(state.cumulative_contribution, 0.0);
        assert!(!state.capped_this_year);
    }

    #[test]
    fn test_positive_event_clamped_to_cap_room() {
        let asset = Asset::new(1, "NISA", 0.0);
        let mut state = ProjectionState::from_asset(&asset);
        let cap = ContributionCap {
            enabled: true,
            limit: 300_000.0,
        };

        state.apply_contribution(250_000.0);
        state.apply_event(100_000.0, &cap);

        // Only 50,000 of room remained
        assert_eq!(state.cumulative_contribution, 300_000.0);
        assert_eq!(state.total, 300_000.0);
        assert!(state.capped_this_year);
    }
}
