//! Core projection engine: the per-year recurrence for a single asset
//!
//! The three lookup pieces (return rate, scheduled contribution, event sum)
//! are plain pure functions so that each policy can be tested and swapped in
//! isolation; `Projector` composes them into the year-by-year fold.

use log::debug;

use crate::asset::{Asset, ContributionCap, ContributionSchedule, CashEvent, ReturnRateInterval};
use super::snapshot::AssetProjection;
use super::state::ProjectionState;

/// Resolve the annual return rate (in percent) applicable to `year`
///
/// Ranges are inclusive on both ends. When ranges overlap, the interval with
/// the largest `start_year` wins; this tie-break is inherited behavior, kept
/// here so an alternative policy would only touch this function. Gaps and
/// overlaps are tolerated silently; `None` means no interval matched and the
/// caller treats the year as zero-growth.
pub fn return_rate_for_year(year: u32, rates: &[ReturnRateInterval]) -> Option<f64> {
    rates
        .iter()
        .filter(|r| r.start_year <= year && year <= r.end_year)
        .max_by_key(|r| r.start_year)
        .map(|r| r.rate_percent)
}

/// Yearly amount planned by the schedules active in `year`, before any cap
fn planned_contribution(year: u32, schedules: &[ContributionSchedule]) -> f64 {
    schedules
        .iter()
        .filter(|s| s.start_year <= year && year <= s.end_year)
        .map(|s| s.monthly_amount * 12.0)
        .sum()
}

/// Actual contribution for `year` after applying the lifetime cap
///
/// Pure and stateless: the caller threads `cumulative_so_far` through the
/// years in order and adds the returned amount to it afterwards.
pub fn contribution_for_year(
    year: u32,
    schedules: &[ContributionSchedule],
    cap: &ContributionCap,
    cumulative_so_far: f64,
) -> f64 {
    let planned = planned_contribution(year, schedules);
    if !cap.enabled {
        return planned;
    }
    let remaining = cap.limit - cumulative_so_far;
    if remaining <= 0.0 {
        0.0
    } else {
        planned.min(remaining)
    }
}

/// Net signed amount of all events falling in `year`
///
/// No cap logic here: only the projector knows the running cumulative total
/// at the moment the event lands, so clamping happens there.
pub fn event_amount_for_year(year: u32, events: &[CashEvent]) -> f64 {
    events
        .iter()
        .filter(|e| e.year == year)
        .map(|e| e.amount)
        .sum()
}

/// Drives the year-by-year recurrence over a fixed horizon
///
/// A pure function of its inputs: identical `(asset, horizon)` always
/// produces identical output, recomputed fresh on every call.
#[derive(Debug, Clone)]
pub struct Projector {
    horizon_years: u32,
}

impl Projector {
    pub fn new(horizon_years: u32) -> Self {
        Self { horizon_years }
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    /// Project a single asset, producing `horizon_years + 1` snapshots
    ///
    /// Year order within one asset is strict: growth first, then scheduled
    /// contributions, then events, each seeing the accumulators the previous
    /// step left behind. Inflows do not compound in their arrival year.
    pub fn project_asset(&self, asset: &Asset) -> AssetProjection {
        let mut result = AssetProjection::new(asset);
        let mut state = ProjectionState::from_asset(asset);

        result.snapshots.push(state.snapshot(0));

        for year in 1..=self.horizon_years {
            state.capped_this_year = false;

            let rate = return_rate_for_year(year, &asset.return_rates).unwrap_or(0.0);
            state.apply_growth(rate);

            let planned = planned_contribution(year, &asset.contributions);
            let actual = contribution_for_year(
                year,
                &asset.contributions,
                &asset.cap,
                state.cumulative_contribution,
            );
            if actual < planned {
                state.capped_this_year = true;
            }
            state.apply_contribution(actual);

            let event_amount = event_amount_for_year(year, &asset.events);
            state.apply_event(event_amount, &asset.cap);

            result.snapshots.push(state.snapshot(year));
        }

        debug!(
            "projected asset {} ({}) over {} years: final total {:.0}",
            asset.id,
            asset.name,
            self.horizon_years,
            state.total
        );

        result
    }
}
