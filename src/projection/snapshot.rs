//! Snapshot output structures for projections

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::Asset;

/// Projected state of one asset at one year boundary
///
/// `total` and `profit` are rounded to whole units for display; `principal`
/// and `cumulative_contribution` stay unrounded so that threading them back
/// through further arithmetic does not compound rounding error. Asymmetric,
/// but earlier versions of the tool emitted exactly this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    /// Year index, 0 = projection start
    pub year: u32,

    /// Market value at the end of the year, rounded
    pub total: f64,

    /// Cumulative contributed capital, excluding market gains
    pub principal: f64,

    /// `total - principal`, rounded from the unrounded difference
    pub profit: f64,

    /// Running sum of positive inflows; never reduced by withdrawals
    pub cumulative_contribution: f64,

    /// True when the contribution cap clamped an inflow this year
    #[serde(default)]
    pub contribution_capped: bool,
}

/// Complete projection for a single asset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProjection {
    pub asset_id: u32,
    pub asset_name: String,

    /// One snapshot per year, index 0..=horizon
    pub snapshots: Vec<YearSnapshot>,
}

impl AssetProjection {
    pub fn new(asset: &Asset) -> Self {
        Self {
            asset_id: asset.id,
            asset_name: asset.name.clone(),
            snapshots: Vec::new(),
        }
    }

    /// Headline figures for the final projected year
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.snapshots.last();
        ProjectionSummary {
            horizon_years: self.snapshots.len().saturating_sub(1) as u32,
            final_total: last.map(|s| s.total).unwrap_or(0.0),
            final_principal: last.map(|s| s.principal).unwrap_or(0.0),
            final_profit: last.map(|s| s.profit).unwrap_or(0.0),
            total_contributed: last.map(|s| s.cumulative_contribution).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for one asset's projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub horizon_years: u32,
    pub final_total: f64,
    pub final_principal: f64,
    pub final_profit: f64,
    pub total_contributed: f64,
}

/// Per-year totals summed across every asset in the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSnapshot {
    pub year: u32,
    pub total: f64,
    pub principal: f64,
    pub profit: f64,

    /// `{assetName}_total` breakdown entries, one per asset; two assets with
    /// the same name silently share (overwrite) a key
    #[serde(flatten)]
    pub breakdown: BTreeMap<String, f64>,
}

impl CombinedSnapshot {
    pub fn zero(year: u32) -> Self {
        Self {
            year,
            total: 0.0,
            principal: 0.0,
            profit: 0.0,
            breakdown: BTreeMap::new(),
        }
    }
}
