//! Portfolio aggregation: running every asset and summing per-year results

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use super::engine::Projector;
use super::snapshot::{AssetProjection, CombinedSnapshot};

/// Result of projecting a whole portfolio over one horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProjection {
    /// One projection per asset, in input order
    pub per_asset: Vec<AssetProjection>,

    /// Per-year totals summed across assets, index 0..=horizon
    pub combined: Vec<CombinedSnapshot>,
}

impl Projector {
    /// Project every asset and aggregate the per-year results
    ///
    /// Assets are independent, so they are projected in parallel; collecting
    /// preserves input order, keeping the output deterministic. An empty
    /// portfolio still yields a combined series of all-zero rows.
    pub fn project_portfolio(&self, assets: &[Asset]) -> PortfolioProjection {
        let per_asset: Vec<AssetProjection> = assets
            .par_iter()
            .map(|asset| self.project_asset(asset))
            .collect();

        let combined = (0..=self.horizon_years())
            .map(|year| {
                let mut row = CombinedSnapshot::zero(year);
                for projection in &per_asset {
                    let snap = &projection.snapshots[year as usize];
                    row.total += snap.total;
                    row.principal += snap.principal;
                    row.profit += snap.profit;
                    row.breakdown
                        .insert(format!("{}_total", projection.asset_name), snap.total);
                }
                row
            })
            .collect();

        PortfolioProjection { per_asset, combined }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{ContributionSchedule, ReturnRateInterval};

    fn growth_asset(id: u32, name: &str, initial: f64, pct: f64) -> Asset {
        let mut asset = Asset::new(id, name, initial);
        asset.return_rates.push(ReturnRateInterval {
            id: 1,
            start_year: 1,
            end_year: 50,
            rate_percent: pct,
        });
        asset
    }

    #[test]
    fn test_combined_is_sum_of_assets() {
        let mut savings = Asset::new(1, "Savings", 500_000.0);
        savings.contributions.push(ContributionSchedule {
            id: 1,
            start_year: 1,
            end_year: 10,
            monthly_amount: 10_000.0,
        });
        let stocks = growth_asset(2, "Stocks", 1_000_000.0, 5.0);

        let result = Projector::new(10).project_portfolio(&[savings, stocks]);

        assert_eq!(result.per_asset.len(), 2);
        assert_eq!(result.combined.len(), 11);
        for (year, row) in result.combined.iter().enumerate() {
            let expected_total: f64 = result
                .per_asset
                .iter()
                .map(|p| p.snapshots[year].total)
                .sum();
            let expected_principal: f64 = result
                .per_asset
                .iter()
                .map(|p| p.snapshots[year].principal)
                .sum();
            assert_eq!(row.total, expected_total);
            assert_eq!(row.principal, expected_principal);
        }
    }

    #[test]
    fn test_breakdown_entries_per_asset() {
        let assets = vec![
            growth_asset(1, "Stocks", 100.0, 0.0),
            growth_asset(2, "Bonds", 200.0, 0.0),
        ];

        let result = Projector::new(2).project_portfolio(&assets);
        let row = &result.combined[1];

        assert_eq!(row.breakdown.get("Stocks_total"), Some(&100.0));
        assert_eq!(row.breakdown.get("Bonds_total"), Some(&200.0));
    }

    #[test]
    fn test_duplicate_names_overwrite_breakdown_key() {
        // Known limitation: the later asset wins the shared key, while the
        // summed columns still count both
        let assets = vec![
            growth_asset(1, "Fund", 100.0, 0.0),
            growth_asset(2, "Fund", 200.0, 0.0),
        ];

        let result = Projector::new(1).project_portfolio(&assets);
        let row = &result.combined[1];

        assert_eq!(row.breakdown.len(), 1);
        assert_eq!(row.breakdown.get("Fund_total"), Some(&200.0));
        assert_eq!(row.total, 300.0);
    }

    #[test]
    fn test_empty_portfolio_yields_zero_series() {
        let result = Projector::new(5).project_portfolio(&[]);

        assert!(result.per_asset.is_empty());
        assert_eq!(result.combined.len(), 6);
        for (year, row) in result.combined.iter().enumerate() {
            assert_eq!(row.year, year as u32);
            assert_eq!(row.total, 0.0);
            assert_eq!(row.principal, 0.0);
            assert_eq!(row.profit, 0.0);
            assert!(row.breakdown.is_empty());
        }
    }

    #[test]
    fn test_breakdown_flattens_into_json() {
        let result = Projector::new(1).project_portfolio(&[growth_asset(1, "Cash", 50.0, 0.0)]);
        let json = serde_json::to_value(&result.combined[1]).unwrap();

        assert_eq!(json["Cash_total"], 50.0);
        assert_eq!(json["total"], 50.0);
    }
}
