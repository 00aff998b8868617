//! Asset data structures matching the persisted scenario format
//!
//! Field names serialize as camelCase to stay byte-compatible with scenario
//! blobs written by earlier versions of the tool; legacy key names
//! (`investments`, `investmentLimit`, `rate`, `amount`) are accepted as
//! aliases on import.

use serde::{Deserialize, Serialize};

/// An annual return rate that applies over an inclusive range of years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRateInterval {
    /// Identifier within the owning asset (assigned by the editing surface)
    #[serde(default)]
    pub id: u32,

    /// First projection year the rate applies to (1-indexed)
    pub start_year: u32,

    /// Last projection year the rate applies to (inclusive)
    pub end_year: u32,

    /// Annual return in percent (5.0 = 5%)
    #[serde(alias = "rate")]
    pub rate_percent: f64,
}

/// A recurring monthly contribution over an inclusive range of years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSchedule {
    #[serde(default)]
    pub id: u32,

    /// First projection year contributions are made (1-indexed)
    pub start_year: u32,

    /// Last projection year contributions are made (inclusive)
    pub end_year: u32,

    /// Amount contributed per month; a full year contributes 12x this
    pub monthly_amount: f64,
}

/// A one-off cash event: positive = lump contribution, negative = withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashEvent {
    #[serde(default)]
    pub id: u32,

    /// Projection year the event occurs in (1-indexed)
    pub year: u32,

    /// Signed amount; multiple events in the same year sum
    pub amount: f64,
}

/// Lifetime ceiling on cumulative positive inflows (contributions plus
/// positive events), modeling a tax-advantaged account's contribution limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCap {
    #[serde(default)]
    pub enabled: bool,

    /// The lifetime limit; only meaningful when `enabled`
    #[serde(default, alias = "amount")]
    pub limit: f64,
}

impl Default for ContributionCap {
    fn default() -> Self {
        Self {
            enabled: false,
            limit: 0.0,
        }
    }
}

/// A named account/holding tracked independently through the projection
///
/// Owned exclusively by the portfolio it belongs to. The projector treats an
/// asset as immutable input; all edits happen via whole-field replacement in
/// the owning surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Identifier within the portfolio (uniqueness enforced by the owner)
    pub id: u32,

    pub name: String,

    /// Balance at year 0, before any growth or contributions
    #[serde(default)]
    pub initial_amount: f64,

    /// Time-varying annual return rates
    #[serde(default)]
    pub return_rates: Vec<ReturnRateInterval>,

    /// Recurring contribution schedules; overlapping ranges are additive
    #[serde(default, alias = "investments")]
    pub contributions: Vec<ContributionSchedule>,

    /// One-off cash events
    #[serde(default)]
    pub events: Vec<CashEvent>,

    /// Optional lifetime contribution cap
    #[serde(default, alias = "investmentLimit")]
    pub cap: ContributionCap,
}

impl Asset {
    /// Create an asset with no rates, schedules, events, or cap
    pub fn new(id: u32, name: impl Into<String>, initial_amount: f64) -> Self {
        Self {
            id,
            name: name.into(),
            initial_amount,
            return_rates: Vec::new(),
            contributions: Vec::new(),
            events: Vec::new(),
            cap: ContributionCap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_default() {
        // Older blobs omit cap and the sub-collections entirely
        let json = r#"{"id": 1, "name": "Brokerage"}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();

        assert_eq!(asset.initial_amount, 0.0);
        assert!(asset.return_rates.is_empty());
        assert!(asset.contributions.is_empty());
        assert!(asset.events.is_empty());
        assert!(!asset.cap.enabled);
        assert_eq!(asset.cap.limit, 0.0);
    }

    #[test]
    fn test_legacy_key_aliases() {
        let json = r#"{
            "id": 2,
            "name": "NISA",
            "initialAmount": 100000,
            "returnRates": [{"id": 1, "startYear": 1, "endYear": 10, "rate": 5}],
            "investments": [{"id": 1, "startYear": 1, "endYear": 10, "monthlyAmount": 50000}],
            "investmentLimit": {"enabled": true, "amount": 1800000}
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();

        assert_eq!(asset.return_rates[0].rate_percent, 5.0);
        assert_eq!(asset.contributions[0].monthly_amount, 50000.0);
        assert!(asset.cap.enabled);
        assert_eq!(asset.cap.limit, 1_800_000.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut asset = Asset::new(1, "Pension", 500.0);
        asset.return_rates.push(ReturnRateInterval {
            id: 1,
            start_year: 1,
            end_year: 5,
            rate_percent: 3.0,
        });

        let json = serde_json::to_string(&asset).unwrap();
        assert!(json.contains("\"initialAmount\""));
        assert!(json.contains("\"returnRates\""));
        assert!(json.contains("\"startYear\""));
        assert!(json.contains("\"ratePercent\""));
    }
}
