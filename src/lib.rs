//! asset-chisel - Multi-asset financial projection engine
//!
//! This library provides:
//! - Year-by-year projection of named assets (growth, recurring
//!   contributions, one-off cash events, lifetime contribution caps)
//! - Portfolio aggregation with per-asset breakdowns
//! - Named scenario persistence (save/load/import/export as JSON)

pub mod asset;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use asset::{Asset, CashEvent, ContributionCap, ContributionSchedule, ReturnRateInterval};
pub use projection::{AssetProjection, CombinedSnapshot, PortfolioProjection, Projector, YearSnapshot};
pub use scenario::{Scenario, ScenarioData, ScenarioStore, StoreError};
