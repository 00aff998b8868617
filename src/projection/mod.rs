//! Projection engine for single-asset and portfolio projections

mod engine;
mod portfolio;
mod snapshot;
mod state;

pub use engine::{contribution_for_year, event_amount_for_year, return_rate_for_year, Projector};
pub use portfolio::PortfolioProjection;
pub use snapshot::{AssetProjection, CombinedSnapshot, ProjectionSummary, YearSnapshot};
pub use state::ProjectionState;
