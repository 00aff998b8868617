//! Asset definitions: the declarative inputs to the projection engine

mod data;

pub use data::{Asset, CashEvent, ContributionCap, ContributionSchedule, ReturnRateInterval};
