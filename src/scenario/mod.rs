//! Named scenarios: saved parameter sets the engine's inputs round-trip through
//!
//! The engine treats a scenario as opaque apart from `data`; ids, names and
//! timestamps exist only for the persistence and presentation surfaces.

mod store;

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;

pub use store::{
    default_export_filename, export_scenario, import_scenario, ScenarioStore, StoreError,
};

fn default_simulation_years() -> u32 {
    30
}

/// The projection parameters a scenario carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioData {
    /// Projection horizon in years
    #[serde(default = "default_simulation_years")]
    pub simulation_years: u32,

    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Default for ScenarioData {
    fn default() -> Self {
        Self {
            simulation_years: default_simulation_years(),
            assets: Vec::new(),
        }
    }
}

/// A named, timestamped parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub data: ScenarioData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    /// Create a scenario with a fresh id and current timestamps
    pub fn new(name: impl Into<String>, data: ScenarioData) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Millisecond timestamp plus a process-local counter, unique enough for a
/// single-user store
fn generate_id() -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{:04x}", Utc::now().timestamp_millis(), seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scenario_has_fresh_identity() {
        let a = Scenario::new("Retirement", ScenarioData::default());
        let b = Scenario::new("Retirement", ScenarioData::default());

        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Retirement");
        assert_eq!(a.data.simulation_years, 30);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_data_defaults_when_fields_missing() {
        let data: ScenarioData = serde_json::from_str("{}").unwrap();

        assert_eq!(data.simulation_years, 30);
        assert!(data.assets.is_empty());
    }

    #[test]
    fn test_scenario_json_shape() {
        let scenario = Scenario::new("Base", ScenarioData::default());
        let json = serde_json::to_value(&scenario).unwrap();

        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
        assert_eq!(json["data"]["simulationYears"], 30);
    }
}
