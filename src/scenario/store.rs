//! File-backed scenario store
//!
//! A directory holding `scenarios.json` (every saved scenario) and a
//! `current-scenario` id marker. Failures here are recoverable by design:
//! malformed JSON surfaces as [`StoreError::InvalidFormat`] and the files on
//! disk are left as they were.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use super::{Scenario, ScenarioData};

const SCENARIOS_FILE: &str = "scenarios.json";
const CURRENT_FILE: &str = "current-scenario";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The JSON exists but does not describe a scenario
    #[error("invalid scenario format")]
    InvalidFormat(#[source] serde_json::Error),

    #[error("scenario not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Store of named scenarios under one directory
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    dir: PathBuf,
}

impl ScenarioStore {
    /// Open a store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn scenarios_path(&self) -> PathBuf {
        self.dir.join(SCENARIOS_FILE)
    }

    fn current_path(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE)
    }

    /// All saved scenarios; an absent store file means an empty store
    pub fn all(&self) -> Result<Vec<Scenario>, StoreError> {
        let path = self.scenarios_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(StoreError::InvalidFormat)
    }

    fn write_all(&self, scenarios: &[Scenario]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(scenarios).map_err(StoreError::InvalidFormat)?;
        fs::write(self.scenarios_path(), json)?;
        Ok(())
    }

    /// Fetch one scenario by id
    pub fn get(&self, id: &str) -> Result<Option<Scenario>, StoreError> {
        Ok(self.all()?.into_iter().find(|s| s.id == id))
    }

    /// Insert or overwrite by id, bump `updated_at`, and make it current
    pub fn save(&self, mut scenario: Scenario) -> Result<Scenario, StoreError> {
        scenario.updated_at = Utc::now();

        let mut scenarios = self.all()?;
        match scenarios.iter_mut().find(|s| s.id == scenario.id) {
            Some(existing) => *existing = scenario.clone(),
            None => scenarios.push(scenario.clone()),
        }
        self.write_all(&scenarios)?;
        self.set_current_id(&scenario.id)?;

        info!("saved scenario {} ({})", scenario.id, scenario.name);
        Ok(scenario)
    }

    /// Delete by id, reassigning the current marker if it pointed there
    pub fn delete(&self, id: &str) -> Result<Vec<Scenario>, StoreError> {
        let scenarios = self.all()?;
        if !scenarios.iter().any(|s| s.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let remaining: Vec<Scenario> = scenarios.into_iter().filter(|s| s.id != id).collect();
        self.write_all(&remaining)?;

        if self.current_id().as_deref() == Some(id) {
            match remaining.first() {
                Some(next) => self.set_current_id(&next.id)?,
                None => {
                    let path = self.current_path();
                    if path.exists() {
                        fs::remove_file(path)?;
                    }
                }
            }
        }

        info!("deleted scenario {}", id);
        Ok(remaining)
    }

    /// Id of the most recently saved or selected scenario, if any
    pub fn current_id(&self) -> Option<String> {
        fs::read_to_string(self.current_path())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn set_current_id(&self, id: &str) -> Result<(), StoreError> {
        fs::write(self.current_path(), id)?;
        Ok(())
    }

    /// The current scenario, if a marker exists and still resolves
    pub fn current(&self) -> Result<Option<Scenario>, StoreError> {
        match self.current_id() {
            Some(id) => self.get(&id),
            None => Ok(None),
        }
    }

    /// Remove every saved scenario and the current marker
    pub fn clear(&self) -> Result<(), StoreError> {
        for path in [self.scenarios_path(), self.current_path()] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

/// Shape tolerated on import: `data` is required, everything else optional.
/// Ids and timestamps in the file are discarded so an imported scenario never
/// collides with an existing one.
#[derive(Deserialize)]
struct ImportedScenario {
    #[serde(default)]
    name: Option<String>,
    data: ScenarioData,
}

/// Read a scenario from an exported JSON file
pub fn import_scenario(path: &Path) -> Result<Scenario, StoreError> {
    let raw = fs::read_to_string(path)?;
    let imported: ImportedScenario =
        serde_json::from_str(&raw).map_err(StoreError::InvalidFormat)?;

    let name = match imported.name {
        Some(name) => format!("{} (imported)", name),
        None => "Imported scenario".to_string(),
    };

    debug!("imported scenario '{}' from {}", name, path.display());
    Ok(Scenario::new(name, imported.data))
}

/// Write one scenario as pretty-printed JSON
pub fn export_scenario(scenario: &Scenario, path: &Path) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(scenario).map_err(StoreError::InvalidFormat)?;
    fs::write(path, json)?;
    Ok(())
}

/// Default export filename: `{name}_{YYYY-MM-DD}.json`
pub fn default_export_filename(scenario: &Scenario) -> String {
    format!("{}_{}.json", scenario.name, Utc::now().format("%Y-%m-%d"))
}
