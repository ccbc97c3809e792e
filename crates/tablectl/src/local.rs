//! File-backed table admin used when driving the examples without a real
//! Tablestore endpoint.
//!
//! Each `<project>.<instance>` pair gets one JSON state file holding the
//! table list, so separate invocations of the binary observe each other's
//! tables the way they would against the emulator.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use tablectl_core::{CoreError, Result, TableAdmin};

/// Overrides where the state files live; defaults to `tablectl/` under the
/// OS temp directory.
pub const STATE_DIR_VAR: &str = "TABLECTL_STATE_DIR";

#[derive(Debug, Serialize, Deserialize, Default)]
struct StateFile {
    tables: Vec<String>,
}

pub struct LocalTableAdmin {
    state_path: PathBuf,
}

impl LocalTableAdmin {
    pub fn open(project_id: &str, instance_id: &str) -> Result<Self> {
        let dir = std::env::var(STATE_DIR_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("tablectl"));
        Self::open_in(&dir, project_id, instance_id)
    }

    pub fn open_in(dir: &Path, project_id: &str, instance_id: &str) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            state_path: dir.join(format!("{project_id}.{instance_id}.json")),
        })
    }

    fn load(&self) -> Result<StateFile> {
        if !self.state_path.exists() {
            return Ok(StateFile::default());
        }
        let content = fs::read_to_string(&self.state_path)?;
        serde_json::from_str(&content).map_err(|err| {
            CoreError::Backend(format!(
                "state file {} is not valid JSON: {err}",
                self.state_path.display()
            ))
        })
    }

    fn store(&self, state: &StateFile) -> Result<()> {
        let content = serde_json::to_string_pretty(state)
            .map_err(|err| CoreError::Backend(format!("encoding state file: {err}")))?;
        fs::write(&self.state_path, content)?;
        Ok(())
    }
}

impl TableAdmin for LocalTableAdmin {
    fn create_table(&self, name: &str) -> Result<()> {
        let mut state = self.load()?;
        if state.tables.iter().any(|t| t == name) {
            return Err(CoreError::TableAlreadyExists(name.to_string()));
        }
        debug!("creating table '{name}' in {}", self.state_path.display());
        state.tables.push(name.to_string());
        state.tables.sort();
        self.store(&state)
    }

    fn list_table_names(&self) -> Result<Vec<String>> {
        Ok(self.load()?.tables)
    }

    fn delete_table(&self, name: &str) -> Result<()> {
        let mut state = self.load()?;
        let Some(index) = state.tables.iter().position(|t| t == name) else {
            return Err(CoreError::TableNotFound(name.to_string()));
        };
        debug!("deleting table '{name}' from {}", self.state_path.display());
        state.tables.remove(index);
        self.store(&state)
    }
}
