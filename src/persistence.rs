//! Flock export/import.
//!
//! Serializes the registry for the offline cache: a versioned JSON document
//! for the sync layer and a compact bincode snapshot for local storage.
//! Parent pointers travel as plain ids, so restore is a single pass; a
//! pointer to a record missing from the export is kept as-is (the read-time
//! traversal bounds handle it) and counted as dangling.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::components::{FowlSnapshot, HatchDate, LineageVerified};
use crate::error::{GenealogyError, Result};
use crate::registry::FowlRegistry;

const EXPORT_VERSION: u8 = 1;

/// Complete registry state for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlockExport {
    /// Schema version for forward compatibility
    pub version: u8,
    pub next_fowl_id: u64,
    pub fowl: Vec<FowlSnapshot>,
}

/// Result of an import operation.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub records: usize,
    pub linked_parents: usize,
    pub dangling_parents: usize,
}

impl FowlRegistry {
    fn export_data(&self) -> FlockExport {
        FlockExport {
            version: EXPORT_VERSION,
            next_fowl_id: self.next_fowl_id,
            fowl: self.all(),
        }
    }

    /// Export the entire registry to a JSON string.
    pub fn export_flock(&self) -> String {
        serde_json::to_string(&self.export_data()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Import registry state from JSON, replacing current contents.
    pub fn import_flock(&mut self, json: &str) -> Result<ImportSummary> {
        let data: FlockExport = serde_json::from_str(json)
            .map_err(|e| GenealogyError::Snapshot(format!("JSON parse error: {e}")))?;
        self.apply_import(data)
    }

    /// Compact binary snapshot of the registry.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.export_data())
            .map_err(|e| GenealogyError::Snapshot(e.to_string()))
    }

    /// Restore from a binary snapshot, replacing current contents.
    pub fn restore_bytes(&mut self, bytes: &[u8]) -> Result<ImportSummary> {
        let data: FlockExport = bincode::deserialize(bytes)
            .map_err(|e| GenealogyError::Snapshot(e.to_string()))?;
        self.apply_import(data)
    }

    fn apply_import(&mut self, data: FlockExport) -> Result<ImportSummary> {
        if data.version != EXPORT_VERSION {
            return Err(GenealogyError::Snapshot(format!(
                "unsupported export version: {}",
                data.version
            )));
        }

        self.world.clear();
        self.index.clear();

        let known: HashSet<_> = data.fowl.iter().map(|s| s.id).collect();
        let mut linked = 0usize;
        let mut dangling = 0usize;
        let mut max_id = 0u64;

        for snap in &data.fowl {
            for parent in snap.lineage().parents() {
                if known.contains(&parent) {
                    linked += 1;
                } else {
                    warn!(
                        child = snap.id.0,
                        parent = parent.0,
                        "imported record points at a parent missing from the export"
                    );
                    dangling += 1;
                }
            }
            max_id = max_id.max(snap.id.0);

            let entity = self.world.spawn((
                crate::components::Fowl {
                    id: snap.id,
                    name: snap.name.clone(),
                    breed: snap.breed.clone(),
                },
                snap.sex,
                HatchDate(snap.hatch_date),
                snap.lineage(),
                snap.owner,
                snap.traits.clone(),
                snap.status,
            ));
            if snap.lineage_verified {
                let _ = self.world.insert_one(entity, LineageVerified);
            }
            self.index.insert(snap.id, entity);
        }

        // Guard against exports written before the counter was bumped
        self.next_fowl_id = data.next_fowl_id.max(max_id + 1);

        Ok(ImportSummary {
            records: data.fowl.len(),
            linked_parents: linked,
            dangling_parents: dangling,
        })
    }
}
