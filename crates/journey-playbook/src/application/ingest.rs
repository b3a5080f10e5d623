//! Playbook ingestion: parse, fingerprint, and index a playbook document.
//!
//! The loaded playbook is immutable, so the node index is built once here
//! and shared by every query.

use std::collections::HashMap;
use std::path::Path;

use journey_core::error::DomainError;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::domain::model::{NodeDef, Playbook};
use crate::domain::validation::{ValidationReport, validate_playbook};

/// Serialization format of a playbook document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Picks the format from a file extension; `.yaml`/`.yml` are YAML,
    /// everything else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// A parsed playbook together with its checksum and lookup index.
#[derive(Debug, Clone)]
pub struct LoadedPlaybook {
    playbook: Playbook,
    checksum: String,
    /// node id → (world index, node index); later duplicates win.
    positions: HashMap<String, (usize, usize)>,
}

impl LoadedPlaybook {
    /// Indexes an already parsed playbook. `checksum` identifies the source
    /// document the playbook came from.
    #[must_use]
    pub fn new(playbook: Playbook, checksum: String) -> Self {
        let mut positions = HashMap::with_capacity(playbook.node_count());
        for (wi, world) in playbook.worlds.iter().enumerate() {
            for (ni, node) in world.nodes.iter().enumerate() {
                positions.insert(node.id.clone(), (wi, ni));
            }
        }
        Self {
            playbook,
            checksum,
            positions,
        }
    }

    #[must_use]
    pub fn playbook(&self) -> &Playbook {
        &self.playbook
    }

    /// Lowercase hex SHA-256 of the source document.
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Number of distinct node ids.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Looks up a node definition by id.
    #[must_use]
    pub fn node(&self, node_id: &str) -> Option<&NodeDef> {
        let &(wi, ni) = self.positions.get(node_id)?;
        Some(&self.playbook.worlds[wi].nodes[ni])
    }

    /// Returns the id of the world owning `node_id`.
    #[must_use]
    pub fn node_world_id(&self, node_id: &str) -> Option<&str> {
        let &(wi, _) = self.positions.get(node_id)?;
        Some(self.playbook.worlds[wi].id.as_str())
    }

    /// Node ids of `world_id` in declaration order.
    #[must_use]
    pub fn node_ids_in_world(&self, world_id: &str) -> Vec<&str> {
        self.playbook
            .worlds
            .iter()
            .filter(|w| w.id == world_id)
            .flat_map(|w| w.nodes.iter().map(|n| n.id.as_str()))
            .collect()
    }

    /// Runs the authoring checks over the loaded playbook.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validate_playbook(&self.playbook)
    }
}

/// Computes the lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn checksum_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Parses and indexes a playbook document.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the document cannot be parsed.
pub fn ingest_playbook(source: &str, format: SourceFormat) -> Result<LoadedPlaybook, DomainError> {
    let playbook: Playbook = match format {
        SourceFormat::Json => serde_json::from_str(source)
            .map_err(|e| DomainError::Validation(format!("playbook JSON parse failed: {e}")))?,
        SourceFormat::Yaml => serde_yaml::from_str(source)
            .map_err(|e| DomainError::Validation(format!("playbook YAML parse failed: {e}")))?,
    };

    let loaded = LoadedPlaybook::new(playbook, checksum_hex(source.as_bytes()));
    info!(
        playbook_id = %loaded.playbook.playbook_id,
        version = %loaded.playbook.version,
        checksum = %loaded.checksum,
        worlds = loaded.playbook.worlds.len(),
        nodes = loaded.node_count(),
        "playbook ingested"
    );
    Ok(loaded)
}

/// Reads a playbook file, choosing the format from its extension, and logs
/// every authoring issue found.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read and
/// `DomainError::Validation` if it cannot be parsed.
pub fn load_playbook(path: &Path) -> Result<LoadedPlaybook, DomainError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Infrastructure(format!("read playbook {}: {e}", path.display()))
    })?;
    let loaded = ingest_playbook(&source, SourceFormat::from_path(path))?;

    for issue in loaded.validate().issues {
        warn!(%issue, "playbook authoring issue");
    }
    Ok(loaded)
}
