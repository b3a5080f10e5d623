//! Query handlers for the playbook context.
//!
//! This module turns the loaded playbook into read-only view DTOs. Lookups
//! of unknown ids fail with `DomainError`; every other derivation is total.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use journey_core::clock::Clock;
use journey_core::error::DomainError;
use serde::Serialize;

use crate::application::ingest::LoadedPlaybook;
use crate::domain::graph::{self, Edge};
use crate::domain::kind::{ActionKind, NodeKind, derive_node_kind, detect_action_kinds};
use crate::domain::locale::localize;
use crate::domain::progress::{self, NodeState, ProgressSummary, WorldView};
use crate::domain::timer;

/// Read-only summary of the loaded playbook.
#[derive(Debug, Serialize)]
pub struct PlaybookSummaryView {
    pub playbook_id: String,
    pub version: String,
    /// Lowercase hex SHA-256 of the source document.
    pub checksum: String,
    pub locale_default: String,
    pub world_count: usize,
    pub node_count: usize,
}

/// A world and the ids of its nodes, in declared order.
#[derive(Debug, Serialize)]
pub struct WorldSummaryView {
    pub id: String,
    pub node_ids: Vec<String>,
}

/// Entry point of the world after `world_id`.
#[derive(Debug, Serialize)]
pub struct NextEntryView {
    pub world_id: String,
    /// `None` at the end of the journey or before an empty world.
    pub next_node_id: Option<String>,
}

/// Classification and timing of a single node.
#[derive(Debug, Serialize)]
pub struct NodeDetailView {
    pub id: String,
    pub world_id: String,
    pub title: String,
    pub kind: NodeKind,
    pub action_kinds: Vec<ActionKind>,
    pub deadline: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
}

/// One student's journey map with overall progress.
#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    pub worlds: Vec<WorldView>,
    pub progress: ProgressSummary,
}

/// Returns the playbook summary. `fallback_locale` applies when the
/// playbook declares no default locale.
#[must_use]
pub fn get_playbook_summary(loaded: &LoadedPlaybook, fallback_locale: &str) -> PlaybookSummaryView {
    let playbook = loaded.playbook();
    PlaybookSummaryView {
        playbook_id: playbook.playbook_id.clone(),
        version: playbook.version.clone(),
        checksum: loaded.checksum().to_owned(),
        locale_default: playbook
            .locale_default
            .clone()
            .unwrap_or_else(|| fallback_locale.to_owned()),
        world_count: playbook.worlds.len(),
        node_count: loaded.node_count(),
    }
}

/// Lists every world with its node ids.
#[must_use]
pub fn list_worlds(loaded: &LoadedPlaybook) -> Vec<WorldSummaryView> {
    graph::worlds(loaded.playbook())
        .into_iter()
        .map(|w| WorldSummaryView {
            id: w.id.to_owned(),
            node_ids: w.nodes.iter().map(|n| n.id.clone()).collect(),
        })
        .collect()
}

/// Terminal node ids per world.
#[must_use]
pub fn get_terminal_node_ids(loaded: &LoadedPlaybook) -> BTreeMap<&str, Vec<&str>> {
    graph::detect_terminal_node_ids(loaded.playbook())
}

/// Resolves the entry node of the world following `world_id`.
///
/// # Errors
///
/// Returns `DomainError::WorldNotFound` if no world has that id.
pub fn get_next_entry(loaded: &LoadedPlaybook, world_id: &str) -> Result<NextEntryView, DomainError> {
    ensure_world(loaded, world_id)?;
    Ok(NextEntryView {
        world_id: world_id.to_owned(),
        next_node_id: graph::first_node_id_of_next_world(loaded.playbook(), world_id)
            .map(str::to_owned),
    })
}

/// Intra-world edges of `world_id`.
///
/// # Errors
///
/// Returns `DomainError::WorldNotFound` if no world has that id.
pub fn get_world_edges<'a>(
    loaded: &'a LoadedPlaybook,
    world_id: &str,
) -> Result<Vec<Edge<'a>>, DomainError> {
    ensure_world(loaded, world_id)?;
    Ok(graph::edges_for_world(loaded.playbook(), world_id))
}

/// Classification, localized title and timer status of a node.
///
/// # Errors
///
/// Returns `DomainError::NodeNotFound` if no node has that id.
pub fn get_node_detail(
    loaded: &LoadedPlaybook,
    node_id: &str,
    lang: &str,
    clock: &dyn Clock,
) -> Result<NodeDetailView, DomainError> {
    let node = loaded
        .node(node_id)
        .ok_or_else(|| DomainError::NodeNotFound(node_id.to_owned()))?;
    let world_id = loaded.node_world_id(node_id).unwrap_or_default();

    Ok(NodeDetailView {
        id: node.id.clone(),
        world_id: world_id.to_owned(),
        title: localize(node.title.as_ref(), lang, &node.id),
        kind: derive_node_kind(node),
        action_kinds: detect_action_kinds(node),
        deadline: node.timer.as_ref().and_then(timer::timer_deadline),
        days_remaining: node
            .timer
            .as_ref()
            .and_then(|t| timer::days_remaining(t, clock)),
    })
}

/// Builds the journey map for the given raw node states.
#[must_use]
pub fn build_journey(
    loaded: &LoadedPlaybook,
    states: &BTreeMap<String, NodeState>,
    lang: &str,
) -> JourneyResponse {
    let view = progress::to_view_model(loaded.playbook(), states, lang);
    let progress = progress::progress(&view.worlds);
    JourneyResponse {
        worlds: view.worlds,
        progress,
    }
}

fn ensure_world(loaded: &LoadedPlaybook, world_id: &str) -> Result<(), DomainError> {
    if loaded.playbook().world(world_id).is_none() {
        return Err(DomainError::WorldNotFound(world_id.to_owned()));
    }
    Ok(())
}
