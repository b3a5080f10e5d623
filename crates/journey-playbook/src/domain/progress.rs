//! Node-state progression and the journey view model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kind::{NodeKind, derive_node_kind};
use super::locale::localize;
use super::model::Playbook;

/// Upper bound on unlock passes; prerequisite chains are short in practice.
const MAX_UNLOCK_PASSES: usize = 100;

/// Lifecycle state of a node for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Locked,
    Active,
    Submitted,
    Waiting,
    NeedsFixes,
    Done,
}

/// Unlocks nodes whose prerequisites are all `done`.
///
/// Starts from `raw` and repeats passes until nothing changes. A node absent
/// from `raw` counts as locked; only nodes that transition are added.
#[must_use]
pub fn compute_node_states(
    playbook: &Playbook,
    raw: &BTreeMap<String, NodeState>,
) -> BTreeMap<String, NodeState> {
    let mut computed = raw.clone();

    for _ in 0..MAX_UNLOCK_PASSES {
        let mut changed = false;
        for node in playbook.worlds.iter().flat_map(|w| w.nodes.iter()) {
            let current = computed.get(&node.id).copied().unwrap_or_default();
            if current != NodeState::Locked {
                continue;
            }
            let prereqs_done = node
                .prerequisites
                .iter()
                .all(|p| computed.get(p) == Some(&NodeState::Done));
            if prereqs_done {
                computed.insert(node.id.clone(), NodeState::Active);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    computed
}

/// A node as shown on the journey map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: String,
    pub world_id: String,
    pub title: String,
    pub kind: NodeKind,
    pub state: NodeState,
}

/// A world as shown on the journey map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldView {
    pub id: String,
    pub title: String,
    pub nodes: Vec<NodeView>,
}

/// The whole journey for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyView {
    pub worlds: Vec<WorldView>,
}

/// Builds the journey view: worlds sorted by `order` (stable on ties), titles
/// resolved for `lang`, states computed from `raw`.
#[must_use]
pub fn to_view_model(
    playbook: &Playbook,
    raw: &BTreeMap<String, NodeState>,
    lang: &str,
) -> JourneyView {
    let states = compute_node_states(playbook, raw);

    let mut ordered: Vec<_> = playbook.worlds.iter().collect();
    ordered.sort_by_key(|w| w.order);

    let worlds = ordered
        .into_iter()
        .map(|w| WorldView {
            id: w.id.clone(),
            title: localize(w.title.as_ref(), lang, &w.id),
            nodes: w
                .nodes
                .iter()
                .map(|n| NodeView {
                    id: n.id.clone(),
                    world_id: w.id.clone(),
                    title: localize(n.title.as_ref(), lang, &n.id),
                    kind: derive_node_kind(n),
                    state: states.get(&n.id).copied().unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    JourneyView { worlds }
}

/// Done/total counts across a set of worlds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub done: usize,
    /// Percentage in `0.0..=100.0`; zero for an empty journey.
    pub percent: f64,
}

/// Summarizes completion over `worlds`.
#[must_use]
pub fn progress(worlds: &[WorldView]) -> ProgressSummary {
    let (total, done) = worlds
        .iter()
        .flat_map(|w| w.nodes.iter())
        .fold((0usize, 0usize), |(total, done), n| {
            (total + 1, done + usize::from(n.state == NodeState::Done))
        });
    #[allow(clippy::cast_precision_loss)]
    let percent = if total > 0 {
        done as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    ProgressSummary {
        total,
        done,
        percent,
    }
}
