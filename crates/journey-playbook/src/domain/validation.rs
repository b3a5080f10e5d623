//! Authoring checks for playbook documents.
//!
//! The graph derivations tolerate dangling references silently. This pass
//! surfaces them, along with duplicate ids and unrecognized action hints,
//! without ever rejecting the playbook.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::kind::ActionKind;
use super::model::Playbook;

/// A single authoring problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    DuplicateWorldId {
        world_id: String,
    },
    DuplicateNodeId {
        node_id: String,
        world_id: String,
    },
    DanglingNext {
        node_id: String,
        target: String,
    },
    DanglingPrerequisite {
        node_id: String,
        target: String,
    },
    DanglingOutcomeNext {
        node_id: String,
        outcome: String,
        target: String,
    },
    UnknownActionHint {
        node_id: String,
        hint: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateWorldId { world_id } => write!(f, "duplicate world id {world_id}"),
            Self::DuplicateNodeId { node_id, world_id } => {
                write!(f, "duplicate node id {node_id} in world {world_id}")
            }
            Self::DanglingNext { node_id, target } => {
                write!(f, "node {node_id} has next edge to unknown node {target}")
            }
            Self::DanglingPrerequisite { node_id, target } => {
                write!(f, "node {node_id} requires unknown node {target}")
            }
            Self::DanglingOutcomeNext {
                node_id,
                outcome,
                target,
            } => write!(
                f,
                "outcome {outcome} of node {node_id} leads to unknown node {target}"
            ),
            Self::UnknownActionHint { node_id, hint } => {
                write!(f, "node {node_id} has unknown action hint {hint}")
            }
        }
    }
}

/// Result of [`validate_playbook`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when no issue was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Checks id uniqueness and reference integrity.
///
/// Duplicates are reported as they are encountered while walking worlds and
/// nodes in declared order; dangling references follow, per node, in the
/// order `next`, prerequisites, outcomes, with unknown action hints last.
#[must_use]
pub fn validate_playbook(playbook: &Playbook) -> ValidationReport {
    let mut issues = Vec::new();

    let mut world_ids = HashSet::new();
    let mut node_ids = HashSet::new();
    for world in &playbook.worlds {
        if !world_ids.insert(world.id.as_str()) {
            issues.push(ValidationIssue::DuplicateWorldId {
                world_id: world.id.clone(),
            });
        }
        for node in &world.nodes {
            if !node_ids.insert(node.id.as_str()) {
                issues.push(ValidationIssue::DuplicateNodeId {
                    node_id: node.id.clone(),
                    world_id: world.id.clone(),
                });
            }
        }
    }

    for node in playbook.worlds.iter().flat_map(|w| w.nodes.iter()) {
        let unknown = |id: &str| !node_ids.contains(id);

        issues.extend(node.next.iter().filter(|t| unknown(t.as_str())).map(|t| {
            ValidationIssue::DanglingNext {
                node_id: node.id.clone(),
                target: t.clone(),
            }
        }));
        issues.extend(node.prerequisites.iter().filter(|t| unknown(t.as_str())).map(|t| {
            ValidationIssue::DanglingPrerequisite {
                node_id: node.id.clone(),
                target: t.clone(),
            }
        }));
        for outcome in &node.outcomes {
            issues.extend(outcome.next.iter().filter(|t| unknown(t.as_str())).map(|t| {
                ValidationIssue::DanglingOutcomeNext {
                    node_id: node.id.clone(),
                    outcome: outcome.value.clone(),
                    target: t.clone(),
                }
            }));
        }
        issues.extend(
            node.action_hints
                .iter()
                .filter(|h| ActionKind::from_hint(h).is_none())
                .map(|h| ValidationIssue::UnknownActionHint {
                    node_id: node.id.clone(),
                    hint: h.clone(),
                }),
        );
    }

    ValidationReport { issues }
}
