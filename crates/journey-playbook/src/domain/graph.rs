//! Derived views over the world/node graph.
//!
//! All functions here are pure scans over an immutable [`Playbook`]. Edges
//! pointing at unknown node ids are tolerated and never treated as leaving
//! a world; `validation` reports them separately.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::model::{NodeDef, Playbook};

/// A world's id together with its node list, borrowed from the playbook.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorldNodes<'a> {
    pub id: &'a str,
    pub nodes: &'a [NodeDef],
}

/// Returns every world in declared order with its nodes.
#[must_use]
pub fn worlds(playbook: &Playbook) -> Vec<WorldNodes<'_>> {
    playbook
        .worlds
        .iter()
        .map(|w| WorldNodes {
            id: w.id.as_str(),
            nodes: w.nodes.as_slice(),
        })
        .collect()
}

/// Builds the reverse lookup from node id to owning world id. Later
/// definitions of a duplicated node id win.
#[must_use]
pub fn node_world_lookup(playbook: &Playbook) -> HashMap<&str, &str> {
    playbook
        .worlds
        .iter()
        .flat_map(|w| w.nodes.iter().map(move |n| (n.id.as_str(), w.id.as_str())))
        .collect()
}

/// Returns, for every world, the ids of its terminal nodes in declaration
/// order.
///
/// A node is terminal when its `next` list is empty, or when at least one
/// `next` id belongs to a different world.
#[must_use]
pub fn detect_terminal_node_ids(playbook: &Playbook) -> BTreeMap<&str, Vec<&str>> {
    let lookup = node_world_lookup(playbook);

    let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for world in &playbook.worlds {
        let terminals = out.entry(world.id.as_str()).or_default();
        for node in &world.nodes {
            let leaves_world = node
                .next
                .iter()
                .any(|id| lookup.get(id.as_str()).is_some_and(|w| *w != world.id));
            if node.next.is_empty() || leaves_world {
                terminals.push(node.id.as_str());
            }
        }
    }
    out
}

/// Returns the first node id of the world following `world_id`.
///
/// `None` when the world is unknown, is the last one, or the following world
/// has no nodes.
#[must_use]
pub fn first_node_id_of_next_world<'a>(playbook: &'a Playbook, world_id: &str) -> Option<&'a str> {
    let index = playbook.worlds.iter().position(|w| w.id == world_id)?;
    playbook
        .worlds
        .get(index + 1)?
        .nodes
        .first()
        .map(|n| n.id.as_str())
}

/// Why an edge exists between two nodes of the same world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// From a prerequisite to the node that requires it.
    Default,
    /// A `next` edge on a node gated by a condition.
    Conditional,
    /// From a decision node to the target of one of its outcomes.
    Outcome,
}

/// A directed edge for drawing a world map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub kind: EdgeKind,
}

/// Computes the intra-world edges of `world_id`. Edges crossing into other
/// worlds are dropped. Unknown worlds yield no edges.
#[must_use]
pub fn edges_for_world<'a>(playbook: &'a Playbook, world_id: &str) -> Vec<Edge<'a>> {
    let Some(world) = playbook.world(world_id) else {
        return Vec::new();
    };
    let ids: HashSet<&str> = world.nodes.iter().map(|n| n.id.as_str()).collect();

    let mut edges = Vec::new();
    for node in &world.nodes {
        for prereq in &node.prerequisites {
            if ids.contains(prereq.as_str()) {
                edges.push(Edge {
                    from: prereq,
                    to: &node.id,
                    kind: EdgeKind::Default,
                });
            }
        }
        for target in node.outcomes.iter().flat_map(|o| o.next.iter()) {
            if ids.contains(target.as_str()) {
                edges.push(Edge {
                    from: &node.id,
                    to: target,
                    kind: EdgeKind::Outcome,
                });
            }
        }
        if node.condition.is_some() {
            for target in &node.next {
                if ids.contains(target.as_str()) {
                    edges.push(Edge {
                        from: &node.id,
                        to: target,
                        kind: EdgeKind::Conditional,
                    });
                }
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_world_playbook() -> Playbook {
        serde_json::from_value(json!({
            "playbook_id": "test",
            "version": "1",
            "worlds": [
                { "id": "W1", "nodes": [
                    { "id": "n1", "next": [] },
                    { "id": "n2", "next": ["n3"] }
                ]},
                { "id": "W2", "nodes": [
                    { "id": "n3", "next": [] }
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_worlds_preserves_order_and_borrows_node_lists() {
        // Arrange
        let playbook = two_world_playbook();

        // Act
        let worlds = worlds(&playbook);

        // Assert
        assert_eq!(worlds.len(), playbook.worlds.len());
        for (view, world) in worlds.iter().zip(&playbook.worlds) {
            assert_eq!(view.id, world.id);
            assert!(std::ptr::eq(view.nodes, world.nodes.as_slice()));
        }
    }

    #[test]
    fn test_detect_terminal_node_ids_two_world_scenario() {
        // Arrange
        let playbook = two_world_playbook();

        // Act
        let terminals = detect_terminal_node_ids(&playbook);

        // Assert
        assert_eq!(terminals.len(), 2);
        assert_eq!(terminals["W1"], vec!["n1", "n2"]);
        assert_eq!(terminals["W2"], vec!["n3"]);
    }

    #[test]
    fn test_intra_world_next_is_not_terminal() {
        // Arrange
        let playbook: Playbook = serde_json::from_value(json!({
            "worlds": [{ "id": "W1", "nodes": [
                { "id": "a", "next": ["b", "c"] },
                { "id": "b", "next": ["c"] },
                { "id": "c" }
            ]}]
        }))
        .unwrap();

        // Act
        let terminals = detect_terminal_node_ids(&playbook);

        // Assert
        assert_eq!(terminals["W1"], vec!["c"]);
    }

    #[test]
    fn test_one_cross_world_target_among_local_ones_is_terminal() {
        let playbook: Playbook = serde_json::from_value(json!({
            "worlds": [
                { "id": "W1", "nodes": [
                    { "id": "a", "next": ["b", "x"] },
                    { "id": "b", "next": ["a"] }
                ]},
                { "id": "W2", "nodes": [{ "id": "x", "next": ["y"] }, { "id": "y" }] }
            ]
        }))
        .unwrap();

        let terminals = detect_terminal_node_ids(&playbook);

        assert_eq!(terminals["W1"], vec!["a"]);
        assert_eq!(terminals["W2"], vec!["y"]);
    }

    #[test]
    fn test_dangling_next_ids_are_ignored() {
        let playbook: Playbook = serde_json::from_value(json!({
            "worlds": [{ "id": "W1", "nodes": [
                { "id": "a", "next": ["ghost"] },
                { "id": "b", "next": ["a", "ghost"] }
            ]}]
        }))
        .unwrap();

        let terminals = detect_terminal_node_ids(&playbook);

        assert!(terminals["W1"].is_empty());
    }

    #[test]
    fn test_null_next_is_terminal() {
        let playbook: Playbook = serde_json::from_value(json!({
            "worlds": [{ "id": "W1", "nodes": [
                { "id": "a", "next": ["b"], "prerequisites": null },
                { "id": "b", "next": null, "prerequisites": null }
            ]}]
        }))
        .unwrap();

        let terminals = detect_terminal_node_ids(&playbook);

        assert_eq!(terminals["W1"], vec!["b"]);
    }

    #[test]
    fn test_world_without_terminals_still_has_a_key() {
        let playbook: Playbook = serde_json::from_value(json!({
            "worlds": [
                { "id": "W1", "nodes": [] },
                { "id": "W2", "nodes": [{ "id": "a", "next": ["a"] }] }
            ]
        }))
        .unwrap();

        let terminals = detect_terminal_node_ids(&playbook);

        assert_eq!(terminals.get("W1"), Some(&Vec::new()));
        assert_eq!(terminals.get("W2"), Some(&Vec::new()));
    }

    #[test]
    fn test_first_node_id_of_next_world() {
        let playbook = two_world_playbook();

        assert_eq!(first_node_id_of_next_world(&playbook, "W1"), Some("n3"));
        assert_eq!(first_node_id_of_next_world(&playbook, "W2"), None);
        assert_eq!(first_node_id_of_next_world(&playbook, "nonexistent"), None);
    }

    #[test]
    fn test_first_node_id_of_next_world_is_none_when_following_world_is_empty() {
        let playbook: Playbook = serde_json::from_value(json!({
            "worlds": [
                { "id": "W1", "nodes": [{ "id": "a" }] },
                { "id": "W2", "nodes": [] },
                { "id": "W3", "nodes": [{ "id": "z" }] }
            ]
        }))
        .unwrap();

        assert_eq!(first_node_id_of_next_world(&playbook, "W1"), None);
        assert_eq!(first_node_id_of_next_world(&playbook, "W2"), Some("z"));
    }

    #[test]
    fn test_edges_for_world_collects_prerequisite_outcome_and_conditional_edges() {
        // Arrange
        let playbook: Playbook = serde_json::from_value(json!({
            "worlds": [
                { "id": "W1", "nodes": [
                    { "id": "a", "next": ["b"] },
                    { "id": "b", "prerequisites": ["a"],
                      "outcomes": [
                        { "value": "pass", "next": ["c"] },
                        { "value": "fail", "next": ["x"] }
                      ] },
                    { "id": "c", "condition": "rp_required", "next": ["d", "x"] },
                    { "id": "d" }
                ]},
                { "id": "W2", "nodes": [{ "id": "x" }] }
            ]
        }))
        .unwrap();

        // Act
        let edges = edges_for_world(&playbook, "W1");

        // Assert
        assert_eq!(
            edges,
            vec![
                Edge { from: "a", to: "b", kind: EdgeKind::Default },
                Edge { from: "b", to: "c", kind: EdgeKind::Outcome },
                Edge { from: "c", to: "d", kind: EdgeKind::Conditional },
            ]
        );
        assert!(edges_for_world(&playbook, "W9").is_empty());
    }
}
