//! Node classification used to pick a rendering strategy.

use serde::{Deserialize, Serialize};

use super::model::{INFO_NODE_TYPE, NodeDef};

/// UI kind derived from a node's type and field shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// A regular form with mixed inputs.
    FormEntry,
    /// Mostly checkboxes, at least one of them required.
    Checklist,
    /// Laid out as cards, by explicit hint.
    Cards,
    /// Read-only informational step.
    Info,
}

/// Interaction a node asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Form,
    Upload,
    Outcome,
    Wait,
    External,
    Gateway,
    /// Outcome and upload on a single screen.
    Composite,
}

impl ActionKind {
    /// Parses an authored `actionHints` entry; `None` for unknown hints.
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "form" => Some(Self::Form),
            "upload" => Some(Self::Upload),
            "outcome" => Some(Self::Outcome),
            "wait" => Some(Self::Wait),
            "external" => Some(Self::External),
            "gateway" => Some(Self::Gateway),
            "composite" => Some(Self::Composite),
            _ => None,
        }
    }
}

/// Node types that always carry an outcome decision.
const OUTCOME_NODE_TYPES: [&str; 3] = ["decision", "meeting", "boss"];

/// Derives the UI kind of a node. First match wins:
///
/// 1. `type == "info"` is [`NodeKind::Info`].
/// 2. A truthy `cards_layout` hint is [`NodeKind::Cards`].
/// 3. At least `max(1, floor(0.6 * fields))` boolean fields with at least one
///    of them required is [`NodeKind::Checklist`].
/// 4. Anything else is [`NodeKind::FormEntry`].
#[must_use]
pub fn derive_node_kind(node: &NodeDef) -> NodeKind {
    if node.is_type(INFO_NODE_TYPE) {
        return NodeKind::Info;
    }

    if node.ui_hints().cards_layout {
        return NodeKind::Cards;
    }

    let fields = node.fields();
    if !fields.is_empty() {
        let bools = fields.iter().filter(|f| f.is_boolean());
        let (bool_count, required_count) =
            bools.fold((0usize, 0usize), |(all, required), field| {
                (all + 1, required + usize::from(field.required))
            });
        // floor(len * 0.6) in exact integer arithmetic
        let threshold = (fields.len() * 3 / 5).max(1);
        if bool_count >= threshold && required_count > 0 {
            return NodeKind::Checklist;
        }
    }

    NodeKind::FormEntry
}

/// Detects which interactions a node needs, in a stable order.
///
/// Informational nodes and nodes without any detectable action are treated
/// as read-only gateways. Recognized `actionHints` win over detection.
#[must_use]
pub fn detect_action_kinds(node: &NodeDef) -> Vec<ActionKind> {
    if node.is_type(INFO_NODE_TYPE) {
        return vec![ActionKind::Gateway];
    }

    let hints = node.action_hints();
    if !hints.is_empty() {
        return hints;
    }

    let node_type = node.node_type.as_deref().unwrap_or_default();
    let has_outcomes = !node.outcomes.is_empty() || OUTCOME_NODE_TYPES.contains(&node_type);

    let mut kinds = Vec::new();
    if !node.fields().is_empty() {
        kinds.push(ActionKind::Form);
    }
    if !node.uploads().is_empty() {
        kinds.push(ActionKind::Upload);
    }
    if has_outcomes {
        kinds.push(ActionKind::Outcome);
    }
    if node.timer.is_some() || node_type == "waiting" {
        kinds.push(ActionKind::Wait);
    }
    if node_type == "external" {
        kinds.push(ActionKind::External);
    }
    if node_type == "gateway" {
        kinds.push(ActionKind::Gateway);
    }

    if kinds.contains(&ActionKind::Outcome) && kinds.contains(&ActionKind::Upload) {
        return vec![ActionKind::Composite];
    }

    if kinds.is_empty() {
        kinds.push(ActionKind::Gateway);
    }
    kinds
}
