//! Playbook document model.
//!
//! These types mirror the playbook JSON/YAML document. Every collection and
//! optional block defaults to empty when absent or `null`, and unknown keys
//! are ignored, so partially authored playbooks still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kind::ActionKind;
use super::lenient::{null_as_default, truthy};

/// Node type that marks a read-only informational step.
pub const INFO_NODE_TYPE: &str = "info";

/// Field type rendered as a checkbox.
pub const BOOLEAN_FIELD_TYPE: &str = "boolean";

/// Human-readable text: a bare string, a list of lines, or a per-locale map
/// whose values are either (`{"ru": "...", "en": ["...", "..."]}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// A single string used for every locale.
    Plain(String),
    /// Lines used for every locale, rendered newline-joined.
    Lines(Vec<String>),
    /// Entries keyed by locale code.
    ByLocale(BTreeMap<String, LocaleText>),
}

/// The text stored under one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleText {
    Text(String),
    Lines(Vec<String>),
}

impl LocaleText {
    /// The text as a single string; lines are joined with `\n`.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Lines(lines) => lines.join("\n"),
        }
    }
}

impl From<&str> for LocaleText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// The full ordered configuration of a guided journey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playbook {
    /// Stable identifier of the playbook.
    #[serde(deserialize_with = "null_as_default")]
    pub playbook_id: String,
    /// Author-assigned version string.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Locale used when a request names none.
    pub locale_default: Option<String>,
    /// Worlds in journey order; the first world is the journey's start.
    #[serde(deserialize_with = "null_as_default")]
    pub worlds: Vec<World>,
    /// Roles that may complete nodes.
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<RoleDef>,
    /// Named conditions referenced by nodes.
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<ConditionDef>,
}

impl Playbook {
    /// Returns the world with the given id, if any.
    #[must_use]
    pub fn world(&self, world_id: &str) -> Option<&World> {
        self.worlds.iter().find(|w| w.id == world_id)
    }

    /// Total number of node definitions across all worlds.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.worlds.iter().map(|w| w.nodes.len()).sum()
    }
}

/// A module/chapter grouping an ordered sequence of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub title: Option<LocalizedText>,
    /// Display order; ties keep declaration order.
    #[serde(deserialize_with = "null_as_default")]
    pub order: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<NodeDef>,
}

/// A single step within a world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub title: Option<LocalizedText>,
    /// Free-form node type (`form`, `info`, `decision`, `waiting`, ...).
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub who_can_complete: Vec<String>,
    /// Node ids that must be `done` before this node unlocks.
    #[serde(deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
    /// Forward edges. An empty list marks the end of a branch.
    #[serde(deserialize_with = "null_as_default")]
    pub next: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub outcomes: Vec<Outcome>,
    /// Name of a condition gating the `next` edges.
    pub condition: Option<String>,
    pub timer: Option<Timer>,
    pub requirements: Option<Requirements>,
    #[serde(deserialize_with = "null_as_default")]
    pub outputs: Vec<OutputDef>,
    /// Explicit action classification overriding detection, as authored.
    /// See [`NodeDef::action_hints`] for the recognized subset.
    #[serde(
        rename = "actionHints",
        alias = "action_hints",
        deserialize_with = "null_as_default"
    )]
    pub action_hints: Vec<String>,
}

impl NodeDef {
    /// Returns true if the node type matches `node_type`.
    #[must_use]
    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type.as_deref() == Some(node_type)
    }

    /// Requirement fields, empty when the node declares none.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        self.requirements
            .as_ref()
            .map(|r| r.fields.as_slice())
            .unwrap_or_default()
    }

    /// Requirement uploads, empty when the node declares none.
    #[must_use]
    pub fn uploads(&self) -> &[UploadDef] {
        self.requirements
            .as_ref()
            .map(|r| r.uploads.as_slice())
            .unwrap_or_default()
    }

    /// Rendering hints; defaults when absent.
    #[must_use]
    pub fn ui_hints(&self) -> UiHints {
        self.requirements
            .as_ref()
            .and_then(|r| r.ui_hints)
            .unwrap_or_default()
    }

    /// Recognized action hints in authored order. Unknown hints are skipped
    /// here and reported by validation.
    #[must_use]
    pub fn action_hints(&self) -> Vec<ActionKind> {
        self.action_hints
            .iter()
            .filter_map(|h| ActionKind::from_hint(h))
            .collect()
    }
}

/// A branch of a decision-like node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    pub label: Option<LocalizedText>,
    #[serde(deserialize_with = "null_as_default")]
    pub next: Vec<String>,
}

/// Countdown attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timer {
    #[serde(deserialize_with = "null_as_default")]
    pub duration_days: i64,
    /// Start date, `YYYY-MM-DD` or RFC 3339.
    #[serde(deserialize_with = "null_as_default")]
    pub start_on: String,
}

/// What a node asks of the student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<FieldDef>,
    #[serde(deserialize_with = "null_as_default")]
    pub uploads: Vec<UploadDef>,
    #[serde(deserialize_with = "null_as_default")]
    pub validations: Vec<ValidationRule>,
    pub notes: Option<String>,
    /// External sub-steps.
    #[serde(deserialize_with = "null_as_default")]
    pub checklist: Vec<String>,
    pub ui_hints: Option<UiHints>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiHints {
    /// Set when the authored value is truthy; layout objects count.
    #[serde(deserialize_with = "truthy")]
    pub cards_layout: bool,
}

/// A single form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub required: bool,
    pub label: Option<LocalizedText>,
    pub placeholder: Option<LocalizedText>,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Vec<FieldOption>,
    /// Key of the free-text input backing an "other" option.
    pub other_key: Option<String>,
}

impl FieldDef {
    /// Returns true for checkbox fields.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.field_type.as_deref() == Some(BOOLEAN_FIELD_TYPE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOption {
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    pub label: Option<LocalizedText>,
}

/// A file the student must upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadDef {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mime: Vec<String>,
    #[serde(deserialize_with = "truthy")]
    pub required: bool,
    pub label: Option<LocalizedText>,
    pub accept: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRule {
    #[serde(deserialize_with = "null_as_default")]
    pub rule: String,
    pub source: Option<String>,
}

/// An artifact a node produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDef {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub output_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleDef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub label: Option<LocalizedText>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionDef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expr: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_node_defaults_optional_blocks() {
        // Arrange
        let value = json!({ "id": "n1" });

        // Act
        let node: NodeDef = serde_json::from_value(value).unwrap();

        // Assert
        assert_eq!(node.id, "n1");
        assert!(node.next.is_empty());
        assert!(node.requirements.is_none());
        assert!(node.fields().is_empty());
        assert!(!node.ui_hints().cards_layout);
        assert!(node.timer.is_none());
    }

    #[test]
    fn test_playbook_parses_nested_requirements_and_ignores_unknown_keys() {
        // Arrange
        let value = json!({
            "playbook_id": "phd",
            "version": "2.1.0",
            "locale_default": "ru",
            "unknown_top_level": true,
            "worlds": [{
                "id": "W1",
                "title": { "ru": "Подготовка", "en": "Preparation" },
                "order": 1,
                "nodes": [{
                    "id": "S1_publications_list",
                    "type": "form",
                    "next": ["S2"],
                    "timer": { "duration_days": 14, "start_on": "2026-09-01" },
                    "actionHints": ["form", "upload"],
                    "requirements": {
                        "fields": [
                            { "key": "agree", "type": "boolean", "required": true, "label": "I agree" }
                        ],
                        "ui_hints": { "cards_layout": true }
                    }
                }]
            }]
        });

        // Act
        let playbook: Playbook = serde_json::from_value(value).unwrap();

        // Assert
        assert_eq!(playbook.node_count(), 1);
        let node = &playbook.worlds[0].nodes[0];
        assert!(node.is_type("form"));
        assert_eq!(node.action_hints(), vec![ActionKind::Form, ActionKind::Upload]);
        assert!(node.ui_hints().cards_layout);
        assert!(node.fields()[0].is_boolean());
        assert_eq!(
            node.fields()[0].label,
            Some(LocalizedText::Plain("I agree".to_owned()))
        );
        assert_eq!(node.timer.as_ref().unwrap().duration_days, 14);
        assert!(playbook.world("W1").is_some());
        assert!(playbook.world("W2").is_none());
    }

    #[test]
    fn test_cards_layout_object_and_numeric_required_are_truthy() {
        // Arrange
        let value = json!({
            "id": "I2",
            "requirements": {
                "fields": [{ "key": "ok", "type": "boolean", "required": 1 }],
                "uploads": [{ "key": "scan", "required": 0 }],
                "ui_hints": { "cards_layout": { "style": "stacked", "card_variant": "info" } }
            }
        });

        // Act
        let node: NodeDef = serde_json::from_value(value).unwrap();

        // Assert
        assert!(node.ui_hints().cards_layout);
        assert!(node.fields()[0].required);
        assert!(!node.uploads()[0].required);
    }

    #[test]
    fn test_explicit_nulls_read_as_empty() {
        let value = json!({
            "playbook_id": "nulls",
            "roles": null,
            "worlds": [{
                "id": "W1",
                "order": null,
                "nodes": [{
                    "id": "a",
                    "next": null,
                    "prerequisites": null,
                    "outcomes": null,
                    "actionHints": null,
                    "requirements": { "fields": null, "uploads": null, "ui_hints": { "cards_layout": null } }
                }]
            }]
        });

        let playbook: Playbook = serde_json::from_value(value).unwrap();

        let node = &playbook.worlds[0].nodes[0];
        assert!(playbook.roles.is_empty());
        assert_eq!(playbook.worlds[0].order, 0);
        assert!(node.next.is_empty());
        assert!(node.prerequisites.is_empty());
        assert!(node.outcomes.is_empty());
        assert!(node.action_hints.is_empty());
        assert!(node.fields().is_empty());
        assert!(!node.ui_hints().cards_layout);
    }

    #[test]
    fn test_localized_text_accepts_lines_and_per_locale_lines() {
        let field: FieldDef = serde_json::from_value(json!({
            "key": "topic",
            "label": { "ru": ["line1", "line2"], "en": "Topic" },
            "placeholder": ["first", "second"]
        }))
        .unwrap();

        let mut by_locale = BTreeMap::new();
        by_locale.insert(
            "ru".to_owned(),
            LocaleText::Lines(vec!["line1".to_owned(), "line2".to_owned()]),
        );
        by_locale.insert("en".to_owned(), LocaleText::from("Topic"));
        assert_eq!(field.label, Some(LocalizedText::ByLocale(by_locale)));
        assert_eq!(
            field.placeholder,
            Some(LocalizedText::Lines(vec!["first".to_owned(), "second".to_owned()]))
        );
    }

    #[test]
    fn test_unknown_action_hints_are_kept_raw_and_skipped() {
        let node: NodeDef = serde_json::from_value(json!({
            "id": "E3",
            "actionHints": ["outcome", "teleport", "upload"]
        }))
        .unwrap();

        assert_eq!(node.action_hints, vec!["outcome", "teleport", "upload"]);
        assert_eq!(node.action_hints(), vec![ActionKind::Outcome, ActionKind::Upload]);
    }
}
