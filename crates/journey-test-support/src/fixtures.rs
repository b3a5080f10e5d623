//! Playbook documents used across test suites.
//!
//! Kept as raw JSON so every crate exercises the same parsing path as
//! production.

/// Two worlds: `W1 = { n1 (end), n2 -> n3 }`, `W2 = { n3 (end) }`.
pub const TWO_WORLD_PLAYBOOK_JSON: &str = r#"{
  "playbook_id": "two-world",
  "version": "1.0.0",
  "locale_default": "en",
  "worlds": [
    { "id": "W1", "order": 1, "nodes": [
      { "id": "n1", "next": [] },
      { "id": "n2", "next": ["n3"] }
    ]},
    { "id": "W2", "order": 2, "nodes": [
      { "id": "n3", "next": [] }
    ]}
  ]
}"#;

/// A three-world doctoral journey covering every node kind and action kind.
///
/// Terminal nodes: `W1: [NK_package]`, `W2: [D2_apply_to_ds]`,
/// `W3: [V1_reinstatement_package]`.
pub const DOCTORAL_PLAYBOOK_JSON: &str = r#"{
  "playbook_id": "phd-journey",
  "version": "2026.1",
  "locale_default": "ru",
  "roles": [
    { "id": "student", "label": { "en": "Student", "ru": "Докторант" } },
    { "id": "advisor", "label": { "en": "Advisor" } }
  ],
  "conditions": [{ "id": "rp_required", "expr": "profile.rp_required == true" }],
  "worlds": [
    {
      "id": "W1",
      "order": 1,
      "title": { "ru": "Подготовка", "en": "Preparation" },
      "nodes": [
        {
          "id": "S1_publications_list",
          "title": { "ru": "Список публикаций", "en": "Publications list" },
          "type": "form",
          "who_can_complete": ["student"],
          "next": ["S2_antiplag"],
          "requirements": {
            "fields": [
              { "key": "title", "type": "text", "required": true, "label": { "en": "Title" } },
              { "key": "journal", "type": "text" }
            ]
          }
        },
        {
          "id": "S2_antiplag",
          "title": { "en": "Anti-plagiarism check" },
          "type": "form",
          "prerequisites": ["S1_publications_list"],
          "next": ["NK_package"],
          "requirements": {
            "fields": [
              { "key": "text_checked", "type": "boolean", "required": true },
              { "key": "report_uploaded", "type": "boolean", "required": true },
              { "key": "comment", "type": "note" }
            ]
          }
        },
        {
          "id": "NK_package",
          "title": { "en": "Scientific council package" },
          "type": "uploadTask",
          "prerequisites": ["S2_antiplag"],
          "next": ["E1_apply_omid"],
          "requirements": {
            "uploads": [{ "key": "package", "mime": ["application/pdf"], "required": true }]
          }
        }
      ]
    },
    {
      "id": "W2",
      "order": 2,
      "title": { "ru": "Защита", "en": "Defense" },
      "nodes": [
        {
          "id": "E1_apply_omid",
          "title": { "en": "Apply to the methodology office" },
          "type": "info",
          "prerequisites": ["NK_package"],
          "next": ["E3_hearing_nk"]
        },
        {
          "id": "E3_hearing_nk",
          "title": { "en": "Council hearing" },
          "type": "meeting",
          "prerequisites": ["E1_apply_omid"],
          "next": ["D2_apply_to_ds"],
          "outcomes": [
            { "value": "pass", "next": ["D2_apply_to_ds"] },
            { "value": "rework", "next": ["RP2_sc_hearing_prep"] }
          ]
        },
        {
          "id": "D2_apply_to_ds",
          "title": { "en": "Apply to the dissertation council" },
          "type": "form",
          "prerequisites": ["E3_hearing_nk"],
          "next": [],
          "timer": { "duration_days": 30, "start_on": "2026-09-01" },
          "requirements": {
            "fields": [{ "key": "council", "type": "select" }],
            "ui_hints": { "cards_layout": true }
          }
        }
      ]
    },
    {
      "id": "W3",
      "order": 3,
      "title": { "ru": "Восстановление", "en": "Reinstatement" },
      "nodes": [
        {
          "id": "RP2_sc_hearing_prep",
          "type": "form",
          "condition": "rp_required",
          "next": ["V1_reinstatement_package"],
          "requirements": { "fields": [{ "key": "hearing_date", "type": "date" }] }
        },
        {
          "id": "V1_reinstatement_package",
          "type": "decision",
          "prerequisites": ["RP2_sc_hearing_prep"],
          "requirements": { "uploads": [{ "key": "order_scan" }] }
        }
      ]
    }
  ]
}"#;
