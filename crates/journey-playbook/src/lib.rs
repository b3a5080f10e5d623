//! The guided-journey playbook and its derived views.
//!
//! Responsible for the playbook data model, graph derivations (terminal
//! nodes, next-world entry, node kinds), node-state progression, and
//! ingestion/validation of playbook documents.

pub mod application;
pub mod domain;
