//! Application layer for the playbook context.

pub mod ingest;
pub mod query_handlers;
