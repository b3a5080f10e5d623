//! Domain layer for the playbook context.

pub mod graph;
pub mod kind;
mod lenient;
pub mod locale;
pub mod model;
pub mod progress;
pub mod timer;
pub mod validation;
