//! Organizations domain layer: entities, provisioning state machine, validation

pub mod entities;
pub mod state;
pub mod validation;
