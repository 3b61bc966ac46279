//! HTTP handlers for the organizations domain

pub mod organizations;
pub mod token_exchange;
