//! Provisioning state machine
//!
//! Tracks one create-organization request from the existence check to its
//! outcome. Each machine defines:
//! - Valid states
//! - Events that trigger transitions
//! - Guard conditions for transitions
//! - Terminal states

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to} via {event}")]
    InvalidTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

// ============================================================================
// Provisioning State Machine
// ============================================================================

/// Provisioning states; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningState {
    /// Existence check performed
    Checked,
    /// A user already exists for the verified email
    Exists,
    /// No user for the verified email
    NotFound,
    /// Transaction open, rows being written
    Creating,
    /// Transaction committed
    Created,
    /// Rejected before any write, or rolled back
    Failed,
}

impl ProvisioningState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exists | Self::Created | Self::Failed)
    }
}

impl std::fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checked => write!(f, "checked"),
            Self::Exists => write!(f, "exists"),
            Self::NotFound => write!(f, "not_found"),
            Self::Creating => write!(f, "creating"),
            Self::Created => write!(f, "created"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Events that trigger provisioning state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProvisioningEvent {
    /// Directory returned a user for the email
    UserFound,
    /// Directory returned nothing
    UserMissing,
    /// Request rejected (invalid body or email mismatch)
    Reject,
    /// Transaction begins
    BeginCreate,
    /// Transaction committed
    Commit,
    /// Transaction rolled back
    Abort,
}

impl std::fmt::Display for ProvisioningEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserFound => write!(f, "user_found"),
            Self::UserMissing => write!(f, "user_missing"),
            Self::Reject => write!(f, "reject"),
            Self::BeginCreate => write!(f, "begin_create"),
            Self::Commit => write!(f, "commit"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

/// Guard context for provisioning transitions
#[derive(Debug, Clone)]
pub struct ProvisioningGuardContext {
    /// Body validated and its email matches the verified identity
    pub request_valid: bool,
}

/// Provisioning state machine
pub struct ProvisioningStateMachine;

impl ProvisioningStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: ProvisioningState,
        event: ProvisioningEvent,
        context: Option<&ProvisioningGuardContext>,
    ) -> Result<ProvisioningState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (ProvisioningState::Checked, ProvisioningEvent::UserFound) => ProvisioningState::Exists,
            (ProvisioningState::Checked, ProvisioningEvent::UserMissing) => {
                ProvisioningState::NotFound
            }

            (ProvisioningState::NotFound, ProvisioningEvent::BeginCreate) => {
                // Guard: nothing is written for an unvalidated request
                let valid = context.map(|ctx| ctx.request_valid).unwrap_or(false);
                if !valid {
                    return Err(StateError::GuardFailed(
                        "Cannot create from an unvalidated request".to_string(),
                    ));
                }
                ProvisioningState::Creating
            }
            (ProvisioningState::NotFound, ProvisioningEvent::Reject) => ProvisioningState::Failed,

            (ProvisioningState::Creating, ProvisioningEvent::Commit) => ProvisioningState::Created,
            (ProvisioningState::Creating, ProvisioningEvent::Abort) => ProvisioningState::Failed,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }
}

// ============================================================================
// Tests
// ============================================================================
