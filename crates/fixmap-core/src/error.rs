//! Error types for overlay composition.

use thiserror::Error;

/// Failures raised while building or rendering a scene.
///
/// Every variant is scoped to a single overlay unit (one waypoint, one ring,
/// one procedure, one collaborator). The composer reports them and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    #[error("waypoint {id:?} is already registered")]
    DuplicateWaypoint { id: String },

    #[error("unknown waypoint {id:?}")]
    UnknownWaypoint { id: String },

    #[error("procedure {procedure_name:?} references unregistered waypoint {missing_id:?}")]
    UnresolvedProcedure {
        procedure_name: String,
        missing_id: String,
    },

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("{collaborator} overlay failed: {reason}")]
    CollaboratorInvocation { collaborator: String, reason: String },
}

impl OverlayError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        OverlayError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub fn collaborator(collaborator: impl Into<String>, reason: impl ToString) -> Self {
        OverlayError::CollaboratorInvocation {
            collaborator: collaborator.into(),
            reason: reason.to_string(),
        }
    }
}

pub type OverlayResult<T> = Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_procedure_message_names_both_ids() {
        let err = OverlayError::UnresolvedProcedure {
            procedure_name: "SERFR2".into(),
            missing_id: "ZZZZZ".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SERFR2"));
        assert!(msg.contains("ZZZZZ"));
    }

    #[test]
    fn collaborator_helper_keeps_reason() {
        let err = OverlayError::collaborator("vectors", "connection refused");
        assert_eq!(err.to_string(), "vectors overlay failed: connection refused");
    }
}
