//! Error types for memecam-core operations.
//!
//! Nothing in this crate is fatal to the host: unknown states, missing modals,
//! and missing render targets are all recovered locally and surfaced through
//! `tracing` at the recovery site. The variants here exist so the recovery
//! sites have something precise to log.

use crate::types::{ButtonId, ModalId, StateId, Widget};

/// All errors that can occur in memecam-core operations.
#[derive(Debug, thiserror::Error)]
pub enum MemecamError {
    // ─────────────────────────────────────────────────────────────────────
    // Flow Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Unknown state: {0} (not in the state table)")]
    UnknownState(StateId),

    #[error("Button has no transition target: {0}")]
    UnmappedButton(ButtonId),

    #[error("Modal not present on the surface: {0}")]
    MissingModal(ModalId),

    #[error("No render target for widget: {0}")]
    MissingRenderTarget(Widget),

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using MemecamError.
pub type Result<T> = std::result::Result<T, MemecamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ControlId;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = MemecamError::UnknownState(StateId::GestureDetected);
        assert!(err.to_string().contains("gesture_detected"));

        let err = MemecamError::MissingModal(ModalId::Create);
        assert!(err.to_string().contains("create_modal"));

        let err = MemecamError::MissingRenderTarget(Widget::Control(ControlId::BlurFace));
        assert!(err.to_string().contains("blur_face"));
    }
}
