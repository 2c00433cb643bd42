//! The seam between the flow machine and whatever actually draws things.
//!
//! The machine only decides *what* should be visible; a [`FlowSurface`]
//! implementation decides *how*. Hosts implement this once (DOM, console,
//! test recorder) and the machine drives it on every transition.

use crate::error::Result;
use crate::types::{EnterAction, ModalId, Slot, ViewType, Widget};

/// Rendering surface and side-effect sink for the flow machine.
///
/// Implementations must be cheap to call redundantly: the machine re-renders
/// the full widget set on every transition and treats rendering as idempotent.
pub trait FlowSurface {
    /// Switch the visible surface (live feed, captured still, upload form,
    /// nothing).
    fn apply_view(&mut self, view: ViewType);

    /// Set the status messages shown above and below the surface. Empty
    /// strings mean "hide the message".
    fn set_messages(&mut self, top: &str, bottom: &str);

    /// Hide every widget in both rows. Called before each render pass.
    fn hide_all(&mut self);

    /// Show one widget in the given row. A surface with no element for the
    /// widget returns [`MemecamError::MissingRenderTarget`]; the machine logs
    /// it and renders the rest.
    ///
    /// [`MemecamError::MissingRenderTarget`]: crate::error::MemecamError::MissingRenderTarget
    fn show_widget(&mut self, slot: Slot, widget: Widget) -> Result<()>;

    /// Display a modal dialog. The host must later call
    /// [`FlowMachine::on_modal_closed`] when it notices the modal was
    /// dismissed (within one UI tick of it becoming hidden). A surface that
    /// has no such modal returns [`MemecamError::MissingModal`]; the machine
    /// then behaves as if the modal were already closed so the user is never
    /// stuck.
    ///
    /// [`FlowMachine::on_modal_closed`]: super::machine::FlowMachine::on_modal_closed
    /// [`MemecamError::MissingModal`]: crate::error::MemecamError::MissingModal
    fn open_modal(&mut self, modal: ModalId) -> Result<()>;

    /// Run an on-enter side effect (start/stop camera, save, upload, ...).
    /// The machine does not inspect any outcome.
    fn run_action(&mut self, action: EnterAction);
}
