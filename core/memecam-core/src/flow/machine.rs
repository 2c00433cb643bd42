//! The flow state machine driving the multi-step capture/edit/publish flow.
//!
//! Single-threaded and synchronous: a transition always completes (including
//! asking the surface to display a modal) before the next user action can be
//! processed. The only long wait is the modal-close notification, which the
//! host delivers later via [`FlowMachine::on_modal_closed`].

use tracing::{debug, error, info, warn};

use super::surface::FlowSurface;
use super::table::{FlowState, StateTable};
use crate::error::{MemecamError, Result};
use crate::prefs::ModalPrefs;
use crate::types::{ButtonId, ModalId, Slot, StateId};

/// Owns the current/previous state, the pending modal watch, the render
/// surface, and the modal skip preferences.
///
/// Invariants:
/// - `current` always names a key present in the table; transitioning to a
///   missing key fails without any mutation.
/// - `previous` is only updated on transitions into non-modal states.
/// - At most one modal watch is pending; opening another discards the stale
///   one, and close notifications for anything else are ignored.
pub struct FlowMachine<S: FlowSurface> {
    table: StateTable,
    surface: S,
    prefs: ModalPrefs,
    current: StateId,
    previous: StateId,
    pending_modal: Option<ModalId>,
}

impl<S: FlowSurface> FlowMachine<S> {
    /// Creates a machine parked on [`StateId::Initial`] without rendering.
    /// Call [`FlowMachine::start`] to enter the initial state properly.
    pub fn new(table: StateTable, surface: S, prefs: ModalPrefs) -> Self {
        Self {
            table,
            surface,
            prefs,
            current: StateId::Initial,
            previous: StateId::Initial,
            pending_modal: None,
        }
    }

    /// Enters the initial state, running its render pass.
    pub fn start(&mut self) {
        if let Err(err) = self.transition(StateId::Initial) {
            error!(error = %err, "failed to enter initial state");
        }
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn previous(&self) -> StateId {
        self.previous
    }

    pub fn pending_modal(&self) -> Option<ModalId> {
        self.pending_modal
    }

    /// The configuration record for the current state. `None` only for a
    /// machine built over a table that lacks its own initial state.
    pub fn state(&self) -> Option<&FlowState> {
        self.table.get(self.current)
    }

    pub fn table(&self) -> &StateTable {
        &self.table
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn prefs(&self) -> &ModalPrefs {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut ModalPrefs {
        &mut self.prefs
    }

    /// Handles a button click: looks up the static button-to-state map and
    /// transitions. Unmapped buttons and failed transitions are logged, never
    /// propagated; click handlers must not throw.
    pub fn press(&mut self, button: ButtonId) {
        let Some(target) = self.table.button_target(button) else {
            error!(error = %MemecamError::UnmappedButton(button), "ignoring press");
            return;
        };
        info!(%button, %target, "button pressed");
        if let Err(err) = self.transition(target) {
            error!(error = %err, "transition failed");
        }
    }

    /// Switches to `target` and applies its configuration: on-enter action,
    /// or modal display (honoring the skip preference), then a full render
    /// pass.
    ///
    /// A target absent from the table fails with
    /// [`MemecamError::UnknownState`]; `current` is left untouched and no
    /// partial mutation occurs.
    pub fn transition(&mut self, target: StateId) -> Result<()> {
        let state = self
            .table
            .get(target)
            .ok_or(MemecamError::UnknownState(target))?
            .clone();

        // Remember the last non-modal state as the fallback return target.
        if state.modal.is_none() {
            self.previous = target;
            // Any modal watch still pending belongs to a flow we just left.
            if let Some(stale) = self.pending_modal.take() {
                debug!(%stale, "discarding stale modal watch");
            }
        }

        debug!(from = %self.current, to = %target, "state change");
        self.current = target;

        if let Some(action) = state.on_enter {
            debug!(state = %target, %action, "running on-enter action");
            self.surface.run_action(action);
        } else if let Some(modal) = state.modal {
            if self.prefs.skip(modal) {
                debug!(%modal, "skipping modal (user preference)");
                return self.follow_up_after(modal);
            }
            match self.surface.open_modal(modal) {
                Ok(()) => {
                    if let Some(stale) = self.pending_modal.replace(modal) {
                        debug!(%stale, "discarding stale modal watch");
                    }
                    debug!(%modal, "modal opened, watching for close");
                }
                Err(err) => {
                    // Fall through as if it closed immediately so the user is
                    // never stuck on a surface without the dialog.
                    error!(error = %err, "modal unavailable, treating as closed");
                    return self.follow_up_after(modal);
                }
            }
        }

        self.render(&state);
        Ok(())
    }

    /// Host notification that a modal became hidden. Stale notifications (a
    /// modal that is not the pending one) are ignored.
    pub fn on_modal_closed(&mut self, modal: ModalId) {
        if self.pending_modal != Some(modal) {
            warn!(%modal, pending = ?self.pending_modal, "ignoring stale modal close");
            return;
        }
        self.pending_modal = None;
        debug!(%modal, "modal closed");
        if let Err(err) = self.follow_up_after(modal) {
            error!(error = %err, "follow-up transition failed");
        }
    }

    /// Transitions to the state that should follow a dismissed modal: the
    /// owning state's declared next-state, or the remembered previous
    /// non-modal state.
    fn follow_up_after(&mut self, modal: ModalId) -> Result<()> {
        let Some(owner) = self.table.state_for_modal(modal) else {
            warn!(%modal, "no state owns this modal, staying put");
            return Ok(());
        };
        let next = owner.next_state.unwrap_or(self.previous);
        debug!(%modal, %next, "following up after modal");
        self.transition(next)
    }

    /// Mandatory post-condition of every transition: exactly the declared
    /// widgets are shown, everything else is hidden, messages and view match
    /// the state. Idempotent; safe to call redundantly.
    fn render(&mut self, state: &FlowState) {
        self.surface.set_messages(state.top_message, state.bottom_message);
        self.surface.apply_view(state.view);
        self.surface.hide_all();
        for (slot, widgets) in [(Slot::Top, &state.top), (Slot::Bottom, &state.bottom)] {
            for &widget in widgets {
                if let Err(err) = self.surface.show_widget(slot, widget) {
                    // One missing target skips one widget, not the render.
                    error!(error = %err, "skipping widget");
                }
            }
        }
    }
}
